use crate::arena::{Handle, TypedArena};
use crate::hash_map::{Error, Result};
use siphasher::sip::SipHasher;
use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

/// The number of buckets of a freshly constructed or cleared `HashMap`.
pub const INITIAL_CAPACITY: usize = 8;

const ARENA_CHUNK_SIZE: usize = 64;

fn gen_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = SipHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

struct Item<K, V> {
    key: K,
    value: V,
    hash: u64,
    // next item in the same bucket
    next: Option<Handle>,
    prev_order: Option<Handle>,
    next_order: Option<Handle>,
}

/// A hash map implemented using separate chaining.
///
/// Keys are hashed with SipHash under fixed keys, so the bucket an entry lands in only depends on
/// the key and the current capacity. Each bucket heads a singly linked chain of entries; all
/// entries are additionally threaded through a doubly linked list in insertion order, which is
/// the order of iteration. When an insertion pushes the load factor above two thirds the number
/// of buckets doubles and every entry is rehashed.
///
/// # Examples
///
/// ```
/// use redblack_collections::hash_map::{Error, HashMap};
///
/// let mut map = HashMap::new();
/// map.put("a", 1).unwrap();
/// map.put("b", 2).unwrap();
///
/// assert_eq!(map.put("a", 3), Err(Error::KeyAlreadyExists));
/// assert_eq!(map.get("a"), Some(&1));
///
/// assert_eq!(map.pop("a"), Ok(1));
/// assert_eq!(map.pop("a"), Err(Error::KeyNotFound));
/// assert_eq!(map.len(), 1);
/// ```
pub struct HashMap<K, V> {
    items: TypedArena<Item<K, V>>,
    index: Vec<Option<Handle>>,
    first: Option<Handle>,
    last: Option<Handle>,
}

impl<K, V> HashMap<K, V>
where
    K: Hash + Eq,
{
    /// Constructs a new, empty `HashMap<K, V>` with `INITIAL_CAPACITY` buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::{HashMap, INITIAL_CAPACITY};
    ///
    /// let map: HashMap<String, i32> = HashMap::new();
    /// assert_eq!(map.capacity(), INITIAL_CAPACITY);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Constructs a new, empty `HashMap<K, V>` with `capacity` buckets. A capacity of zero is
    /// treated as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::HashMap;
    ///
    /// let map: HashMap<u32, u32> = HashMap::with_capacity(32);
    /// assert_eq!(map.capacity(), 32);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        HashMap {
            items: TypedArena::new(ARENA_CHUNK_SIZE),
            index: vec![None; capacity.max(1)],
            first: None,
            last: None,
        }
    }

    fn bucket(&self, hash: u64) -> usize {
        (hash % self.index.len() as u64) as usize
    }

    fn find<Q>(&self, key: &Q, hash: u64) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut curr = self.index[self.bucket(hash)];
        while let Some(handle) = curr {
            let item = &self.items[handle];
            if item.hash == hash && item.key.borrow() == key {
                return Some(handle);
            }
            curr = item.next;
        }
        None
    }

    // Relinks every item into `index`, walking in insertion order.
    fn rebuild(&mut self, mut index: Vec<Option<Handle>>) {
        let capacity = index.len() as u64;
        let mut curr = self.first;
        while let Some(handle) = curr {
            let item = &mut self.items[handle];
            let bucket = (item.hash % capacity) as usize;
            item.next = index[bucket];
            index[bucket] = Some(handle);
            curr = item.next_order;
        }
        self.index = index;
    }

    /// Inserts a key-value pair into the map. Returns `Err(Error::KeyAlreadyExists)` and leaves
    /// the map untouched if the key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::{Error, HashMap};
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.put(1, 1), Ok(()));
    /// assert_eq!(map.put(1, 2), Err(Error::KeyAlreadyExists));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        let hash = gen_hash(&key);
        if self.find(&key, hash).is_some() {
            return Err(Error::KeyAlreadyExists);
        }

        let bucket = self.bucket(hash);
        let handle = self.items.allocate(Item {
            key,
            value,
            hash,
            next: self.index[bucket],
            prev_order: self.last,
            next_order: None,
        });
        self.index[bucket] = Some(handle);
        match self.last {
            Some(last) => self.items[last].next_order = Some(handle),
            None => self.first = Some(handle),
        }
        self.last = Some(handle);

        if self.len() * 3 > self.capacity() * 2 {
            let capacity = self.capacity() * 2;
            debug!("growing hash map from {} to {} buckets", self.capacity(), capacity);
            self.rebuild(vec![None; capacity]);
        }
        Ok(())
    }

    /// Returns an immutable reference to the value associated with a key, or `None` if the key
    /// is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.put(String::from("a"), 1).unwrap();
    /// assert_eq!(map.get("a"), Some(&1));
    /// assert_eq!(map.get("b"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key, gen_hash(key))
            .map(|handle| &self.items[handle].value)
    }

    /// Returns a mutable reference to the value associated with a key, or `None` if the key is
    /// not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.put(1, 1).unwrap();
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.find(key, gen_hash(key))?;
        self.items.get_mut(&handle).map(|item| &mut item.value)
    }

    /// Checks if a key exists in the map.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key, gen_hash(key)).is_some()
    }

    /// Removes a key from the map and returns its value. Returns `Err(Error::KeyNotFound)` if the
    /// key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::{Error, HashMap};
    ///
    /// let mut map = HashMap::new();
    /// map.put(1, 10).unwrap();
    /// assert_eq!(map.pop(&1), Ok(10));
    /// assert_eq!(map.pop(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn pop<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = gen_hash(key);
        let bucket = self.bucket(hash);

        let mut prev = None;
        let mut curr = self.index[bucket];
        while let Some(handle) = curr {
            let item = &self.items[handle];
            if item.hash == hash && item.key.borrow() == key {
                break;
            }
            prev = curr;
            curr = item.next;
        }

        let handle = curr.ok_or(Error::KeyNotFound)?;
        let item = match self.items.free(&handle) {
            Some(item) => item,
            None => unreachable!(),
        };

        match prev {
            Some(prev) => self.items[prev].next = item.next,
            None => self.index[bucket] = item.next,
        }
        match item.prev_order {
            Some(prev_order) => self.items[prev_order].next_order = item.next_order,
            None => self.first = item.next_order,
        }
        match item.next_order {
            Some(next_order) => self.items[next_order].prev_order = item.prev_order,
            None => self.last = item.prev_order,
        }
        Ok(item.value)
    }

    /// Removes a key from the map, discarding its value. Returns `Err(Error::KeyNotFound)` if the
    /// key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::{Error, HashMap};
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.remove("a"), Err(Error::KeyNotFound));
    /// map.put("a", 1).unwrap();
    /// assert_eq!(map.remove("a"), Ok(()));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.pop(key).map(|_| ())
    }

    /// Rehashes the map into exactly `capacity` buckets.
    ///
    /// Returns `Err(Error::CapacityTooSmall)` if `capacity` is zero or smaller than the number of
    /// entries, and `Err(Error::OutOfMemory)` if the bucket index cannot be allocated. Either way
    /// the map is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::{Error, HashMap};
    ///
    /// let mut map = HashMap::new();
    /// map.put(1, 1).unwrap();
    /// assert_eq!(map.reserve(0), Err(Error::CapacityTooSmall));
    /// assert_eq!(map.reserve(64), Ok(()));
    /// assert_eq!(map.capacity(), 64);
    /// assert_eq!(map.reserve(usize::max_value()), Err(Error::OutOfMemory));
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 || capacity < self.len() {
            return Err(Error::CapacityTooSmall);
        }
        if capacity == self.capacity() {
            return Ok(());
        }

        let mut index = Vec::new();
        index
            .try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfMemory)?;
        index.resize(capacity, None);
        debug!("rehashing hash map into {} buckets", capacity);
        self.rebuild(index);
        Ok(())
    }

    /// Removes every entry and shrinks the map back to `INITIAL_CAPACITY` buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::{HashMap, INITIAL_CAPACITY};
    ///
    /// let mut map = HashMap::with_capacity(64);
    /// map.put(1, 1).unwrap();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), INITIAL_CAPACITY);
    /// ```
    pub fn clear(&mut self) {
        self.items.clear();
        self.index = vec![None; INITIAL_CAPACITY];
        self.first = None;
        self.last = None;
    }

    /// Returns an iterator over the entries of the map in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.put("b", 2).unwrap();
    /// map.put("a", 1).unwrap();
    /// assert_eq!(map.iter().collect::<Vec<(&&str, &i32)>>(), vec![(&"b", &2), (&"a", &1)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            items: &self.items,
            curr: self.first,
        }
    }

    /// Returns an iterator over the keys of the map in insertion order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }
}

impl<K, V> HashMap<K, V> {
    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of buckets in the index.
    pub fn capacity(&self) -> usize {
        self.index.len()
    }
}

impl<K, V> Default for HashMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> IntoIterator for &'a HashMap<K, V>
where
    K: Hash + Eq,
{
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a `HashMap` in insertion order.
pub struct Iter<'a, K, V> {
    items: &'a TypedArena<Item<K, V>>,
    curr: Option<Handle>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        let item = &items[self.curr?];
        self.curr = item.next_order;
        Some((&item.key, &item.value))
    }
}

/// An iterator over the keys of a `HashMap` in insertion order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}
