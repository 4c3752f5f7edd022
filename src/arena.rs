//! Chunked slab allocator handing out stable handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A stable reference to an object allocated in a `TypedArena<T>`.
///
/// A handle stays valid until the object it refers to is freed. Freed slots are recycled, so a
/// stale handle may later resolve to a different object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator that stores objects of a single type in fixed-size chunks.
///
/// Objects never move once allocated: a full arena allocates another chunk instead of
/// reallocating, so a `Handle` can be held across any number of later allocations. Vacant blocks
/// form an intrusive free list and are reused before a new chunk is pushed. Every object still in
/// the arena is dropped when the arena is dropped or cleared.
///
/// # Examples
///
/// ```
/// use redblack_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), Some(2));
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    size: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: &Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` holding `chunk_size` objects per chunk. A
    /// `chunk_size` of zero is treated as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert_eq!(arena.chunk_size(), 1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size: chunk_size.max(1),
            size: 0,
            capacity: 0,
        }
    }

    /// Moves `value` into the arena and returns its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        if let Some(handle) = self.head.take() {
            let vacant_block = mem::replace(
                &mut self.chunks[handle.chunk_index][handle.block_index],
                Block::Occupied(value),
            );
            match vacant_block {
                Block::Vacant(next_handle) => self.head = next_handle,
                Block::Occupied(_) => unreachable!(),
            }
            self.size += 1;
            return handle;
        }

        let needs_chunk = match self.chunks.last() {
            Some(chunk) => chunk.len() == self.chunk_size,
            None => true,
        };
        if needs_chunk {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.size += 1;

        let chunk_index = self.chunks.len() - 1;
        let last_chunk = &mut self.chunks[chunk_index];
        last_chunk.push(Block::Occupied(value));
        Handle {
            chunk_index,
            block_index: last_chunk.len() - 1,
        }
    }

    /// Releases the object behind `handle` and returns it. Returns `None` if the handle does not
    /// refer to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), Some(0));
    /// assert_eq!(arena.free(&x), None);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }
        let old_block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(self.head.take()),
        );
        self.head = Some(*handle);
        self.size -= 1;
        match old_block {
            Block::Occupied(value) => Some(value),
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns `true` if `handle` refers to a live object.
    pub fn contains(&self, handle: &Handle) -> bool {
        if !self.is_valid_handle(handle) {
            return false;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(_) => true,
            Block::Vacant(_) => false,
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the handle does
    /// not refer to a live object.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the handle does not
    /// refer to a live object.
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of objects the allocated chunks can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of objects per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Drops every object and releases all chunks. Previously issued handles no longer resolve.
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.size = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle does not refer to a live object.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle does not refer to a live object.")
    }
}

#[cfg(test)]
mod tests {
    use super::Handle;
    use super::TypedArena;

    #[test]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        assert_eq!(
            arena.free(&Handle {
                chunk_index: 0,
                block_index: 0,
            }),
            None,
        );
    }

    #[test]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        assert_eq!(arena.free(&handle), Some(0));
        assert_eq!(arena.free(&handle), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        let handles: Vec<Handle> = (0..3).map(|i| arena.allocate(i)).collect();
        assert_eq!(
            handles[2],
            Handle {
                chunk_index: 1,
                block_index: 0
            },
        );
        assert_eq!(arena.capacity(), 4);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_list_reuses_slots() {
        let mut arena = TypedArena::new(2);
        let a = arena.allocate(0);
        let b = arena.allocate(1);
        arena.free(&a);
        arena.free(&b);

        // Most recently freed slot comes back first.
        assert_eq!(arena.allocate(2), b);
        assert_eq!(arena.allocate(3), a);
        assert_eq!(arena.capacity(), 2);
        assert_eq!(arena[a], 3);
        assert_eq!(arena[b], 2);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        *arena.get_mut(&handle).unwrap() = 1;
        assert_eq!(arena.get(&handle), Some(&1));
    }

    #[test]
    fn test_zero_chunk_size() {
        let mut arena = TypedArena::new(0);
        let a = arena.allocate('a');
        let b = arena.allocate('b');
        assert_eq!(arena.chunk_size(), 1);
        assert_eq!((arena[a], arena[b]), ('a', 'b'));
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(4);
        let handle = arena.allocate(String::from("x"));
        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(&handle));
        assert_eq!(arena.capacity(), 0);
    }

    #[test]
    #[should_panic]
    fn test_index_vacant_block() {
        let mut arena = TypedArena::new(4);
        let handle = arena.allocate(0);
        arena.free(&handle);
        let _ = arena[handle];
    }
}
