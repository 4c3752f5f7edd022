use crate::arena::TypedArena;
use crate::red_black_tree::node::{Color, Node, NodeId, Side};
use std::cmp::Ordering;
use std::ops::Index;

const DEFAULT_CHUNK_SIZE: usize = 256;

/// An ordered set of `i32` keys implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree where every node is colored red or
/// black. The root and every empty child position are black, a red node never has a red child,
/// and every path from the root down to an empty child position crosses the same number of black
/// nodes. Together these bound the height of the tree by `2 * log2(n + 1)`.
///
/// Nodes are stored in a `TypedArena` and linked through `NodeId` handles: the child slots own
/// their subtrees, the parent slot is a plain back-reference. Node state is readable through
/// `tree[id]` so the invariants can be checked from the outside.
///
/// # Examples
///
/// ```
/// use redblack_collections::red_black_tree::{Color, RedBlackTree};
///
/// let mut tree = RedBlackTree::new();
/// let (inserted, node) = tree.insert(28);
/// assert!(inserted);
/// assert_eq!(tree[node].key(), 28);
/// assert_eq!(tree[node].color(), Color::Black);
///
/// assert_eq!(tree.insert(28), (false, node));
/// assert!(tree.delete(28));
/// assert!(!tree.delete(28));
/// assert_eq!(tree.find(28), None);
/// ```
pub struct RedBlackTree {
    arena: TypedArena<Node>,
    root: Option<NodeId>,
}

impl RedBlackTree {
    /// Constructs a new, empty `RedBlackTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackTree` whose node arena grows by `chunk_size` nodes at a
    /// time.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::with_chunk_size(16);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackTree {
            arena: TypedArena::new(chunk_size),
            root: None,
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.arena[id]
    }

    fn set_color(&mut self, id: Option<NodeId>, color: Color) {
        if let Some(id) = id {
            self.node_mut(id).color = color;
        }
    }

    fn side_of(&self, child: NodeId, parent: NodeId) -> Side {
        if self.node(parent).left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    // Puts `new` where `old` hangs below `parent`, or at the root when `parent` is `None`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(old, parent);
                *self.node_mut(parent).child_mut(side) = new;
            },
        }
    }

    // Rotating towards `side` promotes the child on the opposite side into the position of `id`
    // and makes `id` its child on `side`.
    fn rotate(&mut self, id: NodeId, side: Side) {
        let child = match self.node(id).child(side.opposite()) {
            Some(child) => child,
            None => unreachable!(),
        };
        trace!("rotating {:?} at key {}", side, self.node(id).key);

        let inner = self.node(child).child(side);
        *self.node_mut(id).child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(id);
        }

        let parent = self.node(id).parent;
        self.replace_child(parent, id, Some(child));
        self.node_mut(child).parent = parent;

        *self.node_mut(child).child_mut(side) = Some(id);
        self.node_mut(id).parent = Some(child);
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// Inserts a key into the tree. Returns `(true, id)` with the new node if the key was absent,
    /// or `(false, id)` with the node already holding the key, in which case the tree is left
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// let (inserted, node) = tree.insert(0);
    /// assert!(inserted);
    /// assert_eq!(tree[node].key(), 0);
    /// assert_eq!(tree.insert(0), (false, node));
    /// ```
    pub fn insert(&mut self, key: i32) -> (bool, NodeId) {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(id) = curr {
            let node = self.node(id);
            side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return (false, id),
            };
            parent = Some(id);
            curr = node.child(side);
        }

        let id = self.arena.allocate(Node::new(key, parent));
        match parent {
            None => self.root = Some(id),
            Some(parent) => *self.node_mut(parent).child_mut(side) = Some(id),
        }
        self.insert_fixup(id);
        (true, id)
    }

    fn insert_fixup(&mut self, mut id: NodeId) {
        while let Some(mut parent) = self.node(id).parent {
            if self.node(parent).color == Color::Black {
                break;
            }

            // A red parent is never the root.
            let grandparent = match self.node(parent).parent {
                Some(grandparent) => grandparent,
                None => unreachable!(),
            };
            let parent_side = self.side_of(parent, grandparent);
            let uncle = self.node(grandparent).child(parent_side.opposite());

            if self.color_of(uncle) == Color::Red {
                trace!("insert fixup: red uncle at key {}", self.node(grandparent).key);
                self.set_color(Some(parent), Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                id = grandparent;
                continue;
            }

            if self.side_of(id, parent) != parent_side {
                trace!("insert fixup: inner child at key {}", self.node(id).key);
                self.rotate(parent, parent_side);
                parent = id;
            }

            trace!("insert fixup: outer child at key {}", self.node(parent).key);
            self.set_color(Some(parent), Color::Black);
            self.set_color(Some(grandparent), Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            break;
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Removes a key from the tree. Returns `true` if the key was present.
    ///
    /// A node with two children takes over the key of its in-order successor and the successor
    /// node is removed instead, so handles to other nodes may end up holding a different key.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(!tree.delete(1));
    /// tree.insert(1);
    /// assert!(tree.delete(1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: i32) -> bool {
        let mut target = match self.find(key) {
            Some(id) => id,
            None => return false,
        };

        if let (Some(_), Some(right)) = (self.node(target).left, self.node(target).right) {
            let successor = self.leftmost(right);
            let successor_key = self.node(successor).key;
            self.node_mut(target).key = successor_key;
            target = successor;
        }

        let (child, parent, color) = {
            let node = self.node(target);
            (node.left.or(node.right), node.parent, node.color)
        };
        let side = parent.map(|parent| self.side_of(target, parent));

        self.replace_child(parent, target, child);
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }

        match (color, side) {
            (Color::Black, Some(side)) => self.delete_fixup(child, parent, side),
            (Color::Black, None) => self.set_color(child, Color::Black),
            (Color::Red, _) => trace!("spliced out red node with key {}", key),
        }

        self.arena.free(&target);
        true
    }

    // `id` is the position carrying the extra black: `side` of `parent`, possibly empty.
    fn delete_fixup(&mut self, mut id: Option<NodeId>, mut parent: Option<NodeId>, mut side: Side) {
        while let Some(curr_parent) = parent {
            if self.color_of(id) == Color::Red {
                break;
            }

            // The deficient side has black height at least one lower, so a sibling exists.
            let mut sibling = match self.node(curr_parent).child(side.opposite()) {
                Some(sibling) => sibling,
                None => unreachable!(),
            };

            if self.node(sibling).color == Color::Red {
                trace!("delete fixup: red sibling at key {}", self.node(sibling).key);
                self.set_color(Some(sibling), Color::Black);
                self.set_color(Some(curr_parent), Color::Red);
                self.rotate(curr_parent, side);
                continue;
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(side.opposite());

            if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                trace!("delete fixup: black nephews at key {}", self.node(sibling).key);
                self.set_color(Some(sibling), Color::Red);
                id = Some(curr_parent);
                parent = self.node(curr_parent).parent;
                if let Some(grandparent) = parent {
                    side = self.side_of(curr_parent, grandparent);
                }
                continue;
            }

            if self.color_of(far) == Color::Black {
                trace!("delete fixup: red near nephew at key {}", self.node(sibling).key);
                self.set_color(near, Color::Black);
                self.set_color(Some(sibling), Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = match self.node(curr_parent).child(side.opposite()) {
                    Some(sibling) => sibling,
                    None => unreachable!(),
                };
            }

            trace!("delete fixup: red far nephew at key {}", self.node(sibling).key);
            let parent_color = self.node(curr_parent).color;
            let far = self.node(sibling).child(side.opposite());
            self.set_color(Some(sibling), parent_color);
            self.set_color(Some(curr_parent), Color::Black);
            self.set_color(far, Color::Black);
            self.rotate(curr_parent, side);
            id = self.root;
            break;
        }

        self.set_color(id, Color::Black);
    }

    /// Returns the node holding `key`, or `None` if the key is not in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(28);
    /// let node = tree.find(28).unwrap();
    /// assert_eq!(tree[node].key(), 28);
    /// assert_eq!(tree.find(1), None);
    /// ```
    pub fn find(&self, key: i32) -> Option<NodeId> {
        let mut curr = self.root;
        while let Some(id) = curr {
            let node = self.node(id);
            curr = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Returns `true` if the tree contains `key`.
    pub fn contains(&self, key: i32) -> bool {
        self.find(key).is_some()
    }

    /// Returns the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the node behind `id`, or `None` if it has been removed.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(&id)
    }

    /// Returns the color of a child position. Empty positions are black.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::{Color, RedBlackTree};
    ///
    /// let mut tree = RedBlackTree::new();
    /// let (_, root) = tree.insert(1);
    /// assert_eq!(tree.color_of(tree[root].left()), Color::Black);
    /// ```
    pub fn color_of(&self, id: Option<NodeId>) -> Color {
        match id {
            Some(id) => self.node(id).color,
            None => Color::Black,
        }
    }

    fn preorder(&self) -> Vec<NodeId> {
        let mut ret = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            ret.push(id);
            let node = self.node(id);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        ret
    }

    /// Returns every node without children, in pre-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for key in &[2, 1, 3] {
    ///     tree.insert(*key);
    /// }
    /// let keys: Vec<i32> = tree.leaves().into_iter().map(|id| tree[id].key()).collect();
    /// assert_eq!(keys, vec![1, 3]);
    /// ```
    pub fn leaves(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|id| self.node(*id).is_leaf())
            .collect()
    }

    /// Returns every node with at least one child, in pre-order.
    pub fn internal_nodes(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|id| !self.node(*id).is_leaf())
            .collect()
    }

    /// Returns the number of black nodes on every path from the root to an empty child position,
    /// or `None` if the tree is not a valid red black tree. An empty tree has black height zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.black_height(), Some(0));
    /// for key in 0..7 {
    ///     tree.insert(key);
    /// }
    /// assert!(tree.black_height().is_some());
    /// ```
    pub fn black_height(&self) -> Option<usize> {
        if self.color_of(self.root) == Color::Red {
            return None;
        }
        self.subtree_black_height(self.root, None)
    }

    fn subtree_black_height(&self, id: Option<NodeId>, parent: Option<NodeId>) -> Option<usize> {
        let id = match id {
            Some(id) => id,
            None => return Some(0),
        };
        let node = self.node(id);
        if node.parent != parent {
            return None;
        }
        if node.color == Color::Red
            && (self.color_of(node.left) == Color::Red || self.color_of(node.right) == Color::Red)
        {
            return None;
        }

        let left = self.subtree_black_height(node.left, Some(id))?;
        let right = self.subtree_black_height(node.right, Some(id))?;
        if left != right {
            return None;
        }
        match node.color {
            Color::Black => Some(left + 1),
            Color::Red => Some(left),
        }
    }

    /// Returns the smallest key in the tree.
    pub fn min(&self) -> Option<i32> {
        self.root.map(|root| self.node(self.leftmost(root)).key)
    }

    /// Returns the largest key in the tree.
    pub fn max(&self) -> Option<i32> {
        self.root.map(|root| self.node(self.rightmost(root)).key)
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key, releasing each node exactly once. Handles obtained before clearing no
    /// longer resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// let (_, node) = tree.insert(1);
    /// tree.insert(2);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(tree.get(node).is_none());
    /// ```
    pub fn clear(&mut self) {
        let mut released = 0;
        let mut stack: Vec<NodeId> = self.root.take().into_iter().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.arena.free(&id) {
                stack.extend(node.left);
                stack.extend(node.right);
                released += 1;
            }
        }
        debug_assert!(self.arena.is_empty());
        self.arena.clear();
        debug!("cleared red black tree, released {} nodes", released);
    }

    /// Returns an iterator over the keys of the tree in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for key in &[5, -1, 3] {
    ///     tree.insert(*key);
    /// }
    /// assert_eq!(tree.iter().collect::<Vec<i32>>(), vec![-1, 3, 5]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }
}

impl Default for RedBlackTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for RedBlackTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.node(id)
    }
}

impl<'a> IntoIterator for &'a RedBlackTree {
    type IntoIter = Iter<'a>;
    type Item = i32;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys of a `RedBlackTree` in ascending order.
pub struct Iter<'a> {
    tree: &'a RedBlackTree,
    stack: Vec<NodeId>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut curr: Option<NodeId>) {
        while let Some(id) = curr {
            self.stack.push(id);
            curr = self.tree.node(id).left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let node = tree.node(self.stack.pop()?);
        self.push_left_spine(node.right);
        Some(node.key)
    }
}
