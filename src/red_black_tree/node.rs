use crate::arena::Handle;

/// A handle to a node of a `RedBlackTree`.
///
/// A `NodeId` is valid until the node it refers to is removed from the tree, either by deleting
/// its key or by clearing the tree.
pub type NodeId = Handle;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A struct representing a node of a red black tree.
///
/// Every field can be read so that callers can verify the red black invariants from the outside.
/// Only the tree mutates nodes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub(super) key: i32,
    pub(super) color: Color,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
    pub(super) parent: Option<NodeId>,
}

impl Node {
    pub(super) fn new(key: i32, parent: Option<NodeId>) -> Self {
        Node {
            key,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }

    pub(super) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(super) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Returns the key stored in the node.
    pub fn key(&self) -> i32 {
        self.key
    }

    /// Returns the color of the node.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the left child of the node.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Returns the right child of the node.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Returns the parent of the node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
