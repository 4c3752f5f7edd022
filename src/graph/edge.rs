use std::hash::{Hash, Hasher};

/// An undirected edge between the vertices `a` and `b`.
///
/// Edges compare equal regardless of the order of their endpoints.
///
/// # Examples
///
/// ```
/// use redblack_collections::graph::Edge;
///
/// assert_eq!(Edge::new(1, 2), Edge::new(2, 1));
/// assert_ne!(Edge::new(1, 2), Edge::new(1, 3));
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Edge { a, b }
    }

    fn endpoints(&self) -> (usize, usize) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    /// Returns `true` if `id` is one of the endpoints.
    pub fn touches(&self, id: usize) -> bool {
        self.a == id || self.b == id
    }

    /// Returns `true` if both endpoints are the same vertex.
    pub fn is_loop(&self) -> bool {
        self.a == self.b
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Edge) -> bool {
        self.endpoints() == other.endpoints()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.endpoints().hash(state);
    }
}

/// A vertex of a `Graph` together with its adjacency list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vertex {
    pub(super) id: usize,
    pub(super) color: usize,
    pub(super) neighbors: Vec<usize>,
}

impl Vertex {
    pub(super) fn new(id: usize) -> Self {
        Vertex {
            id,
            color: 0,
            neighbors: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the color assigned by the last `Graph::coloring`, or `0` if the vertex has not
    /// been colored.
    pub fn color(&self) -> usize {
        self.color
    }

    /// Returns the ids of the adjacent vertices in the order the edges were added.
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}
