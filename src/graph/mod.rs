//! Undirected graph stored as adjacency lists, with greedy vertex coloring.

mod edge;
mod undirected;

pub use self::edge::{Edge, Vertex};
pub use self::undirected::Graph;

use std::error;
use std::fmt;
use std::result;

/// Errors reported by `Graph` operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// No vertex with the given id exists.
    VertexNotFound(usize),
    /// The edge is not part of the graph.
    EdgeNotFound(Edge),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::VertexNotFound(id) => write!(f, "vertex {} not found", id),
            Error::EdgeNotFound(edge) => write!(f, "edge {}-{} not found", edge.a, edge.b),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
