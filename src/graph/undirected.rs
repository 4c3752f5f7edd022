use crate::graph::{Edge, Error, Result, Vertex};

/// An undirected graph without self-loops or parallel edges.
///
/// Every vertex keeps the list of its neighbors; the graph also keeps the edges in the order they
/// were added. Vertices are identified by arbitrary `usize` ids.
///
/// # Examples
///
/// ```
/// use redblack_collections::graph::{Edge, Graph};
///
/// let mut graph = Graph::new();
/// graph.add_edges(vec![Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)]);
///
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.graph_degree(), 2);
///
/// assert_eq!(graph.coloring(), 3);
/// assert!(graph.edges().iter().all(|edge| {
///     graph.vertex(edge.a).unwrap().color() != graph.vertex(edge.b).unwrap().color()
/// }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Constructs a new, empty `Graph`.
    pub fn new() -> Self {
        Graph {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn position(&self, id: usize) -> Option<usize> {
        self.vertices.iter().position(|vertex| vertex.id == id)
    }

    fn vertex_mut(&mut self, id: usize) -> &mut Vertex {
        match self.position(id) {
            Some(pos) => &mut self.vertices[pos],
            None => {
                self.vertices.push(Vertex::new(id));
                let last = self.vertices.len() - 1;
                &mut self.vertices[last]
            },
        }
    }

    fn unlink(&mut self, from: usize, to: usize) {
        if let Some(pos) = self.position(from) {
            self.vertices[pos].neighbors.retain(|neighbor| *neighbor != to);
        }
    }

    /// Adds an isolated vertex. Returns `None` if a vertex with the same id already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// assert_eq!(graph.add_vertex(1).map(|vertex| vertex.id()), Some(1));
    /// assert!(graph.add_vertex(1).is_none());
    /// ```
    pub fn add_vertex(&mut self, id: usize) -> Option<&Vertex> {
        if self.position(id).is_some() {
            return None;
        }
        self.vertices.push(Vertex::new(id));
        self.vertices.last()
    }

    /// Adds an edge, creating missing endpoints. Returns `false` without changing the graph if
    /// the edge is a self-loop or already present in either direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::graph::{Edge, Graph};
    ///
    /// let mut graph = Graph::new();
    /// assert!(graph.add_edge(Edge::new(1, 2)));
    /// assert!(!graph.add_edge(Edge::new(2, 1)));
    /// assert!(!graph.add_edge(Edge::new(3, 3)));
    /// assert_eq!(graph.vertex_count(), 2);
    /// ```
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.is_loop() || self.contains_edge(&edge) {
            return false;
        }
        self.vertex_mut(edge.a).neighbors.push(edge.b);
        self.vertex_mut(edge.b).neighbors.push(edge.a);
        self.edges.push(edge);
        true
    }

    /// Adds every edge from `edges`, skipping rejected ones. Returns the number of edges added.
    pub fn add_edges<I>(&mut self, edges: I) -> usize
    where
        I: IntoIterator<Item = Edge>,
    {
        edges.into_iter().filter(|edge| self.add_edge(*edge)).count()
    }

    /// Returns the vertex with the given id.
    pub fn vertex(&self, id: usize) -> Option<&Vertex> {
        self.position(id).map(|pos| &self.vertices[pos])
    }

    /// Returns all vertices in the order they were added.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns all edges in the order they were added.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Removes a vertex and every edge incident to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::graph::{Edge, Error, Graph};
    ///
    /// let mut graph = Graph::new();
    /// graph.add_edges(vec![Edge::new(1, 2), Edge::new(1, 3), Edge::new(2, 3)]);
    /// assert_eq!(graph.remove_vertex(1), Ok(()));
    /// assert_eq!(graph.edges(), &[Edge::new(2, 3)]);
    /// assert_eq!(graph.remove_vertex(1), Err(Error::VertexNotFound(1)));
    /// ```
    pub fn remove_vertex(&mut self, id: usize) -> Result<()> {
        let pos = self.position(id).ok_or(Error::VertexNotFound(id))?;
        let vertex = self.vertices.remove(pos);
        for neighbor in vertex.neighbors {
            self.unlink(neighbor, id);
        }
        self.edges.retain(|edge| !edge.touches(id));
        Ok(())
    }

    /// Removes an edge, keeping its endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::graph::{Edge, Error, Graph};
    ///
    /// let mut graph = Graph::new();
    /// graph.add_edge(Edge::new(1, 2));
    /// assert_eq!(graph.remove_edge(&Edge::new(2, 1)), Ok(()));
    /// assert_eq!(graph.vertex_count(), 2);
    /// assert_eq!(graph.remove_edge(&Edge::new(1, 2)), Err(Error::EdgeNotFound(Edge::new(1, 2))));
    /// ```
    pub fn remove_edge(&mut self, edge: &Edge) -> Result<()> {
        let pos = self
            .edges
            .iter()
            .position(|other| other == edge)
            .ok_or(Error::EdgeNotFound(*edge))?;
        self.edges.remove(pos);
        self.unlink(edge.a, edge.b);
        self.unlink(edge.b, edge.a);
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of edges incident to a vertex.
    pub fn vertex_degree(&self, id: usize) -> Result<usize> {
        self.vertex(id)
            .map(Vertex::degree)
            .ok_or(Error::VertexNotFound(id))
    }

    /// Returns the largest vertex degree, or `0` for a graph without vertices.
    pub fn graph_degree(&self) -> usize {
        self.vertices.iter().map(Vertex::degree).max().unwrap_or(0)
    }

    /// Colors the vertices greedily in insertion order: each vertex takes the smallest color,
    /// starting at `1`, that none of its already colored neighbors has. Adjacent vertices always
    /// end up with different colors and no color exceeds `graph_degree() + 1`. Returns the number
    /// of colors used.
    pub fn coloring(&mut self) -> usize {
        for vertex in &mut self.vertices {
            vertex.color = 0;
        }

        let mut colors = 0;
        for pos in 0..self.vertices.len() {
            let taken: Vec<usize> = self.vertices[pos]
                .neighbors
                .iter()
                .filter_map(|neighbor| self.vertex(*neighbor))
                .map(Vertex::color)
                .filter(|color| *color != 0)
                .collect();

            let mut color = 1;
            while taken.contains(&color) {
                color += 1;
            }
            self.vertices[pos].color = color;
            colors = colors.max(color);
        }

        debug!(
            "colored {} vertices with {} colors",
            self.vertices.len(),
            colors,
        );
        colors
    }

    /// Removes every vertex and edge.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }
}
