//! Interaction and reproduction graphs.
//!
//! Vertices are integer labels. Undirected graphs store both orientations of
//! every edge in the underlying `DiGraphMap`, so `out_vertices` is the single
//! neighbor query the engine needs regardless of direction.

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct Graph {
    inner: DiGraphMap<usize, ()>,
    edges: Vec<(usize, usize)>,
    directed: bool,
}

impl Graph {
    /// Builds a graph from an edge list. Vertices are the edge endpoints.
    pub fn new<I>(edges: I, directed: bool) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self {
            inner: DiGraphMap::new(),
            edges: Vec::new(),
            directed,
        };
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Builds a graph over an explicit vertex set, so isolated vertices are kept.
    pub fn with_vertices<V, E>(vertices: V, edges: E, directed: bool) -> Self
    where
        V: IntoIterator<Item = usize>,
        E: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(std::iter::empty(), directed);
        for v in vertices {
            graph.add_vertex(v);
        }
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    pub fn add_vertex(&mut self, v: usize) {
        self.inner.add_node(v);
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.edges.push((a, b));
        self.inner.add_edge(a, b, ());
        if !self.directed {
            self.inner.add_edge(b, a, ());
        }
    }

    /// Adds a self-loop at every vertex that does not already have one.
    pub fn add_loops(&mut self) {
        for v in self.vertices() {
            if !self.inner.contains_edge(v, v) {
                self.add_edge(v, v);
            }
        }
    }

    /// Sorted vertex labels.
    #[must_use]
    pub fn vertices(&self) -> Vec<usize> {
        let set: BTreeSet<usize> = self.inner.nodes().collect();
        set.into_iter().collect()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    #[must_use]
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.inner.contains_node(v)
    }

    /// Sorted labels reachable from `v` in one directed step. Empty for an
    /// unknown vertex.
    #[must_use]
    pub fn out_vertices(&self, v: usize) -> Vec<usize> {
        if !self.inner.contains_node(v) {
            return Vec::new();
        }
        let set: BTreeSet<usize> = self
            .inner
            .neighbors_directed(v, Direction::Outgoing)
            .collect();
        set.into_iter().collect()
    }

    /// The edge list as supplied, one entry per `add_edge` call.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }
}

/// Undirected complete graph on `0..size`, optionally with self-loops.
#[must_use]
pub fn complete_graph(size: usize, loops: bool) -> Graph {
    let edges = (0..size).flat_map(|i| ((i + 1)..size).map(move |j| (i, j)));
    let mut graph = Graph::with_vertices(0..size, edges, false);
    if loops {
        graph.add_loops();
    }
    graph
}

/// Cycle `0 -> 1 -> ... -> size-1 -> 0`.
#[must_use]
pub fn cycle(size: usize, directed: bool) -> Graph {
    let edges = (0..size).filter_map(move |i| {
        let j = (i + 1) % size;
        (i != j).then_some((i, j))
    });
    Graph::with_vertices(0..size, edges, directed)
}

/// Two complete graphs of `size` vertices each, joined by a single edge
/// between vertex `size - 1` and vertex `size`.
#[must_use]
pub fn attached_complete_graphs(size: usize, loops: bool) -> Graph {
    let mut graph = Graph::with_vertices(0..2 * size, std::iter::empty(), false);
    for offset in [0, size] {
        for i in 0..size {
            for j in (i + 1)..size {
                graph.add_edge(offset + i, offset + j);
            }
        }
    }
    if size > 0 {
        graph.add_edge(size - 1, size);
    }
    if loops {
        graph.add_loops();
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_graph_neighbors() {
        let g = complete_graph(4, false);
        assert_eq!(g.vertices(), vec![0, 1, 2, 3]);
        assert_eq!(g.out_vertices(0), vec![1, 2, 3]);
        assert_eq!(g.out_vertices(2), vec![0, 1, 3]);
        assert!(!g.is_directed());
    }

    #[test]
    fn test_complete_graph_single_vertex_kept() {
        let g = complete_graph(1, false);
        assert_eq!(g.vertices(), vec![0]);
        assert!(g.out_vertices(0).is_empty());
    }

    #[test]
    fn test_add_loops() {
        let mut g = complete_graph(3, false);
        g.add_loops();
        assert_eq!(g.out_vertices(1), vec![0, 1, 2]);
        // Idempotent.
        let before = g.edges().len();
        g.add_loops();
        assert_eq!(g.edges().len(), before);
    }

    #[test]
    fn test_directed_cycle() {
        let g = cycle(4, true);
        assert_eq!(g.out_vertices(3), vec![0]);
        assert_eq!(g.out_vertices(0), vec![1]);
    }

    #[test]
    fn test_undirected_cycle() {
        let g = cycle(4, false);
        assert_eq!(g.out_vertices(0), vec![1, 3]);
    }

    #[test]
    fn test_attached_complete_graphs() {
        let g = attached_complete_graphs(3, false);
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.out_vertices(2), vec![0, 1, 3]);
        assert_eq!(g.out_vertices(3), vec![2, 4, 5]);
        assert_eq!(g.out_vertices(0), vec![1, 2]);
    }

    #[test]
    fn test_unknown_vertex_has_no_neighbors() {
        let g = cycle(3, false);
        assert!(g.out_vertices(42).is_empty());
    }
}
