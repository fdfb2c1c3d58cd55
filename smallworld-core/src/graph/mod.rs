//! Undirected simple graphs, the Watts–Strogatz generator and the structural
//! metrics computed over them.

mod error;
mod lattice;
mod metrics;


use std::collections::BTreeSet;

pub use self::{
    error::{GraphError, GraphErrorCode},
    lattice::{LatticeParams, MAX_REWIRE_ATTEMPTS, generate},
    metrics::{GraphMetrics, average_clustering, average_path_length},
};

/// Undirected simple graph over the nodes `0..node_count`.
///
/// Adjacency is kept in ordered sets so that iteration, and therefore every
/// seeded rewiring decision, is deterministic.
///
/// # Examples
/// ```
/// use smallworld_core::Graph;
///
/// let graph = Graph::from_edges(3, [(0, 1), (1, 2)]).expect("edges are valid");
/// assert_eq!(graph.edge_count(), 2);
/// assert!(graph.has_edge(2, 1));
/// assert_eq!(graph.degree(1), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `node_count` isolated nodes.
    #[must_use]
    pub fn empty(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from an edge list. Repeated pairs collapse into a single
    /// edge.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when an edge is a self-loop or
    /// references a node outside `0..node_count`.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::empty(node_count);
        for (u, v) in edges {
            if u >= node_count || v >= node_count {
                return Err(GraphError::invalid(format!(
                    "edge ({u}, {v}) references a node outside 0..{node_count}"
                )));
            }
            if u == v {
                return Err(GraphError::invalid(format!("self-loop on node {u}")));
            }
            graph.insert_edge(u, v);
        }
        Ok(graph)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the degree of `node`, or zero when the node does not exist.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(node).map_or(0, BTreeSet::len)
    }

    /// Iterates the neighbours of `node` in ascending order.
    pub fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(node).into_iter().flatten().copied()
    }

    /// Returns `true` when `u` and `v` are adjacent.
    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency
            .get(u)
            .is_some_and(|neighbours| neighbours.contains(&v))
    }

    /// Iterates every edge once as `(u, v)` with `u < v`, ordered by `u` then
    /// `v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbours)| neighbours.range(u + 1..).map(move |&v| (u, v)))
    }

    pub(crate) fn adjacency(&self, node: usize) -> Option<&BTreeSet<usize>> {
        self.adjacency.get(node)
    }

    /// Inserts `(u, v)`; returns `false` when the edge already existed.
    /// Callers guarantee `u != v` and both endpoints are in range.
    pub(crate) fn insert_edge(&mut self, u: usize, v: usize) -> bool {
        debug_assert!(u != v, "self-loops are not allowed");
        let inserted = self.adjacency[u].insert(v);
        if inserted {
            self.adjacency[v].insert(u);
            self.edge_count += 1;
        }
        inserted
    }

    /// Removes `(u, v)`; returns `false` when the edge was absent.
    pub(crate) fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        let removed = self
            .adjacency
            .get_mut(u)
            .is_some_and(|neighbours| neighbours.remove(&v));
        if removed {
            self.adjacency[v].remove(&u);
            self.edge_count -= 1;
        }
        removed
    }
}
