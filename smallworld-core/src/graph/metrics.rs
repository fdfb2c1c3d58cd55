//! Structural metrics: average clustering coefficient and mean geodesic
//! distance.
//!
//! Both functions are exact and read-only.

use std::collections::VecDeque;

use super::{Graph, GraphError};

/// Clustering coefficient and mean path length of one realization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphMetrics {
    /// Average clustering coefficient.
    pub clustering: f64,
    /// Mean shortest-path length over all node pairs.
    pub path_length: f64,
}

impl GraphMetrics {
    /// Measures both metrics for `graph`.
    ///
    /// # Errors
    /// Returns [`GraphError::DisconnectedGraph`] when the graph has more than
    /// one connected component.
    pub fn evaluate(graph: &Graph) -> Result<Self, GraphError> {
        Ok(Self {
            clustering: average_clustering(graph),
            path_length: average_path_length(graph)?,
        })
    }
}

/// Returns the mean over all nodes of the fraction of neighbour pairs that
/// are themselves adjacent. Nodes with fewer than two neighbours contribute
/// zero; an empty graph yields zero.
///
/// # Examples
/// ```
/// use smallworld_core::{Graph, average_clustering};
///
/// let triangle = Graph::from_edges(3, [(0, 1), (1, 2), (0, 2)]).expect("edges are valid");
/// assert_eq!(average_clustering(&triangle), 1.0);
///
/// let path = Graph::from_edges(3, [(0, 1), (1, 2)]).expect("edges are valid");
/// assert_eq!(average_clustering(&path), 0.0);
/// ```
#[must_use]
pub fn average_clustering(graph: &Graph) -> f64 {
    let nodes = graph.node_count();
    if nodes == 0 {
        return 0.0;
    }
    let total: f64 = (0..nodes).map(|node| local_clustering(graph, node)).sum();
    total / nodes as f64
}

fn local_clustering(graph: &Graph, node: usize) -> f64 {
    let Some(neighbours) = graph.adjacency(node) else {
        return 0.0;
    };
    let degree = neighbours.len();
    if degree < 2 {
        return 0.0;
    }

    let mut links = 0_usize;
    for &a in neighbours {
        for &b in neighbours.range(a + 1..) {
            if graph.has_edge(a, b) {
                links += 1;
            }
        }
    }
    let possible = degree * (degree - 1) / 2;
    links as f64 / possible as f64
}

/// Returns the mean shortest-path length (in edges) over all unordered node
/// pairs, computed with one breadth-first search per node. Graphs with fewer
/// than two nodes yield zero.
///
/// # Errors
/// Returns [`GraphError::DisconnectedGraph`] naming the first unreachable
/// pair when the graph is not connected.
///
/// # Examples
/// ```
/// use smallworld_core::{Graph, GraphError, average_path_length};
///
/// let path = Graph::from_edges(3, [(0, 1), (1, 2)]).expect("edges are valid");
/// let mean = average_path_length(&path).expect("path graph is connected");
/// assert!((mean - 4.0 / 3.0).abs() < 1e-12);
///
/// let split = Graph::from_edges(4, [(0, 1), (2, 3)]).expect("edges are valid");
/// assert_eq!(
///     average_path_length(&split),
///     Err(GraphError::DisconnectedGraph { from: 0, to: 2 }),
/// );
/// ```
pub fn average_path_length(graph: &Graph) -> Result<f64, GraphError> {
    let nodes = graph.node_count();
    if nodes < 2 {
        return Ok(0.0);
    }

    let mut distances = vec![None; nodes];
    let mut queue = VecDeque::with_capacity(nodes);
    let mut total = 0_u64;
    for source in 0..nodes {
        total += distance_sum_from(graph, source, &mut distances, &mut queue)?;
    }

    let ordered_pairs = nodes * (nodes - 1);
    Ok(total as f64 / ordered_pairs as f64)
}

fn distance_sum_from(
    graph: &Graph,
    source: usize,
    distances: &mut [Option<u64>],
    queue: &mut VecDeque<usize>,
) -> Result<u64, GraphError> {
    distances.fill(None);
    queue.clear();
    distances[source] = Some(0);
    queue.push_back(source);

    let mut sum = 0_u64;
    while let Some(node) = queue.pop_front() {
        let next = distances[node].map_or(0, |d| d + 1);
        for neighbour in graph.neighbours(node) {
            if distances[neighbour].is_none() {
                distances[neighbour] = Some(next);
                sum += next;
                queue.push_back(neighbour);
            }
        }
    }

    match distances.iter().position(Option::is_none) {
        Some(to) => Err(GraphError::DisconnectedGraph { from: source, to }),
        None => Ok(sum),
    }
}
