//! Ring-lattice construction and Watts–Strogatz rewiring.
//!
//! Edges are visited in the classic order: for each neighbour offset
//! `j = 1..=k/2`, for each node `u`, the lattice edge `(u, u + j mod n)`.
//! Each visited edge is rewired independently with probability `p` to
//! `(u, w)`, where `w` is drawn uniformly from the nodes that are neither `u`
//! nor already adjacent to `u`.
//!
//! Target selection never loops unboundedly. At most [`MAX_REWIRE_ATTEMPTS`]
//! rejection draws are made; once they are exhausted the remaining valid
//! targets are enumerated and one is chosen uniformly. When `u` already
//! touches every other node there is no valid target and the edge keeps its
//! lattice endpoint. Both paths sample uniformly from the same candidate set,
//! so the fallback changes cost, not the distribution.

use rand::{Rng, seq::SliceRandom};
use tracing::{instrument, trace};

use super::{Graph, GraphError};

/// Rejection draws attempted before falling back to enumerating the valid
/// rewiring targets.
pub const MAX_REWIRE_ATTEMPTS: usize = 32;

/// Validated ring-lattice shape: `nodes` arranged in a cycle, each joined to
/// its `degree` nearest ring neighbours.
///
/// # Examples
/// ```
/// use smallworld_core::LatticeParams;
///
/// let params = LatticeParams::new(20, 4).expect("parameters must be valid");
/// let lattice = params.ring_lattice();
/// assert_eq!(lattice.edge_count(), params.edge_count());
/// assert!(lattice.has_edge(0, 19));
/// assert!(lattice.has_edge(0, 2));
/// assert!(!lattice.has_edge(0, 3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatticeParams {
    nodes: usize,
    degree: usize,
}

impl LatticeParams {
    /// Validates the lattice shape.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when `degree` is zero or odd,
    /// or when `degree >= nodes` (a node cannot have `degree` distinct ring
    /// neighbours).
    pub fn new(nodes: usize, degree: usize) -> Result<Self, GraphError> {
        if degree == 0 {
            return Err(GraphError::invalid("degree must be greater than zero"));
        }
        if !degree.is_multiple_of(2) {
            return Err(GraphError::invalid(format!(
                "degree ({degree}) must be even"
            )));
        }
        if degree >= nodes {
            return Err(GraphError::invalid(format!(
                "degree ({degree}) must be smaller than the node count ({nodes})"
            )));
        }
        Ok(Self { nodes, degree })
    }

    /// Returns the node count.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Returns the lattice degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the edge count shared by the lattice and every rewiring of it.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes * self.degree / 2
    }

    /// Builds the unrewired ring lattice.
    #[must_use]
    pub fn ring_lattice(&self) -> Graph {
        let mut graph = Graph::empty(self.nodes);
        for offset in 1..=self.degree / 2 {
            for u in 0..self.nodes {
                graph.insert_edge(u, (u + offset) % self.nodes);
            }
        }
        graph
    }

    /// Builds a ring lattice and rewires each edge with `probability`.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when `probability` is not a
    /// finite value in `[0, 1)`.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use smallworld_core::LatticeParams;
    ///
    /// let params = LatticeParams::new(30, 6).expect("parameters must be valid");
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let graph = params.generate(0.2, &mut rng).expect("probability must be valid");
    /// assert_eq!(graph.edge_count(), 90);
    /// ```
    #[instrument(
        name = "graph.generate",
        level = "debug",
        err,
        skip(self, rng),
        fields(nodes = self.nodes, degree = self.degree),
    )]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        probability: f64,
        rng: &mut R,
    ) -> Result<Graph, GraphError> {
        validate_probability(probability)?;

        let mut graph = self.ring_lattice();
        let mut rewired = 0_usize;
        for offset in 1..=self.degree / 2 {
            for u in 0..self.nodes {
                if !rng.gen_bool(probability) {
                    continue;
                }
                let v = (u + offset) % self.nodes;
                match draw_target(&graph, u, rng) {
                    TargetDraw::Sampled(w) => {
                        rewire(&mut graph, u, v, w);
                        rewired += 1;
                    }
                    TargetDraw::Enumerated(w) => {
                        trace!(node = u, "rejection sampling exhausted, enumerated targets");
                        record_counter("rewire_fallbacks");
                        rewire(&mut graph, u, v, w);
                        rewired += 1;
                    }
                    TargetDraw::Exhausted => {
                        trace!(node = u, "node is adjacent to every other node, edge kept");
                        record_counter("rewire_skipped");
                    }
                }
            }
        }

        record_counter("graphs_generated");
        trace!(rewired, "graph generated");
        Ok(graph)
    }
}

/// Builds a Watts–Strogatz graph over `nodes` with lattice `degree` and
/// rewiring `probability`.
///
/// # Errors
/// Returns [`GraphError::InvalidParameters`] under the same conditions as
/// [`LatticeParams::new`] and [`LatticeParams::generate`].
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use smallworld_core::{GraphErrorCode, generate};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let graph = generate(10, 4, 0.0, &mut rng).expect("parameters must be valid");
/// assert_eq!(graph.edge_count(), 20);
///
/// let err = generate(4, 4, 0.0, &mut rng).expect_err("degree must be below node count");
/// assert_eq!(err.code(), GraphErrorCode::InvalidParameters);
/// ```
pub fn generate<R: Rng + ?Sized>(
    nodes: usize,
    degree: usize,
    probability: f64,
    rng: &mut R,
) -> Result<Graph, GraphError> {
    LatticeParams::new(nodes, degree)?.generate(probability, rng)
}

pub(crate) fn validate_probability(probability: f64) -> Result<(), GraphError> {
    if probability.is_finite() && (0.0..1.0).contains(&probability) {
        Ok(())
    } else {
        Err(GraphError::invalid(format!(
            "rewiring probability ({probability}) must lie in [0, 1)"
        )))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum TargetDraw {
    Sampled(usize),
    Enumerated(usize),
    Exhausted,
}

fn draw_target<R: Rng + ?Sized>(graph: &Graph, source: usize, rng: &mut R) -> TargetDraw {
    draw_target_within(graph, source, rng, MAX_REWIRE_ATTEMPTS)
}

fn draw_target_within<R: Rng + ?Sized>(
    graph: &Graph,
    source: usize,
    rng: &mut R,
    attempts: usize,
) -> TargetDraw {
    let nodes = graph.node_count();
    if graph.degree(source) + 1 >= nodes {
        return TargetDraw::Exhausted;
    }

    for _ in 0..attempts {
        let candidate = rng.gen_range(0..nodes);
        if candidate != source && !graph.has_edge(source, candidate) {
            return TargetDraw::Sampled(candidate);
        }
    }

    let candidates: Vec<usize> = (0..nodes)
        .filter(|&candidate| candidate != source && !graph.has_edge(source, candidate))
        .collect();
    candidates
        .choose(rng)
        .map_or(TargetDraw::Exhausted, |&target| TargetDraw::Enumerated(target))
}

fn rewire(graph: &mut Graph, source: usize, old: usize, new: usize) {
    // The lattice edge is visited exactly once, so it is still present here.
    if graph.remove_edge(source, old) {
        graph.insert_edge(source, new);
    }
}

#[cfg(feature = "metrics")]
fn record_counter(name: &'static str) {
    metrics::counter!(name).increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_counter(_name: &'static str) {}
