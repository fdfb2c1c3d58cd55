//! Benchmark parameter types.

use std::fmt;

/// Lattice shape used to label a benchmark case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatticeBenchParams {
    /// Number of nodes in the ring.
    pub nodes: usize,
    /// Lattice degree.
    pub degree: usize,
}

impl fmt::Display for LatticeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.nodes, self.degree)
    }
}

/// Lattice shape plus the rewiring probability applied to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewireBenchParams {
    /// Lattice being rewired.
    pub lattice: LatticeBenchParams,
    /// Probability passed to the generator.
    pub probability: f64,
}

impl fmt::Display for RewireBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},p={}", self.lattice, self.probability)
    }
}
