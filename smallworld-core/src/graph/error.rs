//! Error types produced by the lattice generator and the metric evaluator.

use thiserror::Error;

/// Errors produced while building or measuring a [`crate::Graph`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    /// Node count, degree, probability or edge list was invalid.
    #[error("invalid graph parameter: {reason}")]
    InvalidParameters {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },
    /// Mean path length is undefined because a pair of nodes is unreachable.
    #[error("graph is disconnected: node {to} is unreachable from node {from}")]
    DisconnectedGraph {
        /// Node the breadth-first search started from.
        from: usize,
        /// First node the search could not reach.
        to: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Node count, degree, probability or edge list was invalid.
        InvalidParameters => InvalidParameters { .. } => "GRAPH_INVALID_PARAMETERS",
        /// Mean path length is undefined because a pair of nodes is unreachable.
        DisconnectedGraph => DisconnectedGraph { .. } => "GRAPH_DISCONNECTED",
    }
}

impl GraphError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            reason: reason.into(),
        }
    }
}
