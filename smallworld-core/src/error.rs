//! Error types for the experiment runner.
//!
//! Defines the error enum exposed by the public API and a convenient result
//! alias. Graph-level failures are carried inside
//! [`ExperimentError::Realization`] together with the sweep point that
//! produced them.

use thiserror::Error;

use crate::{
    experiment::RealizationMode,
    graph::{GraphError, GraphErrorCode},
};

/// Error type produced when configuring or running an [`crate::Experiment`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ExperimentError {
    /// Lattice, trial or sweep parameters were rejected before any graph was
    /// generated.
    #[error("invalid experiment parameter: {reason}")]
    InvalidParameters {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },
    /// Generating or measuring one realization failed.
    #[error("{mode} realization at p = {probability}{} failed: {source}", trial_suffix(.trial))]
    Realization {
        /// Mode the experiment was running in.
        mode: RealizationMode,
        /// Rewiring probability of the offending sweep point.
        probability: f64,
        /// Zero-based trial index; `None` in single-realization mode.
        trial: Option<usize>,
        /// Underlying generator or evaluator failure.
        #[source]
        source: GraphError,
    },
    /// A baseline metric was zero or non-finite, so ratios against it are
    /// undefined.
    #[error("baseline {metric} is {value}; cannot normalize against it")]
    DegenerateBaseline {
        /// Name of the metric whose baseline is unusable.
        metric: &'static str,
        /// The offending baseline value.
        value: f64,
    },
    /// A [`crate::Reporter`] failed to persist the finished series.
    #[error("failed to render report: {message}")]
    Report {
        /// Rendered message from the reporter's error.
        message: String,
    },
}

fn trial_suffix(trial: &Option<usize>) -> String {
    trial.map_or_else(String::new, |index| format!(" (trial {index})"))
}

define_error_codes! {
    /// Stable codes describing [`ExperimentError`] variants.
    enum ExperimentErrorCode for ExperimentError {
        /// Lattice, trial or sweep parameters were rejected.
        InvalidParameters => InvalidParameters { .. } => "EXPERIMENT_INVALID_PARAMETERS",
        /// Generating or measuring one realization failed.
        RealizationFailed => Realization { .. } => "EXPERIMENT_REALIZATION_FAILED",
        /// A baseline metric was zero or non-finite.
        DegenerateBaseline => DegenerateBaseline { .. } => "EXPERIMENT_DEGENERATE_BASELINE",
        /// A reporter failed to persist the finished series.
        ReportFailed => Report { .. } => "EXPERIMENT_REPORT_FAILED",
    }
}

impl ExperimentError {
    /// Retrieve the inner [`GraphErrorCode`] when the error originated in the
    /// generator or the evaluator.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Realization { source, .. } => Some(source.code()),
            _ => None,
        }
    }

    pub(crate) fn from_graph_parameters(error: GraphError) -> Self {
        match error {
            GraphError::InvalidParameters { reason } => Self::InvalidParameters { reason },
            other => Self::InvalidParameters {
                reason: other.to_string(),
            },
        }
    }
}

/// Convenient alias for results returned by the experiment API.
pub type Result<T> = core::result::Result<T, ExperimentError>;
