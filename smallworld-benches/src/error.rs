//! Benchmark setup error type.
//!
//! Lets fixture builders propagate core failures with `?` so benchmark
//! bodies only panic at the outermost layer.

use smallworld_core::{ExperimentError, GraphError};

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Lattice parameters or graph metrics were rejected.
    #[error("graph setup failed: {0}")]
    Graph(#[from] GraphError),
    /// Experiment configuration or sweep construction failed.
    #[error("experiment setup failed: {0}")]
    Experiment(#[from] ExperimentError),
}
