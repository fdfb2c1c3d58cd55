//! Builder utilities for configuring [`Experiment`] runs.
//!
//! Exposes the execution strategy selection surface and the validation
//! applied before an [`Experiment`] is constructed.

use std::num::NonZeroUsize;

use crate::{Result, error::ExperimentError, graph::LatticeParams};

use super::runner::Experiment;

/// Node count of the reference experiment.
pub const DEFAULT_NODES: usize = 100;
/// Lattice degree of the reference experiment.
pub const DEFAULT_DEGREE: usize = 10;
/// Realizations per sweep value in multi-realization mode.
pub const DEFAULT_TRIALS: usize = 15;
/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Indicates how an [`Experiment`] schedules its realizations.
///
/// Both strategies produce bit-for-bit identical series for the same seed:
/// each realization has its own RNG and trial means are summed in trial
/// order. `Parallel` falls back to sequential execution when the crate is
/// built without the `parallel` feature.
///
/// # Examples
/// ```
/// use smallworld_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Parallel);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Generate and measure one realization at a time on the calling thread.
    Sequential,
    /// Spread sweep values and trials across the rayon worker pool.
    #[default]
    Parallel,
}

/// Configures and constructs [`Experiment`] instances.
///
/// # Examples
/// ```
/// use smallworld_core::{ExecutionStrategy, ExperimentBuilder};
///
/// let experiment = ExperimentBuilder::new()
///     .with_nodes(20)
///     .with_degree(4)
///     .with_trials(3)
///     .with_seed(7)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(experiment.lattice().nodes(), 20);
/// assert_eq!(experiment.trials().get(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ExperimentBuilder {
    nodes: usize,
    degree: usize,
    trials: usize,
    seed: u64,
    execution_strategy: ExecutionStrategy,
}

impl Default for ExperimentBuilder {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES,
            degree: DEFAULT_DEGREE,
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            execution_strategy: ExecutionStrategy::default(),
        }
    }
}

impl ExperimentBuilder {
    /// Creates a builder populated with the reference parameters.
    ///
    /// # Examples
    /// ```
    /// use smallworld_core::ExperimentBuilder;
    ///
    /// let builder = ExperimentBuilder::new();
    /// assert_eq!(builder.nodes(), 100);
    /// assert_eq!(builder.degree(), 10);
    /// assert_eq!(builder.trials(), 15);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the node count.
    #[must_use]
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Overrides the lattice degree.
    #[must_use]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Returns the configured lattice degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Overrides the number of realizations per sweep value used by
    /// [`Experiment::run_multi`].
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured trial count.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Seeds every realization of the experiment.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sets the execution strategy.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs an [`Experiment`].
    ///
    /// # Errors
    /// Returns [`ExperimentError::InvalidParameters`] when the lattice shape is
    /// invalid (zero or odd degree, or `degree >= nodes`) or when `trials` is
    /// zero.
    ///
    /// # Examples
    /// ```
    /// use smallworld_core::{ExperimentBuilder, ExperimentErrorCode};
    ///
    /// let err = ExperimentBuilder::new()
    ///     .with_nodes(10)
    ///     .with_degree(10)
    ///     .build()
    ///     .expect_err("degree must be below node count");
    /// assert_eq!(err.code(), ExperimentErrorCode::InvalidParameters);
    /// ```
    pub fn build(self) -> Result<Experiment> {
        let lattice = LatticeParams::new(self.nodes, self.degree)
            .map_err(ExperimentError::from_graph_parameters)?;
        let trials =
            NonZeroUsize::new(self.trials).ok_or_else(|| ExperimentError::InvalidParameters {
                reason: format!("trials must be at least 1 (got {})", self.trials),
            })?;

        Ok(Experiment::new(
            lattice,
            trials,
            self.seed,
            self.execution_strategy,
        ))
    }
}
