//! Probability sweeps over Watts–Strogatz realizations.
//!
//! An [`Experiment`] generates one or more graphs per sweep value, measures
//! each independently and reduces the measurements to per-value means before
//! normalizing them against the first (`p = 0`) sweep value.

mod builder;
mod mode;
mod runner;
mod seed;
mod series;
mod sweep;

pub use self::{
    builder::{
        DEFAULT_DEGREE, DEFAULT_NODES, DEFAULT_SEED, DEFAULT_TRIALS, ExecutionStrategy,
        ExperimentBuilder,
    },
    mode::RealizationMode,
    runner::Experiment,
    series::{MetricSeries, aggregate_trials},
    sweep::{MAX_SWEEP_POINTS, ProbabilitySweep},
};
