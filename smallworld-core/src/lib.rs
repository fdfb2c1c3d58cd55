//! Small-world core library.
//!
//! Builds Watts–Strogatz ring lattices, measures their clustering coefficient
//! and mean geodesic distance, and sweeps the rewiring probability to produce
//! series normalized against the unrewired lattice.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled the generator emits:
//!
//! - `graphs_generated` (counter)
//! - `rewire_fallbacks` (counter)
//! - `rewire_skipped` (counter)
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

mod error;
mod experiment;
mod graph;
mod report;

pub use crate::{
    error::{ExperimentError, ExperimentErrorCode, Result},
    experiment::{
        DEFAULT_DEGREE, DEFAULT_NODES, DEFAULT_SEED, DEFAULT_TRIALS, ExecutionStrategy, Experiment,
        ExperimentBuilder, MAX_SWEEP_POINTS, MetricSeries, ProbabilitySweep, RealizationMode,
        aggregate_trials,
    },
    graph::{
        Graph, GraphError, GraphErrorCode, GraphMetrics, LatticeParams, MAX_REWIRE_ATTEMPTS,
        average_clustering, average_path_length, generate,
    },
    report::{Reporter, chart_title},
};
