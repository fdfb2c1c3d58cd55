//! Benchmark support crate for smallworld.
//!
//! Provides parameter types, seeded fixtures and a shared setup error for
//! the Criterion benchmarks covering graph generation, metric evaluation and
//! full probability sweeps.

pub mod error;
pub mod fixtures;
pub mod params;
