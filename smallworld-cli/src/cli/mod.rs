//! Command-line interface orchestration for the small-world experiment.
//!
//! Invoked without arguments the binary reproduces the reference run: a
//! multi-realization sweep over 200 probabilities in `[0, 0.1)` on a
//! 100-node, degree-10 lattice, charted to `multi_realization.png`.

mod commands;

pub use commands::{Cli, CliError, ExecutionSummary, ModeArg, render_summary, run_cli};
