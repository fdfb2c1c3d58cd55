//! Scatter-plot reporter rendering normalized small-world series to a PNG.

mod errors;
mod reporter;

pub use errors::PlotError;
pub use reporter::{DEFAULT_SIZE, ScatterPlotReporter};

#[cfg(test)]
mod tests;
