//! Presentation seam between the experiment and whatever renders it.
//!
//! The core never depends on a charting backend; implementations live in the
//! reporter crates.

use std::path::Path;

use crate::experiment::RealizationMode;

/// Renders normalized metric series against the sweep probabilities and
/// persists the result at `output_path`.
///
/// All three slices have the same length; index `i` of each series belongs to
/// `sweep[i]`.
///
/// # Examples
/// ```
/// use std::{cell::Cell, convert::Infallible, path::Path};
/// use smallworld_core::Reporter;
///
/// #[derive(Default)]
/// struct CountingReporter(Cell<usize>);
///
/// impl Reporter for CountingReporter {
///     type Error = Infallible;
///
///     fn render(
///         &self,
///         sweep: &[f64],
///         _clustering: &[f64],
///         _path_length: &[f64],
///         _title: &str,
///         _output_path: &Path,
///     ) -> Result<(), Self::Error> {
///         self.0.set(sweep.len());
///         Ok(())
///     }
/// }
///
/// let reporter = CountingReporter::default();
/// reporter
///     .render(&[0.0, 0.1], &[1.0, 0.9], &[1.0, 0.5], "demo", Path::new("demo.png"))
///     .expect("infallible");
/// assert_eq!(reporter.0.get(), 2);
/// ```
pub trait Reporter {
    /// Error raised when the artifact cannot be produced or written.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Renders and writes the artifact.
    ///
    /// # Errors
    /// Implementations return an error when the output cannot be written.
    fn render(
        &self,
        sweep: &[f64],
        clustering: &[f64],
        path_length: &[f64],
        title: &str,
        output_path: &Path,
    ) -> Result<(), Self::Error>;
}

/// Builds the chart title for a run, e.g.
/// `"Multiple Realization: Nodes = 100, Degree = 10"`.
///
/// # Examples
/// ```
/// use smallworld_core::{RealizationMode, chart_title};
///
/// assert_eq!(
///     chart_title(RealizationMode::Single, 20, 4),
///     "Single Realization: Nodes = 20, Degree = 4",
/// );
/// ```
#[must_use]
pub fn chart_title(mode: RealizationMode, nodes: usize, degree: usize) -> String {
    format!("{}: Nodes = {nodes}, Degree = {degree}", mode.title_prefix())
}
