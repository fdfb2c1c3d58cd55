//! Per-sweep aggregation and normalization of measured metrics.

use crate::{error::ExperimentError, graph::GraphMetrics};

use super::{mode::RealizationMode, sweep::ProbabilitySweep};

/// Arithmetic mean of the measurements of one sweep value's realizations.
///
/// Values are summed in slice order (ascending trial index), so the result is
/// bit-for-bit reproducible however the realizations were scheduled. Returns
/// `None` for an empty slice.
///
/// # Examples
/// ```
/// use smallworld_core::{GraphMetrics, aggregate_trials};
///
/// let mean = aggregate_trials(&[
///     GraphMetrics { clustering: 0.5, path_length: 4.0 },
///     GraphMetrics { clustering: 0.25, path_length: 2.0 },
/// ])
/// .expect("slice is non-empty");
/// assert_eq!(mean, GraphMetrics { clustering: 0.375, path_length: 3.0 });
/// ```
#[must_use]
pub fn aggregate_trials(samples: &[GraphMetrics]) -> Option<GraphMetrics> {
    if samples.is_empty() {
        return None;
    }
    let (clustering, path_length) = samples.iter().fold((0.0, 0.0), |(c, l), sample| {
        (c + sample.clustering, l + sample.path_length)
    });
    let count = samples.len() as f64;
    Some(GraphMetrics {
        clustering: clustering / count,
        path_length: path_length / count,
    })
}

/// Normalized clustering and path-length series aligned with a sweep.
///
/// Index `i` of each series corresponds to `probabilities()[i]`; index 0 is
/// the baseline and therefore exactly `1.0` in both series.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricSeries {
    mode: RealizationMode,
    probabilities: Vec<f64>,
    clustering: Vec<f64>,
    path_length: Vec<f64>,
    baseline: GraphMetrics,
}

impl MetricSeries {
    /// Normalizes per-sweep-value means against the first entry.
    pub(crate) fn normalize(
        mode: RealizationMode,
        sweep: &ProbabilitySweep,
        means: &[GraphMetrics],
    ) -> Result<Self, ExperimentError> {
        let Some(&baseline) = means.first() else {
            return Err(ExperimentError::InvalidParameters {
                reason: "no measurements to normalize".into(),
            });
        };
        if means.len() != sweep.len() {
            return Err(ExperimentError::InvalidParameters {
                reason: format!(
                    "{} measurements for a sweep of {} values",
                    means.len(),
                    sweep.len()
                ),
            });
        }
        check_baseline("clustering coefficient", baseline.clustering)?;
        check_baseline("path length", baseline.path_length)?;

        Ok(Self {
            mode,
            probabilities: sweep.values().to_vec(),
            clustering: means
                .iter()
                .map(|m| m.clustering / baseline.clustering)
                .collect(),
            path_length: means
                .iter()
                .map(|m| m.path_length / baseline.path_length)
                .collect(),
            baseline,
        })
    }

    /// Returns the mode the series was produced in.
    #[must_use]
    pub fn mode(&self) -> RealizationMode {
        self.mode
    }

    /// Returns the sweep probabilities (the x values).
    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Returns `C(p) / C(0)` for every sweep value.
    #[must_use]
    pub fn clustering(&self) -> &[f64] {
        &self.clustering
    }

    /// Returns `L(p) / L(0)` for every sweep value.
    #[must_use]
    pub fn path_length(&self) -> &[f64] {
        &self.path_length
    }

    /// Returns the unnormalized baseline measurements.
    #[must_use]
    pub fn baseline(&self) -> GraphMetrics {
        self.baseline
    }

    /// Returns the number of sweep values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Returns `true` when the series holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Iterates `(p, C(p)/C(0), L(p)/L(0))` triples in sweep order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.probabilities
            .iter()
            .zip(&self.clustering)
            .zip(&self.path_length)
            .map(|((&p, &c), &l)| (p, c, l))
    }
}

fn check_baseline(metric: &'static str, value: f64) -> Result<(), ExperimentError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ExperimentError::DegenerateBaseline { metric, value })
    }
}
