//! Sweep execution: generate, measure, reduce, normalize.

use std::{num::NonZeroUsize, path::Path};

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, info, instrument};

use crate::{
    Result,
    error::ExperimentError,
    graph::{GraphMetrics, LatticeParams},
    report::{Reporter, chart_title},
};

use super::{
    builder::ExecutionStrategy,
    mode::RealizationMode,
    seed::realization_seed,
    series::{MetricSeries, aggregate_trials},
    sweep::ProbabilitySweep,
};

/// Entry point for running small-world sweeps.
///
/// # Examples
/// ```
/// use smallworld_core::{ExperimentBuilder, ProbabilitySweep};
///
/// let experiment = ExperimentBuilder::new()
///     .with_nodes(20)
///     .with_degree(4)
///     .build()
///     .expect("builder must succeed");
/// let sweep = ProbabilitySweep::new(vec![0.0, 0.1, 0.5]).expect("sweep must be valid");
/// let series = experiment.run_single(&sweep).expect("run must succeed");
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.clustering()[0], 1.0);
/// assert_eq!(series.path_length()[0], 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Experiment {
    lattice: LatticeParams,
    trials: NonZeroUsize,
    seed: u64,
    execution_strategy: ExecutionStrategy,
}

impl Experiment {
    pub(crate) fn new(
        lattice: LatticeParams,
        trials: NonZeroUsize,
        seed: u64,
        execution_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            lattice,
            trials,
            seed,
            execution_strategy,
        }
    }

    /// Returns the lattice shape shared by every realization.
    #[must_use]
    pub fn lattice(&self) -> LatticeParams {
        self.lattice
    }

    /// Returns the number of realizations per sweep value in multi mode.
    #[must_use]
    pub fn trials(&self) -> NonZeroUsize {
        self.trials
    }

    /// Returns the experiment seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the multi-realization mode for the configured trial count.
    #[must_use]
    pub fn multi_mode(&self) -> RealizationMode {
        RealizationMode::Multi {
            trials: self.trials,
        }
    }

    /// Generates one graph per sweep value and normalizes its metrics against
    /// the graph generated at the first sweep value.
    ///
    /// # Errors
    /// Returns [`ExperimentError::Realization`] when a graph cannot be
    /// generated or measured (for example when rewiring disconnects it), and
    /// [`ExperimentError::DegenerateBaseline`] when the baseline clustering
    /// coefficient is zero.
    pub fn run_single(&self, sweep: &ProbabilitySweep) -> Result<MetricSeries> {
        self.run(RealizationMode::Single, sweep)
    }

    /// Generates [`Experiment::trials`] graphs per sweep value, averages
    /// their metrics and normalizes the means against the first sweep value.
    ///
    /// # Errors
    /// Same as [`Experiment::run_single`]; realization errors carry the trial
    /// index.
    pub fn run_multi(&self, sweep: &ProbabilitySweep) -> Result<MetricSeries> {
        self.run(self.multi_mode(), sweep)
    }

    /// Runs the sweep in `mode`.
    ///
    /// # Errors
    /// See [`Experiment::run_single`].
    #[instrument(
        name = "experiment.run",
        err,
        skip(self, sweep),
        fields(
            mode = %mode,
            trials = mode.trials().get(),
            nodes = self.lattice.nodes(),
            degree = self.lattice.degree(),
            points = sweep.len(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run(&self, mode: RealizationMode, sweep: &ProbabilitySweep) -> Result<MetricSeries> {
        let means = match self.execution_strategy {
            ExecutionStrategy::Sequential => self.measure_sequential(mode, sweep)?,
            ExecutionStrategy::Parallel => self.measure_parallel(mode, sweep)?,
        };
        let series = MetricSeries::normalize(mode, sweep, &means)?;
        let baseline = series.baseline();
        info!(
            clustering = baseline.clustering,
            path_length = baseline.path_length,
            "sweep completed"
        );
        Ok(series)
    }

    /// Runs the sweep and hands the finished series to `reporter`, titled
    /// with the mode and lattice shape. Nothing is rendered when the sweep
    /// fails.
    ///
    /// # Errors
    /// Propagates [`Experiment::run`] failures and wraps reporter failures in
    /// [`ExperimentError::Report`].
    pub fn report<R: Reporter>(
        &self,
        mode: RealizationMode,
        sweep: &ProbabilitySweep,
        reporter: &R,
        output_path: &Path,
    ) -> Result<MetricSeries> {
        let series = self.run(mode, sweep)?;
        let title = chart_title(mode, self.lattice.nodes(), self.lattice.degree());
        reporter
            .render(
                series.probabilities(),
                series.clustering(),
                series.path_length(),
                &title,
                output_path,
            )
            .map_err(|error| ExperimentError::Report {
                message: error.to_string(),
            })?;
        info!(path = %output_path.display(), "report written");
        Ok(series)
    }

    fn measure_sequential(
        &self,
        mode: RealizationMode,
        sweep: &ProbabilitySweep,
    ) -> Result<Vec<GraphMetrics>> {
        sweep
            .values()
            .iter()
            .enumerate()
            .map(|(index, &probability)| {
                let samples = (0..mode.trials().get())
                    .map(|trial| self.realize(mode, index, probability, trial))
                    .collect::<Result<Vec<_>>>()?;
                reduce(index, probability, &samples)
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn measure_parallel(
        &self,
        mode: RealizationMode,
        sweep: &ProbabilitySweep,
    ) -> Result<Vec<GraphMetrics>> {
        use rayon::prelude::*;

        // Indexed collects keep sweep and trial order, so the reduction below
        // sums exactly as the sequential path does.
        sweep
            .values()
            .par_iter()
            .enumerate()
            .map(|(index, &probability)| {
                let samples = (0..mode.trials().get())
                    .into_par_iter()
                    .map(|trial| self.realize(mode, index, probability, trial))
                    .collect::<Result<Vec<_>>>()?;
                reduce(index, probability, &samples)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn measure_parallel(
        &self,
        mode: RealizationMode,
        sweep: &ProbabilitySweep,
    ) -> Result<Vec<GraphMetrics>> {
        tracing::warn!("built without the `parallel` feature; running sequentially");
        self.measure_sequential(mode, sweep)
    }

    fn realize(
        &self,
        mode: RealizationMode,
        index: usize,
        probability: f64,
        trial: usize,
    ) -> Result<GraphMetrics> {
        let mut rng = SmallRng::seed_from_u64(realization_seed(self.seed, index, trial));
        self.lattice
            .generate(probability, &mut rng)
            .and_then(|graph| GraphMetrics::evaluate(&graph))
            .map_err(|source| ExperimentError::Realization {
                mode,
                probability,
                trial: mode.trial_label(trial),
                source,
            })
    }
}

fn reduce(index: usize, probability: f64, samples: &[GraphMetrics]) -> Result<GraphMetrics> {
    let mean = aggregate_trials(samples).ok_or_else(|| ExperimentError::InvalidParameters {
        reason: format!("no realizations measured at p = {probability}"),
    })?;
    debug!(
        index,
        probability,
        clustering = mean.clustering,
        path_length = mean.path_length,
        "sweep value measured"
    );
    Ok(mean)
}
