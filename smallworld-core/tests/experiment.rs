//! Tests for the `Experiment` sweep API.

mod common;

use std::path::Path;

use common::{FailingReporter, RecordingReporter};
use rstest::{fixture, rstest};
use smallworld_core::{
    ExecutionStrategy, Experiment, ExperimentBuilder, ExperimentError, ExperimentErrorCode,
    GraphErrorCode, ProbabilitySweep, RealizationMode,
};
use smallworld_test_support::tracing::RecordingLayer;
use tracing_subscriber::layer::SubscriberExt;

#[fixture]
fn small_sweep() -> ProbabilitySweep {
    ProbabilitySweep::new(vec![0.0, 0.1, 0.5]).expect("sweep must be valid")
}

fn experiment(nodes: usize, degree: usize, strategy: ExecutionStrategy) -> Experiment {
    ExperimentBuilder::new()
        .with_nodes(nodes)
        .with_degree(degree)
        .with_trials(4)
        .with_seed(1234)
        .with_execution_strategy(strategy)
        .build()
        .expect("configuration must be valid")
}

#[rstest]
fn builder_defaults_match_reference_run() {
    let builder = ExperimentBuilder::new();
    assert_eq!(builder.nodes(), 100);
    assert_eq!(builder.degree(), 10);
    assert_eq!(builder.trials(), 15);
    assert_eq!(builder.execution_strategy(), ExecutionStrategy::Parallel);

    let experiment = builder.build().expect("defaults valid");
    assert_eq!(experiment.trials().get(), 15);
    assert_eq!(
        experiment.multi_mode(),
        RealizationMode::multi(15).expect("fifteen trials are valid")
    );
}

#[rstest]
#[case::zero_trials(20, 4, 0)]
#[case::odd_degree(20, 3, 4)]
#[case::degree_equals_nodes(10, 10, 4)]
fn builder_rejects_invalid_configuration(
    #[case] nodes: usize,
    #[case] degree: usize,
    #[case] trials: usize,
) {
    let err = ExperimentBuilder::new()
        .with_nodes(nodes)
        .with_degree(degree)
        .with_trials(trials)
        .build()
        .expect_err("configuration must be rejected");
    assert_eq!(err.code(), ExperimentErrorCode::InvalidParameters);
}

#[rstest]
#[case::sequential(ExecutionStrategy::Sequential)]
#[case::parallel(ExecutionStrategy::Parallel)]
fn single_run_returns_normalized_triples(
    #[case] strategy: ExecutionStrategy,
    small_sweep: ProbabilitySweep,
) {
    let series = experiment(20, 4, strategy)
        .run_single(&small_sweep)
        .expect("run must succeed");

    assert_eq!(series.len(), 3);
    assert_eq!(series.mode(), RealizationMode::Single);
    let points: Vec<_> = series.points().collect();
    assert_eq!(points[0], (0.0, 1.0, 1.0));
    for (_, clustering, path_length) in points {
        assert!(clustering.is_finite() && clustering > 0.0);
        assert!(path_length.is_finite() && path_length > 0.0);
    }
}

#[rstest]
fn multi_run_normalizes_baseline_to_one(small_sweep: ProbabilitySweep) {
    let series = experiment(30, 4, ExecutionStrategy::Sequential)
        .run_multi(&small_sweep)
        .expect("run must succeed");
    assert_eq!(series.clustering()[0], 1.0);
    assert_eq!(series.path_length()[0], 1.0);
    assert_eq!(series.probabilities(), small_sweep.values());
}

#[rstest]
fn strategies_agree_bit_for_bit(small_sweep: ProbabilitySweep) {
    let sequential = experiment(40, 6, ExecutionStrategy::Sequential)
        .run_multi(&small_sweep)
        .expect("sequential run must succeed");
    let parallel = experiment(40, 6, ExecutionStrategy::Parallel)
        .run_multi(&small_sweep)
        .expect("parallel run must succeed");
    assert_eq!(sequential, parallel);
}

#[rstest]
fn rewiring_shortens_paths_before_destroying_clustering() {
    let sweep = ProbabilitySweep::new(vec![0.0, 0.05]).expect("sweep must be valid");
    let series = experiment(100, 10, ExecutionStrategy::Parallel)
        .run_single(&sweep)
        .expect("run must succeed");
    assert!(series.path_length()[1] < series.path_length()[0]);
    assert!(series.clustering()[1] > 0.5);
}

#[rstest]
fn unrewired_baseline_matches_lattice_closed_form() {
    let sweep = ProbabilitySweep::new(vec![0.0]).expect("sweep must be valid");
    let series = experiment(100, 10, ExecutionStrategy::Sequential)
        .run_multi(&sweep)
        .expect("run must succeed");
    let expected = 3.0 * 8.0 / (4.0 * 9.0);
    assert!((series.baseline().clustering - expected).abs() < 1e-12);
}

#[rstest]
fn disconnected_realization_reports_probability_and_trial() {
    // A rewired 10-cycle disconnects in roughly one draw out of twenty.
    let experiment = ExperimentBuilder::new()
        .with_nodes(10)
        .with_degree(2)
        .with_trials(500)
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .expect("configuration must be valid");
    let sweep = ProbabilitySweep::new(vec![0.0, 0.9]).expect("sweep must be valid");

    let err = experiment
        .run_multi(&sweep)
        .expect_err("some realization must disconnect");
    assert_eq!(err.code(), ExperimentErrorCode::RealizationFailed);
    assert_eq!(err.graph_code(), Some(GraphErrorCode::DisconnectedGraph));
    match err {
        ExperimentError::Realization {
            mode,
            probability,
            trial,
            ..
        } => {
            assert_eq!(mode.label(), "multi");
            assert_eq!(probability, 0.9);
            assert!(trial.is_some_and(|index| index < 500));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn zero_clustering_baseline_is_rejected() {
    let sweep = ProbabilitySweep::new(vec![0.0]).expect("sweep must be valid");
    let err = experiment(10, 2, ExecutionStrategy::Sequential)
        .run_single(&sweep)
        .expect_err("a plain cycle has no triangles");
    assert_eq!(err.code(), ExperimentErrorCode::DegenerateBaseline);
}

#[rstest]
fn report_hands_finished_series_to_reporter(small_sweep: ProbabilitySweep) {
    let experiment = experiment(20, 4, ExecutionStrategy::Sequential);
    let reporter = RecordingReporter::default();
    let mode = experiment.multi_mode();
    let series = experiment
        .report(mode, &small_sweep, &reporter, Path::new("out.png"))
        .expect("report must succeed");

    let calls = reporter.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.title, "Multiple Realization: Nodes = 20, Degree = 4");
    assert_eq!(call.sweep, series.probabilities());
    assert_eq!(call.clustering, series.clustering());
    assert_eq!(call.path_length, series.path_length());
    assert_eq!(call.output_path, Path::new("out.png"));
}

#[rstest]
fn report_is_skipped_when_the_sweep_fails() {
    let reporter = RecordingReporter::default();
    let sweep = ProbabilitySweep::new(vec![0.0]).expect("sweep must be valid");
    let result = experiment(10, 2, ExecutionStrategy::Sequential).report(
        RealizationMode::Single,
        &sweep,
        &reporter,
        Path::new("never.png"),
    );
    assert!(result.is_err());
    assert!(reporter.calls().is_empty());
}

#[rstest]
fn reporter_failure_is_wrapped(small_sweep: ProbabilitySweep) {
    let err = experiment(20, 4, ExecutionStrategy::Sequential)
        .report(
            RealizationMode::Single,
            &small_sweep,
            &FailingReporter,
            Path::new("out.png"),
        )
        .expect_err("reporter failure must surface");
    assert_eq!(err.code(), ExperimentErrorCode::ReportFailed);
    assert!(err.to_string().contains("read-only"));
}

#[rstest]
fn run_records_experiment_span(small_sweep: ProbabilitySweep) {
    let experiment = experiment(20, 4, ExecutionStrategy::Sequential);
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || experiment.run_single(&small_sweep))
        .expect("run must succeed");

    let spans = layer.spans();
    let run_span = spans
        .iter()
        .find(|span| span.name == "experiment.run")
        .expect("experiment.run span must exist");
    assert_eq!(run_span.fields.get("mode"), Some(&"single".to_owned()));
    assert_eq!(run_span.fields.get("nodes"), Some(&"20".to_owned()));
    assert_eq!(run_span.fields.get("points"), Some(&"3".to_owned()));
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.fields.get("message") == Some(&"sweep completed".to_owned()))
    );
}
