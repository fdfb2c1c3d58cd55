use std::fs;

use rstest::{fixture, rstest};
use smallworld_core::Reporter;
use tempfile::TempDir;

use super::*;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

struct Series {
    sweep: Vec<f64>,
    clustering: Vec<f64>,
    path_length: Vec<f64>,
}

#[fixture]
fn series() -> Series {
    Series {
        sweep: vec![0.0, 0.01, 0.05, 0.09],
        clustering: vec![1.0, 0.97, 0.86, 0.74],
        path_length: vec![1.0, 0.71, 0.52, 0.46],
    }
}

#[fixture]
fn workdir() -> TempDir {
    tempfile::tempdir().expect("temporary directory must be created")
}

#[rstest]
fn render_writes_png(series: Series, workdir: TempDir) {
    let path = workdir.path().join("multi_realization.png");
    ScatterPlotReporter::new()
        .with_size(320, 240)
        .render(
            &series.sweep,
            &series.clustering,
            &series.path_length,
            "Multiple Realization: Nodes = 100, Degree = 10",
            &path,
        )
        .expect("render must succeed");

    let bytes = fs::read(&path).expect("chart must exist");
    assert!(bytes.starts_with(&PNG_MAGIC));
}

#[rstest]
fn render_accepts_single_point(workdir: TempDir) {
    let path = workdir.path().join("single_realization.png");
    ScatterPlotReporter::new()
        .with_size(200, 200)
        .render(&[0.0], &[1.0], &[1.0], "baseline only", &path)
        .expect("render must succeed");
    assert!(path.exists());
}

#[rstest]
fn missing_directory_is_an_io_error(series: Series, workdir: TempDir) {
    let path = workdir.path().join("missing").join("chart.png");
    let err = ScatterPlotReporter::new()
        .render(
            &series.sweep,
            &series.clustering,
            &series.path_length,
            "title",
            &path,
        )
        .expect_err("directory does not exist");
    match err {
        PlotError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!path.exists());
}

#[rstest]
fn file_parent_is_an_io_error(series: Series, workdir: TempDir) {
    let blocker = workdir.path().join("blocker");
    fs::write(&blocker, b"not a directory").expect("file must be written");
    let err = ScatterPlotReporter::new()
        .render(
            &series.sweep,
            &series.clustering,
            &series.path_length,
            "title",
            &blocker.join("chart.png"),
        )
        .expect_err("parent is a file");
    assert!(matches!(err, PlotError::Io { .. }));
}

#[rstest]
fn mismatched_lengths_are_rejected(workdir: TempDir) {
    let err = ScatterPlotReporter::new()
        .render(
            &[0.0, 0.1],
            &[1.0],
            &[1.0, 0.5],
            "title",
            &workdir.path().join("chart.png"),
        )
        .expect_err("lengths differ");
    assert!(matches!(
        err,
        PlotError::LengthMismatch {
            sweep: 2,
            clustering: 1,
            path_length: 2,
        }
    ));
}

#[rstest]
fn empty_series_is_rejected(workdir: TempDir) {
    let err = ScatterPlotReporter::new()
        .render(&[], &[], &[], "title", &workdir.path().join("chart.png"))
        .expect_err("nothing to draw");
    assert!(matches!(err, PlotError::EmptySeries));
}

#[rstest]
fn non_finite_values_are_rejected(workdir: TempDir) {
    let err = ScatterPlotReporter::new()
        .render(
            &[0.0, 0.1],
            &[1.0, 0.9],
            &[1.0, f64::INFINITY],
            "title",
            &workdir.path().join("chart.png"),
        )
        .expect_err("infinite ratio");
    assert!(matches!(
        err,
        PlotError::NonFinite {
            series: "path length",
            index: 1,
        }
    ));
}

#[test]
fn default_size_is_used() {
    assert_eq!(ScatterPlotReporter::default().size(), DEFAULT_SIZE);
}

fn directory_entries(dir: &TempDir) -> Vec<std::path::PathBuf> {
    fs::read_dir(dir.path())
        .expect("directory must be readable")
        .map(|entry| entry.expect("entry must be readable").path())
        .collect()
}

#[rstest]
#[case::zero_by_zero(0, 0)]
#[case::zero_width(0, 240)]
#[case::zero_height(320, 0)]
fn empty_canvas_leaves_no_file(
    series: Series,
    workdir: TempDir,
    #[case] width: u32,
    #[case] height: u32,
) {
    let path = workdir.path().join("chart.png");
    let err = ScatterPlotReporter::new()
        .with_size(width, height)
        .render(
            &series.sweep,
            &series.clustering,
            &series.path_length,
            "title",
            &path,
        )
        .expect_err("canvas has no area");
    assert!(matches!(err, PlotError::EmptyCanvas { .. }));
    assert!(!path.exists());
    assert!(directory_entries(&workdir).is_empty());
}

#[rstest]
fn failed_render_keeps_previous_chart(workdir: TempDir) {
    let path = workdir.path().join("chart.png");
    fs::write(&path, b"previous").expect("file must be written");
    let err = ScatterPlotReporter::new()
        .render(&[0.0, 0.1], &[1.0, f64::NAN], &[1.0, 0.5], "title", &path)
        .expect_err("NaN ratio");
    assert!(matches!(err, PlotError::NonFinite { .. }));
    assert_eq!(fs::read(&path).expect("chart must remain"), b"previous");
    assert_eq!(directory_entries(&workdir), vec![path]);
}

#[rstest]
fn successful_render_leaves_only_the_chart(series: Series, workdir: TempDir) {
    let path = workdir.path().join("chart.png");
    ScatterPlotReporter::new()
        .with_size(200, 150)
        .render(
            &series.sweep,
            &series.clustering,
            &series.path_length,
            "title",
            &path,
        )
        .expect("render must succeed");
    assert_eq!(directory_entries(&workdir), vec![path]);
}
