use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use plotters::prelude::*;
use smallworld_core::Reporter;
use tracing::{debug, instrument};

use crate::PlotError;

/// Default bitmap size in pixels.
pub const DEFAULT_SIZE: (u32, u32) = (800, 600);

const X_LABEL: &str = "Probability";
const Y_LABEL: &str = "L Value (L/Lmax) or C Value (C/Cmax)";
const CLUSTERING_LABEL: &str = "C Val";
const PATH_LENGTH_LABEL: &str = "L Val";
const MARKER_SIZE: i32 = 3;

/// Draws both normalized series as a scatter plot: clustering ratios as blue
/// squares, path-length ratios as red circles, with a legend in the upper
/// left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScatterPlotReporter {
    size: (u32, u32),
}

impl Default for ScatterPlotReporter {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE }
    }
}

impl ScatterPlotReporter {
    /// Creates a reporter drawing at [`DEFAULT_SIZE`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the bitmap size in pixels. A zero width or height is
    /// rejected when rendering.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Returns the bitmap size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    fn validate_size(&self) -> Result<(), PlotError> {
        match self.size {
            (0, _) | (_, 0) => Err(PlotError::EmptyCanvas {
                width: self.size.0,
                height: self.size.1,
            }),
            _ => Ok(()),
        }
    }

    fn draw(
        &self,
        sweep: &[f64],
        clustering: &[f64],
        path_length: &[f64],
        title: &str,
        target: &Path,
    ) -> Result<(), PlotError> {
        let root = BitMapBackend::new(target, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let (x_max, y_max) = axis_limits(sweep, clustering, path_length);
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()
            .map_err(render_error)?;

        let clustering_points = sweep.iter().copied().zip(clustering.iter().copied());
        chart
            .draw_series(PointSeries::of_element(
                clustering_points,
                MARKER_SIZE,
                &BLUE,
                &|coord: (f64, f64), size: i32, style: ShapeStyle| {
                    EmptyElement::at(coord)
                        + Rectangle::new([(-size, -size), (size, size)], style.filled())
                },
            ))
            .map_err(render_error)?
            .label(CLUSTERING_LABEL)
            .legend(|(x, y)| {
                Rectangle::new(
                    [(x - MARKER_SIZE, y - MARKER_SIZE), (x + MARKER_SIZE, y + MARKER_SIZE)],
                    BLUE.filled(),
                )
            });

        let path_points = sweep.iter().copied().zip(path_length.iter().copied());
        chart
            .draw_series(path_points.map(|point| Circle::new(point, MARKER_SIZE, RED.filled())))
            .map_err(render_error)?
            .label(PATH_LENGTH_LABEL)
            .legend(|(x, y)| Circle::new((x, y), MARKER_SIZE, RED.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)
    }
}

impl Reporter for ScatterPlotReporter {
    type Error = PlotError;

    #[instrument(
        name = "report.render",
        err,
        skip(self, sweep, clustering, path_length),
        fields(points = sweep.len(), path = %output_path.display()),
    )]
    fn render(
        &self,
        sweep: &[f64],
        clustering: &[f64],
        path_length: &[f64],
        title: &str,
        output_path: &Path,
    ) -> Result<(), Self::Error> {
        self.validate_size()?;
        validate_series(sweep, clustering, path_length)?;
        let parent = ensure_writable(output_path)?;
        write_atomically(parent, output_path, |staging| {
            self.draw(sweep, clustering, path_length, title, staging)
        })?;
        debug!("chart written");
        Ok(())
    }
}

/// Runs `write` against a staging file next to `output_path` and moves it
/// into place only when `write` succeeds. The staging file is removed on
/// failure, so `output_path` is either the finished chart or untouched.
fn write_atomically<F>(parent: &Path, output_path: &Path, write: F) -> Result<(), PlotError>
where
    F: FnOnce(&Path) -> Result<(), PlotError>,
{
    let io_error = |source: io::Error| PlotError::Io {
        path: PathBuf::from(output_path),
        source,
    };
    // The bitmap encoder picks its format from the extension.
    let staging = tempfile::Builder::new()
        .prefix(".smallworld-")
        .suffix(".png")
        .tempfile_in(parent)
        .map_err(io_error)?;
    write(staging.path())?;
    staging
        .persist(output_path)
        .map_err(|err| io_error(err.error))?;
    Ok(())
}

fn validate_series(sweep: &[f64], clustering: &[f64], path_length: &[f64]) -> Result<(), PlotError> {
    if sweep.len() != clustering.len() || sweep.len() != path_length.len() {
        return Err(PlotError::LengthMismatch {
            sweep: sweep.len(),
            clustering: clustering.len(),
            path_length: path_length.len(),
        });
    }
    if sweep.is_empty() {
        return Err(PlotError::EmptySeries);
    }
    for (series, values) in [
        ("sweep", sweep),
        ("clustering", clustering),
        ("path length", path_length),
    ] {
        if let Some(index) = values.iter().position(|value| !value.is_finite()) {
            return Err(PlotError::NonFinite { series, index });
        }
    }
    Ok(())
}

/// Fails before anything is drawn when the destination directory is missing
/// or read-only. Returns the directory the chart will be written to.
fn ensure_writable(output_path: &Path) -> Result<&Path, PlotError> {
    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |source: io::Error| PlotError::Io {
        path: PathBuf::from(output_path),
        source,
    };
    let metadata = fs::metadata(parent).map_err(io_error)?;
    if !metadata.is_dir() {
        return Err(io_error(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("`{}` is not a directory", parent.display()),
        )));
    }
    if metadata.permissions().readonly() {
        return Err(io_error(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("`{}` is read-only", parent.display()),
        )));
    }
    Ok(parent)
}

fn axis_limits(sweep: &[f64], clustering: &[f64], path_length: &[f64]) -> (f64, f64) {
    let x_max = sweep.iter().copied().fold(0.0, f64::max);
    let x_max = if x_max > 0.0 { x_max * 1.05 } else { 1.0 };
    let y_max = clustering
        .iter()
        .chain(path_length)
        .copied()
        .fold(1.0, f64::max);
    (x_max, y_max * 1.1)
}

fn render_error(error: impl fmt::Display) -> PlotError {
    PlotError::Render {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn failed_write_discards_partial_output() {
        let dir = tempfile::tempdir().expect("temporary directory must be created");
        let output = dir.path().join("chart.png");
        let err = write_atomically(dir.path(), &output, |staging| {
            fs::write(staging, b"\x89PNG truncated").expect("staging file must be writable");
            Err(PlotError::Render {
                message: "backend gave up".into(),
            })
        })
        .expect_err("write must fail");

        assert!(matches!(err, PlotError::Render { .. }));
        assert!(!output.exists());
        let leftovers = fs::read_dir(dir.path())
            .expect("directory must be readable")
            .count();
        assert_eq!(leftovers, 0);
    }

    #[rstest]
    fn successful_write_moves_staging_into_place() {
        let dir = tempfile::tempdir().expect("temporary directory must be created");
        let output = dir.path().join("chart.png");
        fs::write(&output, b"old").expect("file must be written");
        write_atomically(dir.path(), &output, |staging| {
            assert_eq!(staging.extension().and_then(|ext| ext.to_str()), Some("png"));
            fs::write(staging, b"new").map_err(|source| PlotError::Io {
                path: staging.to_path_buf(),
                source,
            })
        })
        .expect("write must succeed");

        assert_eq!(fs::read(&output).expect("chart must exist"), b"new");
    }
}
