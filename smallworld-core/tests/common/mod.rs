use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Mutex,
};

use smallworld_core::Reporter;

/// Captured arguments of one [`Reporter::render`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderCall {
    pub sweep: Vec<f64>,
    pub clustering: Vec<f64>,
    pub path_length: Vec<f64>,
    pub title: String,
    pub output_path: PathBuf,
}

/// Reporter that records every call instead of drawing.
#[derive(Default)]
pub struct RecordingReporter {
    calls: Mutex<Vec<RenderCall>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl Reporter for RecordingReporter {
    type Error = std::convert::Infallible;

    fn render(
        &self,
        sweep: &[f64],
        clustering: &[f64],
        path_length: &[f64],
        title: &str,
        output_path: &Path,
    ) -> Result<(), Self::Error> {
        self.calls.lock().expect("lock poisoned").push(RenderCall {
            sweep: sweep.to_vec(),
            clustering: clustering.to_vec(),
            path_length: path_length.to_vec(),
            title: title.to_owned(),
            output_path: output_path.to_path_buf(),
        });
        Ok(())
    }
}

#[derive(Debug)]
pub struct WriteRefused;

impl fmt::Display for WriteRefused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("output directory is read-only")
    }
}

impl std::error::Error for WriteRefused {}

/// Reporter that always fails as if the output path were unwritable.
pub struct FailingReporter;

impl Reporter for FailingReporter {
    type Error = WriteRefused;

    fn render(
        &self,
        _sweep: &[f64],
        _clustering: &[f64],
        _path_length: &[f64],
        _title: &str,
        _output_path: &Path,
    ) -> Result<(), Self::Error> {
        Err(WriteRefused)
    }
}
