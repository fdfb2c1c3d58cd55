use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot write `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("series lengths differ: sweep={sweep}, clustering={clustering}, path_length={path_length}")]
    LengthMismatch {
        sweep: usize,
        clustering: usize,
        path_length: usize,
    },
    #[error("canvas of {width}x{height} pixels has no area")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("nothing to plot: the sweep is empty")]
    EmptySeries,
    #[error("{series} value at index {index} is not finite")]
    NonFinite { series: &'static str, index: usize },
    #[error("failed to render chart: {message}")]
    Render { message: String },
}
