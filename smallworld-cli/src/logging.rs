//! Structured logging for the smallworld binary.
//!
//! Diagnostics go to `stderr` through a global `tracing` subscriber so the
//! run summary on `stdout` stays machine-readable. `log` records from
//! dependencies are bridged into the same pipeline.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "SMALLWORLD_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Output encodings accepted by `SMALLWORLD_LOG_FORMAT`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the active span list.
    Json,
}

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The format variable held bytes that are not UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Variable that failed to decode.
        name: &'static str,
        /// Decoding failure.
        #[source]
        source: env::VarError,
    },
    /// The format variable named an encoding we do not emit.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalized value that was supplied.
        provided: String,
    },
    /// Another global subscriber refused to yield.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error from `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Installs the global subscriber once per process.
///
/// `RUST_LOG` selects the level filter (default `info`) and
/// `SMALLWORLD_LOG_FORMAT` picks `human` or `json` output. Repeat calls
/// return immediately.
///
/// # Errors
/// Returns [`LoggingError`] when the format variable is not UTF-8 or names an
/// unsupported format.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let format = format_from_env()?;
    match install_subscriber(format) {
        Ok(()) => {}
        Err(LoggingError::InstallFailed { source }) => {
            report_existing_subscriber(&source);
        }
        Err(err) => return Err(err),
    }
    let _ = INSTALLED.set(());
    Ok(())
}

fn format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(err @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source: err,
        }),
    }
}

fn install_subscriber(format: LogFormat) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // A logger installed by the host keeps the `log` slot.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

#[expect(
    clippy::print_stderr,
    reason = "no subscriber of ours is active to carry this notice"
)]
fn report_existing_subscriber(source: &tracing_subscriber::util::TryInitError) {
    eprintln!("structured logging already configured elsewhere: {source}");
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}
