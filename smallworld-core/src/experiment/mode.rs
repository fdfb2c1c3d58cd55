//! Single- versus multi-realization mode.

use std::{fmt, num::NonZeroUsize};

use crate::error::ExperimentError;

/// How many graphs are generated per sweep value.
///
/// # Examples
/// ```
/// use smallworld_core::RealizationMode;
///
/// let mode = RealizationMode::multi(15).expect("fifteen trials are valid");
/// assert_eq!(mode.trials().get(), 15);
/// assert_eq!(mode.artifact_name(), "multi_realization.png");
/// assert_eq!(RealizationMode::Single.trials().get(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RealizationMode {
    /// Exactly one graph per sweep value.
    Single,
    /// A fixed number of independent graphs per sweep value, averaged.
    Multi {
        /// Realizations generated for each sweep value.
        trials: NonZeroUsize,
    },
}

impl RealizationMode {
    /// Creates a multi-realization mode with `trials` graphs per sweep value.
    ///
    /// # Errors
    /// Returns [`ExperimentError::InvalidParameters`] when `trials` is zero.
    pub fn multi(trials: usize) -> Result<Self, ExperimentError> {
        NonZeroUsize::new(trials)
            .map(|trials| Self::Multi { trials })
            .ok_or_else(|| ExperimentError::InvalidParameters {
                reason: "trials must be at least 1 (got 0)".into(),
            })
    }

    /// Returns the number of realizations per sweep value.
    #[must_use]
    pub const fn trials(self) -> NonZeroUsize {
        match self {
            Self::Single => NonZeroUsize::MIN,
            Self::Multi { trials } => trials,
        }
    }

    /// Returns the lowercase label used in logs and error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi { .. } => "multi",
        }
    }

    /// Returns the default file name of the chart produced in this mode.
    #[must_use]
    pub const fn artifact_name(self) -> &'static str {
        match self {
            Self::Single => "single_realization.png",
            Self::Multi { .. } => "multi_realization.png",
        }
    }

    /// Returns the chart title prefix used in this mode.
    #[must_use]
    pub const fn title_prefix(self) -> &'static str {
        match self {
            Self::Single => "Single Realization",
            Self::Multi { .. } => "Multiple Realization",
        }
    }

    /// Trial index as reported in errors: `None` in single mode.
    pub(crate) const fn trial_label(self, trial: usize) -> Option<usize> {
        match self {
            Self::Single => None,
            Self::Multi { .. } => Some(trial),
        }
    }
}

impl fmt::Display for RealizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
