//! Ordered rewiring probabilities used as the independent variable.

use crate::error::ExperimentError;

const REFERENCE_STEP: f64 = 0.0005;
const REFERENCE_POINTS: usize = 200;

/// Largest sweep [`ProbabilitySweep::arange`] will materialize.
pub const MAX_SWEEP_POINTS: usize = 1_000_000;

/// Strictly increasing rewiring probabilities in `[0, 1)` whose first value
/// is exactly zero, so that normalization is relative to the unrewired
/// lattice.
///
/// # Examples
/// ```
/// use smallworld_core::ProbabilitySweep;
///
/// let sweep = ProbabilitySweep::new(vec![0.0, 0.1, 0.5]).expect("sweep must be valid");
/// assert_eq!(sweep.len(), 3);
/// assert_eq!(sweep.baseline(), 0.0);
///
/// assert!(ProbabilitySweep::new(vec![0.1, 0.2]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilitySweep {
    values: Vec<f64>,
}

impl ProbabilitySweep {
    /// Validates and wraps `values`.
    ///
    /// # Errors
    /// Returns [`ExperimentError::InvalidParameters`] when `values` is empty,
    /// does not start at `0.0`, contains a value outside `[0, 1)` or is not
    /// strictly increasing.
    pub fn new(values: Vec<f64>) -> Result<Self, ExperimentError> {
        let Some(&first) = values.first() else {
            return Err(invalid("sweep must contain at least one probability"));
        };
        if first != 0.0 {
            return Err(invalid(format!(
                "sweep must start at p = 0 to normalize against the unrewired lattice (got {first})"
            )));
        }
        if let Some(bad) = values
            .iter()
            .find(|p| !(p.is_finite() && (0.0..1.0).contains(*p)))
        {
            return Err(invalid(format!("probability {bad} is outside [0, 1)")));
        }
        if let Some(pair) = values.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(invalid(format!(
                "sweep must be strictly increasing ({} is followed by {})",
                pair[0], pair[1]
            )));
        }
        Ok(Self { values })
    }

    /// Builds `start, start + step, …` for every value below `stop`, yielding
    /// `ceil((stop - start) / step)` points.
    ///
    /// # Errors
    /// Returns [`ExperimentError::InvalidParameters`] when `step` is not a
    /// positive finite number, when `stop <= start`, when the range would
    /// hold more than [`MAX_SWEEP_POINTS`] values, or when the resulting
    /// sequence fails [`ProbabilitySweep::new`].
    ///
    /// # Examples
    /// ```
    /// use smallworld_core::ProbabilitySweep;
    ///
    /// let sweep = ProbabilitySweep::arange(0.0, 0.5, 0.125).expect("range must be valid");
    /// assert_eq!(sweep.values(), &[0.0, 0.125, 0.25, 0.375]);
    /// ```
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self, ExperimentError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(invalid(format!("sweep step ({step}) must be positive")));
        }
        if !(start.is_finite() && stop.is_finite() && stop > start) {
            return Err(invalid(format!(
                "sweep stop ({stop}) must be greater than start ({start})"
            )));
        }
        let count = ((stop - start) / step).ceil();
        if !(count.is_finite() && count <= MAX_SWEEP_POINTS as f64) {
            return Err(invalid(format!(
                "sweep from {start} to {stop} in steps of {step} exceeds {MAX_SWEEP_POINTS} points"
            )));
        }
        let count = count as usize;
        let values = (0..count).map(|i| start + i as f64 * step).collect();
        Self::new(values)
    }

    /// The sweep used by the reference experiment: 200 values from `0` to
    /// `0.1` (exclusive) in steps of `0.0005`.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            values: (0..REFERENCE_POINTS)
                .map(|i| i as f64 * REFERENCE_STEP)
                .collect(),
        }
    }

    /// Returns the probabilities in sweep order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of sweep values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a validated sweep holds at least the baseline.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the baseline probability (the first value, always zero).
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.values.first().copied().unwrap_or_default()
    }
}

fn invalid(reason: impl Into<String>) -> ExperimentError {
    ExperimentError::InvalidParameters {
        reason: reason.into(),
    }
}
