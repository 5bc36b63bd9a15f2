//! Connection thresholds as a function of graph size.

use crate::error::SimulationError;

/// Threshold used for the graph after `n` insertions.
///
/// # Examples
/// ```
/// use geograph_core::ThresholdSchedule;
///
/// let schedule = ThresholdSchedule::PowerLaw { exponent: 1.0 };
/// assert_eq!(schedule.threshold(4), 0.25);
/// assert_eq!(ThresholdSchedule::Constant(2.0).threshold(100), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThresholdSchedule {
    /// `n^(-exponent)`: thresholds fall as the graph densifies.
    PowerLaw {
        /// Decay exponent; must be finite and positive.
        exponent: f64,
    },
    /// The same threshold at every size.
    Constant(f64),
}

impl Default for ThresholdSchedule {
    fn default() -> Self {
        Self::PowerLaw { exponent: 0.4 }
    }
}

impl ThresholdSchedule {
    /// Returns the threshold for a graph of `n` vertices. Sizes below one are
    /// treated as one.
    #[must_use]
    pub fn threshold(&self, n: usize) -> f64 {
        match *self {
            Self::PowerLaw { exponent } => (n.max(1) as f64).powf(-exponent),
            Self::Constant(value) => value,
        }
    }

    /// Rejects schedules that would yield invalid or growing thresholds.
    pub(crate) fn validate(&self) -> Result<(), SimulationError> {
        let (parameter, value) = match *self {
            Self::PowerLaw { exponent } => ("exponent", exponent),
            Self::Constant(value) => ("threshold", value),
        };
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(SimulationError::InvalidFloatParameter { parameter })
        }
    }
}
