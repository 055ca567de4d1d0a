//! Error and warning types for the DSP primitives.
//!
//! The per-sample paths never fail. Errors only arise when configuring a
//! primitive through one of the checked entry points, and the single
//! recoverable condition (an out-of-range delay) is reported as a
//! [`DelayClamped`] value rather than an error.

use thiserror::Error;

/// Which coefficient set a [`FilterError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientSet {
    /// Feedforward (B) coefficients, applied to input samples.
    Feedforward,
    /// Feedback (A) coefficients, applied to past output samples.
    Feedback,
}

impl core::fmt::Display for CoefficientSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoefficientSet::Feedforward => f.write_str("feedforward"),
            CoefficientSet::Feedback => f.write_str("feedback"),
        }
    }
}

/// Rejected filter configuration.
///
/// Returned by [`IirFilter::try_set_filter`](crate::IirFilter::try_set_filter).
/// The unchecked [`IirFilter::set_filter`](crate::IirFilter::set_filter)
/// accepts all of these and leaves the consequences (silence, NaN, Inf)
/// to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// A coefficient set had no entries.
    #[error("{0} coefficients must not be empty")]
    Empty(CoefficientSet),

    /// `a[0]` was zero, so the difference equation cannot be normalized.
    #[error("feedback coefficient a[0] must be non-zero")]
    ZeroNormalization,

    /// A coefficient was NaN or infinite.
    #[error("{set} coefficient at index {index} is not finite: {value}")]
    NonFinite {
        /// Coefficient set containing the bad value.
        set: CoefficientSet,
        /// Position of the bad value within its set.
        index: usize,
        /// The offending value.
        value: f32,
    },
}

/// Report of a delay request that fell outside `[0, max_delay]`.
///
/// [`DelayLine::set_delay`](crate::DelayLine::set_delay) still applies
/// `applied` and keeps running; this value exists so the caller can surface
/// the warning wherever its diagnostics go.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("delay of {requested} samples is outside [0, {applied}], clamped to {applied}")]
pub struct DelayClamped {
    /// The delay that was asked for, in samples.
    pub requested: f32,
    /// The delay actually in effect (the line's maximum), in samples.
    pub applied: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_display_names_the_set() {
        let err = FilterError::Empty(CoefficientSet::Feedback);
        assert_eq!(err.to_string(), "feedback coefficients must not be empty");
    }

    #[test]
    fn zero_normalization_display() {
        assert_eq!(
            FilterError::ZeroNormalization.to_string(),
            "feedback coefficient a[0] must be non-zero"
        );
    }

    #[test]
    fn non_finite_display() {
        let err = FilterError::NonFinite {
            set: CoefficientSet::Feedforward,
            index: 2,
            value: f32::INFINITY,
        };
        let msg = err.to_string();
        assert!(msg.contains("feedforward"), "got: {msg}");
        assert!(msg.contains("index 2"), "got: {msg}");
    }

    #[test]
    fn delay_clamped_display() {
        let warning = DelayClamped {
            requested: 150.0,
            applied: 50.0,
        };
        assert_eq!(
            warning.to_string(),
            "delay of 150 samples is outside [0, 50], clamped to 50"
        );
    }
}
