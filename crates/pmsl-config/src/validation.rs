//! Preset validation.
//!
//! The core primitives are lenient: an out-of-range delay is clamped and an
//! ill-formed coefficient set is accepted and produces NaN or silence.
//! Presets are checked up front instead, so a voice built from a preset that
//! passed validation runs exactly as written.
//!
//! # Example
//!
//! ```rust
//! use pmsl_config::{VoicePreset, validate_preset};
//!
//! let preset = VoicePreset::plucked_string("A2", 110.0, 48000);
//! validate_preset(&preset).expect("factory string should be valid");
//! ```

use pmsl_core::{FilterError, validate_coefficients};
use thiserror::Error;

use crate::preset::{DelayConfig, FilterConfig, Topology, VoicePreset};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Sample rate of zero.
    #[error("sample rate must be non-zero")]
    ZeroSampleRate,

    /// Delay outside the line's range.
    #[error("delay of {delay} samples is outside [0, {max}]")]
    DelayOutOfRange {
        /// The requested delay.
        delay: f32,
        /// The line's maximum delay.
        max: usize,
    },

    /// Coefficients the difference equation cannot evaluate.
    #[error("invalid filter: {0}")]
    Filter(#[from] FilterError),

    /// Feedback gain that is not finite or exceeds unity.
    #[error("loop gain {0} must be finite with magnitude at most 1")]
    LoopGain(f32),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check that the delay fits the line.
pub fn validate_delay(delay: &DelayConfig) -> ValidationResult<()> {
    let max = delay.max_delay_samples;
    if (0.0..=max as f32).contains(&delay.delay_samples) {
        Ok(())
    } else {
        Err(ValidationError::DelayOutOfRange {
            delay: delay.delay_samples,
            max,
        })
    }
}

/// Check that the coefficients define a computable filter.
pub fn validate_filter(filter: &FilterConfig) -> ValidationResult<()> {
    validate_coefficients(&filter.feedforward, &filter.feedback)?;
    Ok(())
}

/// Check the loop gain of a topology: finite, with `|gain| <= 1`.
///
/// Only the topology's own gain is limited. A loop filter whose gain exceeds
/// unity can still make the loop diverge.
pub fn validate_topology(topology: &Topology) -> ValidationResult<()> {
    match *topology {
        Topology::Series => Ok(()),
        Topology::Loop { gain } if gain.is_finite() && gain.abs() <= 1.0 => Ok(()),
        Topology::Loop { gain } => Err(ValidationError::LoopGain(gain)),
    }
}

/// Validate every part of a preset, reporting all problems at once.
pub fn validate_preset(preset: &VoicePreset) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if preset.sample_rate == 0 {
        errors.push(ValidationError::ZeroSampleRate);
    }
    let checks = [
        validate_delay(&preset.delay),
        validate_filter(&preset.filter),
        validate_topology(&preset.topology),
    ];
    errors.extend(checks.into_iter().filter_map(Result::err));

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
