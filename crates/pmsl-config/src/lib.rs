//! Voice presets for pmsl physical modelling primitives.
//!
//! A voice is one [`DelayLine`](pmsl_core::DelayLine) and one
//! [`IirFilter`](pmsl_core::IirFilter), either in series or closed into a
//! waveguide loop. This crate describes voices in TOML, validates them, and
//! builds runnable [`Voice`]s from them.
//!
//! # Features
//!
//! - **Preset System**: Load and save voice presets from TOML files
//! - **Validation**: Reject delays, coefficients, and loop gains the core would
//!   otherwise clamp or turn into NaN
//! - **Voices**: Build a [`SampleProcessor`](pmsl_core::SampleProcessor) from a preset
//! - **Factory Presets**: Built-in echoes and plucked strings
//!
//! # Example
//!
//! ```rust,no_run
//! use pmsl_config::{Topology, Voice, VoicePreset};
//! use pmsl_core::SampleProcessor;
//!
//! // Load a preset from file
//! let preset = VoicePreset::load("nylon.toml").unwrap();
//!
//! // Create a preset programmatically
//! let preset = VoicePreset::new("Echo", 9600)
//!     .with_description("Darkening repeats")
//!     .with_delay(7200.0)
//!     .with_filter([0.2], [1.0, -0.8])
//!     .with_topology(Topology::Loop { gain: 0.5 });
//! preset.save("presets/echo.toml").unwrap();
//!
//! // Run it
//! let mut voice = Voice::from_preset(&preset).unwrap();
//! let y = voice.process(1.0);
//! ```

mod error;
mod preset;
mod voice;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::{DelayConfig, FilterConfig, Topology, VoicePreset};
pub use validation::{
    ValidationError, ValidationResult, validate_delay, validate_filter, validate_preset,
    validate_topology,
};
pub use voice::Voice;
