//! PMSL Core - DSP primitives for physical modelling of instruments
//!
//! Two stateful building blocks, each driven one sample at a time by an
//! instrument model or audio graph, with zero allocation on the audio path.
//!
//! # Primitives
//!
//! - [`DelayLine`] - Circular buffer with linearly interpolated fractional delay
//! - [`IirFilter`] - Arbitrary-order IIR filter evaluating its difference equation
//!
//! # Composition
//!
//! - [`SampleProcessor`] - Object-safe per-sample trait implemented by both
//! - [`ProcessorExt`] / [`Chain`] - Zero-cost serial composition
//!
//! # Coefficient Design
//!
//! - RBJ biquads: [`lowpass`], [`highpass`], [`bandpass`], [`notch`], [`peaking_eq`]
//! - Loop filters: [`one_pole_lowpass`], [`dc_blocker`], [`two_point_average`]
//! - Tuning: [`delay_for_frequency`]
//!
//! # Diagnostics
//!
//! Out-of-range delay requests are clamped and returned as [`DelayClamped`].
//! Enable the `tracing` feature to also log them at `warn` level.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for the buffers).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pmsl-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use pmsl_core::{DelayLine, IirFilter, two_point_average, delay_for_frequency};
//!
//! // Karplus-Strong string at 220 Hz
//! let sample_rate = 48000.0;
//! let loop_delay = delay_for_frequency(220.0, sample_rate) - 1.5;
//! let mut string = DelayLine::with_delay(1024, loop_delay);
//! let mut damping: IirFilter = two_point_average().to_filter();
//!
//! let mut feedback = 0.0;
//! for n in 0..4800 {
//!     let excitation = if n < 218 { 0.5 } else { 0.0 };
//!     let out = string.process(excitation + 0.996 * feedback);
//!     feedback = damping.process(out);
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in `process`
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Owned state**: Each instance belongs to one voice; `&mut self` enforces it

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod coefficients;
pub mod delay_line;
pub mod error;
pub mod iir;
pub mod processor;

// Re-export main types at crate root
pub use coefficients::{
    BiquadCoefficients, Coefficients, bandpass, dc_blocker, delay_for_frequency, highpass,
    lowpass, notch, one_pole_lowpass, peaking_eq, two_point_average,
};
pub use delay_line::DelayLine;
pub use error::{CoefficientSet, DelayClamped, FilterError};
pub use iir::{IirFilter, validate_coefficients};
pub use processor::{Chain, ProcessorExt, SampleProcessor};
