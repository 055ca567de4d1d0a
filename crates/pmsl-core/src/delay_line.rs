//! Fractional delay line for waveguide and string models.
//!
//! A circular buffer that is written once and read once per sample. The read
//! pointer trails the write pointer by the configured delay, which may be any
//! real number in `[0, max_delay]`; non-integer delays are realized by linear
//! interpolation between two adjacent slots.
//!
//! # Index Arithmetic
//!
//! ```text
//! position    = write_index - delay          (wrapped into [0, capacity))
//! read_index  = trunc(position)
//! frac        = position - read_index
//! y[n]        = buf[read_index] * (1 - frac) + buf[read_index + 1] * frac
//! ```
//!
//! Both pointers then advance in lockstep, so the delay holds until the next
//! [`DelayLine::set_delay`]. For `delay = k + f` the steady-state output is
//! `(1 - f) * x[n-k] + f * x[n-k-1]`.
//!
//! # Capacity
//!
//! Each call writes before it reads, so a delay of zero returns the sample
//! just written. Reaching back `max_delay` samples therefore needs
//! `max_delay + 1` slots; the buffer is allocated with exactly that many and
//! never reallocates.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::error::DelayClamped;
use crate::processor::SampleProcessor;

/// Linearly interpolated fractional delay line.
///
/// # Example
///
/// ```rust
/// use pmsl_core::DelayLine;
///
/// let mut line = DelayLine::new(100);
/// assert!(line.set_delay(1.5).is_none());
///
/// let out: Vec<f32> = [1.0, 0.0, 0.0, 0.0].iter().map(|&x| line.process(x)).collect();
/// assert_eq!(out, vec![0.0, 0.5, 0.5, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    /// Circular sample storage, `max_delay + 1` slots.
    buffer: Vec<f32>,
    /// Next slot to write.
    write_index: usize,
    /// Integer part of the read position.
    read_index: usize,
    /// Weight of `buffer[read_index + 1]`.
    frac: f32,
    /// Weight of `buffer[read_index]`, always `1 - frac`.
    complement_frac: f32,
    /// Delay in effect, in samples.
    delay: f32,
}

impl DelayLine {
    /// Creates a delay line able to delay by up to `max_delay_samples`.
    ///
    /// The buffer holds `max_delay_samples + 1` zeroed slots. The initial
    /// delay is zero; call [`set_delay`](Self::set_delay) to change it.
    pub fn new(max_delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; max_delay_samples + 1],
            write_index: 0,
            read_index: 0,
            frac: 0.0,
            complement_frac: 1.0,
            delay: 0.0,
        }
    }

    /// Creates a delay line and applies an initial delay.
    ///
    /// An out-of-range `delay_samples` is clamped exactly as in
    /// [`set_delay`](Self::set_delay), but the clamp report is dropped; it
    /// only surfaces through the `tracing` feature. Use
    /// [`with_delay_checked`](Self::with_delay_checked) to receive it.
    pub fn with_delay(max_delay_samples: usize, delay_samples: f32) -> Self {
        Self::with_delay_checked(max_delay_samples, delay_samples).0
    }

    /// Creates a delay line, applies an initial delay, and returns the clamp
    /// report alongside it.
    ///
    /// ```rust
    /// use pmsl_core::DelayLine;
    ///
    /// let (line, clamped) = DelayLine::with_delay_checked(8, 100.0);
    /// assert_eq!(line.delay(), 8.0);
    /// assert_eq!(clamped.map(|c| c.requested), Some(100.0));
    /// ```
    pub fn with_delay_checked(
        max_delay_samples: usize,
        delay_samples: f32,
    ) -> (Self, Option<DelayClamped>) {
        let mut line = Self::new(max_delay_samples);
        let clamped = line.set_delay(delay_samples);
        (line, clamped)
    }

    /// Creates a delay line long enough for `max_seconds` at `sample_rate`.
    pub fn from_time(sample_rate: f32, max_seconds: f32) -> Self {
        Self::new(libm::ceilf(sample_rate * max_seconds) as usize)
    }

    /// Sets the delay in samples, relative to the current write position.
    ///
    /// Buffer contents are untouched, so already-written history is read
    /// at the new offset from the next [`process`](Self::process) on.
    ///
    /// A request outside `[0, max_delay]` (NaN included) is replaced by
    /// `max_delay`. The line keeps working; the clamp is returned, and
    /// logged at `warn` level when the `tracing` feature is enabled.
    pub fn set_delay(&mut self, delay_samples: f32) -> Option<DelayClamped> {
        let max = self.max_delay() as f32;
        let (delay, clamped) = if (0.0..=max).contains(&delay_samples) {
            (delay_samples, None)
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                requested = delay_samples,
                applied = max,
                "delay outside [0, max_delay], clamped to max_delay"
            );
            let warning = DelayClamped {
                requested: delay_samples,
                applied: max,
            };
            (max, Some(warning))
        };

        let capacity = self.buffer.len();
        let mut position = self.write_index as f64 - f64::from(delay);
        if position < 0.0 {
            position += capacity as f64;
        }

        let whole = position as usize;
        self.frac = (position - whole as f64) as f32;
        self.complement_frac = 1.0 - self.frac;
        // `position` can round up to exactly `capacity` for a tiny delay at index 0
        self.read_index = if whole >= capacity { 0 } else { whole };
        self.delay = delay;

        clamped
    }

    /// Writes one sample and returns the interpolated delayed sample.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let len = self.buffer.len();

        self.buffer[self.write_index] = sample;
        self.write_index = (self.write_index + 1) % len;

        let next = (self.read_index + 1) % len;
        let output =
            self.buffer[self.read_index] * self.complement_frac + self.buffer[next] * self.frac;
        self.read_index = next;

        output
    }

    /// Zeroes every slot. Pointers and delay are kept.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
    }

    /// Largest delay this line accepts, in samples.
    pub fn max_delay(&self) -> usize {
        self.buffer.len() - 1
    }

    /// Number of slots in the circular buffer (`max_delay + 1`).
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Delay currently in effect, in samples.
    pub fn delay(&self) -> f32 {
        self.delay
    }
}

impl SampleProcessor for DelayLine {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        DelayLine::process(self, input)
    }

    fn reset(&mut self) {
        self.clear();
    }
}
