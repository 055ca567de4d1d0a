//! Arbitrary-order IIR filter driven by its difference equation.
//!
//! Where a biquad fixes the order at two, [`IirFilter`] takes whatever
//! rational transfer function the caller hands it:
//!
//! ```text
//! y[n] = 1/a0 * ( b0*x[n] + b1*x[n-1] + ... + b_nb*x[n-nb]
//!                         - a1*y[n-1] - ... - a_na*y[n-na] )
//! ```
//!
//! Every term is divided by `a0` as it is accumulated, so coefficients are
//! stored exactly as given and [`IirFilter::feedforward`] /
//! [`IirFilter::feedback`] read them back unchanged.
//!
//! # History
//!
//! Input and output history live in ring buffers of length `len(B)` and
//! `len(A)`. Each sample moves the ring head back one slot instead of
//! shifting the whole array; the input-to-output mapping is the same as a
//! shift register.
//!
//! # Clearing
//!
//! [`IirFilter::clear`] zeroes the *coefficients*, not the history, leaving
//! a degenerate filter whose next output is NaN until it is reconfigured.
//! To silence the history while keeping the response, use
//! [`SampleProcessor::reset`].

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

use crate::error::{CoefficientSet, FilterError};
use crate::processor::SampleProcessor;

/// Fixed-length sample history stored as a ring, newest first.
#[derive(Debug, Clone, Default)]
struct History {
    samples: Vec<f32>,
    /// Slot holding the newest sample.
    head: usize,
}

impl History {
    fn resize(&mut self, len: usize) {
        self.samples.clear();
        self.samples.resize(len, 0.0);
        self.head = 0;
    }

    /// Inserts `value` as the newest sample, dropping the oldest.
    #[inline]
    fn push(&mut self, value: f32) {
        if self.samples.is_empty() {
            return;
        }
        self.head = match self.head {
            0 => self.samples.len() - 1,
            h => h - 1,
        };
        self.samples[self.head] = value;
    }

    /// Samples from newest to oldest.
    #[inline]
    fn iter(&self) -> impl Iterator<Item = &f32> {
        let (older, newer) = self.samples.split_at(self.head);
        newer.iter().chain(older)
    }

    fn zero(&mut self) {
        self.samples.fill(0.0);
        self.head = 0;
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Direct-form IIR filter with caller-supplied coefficients.
///
/// # Example
///
/// ```rust
/// use pmsl_core::IirFilter;
///
/// // One-pole recursion: y[n] = x[n] + 0.5 * y[n-1]
/// let mut filter = IirFilter::with_coefficients(&[1.0], &[1.0, -0.5]);
///
/// let out: Vec<f32> = [1.0, 0.0, 0.0, 0.0].iter().map(|&x| filter.process(x)).collect();
/// assert_eq!(out, vec![1.0, 0.5, 0.25, 0.125]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IirFilter {
    /// B coefficients; `feedforward[0]` weights `x[n]`.
    feedforward: Vec<f32>,
    /// A coefficients; `feedback[0]` normalizes the equation.
    feedback: Vec<f32>,
    /// `x[n], x[n-1], ...`, one slot per feedforward coefficient.
    input: History,
    /// `y[n], y[n-1], ...`, one slot per feedback coefficient.
    output: History,
}

impl IirFilter {
    /// Creates an unconfigured filter.
    ///
    /// Until coefficients are assigned, [`process`](Self::process) returns
    /// `0.0` for every input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an identity filter (`B = [1]`, `A = [1]`).
    pub fn pass_through_filter() -> Self {
        let mut filter = Self::new();
        filter.pass_through();
        filter
    }

    /// Creates a filter with the given coefficients; see
    /// [`set_filter`](Self::set_filter).
    pub fn with_coefficients(feedforward: &[f32], feedback: &[f32]) -> Self {
        let mut filter = Self::new();
        filter.set_filter(feedforward, feedback);
        filter
    }

    /// Configures the filter as identity: output equals input.
    pub fn pass_through(&mut self) {
        self.set_filter(&[1.0], &[1.0]);
    }

    /// Replaces both coefficient sets and zeroes the history.
    ///
    /// History lengths follow the new coefficient lengths. Nothing is
    /// validated: an empty feedback set makes the filter output silence, and
    /// `feedback[0] == 0.0` makes it output NaN or infinity. Use
    /// [`try_set_filter`](Self::try_set_filter) to reject those up front.
    pub fn set_filter(&mut self, feedforward: &[f32], feedback: &[f32]) {
        self.feedforward.clear();
        self.feedforward.extend_from_slice(feedforward);
        self.feedback.clear();
        self.feedback.extend_from_slice(feedback);

        self.input.resize(feedforward.len());
        self.output.resize(feedback.len());
    }

    /// Validates, then applies, a coefficient set.
    ///
    /// On error the filter keeps its previous configuration and history.
    pub fn try_set_filter(
        &mut self,
        feedforward: &[f32],
        feedback: &[f32],
    ) -> Result<(), FilterError> {
        validate_coefficients(feedforward, feedback)?;
        self.set_filter(feedforward, feedback);
        Ok(())
    }

    /// Zeroes every feedforward and feedback coefficient, keeping lengths.
    ///
    /// History is left as is. With `a0` now zero the filter is degenerate and
    /// produces NaN until [`set_filter`](Self::set_filter) or
    /// [`pass_through`](Self::pass_through) is called again.
    pub fn clear(&mut self) {
        self.feedforward.fill(0.0);
        self.feedback.fill(0.0);
    }

    /// Filters one sample and returns `y[n]`.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let Some((&a0, feedback)) = self.feedback.split_first() else {
            return 0.0;
        };

        self.input.push(sample);

        let mut acc = 0.0;
        for (&b, &x) in self.feedforward.iter().zip(self.input.iter()) {
            acc += (b / a0) * x;
        }
        // output history still starts at y[n-1] here
        for (&a, &y) in feedback.iter().zip(self.output.iter()) {
            acc -= (a / a0) * y;
        }

        self.output.push(acc);
        acc
    }

    /// Feedforward (B) coefficients as currently stored.
    pub fn feedforward(&self) -> &[f32] {
        &self.feedforward
    }

    /// Feedback (A) coefficients as currently stored.
    pub fn feedback(&self) -> &[f32] {
        &self.feedback
    }

    /// True if no feedback coefficients are set.
    pub fn is_empty(&self) -> bool {
        self.feedback.is_empty()
    }
}

impl SampleProcessor for IirFilter {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        IirFilter::process(self, input)
    }

    /// Zeroes input and output history; coefficients are kept.
    fn reset(&mut self) {
        self.input.zero();
        self.output.zero();
    }
}

/// Checks a coefficient pair for the conditions that make the difference
/// equation ill-defined.
pub fn validate_coefficients(feedforward: &[f32], feedback: &[f32]) -> Result<(), FilterError> {
    if feedforward.is_empty() {
        return Err(FilterError::Empty(CoefficientSet::Feedforward));
    }
    if feedback.is_empty() {
        return Err(FilterError::Empty(CoefficientSet::Feedback));
    }

    let sets = [
        (CoefficientSet::Feedforward, feedforward),
        (CoefficientSet::Feedback, feedback),
    ];
    for (set, coefficients) in sets {
        if let Some((index, &value)) = coefficients
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite())
        {
            return Err(FilterError::NonFinite { set, index, value });
        }
    }

    if feedback[0] == 0.0 {
        return Err(FilterError::ZeroNormalization);
    }
    Ok(())
}
