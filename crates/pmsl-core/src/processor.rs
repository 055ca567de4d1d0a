//! The per-sample processing trait shared by every primitive.
//!
//! [`SampleProcessor`] is what an audio graph or instrument model drives once
//! per sample period. Both [`DelayLine`](crate::DelayLine) and
//! [`IirFilter`](crate::IirFilter) implement it, so a caller can treat them
//! uniformly or compose them with [`ProcessorExt::chain`].
//!
//! ## Design Decisions
//!
//! - **Mono, `f32`**: one input sample in, one output sample out.
//! - **Object-safe**: `Box<dyn SampleProcessor>` works for runtime-built
//!   models; generics are preferred on hot paths.
//! - **No allocations**: every method may be called from a real-time thread.
//! - **Strict ordering**: implementations are stateful, so `process` must be
//!   called exactly once per sample, in time order.

/// A stateful, sample-by-sample signal processor.
///
/// # Example
///
/// ```rust
/// use pmsl_core::SampleProcessor;
///
/// struct Gain(f32);
///
/// impl SampleProcessor for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.0
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain(0.5);
/// assert_eq!(gain.process(1.0), 0.5);
/// ```
pub trait SampleProcessor {
    /// Process a single sample, advancing internal state by one step.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls [`process`](Self::process) for each
    /// sample in order.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zero all signal history while keeping the configuration.
    fn reset(&mut self);
}

/// Extension trait for composing processors in series.
pub trait ProcessorExt: SampleProcessor + Sized {
    /// Feed the output of `self` into `next`.
    ///
    /// # Example
    /// ```rust
    /// use pmsl_core::{DelayLine, IirFilter, ProcessorExt, SampleProcessor};
    ///
    /// let mut string = DelayLine::with_delay(64, 10.0).chain(IirFilter::pass_through_filter());
    /// let _ = string.process(1.0);
    /// ```
    fn chain<P: SampleProcessor>(self, next: P) -> Chain<Self, P> {
        Chain {
            first: self,
            second: next,
        }
    }
}

impl<T: SampleProcessor> ProcessorExt for T {}

/// Two processors in series, created by [`ProcessorExt::chain`].
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: SampleProcessor, B: SampleProcessor> SampleProcessor for Chain<A, B> {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let mid = self.first.process(input);
        self.second.process(mid)
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        self.first.process_block(input, output);
        self.second.process_block_inplace(output);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }
}

impl<A, B> Chain<A, B> {
    /// Reference to the first processor.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Mutable reference to the first processor.
    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    /// Reference to the second processor.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Mutable reference to the second processor.
    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }

    /// Split the chain back into its parts.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}
