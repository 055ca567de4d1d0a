//! Property-based tests for pmsl-core primitives.
//!
//! Checks delay identity, interpolation weights, clamping, and filter
//! recursion against a direct evaluation of the difference equation, using
//! proptest for randomized delays, coefficients, and input.

use proptest::prelude::*;
use pmsl_core::{DelayLine, IirFilter, SampleProcessor};

fn run(processor: &mut impl SampleProcessor, input: &[f32]) -> Vec<f32> {
    input.iter().map(|&x| processor.process(x)).collect()
}

/// Direct evaluation of y[n] over the whole signal, zero initial state.
fn difference_equation(b: &[f32], a: &[f32], x: &[f32]) -> Vec<f32> {
    let mut y = vec![0.0f32; x.len()];
    for n in 0..x.len() {
        let mut acc = 0.0;
        for (k, &bk) in b.iter().enumerate().take(n + 1) {
            acc += bk / a[0] * x[n - k];
        }
        for (k, &ak) in a.iter().enumerate().skip(1).take(n) {
            acc -= ak / a[0] * y[n - k];
        }
        y[n] = acc;
    }
    y
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// An integer delay `d` reproduces the input `d` samples later; the
    /// first `d` outputs come from the zeroed buffer.
    #[test]
    fn integer_delay_identity(
        delay in 0usize..48,
        headroom in 0usize..16,
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..=256),
    ) {
        let mut line = DelayLine::with_delay(delay + headroom, delay as f32);
        let output = run(&mut line, &input);

        for (n, &y) in output.iter().enumerate() {
            let expected = if n >= delay { input[n - delay] } else { 0.0 };
            prop_assert_eq!(y, expected, "delay={} n={}", delay, n);
        }
    }

    /// For `d = k + f`, steady-state output is `(1-f) x[n-k] + f x[n-k-1]`.
    #[test]
    fn fractional_delay_interpolation(
        whole in 0usize..32,
        frac in 0.01f32..0.99f32,
        input in prop::collection::vec(-1.0f32..=1.0f32, 64..=256),
    ) {
        let delay = whole as f32 + frac;
        let mut line = DelayLine::with_delay(whole + 2, delay);
        let output = run(&mut line, &input);

        for n in (whole + 1)..input.len() {
            let expected = (1.0 - frac) * input[n - whole] + frac * input[n - whole - 1];
            prop_assert!(
                (output[n] - expected).abs() < 1e-5,
                "delay={} n={}: expected {}, got {}", delay, n, expected, output[n]
            );
        }
    }

    /// Requests beyond the maximum behave exactly like the maximum and are
    /// reported.
    #[test]
    fn over_range_delay_clamps(
        max in 0usize..64,
        excess in 0.001f32..1000.0f32,
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..=200),
    ) {
        let mut clamped = DelayLine::new(max);
        let mut reference = DelayLine::new(max);

        let warning = clamped.set_delay(max as f32 + excess);
        prop_assert!(warning.is_some());
        prop_assert!(reference.set_delay(max as f32).is_none());

        prop_assert_eq!(run(&mut clamped, &input), run(&mut reference, &input));
    }

    /// A line of maximum delay M has M+1 slots and survives any number of
    /// writes at every delay it accepts.
    #[test]
    fn capacity_covers_max_delay(
        max in 0usize..128,
        delay_fraction in 0.0f32..=1.0f32,
    ) {
        let mut line = DelayLine::with_delay(max, max as f32 * delay_fraction);
        prop_assert_eq!(line.capacity(), max + 1);

        for i in 0..(2 * (max + 1)) {
            prop_assert!(line.process(i as f32).is_finite());
        }
    }

    /// Pass-through reproduces any input exactly.
    #[test]
    fn pass_through_identity(
        input in prop::collection::vec(-10.0f32..=10.0f32, 1..=256),
    ) {
        let mut filter = IirFilter::pass_through_filter();
        prop_assert_eq!(run(&mut filter, &input), input);
    }

    /// FIR filters (single feedback coefficient) match direct evaluation.
    #[test]
    fn fir_matches_difference_equation(
        b in prop::collection::vec(-1.0f32..=1.0f32, 1..=12),
        a0 in 0.5f32..2.0f32,
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..=128),
    ) {
        let a = [a0];
        let mut filter = IirFilter::with_coefficients(&b, &a);
        let output = run(&mut filter, &input);
        let expected = difference_equation(&b, &a, &input);

        for (n, (got, want)) in output.iter().zip(&expected).enumerate() {
            prop_assert!((got - want).abs() < 1e-4, "n={}: {} vs {}", n, got, want);
        }
    }

    /// Stable one- and two-pole recursions match direct evaluation.
    #[test]
    fn recursion_matches_difference_equation(
        b in prop::collection::vec(-1.0f32..=1.0f32, 1..=4),
        pole_a in -0.9f32..0.9f32,
        pole_b in -0.9f32..0.9f32,
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..=128),
    ) {
        // (1 - p z^-1)(1 - q z^-1) keeps both poles inside the unit circle.
        let a = [1.0, -(pole_a + pole_b), pole_a * pole_b];
        let mut filter = IirFilter::with_coefficients(&b, &a);
        let output = run(&mut filter, &input);
        let expected = difference_equation(&b, &a, &input);

        for (n, (got, want)) in output.iter().zip(&expected).enumerate() {
            prop_assert!((got - want).abs() < 1e-3, "n={}: {} vs {}", n, got, want);
        }
    }

    /// Reset leaves a filter indistinguishable from a freshly configured one.
    #[test]
    fn reset_matches_fresh_filter(
        pole in -0.95f32..0.95f32,
        warmup in prop::collection::vec(-1.0f32..=1.0f32, 1..=64),
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..=64),
    ) {
        let mut used = IirFilter::with_coefficients(&[1.0, 0.3], &[1.0, -pole]);
        run(&mut used, &warmup);
        used.reset();

        let mut fresh = IirFilter::with_coefficients(&[1.0, 0.3], &[1.0, -pole]);
        prop_assert_eq!(run(&mut used, &input), run(&mut fresh, &input));
    }
}
