//! Coefficient design for [`IirFilter`].
//!
//! The filter itself takes raw `B`/`A` arrays. These helpers compute the
//! arrays a physical model typically needs from sample-rate-relative
//! parameters:
//!
//! | Helper | Order | Typical use |
//! |--------|-------|-------------|
//! | [`lowpass`], [`highpass`], [`bandpass`], [`notch`], [`peaking_eq`] | 2 | Body resonances, tone shaping (RBJ Audio EQ Cookbook) |
//! | [`one_pole_lowpass`] | 1 | Frequency-dependent string loss |
//! | [`dc_blocker`] | 1 | Keeping feedback loops centred |
//! | [`two_point_average`] | FIR | Karplus-Strong loop filter |
//!
//! Biquad coefficients are returned un-normalized (`a[0]` is not 1);
//! [`IirFilter`] divides by `a[0]` itself.

use core::f32::consts::{PI, TAU};
use libm::{cosf, expf, powf, sinf};

use crate::iir::IirFilter;

/// A fixed-size feedforward/feedback coefficient pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients<const NB: usize, const NA: usize> {
    /// Feedforward (B) coefficients.
    pub b: [f32; NB],
    /// Feedback (A) coefficients, `a[0]` first.
    pub a: [f32; NA],
}

/// Second-order section: `B = [b0, b1, b2]`, `A = [a0, a1, a2]`.
pub type BiquadCoefficients = Coefficients<3, 3>;

impl<const NB: usize, const NA: usize> Coefficients<NB, NA> {
    /// Loads these coefficients into `filter`, zeroing its history.
    pub fn apply(&self, filter: &mut IirFilter) {
        filter.set_filter(&self.b, &self.a);
    }

    /// Builds a new filter with these coefficients.
    pub fn to_filter(&self) -> IirFilter {
        IirFilter::with_coefficients(&self.b, &self.a)
    }
}

/// Shared RBJ intermediate terms: `(cos ω, α)`.
fn rbj_terms(frequency: f32, q: f32, sample_rate: f32) -> (f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    (cosf(omega), sinf(omega) / (2.0 * q))
}

/// Low-pass biquad (RBJ cookbook).
///
/// `q` of 0.707 gives a Butterworth response.
pub fn lowpass(frequency: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let (cos_omega, alpha) = rbj_terms(frequency, q, sample_rate);
    let b1 = 1.0 - cos_omega;
    Coefficients {
        b: [b1 / 2.0, b1, b1 / 2.0],
        a: [1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha],
    }
}

/// High-pass biquad (RBJ cookbook).
pub fn highpass(frequency: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let (cos_omega, alpha) = rbj_terms(frequency, q, sample_rate);
    let b1 = -(1.0 + cos_omega);
    Coefficients {
        b: [-b1 / 2.0, b1, -b1 / 2.0],
        a: [1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha],
    }
}

/// Band-pass biquad with constant 0 dB peak gain (RBJ cookbook).
pub fn bandpass(frequency: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let (cos_omega, alpha) = rbj_terms(frequency, q, sample_rate);
    Coefficients {
        b: [alpha, 0.0, -alpha],
        a: [1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha],
    }
}

/// Notch (band-reject) biquad (RBJ cookbook).
pub fn notch(frequency: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let (cos_omega, alpha) = rbj_terms(frequency, q, sample_rate);
    Coefficients {
        b: [1.0, -2.0 * cos_omega, 1.0],
        a: [1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha],
    }
}

/// Peaking EQ biquad (RBJ cookbook). Positive `gain_db` boosts, negative cuts.
pub fn peaking_eq(frequency: f32, q: f32, gain_db: f32, sample_rate: f32) -> BiquadCoefficients {
    let a = powf(10.0, gain_db / 40.0);
    let (cos_omega, alpha) = rbj_terms(frequency, q, sample_rate);
    Coefficients {
        b: [1.0 + alpha * a, -2.0 * cos_omega, 1.0 - alpha * a],
        a: [1.0 + alpha / a, -2.0 * cos_omega, 1.0 - alpha / a],
    }
}

/// One-pole low-pass with unity DC gain.
///
/// ```text
/// y[n] = (1 - p) * x[n] + p * y[n-1],   p = exp(-2π f / fs)
/// ```
pub fn one_pole_lowpass(frequency: f32, sample_rate: f32) -> Coefficients<1, 2> {
    let pole = expf(-TAU * frequency / sample_rate);
    Coefficients {
        b: [1.0 - pole],
        a: [1.0, -pole],
    }
}

/// DC blocker: `H(z) = (1 - z^-1) / (1 - R z^-1)`.
///
/// `r` close to 1.0 (0.995 at 48 kHz puts the corner near 7.6 Hz).
pub fn dc_blocker(r: f32) -> Coefficients<2, 2> {
    Coefficients {
        b: [1.0, -1.0],
        a: [1.0, -r],
    }
}

/// Two-point moving average, the classic Karplus-Strong loop filter.
///
/// Adds half a sample of delay to any loop it sits in.
pub fn two_point_average() -> Coefficients<2, 1> {
    Coefficients {
        b: [0.5, 0.5],
        a: [1.0],
    }
}

/// Loop length in samples for a resonator tuned to `frequency`.
pub fn delay_for_frequency(frequency: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    fn settle(filter: &mut IirFilter, input: f32, samples: usize) -> f32 {
        let mut out = 0.0;
        for _ in 0..samples {
            out = filter.process(input);
        }
        out
    }

    #[test]
    fn test_lowpass_passes_dc() {
        let mut filter = lowpass(1000.0, 0.707, SR).to_filter();
        let out = settle(&mut filter, 1.0, 2000);
        assert!((out - 1.0).abs() < 0.01, "got {out}");
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut filter = highpass(1000.0, 0.707, SR).to_filter();
        let out = settle(&mut filter, 1.0, 2000);
        assert!(out.abs() < 0.01, "got {out}");
    }

    #[test]
    fn test_biquad_coefficients_finite() {
        for c in [
            lowpass(440.0, 0.5, SR),
            highpass(440.0, 2.0, SR),
            bandpass(440.0, 1.0, SR),
            notch(440.0, 1.0, SR),
            peaking_eq(440.0, 1.0, 6.0, SR),
            peaking_eq(440.0, 1.0, -6.0, SR),
        ] {
            assert!(c.b.iter().chain(&c.a).all(|x| x.is_finite()), "{c:?}");
            assert!(c.a[0] > 0.0);
        }
    }

    #[test]
    fn test_peaking_zero_gain_is_flat() {
        let c = peaking_eq(1000.0, 1.0, 0.0, SR);
        assert_eq!(c.b, c.a);
    }

    #[test]
    fn test_one_pole_unity_dc_gain() {
        let c = one_pole_lowpass(500.0, SR);
        assert!((c.b[0] - (1.0 + c.a[1])).abs() < 1e-7);

        let mut filter = c.to_filter();
        let out = settle(&mut filter, 1.0, 4800);
        assert!((out - 1.0).abs() < 1e-3, "got {out}");
    }

    #[test]
    fn test_dc_blocker_removes_offset() {
        let mut filter = dc_blocker(0.995).to_filter();
        let out = settle(&mut filter, 0.5, 10000);
        assert!(out.abs() < 1e-3, "got {out}");
    }

    #[test]
    fn test_apply_replaces_configuration() {
        let mut filter = IirFilter::pass_through_filter();
        two_point_average().apply(&mut filter);
        assert_eq!(filter.feedforward(), &[0.5, 0.5]);
        assert_eq!(filter.feedback(), &[1.0]);
        assert_eq!(filter.process(1.0), 0.5);
        assert_eq!(filter.process(1.0), 1.0);
    }

    #[test]
    fn test_delay_for_frequency() {
        assert_eq!(delay_for_frequency(440.0, 44000.0), 100.0);
    }
}
