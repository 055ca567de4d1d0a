//! Plucked string demo: a Karplus-Strong loop built from a fractional delay
//! line and a loop filter, with a body resonance in series.
//!
//! Run with: cargo run -p pmsl-core --example plucked_string --features tracing
//!
//! Set `RUST_LOG=warn` to see the clamped-delay warning emitted when the
//! lowest note does not fit the line.

use pmsl_core::{
    DelayLine, IirFilter, ProcessorExt, SampleProcessor, bandpass, delay_for_frequency,
    one_pole_lowpass,
};
use tracing_subscriber::EnvFilter;

const SAMPLE_RATE: f32 = 48000.0;
/// Longest loop the string supports, in samples (~50 Hz).
const MAX_LOOP: usize = 960;

struct PluckedString {
    line: DelayLine,
    loss: IirFilter,
    feedback: f32,
    gain: f32,
}

impl PluckedString {
    fn new() -> Self {
        Self {
            line: DelayLine::new(MAX_LOOP),
            loss: one_pole_lowpass(6000.0, SAMPLE_RATE).to_filter(),
            feedback: 0.0,
            gain: 0.995,
        }
    }

    fn tune(&mut self, frequency: f32) {
        // the feedback path adds one sample of its own
        let delay = delay_for_frequency(frequency, SAMPLE_RATE) - 1.0;
        if let Some(warning) = self.line.set_delay(delay) {
            println!("  note {frequency:.1} Hz out of range: {warning}");
        }
    }
}

impl SampleProcessor for PluckedString {
    fn process(&mut self, input: f32) -> f32 {
        let out = self.line.process(input + self.gain * self.feedback);
        self.feedback = self.loss.process(out);
        out
    }

    fn reset(&mut self) {
        self.line.reset();
        self.loss.reset();
        self.feedback = 0.0;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let body = bandpass(180.0, 2.0, SAMPLE_RATE).to_filter();
    let mut instrument = PluckedString::new().chain(body);

    println!("=== Plucked string at {SAMPLE_RATE} Hz ===\n");
    println!("{:>10} {:>12} {:>12} {:>10}", "Note (Hz)", "Loop", "Peak", "RMS");
    println!("{:->10} {:->12} {:->12} {:->10}", "", "", "", "");

    for frequency in [329.63, 246.94, 196.0, 146.83, 110.0, 82.41, 30.0] {
        instrument.reset();
        instrument.first_mut().tune(frequency);
        let loop_len = instrument.first().line.delay();

        // Excite with a short decaying noise burst
        let mut seed = 0x1234_5678u32;
        let mut block = vec![0.0f32; SAMPLE_RATE as usize / 2];
        for (n, sample) in block.iter_mut().take(loop_len as usize).enumerate() {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let white = (seed >> 8) as f32 / (1u32 << 23) as f32 - 1.0;
            *sample = white * (1.0 - n as f32 / loop_len);
        }
        instrument.process_block_inplace(&mut block);

        let peak = block.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        let rms = (block.iter().map(|s| s * s).sum::<f32>() / block.len() as f32).sqrt();
        println!("{frequency:>10.2} {loop_len:>12.2} {peak:>12.4} {rms:>10.4}");
    }
}
