//! Runnable voices built from presets.

use pmsl_core::{DelayLine, IirFilter, SampleProcessor};

use crate::error::ConfigError;
use crate::preset::{DelayConfig, FilterConfig, Topology, VoicePreset};
use crate::validation::validate_preset;

/// One delay line and one filter, wired per the preset's [`Topology`].
///
/// # Example
///
/// ```rust
/// use pmsl_config::{Voice, VoicePreset};
/// use pmsl_core::SampleProcessor;
///
/// let preset = VoicePreset::new("slap", 64).with_delay(3.0).with_filter([1.0, 0.5], [1.0]);
/// let mut voice = Voice::from_preset(&preset).unwrap();
///
/// let out: Vec<f32> = [1.0, 0.0, 0.0, 0.0, 0.0].iter().map(|&x| voice.process(x)).collect();
/// assert_eq!(out, vec![0.0, 0.0, 0.0, 1.0, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct Voice {
    name: String,
    delay: DelayLine,
    filter: IirFilter,
    topology: Topology,
    /// Last filter output, fed back in loop topology.
    feedback: f32,
}

impl Voice {
    /// Validates `preset` and builds the voice it describes.
    pub fn from_preset(preset: &VoicePreset) -> Result<Self, ConfigError> {
        validate_preset(preset)?;

        let DelayConfig {
            max_delay_samples,
            delay_samples,
        } = preset.delay;
        let FilterConfig {
            feedforward,
            feedback,
        } = &preset.filter;

        let delay = DelayLine::with_delay(max_delay_samples, delay_samples);
        let filter = IirFilter::with_coefficients(feedforward, feedback);

        tracing::debug!(
            name = %preset.name,
            delay = delay_samples,
            order = feedback.len().max(feedforward.len()).saturating_sub(1),
            topology = ?preset.topology,
            "built voice"
        );

        Ok(Self {
            name: preset.name.clone(),
            delay,
            filter,
            topology: preset.topology,
            feedback: 0.0,
        })
    }

    /// Name of the preset this voice came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wiring between delay and filter.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// The voice's delay line.
    pub fn delay_line(&self) -> &DelayLine {
        &self.delay
    }

    /// Mutable access to the delay line, e.g. to retune with
    /// [`DelayLine::set_delay`].
    pub fn delay_line_mut(&mut self) -> &mut DelayLine {
        &mut self.delay
    }

    /// The voice's filter.
    pub fn filter(&self) -> &IirFilter {
        &self.filter
    }

    /// Mutable access to the filter.
    pub fn filter_mut(&mut self) -> &mut IirFilter {
        &mut self.filter
    }
}

impl SampleProcessor for Voice {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        match self.topology {
            Topology::Series => self.filter.process(self.delay.process(input)),
            Topology::Loop { gain } => {
                let out = self.delay.process(input + gain * self.feedback);
                self.feedback = self.filter.process(out);
                out
            }
        }
    }

    fn reset(&mut self) {
        self.delay.reset();
        self.filter.reset();
        self.feedback = 0.0;
    }
}
