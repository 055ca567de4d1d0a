//! Voice preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use pmsl_core::{delay_for_frequency, two_point_average};

use crate::error::ConfigError;

/// How the delay line and filter of a voice are wired.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topology {
    /// `filter(delay(x))`: a plain delayed, filtered copy of the input.
    #[default]
    Series,
    /// Waveguide loop: the filtered delay output is fed back into the line.
    ///
    /// `y[n] = delay(x[n] + gain * filter(y)[n-1])`
    Loop {
        /// Loop gain applied to the filtered feedback, `|gain| <= 1`.
        gain: f32,
    },
}

/// Delay line settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelayConfig {
    /// Capacity of the line; the buffer holds one slot more than this.
    pub max_delay_samples: usize,
    /// Delay applied when the voice is built, in samples.
    #[serde(default)]
    pub delay_samples: f32,
}

/// Filter coefficients, stored exactly as handed to
/// [`IirFilter::set_filter`](pmsl_core::IirFilter::set_filter).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Feedforward (B) coefficients.
    pub feedforward: Vec<f32>,
    /// Feedback (A) coefficients, normalizer first.
    pub feedback: Vec<f32>,
}

impl Default for FilterConfig {
    /// Pass-through: `B = [1]`, `A = [1]`.
    fn default() -> Self {
        Self {
            feedforward: vec![1.0],
            feedback: vec![1.0],
        }
    }
}

/// A delay line and filter pair, described in TOML.
///
/// # TOML Format
///
/// ```toml
/// name = "Nylon A2"
/// description = "Karplus-Strong string"
/// sample_rate = 48000
///
/// [delay]
/// max_delay_samples = 437
/// delay_samples = 434.95
///
/// [filter]
/// feedforward = [0.5, 0.5]
/// feedback = [1.0]
///
/// [topology]
/// kind = "loop"
/// gain = 0.996
/// ```
///
/// `filter` defaults to pass-through and `topology` to series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoicePreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate the delay and coefficients were computed for.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Delay line settings.
    pub delay: DelayConfig,

    /// Filter coefficients.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Wiring between delay and filter.
    #[serde(default)]
    pub topology: Topology,
}

fn default_sample_rate() -> u32 {
    48000
}

impl VoicePreset {
    /// Create a series voice with a pass-through filter and zero delay.
    pub fn new(name: impl Into<String>, max_delay_samples: usize) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            delay: DelayConfig {
                max_delay_samples,
                delay_samples: 0.0,
            },
            filter: FilterConfig::default(),
            topology: Topology::Series,
        }
    }

    /// Create a Karplus-Strong string tuned to `frequency`.
    ///
    /// The loop uses a two-point average as its filter; the delay is
    /// shortened by the 1.5 samples the filter and feedback path add.
    pub fn plucked_string(name: impl Into<String>, frequency: f32, sample_rate: u32) -> Self {
        let period = delay_for_frequency(frequency, sample_rate as f32);
        let average = two_point_average();
        Self {
            name: name.into(),
            description: Some(format!("Karplus-Strong string at {frequency} Hz")),
            sample_rate,
            delay: DelayConfig {
                max_delay_samples: period.ceil() as usize,
                delay_samples: (period - 1.5).max(0.0),
            },
            filter: FilterConfig {
                feedforward: average.b.to_vec(),
                feedback: average.a.to_vec(),
            },
            topology: Topology::Loop { gain: 0.996 },
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the delay in samples.
    pub fn with_delay(mut self, delay_samples: f32) -> Self {
        self.delay.delay_samples = delay_samples;
        self
    }

    /// Set the filter coefficients.
    pub fn with_filter(
        mut self,
        feedforward: impl Into<Vec<f32>>,
        feedback: impl Into<Vec<f32>>,
    ) -> Self {
        self.filter = FilterConfig {
            feedforward: feedforward.into(),
            feedback: feedback.into(),
        };
        self
    }

    /// Set the topology.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: VoicePreset = toml::from_str(&content)?;
        tracing::debug!(name = %preset.name, path = %path.display(), "loaded voice preset");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(name = %self.name, path = %path.display(), "saved voice preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
