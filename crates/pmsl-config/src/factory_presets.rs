//! Factory voices bundled with the library.
//!
//! These are embedded at compile time and always available without external
//! files. String voices are tuned for 48 kHz.

use crate::VoicePreset;

/// Internal identifiers of the factory presets.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "bypass",
    "slapback",
    "dub_echo",
    "nylon_a2",
    "steel_e4",
    "muted_e2",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("bypass", BYPASS_PRESET),
    ("slapback", SLAPBACK_PRESET),
    ("dub_echo", DUB_ECHO_PRESET),
    ("nylon_a2", NYLON_A2_PRESET),
    ("steel_e4", STEEL_E4_PRESET),
    ("muted_e2", MUTED_E2_PRESET),
];

const BYPASS_PRESET: &str = r#"
name = "Bypass"
description = "Zero delay, pass-through filter"
sample_rate = 48000

[delay]
max_delay_samples = 1
delay_samples = 0.0
"#;

const SLAPBACK_PRESET: &str = r#"
name = "Slapback"
description = "Single 120 ms repeat at reduced level"
sample_rate = 48000

[delay]
max_delay_samples = 9600
delay_samples = 5760.0

[filter]
feedforward = [0.6]
feedback = [1.0]
"#;

const DUB_ECHO_PRESET: &str = r#"
name = "Dub Echo"
description = "Dotted-eighth echo at 120 bpm, each repeat darker than the last"
sample_rate = 48000

[delay]
max_delay_samples = 24000
delay_samples = 18000.0

[filter]
feedforward = [0.2]
feedback = [1.0, -0.8]

[topology]
kind = "loop"
gain = 0.55
"#;

// Plucked strings: loop delay is the period less the averaging filter's
// half sample and the feedback path's one sample.

const NYLON_A2_PRESET: &str = r#"
name = "Nylon A2"
description = "Karplus-Strong string at 110 Hz"
sample_rate = 48000

[delay]
max_delay_samples = 437
delay_samples = 434.86

[filter]
feedforward = [0.5, 0.5]
feedback = [1.0]

[topology]
kind = "loop"
gain = 0.996
"#;

const STEEL_E4_PRESET: &str = r#"
name = "Steel E4"
description = "Bright Karplus-Strong string at 329.63 Hz"
sample_rate = 48000

[delay]
max_delay_samples = 146
delay_samples = 144.12

[filter]
feedforward = [0.5, 0.5]
feedback = [1.0]

[topology]
kind = "loop"
gain = 0.999
"#;

// The three-tap smoother delays by a full sample.
const MUTED_E2_PRESET: &str = r#"
name = "Muted E2"
description = "Palm-muted low string at 82.41 Hz"
sample_rate = 48000

[delay]
max_delay_samples = 583
delay_samples = 580.45

[filter]
feedforward = [0.25, 0.5, 0.25]
feedback = [1.0]

[topology]
kind = "loop"
gain = 0.98
"#;

/// All factory presets.
///
/// # Example
///
/// ```rust
/// use pmsl_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<VoicePreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| match VoicePreset::from_toml(toml) {
            Ok(preset) => Some(preset),
            Err(error) => {
                tracing::warn!(id = *id, %error, "skipping unparsable factory preset");
                None
            }
        })
        .collect()
}

/// Get a factory preset by internal identifier or display name.
///
/// The match is case-insensitive.
///
/// ```rust
/// use pmsl_config::get_factory_preset;
///
/// let preset = get_factory_preset("Nylon A2").unwrap();
/// assert_eq!(preset.delay.max_delay_samples, 437);
/// ```
pub fn get_factory_preset(name: &str) -> Option<VoicePreset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.to_lowercase() == name_lower)
    {
        return VoicePreset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Internal identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` refers to a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
