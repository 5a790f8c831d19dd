//! Sequencer configuration.
//!
//! Configuration is plain data: it can be built in code with
//! [`SequencerConfig::builder`] or loaded from JSON. Unknown fields are
//! rejected; missing fields take their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tonegrid_model::interval::BuildOptions;
use tonegrid_model::pair::{AxisRange, BasePair};
use tonegrid_model::validation::SequenceBounds;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The base note lies outside the sound axis.
    #[error("base note {note} is outside the note range {range}")]
    BaseNoteOutOfRange { note: i32, range: AxisRange },

    /// The base pulse lies outside the time axis.
    #[error("base pulse {pulse} is outside the pulse range {range}")]
    BasePulseOutOfRange { pulse: i32, range: AxisRange },
}

/// Settings for one interval sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequencerConfig {
    /// Inclusive sound-axis bounds, serialized as `[min, max]`.
    pub note_range: AxisRange,
    /// Inclusive time-axis bounds, serialized as `[min, max]`.
    pub pulse_range: AxisRange,
    /// Anchor for the interval chain.
    pub base_pair: BasePair,
    /// Wrap notes built from intervals into `note_range`.
    pub wrap_around: bool,
    /// Allow overlapping pulse spans.
    pub polyphony: bool,
    /// Whether the drag handler starts enabled.
    pub drag_enabled: bool,
    /// Fill temporal gaps after each drag commit.
    pub fill_gaps_on_drag: bool,
    /// Editor-to-store debounce window in milliseconds.
    pub debounce_ms: u64,
    /// Lifetime of inline out-of-range notices in milliseconds.
    pub notice_ms: u64,
}

impl SequencerConfig {
    /// Default number of notes on the sound axis (one octave).
    pub const DEFAULT_NOTE_COUNT: usize = 12;

    /// Default number of pulses on the time axis.
    pub const DEFAULT_PULSE_COUNT: usize = 8;

    /// Default debounce window.
    pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

    /// Default notice lifetime.
    pub const DEFAULT_NOTICE_MS: u64 = 2000;

    /// Creates a new config builder starting from the defaults.
    pub fn builder() -> SequencerConfigBuilder {
        SequencerConfigBuilder::new()
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Checks that the base pair lies inside both axes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.note_range.contains(self.base_pair.note) {
            return Err(ConfigError::BaseNoteOutOfRange {
                note: self.base_pair.note,
                range: self.note_range,
            });
        }
        if !self.pulse_range.contains(self.base_pair.pulse) {
            return Err(ConfigError::BasePulseOutOfRange {
                pulse: self.base_pair.pulse,
                range: self.pulse_range,
            });
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }

    /// Bounds used when validating the live sequence.
    pub fn sequence_bounds(&self) -> SequenceBounds {
        SequenceBounds::new(self.note_range, self.pulse_range).with_wrap_around(self.wrap_around)
    }

    /// Options used when rebuilding pairs from intervals.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            wrap_around: self.wrap_around,
            note_range: Some(self.note_range),
        }
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            note_range: AxisRange::from_count(Self::DEFAULT_NOTE_COUNT),
            pulse_range: AxisRange::from_count(Self::DEFAULT_PULSE_COUNT),
            base_pair: BasePair::default(),
            wrap_around: false,
            polyphony: false,
            drag_enabled: true,
            fill_gaps_on_drag: true,
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
            notice_ms: Self::DEFAULT_NOTICE_MS,
        }
    }
}

/// Builder for [`SequencerConfig`].
#[derive(Debug, Clone, Default)]
pub struct SequencerConfigBuilder {
    config: SequencerConfig,
}

impl SequencerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sound-axis range.
    pub fn note_range(mut self, range: AxisRange) -> Self {
        self.config.note_range = range;
        self
    }

    /// Sets the time-axis range.
    pub fn pulse_range(mut self, range: AxisRange) -> Self {
        self.config.pulse_range = range;
        self
    }

    /// Sets the interval anchor.
    pub fn base_pair(mut self, base: BasePair) -> Self {
        self.config.base_pair = base;
        self
    }

    pub fn wrap_around(mut self, wrap_around: bool) -> Self {
        self.config.wrap_around = wrap_around;
        self
    }

    pub fn polyphony(mut self, polyphony: bool) -> Self {
        self.config.polyphony = polyphony;
        self
    }

    pub fn drag_enabled(mut self, enabled: bool) -> Self {
        self.config.drag_enabled = enabled;
        self
    }

    pub fn fill_gaps_on_drag(mut self, fill: bool) -> Self {
        self.config.fill_gaps_on_drag = fill;
        self
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.debounce_ms = ms;
        self
    }

    pub fn notice_ms(mut self, ms: u64) -> Self {
        self.config.notice_ms = ms;
        self
    }

    /// Validates and returns the config.
    pub fn build(self) -> Result<SequencerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
