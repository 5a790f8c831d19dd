//! Core sequence types: pairs, intervals, base pairs, and axis ranges.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Default temporal interval when none is given.
pub const DEFAULT_TEMPORAL_INTERVAL: NonZeroU32 = NonZeroU32::MIN;

fn default_temporal_interval() -> NonZeroU32 {
    DEFAULT_TEMPORAL_INTERVAL
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// An absolute event on the note/pulse grid.
///
/// A pair starts at `pulse` on axis value `note` and lasts `temporal_interval`
/// pulses. Rest pairs keep the pitch of the previous sounding pair for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    /// Sound-axis value.
    pub note: i32,
    /// Time-axis start.
    pub pulse: i32,
    /// Length in pulses; zero is unrepresentable.
    #[serde(default = "default_temporal_interval")]
    pub temporal_interval: NonZeroU32,
    /// Whether this pair is a rest.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_rest: bool,
}

impl Pair {
    /// Creates a one-pulse sounding pair.
    pub fn new(note: i32, pulse: i32) -> Self {
        Self {
            note,
            pulse,
            temporal_interval: DEFAULT_TEMPORAL_INTERVAL,
            is_rest: false,
        }
    }

    /// Creates a sounding pair with an explicit length.
    pub fn with_interval(note: i32, pulse: i32, temporal_interval: NonZeroU32) -> Self {
        Self {
            note,
            pulse,
            temporal_interval,
            is_rest: false,
        }
    }

    /// Creates a sounding pair from a signed length, rejecting non-positive values.
    pub fn try_with_interval(note: i32, pulse: i32, temporal_interval: i64) -> Result<Self, ModelError> {
        let interval = u32::try_from(temporal_interval)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ModelError::NonPositiveInterval(temporal_interval))?;
        Ok(Self::with_interval(note, pulse, interval))
    }

    /// Creates a rest pair.
    pub fn rest(note: i32, pulse: i32, temporal_interval: NonZeroU32) -> Self {
        Self {
            note,
            pulse,
            temporal_interval,
            is_rest: true,
        }
    }

    /// Length in pulses as a signed value for pulse arithmetic, saturating
    /// at `i32::MAX`.
    pub fn duration(&self) -> i32 {
        i32::try_from(self.temporal_interval.get()).unwrap_or(i32::MAX)
    }

    /// First pulse after this pair (exclusive end), saturating at `i32::MAX`.
    pub fn end_pulse(&self) -> i32 {
        self.pulse.saturating_add(self.duration())
    }

    /// Last pulse occupied by this pair (inclusive end).
    pub fn last_pulse(&self) -> i32 {
        self.end_pulse() - 1
    }

    /// Returns true if this pair occupies any pulse in `[start, end]`.
    pub fn overlaps(&self, start: i32, end: i32) -> bool {
        self.pulse <= end && start <= self.last_pulse()
    }

    /// The `(note, pulse)` identity key used by the pair store.
    pub fn key(&self) -> (i32, i32) {
        (self.note, self.pulse)
    }

    /// Returns a copy moved to a new start and length.
    pub fn with_span(&self, pulse: i32, temporal_interval: NonZeroU32) -> Self {
        Self {
            pulse,
            temporal_interval,
            ..*self
        }
    }
}

/// A relative event measured from the previous sounding pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Pitch distance from the previous sounding note; always 0 for rests.
    pub sound_interval: i32,
    /// Length in pulses. Stays signed so malformed authoring input can be represented and rejected.
    pub temporal_interval: i32,
    /// Whether this interval is a rest.
    #[serde(default)]
    pub is_rest: bool,
}

impl Interval {
    /// Creates a sounding interval.
    pub fn new(sound_interval: i32, temporal_interval: i32) -> Self {
        Self {
            sound_interval,
            temporal_interval,
            is_rest: false,
        }
    }

    /// Creates a rest interval.
    pub fn rest(temporal_interval: i32) -> Self {
        Self {
            sound_interval: 0,
            temporal_interval,
            is_rest: true,
        }
    }
}

/// Anchor from which the first interval is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasePair {
    pub note: i32,
    pub pulse: i32,
}

impl BasePair {
    pub fn new(note: i32, pulse: i32) -> Self {
        Self { note, pulse }
    }
}

/// Which axis a value list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    /// Pitch axis: free order, duplicates allowed.
    Sound,
    /// Pulse axis: ascending order, duplicates removed on sanitation.
    Time,
}

impl AxisKind {
    /// Returns the axis kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisKind::Sound => "sound",
            AxisKind::Time => "time",
        }
    }
}

impl std::fmt::Display for AxisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive bounds of an axis, serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct AxisRange {
    min: i32,
    max: i32,
}

impl AxisRange {
    /// Creates a range, rejecting `min > max`.
    pub fn new(min: i32, max: i32) -> Result<Self, ModelError> {
        if min > max {
            return Err(ModelError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates a range starting at zero with `count` values.
    ///
    /// A count of zero yields the single-value range `[0, 0]`.
    pub fn from_count(count: usize) -> Self {
        let max = count.saturating_sub(1).min(i32::MAX as usize) as i32;
        Self { min: 0, max }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Returns true if `value` lies inside the range.
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Number of values on the axis.
    pub fn len(&self) -> usize {
        (self.max as i64 - self.min as i64 + 1) as usize
    }

    /// Always false: a valid range holds at least one value.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Wraps `value` into the range with Euclidean modulo.
    pub fn wrap(&self, value: i32) -> i32 {
        let span = self.len() as i64;
        let offset = (value as i64 - self.min as i64).rem_euclid(span);
        (self.min as i64 + offset) as i32
    }
}

impl TryFrom<(i32, i32)> for AxisRange {
    type Error = ModelError;

    fn try_from((min, max): (i32, i32)) -> Result<Self, Self::Error> {
        AxisRange::new(min, max)
    }
}

impl From<AxisRange> for (i32, i32) {
    fn from(range: AxisRange) -> Self {
        (range.min, range.max)
    }
}

impl std::fmt::Display for AxisRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_span() {
        let pair = Pair::try_with_interval(3, 1, 3).unwrap();
        assert_eq!(pair.end_pulse(), 4);
        assert_eq!(pair.last_pulse(), 3);
        assert!(pair.overlaps(2, 2));
        assert!(pair.overlaps(3, 5));
        assert!(!pair.overlaps(4, 6));
        assert!(!pair.overlaps(-2, 0));
    }

    #[test]
    fn test_pair_span_saturates_at_axis_end() {
        let pair = Pair::new(1, i32::MAX);
        assert_eq!(pair.end_pulse(), i32::MAX);
        assert_eq!(pair.last_pulse(), i32::MAX - 1);

        let huge = Pair::with_interval(0, 0, NonZeroU32::MAX);
        assert_eq!(huge.duration(), i32::MAX);
        assert_eq!(huge.end_pulse(), i32::MAX);
    }

    #[test]
    fn test_pair_rejects_non_positive_interval() {
        assert_eq!(
            Pair::try_with_interval(0, 0, 0),
            Err(ModelError::NonPositiveInterval(0))
        );
        assert_eq!(
            Pair::try_with_interval(0, 0, -4),
            Err(ModelError::NonPositiveInterval(-4))
        );
    }

    #[test]
    fn test_pair_serde_defaults() {
        let pair: Pair = serde_json::from_str(r#"{"note":7,"pulse":2}"#).unwrap();
        assert_eq!(pair, Pair::new(7, 2));

        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"{"note":7,"pulse":2,"temporal_interval":1}"#);

        let zero = serde_json::from_str::<Pair>(r#"{"note":7,"pulse":2,"temporal_interval":0}"#);
        assert!(zero.is_err());
    }

    #[test]
    fn test_axis_range() {
        let range = AxisRange::new(0, 11).unwrap();
        assert_eq!(range.len(), 12);
        assert!(range.contains(11));
        assert!(!range.contains(12));
        assert_eq!(range.wrap(12), 0);
        assert_eq!(range.wrap(-1), 11);
        assert_eq!(range.wrap(27), 3);
        assert!(AxisRange::new(5, 4).is_err());
    }

    #[test]
    fn test_axis_range_serde() {
        let range: AxisRange = serde_json::from_str("[0, 7]").unwrap();
        assert_eq!(range, AxisRange::new(0, 7).unwrap());
        assert!(serde_json::from_str::<AxisRange>("[7, 0]").is_err());
    }
}
