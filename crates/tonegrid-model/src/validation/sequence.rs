//! Whole-sequence validation for pair lists and interval chains.

use crate::error::{ErrorCode, SequenceError};
use crate::pair::{AxisRange, BasePair, Interval, Pair};

/// Axis bounds a sequence is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceBounds {
    /// Sound-axis range.
    pub note_range: AxisRange,
    /// Time-axis range; unchecked when `None`.
    pub pulse_range: Option<AxisRange>,
    /// Notes are wrapped into `note_range` instead of being rejected.
    pub wrap_around: bool,
}

impl SequenceBounds {
    /// Bounds checking only the sound axis.
    pub fn notes(note_range: AxisRange) -> Self {
        Self {
            note_range,
            pulse_range: None,
            wrap_around: false,
        }
    }

    /// Bounds checking both axes.
    pub fn new(note_range: AxisRange, pulse_range: AxisRange) -> Self {
        Self {
            note_range,
            pulse_range: Some(pulse_range),
            wrap_around: false,
        }
    }

    /// Enables or disables wrap-around.
    pub fn with_wrap_around(mut self, wrap_around: bool) -> Self {
        self.wrap_around = wrap_around;
        self
    }
}

/// Result of validating a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceValidation {
    /// Whether the sequence has no errors.
    pub valid: bool,
    /// Every error found, in element order.
    pub errors: Vec<SequenceError>,
    /// Index of the first offending element, for highlighting.
    pub invalid_index: Option<usize>,
}

impl SequenceValidation {
    fn from_errors(errors: Vec<SequenceError>) -> Self {
        let invalid_index = errors.iter().map(|e| e.index).min();
        Self {
            valid: errors.is_empty(),
            errors,
            invalid_index,
        }
    }

    /// Converts to a `Result`, returning the errors on failure.
    pub fn into_result(self) -> Result<(), Vec<SequenceError>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn out_of_range(range: AxisRange) -> ErrorCode {
    ErrorCode::OutOfRange {
        min: range.min(),
        max: range.max(),
    }
}

fn check_span(
    errors: &mut Vec<SequenceError>,
    range: Option<AxisRange>,
    start: i64,
    end_inclusive: i64,
    index: usize,
) {
    let Some(range) = range else {
        return;
    };
    if start < range.min() as i64 || end_inclusive > range.max() as i64 {
        errors.push(SequenceError::new(
            out_of_range(range),
            format!(
                "pulses {}..={} fall outside {}",
                start, end_inclusive, range
            ),
            index,
        ));
    }
}

/// Validate an absolute pair list walked in stored order.
///
/// Reports notes outside the sound axis, spans outside the time axis, and
/// every pair whose pulse does not start where the previous pair ended
/// (the first pair must start at `base.pulse`).
pub fn validate_pair_sequence(
    pairs: &[Pair],
    base: BasePair,
    bounds: SequenceBounds,
) -> SequenceValidation {
    let mut errors = Vec::new();
    let mut expected = base.pulse as i64;

    for (index, pair) in pairs.iter().enumerate() {
        if !bounds.note_range.contains(pair.note) {
            errors.push(SequenceError::new(
                out_of_range(bounds.note_range),
                format!("note {} falls outside {}", pair.note, bounds.note_range),
                index,
            ));
        }

        let start = pair.pulse as i64;
        let end = start + pair.temporal_interval.get() as i64;
        check_span(&mut errors, bounds.pulse_range, start, end - 1, index);

        if start != expected {
            errors.push(SequenceError::new(
                ErrorCode::PulseContinuityBroken,
                format!("expected pulse {}, found {}", expected, start),
                index,
            ));
        }
        expected = end;
    }

    SequenceValidation::from_errors(errors)
}

/// Validate an interval chain by replaying it from `base`.
///
/// Non-positive temporal intervals are reported and, like the builder, do
/// not advance the walk. Rests never move the pitch reference.
pub fn validate_interval_sequence(
    intervals: &[Interval],
    base: BasePair,
    bounds: SequenceBounds,
) -> SequenceValidation {
    let mut errors = Vec::new();
    let mut note = base.note as i64;
    let mut pulse = base.pulse as i64;

    for (index, interval) in intervals.iter().enumerate() {
        if interval.temporal_interval <= 0 {
            errors.push(SequenceError::new(
                ErrorCode::NonPositiveInterval,
                format!(
                    "temporal interval must be >= 1, got {}",
                    interval.temporal_interval
                ),
                index,
            ));
            continue;
        }

        if !interval.is_rest {
            note += interval.sound_interval as i64;
            if bounds.wrap_around {
                let min = bounds.note_range.min() as i64;
                note = min + (note - min).rem_euclid(bounds.note_range.len() as i64);
            } else if note < bounds.note_range.min() as i64 || note > bounds.note_range.max() as i64 {
                errors.push(SequenceError::new(
                    out_of_range(bounds.note_range),
                    format!("note {} falls outside {}", note, bounds.note_range),
                    index,
                ));
            }
        }

        let end = pulse + interval.temporal_interval as i64;
        check_span(&mut errors, bounds.pulse_range, pulse, end - 1, index);
        pulse = end;
    }

    SequenceValidation::from_errors(errors)
}
