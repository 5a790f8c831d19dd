//! Pair <-> interval conversion anchored at a base pair.

use crate::pair::{AxisRange, BasePair, Interval, Pair};

/// Options for rebuilding pairs from an interval chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Wrap each built note into `note_range` with modulo arithmetic.
    pub wrap_around: bool,
    /// Sound-axis range used for wrapping; ignored when `None`.
    pub note_range: Option<AxisRange>,
}

impl BuildOptions {
    /// Options that wrap notes into `note_range`.
    pub fn wrapping(note_range: AxisRange) -> Self {
        Self {
            wrap_around: true,
            note_range: Some(note_range),
        }
    }
}

/// Convert absolute pairs into a relative interval chain.
///
/// Pairs are walked in stored order. Each sounding pair is measured against
/// the last sounding note (starting at `base.note`); rests produce a zero
/// sound interval and leave the reference untouched.
pub fn pairs_to_intervals(pairs: &[Pair], base: BasePair) -> Vec<Interval> {
    let mut prev_note = base.note;
    pairs
        .iter()
        .map(|pair| {
            if pair.is_rest {
                Interval::rest(pair.duration())
            } else {
                let interval = Interval::new(pair.note.saturating_sub(prev_note), pair.duration());
                prev_note = pair.note;
                interval
            }
        })
        .collect()
}

/// Rebuild absolute pairs from an interval chain.
///
/// Pulses are laid end to end starting at `base.pulse`. Intervals with a
/// non-positive temporal interval are skipped without aborting the chain.
/// Rest pairs carry the last sounding note.
pub fn build_pairs_from_intervals(
    base: BasePair,
    intervals: &[Interval],
    options: BuildOptions,
) -> Vec<Pair> {
    let mut prev_note = base.note;
    let mut pulse = base.pulse;
    let mut pairs = Vec::with_capacity(intervals.len());

    for (index, interval) in intervals.iter().enumerate() {
        let Some(length) = u32::try_from(interval.temporal_interval)
            .ok()
            .and_then(std::num::NonZeroU32::new)
        else {
            tracing::trace!(
                index,
                temporal_interval = interval.temporal_interval,
                "skipping non-positive interval"
            );
            continue;
        };

        if interval.is_rest {
            pairs.push(Pair::rest(prev_note, pulse, length));
        } else {
            let mut note = prev_note.saturating_add(interval.sound_interval);
            if let (true, Some(range)) = (options.wrap_around, options.note_range) {
                note = range.wrap(note);
            }
            prev_note = note;
            pairs.push(Pair::with_interval(note, pulse, length));
        }
        pulse = pulse.saturating_add(interval.temporal_interval);
    }

    pairs
}
