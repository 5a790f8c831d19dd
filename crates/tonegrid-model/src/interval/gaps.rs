//! Temporal gap detection and silence filling.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::pair::{BasePair, Pair};

/// An undefined span between two pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gap {
    /// First empty pulse.
    pub start_pulse: i32,
    /// Number of empty pulses.
    pub size: u32,
}

/// Sorts by pulse, breaking ties on the remaining fields so the result
/// does not depend on caller order.
fn sorted_by_pulse(pairs: &[Pair]) -> Vec<Pair> {
    let mut sorted = pairs.to_vec();
    sorted.sort_unstable_by_key(|p| (p.pulse, p.note, p.temporal_interval, p.is_rest));
    sorted
}

/// Walks pairs in pulse order and calls `on_gap` before every pair that
/// starts past the cursor. The cursor starts at `base.pulse` and moves to
/// the furthest end seen so far.
fn walk_gaps(sorted: &[Pair], base: BasePair, mut on_gap: impl FnMut(Gap)) {
    let mut expected = base.pulse;
    for pair in sorted {
        if pair.pulse > expected {
            let gap = Gap {
                start_pulse: expected,
                size: pair.pulse.abs_diff(expected),
            };
            on_gap(gap);
        }
        expected = expected.max(pair.end_pulse());
    }
}

/// Find every temporal gap, measured from `base.pulse`.
///
/// Input order does not matter; pairs are sorted by pulse internally.
pub fn detect_gaps(pairs: &[Pair], base: BasePair) -> Vec<Gap> {
    let mut gaps = Vec::new();
    walk_gaps(&sorted_by_pulse(pairs), base, |gap| gaps.push(gap));
    gaps
}

/// Insert a rest pair into every temporal gap.
///
/// Each rest takes the note of the previous sounding pair, or `base.note`
/// when the gap comes before any sounding pair. Filling an already filled
/// list returns it unchanged.
pub fn fill_gaps_with_silences(pairs: &[Pair], base: BasePair) -> Vec<Pair> {
    let sorted = sorted_by_pulse(pairs);
    let mut filled = Vec::with_capacity(sorted.len());
    let mut prev_sounding = base.note;
    let mut expected = base.pulse;

    for pair in &sorted {
        if pair.pulse > expected {
            if let Some(size) = NonZeroU32::new(pair.pulse.abs_diff(expected)) {
                filled.push(Pair::rest(prev_sounding, expected, size));
            }
        }
        filled.push(*pair);
        if !pair.is_rest {
            prev_sounding = pair.note;
        }
        expected = expected.max(pair.end_pulse());
    }

    if filled.len() != sorted.len() {
        tracing::debug!(
            inserted = filled.len() - sorted.len(),
            "filled gaps with silences"
        );
    }
    filled
}

/// Sum of temporal intervals across `pairs`.
pub fn calculate_total_duration(pairs: &[Pair]) -> u64 {
    pairs.iter().map(|p| p.temporal_interval.get() as u64).sum()
}

/// Drop every rest pair; sounding pairs keep their order.
pub fn remove_silences(pairs: &[Pair]) -> Vec<Pair> {
    pairs.iter().filter(|p| !p.is_rest).copied().collect()
}

/// Returns true if the list has no temporal gaps from `base.pulse`.
pub fn is_gap_free(pairs: &[Pair], base: BasePair) -> bool {
    let mut found = false;
    walk_gaps(&sorted_by_pulse(pairs), base, |_| found = true);
    !found
}
