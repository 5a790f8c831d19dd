//! Sparse history of toggled grid cells.

use std::collections::BTreeMap;

/// Sparse `note -> (pulse -> active)` map that outlives axis resizes.
///
/// Cells are only ever added; shrinking the visible axes never drops
/// entries, so growing them back restores the earlier toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryGrid {
    cells: BTreeMap<i32, BTreeMap<i32, bool>>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pads the grid with `false` cells up to `note_count` x `pulse_count`.
    ///
    /// Existing entries keep their value.
    pub fn ensure(&mut self, note_count: usize, pulse_count: usize) {
        let note_count = note_count.min(i32::MAX as usize) as i32;
        let pulse_count = pulse_count.min(i32::MAX as usize) as i32;
        for note in 0..note_count {
            let row = self.cells.entry(note).or_default();
            for pulse in 0..pulse_count {
                row.entry(pulse).or_insert(false);
            }
        }
    }

    /// Records the toggled state of one cell.
    pub fn set(&mut self, note: i32, pulse: i32, active: bool) {
        self.cells.entry(note).or_default().insert(pulse, active);
    }

    /// Returns true if the cell is remembered as active.
    pub fn is_set(&self, note: i32, pulse: i32) -> bool {
        self.cells
            .get(&note)
            .and_then(|row| row.get(&pulse))
            .copied()
            .unwrap_or(false)
    }

    /// Returns true if the cell has an entry, active or not.
    pub fn contains(&self, note: i32, pulse: i32) -> bool {
        self.cells
            .get(&note)
            .is_some_and(|row| row.contains_key(&pulse))
    }

    /// Active cells as `(note, pulse)`, ordered by note then pulse.
    pub fn active_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().flat_map(|(&note, row)| {
            row.iter()
                .filter(|(_, &active)| active)
                .map(move |(&pulse, _)| (note, pulse))
        })
    }

    /// Number of note rows tracked.
    pub fn note_count(&self) -> usize {
        self.cells.len()
    }

    /// Widest pulse row tracked.
    pub fn pulse_count(&self) -> usize {
        self.cells.values().map(|row| row.len()).max().unwrap_or(0)
    }
}
