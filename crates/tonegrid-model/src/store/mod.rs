//! Canonical pair storage.
//!
//! The [`PairStore`] is the single source of truth for the live sequence. It
//! keeps the order-preserving pair list, a `(note, pulse)` key set for O(1)
//! membership tests, and a [`MemoryGrid`] recording toggled cells across
//! axis resizes. Every mutating call notifies listeners exactly once, after
//! the mutation completes.

use std::collections::HashSet;
use std::num::NonZeroU32;

use crate::listeners::{ListenerId, Listeners};
use crate::pair::Pair;

mod memory;


pub use memory::MemoryGrid;

/// Order-preserving pair list with key set and memory grid.
#[derive(Debug, Default)]
pub struct PairStore {
    pairs: Vec<Pair>,
    keys: HashSet<(i32, i32)>,
    memory: MemoryGrid,
    listeners: Listeners<Pair>,
    revision: u64,
}

impl PairStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pairs in stored order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Monotonic counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The toggled-cell history.
    pub fn memory(&self) -> &MemoryGrid {
        &self.memory
    }

    /// Returns true if a pair starts at `(note, pulse)`.
    pub fn has(&self, note: i32, pulse: i32) -> bool {
        self.keys.contains(&(note, pulse))
    }

    /// Index of the first pair starting at `(note, pulse)`.
    pub fn position(&self, note: i32, pulse: i32) -> Option<usize> {
        if !self.has(note, pulse) {
            return None;
        }
        self.pairs.iter().position(|p| p.key() == (note, pulse))
    }

    /// Appends a one-pulse pair. Returns false if the cell is already taken.
    pub fn add(&mut self, note: i32, pulse: i32) -> bool {
        self.add_pair(Pair::new(note, pulse))
    }

    /// Appends `pair`. Returns false if its start cell is already taken.
    pub fn add_pair(&mut self, pair: Pair) -> bool {
        if !self.keys.insert(pair.key()) {
            return false;
        }
        self.pairs.push(pair);
        if !pair.is_rest {
            self.memory.set(pair.note, pair.pulse, true);
        }
        self.commit();
        true
    }

    /// Removes every pair starting at `(note, pulse)`.
    pub fn remove(&mut self, note: i32, pulse: i32) -> bool {
        if !self.keys.remove(&(note, pulse)) {
            return false;
        }
        self.pairs.retain(|p| p.key() != (note, pulse));
        self.memory.set(note, pulse, false);
        self.commit();
        true
    }

    /// Removes the pair at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<Pair> {
        if index >= self.pairs.len() {
            return None;
        }
        let removed = self.pairs.remove(index);
        let key = removed.key();
        if !self.pairs.iter().any(|p| p.key() == key) {
            self.keys.remove(&key);
        }
        if !self.pairs.iter().any(|p| !p.is_rest && p.key() == key) {
            self.memory.set(removed.note, removed.pulse, false);
        }
        self.commit();
        Some(removed)
    }

    /// Atomically replaces the whole list.
    ///
    /// Sounding cells that leave the live list are marked inactive in memory
    /// and the new sounding cells are marked active. Rests never enter memory.
    pub fn set_pairs(&mut self, pairs: Vec<Pair>) {
        let keys: HashSet<(i32, i32)> = pairs.iter().map(Pair::key).collect();
        let sounding = sounding_keys(&pairs);
        for &(note, pulse) in sounding_keys(&self.pairs).difference(&sounding) {
            self.memory.set(note, pulse, false);
        }
        for &(note, pulse) in &sounding {
            self.memory.set(note, pulse, true);
        }
        self.pairs = pairs;
        self.keys = keys;
        tracing::debug!(count = self.pairs.len(), "pair store replaced");
        self.commit();
    }

    /// Removes every live pair.
    pub fn clear(&mut self) {
        for &(note, pulse) in &self.keys {
            self.memory.set(note, pulse, false);
        }
        self.pairs.clear();
        self.keys.clear();
        self.commit();
    }

    /// Pads the memory grid up to the given axis sizes.
    pub fn ensure_memory(&mut self, note_count: usize, pulse_count: usize) {
        self.memory.ensure(note_count, pulse_count);
    }

    /// Changes the visible axis sizes and rebuilds the live list.
    ///
    /// Live pairs inside the new bounds are kept, truncated so their span
    /// ends before `pulse_count`. Remembered cells inside the bounds that
    /// are not live come back as one-pulse sounding pairs; rests are never
    /// remembered. Pairs outside the bounds
    /// leave the live list but stay active in memory.
    pub fn resize(&mut self, note_count: usize, pulse_count: usize) {
        self.memory.ensure(note_count, pulse_count);

        let notes = note_count.min(i32::MAX as usize) as i32;
        let pulses = pulse_count.min(i32::MAX as usize) as i32;
        let inside = |note: i32, pulse: i32| (0..notes).contains(&note) && (0..pulses).contains(&pulse);

        let mut rebuilt: Vec<Pair> = Vec::with_capacity(self.pairs.len());
        for pair in &self.pairs {
            if !inside(pair.note, pair.pulse) {
                continue;
            }
            let room = (pulses - pair.pulse) as u32;
            let length = pair.temporal_interval.get().min(room);
            match NonZeroU32::new(length) {
                Some(length) => rebuilt.push(pair.with_span(pair.pulse, length)),
                None => continue,
            }
        }

        let mut keys: HashSet<(i32, i32)> = rebuilt.iter().map(Pair::key).collect();
        for (note, pulse) in self.memory.active_cells() {
            if inside(note, pulse) && keys.insert((note, pulse)) {
                rebuilt.push(Pair::new(note, pulse));
            }
        }
        rebuilt.sort_by_key(|p| (p.pulse, p.note));

        tracing::debug!(
            note_count,
            pulse_count,
            count = rebuilt.len(),
            "pair store resized"
        );
        self.pairs = rebuilt;
        self.keys = keys;
        self.commit();
    }

    /// Registers a change listener.
    pub fn subscribe(&mut self, callback: impl FnMut(&[Pair]) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Removes a change listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Drops every change listener.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.listeners.notify(&self.pairs);
    }
}

fn sounding_keys(pairs: &[Pair]) -> HashSet<(i32, i32)> {
    pairs.iter().filter(|p| !p.is_rest).map(Pair::key).collect()
}
