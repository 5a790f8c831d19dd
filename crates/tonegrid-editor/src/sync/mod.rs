//! Editor <-> store synchronization.
//!
//! The [`SyncManager`] owns the [`DualEditor`] and the [`PairStore`] and is
//! the only path that mutates either. Editor-to-store traffic is debounced
//! so a burst of keystrokes lands as one store replacement; store-to-editor
//! traffic is synchronous. A [`SyncGate`] admits one pass at a time and
//! turns re-entrant calls into a `false` return.

use std::time::{Duration, Instant};

use tonegrid_model::interval::remove_silences;
use tonegrid_model::listeners::ListenerId;
use tonegrid_model::pair::{AxisRange, Pair};
use tonegrid_model::store::PairStore;

use crate::editor::{DualEditor, EditorEmission, EnterResult, Field};
use crate::timer::Debouncer;

mod gate;


pub use gate::{GateState, SyncDirection, SyncGate, SyncToken};

/// Mediates between the editor fields and the pair store.
#[derive(Debug)]
pub struct SyncManager {
    editor: DualEditor,
    store: PairStore,
    gate: SyncGate,
    debounce: Debouncer,
}

impl SyncManager {
    pub fn new(editor: DualEditor, debounce: Duration) -> Self {
        Self {
            editor,
            store: PairStore::new(),
            gate: SyncGate::new(),
            debounce: Debouncer::new(debounce),
        }
    }

    pub fn editor(&self) -> &DualEditor {
        &self.editor
    }

    pub fn store(&self) -> &PairStore {
        &self.store
    }

    pub fn pairs(&self) -> &[Pair] {
        self.store.pairs()
    }

    /// Returns true while a pass (or a host suspension) holds the gate.
    pub fn is_syncing(&self) -> bool {
        self.gate.is_busy()
    }

    /// Returns true if an editor commit is waiting for its debounce window.
    pub fn has_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    // ------------------------------------------------------------------
    // Editor entry points
    // ------------------------------------------------------------------

    /// Applies a text change and (re)starts the debounce window.
    pub fn input(&mut self, field: Field, text: impl Into<String>, now: Instant) -> EditorEmission {
        let emission = self.editor.input(field, text, now);
        self.debounce.schedule(now);
        emission
    }

    /// Sanitizes the field, advances focus, and commits immediately.
    pub fn press_enter(&mut self, field: Field) -> EnterResult {
        let result = self.editor.press_enter(field);
        self.flush();
        result
    }

    /// Sanitizes the field on blur and commits immediately.
    pub fn blur(&mut self, field: Field) -> bool {
        let rewritten = self.editor.blur(field);
        self.flush();
        rewritten
    }

    /// Advances timers. Returns true if the store changed.
    ///
    /// A due debounce is left pending while the gate is busy so it fires on
    /// a later tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.editor.tick(now);
        if self.gate.is_busy() {
            return false;
        }
        let before = self.store.revision();
        if self.debounce.fire(now) {
            self.sync_from_editor();
        }
        self.store.revision() != before
    }

    /// Cancels the debounce window and commits the editor now.
    pub fn flush(&mut self) -> bool {
        if self.gate.is_busy() {
            return false;
        }
        self.debounce.cancel();
        self.sync_from_editor()
    }

    /// Pushes the editor's zipped pairs into the store.
    ///
    /// Stored durations are kept for pairs whose `(note, pulse)` is
    /// unchanged, since text carries no length. Nothing is written when the
    /// sounding content already matches. Returns false if the gate is busy.
    pub fn sync_from_editor(&mut self) -> bool {
        let Some(token) = self.gate.try_enter(SyncDirection::FromEditor) else {
            return false;
        };

        let pairs = keep_stored_lengths(self.editor.emission().pairs, self.store.pairs());
        if pairs != remove_silences(self.store.pairs()) {
            tracing::debug!(count = pairs.len(), "sync from editor");
            self.store.set_pairs(pairs);
        }

        self.gate.leave(token);
        true
    }

    /// Rewrites the editor fields from the store. Returns false if the gate is busy.
    pub fn sync_to_editor(&mut self) -> bool {
        self.write_store(|_| ()).is_some()
    }

    // ------------------------------------------------------------------
    // Store entry points
    // ------------------------------------------------------------------

    /// Replaces the store contents and rewrites the editor.
    pub fn set_pairs(&mut self, pairs: Vec<Pair>) -> bool {
        self.write_store(|store| store.set_pairs(pairs)).is_some()
    }

    /// Adds a one-pulse pair. Returns false if rejected or already present.
    pub fn add_pair(&mut self, note: i32, pulse: i32) -> bool {
        self.write_store(|store| store.add(note, pulse))
            .unwrap_or(false)
    }

    /// Removes the pairs starting at `(note, pulse)`.
    pub fn remove_pair(&mut self, note: i32, pulse: i32) -> bool {
        self.write_store(|store| store.remove(note, pulse))
            .unwrap_or(false)
    }

    /// Removes the pair at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<Pair> {
        self.write_store(|store| store.remove_at(index)).flatten()
    }

    /// Empties the store and the editor.
    pub fn clear(&mut self) -> bool {
        self.write_store(PairStore::clear).is_some()
    }

    /// Resizes the visible axes and rebuilds the live pairs from memory.
    pub fn resize(&mut self, note_count: usize, pulse_count: usize) -> bool {
        let note_range = AxisRange::from_count(note_count);
        let pulse_range = AxisRange::from_count(pulse_count);
        self.write_store_with(|store, editor| {
            editor.set_ranges(note_range, pulse_range);
            store.resize(note_count, pulse_count);
        })
        .is_some()
    }

    /// Pads the memory grid without touching the live pairs.
    pub fn ensure_memory(&mut self, note_count: usize, pulse_count: usize) {
        self.store.ensure_memory(note_count, pulse_count);
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&[Pair]) + 'static) -> ListenerId {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.store.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Host control
    // ------------------------------------------------------------------

    /// Holds the gate so every entry point is rejected until [`SyncManager::resume`].
    pub fn suspend(&mut self) -> Option<SyncToken> {
        self.gate.try_enter(SyncDirection::Suspended)
    }

    pub fn resume(&mut self, token: SyncToken) {
        self.gate.leave(token);
    }

    /// Cancels timers and drops store listeners.
    pub fn shutdown(&mut self) {
        self.debounce.cancel();
        self.store.clear_listeners();
    }

    /// Runs a store mutation, then rewrites the editor from the result.
    ///
    /// A pending editor commit is cancelled: its text is about to be
    /// overwritten by the store.
    fn write_store<R>(&mut self, mutate: impl FnOnce(&mut PairStore) -> R) -> Option<R> {
        self.write_store_with(|store, _| mutate(store))
    }

    /// Like `write_store`, but also hands the editor to `mutate` so editor
    /// state changes only once the gate is held.
    fn write_store_with<R>(
        &mut self,
        mutate: impl FnOnce(&mut PairStore, &mut DualEditor) -> R,
    ) -> Option<R> {
        let token = self.gate.try_enter(SyncDirection::ToEditor)?;
        let result = mutate(&mut self.store, &mut self.editor);
        self.debounce.cancel();
        self.editor.set_from_pairs(self.store.pairs());
        self.gate.leave(token);
        Some(result)
    }
}

/// Copies the stored length onto every editor pair with a matching start cell.
fn keep_stored_lengths(mut pairs: Vec<Pair>, stored: &[Pair]) -> Vec<Pair> {
    for pair in &mut pairs {
        if let Some(existing) = stored
            .iter()
            .find(|p| !p.is_rest && p.key() == pair.key())
        {
            pair.temporal_interval = existing.temporal_interval;
        }
    }
    pairs
}
