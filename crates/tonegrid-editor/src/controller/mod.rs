//! The interval sequencer façade.
//!
//! [`IntervalSequencer`] wires the sync manager, the drag handler and the
//! host collaborators together. Every mutation goes through the sync
//! manager; after each entry point the controller compares the store
//! revision with the last one it published and, if it moved, recomputes
//! the interval chain, notifies interval listeners and redraws.

use std::time::{Duration, Instant};

use tonegrid_model::interval::{
    build_pairs_from_intervals, detect_gaps, fill_gaps_with_silences, pairs_to_intervals, Gap,
};
use tonegrid_model::listeners::{ListenerId, Listeners};
use tonegrid_model::pair::{AxisRange, BasePair, Interval, Pair};
use tonegrid_model::validation::{validate_pair_sequence, SequenceValidation};

use crate::config::{ConfigError, SequencerConfig};
use crate::drag::{CellLocator, DragHandler, DragState};
use crate::editor::{DualEditor, EditorEmission, EnterResult, Field};
use crate::error::ControllerError;
use crate::sync::SyncManager;

mod collaborators;

#[cfg(test)]
mod tests;

pub use collaborators::{IntervalRenderer, NotePreview};

/// Selects a pair for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRef {
    /// Position in the stored list.
    Index(usize),
    /// Start cell.
    Position { note: i32, pulse: i32 },
}

/// Number of cells on a zero-based axis.
fn axis_count(range: AxisRange) -> usize {
    usize::try_from(range.max()).map_or(0, |max| max + 1)
}

/// Builder for [`IntervalSequencer`].
///
/// A renderer and a cell locator are required.
#[derive(Default)]
pub struct IntervalSequencerBuilder {
    config: SequencerConfig,
    renderer: Option<Box<dyn IntervalRenderer>>,
    locator: Option<Box<dyn CellLocator>>,
    note_preview: Option<Box<dyn NotePreview>>,
}

impl IntervalSequencerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SequencerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn renderer(mut self, renderer: impl IntervalRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn locator(mut self, locator: impl CellLocator + 'static) -> Self {
        self.locator = Some(Box::new(locator));
        self
    }

    pub fn note_preview(mut self, preview: impl NotePreview + 'static) -> Self {
        self.note_preview = Some(Box::new(preview));
        self
    }

    /// Validates the config and assembles the sequencer.
    pub fn build(self) -> Result<IntervalSequencer, ControllerError> {
        self.config.validate()?;
        let renderer = self
            .renderer
            .ok_or(ControllerError::MissingCollaborator("renderer"))?;
        let locator = self
            .locator
            .ok_or(ControllerError::MissingCollaborator("locator"))?;

        let config = self.config;
        let editor = DualEditor::new(config.note_range, config.pulse_range, config.notice_duration());
        let mut sync = SyncManager::new(editor, config.debounce());
        sync.ensure_memory(axis_count(config.note_range), axis_count(config.pulse_range));
        let drag = DragHandler::new(axis_count(config.pulse_range))
            .with_enabled(config.drag_enabled)
            .with_polyphony(config.polyphony);

        let mut sequencer = IntervalSequencer {
            config,
            sync,
            drag,
            renderer,
            locator,
            note_preview: self.note_preview,
            intervals: Vec::new(),
            interval_listeners: Listeners::new(),
            published: 0,
            destroyed: false,
        };
        sequencer.publish();
        tracing::debug!(
            notes = %sequencer.config.note_range,
            pulses = %sequencer.config.pulse_range,
            "sequencer ready"
        );
        Ok(sequencer)
    }
}

/// Interval sequencer controller.
pub struct IntervalSequencer {
    config: SequencerConfig,
    sync: SyncManager,
    drag: DragHandler,
    renderer: Box<dyn IntervalRenderer>,
    locator: Box<dyn CellLocator>,
    note_preview: Option<Box<dyn NotePreview>>,
    intervals: Vec<Interval>,
    interval_listeners: Listeners<Interval>,
    published: u64,
    destroyed: bool,
}

impl IntervalSequencer {
    pub fn builder() -> IntervalSequencerBuilder {
        IntervalSequencerBuilder::new()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn editor(&self) -> &DualEditor {
        self.sync.editor()
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Live pairs in stored order. Empty once destroyed.
    pub fn pairs(&self) -> &[Pair] {
        if self.destroyed {
            return &[];
        }
        self.sync.pairs()
    }

    /// Interval chain for [`IntervalSequencer::pairs`], measured from the base pair.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Temporal gaps in the live pairs.
    pub fn gaps(&self) -> Vec<Gap> {
        detect_gaps(self.pairs(), self.config.base_pair)
    }

    /// Checks the live pairs for range and continuity problems.
    pub fn validate(&self) -> SequenceValidation {
        validate_pair_sequence(self.pairs(), self.config.base_pair, self.config.sequence_bounds())
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn on_pairs_change(&mut self, callback: impl FnMut(&[Pair]) + 'static) -> ListenerId {
        self.sync.subscribe(callback)
    }

    pub fn off_pairs_change(&mut self, id: ListenerId) -> bool {
        self.sync.unsubscribe(id)
    }

    pub fn on_intervals_change(&mut self, callback: impl FnMut(&[Interval]) + 'static) -> ListenerId {
        self.interval_listeners.subscribe(callback)
    }

    pub fn off_intervals_change(&mut self, id: ListenerId) -> bool {
        self.interval_listeners.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Programmatic control
    // ------------------------------------------------------------------

    /// Replaces the pair list. Returns false while a sync is in flight or
    /// when any pair starts outside the axes.
    pub fn set_pairs(&mut self, pairs: Vec<Pair>) -> bool {
        if self.destroyed {
            return false;
        }
        if let Some(index) = pairs.iter().position(|p| !self.fits_grid(p)) {
            tracing::warn!(index, pair = ?pairs[index], "rejected pair list outside the grid");
            return false;
        }
        let accepted = self.sync.set_pairs(pairs);
        self.refresh();
        accepted
    }

    /// Rebuilds the pair list from an interval chain anchored at the base pair.
    ///
    /// Chains that leave the axes are rejected like [`Self::set_pairs`].
    pub fn set_intervals(&mut self, intervals: &[Interval]) -> bool {
        let pairs = build_pairs_from_intervals(
            self.config.base_pair,
            intervals,
            self.config.build_options(),
        );
        self.set_pairs(pairs)
    }

    /// Adds a one-pulse pair. Cells outside either axis are rejected.
    pub fn add_pair(&mut self, note: i32, pulse: i32) -> bool {
        if self.destroyed
            || !self.config.note_range.contains(note)
            || !self.config.pulse_range.contains(pulse)
        {
            return false;
        }
        let added = self.sync.add_pair(note, pulse);
        self.refresh();
        added
    }

    pub fn remove_pair(&mut self, target: PairRef) -> bool {
        if self.destroyed {
            return false;
        }
        let removed = match target {
            PairRef::Index(index) => self.sync.remove_at(index).is_some(),
            PairRef::Position { note, pulse } => self.sync.remove_pair(note, pulse),
        };
        self.refresh();
        removed
    }

    /// Adds the pair at a cell, or removes it if one already starts there.
    pub fn toggle_cell(&mut self, note: i32, pulse: i32) -> bool {
        if self.sync.store().has(note, pulse) {
            self.remove_pair(PairRef::Position { note, pulse })
        } else {
            self.add_pair(note, pulse)
        }
    }

    pub fn clear(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        let cleared = self.sync.clear();
        self.refresh();
        cleared
    }

    /// Replaces the live pairs with a gap-free copy. Returns false if there
    /// were no gaps.
    pub fn fill_current_gaps(&mut self) -> bool {
        let filled = fill_gaps_with_silences(self.pairs(), self.config.base_pair);
        if filled.as_slice() == self.pairs() {
            return false;
        }
        self.set_pairs(filled)
    }

    /// Asks the renderer to highlight interval `index` for `duration_ms`.
    pub fn highlight_interval(&mut self, index: usize, duration_ms: u64) -> bool {
        if self.destroyed || index >= self.intervals.len() {
            return false;
        }
        self.renderer
            .highlight_interval(index, Duration::from_millis(duration_ms));
        true
    }

    pub fn set_polyphony(&mut self, polyphony: bool) {
        self.config.polyphony = polyphony;
        self.drag.set_polyphony(polyphony);
    }

    /// Enables or disables dragging. Disabling cancels an active drag.
    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.config.drag_enabled = enabled;
        if self.drag.set_enabled(enabled) {
            self.renderer.clear_drag_preview();
        }
    }

    /// Moves the interval anchor and republishes the interval chain.
    pub fn set_base_pair(&mut self, base: BasePair) -> Result<(), ConfigError> {
        let candidate = SequencerConfig {
            base_pair: base,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        if !self.destroyed {
            self.publish();
        }
        Ok(())
    }

    /// Resizes both axes. Pairs outside the new grid are hidden and come
    /// back from memory when the grid grows again.
    pub fn resize(&mut self, note_count: usize, pulse_count: usize) -> bool {
        if self.destroyed || !self.sync.resize(note_count, pulse_count) {
            return false;
        }
        self.config.note_range = AxisRange::from_count(note_count);
        self.config.pulse_range = AxisRange::from_count(pulse_count);
        if self.drag.set_total_spaces(pulse_count) {
            self.renderer.clear_drag_preview();
        }
        self.refresh();
        true
    }

    // ------------------------------------------------------------------
    // Editor events
    // ------------------------------------------------------------------

    pub fn input(&mut self, field: Field, text: impl Into<String>, now: Instant) -> EditorEmission {
        if self.destroyed {
            return EditorEmission::default();
        }
        self.sync.input(field, text, now)
    }

    pub fn press_enter(&mut self, field: Field) -> Option<EnterResult> {
        if self.destroyed {
            return None;
        }
        let result = self.sync.press_enter(field);
        self.refresh();
        Some(result)
    }

    pub fn blur(&mut self, field: Field) -> bool {
        if self.destroyed {
            return false;
        }
        let rewritten = self.sync.blur(field);
        self.refresh();
        rewritten
    }

    /// Advances host time. Returns true if the pair list changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.destroyed {
            return false;
        }
        self.sync.tick(now);
        self.refresh()
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, note: i32, pulse: i32) -> bool {
        if self.destroyed {
            return false;
        }
        self.renderer.clear_drag_preview();
        match self
            .drag
            .pointer_down(note, pulse, self.sync.pairs(), self.locator.as_ref())
        {
            Some(preview) => {
                self.renderer.show_drag_preview(preview);
                true
            }
            None => false,
        }
    }

    pub fn pointer_move(&mut self, x: f64) -> bool {
        match self.drag.pointer_move(x, self.locator.as_ref()) {
            Some(preview) => {
                self.renderer.show_drag_preview(preview);
                true
            }
            None => false,
        }
    }

    /// Commits the active drag. Returns true if the pair list was replaced.
    pub fn pointer_up(&mut self) -> bool {
        let Some(commit) = self.drag.pointer_up(self.sync.pairs()) else {
            return false;
        };
        self.renderer.clear_drag_preview();

        let pairs = if self.config.fill_gaps_on_drag {
            fill_gaps_with_silences(&commit.pairs, self.config.base_pair)
        } else {
            commit.pairs
        };
        if !self.set_pairs(pairs) {
            return false;
        }

        if let (Some(created), Some(preview)) = (commit.created, self.note_preview.as_mut()) {
            preview.preview_note(created.note, created.temporal_interval);
        }
        true
    }

    /// Abandons the active drag without committing.
    pub fn cancel_drag(&mut self) -> bool {
        let cancelled = self.drag.cancel();
        if cancelled {
            self.renderer.clear_drag_preview();
        }
        cancelled
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Releases listeners, timers and any active drag. Safe to call twice.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.sync.shutdown();
        self.interval_listeners.clear();
        self.cancel_drag();
        self.intervals.clear();
        tracing::debug!("sequencer destroyed");
    }

    /// Republishes if the store moved since the last publish.
    /// The start cell lies on both axes and the length fits pulse arithmetic.
    fn fits_grid(&self, pair: &Pair) -> bool {
        self.config.note_range.contains(pair.note)
            && self.config.pulse_range.contains(pair.pulse)
            && i32::try_from(pair.temporal_interval.get()).is_ok()
    }

    fn refresh(&mut self) -> bool {
        let revision = self.sync.store().revision();
        if revision == self.published {
            return false;
        }
        self.publish();
        true
    }

    fn publish(&mut self) {
        self.published = self.sync.store().revision();
        self.intervals = pairs_to_intervals(self.sync.pairs(), self.config.base_pair);
        self.interval_listeners.notify(&self.intervals);
        self.renderer.render(self.sync.pairs(), &self.intervals);
    }
}

impl std::fmt::Debug for IntervalSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalSequencer")
            .field("config", &self.config)
            .field("sync", &self.sync)
            .field("drag", &self.drag)
            .field("intervals", &self.intervals)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}
