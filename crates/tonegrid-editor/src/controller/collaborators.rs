//! Host-side collaborators of the sequencer controller.

use std::num::NonZeroU32;
use std::time::Duration;

use tonegrid_model::pair::{Interval, Pair};

use crate::drag::DragPreview;

/// Draws the grid. The renderer only observes state; it never mutates it.
pub trait IntervalRenderer {
    /// Redraws after the pair list changed.
    fn render(&mut self, pairs: &[Pair], intervals: &[Interval]);

    /// Shows the span under an active drag.
    fn show_drag_preview(&mut self, _preview: DragPreview) {}

    /// Removes any drag preview.
    fn clear_drag_preview(&mut self) {}

    /// Highlights one interval for `duration`. The renderer owns the reset timer.
    fn highlight_interval(&mut self, _index: usize, _duration: Duration) {}
}

/// Auditions newly created pairs.
pub trait NotePreview {
    fn preview_note(&mut self, note: i32, temporal_interval: NonZeroU32);
}

impl<F> NotePreview for F
where
    F: FnMut(i32, NonZeroU32),
{
    fn preview_note(&mut self, note: i32, temporal_interval: NonZeroU32) {
        self(note, temporal_interval)
    }
}
