//! Pointer-driven creation and resizing of pairs.
//!
//! A drag starts on a grid cell. Pressing on the start cell of a sounding
//! pair edits that pair's span; pressing anywhere else creates a new pair.
//! The handler never touches the store: [`DragHandler::pointer_up`] returns
//! the replacement pair list and the caller commits it.

use std::num::NonZeroU32;

use tonegrid_model::pair::Pair;

mod geometry;

#[cfg(test)]
mod tests;

pub use geometry::{space_at, CellLocator, Rect};

/// What a drag does when it is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Insert a new pair.
    Create,
    /// Resize the pair at `index`, which held `original` when the drag started.
    Edit { index: usize, original: Pair },
}

/// An in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub mode: DragMode,
    pub note: i32,
    pub start: i32,
    pub current: i32,
}

impl DragSession {
    /// First pulse of the dragged span.
    pub fn first(&self) -> i32 {
        self.start.min(self.current)
    }

    /// Last pulse of the dragged span, inclusive.
    pub fn last(&self) -> i32 {
        self.start.max(self.current)
    }

    /// Span length in pulses.
    pub fn length(&self) -> NonZeroU32 {
        NonZeroU32::MIN.saturating_add(self.start.abs_diff(self.current))
    }

    pub fn preview(&self) -> DragPreview {
        DragPreview {
            note: self.note,
            start: self.first(),
            end: self.last(),
        }
    }
}

/// Handler state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Highlighted span while dragging, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPreview {
    pub note: i32,
    pub start: i32,
    pub end: i32,
}

/// Result of a completed drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragCommit {
    /// Replacement pair list.
    pub pairs: Vec<Pair>,
    /// The pair a create-mode drag inserted.
    pub created: Option<Pair>,
}

/// Drag state machine.
#[derive(Debug, Clone)]
pub struct DragHandler {
    state: DragState,
    enabled: bool,
    polyphony: bool,
    total_spaces: usize,
}

impl DragHandler {
    pub fn new(total_spaces: usize) -> Self {
        Self {
            state: DragState::Idle,
            enabled: true,
            polyphony: false,
            total_spaces,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_polyphony(mut self, polyphony: bool) -> Self {
        self.polyphony = polyphony;
        self
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn polyphony(&self) -> bool {
        self.polyphony
    }

    pub fn total_spaces(&self) -> usize {
        self.total_spaces
    }

    /// Enables or disables the handler. Disabling mid-drag cancels the
    /// drag without committing; returns true in that case.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.enabled = enabled;
        !enabled && self.cancel()
    }

    pub fn set_polyphony(&mut self, polyphony: bool) {
        self.polyphony = polyphony;
    }

    /// Changes the number of pulse spaces. An active drag is cancelled.
    pub fn set_total_spaces(&mut self, total_spaces: usize) -> bool {
        self.total_spaces = total_spaces;
        self.cancel()
    }

    /// Drops any active drag. Returns true if one was active.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Idle => false,
            DragState::Dragging(session) => {
                tracing::debug!(note = session.note, start = session.start, "drag cancelled");
                true
            }
        }
    }

    /// Starts a drag on the cell at `(note, pulse)`.
    ///
    /// Ignored while disabled, or when the cell is unknown to the host or
    /// outside the pulse axis. A drag left over from an earlier press is
    /// discarded first.
    pub fn pointer_down(
        &mut self,
        note: i32,
        pulse: i32,
        pairs: &[Pair],
        locator: &dyn CellLocator,
    ) -> Option<DragPreview> {
        if !self.enabled {
            return None;
        }
        self.cancel();

        let in_axis = usize::try_from(pulse).is_ok_and(|p| p < self.total_spaces);
        if !in_axis || locator.cell_bounds(note, pulse).is_none() {
            return None;
        }

        let mode = pairs
            .iter()
            .position(|p| !p.is_rest && p.key() == (note, pulse))
            .map_or(DragMode::Create, |index| DragMode::Edit {
                index,
                original: pairs[index],
            });
        let session = DragSession {
            mode,
            note,
            start: pulse,
            current: pulse,
        };
        tracing::trace!(?mode, note, pulse, "drag started");
        self.state = DragState::Dragging(session);
        Some(session.preview())
    }

    /// Tracks the pointer. Returns the updated preview while dragging.
    pub fn pointer_move(&mut self, x: f64, locator: &dyn CellLocator) -> Option<DragPreview> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        if let Some(space) = space_at(x, locator.container_bounds(), self.total_spaces) {
            session.current = space;
        }
        Some(session.preview())
    }

    /// Finishes the drag and computes the replacement pair list.
    ///
    /// Returns `None` when idle, or when an edited pair is no longer at the
    /// index it was captured from.
    pub fn pointer_up(&mut self, pairs: &[Pair]) -> Option<DragCommit> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        let pulse = session.first();
        let length = session.length();

        match session.mode {
            DragMode::Edit { index, original } => {
                if pairs.get(index) != Some(&original) {
                    tracing::warn!(index, "edited pair moved during drag; discarding");
                    return None;
                }
                let edited = original.with_span(pulse, length);
                let mut next: Vec<Pair> = pairs
                    .iter()
                    .enumerate()
                    .filter_map(|(i, p)| {
                        if i == index {
                            Some(edited)
                        } else if self.polyphony || !p.overlaps(pulse, edited.last_pulse()) {
                            Some(*p)
                        } else {
                            None
                        }
                    })
                    .collect();
                next.sort_by_key(|p| p.pulse);
                tracing::debug!(
                    note = edited.note,
                    pulse,
                    length = length.get(),
                    removed = pairs.len() - next.len(),
                    "drag resized pair"
                );
                Some(DragCommit {
                    pairs: next,
                    created: None,
                })
            }
            DragMode::Create => {
                let created = Pair::with_interval(session.note, pulse, length);
                let mut next: Vec<Pair> = if self.polyphony {
                    pairs.to_vec()
                } else {
                    pairs
                        .iter()
                        .filter(|p| !p.overlaps(pulse, created.last_pulse()))
                        .copied()
                        .collect()
                };
                next.push(created);
                next.sort_by_key(|p| p.pulse);
                tracing::debug!(
                    note = created.note,
                    pulse,
                    length = length.get(),
                    removed = pairs.len() + 1 - next.len(),
                    "drag created pair"
                );
                Some(DragCommit {
                    pairs: next,
                    created: Some(created),
                })
            }
        }
    }
}
