//! Host collaborators for driving a sequencer in tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tonegrid_editor::{CellLocator, DragPreview, IntervalRenderer, Rect};
use tonegrid_model::pair::{Interval, Pair};

/// Everything a [`RecordingRenderer`] has been asked to draw.
#[derive(Debug, Default, Clone)]
pub struct RenderLog {
    pub frames: Vec<(Vec<Pair>, Vec<Interval>)>,
    pub previews: Vec<DragPreview>,
    pub preview_clears: usize,
    pub highlights: Vec<(usize, Duration)>,
}

impl RenderLog {
    /// The most recent frame, if anything was rendered.
    pub fn last_frame(&self) -> Option<&(Vec<Pair>, Vec<Interval>)> {
        self.frames.last()
    }
}

/// A renderer that records calls into a shared [`RenderLog`].
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the log; stays valid after the renderer is moved.
    pub fn log(&self) -> Rc<RefCell<RenderLog>> {
        self.log.clone()
    }
}

impl IntervalRenderer for RecordingRenderer {
    fn render(&mut self, pairs: &[Pair], intervals: &[Interval]) {
        self.log
            .borrow_mut()
            .frames
            .push((pairs.to_vec(), intervals.to_vec()));
    }

    fn show_drag_preview(&mut self, preview: DragPreview) {
        self.log.borrow_mut().previews.push(preview);
    }

    fn clear_drag_preview(&mut self) {
        self.log.borrow_mut().preview_clears += 1;
    }

    fn highlight_interval(&mut self, index: usize, duration: Duration) {
        self.log.borrow_mut().highlights.push((index, duration));
    }
}

/// A uniform grid of `notes` rows by `pulses` columns.
#[derive(Debug, Clone, Copy)]
pub struct GridLocator {
    pub notes: i32,
    pub pulses: i32,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl GridLocator {
    pub fn new(notes: i32, pulses: i32) -> Self {
        Self {
            notes,
            pulses,
            cell_width: 40.0,
            cell_height: 16.0,
        }
    }

    /// Horizontal center of a pulse column.
    pub fn x_of(&self, pulse: i32) -> f64 {
        (f64::from(pulse) + 0.5) * self.cell_width
    }
}

impl CellLocator for GridLocator {
    fn cell_bounds(&self, note: i32, pulse: i32) -> Option<Rect> {
        if !(0..self.notes).contains(&note) || !(0..self.pulses).contains(&pulse) {
            return None;
        }
        Some(Rect::new(
            f64::from(pulse) * self.cell_width,
            f64::from(note) * self.cell_height,
            self.cell_width,
            self.cell_height,
        ))
    }

    fn container_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.pulses) * self.cell_width,
            f64::from(self.notes) * self.cell_height,
        )
    }
}
