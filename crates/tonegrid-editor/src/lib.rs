//! tonegrid Editing Engine
//!
//! This crate drives a tonegrid sequence from user input. It sits on top of
//! [`tonegrid_model`] and adds:
//!
//! - A dual text editor with one field per axis
//! - A sync manager that keeps the editor and the pair store consistent
//! - A drag handler that creates and resizes pairs from pointer input
//! - The [`IntervalSequencer`] controller tying these to host collaborators
//!
//! Everything runs on the caller's thread. Time only advances when the host
//! passes an [`std::time::Instant`] into `input` or `tick`.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use tonegrid_editor::{CellLocator, Field, IntervalRenderer, IntervalSequencer, Rect};
//! use tonegrid_model::pair::{Interval, Pair};
//!
//! struct NoopRenderer;
//!
//! impl IntervalRenderer for NoopRenderer {
//!     fn render(&mut self, _pairs: &[Pair], _intervals: &[Interval]) {}
//! }
//!
//! struct FixedGrid;
//!
//! impl CellLocator for FixedGrid {
//!     fn cell_bounds(&self, note: i32, pulse: i32) -> Option<Rect> {
//!         Some(Rect::new(f64::from(pulse) * 10.0, f64::from(note) * 10.0, 10.0, 10.0))
//!     }
//!
//!     fn container_bounds(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 80.0, 120.0)
//!     }
//! }
//!
//! let mut sequencer = IntervalSequencer::builder()
//!     .renderer(NoopRenderer)
//!     .locator(FixedGrid)
//!     .build()
//!     .unwrap();
//!
//! let now = Instant::now();
//! sequencer.input(Field::Notes, "7 3", now);
//! sequencer.input(Field::Pulses, "0 1", now);
//! sequencer.tick(now + Duration::from_millis(50));
//!
//! assert_eq!(sequencer.pairs(), &[Pair::new(7, 0), Pair::new(3, 1)]);
//! assert_eq!(sequencer.intervals(), &[Interval::new(7, 1), Interval::new(-4, 1)]);
//! ```

pub mod config;
pub mod controller;
pub mod drag;
pub mod editor;
pub mod error;
pub mod sync;
pub mod timer;

pub use config::{ConfigError, SequencerConfig, SequencerConfigBuilder};
pub use controller::{
    IntervalRenderer, IntervalSequencer, IntervalSequencerBuilder, NotePreview, PairRef,
};
pub use drag::{CellLocator, DragCommit, DragHandler, DragMode, DragPreview, DragState, Rect};
pub use editor::{DualEditor, EditorEmission, EnterResult, Field, Notice};
pub use error::ControllerError;
pub use sync::{SyncGate, SyncManager, SyncToken};
pub use timer::{Debouncer, Timer};
