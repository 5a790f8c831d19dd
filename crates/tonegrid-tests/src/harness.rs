//! A sequencer wired to recording collaborators and a manual clock.

use std::cell::RefCell;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tonegrid_editor::{Field, IntervalSequencer, SequencerConfig};

use crate::fixtures::{GridLocator, RecordingRenderer, RenderLog};

/// Test harness owning a sequencer and the clock that drives it.
pub struct SequencerHarness {
    pub sequencer: IntervalSequencer,
    pub locator: GridLocator,
    pub log: Rc<RefCell<RenderLog>>,
    pub auditions: Rc<RefCell<Vec<(i32, NonZeroU32)>>>,
    now: Instant,
}

impl SequencerHarness {
    /// Creates a harness with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SequencerConfig::default())
    }

    /// Creates a harness sized to `config`'s axes.
    pub fn with_config(config: SequencerConfig) -> Self {
        let notes = config.note_range.max() + 1;
        let pulses = config.pulse_range.max() + 1;
        let locator = GridLocator::new(notes, pulses);
        let renderer = RecordingRenderer::new();
        let log = renderer.log();
        let auditions = Rc::new(RefCell::new(Vec::new()));
        let sink = auditions.clone();

        let sequencer = IntervalSequencer::builder()
            .config(config)
            .renderer(renderer)
            .locator(locator)
            .note_preview(move |note: i32, length: NonZeroU32| sink.borrow_mut().push((note, length)))
            .build()
            .expect("Failed to build sequencer");

        Self {
            sequencer,
            locator,
            log,
            auditions,
            now: Instant::now(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Moves the clock forward and ticks the sequencer.
    pub fn advance(&mut self, by: Duration) -> bool {
        self.now += by;
        self.sequencer.tick(self.now)
    }

    /// Types into a field at the current instant.
    pub fn type_text(&mut self, field: Field, text: &str) {
        self.sequencer.input(field, text, self.now);
    }

    /// Types both fields and waits out the debounce window.
    pub fn type_and_settle(&mut self, notes: &str, pulses: &str) -> bool {
        self.type_text(Field::Notes, notes);
        self.type_text(Field::Pulses, pulses);
        let window = self.sequencer.config().debounce();
        self.advance(window)
    }

    /// Drags across a row from `from` to `to` and releases.
    pub fn drag(&mut self, note: i32, from: i32, to: i32) -> bool {
        if !self.sequencer.pointer_down(note, from) {
            return false;
        }
        let x = self.locator.x_of(to);
        self.sequencer.pointer_move(x);
        self.sequencer.pointer_up()
    }
}

impl Default for SequencerHarness {
    fn default() -> Self {
        Self::new()
    }
}
