//! Tests for the sequencer controller.

use std::cell::RefCell;
use std::num::NonZeroU32;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use tonegrid_model::error::ErrorCode;

use super::*;
use crate::drag::{DragPreview, Rect};

#[derive(Debug, Default)]
struct Log {
    renders: Vec<Vec<Pair>>,
    previews: Vec<DragPreview>,
    cleared: usize,
    highlights: Vec<(usize, Duration)>,
    auditions: Vec<(i32, u32)>,
}

#[derive(Clone)]
struct Recorder(Rc<RefCell<Log>>);

impl IntervalRenderer for Recorder {
    fn render(&mut self, pairs: &[Pair], _intervals: &[Interval]) {
        self.0.borrow_mut().renders.push(pairs.to_vec());
    }

    fn show_drag_preview(&mut self, preview: DragPreview) {
        self.0.borrow_mut().previews.push(preview);
    }

    fn clear_drag_preview(&mut self) {
        self.0.borrow_mut().cleared += 1;
    }

    fn highlight_interval(&mut self, index: usize, duration: Duration) {
        self.0.borrow_mut().highlights.push((index, duration));
    }
}

struct Grid;

impl CellLocator for Grid {
    fn cell_bounds(&self, note: i32, pulse: i32) -> Option<Rect> {
        ((0..12).contains(&note) && (0..8).contains(&pulse))
            .then(|| Rect::new(f64::from(pulse) * 10.0, f64::from(note) * 10.0, 10.0, 10.0))
    }

    fn container_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 80.0, 120.0)
    }
}

fn sequencer_with(config: SequencerConfig) -> (IntervalSequencer, Rc<RefCell<Log>>) {
    let log = Rc::new(RefCell::new(Log::default()));
    let auditions = log.clone();
    let sequencer = IntervalSequencer::builder()
        .config(config)
        .renderer(Recorder(log.clone()))
        .locator(Grid)
        .note_preview(move |note: i32, length: NonZeroU32| {
            auditions.borrow_mut().auditions.push((note, length.get()));
        })
        .build()
        .unwrap();
    (sequencer, log)
}

fn sequencer() -> (IntervalSequencer, Rc<RefCell<Log>>) {
    sequencer_with(SequencerConfig::builder().fill_gaps_on_drag(false).build().unwrap())
}

fn long(note: i32, pulse: i32, length: u32) -> Pair {
    Pair::with_interval(note, pulse, NonZeroU32::new(length).unwrap())
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_build_requires_collaborators() {
    let err = IntervalSequencer::builder().locator(Grid).build().unwrap_err();
    assert!(matches!(err, ControllerError::MissingCollaborator("renderer")));

    let log = Rc::new(RefCell::new(Log::default()));
    let err = IntervalSequencer::builder()
        .renderer(Recorder(log))
        .build()
        .unwrap_err();
    assert!(matches!(err, ControllerError::MissingCollaborator("locator")));
}

#[test]
fn test_build_rejects_invalid_config() {
    let config = SequencerConfig {
        base_pair: BasePair::new(40, 0),
        ..SequencerConfig::default()
    };
    let log = Rc::new(RefCell::new(Log::default()));
    let err = IntervalSequencer::builder()
        .config(config)
        .renderer(Recorder(log))
        .locator(Grid)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Config(ConfigError::BaseNoteOutOfRange { note: 40, .. })
    ));
}

#[test]
fn test_build_renders_once() {
    let (_sequencer, log) = sequencer();
    assert_eq!(log.borrow().renders, vec![Vec::<Pair>::new()]);
}

// ============================================================================
// Programmatic control
// ============================================================================

#[test]
fn test_set_pairs_publishes_intervals() {
    let (mut sequencer, log) = sequencer();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    sequencer.on_intervals_change(move |intervals| sink.borrow_mut().push(intervals.to_vec()));

    assert!(sequencer.set_pairs(vec![Pair::new(3, 0), Pair::new(5, 1)]));
    let expected = vec![Interval::new(3, 1), Interval::new(2, 1)];
    assert_eq!(sequencer.intervals(), expected.as_slice());
    assert_eq!(*seen.borrow(), vec![expected]);
    assert_eq!(log.borrow().renders.len(), 2);
    assert_eq!(sequencer.editor().text(Field::Notes), "3 5");
}

#[test]
fn test_set_intervals_builds_from_base() {
    let config = SequencerConfig::builder()
        .base_pair(BasePair::new(5, 0))
        .build()
        .unwrap();
    let (mut sequencer, _log) = sequencer_with(config);

    sequencer.set_intervals(&[
        Interval::new(2, 2),
        Interval::new(0, 0),
        Interval::rest(1),
        Interval::new(-4, 1),
    ]);
    assert_eq!(
        sequencer.pairs(),
        &[
            long(7, 0, 2),
            Pair::rest(7, 2, NonZeroU32::MIN),
            Pair::new(3, 3)
        ]
    );
}

#[test]
fn test_add_pair_rejects_out_of_axis_cells() {
    let (mut sequencer, _log) = sequencer();
    assert!(!sequencer.add_pair(12, 0));
    assert!(!sequencer.add_pair(0, 8));
    assert!(sequencer.add_pair(11, 7));
    assert!(!sequencer.add_pair(11, 7));
}

#[test]
fn test_set_pairs_rejects_lists_leaving_the_grid() {
    let (mut sequencer, log) = sequencer();
    sequencer.set_pairs(vec![Pair::new(3, 0)]);
    let renders = log.borrow().renders.len();

    assert!(!sequencer.set_pairs(vec![Pair::new(1, i32::MAX)]));
    assert!(!sequencer.set_pairs(vec![Pair::new(3, 0), Pair::new(12, 1)]));
    assert!(!sequencer.set_pairs(vec![Pair::with_interval(0, 0, NonZeroU32::MAX)]));
    assert!(!sequencer.set_intervals(&[Interval::new(40, 1)]));

    assert_eq!(sequencer.pairs(), &[Pair::new(3, 0)]);
    assert!(sequencer.gaps().is_empty());
    assert_eq!(log.borrow().renders.len(), renders);
}

#[test]
fn test_remove_by_index_and_position() {
    let (mut sequencer, _log) = sequencer();
    sequencer.set_pairs(vec![Pair::new(1, 0), Pair::new(2, 1), Pair::new(3, 2)]);

    assert!(sequencer.remove_pair(PairRef::Index(1)));
    assert!(sequencer.remove_pair(PairRef::Position { note: 3, pulse: 2 }));
    assert!(!sequencer.remove_pair(PairRef::Index(5)));
    assert_eq!(sequencer.pairs(), &[Pair::new(1, 0)]);
}

#[test]
fn test_toggle_cell() {
    let (mut sequencer, _log) = sequencer();
    assert!(sequencer.toggle_cell(4, 4));
    assert_eq!(sequencer.pairs(), &[Pair::new(4, 4)]);
    assert!(sequencer.toggle_cell(4, 4));
    assert!(sequencer.pairs().is_empty());
}

#[test]
fn test_gaps_and_fill() {
    let (mut sequencer, _log) = sequencer();
    sequencer.set_pairs(vec![Pair::new(7, 0), Pair::new(3, 4)]);

    assert_eq!(sequencer.gaps(), vec![Gap { start_pulse: 1, size: 3 }]);
    assert!(sequencer.fill_current_gaps());
    assert_eq!(
        sequencer.pairs(),
        &[
            Pair::new(7, 0),
            Pair::rest(7, 1, NonZeroU32::new(3).unwrap()),
            Pair::new(3, 4)
        ]
    );
    assert!(sequencer.gaps().is_empty());
    assert!(!sequencer.fill_current_gaps());
    assert!(sequencer.validate().valid);
}

#[test]
fn test_validate_reports_continuity() {
    let (mut sequencer, _log) = sequencer();
    sequencer.set_pairs(vec![Pair::new(7, 0), Pair::new(3, 4)]);

    let validation = sequencer.validate();
    assert!(!validation.valid);
    assert_eq!(validation.invalid_index, Some(1));
    assert_eq!(validation.errors[0].code, ErrorCode::PulseContinuityBroken);
}

#[test]
fn test_highlight_delegates_to_renderer() {
    let (mut sequencer, log) = sequencer();
    assert!(!sequencer.highlight_interval(0, 300));

    sequencer.set_pairs(vec![Pair::new(1, 0)]);
    assert!(sequencer.highlight_interval(0, 300));
    assert_eq!(log.borrow().highlights, vec![(0, Duration::from_millis(300))]);
}

#[test]
fn test_set_base_pair_republishes() {
    let (mut sequencer, _log) = sequencer();
    sequencer.set_pairs(vec![Pair::new(4, 0)]);
    assert_eq!(sequencer.intervals(), &[Interval::new(4, 1)]);

    sequencer.set_base_pair(BasePair::new(2, 0)).unwrap();
    assert_eq!(sequencer.intervals(), &[Interval::new(2, 1)]);
    assert!(sequencer.set_base_pair(BasePair::new(0, 99)).is_err());
    assert_eq!(sequencer.config().base_pair, BasePair::new(2, 0));
}

#[test]
fn test_resize_round_trip_restores_cells() {
    let (mut sequencer, _log) = sequencer();
    sequencer.set_pairs(vec![Pair::new(2, 1), Pair::new(10, 6)]);

    assert!(sequencer.resize(8, 8));
    assert_eq!(sequencer.pairs(), &[Pair::new(2, 1)]);
    assert!(!sequencer.add_pair(10, 6));

    assert!(sequencer.resize(12, 8));
    assert_eq!(sequencer.pairs(), &[Pair::new(2, 1), Pair::new(10, 6)]);
}

// ============================================================================
// Editor events
// ============================================================================

#[test]
fn test_typing_commits_after_debounce() {
    let (mut sequencer, _log) = sequencer();
    let t0 = Instant::now();
    sequencer.input(Field::Notes, "7 3", t0);
    sequencer.input(Field::Pulses, "0 1", t0);

    assert!(!sequencer.tick(t0 + Duration::from_millis(49)));
    assert!(sequencer.tick(t0 + Duration::from_millis(50)));
    assert_eq!(sequencer.intervals(), &[Interval::new(7, 1), Interval::new(-4, 1)]);
}

#[test]
fn test_enter_commits_immediately() {
    let (mut sequencer, _log) = sequencer();
    sequencer.input(Field::Notes, "1", Instant::now());
    sequencer.input(Field::Pulses, "0", Instant::now());

    let result = sequencer.press_enter(Field::Pulses).unwrap();
    assert_eq!(result.focus, None);
    assert_eq!(sequencer.pairs(), &[Pair::new(1, 0)]);
}

// ============================================================================
// Pointer events
// ============================================================================

#[test]
fn test_drag_creates_and_auditions() {
    let (mut sequencer, log) = sequencer();
    assert!(sequencer.pointer_down(5, 2));
    assert!(sequencer.pointer_move(45.0));
    assert!(sequencer.pointer_up());

    assert_eq!(sequencer.pairs(), &[long(5, 2, 3)]);
    let log = log.borrow();
    assert_eq!(log.auditions, vec![(5, 3)]);
    assert_eq!(
        log.previews.last(),
        Some(&DragPreview { note: 5, start: 2, end: 4 })
    );
}

#[test]
fn test_drag_edit_does_not_audition() {
    let (mut sequencer, log) = sequencer();
    sequencer.set_pairs(vec![Pair::new(5, 2)]);

    sequencer.pointer_down(5, 2);
    sequencer.pointer_move(35.0);
    assert!(sequencer.pointer_up());
    assert_eq!(sequencer.pairs(), &[long(5, 2, 2)]);
    assert!(log.borrow().auditions.is_empty());
}

#[test]
fn test_drag_fills_gaps_when_configured() {
    let (mut sequencer, _log) = sequencer_with(SequencerConfig::default());
    sequencer.pointer_down(5, 2);
    sequencer.pointer_up();

    assert_eq!(
        sequencer.pairs(),
        &[Pair::rest(0, 0, NonZeroU32::new(2).unwrap()), Pair::new(5, 2)]
    );
    assert_eq!(sequencer.editor().text(Field::Notes), "5");
}

#[test]
fn test_polyphony_controls_overlap_removal() {
    let (mut sequencer, _log) = sequencer();
    sequencer.set_pairs(vec![long(3, 1, 3)]);
    sequencer.pointer_down(5, 2);
    sequencer.pointer_up();
    assert_eq!(sequencer.pairs(), &[Pair::new(5, 2)]);

    sequencer.set_pairs(vec![long(3, 1, 3)]);
    sequencer.set_polyphony(true);
    sequencer.pointer_down(5, 2);
    sequencer.pointer_up();
    assert_eq!(sequencer.pairs(), &[long(3, 1, 3), Pair::new(5, 2)]);
}

#[test]
fn test_disabling_drag_cancels() {
    let (mut sequencer, log) = sequencer();
    sequencer.pointer_down(5, 2);
    let cleared = log.borrow().cleared;

    sequencer.set_drag_enabled(false);
    assert_eq!(log.borrow().cleared, cleared + 1);
    assert!(!sequencer.pointer_up());
    assert!(sequencer.pairs().is_empty());
    assert!(!sequencer.pointer_down(5, 2));
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_destroy_releases_everything() {
    let (mut sequencer, log) = sequencer();
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    sequencer.on_pairs_change(move |_| *counter.borrow_mut() += 1);
    sequencer.set_pairs(vec![Pair::new(1, 1)]);
    sequencer.input(Field::Notes, "4", Instant::now());
    sequencer.pointer_down(2, 2);

    sequencer.destroy();
    sequencer.destroy();
    assert!(sequencer.is_destroyed());
    assert!(sequencer.pairs().is_empty());
    assert!(sequencer.intervals().is_empty());
    assert_eq!(sequencer.drag_state(), &DragState::Idle);

    let renders = log.borrow().renders.len();
    assert!(!sequencer.set_pairs(vec![Pair::new(3, 3)]));
    assert!(!sequencer.add_pair(3, 3));
    assert!(!sequencer.clear());
    assert!(!sequencer.tick(Instant::now() + Duration::from_secs(1)));
    assert!(!sequencer.pointer_down(2, 2));
    assert_eq!(log.borrow().renders.len(), renders);
    assert_eq!(*calls.borrow(), 1);
}
