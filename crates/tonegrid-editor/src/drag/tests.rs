//! Tests for the drag state machine.

use pretty_assertions::assert_eq;

use super::*;

/// Twelve notes by eight pulses, 50 units per pulse, 20 per note.
struct Grid;

impl CellLocator for Grid {
    fn cell_bounds(&self, note: i32, pulse: i32) -> Option<Rect> {
        ((0..12).contains(&note) && (0..8).contains(&pulse)).then(|| {
            Rect::new(f64::from(pulse) * 50.0, f64::from(note) * 20.0, 50.0, 20.0)
        })
    }

    fn container_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 400.0, 240.0)
    }
}

fn x_of(pulse: i32) -> f64 {
    f64::from(pulse) * 50.0 + 25.0
}

fn long(note: i32, pulse: i32, length: u32) -> Pair {
    Pair::with_interval(note, pulse, NonZeroU32::new(length).unwrap())
}

// ============================================================================
// Create mode
// ============================================================================

#[test]
fn test_create_without_polyphony_removes_overlaps() {
    let pairs = vec![long(3, 1, 3)];
    let mut drag = DragHandler::new(8);

    let preview = drag.pointer_down(5, 2, &pairs, &Grid).unwrap();
    assert_eq!(preview, DragPreview { note: 5, start: 2, end: 2 });
    assert!(matches!(
        drag.state(),
        DragState::Dragging(DragSession { mode: DragMode::Create, .. })
    ));

    let commit = drag.pointer_up(&pairs).unwrap();
    assert_eq!(commit.pairs, vec![Pair::new(5, 2)]);
    assert_eq!(commit.created, Some(Pair::new(5, 2)));
    assert!(!drag.is_dragging());
}

#[test]
fn test_create_with_polyphony_keeps_overlaps() {
    let pairs = vec![long(3, 1, 3)];
    let mut drag = DragHandler::new(8).with_polyphony(true);

    drag.pointer_down(5, 2, &pairs, &Grid);
    let commit = drag.pointer_up(&pairs).unwrap();
    assert_eq!(commit.pairs, vec![long(3, 1, 3), Pair::new(5, 2)]);
}

#[test]
fn test_create_backwards_drag_normalizes_span() {
    let pairs = vec![Pair::new(0, 0), Pair::new(1, 6)];
    let mut drag = DragHandler::new(8);

    drag.pointer_down(4, 5, &pairs, &Grid);
    let preview = drag.pointer_move(x_of(2), &Grid).unwrap();
    assert_eq!(preview, DragPreview { note: 4, start: 2, end: 5 });

    let commit = drag.pointer_up(&pairs).unwrap();
    assert_eq!(commit.pairs, vec![Pair::new(0, 0), long(4, 2, 4), Pair::new(1, 6)]);
}

#[test]
fn test_pointer_move_clamps_to_axis() {
    let mut drag = DragHandler::new(8);
    drag.pointer_down(0, 6, &[], &Grid);

    assert_eq!(drag.pointer_move(10_000.0, &Grid).unwrap().end, 7);
    assert_eq!(drag.pointer_move(-50.0, &Grid).unwrap().start, 0);
}

// ============================================================================
// Edit mode
// ============================================================================

#[test]
fn test_edit_resizes_in_place() {
    let pairs = vec![Pair::new(2, 0), Pair::new(7, 3), Pair::new(4, 6)];
    let mut drag = DragHandler::new(8);

    drag.pointer_down(7, 3, &pairs, &Grid);
    assert!(matches!(
        drag.state(),
        DragState::Dragging(DragSession {
            mode: DragMode::Edit { index: 1, .. },
            ..
        })
    ));
    drag.pointer_move(x_of(5), &Grid);

    let commit = drag.pointer_up(&pairs).unwrap();
    assert_eq!(commit.pairs, vec![Pair::new(2, 0), long(7, 3, 3), Pair::new(4, 6)]);
    assert_eq!(commit.created, None);
}

#[test]
fn test_edit_targets_captured_index_among_equal_pairs() {
    let pairs = vec![Pair::new(7, 3), Pair::new(7, 3)];
    let mut drag = DragHandler::new(8).with_polyphony(true);

    drag.pointer_down(7, 3, &pairs, &Grid);
    drag.pointer_move(x_of(4), &Grid);
    let commit = drag.pointer_up(&pairs).unwrap();
    assert_eq!(commit.pairs, vec![long(7, 3, 2), Pair::new(7, 3)]);
}

#[test]
fn test_edit_without_polyphony_removes_overlaps() {
    let rest = Pair::rest(7, 1, NonZeroU32::new(3).unwrap());
    let pairs = vec![Pair::new(7, 0), rest, Pair::new(3, 4)];
    let mut drag = DragHandler::new(8);

    drag.pointer_down(7, 0, &pairs, &Grid);
    drag.pointer_move(x_of(2), &Grid);
    let commit = drag.pointer_up(&pairs).unwrap();
    assert_eq!(commit.pairs, vec![long(7, 0, 3), Pair::new(3, 4)]);
}

#[test]
fn test_edit_with_polyphony_keeps_overlaps() {
    let pairs = vec![Pair::new(7, 0), Pair::new(2, 2)];
    let mut drag = DragHandler::new(8).with_polyphony(true);

    drag.pointer_down(7, 0, &pairs, &Grid);
    drag.pointer_move(x_of(3), &Grid);
    let commit = drag.pointer_up(&pairs).unwrap();
    assert_eq!(commit.pairs, vec![long(7, 0, 4), Pair::new(2, 2)]);
}

#[test]
fn test_edit_discarded_when_pair_moved() {
    let pairs = vec![Pair::new(2, 0), Pair::new(7, 3)];
    let mut drag = DragHandler::new(8);

    drag.pointer_down(7, 3, &pairs, &Grid);
    assert_eq!(drag.pointer_up(&pairs[1..]), None);
    assert!(!drag.is_dragging());
}

#[test]
fn test_rest_cell_starts_create() {
    let pairs = vec![Pair::rest(2, 1, NonZeroU32::new(2).unwrap())];
    let mut drag = DragHandler::new(8);

    drag.pointer_down(2, 1, &pairs, &Grid);
    let commit = drag.pointer_up(&pairs).unwrap();
    assert_eq!(commit.pairs, vec![Pair::new(2, 1)]);
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_disable_mid_drag_cancels_without_commit() {
    let mut drag = DragHandler::new(8);
    drag.pointer_down(1, 1, &[], &Grid);

    assert!(drag.set_enabled(false));
    assert_eq!(drag.state(), &DragState::Idle);
    assert_eq!(drag.pointer_up(&[]), None);
    assert_eq!(drag.pointer_down(1, 1, &[], &Grid), None);

    assert!(!drag.set_enabled(true));
    assert!(drag.pointer_down(1, 1, &[], &Grid).is_some());
}

#[test]
fn test_pointer_down_outside_grid_is_ignored() {
    let mut drag = DragHandler::new(8);
    assert_eq!(drag.pointer_down(1, 8, &[], &Grid), None);
    assert_eq!(drag.pointer_down(12, 0, &[], &Grid), None);
    assert_eq!(drag.pointer_down(0, -1, &[], &Grid), None);
    assert!(!drag.is_dragging());
    assert_eq!(drag.pointer_move(x_of(3), &Grid), None);
}

#[test]
fn test_new_press_replaces_stale_drag() {
    let mut drag = DragHandler::new(8);
    drag.pointer_down(1, 1, &[], &Grid);
    drag.pointer_move(x_of(4), &Grid);

    let preview = drag.pointer_down(9, 6, &[], &Grid).unwrap();
    assert_eq!(preview, DragPreview { note: 9, start: 6, end: 6 });
}
