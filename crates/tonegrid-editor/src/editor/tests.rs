//! Tests for the dual text editor.

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use super::*;

fn editor() -> DualEditor {
    DualEditor::new(
        AxisRange::new(0, 11).unwrap(),
        AxisRange::new(0, 7).unwrap(),
        Duration::from_millis(2000),
    )
}

#[test]
fn test_input_zips_pairs() {
    let mut editor = editor();
    let now = Instant::now();
    editor.input(Field::Notes, "7 3 5", now);
    let emission = editor.input(Field::Pulses, "0 4", now);

    assert_eq!(emission.notes, vec![7, 3, 5]);
    assert_eq!(emission.pulses, vec![0, 4]);
    assert_eq!(emission.pairs, vec![Pair::new(7, 0), Pair::new(3, 4)]);
    assert_eq!(emission.unpaired, 1);
}

#[test]
fn test_typing_keeps_raw_text() {
    let mut editor = editor();
    let emission = editor.input(Field::Pulses, "4 1 1 ", Instant::now());

    assert_eq!(editor.text(Field::Pulses), "4 1 1 ");
    assert_eq!(emission.pulses, vec![1, 4]);
    assert!(!emission.has_fatal_errors());
    assert_eq!(emission.errors.len(), 2);
}

#[test]
fn test_enter_sanitizes_and_advances_focus() {
    let mut editor = editor();
    editor.input(Field::Notes, " 7   3 x", Instant::now());

    let result = editor.press_enter(Field::Notes);
    assert!(result.rewritten);
    assert_eq!(result.focus, Some(Field::Pulses));
    assert_eq!(editor.text(Field::Notes), "7 3");

    editor.input(Field::Pulses, "6 2 2", Instant::now());
    let result = editor.press_enter(Field::Pulses);
    assert_eq!(result.focus, None);
    assert_eq!(editor.text(Field::Pulses), "2 6");

    let again = editor.press_enter(Field::Pulses);
    assert!(!again.rewritten);
}

#[test]
fn test_blur_sanitizes_without_moving_focus_elsewhere() {
    let mut editor = editor();
    editor.input(Field::Pulses, "3 1", Instant::now());
    assert_eq!(editor.focused(), Some(Field::Pulses));

    assert!(editor.blur(Field::Pulses));
    assert_eq!(editor.focused(), None);
    assert_eq!(editor.text(Field::Pulses), "1 3");
}

#[test]
fn test_out_of_range_notice_expires() {
    let mut editor = editor();
    let t0 = Instant::now();
    let emission = editor.input(Field::Notes, "2 14", t0);

    assert!(emission.has_fatal_errors());
    assert_eq!(editor.notices().len(), 1);
    assert_eq!(editor.notices()[0].error.token, "14");

    assert!(!editor.tick(t0 + Duration::from_millis(1999)));
    assert!(editor.tick(t0 + Duration::from_millis(2000)));
    assert!(editor.notices().is_empty());
}

#[test]
fn test_not_a_number_raises_no_notice() {
    let mut editor = editor();
    let emission = editor.input(Field::Notes, "2 re", Instant::now());
    assert!(emission.has_fatal_errors());
    assert!(editor.notices().is_empty());
}

#[test]
fn test_new_input_replaces_field_notices() {
    let mut editor = editor();
    let now = Instant::now();
    editor.input(Field::Notes, "20", now);
    editor.input(Field::Pulses, "9", now);
    assert_eq!(editor.notices().len(), 2);

    editor.input(Field::Notes, "2", now);
    assert_eq!(editor.notices().len(), 1);
    assert_eq!(editor.notices()[0].field, Field::Pulses);
}

#[test]
fn test_set_from_pairs_skips_rests() {
    let mut editor = editor();
    editor.set_from_pairs(&[
        Pair::new(7, 0),
        Pair::rest(7, 1, NonZeroU32::new(3).unwrap()),
        Pair::new(3, 4),
    ]);
    assert_eq!(editor.text(Field::Notes), "7 3");
    assert_eq!(editor.text(Field::Pulses), "0 4");
    assert_eq!(editor.emission().pairs, vec![Pair::new(7, 0), Pair::new(3, 4)]);
}
