#![no_main]

use libfuzzer_sys::fuzz_target;

use tonegrid_model::pair::AxisRange;
use tonegrid_model::validation::{parse_notes, parse_pulses, serialize_axis};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let range = AxisRange::from_count(128);

    let notes = parse_notes(text, range);
    assert!(notes.values.iter().all(|&v| range.contains(v)));

    let pulses = parse_pulses(text, range);
    assert!(pulses.values.windows(2).all(|w| w[0] < w[1]));

    // Sanitized output is a fixed point.
    let again = parse_pulses(&serialize_axis(&pulses.values), range);
    assert!(!again.sanitized);
    assert_eq!(again.values, pulses.values);

    for error in notes.errors.iter().chain(&pulses.errors) {
        if let Some(span) = error.span.clone() {
            assert_eq!(&text[span], error.token);
        }
    }
});
