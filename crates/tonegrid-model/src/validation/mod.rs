//! Validation for scalars, axis text, and whole sequences.
//!
//! Nothing in this module panics or returns early on bad input: every check
//! produces a structured result carrying `valid`, the accepted value(s), and
//! the full list of diagnostics so callers can render them inline.

mod scalar;
mod sequence;
mod tokens;


pub use scalar::{validate_scalar, ScalarResult};
pub use sequence::{
    validate_interval_sequence, validate_pair_sequence, SequenceBounds, SequenceValidation,
};
pub use tokens::{
    parse_axis_tokens, parse_notes, parse_pulses, serialize_axis, AxisOptions, ParseOutcome,
};
