//! tonegrid Sequence Model
//!
//! This crate holds the data model behind the tonegrid sequencer: a musical
//! sequence placed on a bounded *sound* axis (notes) and a bounded *time*
//! axis (pulses), kept in three equivalent shapes:
//!
//! - **Pairs**: absolute `(note, pulse, temporal_interval, is_rest)` events
//! - **Intervals**: a relative `(sound_interval, temporal_interval, is_rest)`
//!   chain anchored at a base pair
//! - **Memory grid**: every cell ever toggled on, surviving axis resizes
//!
//! # Example
//!
//! ```
//! use tonegrid_model::interval::{build_pairs_from_intervals, fill_gaps_with_silences, pairs_to_intervals, BuildOptions};
//! use tonegrid_model::pair::{BasePair, Pair};
//!
//! let base = BasePair::new(0, 0);
//! let pairs = fill_gaps_with_silences(&[Pair::new(7, 0), Pair::new(3, 4)], base);
//! assert_eq!(pairs.len(), 3);
//! assert!(pairs[1].is_rest);
//!
//! let intervals = pairs_to_intervals(&pairs, base);
//! let rebuilt = build_pairs_from_intervals(base, &intervals, BuildOptions::default());
//! assert_eq!(rebuilt, pairs);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Diagnostic codes and error types
//! - [`pair`]: Pair, interval, base pair, and axis range types
//! - [`validation`]: Scalar validation, token parsing, sequence validation
//! - [`store`]: The pair store and memory grid
//! - [`interval`]: Pair/interval conversion and gap filling
//! - [`listeners`]: Change-listener registry

pub mod error;
pub mod interval;
pub mod listeners;
pub mod pair;
pub mod store;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{ErrorCode, ModelError, SequenceError, TokenError};
pub use interval::{
    build_pairs_from_intervals, calculate_total_duration, detect_gaps, fill_gaps_with_silences,
    pairs_to_intervals, remove_silences, BuildOptions, Gap,
};
pub use listeners::{ListenerId, Listeners};
pub use pair::{AxisKind, AxisRange, BasePair, Interval, Pair};
pub use store::{MemoryGrid, PairStore};
pub use validation::{
    parse_axis_tokens, parse_notes, parse_pulses, serialize_axis, validate_interval_sequence,
    validate_pair_sequence, validate_scalar, AxisOptions, ParseOutcome, ScalarResult,
    SequenceBounds, SequenceValidation,
};
