//! Interval conversion and gap filling.
//!
//! All functions here are pure. Conversion walks pairs in stored order;
//! gap handling always re-sorts by pulse first, so callers may pass pairs
//! in any order.

mod convert;
mod gaps;


pub use convert::{build_pairs_from_intervals, pairs_to_intervals, BuildOptions};
pub use gaps::{
    calculate_total_duration, detect_gaps, fill_gaps_with_silences, is_gap_free,
    remove_silences, Gap,
};
