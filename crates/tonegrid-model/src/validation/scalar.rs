//! Single-value validation against an axis range.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ErrorCode;
use crate::pair::AxisRange;

/// Pattern for numeric-looking tokens: optional sign, then digits.
const INTEGER_PATTERN: &str = r"^[+-]?[0-9]+$";

static INTEGER_REGEX: OnceLock<Regex> = OnceLock::new();

fn integer_regex() -> &'static Regex {
    INTEGER_REGEX.get_or_init(|| Regex::new(INTEGER_PATTERN).expect("invalid regex pattern"))
}

/// Outcome of validating one raw scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarResult {
    /// Whether the scalar is a valid in-range integer.
    pub valid: bool,
    /// Parsed value when valid.
    pub value: Option<i32>,
    /// Failure reason when invalid.
    pub error: Option<ErrorCode>,
}

impl ScalarResult {
    fn ok(value: i32) -> Self {
        Self {
            valid: true,
            value: Some(value),
            error: None,
        }
    }

    fn fail(error: ErrorCode) -> Self {
        Self {
            valid: false,
            value: None,
            error: Some(error),
        }
    }

    /// Converts to a `Result` for callers that want `?`.
    pub fn into_result(self) -> Result<i32, ErrorCode> {
        match (self.value, self.error) {
            (Some(value), None) => Ok(value),
            (_, Some(error)) => Err(error),
            (None, None) => Err(ErrorCode::NotANumber),
        }
    }
}

/// Validate a raw scalar against an inclusive axis range.
///
/// Numeric-looking input is an optionally signed run of ASCII digits,
/// surrounding whitespace ignored. Integers too large for `i32` are reported
/// as out of range rather than as not-a-number.
///
/// # Example
/// ```
/// use tonegrid_model::pair::AxisRange;
/// use tonegrid_model::validation::validate_scalar;
///
/// let range = AxisRange::new(0, 11).unwrap();
/// assert_eq!(validate_scalar("7", range).value, Some(7));
/// assert!(!validate_scalar("12", range).valid);
/// assert!(!validate_scalar("do", range).valid);
/// ```
pub fn validate_scalar(raw: &str, range: AxisRange) -> ScalarResult {
    let out_of_range = ErrorCode::OutOfRange {
        min: range.min(),
        max: range.max(),
    };

    let trimmed = raw.trim();
    if !integer_regex().is_match(trimmed) {
        return ScalarResult::fail(ErrorCode::NotANumber);
    }

    // Digits already matched, so a parse failure can only mean overflow.
    let Ok(value) = trimmed.parse::<i32>() else {
        return ScalarResult::fail(out_of_range);
    };

    if !range.contains(value) {
        return ScalarResult::fail(out_of_range);
    }

    ScalarResult::ok(value)
}
