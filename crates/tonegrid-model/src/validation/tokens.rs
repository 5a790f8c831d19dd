//! Free-form axis text to validated value lists.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, TokenError};
use crate::pair::{AxisKind, AxisRange};

use super::scalar::validate_scalar;

/// Pattern matching one whitespace-delimited token.
const TOKEN_PATTERN: &str = r"\S+";

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("invalid regex pattern"))
}

/// Parsing policy for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisOptions {
    pub range: AxisRange,
    pub kind: AxisKind,
}

impl AxisOptions {
    /// Sound-axis policy: free order, duplicates kept.
    pub fn sound(range: AxisRange) -> Self {
        Self {
            range,
            kind: AxisKind::Sound,
        }
    }

    /// Time-axis policy: ascending, duplicates removed.
    pub fn time(range: AxisRange) -> Self {
        Self {
            range,
            kind: AxisKind::Time,
        }
    }
}

/// Result of parsing one axis text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// True when no fatal (non-informational) error was found.
    pub valid: bool,
    /// Valid values, canonicalized according to the axis policy.
    pub values: Vec<i32>,
    /// Every diagnostic, fatal ones first in token order, then sanitation notes.
    pub errors: Vec<TokenError>,
    /// True when dedup or reordering changed the sequence.
    pub sanitized: bool,
    /// Human-readable descriptions of sanitation changes.
    pub changes: Vec<String>,
}

impl ParseOutcome {
    /// Diagnostics that reject a token.
    pub fn fatal_errors(&self) -> impl Iterator<Item = &TokenError> {
        self.errors.iter().filter(|e| !e.is_informational())
    }

    /// Informational sanitation notes.
    pub fn notes(&self) -> impl Iterator<Item = &TokenError> {
        self.errors.iter().filter(|e| e.is_informational())
    }

    /// Returns true if any diagnostic carries `code`.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Canonical text for the parsed values.
    pub fn canonical_text(&self) -> String {
        serialize_axis(&self.values)
    }
}

/// Parse whitespace-delimited tokens into validated axis values.
///
/// Every token is validated on its own; rejected tokens produce a
/// [`TokenError`] carrying their index and byte span and are left out of
/// `values`. For [`AxisKind::Time`] the accepted values are then
/// de-duplicated (first occurrence wins) and sorted ascending, with one
/// informational note per change. Never panics.
///
/// # Example
/// ```
/// use tonegrid_model::pair::AxisRange;
/// use tonegrid_model::validation::{parse_axis_tokens, AxisOptions};
///
/// let range = AxisRange::new(0, 7).unwrap();
/// let outcome = parse_axis_tokens("4 1 6", AxisOptions::time(range));
/// assert_eq!(outcome.values, vec![1, 4, 6]);
/// assert!(outcome.sanitized);
/// ```
pub fn parse_axis_tokens(text: &str, options: AxisOptions) -> ParseOutcome {
    let mut values = Vec::new();
    let mut errors = Vec::new();

    for (index, token) in token_regex().find_iter(text).enumerate() {
        let result = validate_scalar(token.as_str(), options.range);
        match (result.value, result.error) {
            (Some(value), None) => values.push(value),
            (_, error) => {
                let code = error.unwrap_or(ErrorCode::NotANumber);
                errors.push(TokenError::at_token(
                    code,
                    token_message(code, token.as_str(), options.kind),
                    token.as_str(),
                    index,
                    token.range(),
                ));
            }
        }
    }

    let valid = errors.is_empty();
    let mut changes = Vec::new();

    if options.kind == AxisKind::Time {
        let mut seen = HashSet::with_capacity(values.len());
        let mut unique = Vec::with_capacity(values.len());
        for value in values {
            if seen.insert(value) {
                unique.push(value);
            } else {
                let message = format!("removed duplicate pulse {}", value);
                errors.push(TokenError::note(ErrorCode::DuplicateRemoved, message.clone()));
                changes.push(message);
            }
        }

        let mut sorted = unique.clone();
        sorted.sort_unstable();
        if sorted != unique {
            let message = format!(
                "reordered pulses ascending: {} -> {}",
                serialize_axis(&unique),
                serialize_axis(&sorted)
            );
            errors.push(TokenError::note(ErrorCode::ReorderedAscending, message.clone()));
            changes.push(message);
        }
        values = sorted;
    }

    if !changes.is_empty() {
        tracing::trace!(axis = %options.kind, changes = changes.len(), "sanitized axis tokens");
    }

    ParseOutcome {
        valid,
        values,
        errors,
        sanitized: !changes.is_empty(),
        changes,
    }
}

fn token_message(code: ErrorCode, token: &str, kind: AxisKind) -> String {
    let axis = match kind {
        AxisKind::Sound => "note",
        AxisKind::Time => "pulse",
    };
    match code {
        ErrorCode::OutOfRange { min, max } => {
            format!("{} '{}' is out of range [{}, {}]", axis, token, min, max)
        }
        _ => format!("'{}' is not a valid {} number", token, axis),
    }
}

/// Parse sound-axis text: order and duplicates preserved.
pub fn parse_notes(text: &str, range: AxisRange) -> ParseOutcome {
    parse_axis_tokens(text, AxisOptions::sound(range))
}

/// Parse time-axis text: forced ascending order, duplicates removed.
pub fn parse_pulses(text: &str, range: AxisRange) -> ParseOutcome {
    parse_axis_tokens(text, AxisOptions::time(range))
}

/// Serialize axis values as space-separated text.
pub fn serialize_axis(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
