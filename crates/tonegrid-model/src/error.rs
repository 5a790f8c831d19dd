//! Error types for token parsing, sequence validation, and model construction.

use std::ops::Range;

use thiserror::Error;

/// Diagnostic codes shared by the token parser and the sequence validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Fatal errors (E001-E004)
    /// E001: Token is not an integer
    NotANumber,
    /// E002: Value lies outside the axis range
    OutOfRange { min: i32, max: i32 },
    /// E003: Pulse does not follow the previous pair's end
    PulseContinuityBroken,
    /// E004: Temporal interval is zero or negative
    NonPositiveInterval,

    // Informational notes emitted by time-axis sanitation (I001-I002)
    /// I001: A duplicate pulse was removed
    DuplicateRemoved,
    /// I002: Pulses were reordered ascending
    ReorderedAscending,
}

impl ErrorCode {
    /// Returns the code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NotANumber => "E001",
            ErrorCode::OutOfRange { .. } => "E002",
            ErrorCode::PulseContinuityBroken => "E003",
            ErrorCode::NonPositiveInterval => "E004",
            ErrorCode::DuplicateRemoved => "I001",
            ErrorCode::ReorderedAscending => "I002",
        }
    }

    /// Informational codes always accompany a successful, corrected value.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            ErrorCode::DuplicateRemoved | ErrorCode::ReorderedAscending
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A diagnostic attached to one token of an axis text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenError {
    /// The diagnostic code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// The raw token text (empty for whole-list notes).
    pub token: String,
    /// Position of the token among the whitespace-delimited tokens.
    pub token_index: Option<usize>,
    /// Byte span of the token in the source text.
    pub span: Option<Range<usize>>,
}

impl TokenError {
    /// Creates a diagnostic bound to a token.
    pub fn at_token(
        code: ErrorCode,
        message: impl Into<String>,
        token: impl Into<String>,
        token_index: usize,
        span: Range<usize>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            token: token.into(),
            token_index: Some(token_index),
            span: Some(span),
        }
    }

    /// Creates a note about the whole list (sanitation notes).
    pub fn note(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            token: String::new(),
            token_index: None,
            span: None,
        }
    }

    /// Returns true if this diagnostic is informational only.
    pub fn is_informational(&self) -> bool {
        self.code.is_informational()
    }
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.token_index {
            Some(index) => write!(f, "{}: {} (token {})", self.code, self.message, index),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for TokenError {}

/// A diagnostic attached to one element of a pair or interval sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceError {
    /// The diagnostic code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Index of the offending element.
    pub index: usize,
}

impl SequenceError {
    /// Creates a new sequence diagnostic.
    pub fn new(code: ErrorCode, message: impl Into<String>, index: usize) -> Self {
        Self {
            code,
            message: message.into(),
            index,
        }
    }
}

impl std::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at [{}])", self.code, self.message, self.index)
    }
}

impl std::error::Error for SequenceError {}

/// Errors raised when constructing model values at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A temporal interval must be at least one pulse long.
    #[error("temporal interval must be >= 1, got {0}")]
    NonPositiveInterval(i64),

    /// An axis range with min greater than max.
    #[error("invalid axis range [{min}, {max}]: min must not exceed max")]
    InvalidRange { min: i32, max: i32 },
}
