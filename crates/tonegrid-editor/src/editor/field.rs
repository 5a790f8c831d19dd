//! One text surface bound to one axis.

use tonegrid_model::pair::{AxisKind, AxisRange};
use tonegrid_model::validation::{parse_axis_tokens, AxisOptions, ParseOutcome};

/// Identifies one of the two editor fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Sound-axis text.
    Notes,
    /// Time-axis text.
    Pulses,
}

impl Field {
    /// The axis a field edits.
    pub fn axis(&self) -> AxisKind {
        match self {
            Field::Notes => AxisKind::Sound,
            Field::Pulses => AxisKind::Time,
        }
    }

    /// Focus target after Enter: notes advance to pulses, pulses release focus.
    pub fn next(&self) -> Option<Field> {
        match self {
            Field::Notes => Some(Field::Pulses),
            Field::Pulses => None,
        }
    }
}

/// Raw text plus its latest parse.
///
/// The text is kept exactly as typed until [`AxisField::sanitize`] rewrites
/// it, so live typing never loses characters.
#[derive(Debug, Clone)]
pub struct AxisField {
    options: AxisOptions,
    text: String,
    outcome: ParseOutcome,
}

impl AxisField {
    pub fn new(kind: AxisKind, range: AxisRange) -> Self {
        let options = AxisOptions { range, kind };
        Self {
            options,
            text: String::new(),
            outcome: parse_axis_tokens("", options),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn outcome(&self) -> &ParseOutcome {
        &self.outcome
    }

    pub fn values(&self) -> &[i32] {
        &self.outcome.values
    }

    pub fn range(&self) -> AxisRange {
        self.options.range
    }

    /// Replaces the raw text and reparses it.
    pub fn set_text(&mut self, text: impl Into<String>) -> &ParseOutcome {
        self.text = text.into();
        self.outcome = parse_axis_tokens(&self.text, self.options);
        &self.outcome
    }

    /// Rewrites the text to its canonical form. Returns true if it changed.
    ///
    /// Rejected tokens are dropped from the rewritten text. The outcome is
    /// kept as-is: its values already match the canonical text and its
    /// diagnostics describe what was corrected.
    pub fn sanitize(&mut self) -> bool {
        let canonical = self.outcome.canonical_text();
        if canonical == self.text {
            return false;
        }
        self.text = canonical;
        true
    }

    /// Changes the axis range and reparses.
    pub fn set_range(&mut self, range: AxisRange) {
        self.options.range = range;
        self.outcome = parse_axis_tokens(&self.text, self.options);
    }
}
