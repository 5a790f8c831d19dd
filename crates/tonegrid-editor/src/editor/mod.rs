//! Dual text editor: one field per axis.
//!
//! The editor owns a sound-axis field and a time-axis field. Typing keeps
//! the raw text and reparses it; Enter and blur rewrite the text into its
//! canonical form. Pairs are formed by zipping the parsed notes with the
//! parsed pulses.

use std::time::{Duration, Instant};

use tonegrid_model::error::{ErrorCode, TokenError};
use tonegrid_model::interval::remove_silences;
use tonegrid_model::pair::{AxisKind, AxisRange, Pair};
use tonegrid_model::validation::serialize_axis;

mod field;

#[cfg(test)]
mod tests;

pub use field::{AxisField, Field};

/// A transient inline notice tied to one rejected token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub field: Field,
    pub error: TokenError,
    pub expires_at: Instant,
}

/// What the editor hands to the sync manager after an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorEmission {
    /// Parsed sound-axis values, in typed order.
    pub notes: Vec<i32>,
    /// Parsed time-axis values, ascending and unique.
    pub pulses: Vec<i32>,
    /// Notes zipped with pulses over their common length.
    pub pairs: Vec<Pair>,
    /// Diagnostics from both fields.
    pub errors: Vec<(Field, TokenError)>,
    /// Values on the longer axis that have no partner.
    pub unpaired: usize,
}

impl EditorEmission {
    /// Returns true if either field has a rejected token.
    pub fn has_fatal_errors(&self) -> bool {
        self.errors.iter().any(|(_, e)| !e.is_informational())
    }
}

/// Result of pressing Enter in a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnterResult {
    /// Whether the field text was rewritten.
    pub rewritten: bool,
    /// Field that now holds focus, if any.
    pub focus: Option<Field>,
}

/// Two axis fields with focus and notice tracking.
#[derive(Debug, Clone)]
pub struct DualEditor {
    notes: AxisField,
    pulses: AxisField,
    focus: Option<Field>,
    notices: Vec<Notice>,
    notice_duration: Duration,
}

impl DualEditor {
    pub fn new(note_range: AxisRange, pulse_range: AxisRange, notice_duration: Duration) -> Self {
        Self {
            notes: AxisField::new(AxisKind::Sound, note_range),
            pulses: AxisField::new(AxisKind::Time, pulse_range),
            focus: None,
            notices: Vec::new(),
            notice_duration,
        }
    }

    pub fn field(&self, field: Field) -> &AxisField {
        match field {
            Field::Notes => &self.notes,
            Field::Pulses => &self.pulses,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut AxisField {
        match field {
            Field::Notes => &mut self.notes,
            Field::Pulses => &mut self.pulses,
        }
    }

    pub fn text(&self, field: Field) -> &str {
        self.field(field).text()
    }

    pub fn focused(&self) -> Option<Field> {
        self.focus
    }

    pub fn focus(&mut self, field: Field) {
        self.focus = Some(field);
    }

    /// Live notices, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Handles a keystroke-level text change in `field`.
    ///
    /// Out-of-range tokens raise notices that expire after the configured
    /// duration; they never block further typing.
    pub fn input(&mut self, field: Field, text: impl Into<String>, now: Instant) -> EditorEmission {
        self.focus = Some(field);
        let out_of_range: Vec<TokenError> = self
            .field_mut(field)
            .set_text(text)
            .fatal_errors()
            .filter(|e| matches!(e.code, ErrorCode::OutOfRange { .. }))
            .cloned()
            .collect();

        self.notices.retain(|n| n.field != field);
        let expires_at = now + self.notice_duration;
        self.notices.extend(out_of_range.into_iter().map(|error| Notice {
            field,
            error,
            expires_at,
        }));

        self.emission()
    }

    /// Sanitizes `field` and advances focus.
    pub fn press_enter(&mut self, field: Field) -> EnterResult {
        let rewritten = self.field_mut(field).sanitize();
        self.focus = field.next();
        tracing::trace!(?field, rewritten, focus = ?self.focus, "editor enter");
        EnterResult {
            rewritten,
            focus: self.focus,
        }
    }

    /// Sanitizes `field` when it loses focus. Returns true if the text changed.
    pub fn blur(&mut self, field: Field) -> bool {
        if self.focus == Some(field) {
            self.focus = None;
        }
        self.field_mut(field).sanitize()
    }

    /// Drops expired notices. Returns true if any were removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.expires_at > now);
        self.notices.len() != before
    }

    /// Current parsed state of both fields.
    pub fn emission(&self) -> EditorEmission {
        let notes = self.notes.values().to_vec();
        let pulses = self.pulses.values().to_vec();
        let pairs = notes
            .iter()
            .zip(&pulses)
            .map(|(&note, &pulse)| Pair::new(note, pulse))
            .collect();
        let unpaired = notes.len().abs_diff(pulses.len());

        let errors = self
            .notes
            .outcome()
            .errors
            .iter()
            .map(|e| (Field::Notes, e.clone()))
            .chain(
                self.pulses
                    .outcome()
                    .errors
                    .iter()
                    .map(|e| (Field::Pulses, e.clone())),
            )
            .collect();

        EditorEmission {
            notes,
            pulses,
            pairs,
            errors,
            unpaired,
        }
    }

    /// Writes both fields from store pairs without emitting anything.
    ///
    /// Only sounding pairs are shown; rests have no text form.
    pub fn set_from_pairs(&mut self, pairs: &[Pair]) {
        let sounding = remove_silences(pairs);
        let notes: Vec<i32> = sounding.iter().map(|p| p.note).collect();
        let pulses: Vec<i32> = sounding.iter().map(|p| p.pulse).collect();
        self.notes.set_text(serialize_axis(&notes));
        self.pulses.set_text(serialize_axis(&pulses));
        self.notices.clear();
    }

    /// Empties both fields.
    pub fn clear(&mut self) {
        self.notes.set_text("");
        self.pulses.set_text("");
        self.notices.clear();
    }

    /// Changes the axis ranges and reparses both fields.
    pub fn set_ranges(&mut self, note_range: AxisRange, pulse_range: AxisRange) {
        self.notes.set_range(note_range);
        self.pulses.set_range(pulse_range);
    }
}
