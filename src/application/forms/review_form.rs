use super::fields::{max_chars, optional};
use crate::domain::errors::ValidationErrors;
use crate::domain::ports::{Review, ReviewDecision};

const NOTE_MAX_CHARS: usize = 500;

/// Approve/deny input for a pending record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    pub decision: ReviewDecision,
    pub note: String,
}

impl ReviewForm {
    #[must_use]
    pub fn approve(note: impl Into<String>) -> Self {
        Self {
            decision: ReviewDecision::Approve,
            note: note.into(),
        }
    }

    #[must_use]
    pub fn deny(note: impl Into<String>) -> Self {
        Self {
            decision: ReviewDecision::Deny,
            note: note.into(),
        }
    }

    /// A denial must say why.
    ///
    /// # Errors
    /// Returns the failing note field.
    pub fn validate(&self) -> Result<Review, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let note = optional(&self.note);

        match note {
            None if self.decision == ReviewDecision::Deny => {
                errors.add("note", "a reason is required when denying");
            }
            Some(note) => max_chars(&mut errors, "note", note, NOTE_MAX_CHARS),
            None => {}
        }

        errors.into_result(Review {
            decision: self.decision,
            note: note.map(str::to_string),
        })
    }
}
