//! Error types for the study record service.
//!
//! The three families are kept distinguishable: validation failures are
//! caught before any persistence attempt, reference failures mean the
//! target id does not exist, and storage failures are propagated from
//! the persistence collaborator without retry.

use thiserror::Error;

/// Errors surfaced by the study record service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field is missing or outside its domain.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The offending input field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The referenced agent does not exist.
    #[error("agent not found: {id}")]
    AgentNotFound {
        /// The agent ID that was not found.
        id: i32,
    },

    /// The targeted study does not exist.
    #[error("study not found: {id}")]
    StudyNotFound {
        /// The study ID that was not found.
        id: i32,
    },

    /// The persistence collaborator failed.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    /// Builds a validation error for a named field.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the offending field name for validation errors.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
