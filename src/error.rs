//! Error types for scheduling operations.
//!
//! Every variant is recoverable and user-correctable. Conflicts found by
//! the validator are reported as [`Conflict`](crate::validation::Conflict)
//! values; they only become errors here when a caller tries to commit
//! past them or the suggester runs dry.

use thiserror::Error;

/// Errors produced by the scheduling engine and its stores.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// Candidate window falls outside the engineer's shift.
    #[error("{0}")]
    ShiftViolation(String),
    /// Candidate window overlaps an existing assignment.
    #[error("{0}")]
    SlotConflict(String),
    /// Neither a free slot nor an alternate engineer exists.
    #[error("no alternatives available for {engineer_id} at {window}")]
    NoAlternativeFound {
        /// Engineer the candidate targeted.
        engineer_id: String,
        /// Requested window, formatted.
        window: String,
    },
    /// Hour interval with non-positive duration or past hour 24.
    #[error("invalid hour interval {start_hour}–{end_hour}")]
    InvalidInterval {
        /// Requested start hour.
        start_hour: u8,
        /// Requested end hour.
        end_hour: u8,
    },
    /// Engineer ID not on the roster.
    #[error("unknown engineer: {0}")]
    UnknownEngineer(String),
    /// Assignment ID not in the store.
    #[error("unknown assignment: {0}")]
    UnknownAssignment(String),
    /// Assignment ID already in the store.
    #[error("duplicate assignment: {0}")]
    DuplicateAssignment(String),
    /// Commit attempted before a successful validation.
    #[error("commit refused: draft is {0}")]
    CommitRefused(&'static str),
    /// Draft is missing a field needed for validation.
    #[error("draft is missing {0}")]
    MissingField(&'static str),
    /// Draft was already committed and can no longer change.
    #[error("draft already committed")]
    AlreadyCommitted,
    /// Invalid engine configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Malformed roster, schedule or config JSON.
    #[error("malformed input: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for scheduling operations.
pub type Result<T> = std::result::Result<T, SchedulingError>;
