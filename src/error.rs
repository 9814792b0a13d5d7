use thiserror::Error;

use crate::lifecycle::{InternshipStatus, LifecycleEvent};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid transition: cannot {event} a position in state {from}")]
    InvalidTransition {
        from: InternshipStatus,
        event: LifecycleEvent,
    },

    #[error("No student to assign")]
    MissingStudent,

    #[error(
        "Mentor {mentor_id} belongs to company {mentor_company:?}, position belongs to {position_company:?}"
    )]
    MentorCompanyMismatch {
        mentor_id: i64,
        mentor_company: Option<i64>,
        position_company: Option<i64>,
    },

    #[error("Mentor not found: {0}")]
    MentorNotFound(i64),

    #[error("Invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(u32),

    #[error("Capacity exceeded: requested {requested}, only {remaining} slots remaining")]
    CapacityExceeded { requested: u32, remaining: u32 },

    #[error("Rejected by backend ({status}): {message}")]
    ExternalRejection { status: u16, message: String },

    #[error("Bulk creation stopped after {succeeded} positions ({remaining} not attempted): {source}")]
    BulkInterrupted {
        succeeded: usize,
        remaining: usize,
        #[source]
        source: Box<AppError>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Unwraps a `BulkInterrupted` to the error of the call that failed.
    pub fn root_cause(&self) -> &AppError {
        match self {
            AppError::BulkInterrupted { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
