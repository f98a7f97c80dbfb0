//! crates/assistant_core/src/error.rs
//!
//! Defines the failure conditions the controllers surface to their callers.

/// Every failure a controller operation can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// Required input was missing or blank. No gateway call was made.
    #[error("{0}")]
    ValidationFailed(String),

    #[error("Error creating session: {0}")]
    SessionCreationFailed(String),

    #[error("Error ending session: {0}")]
    SessionTerminationFailed(String),

    /// Absorbed into conversation history; only ever logged.
    #[error("Could not get response: {0}")]
    MessageExchangeFailed(String),

    #[error("{0}")]
    ClassificationFailed(String),

    #[error("A session is already active")]
    SessionAlreadyActive,

    #[error("No session is active")]
    NoActiveSession,

    #[error("Session {requested} is not the active session")]
    SessionMismatch { requested: String },
}

/// A convenience type alias for `Result<T, ControllerError>`.
pub type ControllerResult<T> = Result<T, ControllerError>;
