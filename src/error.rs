//! Error types for haggle

use thiserror::Error;

/// Main error type for haggle
#[derive(Error, Debug)]
pub enum HaggleError {
    // Input validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Session state errors
    #[error("A negotiation round is already in flight")]
    SessionBusy,

    // Transport errors
    #[error("Network connection error: {0}")]
    Connection(String),

    #[error("Remote returned status {status}: {detail}")]
    RemoteStatus { status: u16, detail: String },

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HaggleError {
    /// Check whether this error came from the transport layer.
    ///
    /// Transport failures leave session state untouched, so the caller may
    /// resubmit the same round.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HaggleError::Connection(_)
                | HaggleError::RemoteStatus { .. }
                | HaggleError::MalformedReply(_)
        )
    }
}

/// Result type alias for haggle operations
pub type Result<T> = std::result::Result<T, HaggleError>;
