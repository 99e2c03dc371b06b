//! Sync errors.
//!
//! Transport problems (`Unreachable`, `Timeout`) are kept apart from answers
//! the service gave on purpose (`Rejected`). Only the former are worth
//! retrying; nothing retries automatically.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use board::BoardError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Connection refused, DNS failure, reset mid-request.
    #[error("could not reach game service: {0}")]
    Unreachable(String),

    /// Connect or request timeout elapsed.
    #[error("game service timed out: {0}")]
    Timeout(String),

    /// The service answered with a non-success status.
    #[error("game service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The body could not be parsed.
    #[error("malformed response from game service: {0}")]
    Decode(String),

    /// The body parsed but the board breaks the invariants.
    #[error("game service sent an invalid board: {0}")]
    InvalidBoard(#[from] BoardError),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl SyncError {
    /// Whether the same request may succeed if tried again.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Timeout(_))
    }

    /// Stable code for logs and status lines.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "E_UNREACHABLE",
            Self::Timeout(_) => "E_TIMEOUT",
            Self::Rejected { .. } => "E_REJECTED",
            Self::Decode(_) => "E_DECODE",
            Self::InvalidBoard(_) => "E_INVALID_BOARD",
            Self::ClientBuild(_) => "E_CLIENT_BUILD",
        }
    }

    /// Classify a reqwest failure.
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Unreachable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
