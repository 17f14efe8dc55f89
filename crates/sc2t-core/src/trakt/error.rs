//! Remote list service error type.

use thiserror::Error;

/// Failure of a single list-service call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("transport: {0:#}")]
    Transport(anyhow::Error),
    /// The service answered with a status other than the one the call expects.
    #[error("HTTP {status}: {body}")]
    Status { status: u32, body: String },
    /// Request body could not be encoded or response body could not be decoded.
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u32> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}
