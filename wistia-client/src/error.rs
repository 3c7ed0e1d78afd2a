//! Wistia client error types
//!
//! Errors are split by where they happen: before the request leaves the
//! process, on the wire, in the remote API, or while decoding its answer.

use thiserror::Error;

pub use reqwest::StatusCode;

/// Maximum response body size read from the Wistia API (16 MB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// Error type for all Wistia HTTP calls.
#[derive(Debug, Error)]
pub enum WistiaError {
    #[error("Request build error: {0}")]
    Request(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("the Wistia API responded with status {status} and body {body}")]
    Remote { status: reqwest::StatusCode, body: String },

    #[error("failed to decode JSON from response body: {0}")]
    Decode(String),

    #[error("Upload stream error: {0}")]
    Upload(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },
}

impl WistiaError {
    /// Whether the remote API answered with an error status.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// HTTP status of a remote error.
    #[must_use]
    pub const fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Read a response body with size limit.
///
/// Checks `Content-Length` hint first (if available), then enforces the
/// limit on the actual body bytes.
pub(crate) async fn bytes_with_limit(
    response: reqwest::Response,
) -> Result<bytes::Bytes, WistiaError> {
    if let Some(cl) = response.content_length() {
        if cl > MAX_RESPONSE_SIZE as u64 {
            return Err(WistiaError::ResponseTooLarge { size: cl });
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > MAX_RESPONSE_SIZE {
        return Err(WistiaError::ResponseTooLarge { size: bytes.len() as u64 });
    }
    Ok(bytes)
}

/// Turn an error status into [`WistiaError::Remote`], keeping the whole body.
pub(crate) fn check_status(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<(), WistiaError> {
    if status.is_client_error() || status.is_server_error() {
        return Err(WistiaError::Remote {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
    Ok(())
}

/// Decode a successful response body.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, WistiaError> {
    serde_json::from_slice(body).map_err(|e| WistiaError::Decode(e.to_string()))
}

impl From<reqwest::Error> for WistiaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Request(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for WistiaError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}
