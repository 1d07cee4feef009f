//! Error types for the Penguin API client.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Structured failure reported by the Penguin API.
///
/// Produced by [`classify`] for every response whose status falls outside the
/// operation's accepted set. The status is always non-zero and the message is
/// never empty.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("penguin API error {status}: {message}")]
pub struct ApiError {
    /// HTTP status code associated with the failure.
    pub status: u16,
    /// Human readable message returned by the service.
    pub message: String,
}

impl ApiError {
    /// Returns `true` when the service reported that the resource does not
    /// exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16()
    }
}

/// Errors raised by [`crate::PenguinClient`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ClientError {
    /// Raised when the client cannot be constructed from its configuration.
    #[error("invalid client configuration: {0}")]
    Configuration(String),
    /// Raised when a request payload cannot be serialised.
    #[error("marshal request: {0}")]
    Encode(String),
    /// Raised when the request could not be sent or the body not read.
    #[error("request failed: {0}")]
    Transport(String),
    /// Raised when a successful response body is not valid for its type.
    #[error("decode response: {0}")]
    Decode(String),
    /// Failure reported by the service itself.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ClientError {
    /// Returns the HTTP status when the error came from the service.
    #[must_use]
    pub const fn api_status(&self) -> Option<u16> {
        match self {
            Self::Api(api_err) => Some(api_err.status),
            _ => None,
        }
    }

    /// Returns `true` for a service-reported 404.
    ///
    /// Reconcilers use this as a control-flow signal: a missing instance is
    /// "not yet visible" while provisioning, "gone" on refresh, and "already
    /// deleted" on teardown.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(api_err) if api_err.is_not_found())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: u16,
    #[serde(default)]
    message: String,
}

/// Turns a rejected response into an [`ApiError`].
///
/// A JSON body of the form `{"status": .., "message": ..}` with a non-empty
/// message is used as-is (a zero status is replaced by the HTTP status).
/// Otherwise the trimmed body text is used, then the canonical reason phrase
/// for the status.
#[must_use]
pub fn classify(status: StatusCode, body: &[u8]) -> ApiError {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body)
        && !parsed.message.is_empty()
    {
        let embedded = if parsed.status == 0 {
            status.as_u16()
        } else {
            parsed.status
        };
        return ApiError {
            status: embedded,
            message: parsed.message,
        };
    }

    let text = String::from_utf8_lossy(body).trim().to_owned();
    let message = if text.is_empty() {
        status.canonical_reason().map_or_else(
            || format!("HTTP {}", status.as_u16()),
            str::to_owned,
        )
    } else {
        text
    };

    ApiError {
        status: status.as_u16(),
        message,
    }
}
