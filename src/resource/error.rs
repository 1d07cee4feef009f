//! Error types for resource reconcilers.

use thiserror::Error;

use super::ResourceKind;
use crate::client::ClientError;
use crate::wait::WaitError;

/// Errors raised while reconciling a resource.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ResourceError {
    /// Raised before any remote call when the desired configuration breaks a
    /// resource invariant.
    #[error("invalid {kind} configuration: {message}")]
    InvalidConfiguration {
        /// Kind of resource being reconciled.
        kind: ResourceKind,
        /// Description of the violated rule.
        message: String,
    },
    /// Raised when a remote call fails.
    #[error("failed to {action}: {source}")]
    Remote {
        /// Step that was being performed.
        action: String,
        /// Underlying client failure.
        source: ClientError,
    },
    /// Raised when a wait is cancelled or exceeds its budget.
    #[error("timeout waiting for {action} on {kind} {id}")]
    Timeout {
        /// Kind of resource being waited on.
        kind: ResourceKind,
        /// Step that was being waited on.
        action: String,
        /// Identifier of the resource.
        id: String,
    },
    /// Raised when an import identifier cannot be parsed.
    #[error("invalid import identifier {value:?}: expected `region:id`")]
    InvalidImportId {
        /// Identifier passed by the caller.
        value: String,
    },
}

impl ResourceError {
    pub(crate) fn invalid(kind: ResourceKind, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn remote(action: &str, source: ClientError) -> Self {
        Self::Remote {
            action: action.to_owned(),
            source,
        }
    }

    pub(crate) fn from_wait(
        err: WaitError<ClientError>,
        kind: ResourceKind,
        action: &str,
        id: &str,
    ) -> Self {
        match err {
            WaitError::Check(source) => Self::remote(action, source),
            WaitError::Cancelled => Self::Timeout {
                kind,
                action: action.to_owned(),
                id: id.to_owned(),
            },
        }
    }

    /// Returns the client error behind a failed remote call, if any.
    #[must_use]
    pub const fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Remote { source, .. } => Some(source),
            _ => None,
        }
    }
}
