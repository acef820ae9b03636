//! Tri-state replies from the directory service

use serde::Serialize;
use thiserror::Error;

/// Transport-agnostic classification of a remote status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteStatus {
    Success,
    NotModified,
    NotFound,
    Conflict,
    Other(u16),
}

impl std::fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NotModified => write!(f, "not modified"),
            Self::NotFound => write!(f, "not found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Other(code) => write!(f, "status {}", code),
        }
    }
}

/// Error attached to a directory reply
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// No response was received (connection, TLS, timeout, cancellation)
    #[error("transport error: {0}")]
    Transport(String),

    /// The directory answered with a non-success status
    #[error("remote error: {0}")]
    Remote(String),

    /// The directory answered but the body could not be understood
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result of a single directory call: value, status and error, each optional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryReply<T> {
    pub value: Option<T>,
    pub status: Option<RemoteStatus>,
    pub error: Option<DirectoryError>,
}

impl<T> DirectoryReply<T> {
    /// A successful reply carrying a value
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            status: Some(RemoteStatus::Success),
            error: None,
        }
    }

    /// A reply with a status and an error but no usable value
    pub fn failed(status: RemoteStatus, error: DirectoryError) -> Self {
        Self {
            value: None,
            status: Some(status),
            error: Some(error),
        }
    }

    /// A reply where no response object exists at all
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            value: None,
            status: None,
            error: Some(DirectoryError::Transport(message.into())),
        }
    }

    pub fn not_found() -> Self {
        Self::failed(
            RemoteStatus::NotFound,
            DirectoryError::Remote("Not Found".to_string()),
        )
    }

    pub fn not_modified() -> Self {
        Self::failed(
            RemoteStatus::NotModified,
            DirectoryError::Remote("Not Modified".to_string()),
        )
    }

    /// Convert the value, keeping status and error untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DirectoryReply<U> {
        DirectoryReply {
            value: self.value.map(f),
            status: self.status,
            error: self.error,
        }
    }
}
