// Client-side error types
use std::collections::HashMap;

/// Error surfaced to the user for any failed client operation.
///
/// Auth-gate denials are not represented here: a redirect decision is normal
/// control flow, not a failure (see `session::gate`).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The session store could not be read or written. The session keeps its
    /// prior state; login/registration report failure to the user.
    #[error("session storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Network-level failure or a non-2xx response from the backend. The
    /// message is the server-provided one when the body carried it.
    #[error("{message}")]
    RemoteRequestFailed {
        status: Option<u16>,
        message: String,
    },

    /// Client-side required-field checks failed; no request was issued.
    #[error("{message}")]
    ValidationFailed {
        message: String,
        field_errors: HashMap<String, String>,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response from server: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        ClientError::StorageUnavailable(message.into())
    }

    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::RemoteRequestFailed {
            status,
            message: message.into(),
        }
    }

    pub fn validation(
        message: impl Into<String>,
        field_errors: HashMap<String, String>,
    ) -> Self {
        ClientError::ValidationFailed {
            message: message.into(),
            field_errors,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        ClientError::InvalidResponse(message.into())
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Get error code for output formatting and scripting
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            ClientError::RemoteRequestFailed { .. } => "REMOTE_REQUEST_FAILED",
            ClientError::ValidationFailed { .. } => "VALIDATION_FAILED",
            ClientError::InvalidResponse(_) => "INVALID_RESPONSE",
        }
    }

    /// Per-field messages for validation failures, empty otherwise.
    pub fn field_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            ClientError::ValidationFailed { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        if err.is_decode() {
            tracing::error!("response decode error: {}", err);
            return ClientError::invalid_response(err.to_string());
        }
        if err.is_timeout() {
            return ClientError::remote(status, "request timed out");
        }
        if err.is_connect() {
            return ClientError::remote(status, "could not reach the server");
        }
        ClientError::remote(status, err.to_string())
    }
}

impl From<crate::session::store::StorageError> for ClientError {
    fn from(err: crate::session::store::StorageError) -> Self {
        ClientError::storage_unavailable(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
