//! Error types shared across Castkit crates.

use serde::Serialize;

/// Top-level error type for Castkit operations.
#[derive(Debug, thiserror::Error)]
pub enum CastkitError {
    #[error("Initialization error: {message}")]
    Initialization { message: String },

    #[error("Enumeration error: {message}")]
    Enumeration { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Configuration error in `{field}`: {message}")]
    Configuration { field: String, message: String },

    #[error("Backend unavailable: {message}")]
    BackendUnavailable { message: String },

    #[error("Backend failed to start: {message}")]
    BackendStart { message: String },

    #[error("Cannot {operation} while {state}")]
    InvalidStateTransition {
        state: String,
        operation: &'static str,
    },

    #[error("Platform error: {message}")]
    Platform { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CastkitError.
pub type CastkitResult<T> = Result<T, CastkitError>;

/// Coarse error category, stable across message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Initialization,
    Enumeration,
    PermissionDenied,
    Configuration,
    BackendUnavailable,
    BackendStart,
    InvalidStateTransition,
    Platform,
    Unsupported,
    Io,
    Internal,
}

impl CastkitError {
    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization {
            message: msg.into(),
        }
    }

    pub fn enumeration(msg: impl Into<String>) -> Self {
        Self::Enumeration {
            message: msg.into(),
        }
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: msg.into(),
        }
    }

    pub fn configuration(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: msg.into(),
        }
    }

    pub fn backend_unavailable(msg: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            message: msg.into(),
        }
    }

    pub fn backend_start(msg: impl Into<String>) -> Self {
        Self::BackendStart {
            message: msg.into(),
        }
    }

    pub fn invalid_state(state: impl std::fmt::Display, operation: &'static str) -> Self {
        Self::InvalidStateTransition {
            state: state.to_string(),
            operation,
        }
    }

    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Initialization { .. } => ErrorKind::Initialization,
            Self::Enumeration { .. } => ErrorKind::Enumeration,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::BackendUnavailable { .. } => ErrorKind::BackendUnavailable,
            Self::BackendStart { .. } => ErrorKind::BackendStart,
            Self::InvalidStateTransition { .. } => ErrorKind::InvalidStateTransition,
            Self::Platform { .. } => ErrorKind::Platform,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Io(_) => ErrorKind::Io,
            Self::Json(_) | Self::Other(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller can reasonably retry after adjusting input or
    /// environment. Initialization failures and caller bugs are not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::Initialization | ErrorKind::InvalidStateTransition | ErrorKind::Internal
        )
    }

    /// Name of the offending field for configuration errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Configuration { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_names_field() {
        let err = CastkitError::configuration("fps", "must be positive");
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.field(), Some("fps"));
        assert_eq!(
            err.to_string(),
            "Configuration error in `fps`: must be positive"
        );
    }

    #[test]
    fn invalid_state_message_mentions_operation() {
        let err = CastkitError::invalid_state("idle", "stop recording");
        assert_eq!(err.kind(), ErrorKind::InvalidStateTransition);
        assert_eq!(err.to_string(), "Cannot stop recording while idle");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CastkitError = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.is_recoverable());
    }
}
