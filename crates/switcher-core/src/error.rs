//! Control error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Control error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Lifecycle Errors
    // ─────────────────────────────────────────────────────────────
    #[error("A host map is required to attach the style switcher")]
    HostMapMissing,

    #[error("Style switcher is already attached to a map")]
    AlreadyAttached,

    #[error("Style switcher is not attached (during {operation})")]
    NotAttached { operation: String },

    // ─────────────────────────────────────────────────────────────
    // Style Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Style not found: {title}")]
    StyleNotFound { title: String },

    #[error("Host map failed to change style: {message}")]
    HostMap { message: String },

    #[error("Failed to build option for style '{title}': {reason}")]
    OptionBuild { title: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Document Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid class token: {token:?}")]
    InvalidToken { token: String },

    #[error("Unknown node: {id}")]
    UnknownNode { id: usize },

    #[error("Hierarchy request error: {message}")]
    Hierarchy { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn not_attached(operation: impl Into<String>) -> Self {
        Self::NotAttached {
            operation: operation.into(),
        }
    }

    pub fn style_not_found(title: impl Into<String>) -> Self {
        Self::StyleNotFound {
            title: title.into(),
        }
    }

    pub fn host_map(message: impl Into<String>) -> Self {
        Self::HostMap {
            message: message.into(),
        }
    }

    pub fn option_build(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OptionBuild {
            title: title.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_token(token: impl Into<String>) -> Self {
        Self::InvalidToken {
            token: token.into(),
        }
    }

    pub fn hierarchy(message: impl Into<String>) -> Self {
        Self::Hierarchy {
            message: message.into(),
        }
    }

    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors are logged at the point of the operation and leave
    /// the control interactive.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::HostMap { .. }
                | Error::OptionBuild { .. }
                | Error::StyleNotFound { .. }
                | Error::InvalidToken { .. }
        )
    }

    /// Check if this error is a precondition violation that aborts the call
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::HostMapMissing | Error::AlreadyAttached | Error::NotAttached { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
