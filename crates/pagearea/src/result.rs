//! Result and error types for page areas and controls.

use crate::selector::Selector;
use thiserror::Error;

/// Result type for page-area operations
pub type AreaResult<T> = Result<T, AreaError>;

/// Errors that can occur while building or resolving page objects
#[derive(Debug, Error)]
pub enum AreaError {
    /// A relative path was given in absolute form
    #[error("Invalid path {path:?}: {message}")]
    InvalidPath {
        /// Offending path
        path: String,
        /// Error message
        message: String,
    },

    /// No element matched any of the attempted selectors
    #[error("Element not found; attempted: {}", format_attempts(.attempted))]
    ElementNotFound {
        /// Selectors tried, in order
        attempted: Vec<Selector>,
    },

    /// A driver primitive failed
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl AreaError {
    /// Create an invalid path error
    #[must_use]
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an element-not-found error naming the attempted selectors
    #[must_use]
    pub fn not_found(attempted: Vec<Selector>) -> Self {
        Self::ElementNotFound { attempted }
    }

    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Selectors attempted before giving up, if this is a lookup failure
    #[must_use]
    pub fn attempted(&self) -> Option<&[Selector]> {
        match self {
            Self::ElementNotFound { attempted } => Some(attempted),
            _ => None,
        }
    }
}

fn format_attempts(attempted: &[Selector]) -> String {
    if attempted.is_empty() {
        return "<no candidates>".to_string();
    }
    attempted
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
