//! Unified error types for the file picker
//!
//! Listing failures never surface here: an unreadable directory is an empty
//! listing. These errors cover host integration, configuration and state
//! persistence.

use std::path::PathBuf;

/// Unified error type for picker operations
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// I/O errors (state files, output, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The dialog was built without a result listener
    #[error("Dialog '{tag}' has no listener attached")]
    NoListener { tag: String },

    /// Path validation errors
    #[error("Path error: {path} - {reason}")]
    Path { path: PathBuf, reason: String },

    /// Unknown composite mode name
    #[error("Unknown mode '{0}'")]
    Mode(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Saved dialog state could not be read or written
    #[error("State error: {0}")]
    State(String),
}

/// Convenience Result type using PickerError
pub type Result<T> = std::result::Result<T, PickerError>;

impl PickerError {
    /// Create a NoListener error for the dialog with the given tag
    pub fn no_listener(tag: impl Into<String>) -> Self {
        Self::NoListener { tag: tag.into() }
    }

    /// Create a Path error
    pub fn path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Mode error
    pub fn mode(name: impl Into<String>) -> Self {
        Self::Mode(name.into())
    }

    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for PickerError {
    fn from(err: serde_json::Error) -> Self {
        Self::State(err.to_string())
    }
}
