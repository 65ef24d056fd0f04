//! Global error handling for promptpack
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project, plus the `Warning` value used for
//! per-path failures that are recovered instead of propagated.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for promptpack operations
#[derive(Error, Debug)]
pub enum PromptPackError {
    /// Target expected to be a regular file
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// Target expected to be a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// File read failures
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory listing failures
    #[error("Failed to list directory {path}: {source}")]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Sync-config read/write failures
    #[error("Failed to update config file {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Clipboard delivery errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] crate::clipboard::ClipboardError),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller supplied no targets at all
    #[error("No targets selected")]
    NoTargetsSelected,
}

/// Specialized Result type for promptpack operations
pub type Result<T> = std::result::Result<T, PromptPackError>;

/// A per-path failure recovered during aggregation.
///
/// Warnings are collected and reported to the user; they never abort the
/// processing of sibling files or targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// The path the failure is associated with
    pub path: PathBuf,
    /// Human-readable description of what went wrong
    pub detail: String,
}

impl Warning {
    /// Create a warning for `path`
    pub fn new(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.detail)
    }
}

/// Creates a PromptPackError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::PromptPackError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
