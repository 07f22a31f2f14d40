//! Centralized error types for the log pipeline
//!
//! All pipeline errors are represented by the `LogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, LogError>`.

use std::fmt;
use std::path::PathBuf;

/// All pipeline errors
#[derive(Debug)]
pub enum LogError {
    // === File sink ===
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Channel name does not resolve to a usable file name
    InvalidChannel { name: String },

    // === Display sink ===
    /// No display surface is attached
    DisplayUnavailable,
    /// Display surface refused a mutation
    DisplayRejected { reason: String },

    // === Config ===
    /// Failed to read or write the config file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === Runtime ===
    /// Thread spawn or terminal setup failed
    Runtime { source: std::io::Error },
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. }
            | Self::ConfigRead { source, .. }
            | Self::Runtime { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "IO error: {}: {}", path.display(), source),
            Self::InvalidChannel { name } => write!(f, "Invalid log channel: {:?}", name),
            Self::DisplayUnavailable => write!(f, "No display attached"),
            Self::DisplayRejected { reason } => write!(f, "Display rejected update: {}", reason),
            Self::ConfigRead { path, .. } => write!(f, "Cannot access config: {}", path.display()),
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::Runtime { source } => write!(f, "Runtime error: {}", source),
        }
    }
}

/// Alias for Result with LogError
pub type Result<T> = std::result::Result<T, LogError>;
