//! Error types and handling infrastructure for tailsift.
//!
//! The core pipeline (line store, filter, render) has no failure paths of its own;
//! errors only arise at the edges: reading the input stream, driving the terminal,
//! and loading configuration. Library code returns [`SiftError`], while the binary
//! wraps startup failures with `anyhow` context.

use thiserror::Error;

/// The main error type for tailsift operations.
#[derive(Error, Debug)]
pub enum SiftError {
    /// Input stream or terminal I/O failure
    #[error("I/O operation failed: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Terminal setup, drawing, or teardown failed
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A setting outside its accepted range
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for tailsift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    /// Create an Io error with additional context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SiftError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "Not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            std::io::ErrorKind::BrokenPipe => "Broken pipe",
            _ => "IO operation failed",
        };
        Self::Io {
            message: message.to_string(),
            source: err,
        }
    }
}
