//! Global error handling for gopherdex
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for gopherdex operations
#[derive(Error, Debug)]
pub enum GopherdexError {
    /// Connecting to a server failed after all retry attempts
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// A socket read did not complete within the read deadline
    #[error("read timed out after {0} ms")]
    ReadTimeout(u64),

    /// A text response exceeded the maximum allowed size
    #[error("response size exceeds the maximum limit of {0} bytes")]
    ResponseTooLarge(usize),

    /// A menu line did not decompose into enough tab-separated fields
    #[error("incorrectly formatted menu line: {0}")]
    MalformedLine(String),

    /// A menu line carried a port field that does not parse
    #[error("failed to parse port number: {0}")]
    MalformedPort(String),

    /// A payload could not be persisted to disk
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("unexpected error: {0}")]
    Unexpected(String),

    /// Underlying I/O error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized Result type for gopherdex operations
pub type Result<T> = std::result::Result<T, GopherdexError>;

/// Creates a GopherdexError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::GopherdexError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}
