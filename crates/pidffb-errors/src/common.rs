//! Top-level error type, classification and severity.

use core::fmt;

use crate::{ProtocolError, ValidationError};

/// Top-level error type wrapping every sub-error.
#[derive(Debug, thiserror::Error)]
pub enum PidffbError {
    /// Wire decoding errors
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Scenario loading errors
    #[error("Scenario error: {0}")]
    Scenario(String),
}

impl PidffbError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            PidffbError::Protocol(_) => ErrorCategory::Protocol,
            PidffbError::Validation(_) => ErrorCategory::Validation,
            PidffbError::Io(_) => ErrorCategory::IO,
            PidffbError::Scenario(_) => ErrorCategory::Scenario,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PidffbError::Protocol(e) => e.severity(),
            PidffbError::Validation(e) => e.severity(),
            PidffbError::Io(_) | PidffbError::Scenario(_) => ErrorSeverity::Error,
        }
    }

    /// Create a scenario error with a message.
    pub fn scenario(msg: impl Into<String>) -> Self {
        PidffbError::Scenario(msg.into())
    }
}

impl From<std::io::Error> for PidffbError {
    fn from(e: std::io::Error) -> Self {
        PidffbError::Io(e)
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Wire decoding errors
    Protocol = 0,
    /// Validation errors
    Validation = 1,
    /// I/O errors
    IO = 2,
    /// Scenario errors
    Scenario = 3,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Protocol => write!(f, "Protocol"),
            ErrorCategory::Validation => write!(f, "Validation"),
            ErrorCategory::IO => write!(f, "IO"),
            ErrorCategory::Scenario => write!(f, "Scenario"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, system may be in unstable state
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
