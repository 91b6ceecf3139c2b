//! Wire decoding errors.
//!
//! These are produced while parsing inbound PID reports. They are `Copy` so
//! the report dispatcher can log and drop them without allocating.

use crate::common::ErrorSeverity;

/// Failure to decode an inbound report.
///
/// # Examples
///
/// ```
/// use pidffb_errors::{ErrorSeverity, ProtocolError};
///
/// let err = ProtocolError::TooShort { report_id: 1, expected: 18, actual: 4 };
/// assert_eq!(err.code(), 2);
/// assert_eq!(err.severity(), ErrorSeverity::Warning);
/// assert_eq!(err.to_string(), "report 0x01 too short: expected 18 bytes, got 4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ProtocolError {
    /// Zero-length buffer
    #[error("empty report")]
    Empty,

    /// Buffer shorter than the report layout
    #[error("report 0x{report_id:02x} too short: expected {expected} bytes, got {actual}")]
    TooShort {
        /// Report id from byte 0
        report_id: u8,
        /// Layout length
        expected: usize,
        /// Received length
        actual: usize,
    },

    /// Report id not part of the PID descriptor
    #[error("unknown report id 0x{0:02x}")]
    UnknownReportId(u8),

    /// Enumerated field outside its defined values
    #[error("invalid {field} value {value}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Raw wire value
        value: u8,
    },
}

impl ProtocolError {
    /// Stable numeric code for compact logging.
    pub fn code(self) -> u8 {
        match self {
            ProtocolError::Empty => 1,
            ProtocolError::TooShort { .. } => 2,
            ProtocolError::UnknownReportId(_) => 3,
            ProtocolError::InvalidValue { .. } => 4,
        }
    }

    /// Decode failures never stop the tick loop; the report is dropped.
    pub fn severity(self) -> ErrorSeverity {
        match self {
            ProtocolError::UnknownReportId(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Warning,
        }
    }
}
