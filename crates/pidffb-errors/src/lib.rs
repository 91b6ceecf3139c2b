//! Error types for the PID force feedback stack
//!
//! The effect pool and force engine are total and never fail. Errors only
//! arise at the edges:
//!
//! - [`protocol`]: decoding inbound wire reports
//! - [`validation`]: engine configuration and simulator scenarios
//! - [`common`]: the wrapping [`PidffbError`] plus classification
//!
//! # Example
//!
//! ```
//! use pidffb_errors::prelude::*;
//!
//! fn full_scale(value: i32) -> Result<i32> {
//!     if value <= 0 {
//!         return Err(ValidationError::out_of_range("axis_full_scale", value, 1, i32::MAX).into());
//!     }
//!     Ok(value)
//! }
//!
//! assert!(full_scale(0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod common;
pub mod prelude;
pub mod protocol;
pub mod validation;

pub use common::{ErrorCategory, ErrorSeverity, PidffbError};
pub use protocol::ProtocolError;
pub use validation::ValidationError;

/// A specialized `Result` type for stack-level operations.
pub type Result<T> = std::result::Result<T, PidffbError>;

/// A specialized `Result` type for wire decoding.
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;
