//! Prelude module for convenient error handling imports.

pub use crate::{
    ProtocolResult, Result,
    common::{ErrorCategory, ErrorSeverity, PidffbError},
    protocol::ProtocolError,
    validation::ValidationError,
};
