//! Shared test utilities for the PID force feedback crates.
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`assertions`] - Approximate float and force trace assertions
//! - [`clock`] - A manually advanced clock
//! - [`prelude`] - Convenience re-exports

#![deny(unsafe_op_in_unsafe_fn)]

pub mod assertions;
pub mod clock;
pub mod must;
pub mod prelude;

pub use clock::ManualClock;
pub use must::*;
