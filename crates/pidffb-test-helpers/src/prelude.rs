//! Convenience re-exports for common test utilities.

pub use crate::clock::ManualClock;
pub use crate::must::{must, must_some, must_with};
pub use crate::{assert_approx_eq, assert_force_trace};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
