//! Force feedback effect model for USB HID PID joysticks
//!
//! This crate holds the pieces shared by the effect pool, the force engine
//! and the wire codec: limits and sentinels, effect descriptors, direction
//! vectors, the per-type force calculators and the clock seam.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod clock;
pub mod constants;
pub mod direction;
pub mod effects;
pub mod math;

pub use clock::*;
pub use constants::*;
pub use direction::*;
pub use effects::*;
pub use math::*;
