//! Effect pool for USB HID PID force feedback
//!
//! The pool owns a fixed array of effect slots and all device-level state
//! (pause, gain, status bits). Every inbound PID report maps onto exactly one
//! operation here. Operations are total: ids are range-checked by
//! [`EffectId`], and anything the pool cannot apply is logged and dropped.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod pool;
pub mod reports;
pub mod slot;

pub use pool::{BlockFree, DeviceControl, EffectOperation, EffectPool};
pub use reports::{BlockLoadReport, BlockLoadStatus, PidStateReport, PidStatus, PoolReport};
pub use slot::{EffectId, EffectSlot, Playback, SlotState};
