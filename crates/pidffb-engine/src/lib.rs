//! Force computation for USB HID PID force feedback
//!
//! [`ForceEngine::compute_forces`] is called once per sample tick. It reads
//! the effect pool and the latest [`AxisTelemetry`], evaluates every playing
//! effect and returns the summed per-axis force scaled by the device gain.
//!
//! The engine is single-threaded and allocation-free on the tick path. The
//! embedding loop is responsible for serializing inbound reports with ticks.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod engine;
pub mod hook;
pub mod playing;
pub mod telemetry;

pub use config::EngineConfig;
pub use engine::ForceEngine;
pub use hook::{ForceHook, NoHook};
pub use playing::is_playing;
pub use telemetry::AxisTelemetry;
