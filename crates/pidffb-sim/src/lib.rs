//! Scenario simulator for the PID force feedback stack
//!
//! Loads a scenario document, replays its host reports and telemetry
//! updates against an [`EffectPool`](pidffb_pool::EffectPool) and a
//! [`ForceEngine`](pidffb_engine::ForceEngine), and records the forces
//! produced on every tick.

#![deny(clippy::unwrap_used)]

pub mod error;
pub mod output;
pub mod runner;
pub mod scenario;

pub use error::SimError;
pub use runner::{FeatureRead, SimReport, TickSample, run_scenario};
pub use scenario::{Event, HexReport, Scenario, TimedEvent};
