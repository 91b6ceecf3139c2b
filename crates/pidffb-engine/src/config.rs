//! Engine configuration

use serde::{Deserialize, Serialize};

use pidffb_core::DEFAULT_AXIS_FULL_SCALE;
use pidffb_errors::ValidationError;

/// Tunables for [`ForceEngine`](crate::ForceEngine).
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Metric value treated as full deflection by condition effects.
    pub axis_full_scale: i32,
    /// Tick cadence the engine is driven at. Informational for the core,
    /// used by drivers to step their clock.
    pub sample_period_ms: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            axis_full_scale: DEFAULT_AXIS_FULL_SCALE,
            sample_period_ms: 1,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.axis_full_scale <= 0 {
            return Err(ValidationError::out_of_range(
                "axis_full_scale",
                self.axis_full_scale,
                1,
                i32::MAX,
            ));
        }
        if self.sample_period_ms == 0 {
            return Err(ValidationError::out_of_range(
                "sample_period_ms",
                self.sample_period_ms,
                1,
                u16::MAX,
            ));
        }
        Ok(())
    }
}
