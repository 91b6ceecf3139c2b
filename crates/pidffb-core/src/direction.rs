//! Direction angles and their per-axis unit vector

use serde::{Deserialize, Serialize};

use crate::constants::{NUM_AXES, UNITS_PER_RADIAN};
use crate::effects::AxisEnable;

/// Per-axis components of an effect's direction.
///
/// # Examples
///
/// ```
/// use pidffb_core::{AxisEnable, DirectionVector, DIRECTION_ENABLE};
///
/// // 90 degrees in direction mode points straight along Y
/// let v = DirectionVector::from_block(AxisEnable(DIRECTION_ENABLE), [9000, 0]);
/// assert!(v.component(0).abs() < 1e-3);
/// assert!((v.component(1) - 1.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionVector(pub [f32; NUM_AXES]);

impl Default for DirectionVector {
    fn default() -> Self {
        DirectionVector::from_block(AxisEnable::default(), [0; NUM_AXES])
    }
}

impl DirectionVector {
    /// Builds the unit vector for a Set Effect block.
    ///
    /// In direction mode both components come from the X angle
    /// (`cos`, `sin`). Otherwise X uses `cos` of the X angle and Y uses
    /// `sin` of the Y angle, independently.
    pub fn from_block(enable: AxisEnable, direction: [u16; NUM_AXES]) -> Self {
        let [x, y] = direction;
        let x_angle = angle_radians(x);
        let y_angle = if enable.direction_mode() {
            x_angle
        } else {
            angle_radians(y)
        };
        DirectionVector([x_angle.cos(), y_angle.sin()])
    }

    /// Component for `axis`, 0 for axes outside the vector.
    pub fn component(&self, axis: usize) -> f32 {
        self.0.get(axis).copied().unwrap_or(0.0)
    }

    /// Dot product with a per-axis metric.
    pub fn project(&self, metric: &[f32; NUM_AXES]) -> f32 {
        self.0.iter().zip(metric).map(|(u, m)| u * m).sum()
    }
}

/// Converts a direction/phase value to radians.
pub fn angle_radians(value: u16) -> f32 {
    f32::from(value) / UNITS_PER_RADIAN
}
