//! Live axis state consumed by condition effects and trigger buttons

use serde::{Deserialize, Serialize};

use pidffb_core::{Metric, NUM_AXES};

/// Per-axis position, velocity and acceleration plus the button mask.
///
/// Positions fed through [`update_position`](Self::update_position) are
/// differentiated once per call; [`update_metrics`](Self::update_metrics)
/// overwrites all three metrics with externally derived values.
///
/// # Examples
///
/// ```
/// use pidffb_core::Metric;
/// use pidffb_engine::AxisTelemetry;
///
/// let mut telemetry = AxisTelemetry::default();
/// telemetry.update_position([10, 0]);
/// telemetry.update_position([15, 0]);
///
/// assert_eq!(telemetry.metric(Metric::Position), &[15, 0]);
/// assert_eq!(telemetry.metric(Metric::Velocity), &[5, 0]);
/// assert_eq!(telemetry.metric(Metric::Acceleration), &[-5, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisTelemetry {
    position: [i32; NUM_AXES],
    velocity: [i32; NUM_AXES],
    acceleration: [i32; NUM_AXES],
    buttons: u32,
}

impl AxisTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new position sample, deriving velocity and acceleration
    /// from the previous sample.
    pub fn update_position(&mut self, position: [i32; NUM_AXES]) {
        for (axis, new_position) in position.into_iter().enumerate() {
            let (Some(pos), Some(vel), Some(acc)) = (
                self.position.get_mut(axis),
                self.velocity.get_mut(axis),
                self.acceleration.get_mut(axis),
            ) else {
                continue;
            };
            let new_velocity = new_position.saturating_sub(*pos);
            *acc = new_velocity.saturating_sub(*vel);
            *vel = new_velocity;
            *pos = new_position;
        }
    }

    pub fn update_metrics(
        &mut self,
        position: [i32; NUM_AXES],
        velocity: [i32; NUM_AXES],
        acceleration: [i32; NUM_AXES],
    ) {
        self.position = position;
        self.velocity = velocity;
        self.acceleration = acceleration;
    }

    pub fn update_buttons(&mut self, buttons: u32) {
        self.buttons = buttons;
    }

    pub fn metric(&self, metric: Metric) -> &[i32; NUM_AXES] {
        match metric {
            Metric::Position => &self.position,
            Metric::Velocity => &self.velocity,
            Metric::Acceleration => &self.acceleration,
        }
    }

    pub fn buttons(&self) -> u32 {
        self.buttons
    }

    /// Whether the 1-based `button` is held. Buttons past the mask width
    /// are never pressed.
    pub fn button_pressed(&self, button: u8) -> bool {
        button
            .checked_sub(1)
            .and_then(|bit| self.buttons.checked_shr(u32::from(bit)))
            .is_some_and(|shifted| shifted & 0x01 != 0)
    }
}
