//! Per-tick force composition

use tracing::trace;

use pidffb_core::{
    Clock, EffectClass, EffectType, NUM_AXES, apply_gain, condition_force, envelope_ratio,
    periodic_force, ramp_force,
};
use pidffb_pool::{EffectPool, EffectSlot};

use crate::config::EngineConfig;
use crate::hook::{ForceHook, NoHook};
use crate::playing::is_playing;
use crate::telemetry::AxisTelemetry;

/// What one playing effect adds to the tick before the hook and the sum.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Contribution {
    /// Waveform force, gain and envelope applied, still to be split onto
    /// the axes by the direction vector.
    Scalar(f32),
    /// Condition force per axis, gain applied.
    PerAxis([f32; NUM_AXES]),
    None,
}

/// Turns the pool and the axis telemetry into one force sample per axis.
///
/// The engine holds no effect state of its own; it reads the pool on every
/// tick and only writes back trigger latches and trigger restart times.
///
/// # Examples
///
/// ```
/// use pidffb_core::{ConstantForce, EffectBlock, EffectDuration, EffectType};
/// use pidffb_engine::{AxisTelemetry, EngineConfig, ForceEngine};
/// use pidffb_pool::{EffectOperation, EffectPool};
///
/// let mut pool = EffectPool::new(|| 0_u64);
/// let Some(id) = pool.create_effect(EffectType::Constant) else { return };
/// pool.set_effect_common(id, EffectBlock::new(EffectType::Constant, EffectDuration::Infinite));
/// pool.set_constant_force(id, ConstantForce { magnitude: 100 });
/// pool.effect_operation(id, EffectOperation::Start, 0);
///
/// let mut engine = ForceEngine::new(EngineConfig::default());
/// assert_eq!(engine.compute_forces(&mut pool, &AxisTelemetry::default()), [100, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct ForceEngine<H = NoHook> {
    config: EngineConfig,
    hook: H,
}

impl ForceEngine<NoHook> {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            hook: NoHook,
        }
    }
}

impl Default for ForceEngine<NoHook> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<H: ForceHook> ForceEngine<H> {
    /// Replaces the per-axis post-processing hook.
    pub fn with_hook<G: ForceHook>(self, hook: G) -> ForceEngine<G> {
        ForceEngine {
            config: self.config,
            hook,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Computes the force sample for the current clock time.
    ///
    /// A paused device yields zero on every axis without advancing any
    /// trigger state. The result is truncated toward zero and not clamped.
    pub fn compute_forces<C: Clock>(
        &mut self,
        pool: &mut EffectPool<C>,
        telemetry: &AxisTelemetry,
    ) -> [i32; NUM_AXES] {
        if pool.device_paused() {
            return [0; NUM_AXES];
        }

        let now = pool.now_ms();
        let device_gain = pool.device_gain();
        let full_scale = self.config.axis_full_scale as f32;
        let mut sum = [0.0_f32; NUM_AXES];

        for slot in pool.slots_mut().iter_mut() {
            if !is_playing(slot, telemetry, now) {
                continue;
            }

            let effect_type = slot.effect_type();
            match contribution(slot, telemetry, now, full_scale) {
                Contribution::Scalar(force) => {
                    let enable = slot.block().enable_axis;
                    let unit = slot.direction();
                    for (axis, total) in sum.iter_mut().enumerate() {
                        if enable.direction_mode() || enable.axis(axis) {
                            let component = force * unit.component(axis);
                            *total += self.hook.adjust(component, effect_type, axis);
                        }
                    }
                }
                Contribution::PerAxis(forces) => {
                    for (axis, (total, force)) in sum.iter_mut().zip(forces).enumerate() {
                        *total += self.hook.adjust(force, effect_type, axis);
                    }
                }
                Contribution::None => {}
            }
        }

        let forces = sum.map(|force| apply_gain(force, device_gain) as i32);
        trace!(?forces, now, "tick");
        forces
    }
}

fn contribution(
    slot: &EffectSlot,
    telemetry: &AxisTelemetry,
    now_ms: u64,
    full_scale: f32,
) -> Contribution {
    let block = slot.block();
    let elapsed = slot.playback().elapsed_ms(now_ms);

    match block.effect_type.class() {
        EffectClass::Waveform => {
            let Some(raw) = waveform_force(slot, elapsed) else {
                return Contribution::None;
            };
            let shaped = match slot.envelope() {
                Some(envelope) => raw * envelope_ratio(envelope, elapsed, slot.run_duration()),
                None => raw,
            };
            Contribution::Scalar(apply_gain(shaped, block.gain))
        }
        EffectClass::Condition => {
            let forces = condition_forces(slot, telemetry, full_scale);
            Contribution::PerAxis(forces.map(|force| apply_gain(force, block.gain)))
        }
        EffectClass::Unsupported => Contribution::None,
    }
}

/// Raw waveform value, `None` for types without a waveform calculator.
/// Missing parameter blocks read as zero magnitude.
fn waveform_force(slot: &EffectSlot, elapsed_ms: u64) -> Option<f32> {
    let parameters = slot.parameters();
    let force = match slot.effect_type() {
        EffectType::Constant => parameters
            .constant()
            .map_or(0.0, |constant| f32::from(constant.magnitude)),
        EffectType::Ramp => parameters.ramp().map_or(0.0, |ramp| {
            ramp_force(ramp, slot.run_duration(), elapsed_ms)
        }),
        other => {
            let waveform = other.waveform()?;
            parameters
                .periodic()
                .map_or(0.0, |periodic| periodic_force(waveform, periodic, elapsed_ms))
        }
    };
    Some(force)
}

/// Condition force on each axis, before the effect gain.
///
/// In direction mode the metric is projected onto the direction, the first
/// condition block is applied once, and the result is split back onto the
/// axes. Otherwise each enabled axis uses its own block.
fn condition_forces(
    slot: &EffectSlot,
    telemetry: &AxisTelemetry,
    full_scale: f32,
) -> [f32; NUM_AXES] {
    let (Some(metric), Some(blocks)) = (
        slot.effect_type().metric(),
        slot.parameters().condition(),
    ) else {
        return [0.0; NUM_AXES];
    };
    let metric = telemetry.metric(metric).map(|value| value as f32);
    let enable = slot.block().enable_axis;

    if enable.direction_mode() {
        let unit = slot.direction();
        let along = unit.project(&metric);
        let force = blocks
            .get(0)
            .map_or(0.0, |condition| condition_force(condition, along, full_scale));
        return unit.0.map(|component| force * component);
    }

    let mut forces = [0.0; NUM_AXES];
    for (axis, (force, value)) in forces.iter_mut().zip(metric).enumerate() {
        if !enable.axis(axis) {
            continue;
        }
        if let Some(condition) = blocks.get(axis) {
            *force = condition_force(condition, value, full_scale);
        }
    }
    forces
}
