//! Per-type force calculators
//!
//! Every calculator is total: zero periods, zero durations and zero
//! attack/fade times contribute nothing instead of dividing by zero.

use core::f32::consts::TAU;

use crate::constants::{MAX_MAGNITUDE, MAX_PHASE};
use crate::effects::{Condition, EffectDuration, Envelope, Periodic, RampForce, Waveform};

/// Linear interpolation from `start` to `end` across the effect duration.
///
/// A zero duration yields 0; an infinite duration holds the start magnitude.
pub fn ramp_force(ramp: &RampForce, duration: EffectDuration, elapsed_ms: u64) -> f32 {
    let start = f32::from(ramp.start);
    match duration {
        EffectDuration::Infinite => start,
        EffectDuration::Finite(0) => 0.0,
        EffectDuration::Finite(ms) => {
            let span = f32::from(ramp.end) - start;
            start + elapsed_ms as f32 * span / ms as f32
        }
    }
}

/// Periodic waveform value at `elapsed_ms`.
///
/// The phase shifts the timeline by `phase / MAX_PHASE` of a period. At
/// exactly half a period the square wave takes its negative half and the
/// triangle its falling edge.
///
/// # Examples
///
/// ```
/// use pidffb_core::{periodic_force, Periodic, Waveform};
///
/// let square = Periodic { magnitude: 1, offset: 0, phase: 0, period_ms: 2 };
/// assert!((periodic_force(Waveform::Square, &square, 0) - 1.0).abs() < f32::EPSILON);
/// assert!((periodic_force(Waveform::Square, &square, 1) + 1.0).abs() < f32::EPSILON);
/// ```
pub fn periodic_force(waveform: Waveform, periodic: &Periodic, elapsed_ms: u64) -> f32 {
    if periodic.period_ms == 0 {
        return 0.0;
    }

    let period = u64::from(periodic.period_ms);
    let period_f = f32::from(periodic.period_ms);
    let magnitude = f32::from(periodic.magnitude);
    let offset = f32::from(periodic.offset);
    let phase_fraction = f32::from(periodic.phase) / f32::from(MAX_PHASE);

    // phase_fraction * period is non-negative and below period + 1
    let phase_shift = (phase_fraction * period_f) as u64;
    let remainder = elapsed_ms.wrapping_add(phase_shift) % period;
    let in_second_half = |r: u64| r.saturating_mul(2) >= period;

    let value = match waveform {
        Waveform::Square => {
            if in_second_half(remainder) {
                -magnitude
            } else {
                magnitude
            }
        }
        Waveform::Sine => {
            let cycle = (elapsed_ms % period) as f32 / period_f + phase_fraction;
            magnitude * (TAU * cycle).sin()
        }
        Waveform::Triangle => {
            let slope = 4.0 * magnitude / period_f;
            let shifted = (remainder + period / 4) % period;
            let rise = if in_second_half(shifted) {
                period - shifted
            } else {
                shifted
            };
            slope * rise as f32 - magnitude
        }
        Waveform::SawtoothUp => magnitude / period_f * remainder as f32,
        Waveform::SawtoothDown => magnitude / period_f * (period - remainder) as f32,
    };

    value + offset
}

/// Condition response to a metric value along one axis.
///
/// Outside the dead band around the center point the displacement is scaled
/// by the coefficient for that side (per `full_scale` of deflection),
/// saturated, and negated so the force opposes the metric.
///
/// # Examples
///
/// ```
/// use pidffb_core::{condition_force, Condition};
///
/// let spring = Condition {
///     cp_offset: 8191,
///     dead_band: 8191,
///     positive_coefficient: 255,
///     negative_coefficient: 255,
///     positive_saturation: 255,
///     negative_saturation: 255,
/// };
/// let force = condition_force(&spring, 32767.0, 32767.0);
/// assert_eq!(force as i32, -127);
/// ```
pub fn condition_force(condition: &Condition, metric: f32, full_scale: f32) -> f32 {
    if full_scale <= 0.0 {
        return 0.0;
    }

    let cp = f32::from(condition.cp_offset);
    let dead_band = f32::from(condition.dead_band);
    let lower = cp - dead_band;
    let upper = cp + dead_band;

    let displacement = if metric < lower {
        let raw = (metric - lower) * f32::from(condition.negative_coefficient) / full_scale;
        let saturation = f32::from(condition.negative_saturation);
        raw.clamp(-saturation, saturation)
    } else if metric > upper {
        let raw = (metric - upper) * f32::from(condition.positive_coefficient) / full_scale;
        let saturation = f32::from(condition.positive_saturation);
        raw.clamp(-saturation, saturation)
    } else {
        0.0
    };

    -displacement
}

/// Envelope scale factor in `[0, 1]` at `elapsed_ms`.
///
/// During the attack window the level ramps from `attack_level` up to full
/// magnitude; in the last `fade_time_ms` of a finite effect it ramps down to
/// `fade_level`. Outside both windows the factor is 1.
pub fn envelope_ratio(envelope: &Envelope, elapsed_ms: u64, duration: EffectDuration) -> f32 {
    let full = MAX_MAGNITUDE as f32;
    let attack_time = u64::from(envelope.attack_time_ms);
    let fade_time = u64::from(envelope.fade_time_ms);

    let level = if elapsed_ms < attack_time {
        let attack_level = f32::from(envelope.attack_level);
        let slope = (full - attack_level) / attack_time as f32;
        slope * elapsed_ms as f32 + attack_level
    } else {
        match duration.finite_ms().map(u64::from) {
            Some(total) if fade_time > 0 && elapsed_ms.saturating_add(fade_time) >= total => {
                let fade_level = f32::from(envelope.fade_level);
                let slope = (full - fade_level) / fade_time as f32;
                let remaining = total.saturating_sub(elapsed_ms);
                slope * remaining as f32 + fade_level
            }
            _ => full,
        }
    };

    (level / full).clamp(0.0, 1.0)
}

/// Scales `force` by `gain / MAX_GAIN`.
pub fn apply_gain(force: f32, gain: u8) -> f32 {
    force * f32::from(gain) / f32::from(crate::constants::MAX_GAIN)
}
