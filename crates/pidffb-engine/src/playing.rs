//! "Is playing" evaluation, recomputed every tick
//!
//! Timed effects play inside `[start, start + duration)`. Effects bound to a
//! trigger button ignore that window and follow the button instead:
//!
//! - released: idle, latch cleared
//! - rising edge: latch, restart the timeline, play
//! - held: play for the duration, stay silent for the repeat interval, then
//!   restart and play again

use pidffb_core::EffectDuration;
use pidffb_pool::EffectSlot;

use crate::telemetry::AxisTelemetry;

/// Whether `slot` contributes force at `now_ms`.
///
/// Updates the trigger latch and start time of trigger-bound effects.
pub fn is_playing(slot: &mut EffectSlot, telemetry: &AxisTelemetry, now_ms: u64) -> bool {
    if !slot.is_playing() {
        return false;
    }

    let duration = slot.run_duration();
    if let Some(button) = slot.block().trigger_button {
        let repeat_ms = u64::from(slot.block().trigger_repeat_interval_ms);
        return trigger_playing(
            slot,
            telemetry.button_pressed(button),
            duration,
            repeat_ms,
            now_ms,
        );
    }

    let playback = slot.playback();
    now_ms >= playback.start_time_ms && duration.covers(playback.elapsed_ms(now_ms))
}

fn trigger_playing(
    slot: &mut EffectSlot,
    pressed: bool,
    duration: EffectDuration,
    repeat_ms: u64,
    now_ms: u64,
) -> bool {
    let playback = slot.playback_mut();

    if !pressed {
        playback.trigger_latched = false;
        return false;
    }

    if !playback.trigger_latched {
        playback.trigger_latched = true;
        playback.start_time_ms = now_ms;
        return true;
    }

    let elapsed = playback.elapsed_ms(now_ms);
    if duration.covers(elapsed) {
        return true;
    }

    let cooldown_end = duration
        .finite_ms()
        .map(|ms| u64::from(ms).saturating_add(repeat_ms));
    if cooldown_end.is_some_and(|end| elapsed < end) {
        return false;
    }

    playback.start_time_ms = now_ms;
    true
}
