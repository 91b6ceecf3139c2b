//! Tick-by-tick behaviour of the whole pool + engine pair.

use pidffb_core::{
    Condition, ConstantForce, DIRECTION_ENABLE, EffectBlock, EffectDuration, EffectType, Envelope,
    MAX_EFFECTS, MAX_PHASE, Periodic, RAM_POOL_SIZE, RampForce, X_AXIS_ENABLE, Y_AXIS_ENABLE,
};
use pidffb_engine::{AxisTelemetry, EngineConfig, ForceEngine};
use pidffb_pool::{BlockFree, DeviceControl, EffectId, EffectOperation, EffectPool};
use pidffb_test_helpers::prelude::*;

const FULL: i32 = 32767;

struct Rig {
    clock: ManualClock,
    pool: EffectPool<ManualClock>,
    engine: ForceEngine,
    telemetry: AxisTelemetry,
}

impl Rig {
    fn new() -> Self {
        let clock = ManualClock::new();
        Self {
            pool: EffectPool::new(clock.clone()),
            clock,
            engine: ForceEngine::new(EngineConfig::default()),
            telemetry: AxisTelemetry::default(),
        }
    }

    fn try_create(&mut self, block: EffectBlock) -> Option<EffectId> {
        let id = self.pool.create_effect(block.effect_type)?;
        self.pool.set_effect_common(id, block);
        Some(id)
    }

    fn create(&mut self, block: EffectBlock) -> EffectId {
        must_some(self.try_create(block), "pool has a free slot")
    }

    fn constant(&mut self, block: EffectBlock, magnitude: i16) -> EffectId {
        let id = self.create(block);
        self.pool.set_constant_force(id, ConstantForce { magnitude });
        id
    }

    fn periodic(&mut self, kind: EffectType, duration_ms: u32, periodic: Periodic) -> EffectId {
        let id = self.create(EffectBlock::new(kind, EffectDuration::Finite(duration_ms)));
        self.pool.set_periodic(id, periodic);
        id
    }

    fn start(&mut self, id: EffectId) {
        self.pool.effect_operation(id, EffectOperation::Start, 0);
    }

    fn tick(&mut self) -> [i32; 2] {
        self.engine.compute_forces(&mut self.pool, &self.telemetry)
    }

    fn x(&mut self) -> i32 {
        let [x, _] = self.tick();
        x
    }

    /// One tick per millisecond, sampled before the clock advances.
    fn trace_x(&mut self, ticks: u32) -> Vec<i32> {
        (0..ticks)
            .map(|_| {
                let x = self.x();
                self.clock.advance(1);
                x
            })
            .collect()
    }
}

fn constant_block(duration_ms: u32) -> EffectBlock {
    EffectBlock::new(EffectType::Constant, EffectDuration::Finite(duration_ms))
}

fn saturated_condition(cp_offset: i16, dead_band: u16) -> Condition {
    Condition {
        cp_offset,
        positive_coefficient: 255,
        negative_coefficient: 255,
        positive_saturation: 255,
        negative_saturation: 255,
        dead_band,
    }
}

// --- administration ---

#[test]
fn test_pool_administration() {
    let mut rig = Rig::new();

    let mut assigned = 0;
    while let Some(id) = rig.try_create(constant_block(1)) {
        rig.pool.set_constant_force(id, ConstantForce { magnitude: 1 });
        rig.start(id);
        assigned += 1;
    }
    assert_eq!(assigned, MAX_EFFECTS);
    assert_eq!(rig.x(), 14);
    assert_eq!(rig.pool.block_load_report().ram_pool_available, 0);

    let last = must_some(EffectId::new(14), "id");
    rig.pool.block_free(BlockFree::Effect(last));
    assert_eq!(rig.x(), 13);

    let id = rig.constant(constant_block(1), 1);
    assert_eq!(id, last);
    rig.start(id);
    assert_eq!(rig.x(), 14);

    let seventh = must_some(EffectId::new(7), "id");
    rig.pool.effect_operation(seventh, EffectOperation::StartSolo, 0);
    assert_eq!(rig.x(), 1);

    rig.pool.effect_operation(seventh, EffectOperation::Stop, 0);
    assert_eq!(rig.x(), 0);

    rig.pool.block_free(BlockFree::All);
    assert_eq!(rig.pool.block_load_report().ram_pool_available, RAM_POOL_SIZE);
    assert_eq!(rig.x(), 0);
}

#[test]
fn test_device_gain_scales_output() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(1), 100);
    rig.start(id);

    assert_eq!(rig.x(), 100);
    rig.pool.set_device_gain(128);
    assert_eq!(rig.x(), 50);
}

#[test]
fn test_start_delay() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(1).with_start_delay(1), 100);
    rig.start(id);

    assert_eq!(rig.trace_x(3), vec![0, 100, 0]);
}

#[test]
fn test_pause_and_continue_shift_the_timeline() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(2), 100);
    rig.start(id);

    assert_eq!(rig.x(), 100);

    rig.pool.device_control(DeviceControl::Pause);
    assert_eq!(rig.x(), 0);

    rig.clock.advance(1);
    rig.pool.device_control(DeviceControl::Continue);
    assert_eq!(rig.trace_x(3), vec![100, 100, 0]);
}

#[test]
fn test_loop_count_repeats_duration() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(2), 10);
    rig.pool.effect_operation(id, EffectOperation::Start, 3);

    assert_eq!(rig.trace_x(7), vec![10, 10, 10, 10, 10, 10, 0]);
}

#[test]
fn test_infinite_loop_count_never_expires() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(1), 10);
    rig.pool.effect_operation(id, EffectOperation::Start, 0xFF);

    rig.clock.set(1_000_000);
    assert_eq!(rig.x(), 10);
}

// --- trigger buttons ---

#[test]
fn test_trigger_button_latch_and_repeat() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(1).with_trigger(1, 2), 255);
    rig.start(id);

    assert_eq!(rig.x(), 0);

    rig.telemetry.update_buttons(0b1);
    assert_eq!(rig.x(), 255);

    rig.clock.advance(1);
    assert_eq!(rig.x(), 0);

    rig.clock.advance(2);
    assert_eq!(rig.x(), 255);

    rig.telemetry.update_buttons(0);
    assert_eq!(rig.x(), 0);
}

#[test]
fn test_trigger_rising_edge_restarts_timeline() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(3).with_trigger(2, 100), 50);
    rig.start(id);

    rig.telemetry.update_buttons(0b10);
    assert_eq!(rig.trace_x(4), vec![50, 50, 50, 0]);

    // Release and press again inside the cooldown: plays immediately
    rig.telemetry.update_buttons(0);
    assert_eq!(rig.x(), 0);
    rig.telemetry.update_buttons(0b10);
    assert_eq!(rig.x(), 50);
}

#[test]
fn test_trigger_on_other_button_stays_silent() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(5).with_trigger(3, 0), 50);
    rig.start(id);

    rig.telemetry.update_buttons(0b011);
    assert_eq!(rig.trace_x(3), vec![0, 0, 0]);
}

// --- condition effects ---

#[test]
fn test_every_condition_type_reads_its_metric() {
    for kind in [
        EffectType::Spring,
        EffectType::Damper,
        EffectType::Inertia,
        EffectType::Friction,
    ] {
        let mut rig = Rig::new();
        let id = rig.create(EffectBlock::new(kind, EffectDuration::Infinite));
        assert!(rig.pool.set_condition(id, 0, saturated_condition(8191, 8191)));
        rig.start(id);

        rig.telemetry.update_metrics([FULL, FULL], [FULL, FULL], [FULL, FULL]);
        assert_eq!(rig.x(), -127, "{kind:?}");
    }
}

#[test]
fn test_condition_center_offset_per_axis() {
    let mut rig = Rig::new();
    let id = rig.create(
        EffectBlock::new(EffectType::Spring, EffectDuration::Infinite)
            .with_axes(X_AXIS_ENABLE | Y_AXIS_ENABLE),
    );
    assert!(rig.pool.set_condition(id, 0, saturated_condition(8191, 8191)));
    assert!(rig.pool.set_condition(id, 1, saturated_condition(8191, 8191)));
    rig.start(id);

    let three_quarters = FULL * 3 / 4;

    rig.telemetry.update_position([three_quarters / 2, three_quarters / 2]);
    assert_eq!(rig.tick(), [0, 0]);

    rig.telemetry.update_position([three_quarters, three_quarters]);
    assert_eq!(rig.tick(), [-63, -63]);

    rig.telemetry.update_position([FULL, FULL]);
    assert_eq!(rig.tick(), [-127, -127]);

    rig.telemetry.update_position([-FULL, -FULL]);
    assert_eq!(rig.tick(), [255, 255]);
}

#[test]
fn test_condition_in_direction_mode_projects_metric() {
    let mut rig = Rig::new();
    // 45 degrees
    let id = rig.create(
        EffectBlock::new(EffectType::Inertia, EffectDuration::Infinite)
            .with_axes(DIRECTION_ENABLE)
            .with_direction(4499, 0),
    );
    assert!(rig.pool.set_condition(id, 0, saturated_condition(0, 0)));
    rig.start(id);

    // Acceleration perpendicular to the direction
    rig.telemetry.update_position([-FULL, FULL]);
    assert_eq!(rig.tick(), [0, 0]);
    rig.telemetry.update_position([FULL, -FULL]);
    assert_eq!(rig.tick(), [0, 0]);

    rig.telemetry.update_position([0, 0]);
    rig.telemetry.update_position([FULL, FULL]);
    assert_eq!(rig.tick(), [-180, -180]);

    rig.telemetry.update_position([0, 0]);
    assert_eq!(rig.tick(), [180, 180]);

    rig.telemetry.update_position([-FULL, -FULL]);
    assert_eq!(rig.tick(), [0, 0]);
}

#[test]
fn test_condition_full_scale_is_configurable() {
    let mut rig = Rig::new();
    rig.engine = ForceEngine::new(EngineConfig {
        axis_full_scale: 1023,
        ..EngineConfig::default()
    });
    let id = rig.create(EffectBlock::new(EffectType::Spring, EffectDuration::Infinite));
    assert!(rig.pool.set_condition(id, 0, saturated_condition(0, 0)));
    rig.start(id);

    rig.telemetry.update_position([1023, 0]);
    assert_eq!(rig.x(), -255);
}

// --- waveforms ---

#[test]
fn test_ramp_interpolates_over_duration() {
    let mut rig = Rig::new();
    let id = rig.create(EffectBlock::new(EffectType::Ramp, EffectDuration::Finite(4)));
    rig.pool.set_ramp_force(id, RampForce { start: 60, end: 100 });
    rig.start(id);

    assert_eq!(rig.trace_x(5), vec![60, 70, 80, 90, 0]);
}

#[test]
fn test_square_wave_alternates() {
    let mut rig = Rig::new();
    let id = rig.periodic(
        EffectType::Square,
        2,
        Periodic {
            magnitude: 1,
            offset: 0,
            phase: 0,
            period_ms: 2,
        },
    );
    rig.start(id);

    assert_eq!(rig.trace_x(2), vec![1, -1]);
}

#[test]
fn test_triangle_wave_averages_to_offset() {
    let mut rig = Rig::new();
    let id = rig.periodic(
        EffectType::Triangle,
        100,
        Periodic {
            magnitude: 100,
            offset: 1,
            phase: 0,
            period_ms: 100,
        },
    );
    rig.start(id);

    let sum: i32 = rig.trace_x(100).iter().sum();
    assert_eq!(sum, 100);
}

#[test]
fn test_sawtooth_up_and_down_complement() {
    let mut rig = Rig::new();
    let wave = Periodic {
        magnitude: 100,
        offset: 0,
        phase: 0,
        period_ms: 1000,
    };
    let up = rig.periodic(EffectType::SawtoothUp, 1000, wave);
    rig.start(up);
    let down = rig.periodic(EffectType::SawtoothDown, 1000, wave);
    rig.start(down);

    // Truncation may drop one unit where the float sum lands just below 100
    for (tick, x) in rig.trace_x(1000).into_iter().enumerate() {
        assert!((99..=100).contains(&x), "tick {tick}: {x}");
    }
}

#[test]
fn test_sine_phase_sweep_integrates_to_zero() {
    let mut rig = Rig::new();
    for phase in (0..MAX_PHASE).step_by(10) {
        let id = rig.periodic(
            EffectType::Sine,
            100,
            Periodic {
                magnitude: 100,
                offset: 0,
                phase,
                period_ms: 100,
            },
        );
        rig.start(id);

        let sum: i32 = rig.trace_x(100).iter().sum();
        assert!(sum.abs() <= 2, "phase {phase}: {sum}");

        rig.pool.block_free(BlockFree::Effect(id));
    }
}

#[test]
fn test_sine_offset_shifts_mean() {
    let mut rig = Rig::new();
    let id = rig.periodic(
        EffectType::Sine,
        100,
        Periodic {
            magnitude: 100,
            offset: 1,
            phase: 0,
            period_ms: 100,
        },
    );
    rig.start(id);

    let sum: i32 = rig.trace_x(100).iter().sum();
    assert!((97..=101).contains(&sum), "{sum}");
}

#[test]
fn test_zero_period_contributes_nothing() {
    let mut rig = Rig::new();
    let id = rig.periodic(
        EffectType::Sine,
        10,
        Periodic {
            magnitude: 100,
            offset: 0,
            phase: 0,
            period_ms: 0,
        },
    );
    rig.start(id);

    assert_eq!(rig.trace_x(3), vec![0, 0, 0]);
}

// --- envelope ---

#[test]
fn test_envelope_attack_and_fade() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(5), 100);
    rig.pool.set_envelope(
        id,
        Envelope {
            attack_level: 0,
            fade_level: 0,
            attack_time_ms: 2,
            fade_time_ms: 2,
        },
    );
    rig.start(id);

    assert_eq!(rig.trace_x(6), vec![0, 50, 100, 100, 50, 0]);
}

#[test]
fn test_envelope_fade_only() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(8), 255);
    rig.pool.set_envelope(
        id,
        Envelope {
            attack_level: 1,
            fade_level: 0,
            attack_time_ms: 0,
            fade_time_ms: 8,
        },
    );
    rig.start(id);

    assert_eq!(rig.x(), 255);
    rig.clock.set(3);
    assert_eq!(rig.x(), 159);
    rig.clock.set(6);
    assert_eq!(rig.x(), 63);
    rig.clock.set(7);
    assert_eq!(rig.x(), 31);
    rig.clock.advance(1);
    assert_eq!(rig.x(), 0);
}

// --- direction ---

#[test]
fn test_constant_on_x_only() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(1), 1);
    rig.start(id);

    assert_eq!(rig.tick(), [1, 0]);
    rig.clock.advance(1);
    assert_eq!(rig.tick(), [0, 0]);
}

#[test]
fn test_constant_on_y_only() {
    let mut rig = Rig::new();
    // 270 degrees on the Y angle
    let id = rig.constant(
        constant_block(1)
            .with_axes(Y_AXIS_ENABLE)
            .with_direction(0, 26999),
        100,
    );
    rig.start(id);

    let [x, y] = rig.tick();
    assert_eq!(x, 0);
    assert!((-100..=-99).contains(&y), "{y}");

    rig.clock.advance(1);
    assert_eq!(rig.tick(), [0, 0]);
}

#[test]
fn test_direction_mode_splits_waveform_across_axes() {
    let mut rig = Rig::new();
    // 90 degrees points along Y
    let id = rig.constant(
        EffectBlock::new(EffectType::Constant, EffectDuration::Infinite)
            .with_axes(DIRECTION_ENABLE)
            .with_direction(9000, 0),
        200,
    );
    rig.start(id);

    let [x, y] = rig.tick();
    assert!(x.abs() <= 1, "{x}");
    assert!((199..=200).contains(&y), "{y}");
}

#[test]
fn test_effect_gain_before_device_gain() {
    let mut rig = Rig::new();
    let id = rig.constant(constant_block(10).with_gain(51), 250);
    rig.start(id);

    // 250 * 51/255 = 50
    assert_eq!(rig.x(), 50);
}
