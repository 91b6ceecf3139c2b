//! Lifecycle tests driving the pool the way a host driver does.

use pidffb_core::{
    DIRECTION_ENABLE, EffectBlock, EffectDuration, EffectType, MAX_EFFECTS, Periodic,
    RAM_POOL_SIZE, X_AXIS_ENABLE,
};
use pidffb_pool::{
    BlockFree, BlockLoadStatus, DeviceControl, EffectOperation, EffectPool, SlotState,
};
use pidffb_test_helpers::{ManualClock, assert_approx_eq, must_some};

#[test]
fn pool_accepts_exactly_capacity() {
    let mut pool = EffectPool::new(ManualClock::new());
    let allocated = (0..MAX_EFFECTS)
        .filter_map(|_| pool.create_effect(EffectType::Constant))
        .count();
    assert_eq!(allocated, MAX_EFFECTS);
    assert_eq!(pool.ram_pool_available(), 0);

    assert!(pool.create_effect(EffectType::Constant).is_none());
    let load = pool.block_load_report();
    assert_eq!(load.status, BlockLoadStatus::Full);
    assert_eq!(load.effect_block_index, 0);
}

#[test]
fn ram_restored_after_cycles() {
    let mut pool = EffectPool::new(ManualClock::new());
    for _ in 0..100 {
        let id = must_some(pool.create_effect(EffectType::Ramp), "allocation");
        pool.block_free(BlockFree::Effect(id));
    }
    assert_eq!(pool.ram_pool_available(), RAM_POOL_SIZE);
}

#[test]
fn set_effect_recomputes_direction() {
    let mut pool = EffectPool::new(ManualClock::new());
    let id = must_some(pool.create_effect(EffectType::Sine), "allocation");

    let block = EffectBlock::new(EffectType::Sine, EffectDuration::Infinite)
        .with_axes(DIRECTION_ENABLE)
        .with_direction(9000, 0);
    pool.set_effect_common(id, block);
    let direction = *must_some(pool.slot(id), "slot").direction();
    assert_approx_eq!(direction.component(0), 0.0_f32, 1e-3);
    assert_approx_eq!(direction.component(1), 1.0_f32, 1e-3);

    pool.set_effect_common(id, block.with_axes(X_AXIS_ENABLE).with_direction(0, 0));
    let direction = *must_some(pool.slot(id), "slot").direction();
    assert_approx_eq!(direction.component(0), 1.0_f32, 1e-6);
    assert_approx_eq!(direction.component(1), 0.0_f32, 1e-6);
}

#[test]
fn periodic_write_replaces_parameters() {
    let mut pool = EffectPool::new(ManualClock::new());
    let id = must_some(pool.create_effect(EffectType::Square), "allocation");
    let periodic = Periodic {
        magnitude: 100,
        offset: -5,
        phase: 0,
        period_ms: 20,
    };
    pool.set_periodic(id, periodic);
    let slot = must_some(pool.slot(id), "slot");
    assert_eq!(slot.parameters().periodic(), Some(&periodic));
    assert!(slot.parameters().constant().is_none());
    assert!(slot.envelope().is_none());
}

#[test]
fn stop_all_and_reset() {
    let clock = ManualClock::new();
    let mut pool = EffectPool::new(clock.clone());
    let a = must_some(pool.create_effect(EffectType::Constant), "allocation");
    let b = must_some(pool.create_effect(EffectType::Constant), "allocation");
    pool.effect_operation(a, EffectOperation::Start, 1);
    pool.effect_operation(b, EffectOperation::Start, 1);

    pool.device_control(DeviceControl::StopAllEffects);
    assert_eq!(pool.state(a), SlotState::Allocated);
    assert_eq!(pool.state(b), SlotState::Allocated);

    pool.device_control(DeviceControl::Reset);
    assert_eq!(pool.state(a), SlotState::Free);
    assert_eq!(pool.allocated_count(), 0);
    assert_eq!(pool.ram_pool_available(), RAM_POOL_SIZE);
}

#[test]
fn device_gain_round_trip() {
    let mut pool = EffectPool::new(ManualClock::new());
    assert_eq!(pool.device_gain(), 255);
    pool.set_device_gain(128);
    assert_eq!(pool.device_gain(), 128);
}
