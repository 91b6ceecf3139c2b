//! Snapshot tests for outbound report bytes and decode diagnostics.

use insta::assert_snapshot;
use pidffb_errors::ProtocolError;
use pidffb_pool::{DeviceControl, EffectPool};
use pidffb_protocol::{
    OutputReport, encode_pid_state, handle_create_new_effect, pid_state, read_feature_report,
};
use pidffb_test_helpers::prelude::*;

fn hex(bytes: &[u8]) -> String {
    format!("{bytes:02X?}")
}

// -- Feature reports ----------------------------------------------------------

#[test]
fn snapshot_block_load_after_first_create() {
    let mut pool = EffectPool::new(ManualClock::new());
    must(handle_create_new_effect(&mut pool, &[0x05, 0x01, 0x00, 0x00]));
    let report = must(read_feature_report(&mut pool, 0x06));
    assert_snapshot!(hex(&report), @"[06, 01, 01, 40, 03]");
}

#[test]
fn snapshot_pool_report() {
    let mut pool = EffectPool::new(ManualClock::new());
    let report = must(read_feature_report(&mut pool, 0x07));
    assert_snapshot!(hex(&report), @"[07, 80, 03, 0E, 03]");
}

// -- PID state ----------------------------------------------------------------

#[test]
fn snapshot_pid_state_initial() {
    let pool = EffectPool::new(ManualClock::new());
    assert_snapshot!(hex(&pid_state(&pool)), @"[02, 1E, 00]");
}

#[test]
fn snapshot_pid_state_paused_with_actuators_off() {
    let mut pool = EffectPool::new(ManualClock::new());
    pool.device_control(DeviceControl::DisableActuators);
    pool.device_control(DeviceControl::Pause);
    assert_snapshot!(hex(&encode_pid_state(&pool.pid_state_report())), @"[02, 1D, 00]");
}

// -- Decoding -----------------------------------------------------------------

#[test]
fn snapshot_decoded_device_control() {
    let report = must(OutputReport::decode(&[0x0C, 0x05]));
    assert_snapshot!(format!("{report:?}"), @"DeviceControl { control: Pause }");
}

#[test]
fn snapshot_decoded_effect_operation() {
    let report = must(OutputReport::decode(&[0x0A, 0x02, 0x02, 0xFF]));
    assert_snapshot!(
        format!("{report:?}"),
        @"EffectOperation { effect_block_index: 2, operation: StartSolo, loop_count: 255 }"
    );
}

#[test]
fn snapshot_too_short_message() {
    let err = OutputReport::decode(&[0x01, 0x01, 0x01]).err();
    assert_eq!(
        err,
        Some(ProtocolError::TooShort {
            report_id: 1,
            expected: 18,
            actual: 3
        })
    );
    let message = err.map(|e| e.to_string()).unwrap_or_default();
    assert_snapshot!(message, @"report 0x01 too short: expected 18 bytes, got 3");
}

#[test]
fn snapshot_invalid_value_message() {
    let message = OutputReport::decode(&[0x0C, 0x09])
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default();
    assert_snapshot!(message, @"invalid device control value 9");
}
