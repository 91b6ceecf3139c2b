//! Applies decoded reports to the effect pool.
//!
//! Decoding errors never reach the tick loop: [`dispatch`] logs and drops
//! them. Callers that want to count or surface failures use
//! [`handle_output_report`] directly.

use tracing::{debug, warn};

use pidffb_core::{BLOCK_FREE_ALL, Clock};
use pidffb_errors::{ErrorSeverity, ProtocolError, ProtocolResult};
use pidffb_pool::{BlockFree, BlockLoadReport, EffectId, EffectPool};

use crate::encode::{encode_block_load, encode_pid_state, encode_pool};
use crate::ids::{BLOCK_LOAD_REPORT_ID, PID_STATE_REPORT_LEN, POOL_REPORT_ID};
use crate::report::{CreateNewEffect, OutputReport};

/// Feature reports readable by the host share one length.
pub const FEATURE_REPORT_LEN: usize = 5;

/// Decodes and applies one output report, dropping it on failure.
pub fn dispatch<C: Clock>(pool: &mut EffectPool<C>, data: &[u8]) {
    let Err(error) = handle_output_report(pool, data) else {
        return;
    };
    match error.severity() {
        ErrorSeverity::Info => {
            debug!(%error, code = error.code(), len = data.len(), "output report ignored");
        }
        _ => warn!(%error, code = error.code(), len = data.len(), "output report dropped"),
    }
}

/// Decodes and applies one output report.
///
/// # Errors
///
/// Returns the decoding error; the pool is untouched in that case.
pub fn handle_output_report<C: Clock>(
    pool: &mut EffectPool<C>,
    data: &[u8],
) -> ProtocolResult<OutputReport> {
    let report = OutputReport::decode(data)?;
    apply(pool, report);
    Ok(report)
}

/// Applies an already decoded report. Reports naming an effect block
/// outside the pool are logged and ignored.
pub fn apply<C: Clock>(pool: &mut EffectPool<C>, report: OutputReport) {
    match report {
        OutputReport::BlockFree {
            effect_block_index: BLOCK_FREE_ALL,
        } => pool.block_free(BlockFree::All),
        OutputReport::DeviceControl { control } => pool.device_control(control),
        OutputReport::DeviceGain { gain } => pool.set_device_gain(gain),
        OutputReport::Ignored { report_id } => debug!(report_id, "report ignored"),
        per_effect => apply_to_effect(pool, per_effect),
    }
}

fn apply_to_effect<C: Clock>(pool: &mut EffectPool<C>, report: OutputReport) {
    let Some(raw) = report.effect_block_index() else {
        return;
    };
    let Some(id) = EffectId::new(raw) else {
        warn!(effect_block_index = raw, ?report, "effect block index out of range");
        return;
    };

    match report {
        OutputReport::SetEffect { block, .. } => pool.set_effect_common(id, block),
        OutputReport::SetEnvelope { envelope, .. } => pool.set_envelope(id, envelope),
        OutputReport::SetCondition {
            parameter_block_offset,
            condition,
            ..
        } => {
            pool.set_condition(id, parameter_block_offset, condition);
        }
        OutputReport::SetPeriodic { periodic, .. } => pool.set_periodic(id, periodic),
        OutputReport::SetConstantForce { constant, .. } => pool.set_constant_force(id, constant),
        OutputReport::SetRampForce { ramp, .. } => pool.set_ramp_force(id, ramp),
        OutputReport::EffectOperation {
            operation,
            loop_count,
            ..
        } => pool.effect_operation(id, operation, loop_count),
        OutputReport::BlockFree { .. } => pool.block_free(BlockFree::Effect(id)),
        OutputReport::DeviceControl { .. }
        | OutputReport::DeviceGain { .. }
        | OutputReport::Ignored { .. } => {}
    }
}

/// Handles a Create New Effect feature write and returns the resulting
/// block load report.
///
/// # Errors
///
/// Returns the decoding error without allocating.
pub fn handle_create_new_effect<C: Clock>(
    pool: &mut EffectPool<C>,
    data: &[u8],
) -> ProtocolResult<BlockLoadReport> {
    let request = CreateNewEffect::decode(data)?;
    match pool.create_effect(request.effect_type) {
        Some(id) => debug!(%id, byte_count = request.byte_count, "create new effect"),
        None => warn!(effect_type = ?request.effect_type, "create new effect: pool full"),
    }
    Ok(pool.block_load_report())
}

/// Answers a host feature read.
///
/// Reading the pool report frees every effect, as the host only does so
/// while initialising.
///
/// # Errors
///
/// [`ProtocolError::UnknownReportId`] for ids other than block load and pool.
pub fn read_feature_report<C: Clock>(
    pool: &mut EffectPool<C>,
    report_id: u8,
) -> ProtocolResult<[u8; FEATURE_REPORT_LEN]> {
    match report_id {
        BLOCK_LOAD_REPORT_ID => Ok(encode_block_load(&pool.block_load_report())),
        POOL_REPORT_ID => Ok(encode_pool(&pool.pool_report())),
        other => Err(ProtocolError::UnknownReportId(other)),
    }
}

/// Current PID State input report.
pub fn pid_state<C: Clock>(pool: &EffectPool<C>) -> [u8; PID_STATE_REPORT_LEN] {
    encode_pid_state(&pool.pid_state_report())
}
