//! Outbound report encoders.
//!
//! Each encoder returns a fixed-size array including the report id.

use pidffb_pool::{BlockLoadReport, PidStateReport, PoolReport};

use crate::ids::*;

/// Block Load feature report.
///
/// # Report layout
/// ```text
/// Byte 0: BLOCK_LOAD_REPORT_ID (0x06)
/// Byte 1: effect block index (0 when nothing was allocated)
/// Byte 2: load status, 1=success 2=full 3=error
/// Bytes 3-4: RAM pool available u16 LE
/// ```
pub fn encode_block_load(report: &BlockLoadReport) -> [u8; BLOCK_LOAD_REPORT_LEN] {
    let [lo, hi] = report.ram_pool_available.to_le_bytes();
    [
        BLOCK_LOAD_REPORT_ID,
        report.effect_block_index,
        report.status.to_wire(),
        lo,
        hi,
    ]
}

/// Pool feature report.
///
/// # Report layout
/// ```text
/// Byte 0: POOL_REPORT_ID (0x07)
/// Bytes 1-2: RAM pool size u16 LE
/// Byte 3: max simultaneous effects
/// Byte 4: memory management (3 = device managed, shared parameter blocks)
/// ```
pub fn encode_pool(report: &PoolReport) -> [u8; POOL_REPORT_LEN] {
    let [lo, hi] = report.ram_pool_size.to_le_bytes();
    [
        POOL_REPORT_ID,
        lo,
        hi,
        report.max_simultaneous_effects,
        report.memory_management,
    ]
}

/// PID State input report: `[0x02, status, effect block index]`.
pub fn encode_pid_state(report: &PidStateReport) -> [u8; PID_STATE_REPORT_LEN] {
    [
        PID_STATE_REPORT_ID,
        report.status.0,
        report.effect_block_index,
    ]
}
