//! Report ids and lengths of the PID report descriptor.
//!
//! Lengths include the report id byte.

// Output reports (host to device)
pub const SET_EFFECT_REPORT_ID: u8 = 0x01;
pub const SET_ENVELOPE_REPORT_ID: u8 = 0x02;
pub const SET_CONDITION_REPORT_ID: u8 = 0x03;
pub const SET_PERIODIC_REPORT_ID: u8 = 0x04;
pub const SET_CONSTANT_FORCE_REPORT_ID: u8 = 0x05;
pub const SET_RAMP_FORCE_REPORT_ID: u8 = 0x06;
pub const CUSTOM_FORCE_DATA_REPORT_ID: u8 = 0x07;
pub const DOWNLOAD_FORCE_SAMPLE_REPORT_ID: u8 = 0x08;
pub const RESERVED_REPORT_ID: u8 = 0x09;
pub const EFFECT_OPERATION_REPORT_ID: u8 = 0x0A;
pub const BLOCK_FREE_REPORT_ID: u8 = 0x0B;
pub const DEVICE_CONTROL_REPORT_ID: u8 = 0x0C;
pub const DEVICE_GAIN_REPORT_ID: u8 = 0x0D;
pub const SET_CUSTOM_FORCE_REPORT_ID: u8 = 0x0E;

// Feature reports
pub const CREATE_NEW_EFFECT_REPORT_ID: u8 = 0x05;
pub const BLOCK_LOAD_REPORT_ID: u8 = 0x06;
pub const POOL_REPORT_ID: u8 = 0x07;

// Input reports (device to host)
pub const PID_STATE_REPORT_ID: u8 = 0x02;

pub const SET_EFFECT_REPORT_LEN: usize = 18;
pub const SET_ENVELOPE_REPORT_LEN: usize = 10;
pub const SET_CONDITION_REPORT_LEN: usize = 15;
pub const SET_PERIODIC_REPORT_LEN: usize = 10;
pub const SET_CONSTANT_FORCE_REPORT_LEN: usize = 4;
pub const SET_RAMP_FORCE_REPORT_LEN: usize = 6;
pub const EFFECT_OPERATION_REPORT_LEN: usize = 4;
pub const BLOCK_FREE_REPORT_LEN: usize = 2;
pub const DEVICE_CONTROL_REPORT_LEN: usize = 2;
pub const DEVICE_GAIN_REPORT_LEN: usize = 2;
pub const CREATE_NEW_EFFECT_REPORT_LEN: usize = 4;
pub const BLOCK_LOAD_REPORT_LEN: usize = 5;
pub const POOL_REPORT_LEN: usize = 5;
pub const PID_STATE_REPORT_LEN: usize = 3;

/// Layout length of an output report, `None` for ids outside the descriptor.
///
/// Reports the device accepts but ignores need only their id byte.
///
/// # Examples
/// ```
/// use pidffb_protocol::ids::output_report_len;
/// assert_eq!(output_report_len(0x01), Some(18));
/// assert_eq!(output_report_len(0x09), Some(1));
/// assert_eq!(output_report_len(0x20), None);
/// ```
pub fn output_report_len(report_id: u8) -> Option<usize> {
    let len = match report_id {
        SET_EFFECT_REPORT_ID => SET_EFFECT_REPORT_LEN,
        SET_ENVELOPE_REPORT_ID => SET_ENVELOPE_REPORT_LEN,
        SET_CONDITION_REPORT_ID => SET_CONDITION_REPORT_LEN,
        SET_PERIODIC_REPORT_ID => SET_PERIODIC_REPORT_LEN,
        SET_CONSTANT_FORCE_REPORT_ID => SET_CONSTANT_FORCE_REPORT_LEN,
        SET_RAMP_FORCE_REPORT_ID => SET_RAMP_FORCE_REPORT_LEN,
        CUSTOM_FORCE_DATA_REPORT_ID
        | DOWNLOAD_FORCE_SAMPLE_REPORT_ID
        | RESERVED_REPORT_ID
        | SET_CUSTOM_FORCE_REPORT_ID => 1,
        EFFECT_OPERATION_REPORT_ID => EFFECT_OPERATION_REPORT_LEN,
        BLOCK_FREE_REPORT_ID => BLOCK_FREE_REPORT_LEN,
        DEVICE_CONTROL_REPORT_ID => DEVICE_CONTROL_REPORT_LEN,
        DEVICE_GAIN_REPORT_ID => DEVICE_GAIN_REPORT_LEN,
        _ => return None,
    };
    Some(len)
}
