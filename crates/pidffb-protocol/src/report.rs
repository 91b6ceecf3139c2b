//! Typed inbound reports and their decoders.

use serde::Serialize;

use pidffb_core::{
    AxisEnable, Condition, ConstantForce, EffectBlock, EffectDuration, EffectType, Envelope,
    Periodic, RampForce, trigger_button_from_wire,
};
use pidffb_errors::{ProtocolError, ProtocolResult};
use pidffb_pool::{DeviceControl, EffectOperation};

use crate::ids::*;
use crate::reader::ReportReader;

/// One decoded output report.
///
/// Effect block indices stay raw: range checking belongs to the pool side so
/// a bad index drops only that report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum OutputReport {
    SetEffect {
        effect_block_index: u8,
        block: EffectBlock,
    },
    SetEnvelope {
        effect_block_index: u8,
        envelope: Envelope,
    },
    SetCondition {
        effect_block_index: u8,
        /// Low nibble of the wire byte.
        parameter_block_offset: u8,
        condition: Condition,
    },
    SetPeriodic {
        effect_block_index: u8,
        periodic: Periodic,
    },
    SetConstantForce {
        effect_block_index: u8,
        constant: ConstantForce,
    },
    SetRampForce {
        effect_block_index: u8,
        ramp: RampForce,
    },
    EffectOperation {
        effect_block_index: u8,
        operation: EffectOperation,
        loop_count: u8,
    },
    BlockFree {
        /// `0xFF` frees every effect.
        effect_block_index: u8,
    },
    DeviceControl {
        control: DeviceControl,
    },
    DeviceGain {
        gain: u8,
    },
    /// Custom force data, download force sample, the reserved id and set
    /// custom force. Accepted and ignored.
    Ignored {
        report_id: u8,
    },
}

impl OutputReport {
    /// Decodes one output report. Trailing bytes beyond the layout are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Empty or short buffers, ids outside the descriptor and out-of-range
    /// operation or control values.
    ///
    /// # Examples
    ///
    /// ```
    /// use pidffb_protocol::OutputReport;
    ///
    /// let report = OutputReport::decode(&[0x0D, 0x80])?;
    /// assert_eq!(report, OutputReport::DeviceGain { gain: 0x80 });
    /// # Ok::<(), pidffb_errors::ProtocolError>(())
    /// ```
    pub fn decode(data: &[u8]) -> ProtocolResult<Self> {
        let report_id = *data.first().ok_or(ProtocolError::Empty)?;
        let len = output_report_len(report_id).ok_or(ProtocolError::UnknownReportId(report_id))?;
        let mut r = ReportReader::new(data, len)?;

        let report = match report_id {
            SET_EFFECT_REPORT_ID => decode_set_effect(&mut r)?,
            SET_ENVELOPE_REPORT_ID => OutputReport::SetEnvelope {
                effect_block_index: r.read_u8()?,
                envelope: Envelope {
                    attack_level: r.read_u16_le()?,
                    fade_level: r.read_u16_le()?,
                    attack_time_ms: r.read_u16_le()?,
                    fade_time_ms: r.read_u16_le()?,
                },
            },
            SET_CONDITION_REPORT_ID => OutputReport::SetCondition {
                effect_block_index: r.read_u8()?,
                parameter_block_offset: r.read_u8()? & 0x0F,
                condition: Condition {
                    cp_offset: r.read_i16_le()?,
                    positive_coefficient: r.read_i16_le()?,
                    negative_coefficient: r.read_i16_le()?,
                    positive_saturation: r.read_u16_le()?,
                    negative_saturation: r.read_u16_le()?,
                    dead_band: r.read_u16_le()?,
                },
            },
            SET_PERIODIC_REPORT_ID => OutputReport::SetPeriodic {
                effect_block_index: r.read_u8()?,
                periodic: Periodic {
                    magnitude: r.read_u16_le()?,
                    offset: r.read_i16_le()?,
                    phase: r.read_u16_le()?,
                    period_ms: r.read_u16_le()?,
                },
            },
            SET_CONSTANT_FORCE_REPORT_ID => OutputReport::SetConstantForce {
                effect_block_index: r.read_u8()?,
                constant: ConstantForce {
                    magnitude: r.read_i16_le()?,
                },
            },
            SET_RAMP_FORCE_REPORT_ID => OutputReport::SetRampForce {
                effect_block_index: r.read_u8()?,
                ramp: RampForce {
                    start: r.read_i16_le()?,
                    end: r.read_i16_le()?,
                },
            },
            EFFECT_OPERATION_REPORT_ID => {
                let effect_block_index = r.read_u8()?;
                let raw = r.read_u8()?;
                let operation = EffectOperation::from_wire(raw).ok_or(
                    ProtocolError::InvalidValue {
                        field: "effect operation",
                        value: raw,
                    },
                )?;
                OutputReport::EffectOperation {
                    effect_block_index,
                    operation,
                    loop_count: r.read_u8()?,
                }
            }
            BLOCK_FREE_REPORT_ID => OutputReport::BlockFree {
                effect_block_index: r.read_u8()?,
            },
            DEVICE_CONTROL_REPORT_ID => {
                let raw = r.read_u8()?;
                let control = DeviceControl::from_wire(raw).ok_or(ProtocolError::InvalidValue {
                    field: "device control",
                    value: raw,
                })?;
                OutputReport::DeviceControl { control }
            }
            DEVICE_GAIN_REPORT_ID => OutputReport::DeviceGain {
                gain: r.read_u8()?,
            },
            _ => OutputReport::Ignored { report_id },
        };
        Ok(report)
    }

    /// Effect block index for per-effect reports.
    pub fn effect_block_index(&self) -> Option<u8> {
        match *self {
            OutputReport::SetEffect {
                effect_block_index, ..
            }
            | OutputReport::SetEnvelope {
                effect_block_index, ..
            }
            | OutputReport::SetCondition {
                effect_block_index, ..
            }
            | OutputReport::SetPeriodic {
                effect_block_index, ..
            }
            | OutputReport::SetConstantForce {
                effect_block_index, ..
            }
            | OutputReport::SetRampForce {
                effect_block_index, ..
            }
            | OutputReport::EffectOperation {
                effect_block_index, ..
            }
            | OutputReport::BlockFree { effect_block_index } => Some(effect_block_index),
            OutputReport::DeviceControl { .. }
            | OutputReport::DeviceGain { .. }
            | OutputReport::Ignored { .. } => None,
        }
    }
}

fn decode_set_effect(r: &mut ReportReader<'_>) -> ProtocolResult<OutputReport> {
    let effect_block_index = r.read_u8()?;
    let block = EffectBlock {
        effect_type: EffectType::from_tag(r.read_u8()?),
        duration: EffectDuration::from_wire(r.read_u16_le()?),
        trigger_repeat_interval_ms: r.read_u16_le()?,
        sample_period_ms: r.read_u16_le()?,
        gain: r.read_u8()?,
        trigger_button: trigger_button_from_wire(r.read_u8()?),
        enable_axis: AxisEnable(r.read_u8()?),
        direction: [r.read_u16_le()?, r.read_u16_le()?],
        start_delay_ms: r.read_u16_le()?,
    };
    Ok(OutputReport::SetEffect {
        effect_block_index,
        block,
    })
}

/// Create New Effect feature report (host to device).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreateNewEffect {
    pub effect_type: EffectType,
    pub byte_count: u16,
}

impl CreateNewEffect {
    /// # Errors
    ///
    /// Wrong report id or a short buffer.
    pub fn decode(data: &[u8]) -> ProtocolResult<Self> {
        let report_id = *data.first().ok_or(ProtocolError::Empty)?;
        if report_id != CREATE_NEW_EFFECT_REPORT_ID {
            return Err(ProtocolError::UnknownReportId(report_id));
        }
        let mut r = ReportReader::new(data, CREATE_NEW_EFFECT_REPORT_LEN)?;
        Ok(Self {
            effect_type: EffectType::from_tag(r.read_u8()?),
            byte_count: r.read_u16_le()?,
        })
    }
}
