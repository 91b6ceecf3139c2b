//! Values carried by the outbound feature and input reports

use serde::{Deserialize, Serialize};

use pidffb_core::{MAX_EFFECTS, MEMORY_MANAGEMENT, RAM_POOL_SIZE};

/// Outcome of the most recent Create New Effect request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockLoadStatus {
    #[default]
    Success,
    Full,
    Error,
}

impl BlockLoadStatus {
    pub fn to_wire(self) -> u8 {
        match self {
            BlockLoadStatus::Success => 1,
            BlockLoadStatus::Full => 2,
            BlockLoadStatus::Error => 3,
        }
    }
}

/// Block load feature report contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockLoadReport {
    /// Allocated effect id, 0 when nothing was allocated.
    pub effect_block_index: u8,
    pub status: BlockLoadStatus,
    pub ram_pool_available: u16,
}

impl Default for BlockLoadReport {
    fn default() -> Self {
        Self {
            effect_block_index: 0,
            status: BlockLoadStatus::Success,
            ram_pool_available: RAM_POOL_SIZE,
        }
    }
}

/// Pool feature report contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReport {
    pub ram_pool_size: u16,
    pub max_simultaneous_effects: u8,
    pub memory_management: u8,
}

impl Default for PoolReport {
    fn default() -> Self {
        Self {
            ram_pool_size: RAM_POOL_SIZE,
            // MAX_EFFECTS is well below u8::MAX
            max_simultaneous_effects: MAX_EFFECTS as u8,
            memory_management: MEMORY_MANAGEMENT,
        }
    }
}

/// Device status bits of the PID state input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PidStatus(pub u8);

impl PidStatus {
    pub const DEVICE_PAUSED: u8 = 0x01;
    pub const ACTUATORS_ENABLED: u8 = 0x02;
    pub const SAFETY_SWITCH: u8 = 0x04;
    pub const ACTUATOR_OVERRIDE_SWITCH: u8 = 0x08;
    pub const ACTUATOR_POWER: u8 = 0x10;

    pub fn contains(self, bits: u8) -> bool {
        self.0 & bits == bits
    }

    pub(crate) fn set(&mut self, bits: u8, on: bool) {
        if on {
            self.0 |= bits;
        } else {
            self.0 &= !bits;
        }
    }
}

impl Default for PidStatus {
    fn default() -> Self {
        PidStatus(
            Self::ACTUATORS_ENABLED
                | Self::SAFETY_SWITCH
                | Self::ACTUATOR_OVERRIDE_SWITCH
                | Self::ACTUATOR_POWER,
        )
    }
}

/// PID state input report contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PidStateReport {
    pub status: PidStatus,
    /// Id touched by the most recent effect operation.
    pub effect_block_index: u8,
}
