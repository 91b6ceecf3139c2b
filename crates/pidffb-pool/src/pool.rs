//! Effect pool state machine driven by inbound PID reports

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pidffb_core::{
    Clock, Condition, ConstantForce, EFFECT_RAM_COST, EffectBlock, EffectParameters, EffectType,
    Envelope, MAX_EFFECTS, MAX_GAIN, Periodic, RAM_POOL_SIZE, RampForce,
};

use crate::reports::{BlockLoadReport, BlockLoadStatus, PidStateReport, PidStatus, PoolReport};
use crate::slot::{EffectId, EffectSlot, SlotState};

/// Effect Operation report operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectOperation {
    Start,
    StartSolo,
    Stop,
}

impl EffectOperation {
    pub fn from_wire(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(EffectOperation::Start),
            2 => Some(EffectOperation::StartSolo),
            3 => Some(EffectOperation::Stop),
            _ => None,
        }
    }
}

/// Device Control report command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceControl {
    EnableActuators,
    DisableActuators,
    StopAllEffects,
    Reset,
    Pause,
    Continue,
}

impl DeviceControl {
    pub fn from_wire(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(DeviceControl::EnableActuators),
            2 => Some(DeviceControl::DisableActuators),
            3 => Some(DeviceControl::StopAllEffects),
            4 => Some(DeviceControl::Reset),
            5 => Some(DeviceControl::Pause),
            6 => Some(DeviceControl::Continue),
            _ => None,
        }
    }
}

/// Block Free report target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockFree {
    All,
    Effect(EffectId),
}

/// Fixed-capacity pool of effect slots plus device-level state.
///
/// The pool is the only writer of effect configuration. The force engine
/// reads slots each tick and only advances their [`Playback`](crate::Playback).
///
/// # Examples
///
/// ```
/// use pidffb_core::{ConstantForce, EffectBlock, EffectDuration, EffectType};
/// use pidffb_pool::{EffectOperation, EffectPool, SlotState};
///
/// let mut pool = EffectPool::new(|| 0_u64);
/// let id = pool.create_effect(EffectType::Constant).ok_or("pool full")?;
/// pool.set_effect_common(id, EffectBlock::new(EffectType::Constant, EffectDuration::Infinite));
/// pool.set_constant_force(id, ConstantForce { magnitude: 100 });
/// pool.effect_operation(id, EffectOperation::Start, 1);
///
/// assert_eq!(pool.state(id), SlotState::Playing);
/// assert_eq!(pool.ram_pool_available(), 896 - 64);
/// # Ok::<(), &str>(())
/// ```
#[derive(Debug)]
pub struct EffectPool<C> {
    clock: C,
    slots: [EffectSlot; MAX_EFFECTS],
    ram_pool_available: u16,
    device_paused: bool,
    pause_time_ms: Option<u64>,
    device_gain: u8,
    status: PidStatus,
    effect_block_index: u8,
    block_load: BlockLoadReport,
}

impl<C: Clock> EffectPool<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            slots: [EffectSlot::default(); MAX_EFFECTS],
            ram_pool_available: RAM_POOL_SIZE,
            device_paused: false,
            pause_time_ms: None,
            device_gain: MAX_GAIN,
            status: PidStatus::default(),
            effect_block_index: 0,
            block_load: BlockLoadReport::default(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Allocates the first free slot for an effect of `effect_type`.
    ///
    /// The slot is zeroed before use. Returns `None` when every slot is taken;
    /// the outcome is also recorded for the block load report.
    pub fn create_effect(&mut self, effect_type: EffectType) -> Option<EffectId> {
        let free = self
            .slots
            .iter()
            .position(|slot| slot.state == SlotState::Free)
            .and_then(EffectId::from_index);

        let Some(id) = free else {
            warn!(?effect_type, "effect pool full");
            self.block_load = BlockLoadReport {
                effect_block_index: 0,
                status: BlockLoadStatus::Full,
                ram_pool_available: self.ram_pool_available,
            };
            return None;
        };

        let Some(slot) = self.slots.get_mut(id.index()) else {
            return None;
        };
        *slot = EffectSlot::allocated(effect_type);
        self.ram_pool_available = self.ram_pool_available.saturating_sub(EFFECT_RAM_COST);
        self.block_load = BlockLoadReport {
            effect_block_index: id.get(),
            status: BlockLoadStatus::Success,
            ram_pool_available: self.ram_pool_available,
        };
        debug!(%id, ?effect_type, ram = self.ram_pool_available, "effect created");
        Some(id)
    }

    /// Replaces the common block and recomputes the direction vector.
    pub fn set_effect_common(&mut self, id: EffectId, block: EffectBlock) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.block = block;
        slot.direction = block.direction_vector();
        debug!(%id, effect_type = ?block.effect_type, "set effect");
    }

    pub fn set_envelope(&mut self, id: EffectId, envelope: Envelope) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.envelope = Some(envelope);
        debug!(%id, "set envelope");
    }

    /// Writes the condition record for one axis.
    ///
    /// Offsets beyond the axis count are dropped and reported as `false`.
    pub fn set_condition(&mut self, id: EffectId, axis_offset: u8, condition: Condition) -> bool {
        let accepted = self
            .slot_mut(id)
            .is_some_and(|slot| slot.parameters.set_condition(usize::from(axis_offset), condition));
        if accepted {
            debug!(%id, axis_offset, "set condition");
        } else {
            warn!(%id, axis_offset, "condition axis offset out of range");
        }
        accepted
    }

    pub fn set_periodic(&mut self, id: EffectId, periodic: Periodic) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.parameters = EffectParameters::Periodic(periodic);
        debug!(%id, "set periodic");
    }

    pub fn set_constant_force(&mut self, id: EffectId, constant: ConstantForce) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.parameters = EffectParameters::Constant(constant);
        debug!(%id, "set constant force");
    }

    pub fn set_ramp_force(&mut self, id: EffectId, ramp: RampForce) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.parameters = EffectParameters::Ramp(ramp);
        debug!(%id, "set ramp force");
    }

    /// Starts, solo-starts or stops an effect.
    ///
    /// A non-zero loop count multiplies the configured duration for this run,
    /// `0xFF` makes it infinite; the configured duration itself is kept.
    /// Free slots cannot be started.
    pub fn effect_operation(&mut self, id: EffectId, operation: EffectOperation, loop_count: u8) {
        self.effect_block_index = id.get();

        if operation == EffectOperation::Stop {
            if let Some(slot) = self.slot_mut(id) {
                slot.stop();
            }
            debug!(%id, "effect stopped");
            return;
        }

        if self.state(id) == SlotState::Free {
            warn!(%id, ?operation, "start on a free effect slot ignored");
            return;
        }

        if operation == EffectOperation::StartSolo {
            self.stop_all_effects();
        }

        let now = self.now_ms();
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.start(now, loop_count);
        debug!(%id, ?operation, loop_count, start = slot.playback.start_time_ms, "effect started");
    }

    pub fn block_free(&mut self, target: BlockFree) {
        match target {
            BlockFree::All => self.free_all_effects(),
            BlockFree::Effect(id) => self.free_effect(id),
        }
    }

    /// Returns one slot to the pool. Freeing a free slot does nothing.
    pub fn free_effect(&mut self, id: EffectId) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        if slot.state == SlotState::Free {
            return;
        }
        *slot = EffectSlot::default();
        self.ram_pool_available = self
            .ram_pool_available
            .saturating_add(EFFECT_RAM_COST)
            .min(RAM_POOL_SIZE);
        debug!(%id, ram = self.ram_pool_available, "effect freed");
    }

    pub fn free_all_effects(&mut self) {
        self.slots = [EffectSlot::default(); MAX_EFFECTS];
        self.ram_pool_available = RAM_POOL_SIZE;
        debug!("all effects freed");
    }

    /// Demotes every playing effect to allocated.
    pub fn stop_all_effects(&mut self) {
        self.slots.iter_mut().for_each(EffectSlot::stop);
    }

    pub fn device_control(&mut self, control: DeviceControl) {
        match control {
            DeviceControl::EnableActuators => {
                self.status.set(PidStatus::ACTUATORS_ENABLED, true);
                info!("actuators enabled");
            }
            DeviceControl::DisableActuators => {
                self.status.set(PidStatus::ACTUATORS_ENABLED, false);
                info!("actuators disabled");
            }
            DeviceControl::StopAllEffects => {
                self.stop_all_effects();
                info!("all effects stopped");
            }
            DeviceControl::Reset => {
                self.free_all_effects();
                info!("device reset");
            }
            DeviceControl::Pause => self.pause(),
            DeviceControl::Continue => self.resume(),
        }
    }

    fn pause(&mut self) {
        let now = self.now_ms();
        self.device_paused = true;
        self.status.set(PidStatus::DEVICE_PAUSED, true);
        // a second pause keeps the original pause point
        if self.pause_time_ms.is_none() {
            self.pause_time_ms = Some(now);
        }
        info!(at = now, "device paused");
    }

    /// Shifts effects that began before the pause by the pause length, so
    /// their phase continues where it stopped.
    fn resume(&mut self) {
        self.device_paused = false;
        self.status.set(PidStatus::DEVICE_PAUSED, false);

        let Some(paused_at) = self.pause_time_ms.take() else {
            info!("continue without pause");
            return;
        };

        let pause_length = self.now_ms().saturating_sub(paused_at);
        for slot in self.slots.iter_mut().filter(|s| s.is_playing()) {
            if slot.playback.start_time_ms <= paused_at {
                slot.playback.start_time_ms = slot.playback.start_time_ms.saturating_add(pause_length);
            }
        }
        info!(pause_length, "device continued");
    }

    pub fn set_device_gain(&mut self, gain: u8) {
        self.device_gain = gain;
        debug!(gain, "device gain");
    }

    /// Answers the host's pool feature request. The host sends it while
    /// initialising, so every effect is freed first.
    pub fn pool_report(&mut self) -> PoolReport {
        self.free_all_effects();
        PoolReport::default()
    }

    pub fn block_load_report(&self) -> BlockLoadReport {
        self.block_load
    }

    pub fn pid_state_report(&self) -> PidStateReport {
        PidStateReport {
            status: self.status,
            effect_block_index: self.effect_block_index,
        }
    }

    pub fn device_paused(&self) -> bool {
        self.device_paused
    }

    pub fn device_gain(&self) -> u8 {
        self.device_gain
    }

    pub fn ram_pool_available(&self) -> u16 {
        self.ram_pool_available
    }

    /// Number of slots that are not free.
    pub fn allocated_count(&self) -> usize {
        self.slots.iter().filter(|s| s.state.is_allocated()).count()
    }

    pub fn slot(&self, id: EffectId) -> Option<&EffectSlot> {
        self.slots.get(id.index())
    }

    /// Lifecycle state of one slot.
    pub fn state(&self, id: EffectId) -> SlotState {
        self.slot(id).map_or(SlotState::Free, EffectSlot::state)
    }

    pub fn slots(&self) -> &[EffectSlot; MAX_EFFECTS] {
        &self.slots
    }

    /// Mutable slot view for the force engine. Only playback state is
    /// writable through it.
    pub fn slots_mut(&mut self) -> &mut [EffectSlot; MAX_EFFECTS] {
        &mut self.slots
    }

    fn slot_mut(&mut self, id: EffectId) -> Option<&mut EffectSlot> {
        self.slots.get_mut(id.index())
    }
}
