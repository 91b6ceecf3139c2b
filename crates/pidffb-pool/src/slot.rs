//! Effect slots and their identifiers

use serde::{Deserialize, Serialize};

use pidffb_core::{
    DirectionVector, EffectBlock, EffectDuration, EffectParameters, EffectType, Envelope,
    LOOP_COUNT_INFINITE, MAX_EFFECTS,
};

/// 1-based effect block index, always within the pool.
///
/// ```
/// use pidffb_pool::EffectId;
///
/// assert!(EffectId::new(0).is_none());
/// assert_eq!(EffectId::new(1).map(|id| id.index()), Some(0));
/// assert!(EffectId::new(15).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(u8);

impl EffectId {
    pub fn new(raw: u8) -> Option<Self> {
        (1..=MAX_EFFECTS).contains(&usize::from(raw)).then_some(Self(raw))
    }

    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index + 1).ok().and_then(Self::new)
    }

    /// Wire value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot index.
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl core::fmt::Display for EffectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Slot lifecycle. `Playing` is a refinement of `Allocated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    #[default]
    Free,
    Allocated,
    Playing,
}

impl SlotState {
    pub fn is_allocated(self) -> bool {
        !matches!(self, SlotState::Free)
    }
}

/// Timeline state of one run, owned by the slot and advanced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Playback {
    /// Clock time the effect's timeline began (or will begin).
    pub start_time_ms: u64,
    /// Trigger button seen pressed on the previous evaluation.
    pub trigger_latched: bool,
    /// Loop count of the Effect Operation that started this run.
    pub loop_count: u8,
}

impl Playback {
    /// Milliseconds since the timeline began, 0 before it has.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_time_ms)
    }
}

/// One pool entry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectSlot {
    pub(crate) state: SlotState,
    pub(crate) block: EffectBlock,
    pub(crate) parameters: EffectParameters,
    pub(crate) envelope: Option<Envelope>,
    pub(crate) direction: DirectionVector,
    pub(crate) playback: Playback,
}

impl EffectSlot {
    /// Zeroed slot with the type requested at allocation.
    pub(crate) fn allocated(effect_type: EffectType) -> Self {
        let mut slot = Self {
            state: SlotState::Allocated,
            ..Self::default()
        };
        slot.block.effect_type = effect_type;
        slot
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SlotState::Playing
    }

    pub fn block(&self) -> &EffectBlock {
        &self.block
    }

    pub fn effect_type(&self) -> EffectType {
        self.block.effect_type
    }

    pub fn parameters(&self) -> &EffectParameters {
        &self.parameters
    }

    /// Envelope, present only once one was configured.
    pub fn envelope(&self) -> Option<&Envelope> {
        self.envelope.as_ref()
    }

    pub fn direction(&self) -> &DirectionVector {
        &self.direction
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    /// Duration of the current run: the configured duration times the loop
    /// count, infinite for `0xFF`. A loop count of 0 plays once.
    pub fn run_duration(&self) -> EffectDuration {
        match self.playback.loop_count {
            LOOP_COUNT_INFINITE => EffectDuration::Infinite,
            0 => self.block.duration,
            loops => self.block.duration.repeated(loops),
        }
    }

    pub(crate) fn start(&mut self, now_ms: u64, loop_count: u8) {
        self.state = SlotState::Playing;
        self.playback.loop_count = loop_count;
        if self.block.trigger_button.is_some() {
            self.playback.start_time_ms = 0;
            self.playback.trigger_latched = false;
        } else {
            self.playback.start_time_ms = now_ms.saturating_add(u64::from(self.block.start_delay_ms));
        }
    }

    pub(crate) fn stop(&mut self) {
        if self.state == SlotState::Playing {
            self.state = SlotState::Allocated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pidffb_core::EffectBlock;

    #[test]
    fn test_effect_id_bounds() {
        assert!(EffectId::new(0).is_none());
        assert!(EffectId::new(1).is_some());
        assert!(EffectId::new(14).is_some());
        assert!(EffectId::new(15).is_none());
        assert!(EffectId::new(0xFF).is_none());
        assert_eq!(EffectId::from_index(13).map(EffectId::get), Some(14));
        assert!(EffectId::from_index(14).is_none());
    }

    #[test]
    fn test_start_applies_delay() {
        let mut slot = EffectSlot::allocated(EffectType::Constant);
        slot.block = EffectBlock::new(EffectType::Constant, EffectDuration::Finite(10))
            .with_start_delay(5);
        slot.start(100, 1);
        assert!(slot.is_playing());
        assert_eq!(slot.playback.start_time_ms, 105);
    }

    #[test]
    fn test_start_with_trigger_waits_for_edge() {
        let mut slot = EffectSlot::allocated(EffectType::Constant);
        slot.block = EffectBlock::new(EffectType::Constant, EffectDuration::Finite(10))
            .with_trigger(1, 0)
            .with_start_delay(5);
        slot.playback.trigger_latched = true;
        slot.start(100, 1);
        assert_eq!(slot.playback.start_time_ms, 0);
        assert!(!slot.playback.trigger_latched);
    }

    #[test]
    fn test_stop_keeps_allocation() {
        let mut slot = EffectSlot::allocated(EffectType::Sine);
        slot.start(0, LOOP_COUNT_INFINITE);
        slot.stop();
        assert_eq!(slot.state(), SlotState::Allocated);

        let mut free = EffectSlot::default();
        free.stop();
        assert_eq!(free.state(), SlotState::Free);
    }

    #[test]
    fn test_run_duration_follows_loop_count() {
        let mut slot = EffectSlot::allocated(EffectType::Constant);
        slot.block.duration = EffectDuration::Finite(10);
        slot.start(0, 3);
        assert_eq!(slot.run_duration(), EffectDuration::Finite(30));
        slot.start(0, 0);
        assert_eq!(slot.run_duration(), EffectDuration::Finite(10));
        slot.start(0, LOOP_COUNT_INFINITE);
        assert_eq!(slot.run_duration(), EffectDuration::Infinite);

        // Later Set Effect reports still apply to a running effect
        slot.start(0, 2);
        slot.block.duration = EffectDuration::Finite(7);
        assert_eq!(slot.run_duration(), EffectDuration::Finite(14));
    }

    #[test]
    fn test_elapsed_before_start_is_zero() {
        let playback = Playback {
            start_time_ms: 50,
            ..Playback::default()
        };
        assert_eq!(playback.elapsed_ms(40), 0);
        assert_eq!(playback.elapsed_ms(55), 5);
    }
}
