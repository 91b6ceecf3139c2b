//! Effect descriptors: type tags, common block, and per-type parameter records

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::direction::DirectionVector;

/// Types of force feedback effects
///
/// # Examples
///
/// ```
/// use pidffb_core::EffectType;
///
/// assert_eq!(EffectType::from_tag(0x04), EffectType::Sine);
/// assert_eq!(EffectType::Sine.tag(), 0x04);
///
/// // Unknown tags never alias a real effect
/// assert_eq!(EffectType::from_tag(0x7F), EffectType::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    #[default]
    None,
    Constant,
    Ramp,
    Square,
    Sine,
    Triangle,
    SawtoothDown,
    SawtoothUp,
    Spring,
    Damper,
    Inertia,
    Friction,
    Custom,
}

/// How an effect's force is produced and composed onto the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectClass {
    /// Time-driven scalar (constant, ramp, periodic), shaped by the envelope
    /// and split along the direction vector.
    Waveform,
    /// Telemetry-driven per-axis force (spring, damper, inertia, friction).
    Condition,
    /// Accepted by the protocol, renders nothing.
    Unsupported,
}

/// Periodic waveform shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Square,
    Sine,
    Triangle,
    SawtoothUp,
    SawtoothDown,
}

/// Telemetry metric a condition effect reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Position,
    Velocity,
    Acceleration,
}

impl EffectType {
    /// Decodes a wire tag. Unknown tags map to [`EffectType::None`].
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            EFFECT_TAG_CONSTANT => EffectType::Constant,
            EFFECT_TAG_RAMP => EffectType::Ramp,
            EFFECT_TAG_SQUARE => EffectType::Square,
            EFFECT_TAG_SINE => EffectType::Sine,
            EFFECT_TAG_TRIANGLE => EffectType::Triangle,
            EFFECT_TAG_SAWTOOTH_DOWN => EffectType::SawtoothDown,
            EFFECT_TAG_SAWTOOTH_UP => EffectType::SawtoothUp,
            EFFECT_TAG_SPRING => EffectType::Spring,
            EFFECT_TAG_DAMPER => EffectType::Damper,
            EFFECT_TAG_INERTIA => EffectType::Inertia,
            EFFECT_TAG_FRICTION => EffectType::Friction,
            EFFECT_TAG_CUSTOM => EffectType::Custom,
            _ => EffectType::None,
        }
    }

    /// Wire tag for this type (0 for [`EffectType::None`]).
    pub fn tag(self) -> u8 {
        match self {
            EffectType::None => 0,
            EffectType::Constant => EFFECT_TAG_CONSTANT,
            EffectType::Ramp => EFFECT_TAG_RAMP,
            EffectType::Square => EFFECT_TAG_SQUARE,
            EffectType::Sine => EFFECT_TAG_SINE,
            EffectType::Triangle => EFFECT_TAG_TRIANGLE,
            EffectType::SawtoothDown => EFFECT_TAG_SAWTOOTH_DOWN,
            EffectType::SawtoothUp => EFFECT_TAG_SAWTOOTH_UP,
            EffectType::Spring => EFFECT_TAG_SPRING,
            EffectType::Damper => EFFECT_TAG_DAMPER,
            EffectType::Inertia => EFFECT_TAG_INERTIA,
            EffectType::Friction => EFFECT_TAG_FRICTION,
            EffectType::Custom => EFFECT_TAG_CUSTOM,
        }
    }

    pub fn class(self) -> EffectClass {
        match self {
            EffectType::Constant
            | EffectType::Ramp
            | EffectType::Square
            | EffectType::Sine
            | EffectType::Triangle
            | EffectType::SawtoothDown
            | EffectType::SawtoothUp => EffectClass::Waveform,
            EffectType::Spring | EffectType::Damper | EffectType::Inertia | EffectType::Friction => {
                EffectClass::Condition
            }
            EffectType::None | EffectType::Custom => EffectClass::Unsupported,
        }
    }

    /// Periodic shape, if this is a periodic effect.
    pub fn waveform(self) -> Option<Waveform> {
        match self {
            EffectType::Square => Some(Waveform::Square),
            EffectType::Sine => Some(Waveform::Sine),
            EffectType::Triangle => Some(Waveform::Triangle),
            EffectType::SawtoothUp => Some(Waveform::SawtoothUp),
            EffectType::SawtoothDown => Some(Waveform::SawtoothDown),
            _ => None,
        }
    }

    /// Telemetry metric consumed by condition effects.
    ///
    /// Spring reacts to position, damper and friction to velocity, inertia
    /// to acceleration.
    pub fn metric(self) -> Option<Metric> {
        match self {
            EffectType::Spring => Some(Metric::Position),
            EffectType::Damper | EffectType::Friction => Some(Metric::Velocity),
            EffectType::Inertia => Some(Metric::Acceleration),
            _ => None,
        }
    }
}

/// Effect lifetime in milliseconds.
///
/// # Examples
///
/// ```
/// use pidffb_core::{EffectDuration, DURATION_INFINITE};
///
/// assert_eq!(EffectDuration::from_wire(DURATION_INFINITE), EffectDuration::Infinite);
/// assert_eq!(EffectDuration::from_wire(250), EffectDuration::Finite(250));
///
/// // Loop counts stretch finite durations without wrapping
/// assert_eq!(EffectDuration::Finite(60_000).repeated(200), EffectDuration::Finite(12_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectDuration {
    Finite(u32),
    Infinite,
}

impl Default for EffectDuration {
    fn default() -> Self {
        EffectDuration::Finite(0)
    }
}

impl EffectDuration {
    pub fn from_wire(raw: u16) -> Self {
        if raw == DURATION_INFINITE {
            EffectDuration::Infinite
        } else {
            EffectDuration::Finite(u32::from(raw))
        }
    }

    /// Duration multiplied by a loop count.
    pub fn repeated(self, loops: u8) -> Self {
        match self {
            EffectDuration::Finite(ms) => EffectDuration::Finite(ms.saturating_mul(u32::from(loops))),
            EffectDuration::Infinite => EffectDuration::Infinite,
        }
    }

    /// Finite length in milliseconds, `None` when infinite.
    pub fn finite_ms(self) -> Option<u32> {
        match self {
            EffectDuration::Finite(ms) => Some(ms),
            EffectDuration::Infinite => None,
        }
    }

    /// Whether `elapsed_ms` still lies inside the playback window.
    pub fn covers(self, elapsed_ms: u64) -> bool {
        match self {
            EffectDuration::Finite(ms) => elapsed_ms < u64::from(ms),
            EffectDuration::Infinite => true,
        }
    }
}

/// Axis-enable mask from the Set Effect report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisEnable(pub u8);

impl AxisEnable {
    /// Single direction angle drives every axis.
    pub fn direction_mode(self) -> bool {
        self.0 & DIRECTION_ENABLE != 0
    }

    pub fn axis(self, index: usize) -> bool {
        index < NUM_AXES && (self.0 >> index) & 0x01 != 0
    }
}

/// Common effect parameters (Set Effect report)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectBlock {
    pub effect_type: EffectType,
    pub duration: EffectDuration,
    pub trigger_repeat_interval_ms: u16,
    pub sample_period_ms: u16,
    pub gain: u8,
    /// 1-based trigger button, `None` when the effect is not button driven.
    pub trigger_button: Option<u8>,
    pub enable_axis: AxisEnable,
    /// Direction angles in `0..=MAX_PHASE`, X first.
    pub direction: [u16; NUM_AXES],
    pub start_delay_ms: u16,
}

impl EffectBlock {
    pub fn new(effect_type: EffectType, duration: EffectDuration) -> Self {
        Self {
            effect_type,
            duration,
            gain: MAX_GAIN,
            enable_axis: AxisEnable(X_AXIS_ENABLE),
            ..Self::default()
        }
    }

    pub fn with_gain(mut self, gain: u8) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_axes(mut self, enable_axis: u8) -> Self {
        self.enable_axis = AxisEnable(enable_axis);
        self
    }

    pub fn with_direction(mut self, x: u16, y: u16) -> Self {
        self.direction = [x, y];
        self
    }

    pub fn with_start_delay(mut self, delay_ms: u16) -> Self {
        self.start_delay_ms = delay_ms;
        self
    }

    pub fn with_trigger(mut self, button: u8, repeat_interval_ms: u16) -> Self {
        self.trigger_button = trigger_button_from_wire(button);
        self.trigger_repeat_interval_ms = repeat_interval_ms;
        self
    }

    /// Unit vector for the configured direction(s) and enable mode.
    pub fn direction_vector(&self) -> DirectionVector {
        DirectionVector::from_block(self.enable_axis, self.direction)
    }
}

/// Decodes the wire trigger button: `0xFF` and `0` mean "none".
pub fn trigger_button_from_wire(raw: u8) -> Option<u8> {
    match raw {
        0 | NO_TRIGGER_BUTTON => None,
        button => Some(button),
    }
}

/// Constant force parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstantForce {
    pub magnitude: i16,
}

/// Ramp force parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RampForce {
    pub start: i16,
    pub end: i16,
}

/// Periodic force parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Periodic {
    pub magnitude: u16,
    pub offset: i16,
    /// Phase in `0..=MAX_PHASE`.
    pub phase: u16,
    pub period_ms: u16,
}

/// One axis of a condition effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Condition {
    pub cp_offset: i16,
    pub positive_coefficient: i16,
    pub negative_coefficient: i16,
    pub positive_saturation: u16,
    pub negative_saturation: u16,
    pub dead_band: u16,
}

/// Attack/fade shaping for waveform effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Envelope {
    pub attack_level: u16,
    pub fade_level: u16,
    pub attack_time_ms: u16,
    pub fade_time_ms: u16,
}

/// Per-axis condition records plus the number of axes the host configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConditionBlocks {
    pub axes: [Condition; NUM_AXES],
    /// One past the highest parameter block offset written.
    pub configured: u8,
}

impl ConditionBlocks {
    /// Stores `condition` at `offset`; offsets outside the axis range are
    /// rejected and return `false`.
    pub fn set(&mut self, offset: usize, condition: Condition) -> bool {
        let Some(slot) = self.axes.get_mut(offset) else {
            return false;
        };
        *slot = condition;
        // offset < NUM_AXES, fits in u8
        let count = (offset + 1) as u8;
        self.configured = self.configured.max(count);
        true
    }

    pub fn get(&self, offset: usize) -> Option<&Condition> {
        self.axes.get(offset)
    }
}

/// Type-specific parameter block of an effect slot.
///
/// A slot holds exactly one variant; writes of one kind replace any other.
/// Readers ask for the variant matching the slot's type tag and get `None`
/// on a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectParameters {
    #[default]
    Unset,
    Constant(ConstantForce),
    Ramp(RampForce),
    Periodic(Periodic),
    Condition(ConditionBlocks),
}

impl EffectParameters {
    pub fn constant(&self) -> Option<&ConstantForce> {
        match self {
            EffectParameters::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn ramp(&self) -> Option<&RampForce> {
        match self {
            EffectParameters::Ramp(r) => Some(r),
            _ => None,
        }
    }

    pub fn periodic(&self) -> Option<&Periodic> {
        match self {
            EffectParameters::Periodic(p) => Some(p),
            _ => None,
        }
    }

    pub fn condition(&self) -> Option<&ConditionBlocks> {
        match self {
            EffectParameters::Condition(c) => Some(c),
            _ => None,
        }
    }

    /// Writes one condition block, switching the variant to conditions if
    /// the slot held something else. Returns `false` for an out-of-range
    /// offset, leaving the parameters untouched.
    pub fn set_condition(&mut self, offset: usize, condition: Condition) -> bool {
        let mut blocks = self.condition().copied().unwrap_or_default();
        if !blocks.set(offset, condition) {
            return false;
        }
        *self = EffectParameters::Condition(blocks);
        true
    }
}
