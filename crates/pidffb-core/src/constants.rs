//! PID limits, sentinels and wire identifiers

/// Number of force axes rendered by the actuator (X, Y).
pub const NUM_AXES: usize = 2;

/// Capacity of the effect pool.
pub const MAX_EFFECTS: usize = 14;

/// RAM budget charged for each resident effect.
pub const EFFECT_RAM_COST: u16 = 64;

/// Total RAM budget advertised in the pool feature report.
pub const RAM_POOL_SIZE: u16 = MAX_EFFECTS as u16 * EFFECT_RAM_COST;

/// Memory management flags advertised in the pool feature report
/// (device managed pool, shared parameter blocks).
pub const MEMORY_MANAGEMENT: u8 = 0x03;

/// Full-scale gain (effect gain and device gain).
pub const MAX_GAIN: u8 = 255;

/// Full-scale magnitude; envelope levels are expressed against it.
pub const MAX_MAGNITUDE: i32 = 255;

/// Logical maximum of phase and direction fields, covering one full turn.
pub const MAX_PHASE: u16 = 35999;

/// Direction/phase units per radian.
pub const UNITS_PER_RADIAN: f32 = MAX_PHASE as f32 / core::f32::consts::TAU;

/// Default full-scale axis deflection used to normalise condition metrics.
pub const DEFAULT_AXIS_FULL_SCALE: i32 = 32767;

/// Wire sentinel for an effect that never expires.
pub const DURATION_INFINITE: u16 = 0xFFFF;

/// Wire sentinel for "no trigger button".
pub const NO_TRIGGER_BUTTON: u8 = 0xFF;

/// Block-free index meaning "every effect".
pub const BLOCK_FREE_ALL: u8 = 0xFF;

/// Loop count meaning "repeat forever".
pub const LOOP_COUNT_INFINITE: u8 = 0xFF;

/// Axis-enable bits
pub const X_AXIS_ENABLE: u8 = 0x01;
pub const Y_AXIS_ENABLE: u8 = 0x02;
pub const DIRECTION_ENABLE: u8 = 0x04;

/// Effect type tags as sent in Set Effect / Create New Effect reports.
pub const EFFECT_TAG_CONSTANT: u8 = 0x01;
pub const EFFECT_TAG_RAMP: u8 = 0x02;
pub const EFFECT_TAG_SQUARE: u8 = 0x03;
pub const EFFECT_TAG_SINE: u8 = 0x04;
pub const EFFECT_TAG_TRIANGLE: u8 = 0x05;
pub const EFFECT_TAG_SAWTOOTH_DOWN: u8 = 0x06;
pub const EFFECT_TAG_SAWTOOTH_UP: u8 = 0x07;
pub const EFFECT_TAG_SPRING: u8 = 0x08;
pub const EFFECT_TAG_DAMPER: u8 = 0x09;
pub const EFFECT_TAG_INERTIA: u8 = 0x0A;
pub const EFFECT_TAG_FRICTION: u8 = 0x0B;
pub const EFFECT_TAG_CUSTOM: u8 = 0x0C;
