//! Per-axis force post-processing seam

use pidffb_core::EffectType;

/// Adjusts one effect's force on one axis before it joins the sum.
///
/// Called once per axis per contributing effect, after the effect gain and
/// direction have been applied and before the device gain.
///
/// Closures implement this directly:
///
/// ```
/// use pidffb_core::EffectType;
/// use pidffb_engine::{EngineConfig, ForceEngine};
///
/// let engine = ForceEngine::new(EngineConfig::default())
///     .with_hook(|force: f32, _kind: EffectType, _axis: usize| force * 0.5);
/// # let _ = engine;
/// ```
pub trait ForceHook {
    fn adjust(&mut self, force: f32, effect_type: EffectType, axis: usize) -> f32;
}

impl<F> ForceHook for F
where
    F: FnMut(f32, EffectType, usize) -> f32,
{
    fn adjust(&mut self, force: f32, effect_type: EffectType, axis: usize) -> f32 {
        self(force, effect_type, axis)
    }
}

/// Pass-through hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHook;

impl ForceHook for NoHook {
    #[inline]
    fn adjust(&mut self, force: f32, _effect_type: EffectType, _axis: usize) -> f32 {
        force
    }
}
