use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
/// Damping, smoothing, momentum and animation timing.
pub struct MotionOptions {
    /// Decay pending deltas gradually instead of dropping them each tick.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of pending deltas and momentum removed per tick.
    #[schemars(
        title = "Damping Factor",
        range(min = 0.01, max = 0.5),
        extend("step" = 0.01)
    )]
    pub damping_factor: f32,
    /// Interpolate toward the accumulated orbit instead of jumping.
    #[schemars(title = "Smoothing")]
    pub enable_smooth: bool,
    /// Smoothing time constant in seconds.
    #[schemars(
        title = "Smooth Time",
        range(min = 0.01, max = 1.0),
        extend("step" = 0.01)
    )]
    pub smooth_time: f32,
    /// Keep orbiting after a rotate gesture is released.
    #[schemars(title = "Momentum")]
    pub enable_momentum: bool,
    /// Release velocity as a fraction of the last drag delta.
    #[schemars(
        title = "Momentum Scale",
        range(min = 0.0, max = 0.2),
        extend("step" = 0.005)
    )]
    pub momentum_scaling_factor: f32,
    /// Spin around the target while idle.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Auto-rotate rate in units of 2π/3600 radians per second.
    #[schemars(
        title = "Auto Rotate Speed",
        range(min = 0.1, max = 20.0),
        extend("step" = 0.1)
    )]
    pub auto_rotate_speed: f32,
    /// Default duration for programmatic transitions.
    #[schemars(title = "Animation Duration (ms)", range(min = 0, max = 5000))]
    pub animation_duration_ms: u64,
    /// Easing curve for programmatic transitions.
    #[schemars(skip)]
    pub animation_easing: EasingFunction,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            enable_smooth: true,
            smooth_time: 0.2,
            enable_momentum: true,
            momentum_scaling_factor: 0.02,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            animation_duration_ms: 1000,
            animation_easing: EasingFunction::CubicOut,
        }
    }
}

impl MotionOptions {
    /// Azimuth change per second of auto-rotation.
    #[must_use]
    pub fn auto_rotation_angle(&self) -> f32 {
        2.0 * PI / 60.0 / 60.0 * self.auto_rotate_speed
    }

    /// Interpolation weight for one tick of `dt` seconds.
    ///
    /// `1.0` (jump to the accumulated orbit) when smoothing is off or the
    /// time constant is not positive.
    #[must_use]
    pub fn smoothing_weight(&self, dt: f32) -> f32 {
        if !self.enable_smooth || self.smooth_time <= 0.0 {
            return 1.0;
        }
        1.0 - (-dt.max(0.0) / self.smooth_time).exp()
    }
}
