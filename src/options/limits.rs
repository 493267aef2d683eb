use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Orbit constraints. Each bound may be infinite (unbounded).
///
/// Clamping uses `max` then `min` so an inverted pair never panics; the
/// upper bound wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Limits", inline)]
#[serde(default)]
pub struct Limits {
    /// Closest perspective orbit radius.
    #[schemars(title = "Min Distance")]
    pub min_distance: f32,
    /// Farthest perspective orbit radius.
    #[schemars(title = "Max Distance")]
    pub max_distance: f32,
    /// Smallest orthographic zoom.
    #[schemars(title = "Min Zoom")]
    pub min_zoom: f32,
    /// Largest orthographic zoom.
    #[schemars(title = "Max Zoom")]
    pub max_zoom: f32,
    /// Lowest polar angle in radians (0 looks straight down from above).
    #[schemars(title = "Min Polar Angle", range(min = 0.0, max = 3.1416))]
    pub min_polar_angle: f32,
    /// Highest polar angle in radians.
    #[schemars(title = "Max Polar Angle", range(min = 0.0, max = 3.1416))]
    pub max_polar_angle: f32,
    /// Lowest azimuth in radians.
    #[schemars(skip)]
    pub min_azimuth_angle: f32,
    /// Highest azimuth in radians.
    #[schemars(skip)]
    pub max_azimuth_angle: f32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_zoom: 0.0,
            max_zoom: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_azimuth_angle: f32::NEG_INFINITY,
            max_azimuth_angle: f32::INFINITY,
        }
    }
}

impl Limits {
    /// Clamp an orbit radius.
    #[must_use]
    pub fn clamp_distance(&self, radius: f32) -> f32 {
        radius.max(self.min_distance).min(self.max_distance)
    }

    /// Clamp an orthographic zoom factor.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Clamp a polar angle (pole safety is applied separately).
    #[must_use]
    pub fn clamp_polar(&self, phi: f32) -> f32 {
        phi.max(self.min_polar_angle).min(self.max_polar_angle)
    }

    /// Clamp an azimuth angle.
    #[must_use]
    pub fn clamp_azimuth(&self, theta: f32) -> f32 {
        theta.max(self.min_azimuth_angle).min(self.max_azimuth_angle)
    }
}
