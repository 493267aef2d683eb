use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::input::Capabilities;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
/// Which gestures are accepted and how strongly they move the camera.
pub struct InteractionOptions {
    /// Allow orbiting around the target.
    #[schemars(title = "Rotate")]
    pub enable_rotate: bool,
    /// Rotation sensitivity multiplier.
    #[schemars(
        title = "Rotate Speed",
        range(min = 0.05, max = 3.0),
        extend("step" = 0.05)
    )]
    pub rotate_speed: f32,
    /// Allow dolly/zoom.
    #[schemars(title = "Zoom")]
    pub enable_zoom: bool,
    /// Exponent applied to the base zoom step of 0.95.
    #[schemars(
        title = "Zoom Speed",
        range(min = 0.1, max = 5.0),
        extend("step" = 0.1)
    )]
    pub zoom_speed: f32,
    /// Allow panning the target.
    #[schemars(title = "Pan")]
    pub enable_pan: bool,
    /// Pan sensitivity multiplier.
    #[schemars(
        title = "Pan Speed",
        range(min = 0.1, max = 3.0),
        extend("step" = 0.05)
    )]
    pub pan_speed: f32,
    /// Vertical pans follow the camera's local up axis for touch and
    /// keyboard pans. Pointer pans pick this per gesture.
    #[schemars(title = "Screen-Space Panning")]
    pub screen_space_panning: bool,
    /// Allow keyboard control.
    #[schemars(title = "Keys")]
    pub enable_keys: bool,
    /// Radians rotated per key press with ctrl held.
    #[schemars(skip)]
    pub key_rotate_angle: f32,
    /// Pixels panned per key press.
    #[schemars(
        title = "Key Pan Speed",
        range(min = 1.0, max = 20.0),
        extend("step" = 1.0)
    )]
    pub key_pan_speed: f32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            rotate_speed: 0.5,
            enable_zoom: true,
            zoom_speed: 1.0,
            enable_pan: true,
            pan_speed: 1.0,
            screen_space_panning: false,
            enable_keys: true,
            key_rotate_angle: PI / 360.0,
            key_pan_speed: 4.0,
        }
    }
}

impl InteractionOptions {
    /// Enabled gesture families, for classification.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            rotate: self.enable_rotate,
            zoom: self.enable_zoom,
            pan: self.enable_pan,
        }
    }

    /// Radius factor for one dolly step, `0.95^zoom_speed`.
    #[must_use]
    pub fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }
}
