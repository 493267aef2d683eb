use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "AR", inline)]
#[serde(default)]
/// Settings applied while the alternate (device-driven) controller owns the
/// camera.
pub struct ArOptions {
    /// Vertical field of view in degrees while in alternate mode.
    #[schemars(
        title = "Field of View",
        range(min = 20.0, max = 120.0),
        extend("step" = 1.0)
    )]
    pub fovy: f32,
    /// Height of the viewer's device above the ground, in scene units
    /// before vertical exaggeration.
    #[schemars(
        title = "Device Height",
        range(min = 0.0, max = 10.0),
        extend("step" = 0.1)
    )]
    pub device_height: f32,
}

impl Default for ArOptions {
    fn default() -> Self {
        Self {
            fovy: 70.0,
            device_height: 1.5,
        }
    }
}
