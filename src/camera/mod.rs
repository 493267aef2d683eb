//! Camera contract the controller drives.
//!
//! The host owns the camera; the controller keeps a shared, non-owning
//! [`SharedCamera`] handle and is its sole mutator while connected.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Quat, Vec3};

/// Reference perspective/orthographic camera.
pub mod core;
/// Spherical coordinates and the fixed up-axis remap.
pub mod spherical;

pub use self::core::{look_rotation, Camera, Lens};
pub use spherical::{OrbitBasis, Spherical};

/// Shared handle to a host-owned camera.
pub type SharedCamera = Rc<RefCell<dyn CameraHandle>>;

/// Projection snapshot reported by a [`CameraHandle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in degrees.
        fovy: f32,
    },
    /// Orthographic projection with a frustum box and zoom factor.
    Orthographic {
        /// Left frustum plane.
        left: f32,
        /// Right frustum plane.
        right: f32,
        /// Top frustum plane.
        top: f32,
        /// Bottom frustum plane.
        bottom: f32,
        /// Zoom factor (frustum is divided by it).
        zoom: f32,
    },
    /// A projection the controller does not know how to pan or dolly.
    Other,
}

impl Projection {
    /// Current zoom factor, `1.0` for non-orthographic projections.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        match self {
            Self::Orthographic { zoom, .. } => *zoom,
            _ => 1.0,
        }
    }
}

/// Everything the controller needs from a camera.
///
/// Orientation follows the usual graphics convention: the camera looks
/// down its local `-Z` axis with `+Y` up.
pub trait CameraHandle {
    /// World-space camera position.
    fn position(&self) -> Vec3;
    /// Move the camera without changing its orientation.
    fn set_position(&mut self, position: Vec3);
    /// World up direction used for look-at and the orbit remap.
    fn up(&self) -> Vec3;
    /// Current world-space orientation.
    fn orientation(&self) -> Quat;
    /// Orient the camera so it faces `target`.
    fn look_at(&mut self, target: Vec3);
    /// Current projection kind and parameters.
    fn projection(&self) -> Projection;
    /// Set the orthographic zoom factor. Ignored by other projections.
    fn set_zoom(&mut self, zoom: f32);
    /// Set the perspective vertical field of view in degrees.
    fn set_fovy(&mut self, fovy: f32);
    /// Recompute the projection after a zoom or fov change.
    fn refresh_projection(&mut self);
}
