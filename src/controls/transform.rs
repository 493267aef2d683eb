//! Orbit deltas: rotate, dolly and pan.
//!
//! These only accumulate into [`Deltas`]; the integrator in `update`
//! consumes them. Orthographic dolly is the exception: it writes the
//! camera zoom directly and flags the change.

use std::rc::Rc;

use glam::{Quat, Vec3};

use super::OrbitControls;
use crate::camera::Projection;
use crate::error::OrbitError;

/// Pending orbit changes, written by input handlers and consumed by
/// [`OrbitControls::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deltas {
    /// Pending azimuth change in radians.
    pub theta: f32,
    /// Pending polar change in radians.
    pub phi: f32,
    /// Pending target translation in world units.
    pub pan_offset: Vec3,
    /// Multiplicative radius factor, reset to `1.0` every tick.
    pub scale: f32,
    /// Set when an orthographic zoom changed since the last tick.
    pub zoom_changed: bool,
}

impl Default for Deltas {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            zoom_changed: false,
        }
    }
}

impl Deltas {
    /// Shrink angular and pan deltas by `damping_factor`.
    pub fn decay(&mut self, damping_factor: f32) {
        let keep = 1.0 - damping_factor;
        self.theta *= keep;
        self.phi *= keep;
        self.pan_offset *= keep;
    }

    /// Drop angular and pan deltas.
    pub fn clear_motion(&mut self) {
        self.theta = 0.0;
        self.phi = 0.0;
        self.pan_offset = Vec3::ZERO;
    }
}

impl OrbitControls {
    /// Orbit around the up axis. Positive angles move the camera to the
    /// right of the target (azimuth decreases).
    pub fn rotate_left(&mut self, angle: f32) {
        if self.disposed || !angle.is_finite() {
            return;
        }
        self.deltas.theta -= angle;
    }

    /// Orbit over the target. Positive angles raise the camera toward the
    /// upper pole (polar angle decreases).
    pub fn rotate_up(&mut self, angle: f32) {
        if self.disposed || !angle.is_finite() {
            return;
        }
        self.deltas.phi -= angle;
    }

    /// Move toward the target by `scale` (in `(0, 1]`, e.g. `0.95`).
    ///
    /// Perspective cameras shrink the pending radius factor; orthographic
    /// cameras raise their zoom (clamped) immediately. Does nothing while
    /// zoom is disabled.
    ///
    /// # Errors
    ///
    /// [`OrbitError::UnsupportedProjection`] for an unknown projection, in
    /// which case zoom is disabled. [`OrbitError::CameraBorrowed`] or
    /// [`OrbitError::Disposed`] when the camera cannot be touched.
    pub fn dolly_in(&mut self, scale: f32) -> Result<(), OrbitError> {
        self.apply_dolly(scale)
    }

    /// Move away from the target by `1 / scale`. See
    /// [`dolly_in`](Self::dolly_in).
    ///
    /// # Errors
    ///
    /// As for [`dolly_in`](Self::dolly_in).
    pub fn dolly_out(&mut self, scale: f32) -> Result<(), OrbitError> {
        self.apply_dolly(scale.recip())
    }

    /// Multiply the orbit radius by `factor` (orthographic: divide zoom).
    fn apply_dolly(&mut self, factor: f32) -> Result<(), OrbitError> {
        if self.disposed {
            return Err(OrbitError::Disposed);
        }
        if !self.options.interaction.enable_zoom
            || !factor.is_finite()
            || factor <= 0.0
        {
            return Ok(());
        }
        let camera = Rc::clone(&self.camera);
        let Ok(mut cam) = camera.try_borrow_mut() else {
            log::warn!("camera handle is borrowed, dolly skipped");
            return Err(OrbitError::CameraBorrowed);
        };
        match cam.projection() {
            Projection::Perspective { .. } => {
                self.deltas.scale *= factor;
                Ok(())
            }
            Projection::Orthographic { zoom, .. } => {
                cam.set_zoom(self.options.limits.clamp_zoom(zoom / factor));
                cam.refresh_projection();
                self.deltas.zoom_changed = true;
                Ok(())
            }
            Projection::Other => {
                log::warn!("unknown camera projection, dolly/zoom disabled");
                self.options.interaction.enable_zoom = false;
                Err(OrbitError::UnsupportedProjection { operation: "dolly" })
            }
        }
    }

    /// Pan the target by a screen-space drag of `(delta_x, delta_y)`
    /// pixels.
    ///
    /// With `screen_space` the vertical component follows the camera's
    /// local up axis; otherwise it moves across the ground plane. A
    /// degenerate viewport makes this a no-op.
    ///
    /// # Errors
    ///
    /// [`OrbitError::UnsupportedProjection`] for an unknown projection, in
    /// which case panning is disabled. [`OrbitError::CameraBorrowed`] or
    /// [`OrbitError::Disposed`] when the camera cannot be read.
    pub fn pan(
        &mut self,
        delta_x: f32,
        delta_y: f32,
        screen_space: bool,
    ) -> Result<(), OrbitError> {
        if self.disposed {
            return Err(OrbitError::Disposed);
        }
        if !self.options.interaction.enable_pan
            || !delta_x.is_finite()
            || !delta_y.is_finite()
        {
            return Ok(());
        }
        let Some(viewport) = self.viewport_size() else {
            return Ok(());
        };
        let camera = Rc::clone(&self.camera);
        let Ok(cam) = camera.try_borrow() else {
            log::warn!("camera handle is borrowed, pan skipped");
            return Err(OrbitError::CameraBorrowed);
        };

        let (horizontal, vertical) = match cam.projection() {
            Projection::Perspective { fovy } => {
                if viewport.y <= 0.0 {
                    return Ok(());
                }
                let offset = cam.position() - self.target;
                let target_distance =
                    offset.length() * (fovy.to_radians() * 0.5).tan();
                (
                    2.0 * delta_x * target_distance / viewport.y,
                    2.0 * delta_y * target_distance / viewport.y,
                )
            }
            Projection::Orthographic {
                left,
                right,
                top,
                bottom,
                zoom,
            } => {
                if viewport.x <= 0.0 || viewport.y <= 0.0 || zoom <= 0.0 {
                    return Ok(());
                }
                (
                    delta_x * (right - left) / zoom / viewport.x,
                    delta_y * (top - bottom) / zoom / viewport.y,
                )
            }
            Projection::Other => {
                log::warn!("unknown camera projection, pan disabled");
                self.options.interaction.enable_pan = false;
                return Err(OrbitError::UnsupportedProjection {
                    operation: "pan",
                });
            }
        };
        let orientation = cam.orientation();
        let up = cam.up();
        drop(cam);

        self.pan_left(horizontal, orientation);
        self.pan_up(vertical, orientation, up, screen_space);
        Ok(())
    }

    fn pan_left(&mut self, distance: f32, orientation: Quat) {
        self.deltas.pan_offset -= orientation * Vec3::X * distance;
    }

    fn pan_up(
        &mut self,
        distance: f32,
        orientation: Quat,
        up: Vec3,
        screen_space: bool,
    ) {
        let axis = if screen_space {
            orientation * Vec3::Y
        } else {
            up.cross(orientation * Vec3::X)
        };
        self.deltas.pan_offset += axis * distance;
    }
}
