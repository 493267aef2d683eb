use glam::{Mat3, Mat4, Quat, Vec3};

use super::{CameraHandle, Projection};

/// Projection lens of a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lens {
    /// Perspective lens using [`Camera::fovy`] and [`Camera::aspect`].
    Perspective,
    /// Orthographic lens with an explicit frustum box.
    Orthographic {
        /// Left frustum plane.
        left: f32,
        /// Right frustum plane.
        right: f32,
        /// Top frustum plane.
        top: f32,
        /// Bottom frustum plane.
        bottom: f32,
    },
}

/// Camera defined by eye position, orientation and projection parameters.
///
/// Implements [`CameraHandle`] so it can be driven directly by
/// [`OrbitControls`](crate::OrbitControls).
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Projection lens.
    pub lens: Lens,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Zoom factor applied to either lens.
    pub zoom: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    orientation: Quat,
    projection: Mat4,
}

impl Camera {
    /// Perspective camera at `eye` looking down `-Z`.
    #[must_use]
    pub fn perspective(eye: Vec3, aspect: f32, fovy: f32) -> Self {
        let mut camera = Self {
            eye,
            up: Vec3::Y,
            lens: Lens::Perspective,
            aspect,
            fovy,
            zoom: 1.0,
            znear: 0.1,
            zfar: 2000.0,
            orientation: Quat::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.refresh_projection();
        camera
    }

    /// Orthographic camera at `eye` with the given frustum box.
    #[must_use]
    pub fn orthographic(
        eye: Vec3,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    ) -> Self {
        let mut camera = Self {
            lens: Lens::Orthographic {
                left,
                right,
                top,
                bottom,
            },
            ..Self::perspective(eye, 1.0, 45.0)
        };
        camera.refresh_projection();
        camera
    }

    /// Cached projection matrix, as of the last
    /// [`refresh_projection`](CameraHandle::refresh_projection).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.eye).inverse()
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Direction the camera is facing.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    fn build_projection(&self) -> Mat4 {
        let zoom = if self.zoom > 0.0 { self.zoom } else { 1.0 };
        match self.lens {
            Lens::Perspective => {
                let half = (self.fovy.to_radians() * 0.5).tan() / zoom;
                // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
                // convention)
                Mat4::perspective_rh(
                    2.0 * half.atan(),
                    self.aspect,
                    self.znear,
                    self.zfar,
                )
            }
            Lens::Orthographic {
                left,
                right,
                top,
                bottom,
            } => {
                let dx = (right - left) / (2.0 * zoom);
                let dy = (top - bottom) / (2.0 * zoom);
                let cx = (right + left) * 0.5;
                let cy = (top + bottom) * 0.5;
                Mat4::orthographic_rh(
                    cx - dx,
                    cx + dx,
                    cy - dy,
                    cy + dy,
                    self.znear,
                    self.zfar,
                )
            }
        }
    }
}

impl CameraHandle for Camera {
    fn position(&self) -> Vec3 {
        self.eye
    }

    fn set_position(&mut self, position: Vec3) {
        self.eye = position;
    }

    fn up(&self) -> Vec3 {
        self.up
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn look_at(&mut self, target: Vec3) {
        self.orientation = look_rotation(self.eye, target, self.up);
    }

    fn projection(&self) -> Projection {
        match self.lens {
            Lens::Perspective => Projection::Perspective { fovy: self.fovy },
            Lens::Orthographic {
                left,
                right,
                top,
                bottom,
            } => Projection::Orthographic {
                left,
                right,
                top,
                bottom,
                zoom: self.zoom,
            },
        }
    }

    fn set_zoom(&mut self, zoom: f32) {
        if matches!(self.lens, Lens::Orthographic { .. }) {
            self.zoom = zoom;
        }
    }

    fn set_fovy(&mut self, fovy: f32) {
        self.fovy = fovy;
    }

    fn refresh_projection(&mut self) {
        self.projection = self.build_projection();
    }
}

/// Rotation that makes an object at `eye` face `target` (looking down its
/// local `-Z`), keeping its local `+Y` as close to `up` as possible.
///
/// When `up` is parallel to the view direction the direction is nudged
/// slightly so a basis can still be formed.
#[must_use]
pub fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Quat {
    let z = (eye - target).try_normalize().unwrap_or(Vec3::Z);
    let mut x = up.cross(z);

    if x.length_squared() < 1e-12 {
        let nudge = if (up.z.abs() - 1.0).abs() < f32::EPSILON {
            Vec3::new(1e-4, 0.0, 0.0)
        } else {
            Vec3::new(0.0, 0.0, 1e-4)
        };
        x = up.cross((z + nudge).normalize());
    }

    let x = x.try_normalize().unwrap_or(Vec3::X);
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}
