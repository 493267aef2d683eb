use std::f32::consts::PI;

use glam::{Quat, Vec3};

/// Orbit geometry relative to the target: radius, polar angle `phi`
/// measured from `+Y`, azimuth `theta` measured around `+Y` from `+Z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the target.
    pub radius: f32,
    /// Polar angle in radians, `0` at the `+Y` pole.
    pub phi: f32,
    /// Azimuth angle in radians.
    pub theta: f32,
}

impl Default for Spherical {
    fn default() -> Self {
        Self {
            radius: 1.0,
            phi: 0.0,
            theta: 0.0,
        }
    }
}

impl Spherical {
    /// Minimum distance kept between `phi` and either pole.
    pub const POLE_EPSILON: f32 = 1e-6;

    /// Spherical coordinates of a Y-up offset vector.
    #[must_use]
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    /// Y-up offset vector for these coordinates.
    #[must_use]
    pub fn to_offset(&self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep `phi` strictly between the poles.
    pub fn make_safe(&mut self) {
        self.phi = self
            .phi
            .max(Self::POLE_EPSILON)
            .min(PI - Self::POLE_EPSILON);
    }
}

/// Fixed rotation between the camera's up axis and `+Y`, so orbit math
/// does not depend on which way the host considers "up".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBasis {
    to_y_up: Quat,
    from_y_up: Quat,
}

impl OrbitBasis {
    /// Basis for a camera whose up vector is `up`.
    #[must_use]
    pub fn new(up: Vec3) -> Self {
        let up = up.try_normalize().unwrap_or(Vec3::Y);
        let to_y_up = Quat::from_rotation_arc(up, Vec3::Y);
        Self {
            to_y_up,
            from_y_up: to_y_up.inverse(),
        }
    }

    /// Spherical coordinates of a world-space `position - target` offset.
    #[must_use]
    pub fn to_spherical(&self, offset: Vec3) -> Spherical {
        Spherical::from_offset(self.to_y_up * offset)
    }

    /// World-space offset for spherical coordinates.
    #[must_use]
    pub fn to_world(&self, spherical: &Spherical) -> Vec3 {
        self.from_y_up * spherical.to_offset()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn offset_along_z_is_on_equator() {
        let s = Spherical::from_offset(Vec3::new(0.0, 0.0, 5.0));
        assert!((s.radius - 5.0).abs() < 1e-6);
        assert!((s.phi - FRAC_PI_2).abs() < 1e-6);
        assert!(s.theta.abs() < 1e-6);
    }

    #[test]
    fn offset_round_trips() {
        let v = Vec3::new(1.5, -2.0, 3.25);
        let back = Spherical::from_offset(v).to_offset();
        assert!((back - v).length() < 1e-5);
    }

    #[test]
    fn zero_offset_is_degenerate_but_finite() {
        let s = Spherical::from_offset(Vec3::ZERO);
        assert_eq!(s.radius, 0.0);
        assert_eq!(s.phi, 0.0);
        assert_eq!(s.theta, 0.0);
    }

    #[test]
    fn make_safe_moves_off_poles() {
        let mut top = Spherical {
            radius: 1.0,
            phi: 0.0,
            theta: 0.0,
        };
        top.make_safe();
        assert!(top.phi > 0.0);

        let mut bottom = Spherical { phi: PI, ..top };
        bottom.make_safe();
        assert!(bottom.phi < PI);
    }

    #[test]
    fn z_up_basis_maps_up_to_pole() {
        let basis = OrbitBasis::new(Vec3::Z);
        let s = basis.to_spherical(Vec3::new(0.0, 0.0, 2.0));
        assert!(s.phi.abs() < 1e-5);
        let back = basis.to_world(&Spherical {
            radius: 2.0,
            phi: FRAC_PI_2,
            theta: 0.3,
        });
        assert!(back.z.abs() < 1e-5);
        assert!((back.length() - 2.0).abs() < 1e-5);
    }
}
