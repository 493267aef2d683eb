use glam::Vec2;

/// Residual orbit velocity left behind by a released rotate gesture.
///
/// `x` drives azimuth and `y` drives polar angle, in the same units as the
/// last drag delta scaled by `momentum_scaling_factor`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Momentum {
    velocity: Vec2,
}

impl Momentum {
    /// Squared speed below which momentum counts as stopped.
    pub const EPSILON: f32 = 1e-6;

    /// Record the release velocity of a rotate gesture.
    pub fn capture(&mut self, rotate_delta: Vec2, scaling_factor: f32) {
        let velocity = rotate_delta * scaling_factor;
        self.velocity = if velocity.is_finite() {
            velocity
        } else {
            Vec2::ZERO
        };
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Whether enough velocity remains to keep orbiting.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.velocity.length_squared() > Self::EPSILON
    }

    /// Shrink the velocity by `damping_factor`.
    pub fn decay(&mut self, damping_factor: f32) {
        self.velocity *= 1.0 - damping_factor;
    }

    /// Drop all velocity.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{immediate, rig, Rig};
    use super::super::OrbitControls;
    use super::*;
    use crate::camera::CameraHandle;
    use crate::input::InputEvent;
    use crate::options::Options;

    #[test]
    fn decays_geometrically_to_rest() {
        let mut momentum = Momentum::default();
        momentum.capture(Vec2::new(50.0, 0.0), 0.02);
        assert!((momentum.velocity() - Vec2::new(1.0, 0.0)).length() < 1e-6);

        let mut ticks = 0;
        while momentum.is_moving() {
            momentum.decay(0.05);
            ticks += 1;
        }
        // 0.95^n < 1e-3
        assert_eq!(ticks, 135);
    }

    #[test]
    fn non_finite_release_is_dropped() {
        let mut momentum = Momentum::default();
        momentum.capture(Vec2::new(f32::INFINITY, 0.0), 0.02);
        assert!(!momentum.is_moving());
    }

    fn drag_and_release(controls: &mut OrbitControls) {
        let _ = controls.handle_event(&InputEvent::TouchStart {
            touches: vec![Vec2::new(100.0, 100.0)],
        });
        let _ = controls.handle_event(&InputEvent::TouchMove {
            touches: vec![Vec2::new(160.0, 100.0)],
        });
        let _ = controls.handle_event(&InputEvent::TouchEnd { touches: vec![] });
    }

    #[test]
    fn release_keeps_orbiting_without_input() {
        let mut options = immediate();
        options.motion.enable_momentum = true;
        let mut controls = rig(options).controls;

        drag_and_release(&mut controls);
        // Drag delta 60 px at rotate speed 0.5, scaled by 0.02.
        assert!((controls.momentum().velocity().x - 0.6).abs() < 1e-6);

        let _ = controls.update(1.0 / 60.0);
        let theta = controls.azimuthal_angle();
        assert!(controls.update(1.0 / 60.0));
        assert!(controls.azimuthal_angle() < theta);
        assert!(controls.momentum().velocity().x < 0.6);
    }

    #[test]
    fn momentum_is_independent_of_damping_toggle() {
        let mut options = Options::default();
        options.motion.enable_damping = false;
        options.motion.enable_smooth = false;
        let mut controls = rig(options).controls;
        drag_and_release(&mut controls);
        let before = controls.momentum().velocity();
        let _ = controls.update(0.016);
        assert!(controls.momentum().velocity().x < before.x);
    }

    #[test]
    fn disabled_momentum_captures_nothing() {
        let Rig {
            camera,
            mut controls,
            ..
        } = rig(immediate());
        drag_and_release(&mut controls);
        assert!(!controls.momentum().is_moving());

        // Two updates without input land on the same pose.
        let _ = controls.update(0.016);
        let pose = camera.borrow().position();
        assert!(!controls.update(0.016));
        assert!((camera.borrow().position() - pose).length() < 1e-5);
    }
}
