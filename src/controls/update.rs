//! Per-frame integration of pending deltas into the camera pose.

use std::rc::Rc;

use super::OrbitControls;
use crate::camera::Projection;
use crate::events::ControlEvent;

/// Threshold for squared position change and orientation change below
/// which a tick is reported as idle.
const CHANGE_EPSILON: f32 = 1e-6;

/// Weight applied to the pending pan per tick while smoothing.
const SMOOTH_PAN_WEIGHT: f32 = 0.1;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl OrbitControls {
    /// Integrate pending deltas and momentum over `delta_time` seconds and
    /// write the camera pose.
    ///
    /// Returns `true` if the pose (or orthographic zoom) changed enough to
    /// be worth redrawing, `false` when idle, disabled, disposed or while
    /// an animation owns the camera.
    pub fn update(&mut self, delta_time: f32) -> bool {
        if self.disposed || !self.enabled || self.sequencer.is_animating() {
            return false;
        }
        let dt = if delta_time.is_finite() {
            delta_time.max(0.0)
        } else {
            0.0
        };

        let camera = Rc::clone(&self.camera);
        let Ok(mut cam) = camera.try_borrow_mut() else {
            log::warn!("camera handle is borrowed, update skipped");
            return false;
        };

        let mut spherical = self.basis.to_spherical(cam.position() - self.target);
        let idle = !self.gesture.state.is_active();
        let motion = &self.options.motion;
        let (auto_rotate, auto_angle) =
            (motion.auto_rotate, motion.auto_rotation_angle());
        let (momentum_on, damping_on, damping_factor) = (
            motion.enable_momentum,
            motion.enable_damping,
            motion.damping_factor,
        );
        let smoothing = motion.smoothing_weight(dt);
        let pan_weight = if motion.enable_smooth {
            SMOOTH_PAN_WEIGHT
        } else {
            1.0
        };

        if auto_rotate && idle {
            self.rotate_left(auto_angle * dt);
        }

        if momentum_on && idle && self.momentum.is_moving() {
            let velocity = self.momentum.velocity();
            self.rotate_left(velocity.x * dt);
            self.rotate_up(velocity.y * dt);
            self.momentum.decay(damping_factor);
        }

        if smoothing < 1.0 {
            // Per-component and linear, so angles may take the long way
            // around near the azimuth wrap.
            spherical.theta = lerp(
                spherical.theta,
                spherical.theta + self.deltas.theta,
                smoothing,
            );
            spherical.phi =
                lerp(spherical.phi, spherical.phi + self.deltas.phi, smoothing);
            spherical.radius = lerp(
                spherical.radius,
                spherical.radius * self.deltas.scale,
                smoothing,
            );
        } else {
            spherical.theta += self.deltas.theta;
            spherical.phi += self.deltas.phi;
            spherical.radius *= self.deltas.scale;
        }

        let limits = &self.options.limits;
        spherical.theta = limits.clamp_azimuth(spherical.theta);
        spherical.phi = limits.clamp_polar(spherical.phi);
        spherical.make_safe();
        spherical.radius = limits.clamp_distance(spherical.radius);
        if let Projection::Orthographic { zoom, .. } = cam.projection() {
            let clamped = limits.clamp_zoom(zoom);
            if clamped != zoom {
                cam.set_zoom(clamped);
                cam.refresh_projection();
                self.deltas.zoom_changed = true;
            }
        }

        let pan_goal = self.target + self.deltas.pan_offset;
        self.target = self.target.lerp(pan_goal, pan_weight);

        let position = self.target + self.basis.to_world(&spherical);
        cam.set_position(position);
        cam.look_at(self.target);
        let orientation = cam.orientation();
        drop(cam);
        self.spherical = spherical;

        if damping_on {
            self.deltas.decay(damping_factor);
        } else {
            self.deltas.clear_motion();
        }
        self.deltas.scale = 1.0;

        let zoom_changed = std::mem::take(&mut self.deltas.zoom_changed);
        if zoom_changed
            || self.last_position.distance_squared(position) > CHANGE_EPSILON
            || 8.0 * (1.0 - self.last_orientation.dot(orientation))
                > CHANGE_EPSILON
        {
            self.last_position = position;
            self.last_orientation = orientation;
            self.notifier.emit(ControlEvent::Change);
            return true;
        }
        false
    }

    /// [`update`](Self::update) with the time since the previous call,
    /// for hosts that do not track their own frame delta.
    pub fn update_from_clock(&mut self) -> bool {
        let dt = self.clock.tick();
        self.update(dt)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use glam::{Vec2, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::super::test_support::{immediate, recorder, rig, rig_with, Rig};
    use crate::camera::{Camera, CameraHandle};
    use crate::events::ControlEvent;
    use crate::input::InputEvent;
    use crate::options::Options;

    fn ortho_camera() -> Camera {
        Camera::orthographic(Vec3::new(0.0, 0.0, 10.0), -4.0, 4.0, 3.0, -3.0)
    }

    #[test]
    fn steady_state_reports_no_change() {
        let mut controls = rig(Options::default()).controls;
        for _ in 0..200 {
            assert!(!controls.update(1.0 / 60.0));
        }
    }

    #[test]
    fn rotate_left_changes_azimuth_exactly_without_smoothing() {
        let mut controls = rig(immediate()).controls;
        let before = controls.azimuthal_angle();
        controls.rotate_left(0.3);
        assert!(controls.update(1.0 / 60.0));
        assert!((controls.azimuthal_angle() - (before - 0.3)).abs() < 1e-5);
    }

    #[test]
    fn tiny_smooth_time_behaves_like_no_smoothing() {
        let mut options = immediate();
        options.motion.enable_smooth = true;
        options.motion.smooth_time = 1e-9;
        let mut controls = rig(options).controls;
        controls.rotate_left(0.3);
        let _ = controls.update(1.0 / 60.0);
        assert!((controls.azimuthal_angle() + 0.3).abs() < 1e-5);
    }

    #[test]
    fn smoothing_approaches_target_gradually() {
        let mut options = Options::default();
        options.motion.enable_damping = false;
        let mut controls = rig(options).controls;
        controls.rotate_left(0.5);
        assert!(controls.update(0.05));
        let theta = controls.azimuthal_angle();
        // t = 1 - e^(-0.25)
        let expected = -0.5 * (1.0 - (-0.25_f32).exp());
        assert!((theta - expected).abs() < 1e-5);
    }

    #[test]
    fn without_damping_pose_settles_after_one_tick() {
        let Rig {
            camera,
            mut controls,
            ..
        } = rig(immediate());
        controls.rotate_left(0.4);
        controls.rotate_up(0.2);
        controls.dolly_in(0.8).unwrap();
        controls.pan(30.0, -20.0, false).unwrap();
        assert!(controls.update(0.016));

        let pose = (camera.borrow().position(), camera.borrow().orientation());
        assert!(!controls.update(0.016));
        let after = (camera.borrow().position(), camera.borrow().orientation());
        assert!((after.0 - pose.0).length() < 1e-5);
        assert!(after.1.dot(pose.1) > 1.0 - 1e-6);
    }

    #[test]
    fn damping_spreads_motion_over_ticks() {
        let mut options = immediate();
        options.motion.enable_damping = true;
        let mut controls = rig(options).controls;
        controls.rotate_left(0.1);
        assert!(controls.update(0.016));
        // 5% lost per tick: the second tick applies 0.095.
        assert!((controls.deltas().theta + 0.095).abs() < 1e-6);
        assert!(controls.update(0.016));
        assert!((controls.azimuthal_angle() + 0.195).abs() < 1e-5);
    }

    #[test]
    fn dolly_stays_within_distance_limits() {
        let mut options = Options::default();
        options.limits.min_distance = 2.0;
        options.limits.max_distance = 40.0;
        let mut controls = rig(options).controls;
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let scale = rng.random_range(0.05_f32..1.0);
            if rng.random_bool(0.5) {
                controls.dolly_in(scale).unwrap();
            } else {
                controls.dolly_out(scale).unwrap();
            }
            let _ = controls.update(rng.random_range(0.0_f32..0.1));
            let radius = controls.distance();
            assert!((2.0..=40.0).contains(&radius), "radius {radius}");
        }
    }

    #[test]
    fn orthographic_zoom_stays_within_limits() {
        let mut options = Options::default();
        options.limits.min_zoom = 0.5;
        options.limits.max_zoom = 4.0;
        let Rig {
            camera,
            mut controls,
            ..
        } = rig_with(
            ortho_camera(),
            options,
        );
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..300 {
            let scale = rng.random_range(0.1_f32..1.0);
            if rng.random_bool(0.5) {
                controls.dolly_in(scale).unwrap();
            } else {
                controls.dolly_out(scale).unwrap();
            }
            let _ = controls.update(0.016);
            let zoom = camera.borrow().projection().zoom();
            assert!((0.5..=4.0).contains(&zoom), "zoom {zoom}");
        }
    }

    #[test]
    fn orthographic_zoom_change_is_reported() {
        let Rig { mut controls, .. } = rig_with(
            ortho_camera(),
            immediate(),
        );
        assert!(!controls.update(0.016));
        controls.dolly_in(0.9).unwrap();
        assert!(controls.update(0.016));
        assert!(!controls.update(0.016));
    }

    #[test]
    fn out_of_range_starting_zoom_is_clamped_on_update() {
        let mut options = immediate();
        options.limits.min_zoom = 0.5;
        options.limits.max_zoom = 4.0;
        let mut camera = ortho_camera();
        camera.set_zoom(10.0);
        let Rig {
            camera,
            mut controls,
            ..
        } = rig_with(camera, options);

        assert!(controls.update(0.016));
        assert_eq!(camera.borrow().projection().zoom(), 4.0);
        assert!(!controls.update(0.016));
    }

    #[test]
    fn tightened_zoom_limits_apply_on_next_update() {
        let Rig {
            camera,
            mut controls,
            ..
        } = rig_with(ortho_camera(), immediate());
        camera.borrow_mut().set_zoom(4.0);
        let _ = controls.update(0.016);

        controls.options_mut().limits.max_zoom = 2.0;
        assert!(controls.update(0.016));
        assert_eq!(camera.borrow().projection().zoom(), 2.0);

        controls.options_mut().limits.min_zoom = 3.0;
        controls.options_mut().limits.max_zoom = 5.0;
        assert!(controls.update(0.016));
        assert_eq!(camera.borrow().projection().zoom(), 3.0);
    }

    #[test]
    fn reset_clamps_saved_zoom_to_current_limits() {
        let Rig {
            camera,
            mut controls,
            ..
        } = rig_with(ortho_camera(), immediate());
        camera.borrow_mut().set_zoom(3.0);
        controls.save_state();

        controls.options_mut().limits.max_zoom = 2.0;
        controls.reset();
        assert_eq!(camera.borrow().projection().zoom(), 2.0);
    }

    #[test]
    fn polar_angle_never_reaches_poles() {
        let mut controls = rig(immediate()).controls;
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..300 {
            controls.rotate_up(rng.random_range(-20.0_f32..20.0));
            controls.rotate_left(rng.random_range(-20.0_f32..20.0));
            let _ = controls.update(0.016);
            let phi = controls.polar_angle();
            assert!(phi > 0.0 && phi < PI, "phi {phi}");
        }
        controls.rotate_up(1e6);
        let _ = controls.update(0.016);
        assert!(controls.polar_angle() > 0.0);
        controls.rotate_up(-1e6);
        let _ = controls.update(0.016);
        assert!(controls.polar_angle() < PI);
    }

    #[test]
    fn polar_and_azimuth_limits_hold() {
        let mut options = immediate();
        options.limits.min_polar_angle = 0.5;
        options.limits.max_polar_angle = FRAC_PI_2;
        options.limits.min_azimuth_angle = -0.25;
        options.limits.max_azimuth_angle = 0.25;
        let mut controls = rig(options).controls;

        controls.rotate_up(3.0);
        controls.rotate_left(3.0);
        let _ = controls.update(0.016);
        assert!((controls.polar_angle() - 0.5).abs() < 1e-5);
        assert!((controls.azimuthal_angle() + 0.25).abs() < 1e-5);

        controls.rotate_up(-3.0);
        controls.rotate_left(-3.0);
        let _ = controls.update(0.016);
        assert!((controls.polar_angle() - FRAC_PI_2).abs() < 1e-5);
        assert!((controls.azimuthal_angle() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn auto_rotate_only_while_idle() {
        let mut options = immediate();
        options.motion.auto_rotate = true;
        let mut controls = rig(options).controls;
        assert!(controls.update(1.0));
        // 2π/3600 · 2.0 per second
        let expected = -2.0 * PI / 3600.0 * 2.0;
        assert!((controls.azimuthal_angle() - expected).abs() < 1e-5);

        let _ = controls.handle_event(&InputEvent::TouchStart {
            touches: vec![Vec2::new(10.0, 10.0)],
        });
        let before = controls.azimuthal_angle();
        assert!(!controls.update(1.0));
        assert!((controls.azimuthal_angle() - before).abs() < 1e-6);
    }

    #[test]
    fn pan_smoothing_blends_target() {
        let mut options = Options::default();
        options.motion.enable_damping = false;
        let mut controls = rig(options).controls;
        controls.pan(-300.0, 0.0, false).unwrap();
        let offset = controls.deltas().pan_offset;
        let _ = controls.update(0.016);
        assert!((controls.target() - offset * 0.1).length() < 1e-5);
    }

    #[test]
    fn change_notifications_follow_update_results() {
        let mut controls = rig(immediate()).controls;
        let (events, listener) = recorder();
        let _ = controls.subscribe(listener);

        assert!(!controls.update(0.016));
        controls.rotate_left(0.2);
        assert!(controls.update(0.016));
        assert_eq!(*events.borrow(), vec![ControlEvent::Change]);
    }

    #[test]
    fn bad_delta_time_is_treated_as_zero() {
        let mut controls = rig(Options::default()).controls;
        controls.rotate_left(0.2);
        assert!(!controls.update(f32::NAN));
        assert!(!controls.update(-1.0));
        assert!(controls.update(0.1));
    }

    #[test]
    fn clock_update_runs_integrator() {
        let mut controls = rig(immediate()).controls;
        controls.rotate_left(0.2);
        assert!(controls.update_from_clock());
        assert!(!controls.update_from_clock());
    }
}
