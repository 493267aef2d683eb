//! The orbit controller.
//!
//! [`OrbitControls`] accumulates input into pending spherical deltas and
//! integrates them into the camera pose once per frame. Its methods are
//! split by concern across the submodules.

mod accessors;
mod animation;
mod input;
mod momentum;
#[cfg(test)]
mod test_support;
mod transform;
mod update;

use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};

pub use self::animation::AnimationTask;
use self::animation::Sequencer;
use self::input::GestureTracker;
pub use self::momentum::Momentum;
pub use self::transform::Deltas;
use crate::camera::{OrbitBasis, SharedCamera, Spherical};
use crate::error::OrbitError;
use crate::events::{ControlEvent, EventNotifier};
use crate::input::{
    InteractionState, ListenerId, ListenerKind, ListenerScope, OwnerId,
    SharedSurface,
};
use crate::options::Options;
use crate::util::frame_timing::FrameClock;

/// Listeners held for as long as the controller is connected. Pointer
/// move/up are only added globally while a drag is in progress.
const SURFACE_LISTENERS: [(ListenerKind, ListenerScope); 7] = [
    (ListenerKind::ContextMenu, ListenerScope::Surface),
    (ListenerKind::PointerDown, ListenerScope::Surface),
    (ListenerKind::Wheel, ListenerScope::Surface),
    (ListenerKind::TouchStart, ListenerScope::Surface),
    (ListenerKind::TouchEnd, ListenerScope::Surface),
    (ListenerKind::TouchMove, ListenerScope::Surface),
    (ListenerKind::KeyDown, ListenerScope::Global),
];

const DRAG_LISTENERS: [ListenerKind; 2] =
    [ListenerKind::PointerMove, ListenerKind::PointerUp];

/// Pose checkpoint restored by [`OrbitControls::reset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedState {
    /// Orbit target.
    pub target: Vec3,
    /// Camera position.
    pub position: Vec3,
    /// Orthographic zoom (`1.0` for other projections).
    pub zoom: f32,
}

/// Damped orbit camera controller.
///
/// Converts pointer, touch and keyboard input into orbit deltas around a
/// target point, then integrates them into the camera pose once per frame.
///
/// # Frame loop
///
/// Forward input with [`handle_event`](Self::handle_event). Once per frame
/// call [`update`](Self::update) (or
/// [`update_from_clock`](Self::update_from_clock)) and
/// [`run_animation_frame`](Self::run_animation_frame); redraw when either
/// returns `true`.
///
/// # Animation
///
/// [`animate_to`](Self::animate_to) starts an eased transition that owns
/// the camera pose until it lands. A newer call supersedes an older one;
/// the continuous update path stays idle meanwhile.
///
/// # Lifecycle
///
/// The controller listens on its input surface from construction until
/// [`disconnect`](Self::disconnect) or [`dispose`](Self::dispose). After
/// `dispose` nothing mutates the camera again.
pub struct OrbitControls {
    camera: SharedCamera,
    surface: SharedSurface,
    owner: OwnerId,
    /// Runtime gesture, motion and limit options.
    options: Options,
    enabled: bool,
    disposed: bool,

    /// Point the camera orbits.
    target: Vec3,
    /// Fixed remap between the camera's up axis and `+Y`.
    basis: OrbitBasis,
    /// Orbit geometry as of the last pose write.
    spherical: Spherical,
    /// Pending rotate/pan/dolly deltas.
    deltas: Deltas,
    momentum: Momentum,
    gesture: GestureTracker,
    sequencer: Sequencer,
    notifier: EventNotifier,

    saved: SavedState,
    /// Pose as of the last `Change` notification.
    last_position: Vec3,
    last_orientation: Quat,

    listeners: Vec<ListenerId>,
    drag_listeners: Vec<ListenerId>,
    /// Fallback timing for hosts without their own frame delta.
    clock: FrameClock,
}

impl std::fmt::Debug for OrbitControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitControls")
            .field("enabled", &self.enabled)
            .field("disposed", &self.disposed)
            .field("target", &self.target)
            .field("spherical", &self.spherical)
            .field("state", &self.gesture.state)
            .field("animating", &self.sequencer.is_animating())
            .finish_non_exhaustive()
    }
}

impl Drop for OrbitControls {
    fn drop(&mut self) {
        self.dispose();
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

impl OrbitControls {
    /// Bind a controller to `camera` and start listening on `surface`.
    ///
    /// The orbit target starts at the origin. The initial pose is saved for
    /// [`reset`](Self::reset) and the camera is turned to face the target.
    ///
    /// # Errors
    ///
    /// [`OrbitError::CameraBorrowed`] if the camera is mutably borrowed, or
    /// [`OrbitError::SurfaceBusy`] if another controller is connected to
    /// the surface.
    pub fn new(
        camera: SharedCamera,
        surface: SharedSurface,
        options: Options,
    ) -> Result<Self, OrbitError> {
        let (position, up, orientation, zoom) = {
            let cam =
                camera.try_borrow().map_err(|_| OrbitError::CameraBorrowed)?;
            (
                cam.position(),
                cam.up(),
                cam.orientation(),
                cam.projection().zoom(),
            )
        };
        let target = Vec3::ZERO;
        let basis = OrbitBasis::new(up);

        let mut controls = Self {
            camera,
            surface,
            owner: OwnerId::next(),
            options,
            enabled: true,
            disposed: false,
            target,
            basis,
            spherical: basis.to_spherical(position - target),
            deltas: Deltas::default(),
            momentum: Momentum::default(),
            gesture: GestureTracker::default(),
            sequencer: Sequencer::default(),
            notifier: EventNotifier::new(),
            saved: SavedState {
                target,
                position,
                zoom,
            },
            last_position: position,
            last_orientation: orientation,
            listeners: Vec::new(),
            drag_listeners: Vec::new(),
            clock: FrameClock::new(),
        };
        controls.connect()?;
        let _ = controls.update(0.0);
        Ok(controls)
    }

    /// Register the controller's listeners on its surface. Idempotent.
    ///
    /// # Errors
    ///
    /// [`OrbitError::Disposed`] after [`dispose`](Self::dispose), or
    /// [`OrbitError::SurfaceBusy`] if another owner holds the surface. A
    /// failed connect leaves no listeners behind.
    pub fn connect(&mut self) -> Result<(), OrbitError> {
        if self.disposed {
            return Err(OrbitError::Disposed);
        }
        if !self.listeners.is_empty() {
            return Ok(());
        }
        let mut surface = self.surface.try_borrow_mut().map_err(|_| {
            log::warn!("input surface is borrowed, cannot connect");
            OrbitError::SurfaceBusy
        })?;
        for (kind, scope) in SURFACE_LISTENERS {
            match surface.add_listener(self.owner, kind, scope) {
                Ok(id) => self.listeners.push(id),
                Err(e) => {
                    for id in self.listeners.drain(..) {
                        let _ = surface.remove_listener(id);
                    }
                    return Err(e);
                }
            }
        }
        log::debug!("orbit controls connected");
        Ok(())
    }

    /// Remove every listener this controller added. Idempotent.
    ///
    /// An in-progress gesture ends (emitting `End`).
    pub fn disconnect(&mut self) {
        self.end_drag();
        if !self.listeners.is_empty() {
            let Ok(mut surface) = self.surface.try_borrow_mut() else {
                log::warn!("input surface is borrowed, listeners left in place");
                return;
            };
            for id in self.listeners.drain(..) {
                let _ = surface.remove_listener(id);
            }
            log::debug!("orbit controls disconnected");
        }
        self.set_state(InteractionState::None);
    }

    /// Disconnect, abandon any animation and drop all subscribers.
    ///
    /// Safe to call more than once; later calls do nothing. Afterwards the
    /// controller never touches the camera again.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disconnect();
        self.sequencer.cancel();
        self.notifier.clear();
        self.disposed = true;
        log::debug!("orbit controls disposed");
    }

    /// Enable or disable the controller.
    ///
    /// While disabled, [`update`](Self::update) and input handling do
    /// nothing and an in-flight animation aborts on its next frame.
    /// Disabling ends an in-progress gesture. Re-enabling resumes an
    /// animation that was requested while already disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled || self.disposed {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.sequencer.resume();
        } else {
            self.end_drag();
            self.set_state(InteractionState::None);
        }
    }

    /// Checkpoint the current target, position and zoom for
    /// [`reset`](Self::reset).
    pub fn save_state(&mut self) {
        let Ok(cam) = self.camera.try_borrow() else {
            log::warn!("camera handle is borrowed, state not saved");
            return;
        };
        self.saved = SavedState {
            target: self.target,
            position: cam.position(),
            zoom: cam.projection().zoom(),
        };
    }

    /// Restore the saved pose.
    ///
    /// Clears pending deltas and momentum, abandons any animation, emits
    /// `Change`, re-runs the integrator once and returns to the idle state.
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }
        let camera = Rc::clone(&self.camera);
        let Ok(mut cam) = camera.try_borrow_mut() else {
            log::warn!("camera handle is borrowed, reset skipped");
            return;
        };
        let was_animating = self.sequencer.is_animating();
        self.sequencer.cancel();
        self.deltas = Deltas::default();
        self.momentum.stop();

        cam.set_position(self.saved.position);
        cam.set_zoom(self.saved.zoom);
        cam.refresh_projection();
        drop(cam);
        self.target = self.saved.target;

        if was_animating {
            self.notifier.emit(ControlEvent::End);
        }
        self.notifier.emit(ControlEvent::Change);
        let _ = self.update(0.0);
        self.end_drag();
        self.set_state(InteractionState::None);
    }

    /// Move to `state`, emitting `Start` when leaving `None` and `End` when
    /// returning to it.
    fn set_state(&mut self, state: InteractionState) {
        let previous = self.gesture.state;
        if previous == state {
            return;
        }
        self.gesture.state = state;
        log::debug!("interaction {previous:?} -> {state:?}");
        match (previous.is_active(), state.is_active()) {
            (false, true) => self.notifier.emit(ControlEvent::Start),
            (true, false) => self.notifier.emit(ControlEvent::End),
            _ => {}
        }
    }

    /// Add the global pointer move/up listeners for a drag.
    fn start_drag(&mut self) -> Result<(), OrbitError> {
        if !self.drag_listeners.is_empty() {
            return Ok(());
        }
        let mut surface = self
            .surface
            .try_borrow_mut()
            .map_err(|_| OrbitError::SurfaceBusy)?;
        for kind in DRAG_LISTENERS {
            match surface.add_listener(self.owner, kind, ListenerScope::Global)
            {
                Ok(id) => self.drag_listeners.push(id),
                Err(e) => {
                    for id in self.drag_listeners.drain(..) {
                        let _ = surface.remove_listener(id);
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn end_drag(&mut self) {
        if self.drag_listeners.is_empty() {
            return;
        }
        let Ok(mut surface) = self.surface.try_borrow_mut() else {
            log::warn!("input surface is borrowed, drag listeners left in place");
            return;
        };
        for id in self.drag_listeners.drain(..) {
            let _ = surface.remove_listener(id);
        }
    }

    /// Surface extent, or `None` if the host holds the surface borrowed.
    fn viewport_size(&self) -> Option<Vec2> {
        match self.surface.try_borrow() {
            Ok(surface) => Some(surface.viewport_size()),
            Err(_) => {
                log::warn!("input surface is borrowed, event skipped");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::test_support::{rig, recorder, Rig};
    use super::*;
    use crate::camera::CameraHandle;
    use crate::input::{InputEvent, ListenerRegistry, Modifiers, MouseButton};

    #[test]
    fn construction_registers_surface_listeners() {
        let Rig { surface, controls, .. } = rig(Options::default());
        let registry = surface.borrow();
        assert_eq!(registry.listener_count(), SURFACE_LISTENERS.len());
        assert!(registry.is_listening(ListenerKind::Wheel, ListenerScope::Surface));
        assert!(registry.is_listening(ListenerKind::KeyDown, ListenerScope::Global));
        assert!(!registry.is_listening(ListenerKind::PointerMove, ListenerScope::Global));
        assert!(controls.is_connected());
    }

    #[test]
    fn construction_faces_the_target() {
        let Rig { camera, .. } = rig(Options::default());
        let cam = camera.borrow();
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn second_controller_on_same_surface_is_refused() {
        let Rig { camera, surface, mut controls, .. } = rig(Options::default());
        let shared_camera: SharedCamera = camera.clone();
        let shared_surface: SharedSurface = surface.clone();
        let second =
            OrbitControls::new(shared_camera.clone(), shared_surface.clone(), Options::default());
        assert!(matches!(second, Err(OrbitError::SurfaceBusy)));
        // The refused controller left nothing behind.
        assert_eq!(surface.borrow().listener_count(), SURFACE_LISTENERS.len());

        controls.disconnect();
        assert_eq!(surface.borrow().listener_count(), 0);
        let second =
            OrbitControls::new(shared_camera, shared_surface, Options::default());
        assert!(second.is_ok());
    }

    #[test]
    fn camera_borrowed_by_host_fails_construction() {
        let Rig { camera, surface, .. } = rig(Options::default());
        let _guard = camera.borrow_mut();
        let shared_camera: SharedCamera = camera.clone();
        let result = OrbitControls::new(shared_camera, surface, Options::default());
        assert!(matches!(result, Err(OrbitError::CameraBorrowed)));
    }

    #[test]
    fn disconnect_and_dispose_are_idempotent() {
        let Rig { surface, mut controls, .. } = rig(Options::default());
        let (events, listener) = recorder();
        let _ = controls.subscribe(listener);

        assert!(controls.handle_event(&InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 10.0,
            y: 10.0,
            modifiers: Modifiers::NONE,
        }));
        assert_eq!(surface.borrow().listener_count(), SURFACE_LISTENERS.len() + 2);

        controls.disconnect();
        controls.disconnect();
        assert_eq!(surface.borrow().listener_count(), 0);
        assert_eq!(
            *events.borrow(),
            vec![ControlEvent::Start, ControlEvent::End]
        );

        controls.dispose();
        controls.dispose();
        assert!(controls.is_disposed());
        assert!(matches!(controls.connect(), Err(OrbitError::Disposed)));
        assert_eq!(surface.borrow().listener_count(), 0);
    }

    #[test]
    fn disposed_controller_never_touches_camera() {
        let Rig { camera, mut controls, .. } = rig(Options::default());
        controls.dispose();
        let before = camera.borrow().position();

        controls.rotate_left(1.0);
        assert!(!controls.update(0.1));
        controls.animate_to_at(
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::ZERO,
            web_time::Duration::ZERO,
            web_time::Instant::now(),
        );
        assert!(!controls.run_animation_frame(web_time::Instant::now()));
        controls.reset();
        assert!(!controls.handle_event(&InputEvent::Wheel { delta: 1.0 }));

        assert_eq!(camera.borrow().position(), before);
    }

    #[test]
    fn reset_restores_saved_pose_and_ends_gesture() {
        let Rig { camera, mut controls, .. } = rig(Options::default());
        let start = camera.borrow().position();
        controls.set_target(Vec3::new(1.0, 0.0, 0.0));
        camera.borrow_mut().set_position(Vec3::new(0.0, 4.0, 4.0));
        assert!(controls.handle_event(&InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 0.0,
            y: 0.0,
            modifiers: Modifiers::NONE,
        }));

        let (events, listener) = recorder();
        let _ = controls.subscribe(listener);
        controls.reset();

        assert_eq!(controls.target(), Vec3::ZERO);
        assert!((camera.borrow().position() - start).length() < 1e-5);
        assert_eq!(controls.state(), InteractionState::None);
        let events = events.borrow();
        assert_eq!(events.first(), Some(&ControlEvent::Change));
        assert_eq!(events.last(), Some(&ControlEvent::End));
    }

    #[test]
    fn reset_with_borrowed_camera_leaves_animation_running() {
        let Rig { camera, mut controls, .. } = rig(Options::default());
        let now = web_time::Instant::now();
        controls.animate_to_at(
            Vec3::new(3.0, 4.0, 5.0),
            Vec3::ZERO,
            web_time::Duration::from_millis(500),
            now,
        );
        let (events, listener) = recorder();
        let _ = controls.subscribe(listener);

        {
            let _guard = camera.borrow();
            controls.reset();
        }
        assert!(controls.is_animating());
        assert!(events.borrow().is_empty());

        controls.reset();
        assert!(!controls.is_animating());
        assert_eq!(events.borrow().first(), Some(&ControlEvent::End));
    }

    #[test]
    fn save_state_checkpoints_orthographic_zoom() {
        let camera = Rc::new(RefCell::new(crate::camera::Camera::orthographic(
            Vec3::new(0.0, 0.0, 10.0),
            -5.0,
            5.0,
            5.0,
            -5.0,
        )));
        let surface = Rc::new(RefCell::new(ListenerRegistry::new(800.0, 600.0)));
        let shared_camera: SharedCamera = camera.clone();
        let mut controls =
            OrbitControls::new(shared_camera, surface, Options::default()).unwrap();

        camera.borrow_mut().set_zoom(2.0);
        controls.save_state();
        camera.borrow_mut().set_zoom(4.0);
        controls.reset();
        assert_eq!(camera.borrow().projection().zoom(), 2.0);
        assert_eq!(controls.saved_state().zoom, 2.0);
    }

    #[test]
    fn disabling_ends_gesture_and_blocks_input() {
        let Rig { surface, mut controls, .. } = rig(Options::default());
        let (events, listener) = recorder();
        let _ = controls.subscribe(listener);
        assert!(controls.handle_event(&InputEvent::TouchStart {
            touches: vec![Vec2::new(5.0, 5.0)],
        }));

        controls.set_enabled(false);
        assert!(!controls.is_enabled());
        assert_eq!(controls.state(), InteractionState::None);
        assert!(!controls.handle_event(&InputEvent::ContextMenu));
        assert!(!controls.update(1.0));
        assert_eq!(*events.borrow(), vec![ControlEvent::Start, ControlEvent::End]);
        // Listeners stay registered while disabled.
        assert_eq!(surface.borrow().listener_count(), SURFACE_LISTENERS.len());

        controls.set_enabled(true);
        assert!(controls.handle_event(&InputEvent::ContextMenu));
    }
}
