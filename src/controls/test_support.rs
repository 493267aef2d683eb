//! Shared fixtures for controller tests.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Quat, Vec3};

use super::OrbitControls;
use crate::camera::{
    look_rotation, Camera, CameraHandle, Projection, SharedCamera,
};
use crate::events::ControlEvent;
use crate::input::ListenerRegistry;
use crate::options::Options;

pub(super) const WIDTH: f32 = 800.0;
pub(super) const HEIGHT: f32 = 600.0;

/// A controller wired to a concrete camera and registry the test can
/// inspect.
pub(super) struct Rig {
    pub camera: Rc<RefCell<Camera>>,
    pub surface: Rc<RefCell<ListenerRegistry>>,
    pub controls: OrbitControls,
}

/// Perspective camera at `(0, 0, 10)` orbiting the origin.
pub(super) fn rig(options: Options) -> Rig {
    rig_with(
        Camera::perspective(Vec3::new(0.0, 0.0, 10.0), WIDTH / HEIGHT, 45.0),
        options,
    )
}

pub(super) fn rig_with(camera: Camera, options: Options) -> Rig {
    let camera = Rc::new(RefCell::new(camera));
    let surface =
        Rc::new(RefCell::new(ListenerRegistry::new(WIDTH, HEIGHT)));
    let shared: SharedCamera = camera.clone();
    let controls =
        OrbitControls::new(shared, surface.clone(), options).unwrap();
    Rig {
        camera,
        surface,
        controls,
    }
}

/// Options with smoothing, damping, momentum and auto-rotate off, so each
/// update applies pending deltas in full.
pub(super) fn immediate() -> Options {
    let mut options = Options::default();
    options.motion.enable_smooth = false;
    options.motion.enable_damping = false;
    options.motion.enable_momentum = false;
    options
}

/// Listener that appends every event to a shared log.
pub(super) fn recorder(
) -> (Rc<RefCell<Vec<ControlEvent>>>, impl FnMut(ControlEvent)) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    (events, move |e| sink.borrow_mut().push(e))
}

/// Camera reporting a projection the controller cannot pan or dolly.
#[derive(Debug, Default)]
pub(super) struct FisheyeCamera {
    pub position: Vec3,
    pub orientation: Quat,
    pub refreshes: usize,
}

impl CameraHandle for FisheyeCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn up(&self) -> Vec3 {
        Vec3::Y
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn look_at(&mut self, target: Vec3) {
        self.orientation = look_rotation(self.position, target, Vec3::Y);
    }

    fn projection(&self) -> Projection {
        Projection::Other
    }

    fn set_zoom(&mut self, _zoom: f32) {}

    fn set_fovy(&mut self, _fovy: f32) {}

    fn refresh_projection(&mut self) {
        self.refreshes += 1;
    }
}
