//! Application context that switches the camera between orbit control and
//! an alternate (device-driven) controller.
//!
//! The session owns everything the switch needs: both controllers, the
//! current [`ViewMode`], the last position fix and the field of view to
//! restore when leaving alternate mode.
//!
//! ```ignore
//! let mut session = ViewSession::new(orbit, Box::new(device_controls));
//! session.enter_alternate(None)?;
//! session.place_viewer(ground_point, z_scale);
//! session.exit_alternate()?;
//! ```

use glam::Vec3;

use crate::camera::Projection;
use crate::controls::OrbitControls;
use crate::error::OrbitError;

/// Default viewpoint when alternate mode starts without a position fix.
const DEFAULT_ALTERNATE_POSITION: Vec3 = Vec3::new(0.0, 0.0, 30.0);

/// Which controller currently drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// [`OrbitControls`] handle input.
    #[default]
    Orbit,
    /// The [`AlternateControls`] implementor drives the camera.
    Alternate,
}

/// Controller that takes over the camera in [`ViewMode::Alternate`], for
/// example one driven by device orientation sensors.
pub trait AlternateControls {
    /// Start driving the camera.
    ///
    /// # Errors
    ///
    /// Implementation specific; typically [`OrbitError::SurfaceBusy`] when
    /// its input source is held by another controller.
    fn connect(&mut self) -> Result<(), OrbitError>;

    /// Stop driving the camera. Must be idempotent.
    fn disconnect(&mut self);
}

/// Orbit controller, alternate controller and the mode switch between
/// them.
pub struct ViewSession {
    orbit: OrbitControls,
    alternate: Box<dyn AlternateControls>,
    mode: ViewMode,
    last_fix: Option<Vec3>,
    /// Field of view to restore on leaving alternate mode.
    orbit_fovy: Option<f32>,
}

impl std::fmt::Debug for ViewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewSession")
            .field("orbit", &self.orbit)
            .field("mode", &self.mode)
            .field("last_fix", &self.last_fix)
            .finish_non_exhaustive()
    }
}

impl ViewSession {
    /// Session in orbit mode.
    #[must_use]
    pub fn new(
        orbit: OrbitControls,
        alternate: Box<dyn AlternateControls>,
    ) -> Self {
        Self {
            orbit,
            alternate,
            mode: ViewMode::Orbit,
            last_fix: None,
            orbit_fovy: None,
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Last viewpoint placed with [`place_viewer`](Self::place_viewer).
    #[must_use]
    pub fn last_fix(&self) -> Option<Vec3> {
        self.last_fix
    }

    /// The orbit controller.
    #[must_use]
    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    /// Mutable access to the orbit controller, e.g. to forward input.
    pub fn orbit_mut(&mut self) -> &mut OrbitControls {
        &mut self.orbit
    }

    /// Activate the controller for the current mode.
    ///
    /// # Errors
    ///
    /// Whatever [`AlternateControls::connect`] reports in alternate mode.
    pub fn start(&mut self) -> Result<(), OrbitError> {
        match self.mode {
            ViewMode::Orbit => {
                self.orbit.set_enabled(true);
                Ok(())
            }
            ViewMode::Alternate => self.alternate.connect(),
        }
    }

    /// Suspend the active controller, e.g. when the host goes to the
    /// background.
    pub fn pause(&mut self) {
        match self.mode {
            ViewMode::Orbit => self.orbit.set_enabled(false),
            ViewMode::Alternate => self.alternate.disconnect(),
        }
    }

    /// Undo [`pause`](Self::pause).
    ///
    /// # Errors
    ///
    /// As for [`start`](Self::start).
    pub fn resume(&mut self) -> Result<(), OrbitError> {
        self.start()
    }

    /// Hand the camera to the alternate controller.
    ///
    /// Applies the alternate field of view, moves the camera to `position`
    /// (or a default overview point), stops auto-rotation and disconnects
    /// the orbit controller so the alternate one can claim the input
    /// surface. Does nothing if already in alternate mode.
    ///
    /// # Errors
    ///
    /// [`OrbitError::CameraBorrowed`] if the camera is mutably borrowed,
    /// or the alternate controller's connect error. On error the session
    /// stays in orbit mode.
    pub fn enter_alternate(
        &mut self,
        position: Option<Vec3>,
    ) -> Result<(), OrbitError> {
        if self.mode == ViewMode::Alternate {
            return Ok(());
        }
        let position = position
            .filter(|p| p.is_finite())
            .unwrap_or(DEFAULT_ALTERNATE_POSITION);
        let fovy = self.orbit.options().ar.fovy;
        {
            let mut cam = self
                .orbit
                .camera()
                .try_borrow_mut()
                .map_err(|_| OrbitError::CameraBorrowed)?;
            self.orbit_fovy = match cam.projection() {
                Projection::Perspective { fovy } => Some(fovy),
                _ => None,
            };
            cam.set_fovy(fovy);
            cam.refresh_projection();
            cam.set_position(position);
        }

        if self.orbit.options().motion.auto_rotate {
            self.orbit.options_mut().motion.auto_rotate = false;
        }
        self.orbit.set_enabled(false);
        self.orbit.disconnect();

        if let Err(e) = self.alternate.connect() {
            log::warn!("alternate controls failed to connect: {e}");
            self.restore_orbit()?;
            return Err(e);
        }
        self.mode = ViewMode::Alternate;
        log::info!("entered alternate view at {position}");
        Ok(())
    }

    /// Return the camera to the orbit controller, restoring its field of
    /// view. Does nothing if already in orbit mode.
    ///
    /// # Errors
    ///
    /// As for [`OrbitControls::connect`].
    pub fn exit_alternate(&mut self) -> Result<(), OrbitError> {
        if self.mode == ViewMode::Orbit {
            return Ok(());
        }
        self.alternate.disconnect();
        self.mode = ViewMode::Orbit;
        self.restore_orbit()?;
        log::info!("returned to orbit view");
        Ok(())
    }

    fn restore_orbit(&mut self) -> Result<(), OrbitError> {
        if let Some(fovy) = self.orbit_fovy.take() {
            match self.orbit.camera().try_borrow_mut() {
                Ok(mut cam) => {
                    cam.set_fovy(fovy);
                    cam.refresh_projection();
                }
                Err(_) => {
                    log::warn!("camera handle is borrowed, fov not restored");
                }
            }
        }
        self.orbit.connect()?;
        self.orbit.set_enabled(true);
        Ok(())
    }

    /// Move the viewer to stand on `ground`, raised by the configured
    /// device height under vertical exaggeration `z_scale`.
    ///
    /// The new viewpoint becomes the last fix. Returns it, or `None` if
    /// the input is non-finite or the camera is borrowed.
    pub fn place_viewer(&mut self, ground: Vec3, z_scale: f32) -> Option<Vec3> {
        let height = self.orbit.options().ar.device_height * z_scale;
        let viewpoint = ground + Vec3::Z * height;
        if !viewpoint.is_finite() {
            log::warn!("non-finite viewer position ignored");
            return None;
        }
        let Ok(mut cam) = self.orbit.camera().try_borrow_mut() else {
            log::warn!("camera handle is borrowed, viewer not placed");
            return None;
        };
        cam.set_position(viewpoint);
        drop(cam);
        self.last_fix = Some(viewpoint);
        log::debug!("viewer placed at {viewpoint}");
        Some(viewpoint)
    }
}
