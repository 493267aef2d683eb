//! Read-only queries and small setters for [`OrbitControls`].

use glam::Vec3;

use super::{Deltas, Momentum, OrbitControls, SavedState};
use crate::camera::SharedCamera;
use crate::events::{ControlEvent, SubscriptionId};
use crate::input::InteractionState;
use crate::options::Options;

// ── Orbit geometry ──

impl OrbitControls {
    /// Polar angle from the up axis, in radians, as of the last update.
    #[must_use]
    pub fn polar_angle(&self) -> f32 {
        self.spherical.phi
    }

    /// Azimuth around the up axis, in radians, as of the last update.
    #[must_use]
    pub fn azimuthal_angle(&self) -> f32 {
        self.spherical.theta
    }

    /// Orbit radius as of the last update.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// Point the camera orbits.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the orbit target. The camera turns to face it on the next
    /// update.
    pub fn set_target(&mut self, target: Vec3) {
        if self.disposed || !target.is_finite() {
            return;
        }
        self.target = target;
    }

    /// Pending deltas not yet consumed by [`update`](Self::update).
    #[must_use]
    pub fn deltas(&self) -> &Deltas {
        &self.deltas
    }

    /// Residual velocity from the last released rotation.
    #[must_use]
    pub fn momentum(&self) -> &Momentum {
        &self.momentum
    }

    /// Checkpoint used by [`reset`](Self::reset).
    #[must_use]
    pub fn saved_state(&self) -> SavedState {
        self.saved
    }

    /// The controlled camera.
    #[must_use]
    pub fn camera(&self) -> &SharedCamera {
        &self.camera
    }
}

// ── State ──

impl OrbitControls {
    /// Current gesture.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.gesture.state
    }

    /// Whether input and updates are accepted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether the surface listeners are registered.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        !self.listeners.is_empty()
    }
}

// ── Options ──

impl OrbitControls {
    /// Read-only access to the current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Mutable access to the options. Changes apply from the next event
    /// or update.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

// ── Notifications ──

impl OrbitControls {
    /// Register a listener for start/change/end notifications.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(ControlEvent) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}
