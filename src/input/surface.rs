//! Input surface contract: listener bookkeeping and viewport extent.
//!
//! The controller never reads raw device state. It registers listeners
//! on an [`InputSurface`] so the host knows which events to forward, and
//! asks the surface for its pixel extent when scaling drags.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::error::OrbitError;

/// Shared handle to a host-owned input surface.
pub type SharedSurface = Rc<RefCell<dyn InputSurface>>;

/// Event category a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer button pressed.
    PointerDown,
    /// Pointer moved.
    PointerMove,
    /// Pointer button released.
    PointerUp,
    /// Scroll wheel.
    Wheel,
    /// Touch began.
    TouchStart,
    /// Touch moved.
    TouchMove,
    /// Touch ended.
    TouchEnd,
    /// Key pressed.
    KeyDown,
    /// Context menu requested.
    ContextMenu,
}

/// Where a listener observes events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// Only events targeting the surface itself.
    Surface,
    /// Document/window-wide events, so drags can leave the surface.
    Global,
}

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Identity of a listener owner (one per controller instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocate a fresh, process-unique owner id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Surface a controller listens on.
pub trait InputSurface {
    /// Visible extent in pixels (`x` = width, `y` = height).
    fn viewport_size(&self) -> Vec2;

    /// Register a listener for `kind` events.
    ///
    /// # Errors
    ///
    /// [`OrbitError::SurfaceBusy`] when a different owner already holds
    /// listeners on this surface.
    fn add_listener(
        &mut self,
        owner: OwnerId,
        kind: ListenerKind,
        scope: ListenerScope,
    ) -> Result<ListenerId, OrbitError>;

    /// Remove a listener. Returns `false` if it was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    owner: OwnerId,
    kind: ListenerKind,
    scope: ListenerScope,
}

/// In-memory [`InputSurface`] for hosts that forward events themselves.
///
/// Tracks which listeners are live so the host can route events (for
/// example, only forward global pointer moves while a drag listener is
/// registered) and enforces that one owner at a time is connected.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    size: Vec2,
    listeners: FxHashMap<ListenerId, Registration>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Registry for a surface of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Self::default()
        }
    }

    /// Update the extent after a resize.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Whether any listener for `kind` in `scope` is live.
    #[must_use]
    pub fn is_listening(&self, kind: ListenerKind, scope: ListenerScope) -> bool {
        self.listeners
            .values()
            .any(|r| r.kind == kind && r.scope == scope)
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Owner currently holding listeners, if any.
    #[must_use]
    pub fn owner(&self) -> Option<OwnerId> {
        self.listeners.values().next().map(|r| r.owner)
    }
}

impl InputSurface for ListenerRegistry {
    fn viewport_size(&self) -> Vec2 {
        self.size
    }

    fn add_listener(
        &mut self,
        owner: OwnerId,
        kind: ListenerKind,
        scope: ListenerScope,
    ) -> Result<ListenerId, OrbitError> {
        if self.owner().is_some_and(|current| current != owner) {
            log::warn!("surface already connected to another controller");
            return Err(OrbitError::SurfaceBusy);
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let _ = self.listeners.insert(id, Registration { owner, kind, scope });
        Ok(id)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_owner_is_refused_until_first_releases() {
        let mut registry = ListenerRegistry::new(800.0, 600.0);
        let a = OwnerId::next();
        let b = OwnerId::next();

        let id = registry
            .add_listener(a, ListenerKind::PointerDown, ListenerScope::Surface)
            .unwrap();
        assert!(matches!(
            registry.add_listener(b, ListenerKind::Wheel, ListenerScope::Surface),
            Err(OrbitError::SurfaceBusy)
        ));

        assert!(registry.remove_listener(id));
        assert!(!registry.remove_listener(id));
        assert!(registry
            .add_listener(b, ListenerKind::Wheel, ListenerScope::Surface)
            .is_ok());
        assert_eq!(registry.owner(), Some(b));
    }

    #[test]
    fn tracks_scope_per_kind() {
        let mut registry = ListenerRegistry::new(10.0, 20.0);
        let owner = OwnerId::next();
        let _ = registry
            .add_listener(owner, ListenerKind::PointerMove, ListenerScope::Global)
            .unwrap();
        assert!(registry.is_listening(ListenerKind::PointerMove, ListenerScope::Global));
        assert!(!registry.is_listening(ListenerKind::PointerMove, ListenerScope::Surface));
        assert_eq!(registry.viewport_size(), Vec2::new(10.0, 20.0));
    }
}
