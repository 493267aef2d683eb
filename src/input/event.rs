use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::surface::ListenerKind;

/// Platform-agnostic input events.
///
/// These are fed into
/// [`OrbitControls::handle_event`](crate::OrbitControls::handle_event),
/// which classifies them into an
/// [`InteractionState`](super::InteractionState) and mutates the pending
/// camera deltas.
///
/// # Example
///
/// ```ignore
/// let consumed = controls.handle_event(&InputEvent::PointerDown {
///     button: MouseButton::Left,
///     x: 100.0,
///     y: 200.0,
///     modifiers: Modifiers::default(),
/// });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer button pressed on the surface.
    PointerDown {
        /// Which button changed.
        button: MouseButton,
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
        /// Modifier keys held at press time.
        modifiers: Modifiers,
    },
    /// Pointer moved (observed globally while a drag is active).
    PointerMove {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Pointer button released (observed globally while a drag is active).
    PointerUp {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Scroll wheel. Negative values scroll up and dolly in.
    Wheel {
        /// Vertical scroll amount.
        delta: f32,
    },
    /// One or more fingers touched the surface.
    TouchStart {
        /// Every active touch point after the change.
        touches: Vec<Vec2>,
    },
    /// Active fingers moved.
    TouchMove {
        /// Every active touch point.
        touches: Vec<Vec2>,
    },
    /// One or more fingers lifted.
    TouchEnd {
        /// Touch points still active after the change.
        touches: Vec<Vec2>,
    },
    /// Key pressed.
    KeyDown {
        /// Physical key string, e.g. `"ArrowLeft"`.
        key: String,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// Context menu requested (suppressed while the controller is enabled).
    ContextMenu,
}

impl InputEvent {
    /// Listener kind this event is delivered through.
    #[must_use]
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::PointerDown { .. } => ListenerKind::PointerDown,
            Self::PointerMove { .. } => ListenerKind::PointerMove,
            Self::PointerUp { .. } => ListenerKind::PointerUp,
            Self::Wheel { .. } => ListenerKind::Wheel,
            Self::TouchStart { .. } => ListenerKind::TouchStart,
            Self::TouchMove { .. } => ListenerKind::TouchMove,
            Self::TouchEnd { .. } => ListenerKind::TouchEnd,
            Self::KeyDown { .. } => ListenerKind::KeyDown,
            Self::ContextMenu => ListenerKind::ContextMenu,
        }
    }
}

/// Keyboard actions the controller understands.
///
/// Bound to key strings via
/// [`KeybindingOptions`](crate::options::KeybindingOptions):
///
/// ```toml
/// [keybindings.bindings]
/// up = "KeyW"
/// left = "KeyA"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Pan up, orbit up with ctrl, dolly in with shift.
    Up,
    /// Pan down, orbit down with ctrl, dolly out with shift.
    Down,
    /// Pan left, orbit left with ctrl.
    Left,
    /// Pan right, orbit right with ctrl.
    Right,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Any other button; ignored by the controller.
    Other(u16),
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Shift key.
    pub shift: bool,
    /// Control key.
    pub ctrl: bool,
    /// Alt / option key.
    pub alt: bool,
    /// Meta / command / super key.
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Only control held.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };
}

#[cfg(feature = "winit")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            winit::event::MouseButton::Back => Self::Other(3),
            winit::event::MouseButton::Forward => Self::Other(4),
            winit::event::MouseButton::Other(n) => Self::Other(n),
        }
    }
}
