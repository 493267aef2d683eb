//! Exclusive gesture classification.
//!
//! Pure functions only: they decide which [`InteractionState`] a raw
//! press or touch change selects. The controller owns the state itself.

use glam::Vec2;

use super::event::{Modifiers, MouseButton};

/// The one interaction currently driving the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    None,
    /// Pointer drag orbiting around the target.
    Rotate,
    /// Pointer drag dollying toward/away from the target.
    Dolly,
    /// Pointer drag panning the target.
    Pan,
    /// One- (or three-) finger orbit.
    TouchRotate,
    /// Two-finger pinch-dolly plus midpoint pan.
    TouchDollyPan,
}

impl InteractionState {
    /// Whether any gesture is in progress.
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// Whether the gesture orbits the camera (and can leave momentum).
    #[must_use]
    pub fn is_rotation(self) -> bool {
        matches!(self, Self::Rotate | Self::TouchRotate)
    }

    /// Whether the gesture is driven by a pointer drag.
    #[must_use]
    pub fn is_pointer(self) -> bool {
        matches!(self, Self::Rotate | Self::Dolly | Self::Pan)
    }

    /// Whether the gesture is driven by touches.
    #[must_use]
    pub fn is_touch(self) -> bool {
        matches!(self, Self::TouchRotate | Self::TouchDollyPan)
    }
}

/// Which interactions the configuration currently allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Orbiting allowed.
    pub rotate: bool,
    /// Dolly/zoom allowed.
    pub zoom: bool,
    /// Panning allowed.
    pub pan: bool,
}

/// Outcome of classifying a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerGesture {
    /// Selected state.
    pub state: InteractionState,
    /// Whether a pan should follow the camera's local up axis.
    pub screen_space: bool,
}

/// Classify a pointer press.
///
/// Returns `None` when the button is unknown or its interaction is disabled;
/// the caller then leaves its state untouched.
#[must_use]
pub fn classify_pointer(
    button: MouseButton,
    modifiers: Modifiers,
    caps: Capabilities,
) -> Option<PointerGesture> {
    match button {
        MouseButton::Left if modifiers.ctrl || modifiers.meta || modifiers.shift => {
            caps.pan.then_some(PointerGesture {
                state: InteractionState::Pan,
                screen_space: modifiers.shift,
            })
        }
        MouseButton::Left => caps.rotate.then_some(PointerGesture {
            state: InteractionState::Rotate,
            screen_space: false,
        }),
        MouseButton::Middle => caps.zoom.then_some(PointerGesture {
            state: InteractionState::Dolly,
            screen_space: false,
        }),
        MouseButton::Right => caps.pan.then_some(PointerGesture {
            state: InteractionState::Pan,
            screen_space: true,
        }),
        MouseButton::Other(_) => None,
    }
}

/// Classify the set of active touches.
#[must_use]
pub fn classify_touches(count: usize, caps: Capabilities) -> InteractionState {
    match count {
        1 | 3 if caps.rotate => InteractionState::TouchRotate,
        2 if caps.zoom || caps.pan => InteractionState::TouchDollyPan,
        _ => InteractionState::None,
    }
}

/// Distance and midpoint of the first two touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSpan {
    /// Distance between the two fingers in pixels.
    pub distance: f32,
    /// Midpoint between the two fingers.
    pub midpoint: Vec2,
}

impl TouchSpan {
    /// Span of the first two touches, or `None` with fewer than two or
    /// non-finite coordinates.
    #[must_use]
    pub fn of(touches: &[Vec2]) -> Option<Self> {
        let [a, b, ..] = touches else {
            return None;
        };
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self {
            distance: a.distance(*b),
            midpoint: (*a + *b) * 0.5,
        })
    }
}
