//! Input handling: event types, gesture classification, and the input
//! surface contract the controller listens on.

/// Platform-agnostic input events.
pub mod event;
/// Exclusive gesture classification.
pub mod gesture;
/// Listener registration and viewport extent.
pub mod surface;
/// Converts winit window events into [`InputEvent`]s.
#[cfg(feature = "winit")]
pub mod winit_adapter;

pub use event::{InputEvent, KeyAction, Modifiers, MouseButton};
pub use gesture::{Capabilities, InteractionState};
pub use surface::{
    InputSurface, ListenerId, ListenerKind, ListenerRegistry, ListenerScope,
    OwnerId, SharedSurface,
};
#[cfg(feature = "winit")]
pub use winit_adapter::WinitInputAdapter;
