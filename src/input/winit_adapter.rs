use glam::Vec2;
use rustc_hash::FxHashMap;
use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::event::{InputEvent, Modifiers};

/// Pixels per scroll line when a wheel reports line deltas.
const LINE_HEIGHT: f32 = 40.0;

/// Translates winit window events into [`InputEvent`]s.
///
/// winit reports pointer buttons without a position and touches one
/// finger at a time, so the adapter remembers the cursor, the modifier
/// state and every active touch.
#[derive(Debug, Default)]
pub struct WinitInputAdapter {
    cursor: Vec2,
    modifiers: Modifiers,
    touches: FxHashMap<u64, Vec2>,
    order: Vec<u64>,
}

impl WinitInputAdapter {
    /// Create an adapter with no active touches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event. Returns `None` for events the
    /// controller does not consume.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(InputEvent::PointerMove {
                    x: self.cursor.x,
                    y: self.cursor.y,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => Some(InputEvent::PointerDown {
                    button: (*button).into(),
                    x: self.cursor.x,
                    y: self.cursor.y,
                    modifiers: self.modifiers,
                }),
                ElementState::Released => Some(InputEvent::PointerUp {
                    x: self.cursor.x,
                    y: self.cursor.y,
                }),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling away from the user as positive
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32),
                };
                Some(InputEvent::Wheel { delta })
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.modifiers = Modifiers {
                    shift: state.shift_key(),
                    ctrl: state.control_key(),
                    alt: state.alt_key(),
                    meta: state.super_key(),
                };
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return None;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                Some(InputEvent::KeyDown {
                    key: format!("{code:?}"),
                    modifiers: self.modifiers,
                })
            }
            WindowEvent::Touch(touch) => {
                let point =
                    Vec2::new(touch.location.x as f32, touch.location.y as f32);
                Some(self.track_touch(touch.id, touch.phase, point))
            }
            _ => None,
        }
    }

    fn track_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        point: Vec2,
    ) -> InputEvent {
        match phase {
            TouchPhase::Started => {
                if self.touches.insert(id, point).is_none() {
                    self.order.push(id);
                }
                InputEvent::TouchStart {
                    touches: self.active_touches(),
                }
            }
            TouchPhase::Moved => {
                if let Some(p) = self.touches.get_mut(&id) {
                    *p = point;
                }
                InputEvent::TouchMove {
                    touches: self.active_touches(),
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let _ = self.touches.remove(&id);
                self.order.retain(|t| *t != id);
                InputEvent::TouchEnd {
                    touches: self.active_touches(),
                }
            }
        }
    }

    /// Active touches in the order the fingers went down.
    fn active_touches(&self) -> Vec<Vec2> {
        self.order
            .iter()
            .filter_map(|id| self.touches.get(id).copied())
            .collect()
    }
}
