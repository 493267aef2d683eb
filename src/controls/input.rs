//! Input dispatch for [`OrbitControls`].
//!
//! Handlers classify presses into an [`InteractionState`] and turn moves
//! into rotate/dolly/pan deltas. They never write the camera pose; that
//! happens in `update`.

use std::f32::consts::TAU;

use glam::Vec2;

use super::{Momentum, OrbitControls};
use crate::error::OrbitError;
use crate::events::ControlEvent;
use crate::input::gesture::{classify_pointer, classify_touches, TouchSpan};
use crate::input::{
    InputEvent, InteractionState, KeyAction, ListenerKind, Modifiers,
    MouseButton,
};

/// Start points and last deltas of the gesture in progress.
#[derive(Debug, Default)]
pub(super) struct GestureTracker {
    pub(super) state: InteractionState,
    rotate_start: Vec2,
    /// Last rotate step, scaled by rotate speed. Becomes momentum on
    /// release.
    rotate_delta: Vec2,
    pan_start: Vec2,
    dolly_start: Vec2,
    /// Finger distance at the previous pinch step.
    pinch_start: f32,
    /// Whether the current pointer pan follows the camera's up axis.
    screen_space: bool,
}

/// Failed delta operations on the input path are already reported by the
/// transform layer; the event is simply dropped.
fn log_dropped(result: Result<(), OrbitError>) {
    if let Err(e) = result {
        log::debug!("input ignored: {e}");
    }
}

// ── Unified input handler ──

impl OrbitControls {
    /// Process a platform-agnostic input event.
    ///
    /// Events of a kind the controller is not currently listening for are
    /// ignored, as is everything while disabled or disposed. Returns
    /// `true` if the event was consumed (the host should suppress its
    /// default action).
    ///
    /// # Example
    ///
    /// ```ignore
    /// controls.handle_event(&InputEvent::Wheel { delta: -1.0 });
    /// controls.update(dt);
    /// ```
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if self.disposed || !self.enabled || !self.is_listening(event.kind()) {
            return false;
        }
        match event {
            InputEvent::PointerDown {
                button,
                x,
                y,
                modifiers,
            } => self.on_pointer_down(*button, Vec2::new(*x, *y), *modifiers),
            InputEvent::PointerMove { x, y } => {
                self.on_pointer_move(Vec2::new(*x, *y))
            }
            InputEvent::PointerUp { .. } => self.on_pointer_up(),
            InputEvent::Wheel { delta } => self.on_wheel(*delta),
            InputEvent::TouchStart { touches } => self.on_touch_start(touches),
            InputEvent::TouchMove { touches } => self.on_touch_move(touches),
            InputEvent::TouchEnd { touches } => self.on_touch_end(touches),
            InputEvent::KeyDown { key, modifiers } => {
                self.on_key_down(key, *modifiers)
            }
            InputEvent::ContextMenu => true,
        }
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        match kind {
            ListenerKind::PointerMove | ListenerKind::PointerUp => {
                !self.drag_listeners.is_empty()
            }
            _ => !self.listeners.is_empty(),
        }
    }
}

// ── Pointer ──

impl OrbitControls {
    fn on_pointer_down(
        &mut self,
        button: MouseButton,
        point: Vec2,
        modifiers: Modifiers,
    ) -> bool {
        if self.gesture.state.is_active() || !point.is_finite() {
            return false;
        }
        let Some(gesture) = classify_pointer(
            button,
            modifiers,
            self.options.interaction.capabilities(),
        ) else {
            return false;
        };

        let tracker = &mut self.gesture;
        tracker.rotate_start = point;
        tracker.rotate_delta = Vec2::ZERO;
        tracker.dolly_start = point;
        tracker.pan_start = point;
        tracker.screen_space = gesture.screen_space;

        if let Err(e) = self.start_drag() {
            log::warn!("cannot track pointer drag: {e}");
            return false;
        }
        self.momentum.stop();
        self.set_state(gesture.state);
        true
    }

    fn on_pointer_move(&mut self, point: Vec2) -> bool {
        if !point.is_finite() {
            return false;
        }
        match self.gesture.state {
            InteractionState::Rotate => self.rotate_drag(point),
            InteractionState::Dolly => {
                let dy = point.y - self.gesture.dolly_start.y;
                let scale = self.options.interaction.zoom_scale();
                if dy > 0.0 {
                    log_dropped(self.dolly_out(scale));
                } else if dy < 0.0 {
                    log_dropped(self.dolly_in(scale));
                }
                self.gesture.dolly_start = point;
            }
            InteractionState::Pan => {
                let delta = (point - self.gesture.pan_start)
                    * self.options.interaction.pan_speed;
                let screen_space = self.gesture.screen_space;
                log_dropped(self.pan(delta.x, delta.y, screen_space));
                self.gesture.pan_start = point;
            }
            _ => return false,
        }
        true
    }

    fn on_pointer_up(&mut self) -> bool {
        if !self.gesture.state.is_pointer() {
            return false;
        }
        self.release_momentum();
        self.end_drag();
        self.set_state(InteractionState::None);
        true
    }

    fn on_wheel(&mut self, delta: f32) -> bool {
        let state = self.gesture.state;
        if !self.options.interaction.enable_zoom
            || !matches!(state, InteractionState::None | InteractionState::Rotate)
            || !delta.is_finite()
            || delta == 0.0
        {
            return false;
        }
        self.notifier.emit(ControlEvent::Start);
        let scale = self.options.interaction.zoom_scale();
        if delta < 0.0 {
            log_dropped(self.dolly_in(scale));
        } else {
            log_dropped(self.dolly_out(scale));
        }
        self.notifier.emit(ControlEvent::End);
        true
    }

    /// Shared by pointer and touch rotation.
    fn rotate_drag(&mut self, point: Vec2) {
        let delta = (point - self.gesture.rotate_start)
            * self.options.interaction.rotate_speed;
        self.gesture.rotate_delta = delta;
        self.gesture.rotate_start = point;
        let Some(viewport) = self.viewport_size() else {
            return;
        };
        if viewport.y <= 0.0 {
            return;
        }
        // Both axes scale by height so a full-height drag is one turn.
        self.rotate_left(TAU * delta.x / viewport.y);
        self.rotate_up(TAU * delta.y / viewport.y);
    }

    /// Turn the last rotate step into momentum when a rotation ends.
    fn release_momentum(&mut self) {
        let motion = &self.options.motion;
        if self.gesture.state.is_rotation()
            && motion.enable_momentum
            && self.gesture.rotate_delta.length_squared() > Momentum::EPSILON
        {
            self.momentum
                .capture(self.gesture.rotate_delta, motion.momentum_scaling_factor);
        }
    }
}

// ── Touch ──

impl OrbitControls {
    fn on_touch_start(&mut self, touches: &[Vec2]) -> bool {
        if self.gesture.state.is_pointer()
            || touches.iter().any(|t| !t.is_finite())
        {
            return false;
        }
        if !self.gesture.state.is_active() {
            self.momentum.stop();
        }
        self.classify_touch_gesture(touches)
    }

    fn on_touch_move(&mut self, touches: &[Vec2]) -> bool {
        if touches.iter().any(|t| !t.is_finite()) {
            return false;
        }
        match self.gesture.state {
            InteractionState::TouchRotate => {
                let Some(&first) = touches.first() else {
                    return false;
                };
                self.rotate_drag(first);
                true
            }
            InteractionState::TouchDollyPan => {
                let Some(span) = TouchSpan::of(touches) else {
                    return false;
                };
                self.pinch(span);
                true
            }
            _ => false,
        }
    }

    /// Lifting a finger reclassifies on the remaining touches, including
    /// from `None` (four fingers down to three resumes rotating).
    fn on_touch_end(&mut self, touches: &[Vec2]) -> bool {
        let was_touch = self.gesture.state.is_touch();
        if self.gesture.state.is_pointer() {
            return false;
        }
        if touches.is_empty() || touches.iter().any(|t| !t.is_finite()) {
            if !was_touch {
                return false;
            }
            self.release_momentum();
            self.set_state(InteractionState::None);
            return true;
        }
        self.classify_touch_gesture(touches) || was_touch
    }

    /// Pick the touch gesture for the current finger count and record its
    /// start points.
    fn classify_touch_gesture(&mut self, touches: &[Vec2]) -> bool {
        let mut state = classify_touches(
            touches.len(),
            self.options.interaction.capabilities(),
        );
        match state {
            InteractionState::TouchRotate => {
                if let Some(&first) = touches.first() {
                    self.gesture.rotate_start = first;
                    self.gesture.rotate_delta = Vec2::ZERO;
                }
            }
            InteractionState::TouchDollyPan => match TouchSpan::of(touches) {
                Some(span) => {
                    self.gesture.pinch_start = span.distance;
                    self.gesture.pan_start = span.midpoint;
                }
                None => state = InteractionState::None,
            },
            _ => {}
        }
        self.set_state(state);
        state.is_active()
    }

    /// Pinch distance drives dolly and the midpoint drives pan, from the
    /// same two fingers.
    fn pinch(&mut self, span: TouchSpan) {
        let interaction = &self.options.interaction;
        let (zoom, pan) = (interaction.enable_zoom, interaction.enable_pan);
        let (zoom_speed, pan_speed) = (interaction.zoom_speed, interaction.pan_speed);
        let screen_space = interaction.screen_space_panning;

        if zoom && self.gesture.pinch_start > 0.0 {
            let ratio = (span.distance / self.gesture.pinch_start).powf(zoom_speed);
            if ratio > 1.0 {
                log_dropped(self.dolly_out(ratio.recip()));
            } else if ratio < 1.0 {
                log_dropped(self.dolly_in(ratio));
            }
        }
        self.gesture.pinch_start = span.distance;

        if pan {
            let delta = (span.midpoint - self.gesture.pan_start) * pan_speed;
            log_dropped(self.pan(delta.x, delta.y, screen_space));
        }
        self.gesture.pan_start = span.midpoint;
    }
}

// ── Keyboard ──

impl OrbitControls {
    fn on_key_down(&mut self, key: &str, modifiers: Modifiers) -> bool {
        let interaction = &self.options.interaction;
        if !interaction.enable_keys {
            return false;
        }
        let Some(action) = self.options.keybindings.lookup(key) else {
            return false;
        };
        let angle = interaction.key_rotate_angle;
        let step = interaction.key_pan_speed;
        let screen_space = interaction.screen_space_panning;
        let (rotate, zoom, pan) = (
            interaction.enable_rotate,
            interaction.enable_zoom,
            interaction.enable_pan,
        );

        if modifiers.shift {
            if !zoom {
                return false;
            }
            let scale = interaction.zoom_scale();
            match action {
                KeyAction::Up => log_dropped(self.dolly_in(scale)),
                KeyAction::Down => log_dropped(self.dolly_out(scale)),
                KeyAction::Left | KeyAction::Right => return false,
            }
        } else if modifiers.ctrl || modifiers.meta {
            if !rotate {
                return false;
            }
            match action {
                KeyAction::Up => self.rotate_up(-angle),
                KeyAction::Down => self.rotate_up(angle),
                KeyAction::Left => self.rotate_left(-angle),
                KeyAction::Right => self.rotate_left(angle),
            }
        } else {
            if !pan {
                return false;
            }
            let (dx, dy) = match action {
                KeyAction::Up => (0.0, step),
                KeyAction::Down => (0.0, -step),
                KeyAction::Left => (step, 0.0),
                KeyAction::Right => (-step, 0.0),
            };
            log_dropped(self.pan(dx, dy, screen_space));
        }
        true
    }
}
