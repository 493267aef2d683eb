//! Programmatic eased transitions that bypass the delta model.
//!
//! Each [`OrbitControls::animate_to`] call starts a new generation. Frames
//! are requested by queueing the generation; a frame whose generation is
//! no longer current is dropped without touching the camera, so a newer
//! call always wins outright.

use std::rc::Rc;

use glam::Vec3;
use web_time::{Duration, Instant};

use super::{Deltas, OrbitControls};
use crate::events::ControlEvent;

/// One eased move of the camera position and orbit target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTask {
    /// Camera position when the task started.
    pub start_position: Vec3,
    /// Orbit target when the task started.
    pub start_target: Vec3,
    /// Destination camera position.
    pub final_position: Vec3,
    /// Destination orbit target.
    pub final_target: Vec3,
    /// When the task started.
    pub start_time: Instant,
    /// Total length of the transition.
    pub duration: Duration,
    /// Token compared on every frame; stale tasks exit without effect.
    pub generation: u64,
}

impl AnimationTask {
    /// Normalized progress (0.0 to 1.0) at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Position and target at eased progress `eased`. Lands exactly on
    /// the destination once `eased` reaches 1.
    #[must_use]
    pub fn pose_at(&self, eased: f32) -> (Vec3, Vec3) {
        if eased >= 1.0 {
            return (self.final_position, self.final_target);
        }
        (
            self.start_position.lerp(self.final_position, eased),
            self.start_target.lerp(self.final_target, eased),
        )
    }
}

/// Generation counter plus the frames the host still owes the current
/// task.
#[derive(Debug, Default)]
pub(super) struct Sequencer {
    pub(super) task: Option<AnimationTask>,
    generation: u64,
    /// Generations waiting for their next frame, oldest first.
    pub(super) frame_queue: Vec<u64>,
    /// Set when a frame arrived while the controller was disabled.
    pub(super) parked: bool,
    /// Whether the current task was started on an enabled controller.
    /// Such a task aborts on a disabled wake instead of parking.
    started_enabled: bool,
}

impl Sequencer {
    fn begin(&mut self, task: AnimationTask, enabled: bool) -> u64 {
        self.generation += 1;
        self.task = Some(AnimationTask {
            generation: self.generation,
            ..task
        });
        self.parked = false;
        self.started_enabled = enabled;
        self.frame_queue.push(self.generation);
        self.generation
    }

    /// Invalidate the current task. Queued frames go stale.
    pub(super) fn cancel(&mut self) {
        self.generation += 1;
        self.task = None;
        self.parked = false;
    }

    pub(super) fn is_animating(&self) -> bool {
        self.task.is_some()
    }

    /// Re-request a frame for a task parked while disabled.
    pub(super) fn resume(&mut self) {
        if !self.parked {
            return;
        }
        self.parked = false;
        if let Some(task) = self.task {
            self.frame_queue.push(task.generation);
        }
    }

    fn current(&self, generation: u64) -> Option<AnimationTask> {
        self.task.filter(|task| task.generation == generation)
    }
}

impl OrbitControls {
    /// Move the camera to `position`, looking at `target`, over
    /// `duration`.
    ///
    /// Supersedes any running transition. Pending deltas and momentum are
    /// dropped and `Start` is emitted. The host drives the transition by
    /// calling [`run_animation_frame`](Self::run_animation_frame) every
    /// frame while [`has_pending_frame`](Self::has_pending_frame) is true.
    pub fn animate_to(&mut self, position: Vec3, target: Vec3, duration: Duration) {
        self.animate_to_at(position, target, duration, Instant::now());
    }

    /// [`animate_to`](Self::animate_to) using the configured duration.
    pub fn animate_to_default(&mut self, position: Vec3, target: Vec3) {
        let duration =
            Duration::from_millis(self.options.motion.animation_duration_ms);
        self.animate_to(position, target, duration);
    }

    /// [`animate_to`](Self::animate_to) with an explicit start time, for
    /// hosts that drive their own clock.
    pub fn animate_to_at(
        &mut self,
        position: Vec3,
        target: Vec3,
        duration: Duration,
        now: Instant,
    ) {
        if self.disposed {
            return;
        }
        if !position.is_finite() || !target.is_finite() {
            log::warn!("non-finite animation destination ignored");
            return;
        }
        let start_position = match self.camera.try_borrow() {
            Ok(cam) => cam.position(),
            Err(_) => {
                log::warn!("camera handle is borrowed, animation not started");
                return;
            }
        };

        let task = AnimationTask {
            start_position,
            start_target: self.target,
            final_position: position,
            final_target: target,
            start_time: now,
            duration,
            generation: 0,
        };
        let generation = self.sequencer.begin(task, self.enabled);
        self.deltas = Deltas::default();
        self.momentum.stop();
        log::debug!("animation {generation} started ({duration:?})");
        self.notifier.emit(ControlEvent::Start);
    }

    /// Run every queued animation frame at time `now`.
    ///
    /// Returns `true` if the camera pose was written. Frames belonging to
    /// a superseded transition are dropped. A frame arriving while the
    /// controller is disabled aborts a transition started while enabled;
    /// one started while already disabled parks until re-enabled.
    pub fn run_animation_frame(&mut self, now: Instant) -> bool {
        if self.disposed {
            return false;
        }
        let queued = std::mem::take(&mut self.sequencer.frame_queue);
        let mut wrote = false;
        for generation in queued {
            wrote |= self.animation_tick(generation, now);
        }
        wrote
    }

    fn animation_tick(&mut self, generation: u64, now: Instant) -> bool {
        let Some(task) = self.sequencer.current(generation) else {
            log::debug!("stale animation frame {generation} dropped");
            return false;
        };
        if !self.enabled {
            if self.sequencer.started_enabled {
                log::debug!(
                    "controller disabled, animation {generation} aborted"
                );
                self.sequencer.cancel();
            } else {
                log::debug!(
                    "controller disabled, animation {generation} parked"
                );
                self.sequencer.parked = true;
            }
            return false;
        }
        let camera = Rc::clone(&self.camera);
        let Ok(mut cam) = camera.try_borrow_mut() else {
            log::warn!("camera handle is borrowed, animation frame deferred");
            self.sequencer.frame_queue.push(generation);
            return false;
        };

        let t = task.progress(now);
        let eased = self.options.motion.animation_easing.evaluate(t);
        let (position, target) = task.pose_at(eased);
        cam.set_position(position);
        cam.look_at(target);
        let orientation = cam.orientation();
        drop(cam);

        self.target = target;
        self.spherical = self.basis.to_spherical(position - target);
        self.last_position = position;
        self.last_orientation = orientation;
        self.notifier.emit(ControlEvent::Change);

        if t < 1.0 {
            self.sequencer.frame_queue.push(generation);
        } else {
            self.sequencer.task = None;
            self.deltas = Deltas::default();
            log::debug!("animation {generation} finished");
            self.notifier.emit(ControlEvent::End);
        }
        true
    }

    /// Whether a transition owns the camera pose (including one parked
    /// because it was requested while disabled).
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.sequencer.is_animating()
    }

    /// Whether [`run_animation_frame`](Self::run_animation_frame) has
    /// work to do.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        !self.sequencer.frame_queue.is_empty()
    }

    /// The running transition, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&AnimationTask> {
        self.sequencer.task.as_ref()
    }
}
