//! Frame clock for hosts that do not measure their own frame delta.

use web_time::{Duration, Instant};

/// Longest frame step handed to the integrator. Larger gaps (a suspended
/// tab, a debugger pause) are clamped so smoothing does not jump.
const MAX_STEP: Duration = Duration::from_millis(250);

/// Frame clock for hosts that do not supply their own `deltaTime`.
///
/// Tracks the time since the previous tick plus a smoothed FPS.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Last tick timestamp
    last_tick: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Clock whose first tick is measured from now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Clock whose first tick is measured from `start`.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_tick: start,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Seconds since the previous tick, measured now.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Seconds since the previous tick, measured at `now`.
    ///
    /// A `now` earlier than the previous tick yields `0.0`.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed.min(MAX_STEP).as_secs_f32()
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_elapsed_seconds() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
        let dt = clock.tick_at(start + Duration::from_millis(32));
        assert!((dt - 0.016).abs() < 1e-6);
        assert!(clock.fps() > 60.0);
    }

    #[test]
    fn long_gaps_are_clamped_and_time_never_runs_backwards() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start + Duration::from_secs(1));
        assert_eq!(clock.tick_at(start), 0.0);
        let dt = clock.tick_at(start + Duration::from_secs(10));
        assert_eq!(dt, MAX_STEP.as_secs_f32());
    }
}
