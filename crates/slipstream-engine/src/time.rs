//! Frame timing for the race loop.

use std::time::{Duration, Instant};

/// Timing snapshot for one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous frame, stall-capped.
    pub dt: f32,

    /// Seconds since the clock started or was last reset.
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Produces the per-frame `dt` that everything integrating over time consumes:
/// road scroll, steering, boost decay.
///
/// A stall (debugger pause, window drag, minimized game) would otherwise
/// deliver one giant `dt`, teleporting the road and draining a boost in a
/// single frame. Steps are capped at `max_step` so the race resumes smoothly
/// instead.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f32,
    frame_index: u64,
    max_step: Duration,
}

impl FrameClock {
    /// Default cap is 100ms: generous for a frame hitch, far below any real
    /// stall.
    pub fn new() -> Self {
        Self::with_max_step(Duration::from_millis(100))
    }

    pub fn with_max_step(max_step: Duration) -> Self {
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            max_step,
        }
    }

    /// Restarts timing from now; elapsed time and the frame counter reset too.
    ///
    /// Called at race start and after long suspensions.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.elapsed = 0.0;
        self.frame_index = 0;
    }

    /// Advances the clock and returns this frame's timing.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let step = now.saturating_duration_since(self.last).min(self.max_step);
        self.last = now;

        self.elapsed += step.as_secs_f32();

        let ft = FrameTime {
            dt: step.as_secs_f32(),
            elapsed: self.elapsed,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_up() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn dt_never_exceeds_max_step() {
        // With a zero cap every tick reports zero dt, however much real time
        // passed between calls.
        let mut clock = FrameClock::with_max_step(Duration::ZERO);
        assert_eq!(clock.tick().dt, 0.0);
        assert_eq!(clock.tick().dt, 0.0);
    }

    #[test]
    fn elapsed_accumulates_dt() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        let second = clock.tick();
        assert!((second.elapsed - (first.elapsed + second.dt)).abs() < 1e-6);
    }

    #[test]
    fn reset_restarts_elapsed_and_counter() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.tick();

        clock.reset();
        let ft = clock.tick();
        assert_eq!(ft.frame_index, 0);
        // One capped step at most can have elapsed since the reset.
        assert!(ft.elapsed <= 0.1 + 1e-6);
    }
}
