//! Fixed-step frame clock
//!
//! Maps wall-clock frame timestamps onto whole simulation ticks. A long gap
//! (tab in the background, debugger pause) is clamped so resuming never
//! runs a burst of catch-up ticks.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp; the next frame accounts for no time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }

    /// Feed a frame timestamp in seconds, get the number of ticks to run
    pub fn advance(&mut self, now: f64) -> u32 {
        let Some(last) = self.last_time.replace(now) else {
            return 0;
        };

        let dt = ((now - last) as f32).clamp(0.0, MAX_FRAME_TIME);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Running behind; drop the backlog instead of carrying it
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_nothing() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12.0), 0);
    }

    #[test]
    fn test_sixty_hz_is_one_tick_per_frame() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let mut total = 0;
        for frame in 1..=120 {
            total += clock.advance(frame as f64 / 60.0 + 1e-6);
        }
        assert!((119..=120).contains(&total), "ran {total} ticks");
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(30.0), MAX_SUBSTEPS);
        // Backlog was dropped
        assert!(clock.advance(30.0) <= 1);
    }

    #[test]
    fn test_reset_after_resume() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(0.5);
        clock.reset();
        assert_eq!(clock.advance(100.0), 0);
    }
}
