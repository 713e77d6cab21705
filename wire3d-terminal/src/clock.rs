/// Sleep-based frame pacing
use std::time::{Duration, Instant};
use wire3d_core::FrameClock;

/// Caps the loop rate by sleeping out the rest of each frame.
pub struct SleepClock {
    last_tick: Instant,
}

impl SleepClock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }
}

impl Default for SleepClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SleepClock {
    fn tick(&mut self, target_fps: u32) -> f64 {
        let target_frame_time = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let elapsed = self.last_tick.elapsed();
        if elapsed < target_frame_time {
            std::thread::sleep(target_frame_time - elapsed);
        }

        let now = Instant::now();
        let frame_time = now - self.last_tick;
        self.last_tick = now;
        frame_time.as_secs_f64() * 1000.0
    }
}
