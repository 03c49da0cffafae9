// Fixed-rate tick pacing

use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u64 = 60;

/// Sleeps away whatever is left of each tick's time slice.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    frame_duration: Duration,
}

impl FrameClock {
    /// A zero rate is treated as the default 60 ticks per second.
    pub fn from_fps(fps: u64) -> Self {
        let fps = if fps == 0 { DEFAULT_FPS } else { fps };
        Self {
            frame_duration: Duration::from_micros(1_000_000 / fps),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Time still to wait for a tick that started at `frame_start`
    pub fn remaining(&self, frame_start: Instant, now: Instant) -> Duration {
        self.frame_duration
            .saturating_sub(now.saturating_duration_since(frame_start))
    }

    /// Call at the end of each loop iteration. A tick that ran long is not
    /// made up for.
    ///
    /// # Example
    /// ```rust,ignore
    /// let frame_start = Instant::now();
    /// // ... tick ...
    /// clock.limit_frame_rate(frame_start);
    /// ```
    pub fn limit_frame_rate(&self, frame_start: Instant) {
        let remaining = self.remaining(frame_start, Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_fps_slice() {
        let clock = FrameClock::from_fps(60);
        assert_eq!(clock.frame_duration(), Duration::from_micros(16_666));
    }

    #[test]
    fn test_zero_fps_falls_back_to_default() {
        let clock = FrameClock::from_fps(0);
        assert_eq!(clock.frame_duration(), FrameClock::from_fps(DEFAULT_FPS).frame_duration());
    }

    #[test]
    fn test_remaining_time() {
        let clock = FrameClock::from_fps(50);
        let start = Instant::now();
        assert_eq!(
            clock.remaining(start, start + Duration::from_millis(5)),
            Duration::from_millis(15)
        );
        assert_eq!(
            clock.remaining(start, start + Duration::from_millis(40)),
            Duration::ZERO
        );
    }
}
