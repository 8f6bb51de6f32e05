//! Frame-rate bookkeeping for the panel readout.

use std::time::{Duration, Instant};

/// How often the readout refreshes.
const WINDOW: Duration = Duration::from_secs(1);

/// Counts presented frames and publishes a rate once per second.
///
/// The published value holds steady between refreshes; instantaneous
/// per-frame rates are never exposed.
pub struct FpsCounter {
    frames: u32,
    window_start: Instant,
    fps: f32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            window_start: now,
            fps: 0.0,
        }
    }

    /// Record one presented frame. Returns the freshly published rate when
    /// the one-second window rolls over.
    pub fn frame(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed >= WINDOW {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
            Some(self.fps)
        } else {
            None
        }
    }

    /// The most recently published rate, zero until the first window closes.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_until_the_window_closes() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);

        for i in 1..=10 {
            let published = counter.frame(start + Duration::from_millis(i * 50));
            assert_eq!(published, None);
        }
        assert_eq!(counter.fps(), 0.0);
    }

    #[test]
    fn publishes_once_per_second() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);

        // 59 frames inside the window, the 60th lands exactly on it.
        for i in 1..60 {
            assert_eq!(counter.frame(start + Duration::from_millis(i * 16)), None);
        }
        let published = counter.frame(start + Duration::from_secs(1));
        assert_eq!(published, Some(60.0));
        assert_eq!(counter.fps(), 60.0);

        // Window restarted; sub-second frames publish nothing but the
        // previous rate is still readable.
        assert_eq!(
            counter.frame(start + Duration::from_millis(1500)),
            None
        );
        assert_eq!(counter.fps(), 60.0);
    }

    #[test]
    fn rate_scales_with_actual_elapsed_time() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);

        for i in 1..=30 {
            counter.frame(start + Duration::from_millis(i * 66));
        }
        // 30 frames over ~1.98s is about 15 per second.
        let fps = counter.fps();
        assert!((fps - 15.0).abs() < 1.0, "got {fps}");
    }
}
