//! Frame pacing for the render loop.

use std::time::{Duration, Instant};

/// Schedules redraws at a fixed target rate.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    fn starting_at(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            next: now,
        }
    }

    /// Returns true when a frame is due and schedules the next one.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        // Skip missed frames instead of bursting to catch up
        if self.next < now {
            self.next = now + self.interval;
        }
        true
    }

    /// How long the event loop may block before the next frame is due.
    pub fn timeout(&self) -> Duration {
        self.timeout_at(Instant::now())
    }

    fn timeout_at(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_fps() {
        assert_eq!(FrameClock::new(50).interval, Duration::from_millis(20));
        assert_eq!(FrameClock::new(0).interval, Duration::from_secs(1));
    }

    #[test]
    fn test_tick_once_per_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(10, start);
        assert!(clock.tick_at(start));
        assert!(!clock.tick_at(start + Duration::from_millis(50)));
        assert_eq!(
            clock.timeout_at(start + Duration::from_millis(50)),
            Duration::from_millis(50)
        );
        assert!(clock.tick_at(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_missed_frames_are_skipped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(10, start);
        assert!(clock.tick_at(start));
        let late = start + Duration::from_secs(2);
        assert!(clock.tick_at(late));
        assert!(!clock.tick_at(late + Duration::from_millis(10)));
        assert_eq!(clock.timeout_at(late), Duration::from_millis(100));
    }
}
