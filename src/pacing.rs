//! Fixed-cadence frame scheduling and FPS reporting.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Schedules frames on a fixed grid of deadlines
pub struct FramePacer {
    interval: Duration,
    next_deadline: Instant,
}

impl FramePacer {
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            next_deadline: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline
    }

    /// Record a frame at `now` and move the deadline to the next grid slot
    /// after it. Missed slots are skipped, not replayed.
    pub fn mark(&mut self, now: Instant) {
        self.next_deadline += self.interval;
        if self.next_deadline <= now {
            let behind = now - self.next_deadline;
            let skipped = (behind.as_nanos() / self.interval.as_nanos()) as u32 + 1;
            self.next_deadline += self.interval * skipped;
        }
    }
}

/// Rolling-average FPS over the last 60 frames, logged once per second
pub struct FpsTracker {
    frame_times: VecDeque<Duration>,
    last_frame: Instant,
    last_report: Instant,
}

impl FpsTracker {
    pub fn new(now: Instant) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(60),
            last_frame: now,
            last_report: now,
        }
    }

    pub fn record_frame(&mut self, now: Instant) {
        let frame_time = now - self.last_frame;
        self.last_frame = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 60 {
            self.frame_times.pop_front();
        }

        if now - self.last_report > Duration::from_secs(1) {
            log::debug!("FPS: {:.1}", self.current_fps());
            self.last_report = now;
        }
    }

    pub fn current_fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total.as_secs_f32() / self.frame_times.len() as f32;

        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_fps_interval() {
        let pacer = FramePacer::new(60, Instant::now());
        assert!((pacer.interval().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_deadlines_advance_on_grid() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(50, start);
        assert!(pacer.is_due(start));

        let step = Duration::from_millis(20);
        pacer.mark(start + Duration::from_millis(1));
        assert_eq!(pacer.next_deadline(), start + step);
        assert!(!pacer.is_due(start + Duration::from_millis(19)));
        assert!(pacer.is_due(start + step));
    }

    #[test]
    fn test_stall_skips_missed_frames() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(50, start);

        // 105ms stall: next slot is 120ms, not a burst of catch-up frames
        pacer.mark(start + Duration::from_millis(105));
        assert_eq!(pacer.next_deadline(), start + Duration::from_millis(120));
    }

    #[test]
    fn test_fps_average() {
        let start = Instant::now();
        let mut tracker = FpsTracker::new(start);
        assert_eq!(tracker.current_fps(), 0.0);

        for i in 1..=30 {
            tracker.record_frame(start + Duration::from_millis(20 * i));
        }
        assert!((tracker.current_fps() - 50.0).abs() < 0.5);
    }
}
