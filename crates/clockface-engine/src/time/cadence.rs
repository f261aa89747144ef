use std::time::{Duration, Instant};

/// Decides which frames carry a periodic update.
///
/// The runtime presents frames; a tick source says whether the frame presented
/// at `now` should also run the periodic work, and when it next wants a frame.
/// Hosts and tests inject their own implementation to drive updates without a
/// real display loop.
pub trait TickSource {
    /// Returns `true` if the update should run for the frame at `now`.
    fn poll(&mut self, now: Instant) -> bool;

    /// Earliest instant at which `poll` can return `true` again.
    ///
    /// `None` means "as soon as possible".
    fn next_deadline(&self) -> Option<Instant>;
}

/// Fixed-rate tick source aligned to presented frames.
///
/// Fires on the first poll, then on the first frame at or after each
/// following deadline. Deadlines advance from the previous deadline rather
/// than from the firing frame, so a late frame does not drift the cadence;
/// after a long stall the schedule restarts from the late frame instead of
/// firing a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    next: Option<Instant>,
}

impl Cadence {
    /// `interval` is clamped to at least one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self { interval: interval.max(Duration::from_millis(1)), next: None }
    }

    /// Cadence for a preferred number of updates per second (0 is treated as 1).
    pub fn per_second(frames: u32) -> Self {
        Self::new(Duration::from_secs(1) / frames.max(1))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Makes the next poll fire regardless of the schedule.
    pub fn reset(&mut self) {
        self.next = None;
    }
}

impl TickSource for Cadence {
    fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now < next => false,
            Some(next) => {
                let following = next + self.interval;
                self.next = Some(if following <= now { now + self.interval } else { following });
                true
            }
            None => {
                self.next = Some(now + self.interval);
                true
            }
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.next
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::per_second(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_on_first_poll() {
        let mut c = Cadence::default();
        assert!(c.next_deadline().is_none());
        assert!(c.poll(Instant::now()));
    }

    #[test]
    fn does_not_fire_before_interval() {
        let t0 = Instant::now();
        let mut c = Cadence::new(ms(1000));
        assert!(c.poll(t0));
        assert!(!c.poll(t0 + ms(16)));
        assert!(!c.poll(t0 + ms(999)));
        assert!(c.poll(t0 + ms(1000)));
    }

    #[test]
    fn late_frame_does_not_drift_schedule() {
        let t0 = Instant::now();
        let mut c = Cadence::new(ms(1000));
        c.poll(t0);
        assert!(c.poll(t0 + ms(1016)));
        assert_eq!(c.next_deadline(), Some(t0 + ms(2000)));
    }

    #[test]
    fn long_stall_restarts_from_late_frame() {
        let t0 = Instant::now();
        let mut c = Cadence::new(ms(1000));
        c.poll(t0);
        assert!(c.poll(t0 + ms(5500)));
        assert_eq!(c.next_deadline(), Some(t0 + ms(6500)));
        assert!(!c.poll(t0 + ms(6000)));
    }

    #[test]
    fn per_second_divides_interval() {
        assert_eq!(Cadence::per_second(1).interval(), ms(1000));
        assert_eq!(Cadence::per_second(4).interval(), ms(250));
        assert_eq!(Cadence::per_second(0).interval(), ms(1000));
    }

    #[test]
    fn reset_fires_immediately() {
        let t0 = Instant::now();
        let mut c = Cadence::new(ms(1000));
        c.poll(t0);
        c.reset();
        assert!(c.poll(t0 + ms(1)));
    }
}
