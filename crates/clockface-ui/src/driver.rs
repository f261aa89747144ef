use std::time::Instant;

use clockface_engine::time::{Cadence, TickSource};

use crate::face::ClockFace;
use crate::time_source::{TimeSource, WallClock};

/// Feeds time readings into a [`ClockFace`] at the pace of a [`TickSource`].
///
/// A reading is taken on construction so the first frame is never stale.
/// Dropping the driver stops the updates.
pub struct ClockDriver<S = WallClock, K = Cadence> {
    face: ClockFace,
    source: S,
    ticks: K,
}

impl<S: TimeSource, K: TickSource> ClockDriver<S, K> {
    pub fn new(mut face: ClockFace, mut source: S, ticks: K) -> Self {
        face.set_clock_time(source.now());
        Self { face, source, ticks }
    }

    /// Polls the tick source for the frame at `now` and, when it fires, reads
    /// the time source into the face. Returns whether the face was updated.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.ticks.poll(now) {
            return false;
        }
        let time = self.source.now();
        self.face.set_clock_time(time);
        log::trace!("clock tick: {time}");
        true
    }

    /// When the next update is due; `None` means every frame.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticks.next_deadline()
    }

    #[inline]
    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    #[inline]
    pub fn face_mut(&mut self) -> &mut ClockFace {
        &mut self.face
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::time_source::ClockTime;

    /// Advances one second per reading.
    struct SteppingClock {
        next: ClockTime,
        reads: u32,
    }

    impl SteppingClock {
        fn starting_at(t: ClockTime) -> Self {
            Self { next: t, reads: 0 }
        }
    }

    impl TimeSource for SteppingClock {
        fn now(&mut self) -> ClockTime {
            let t = self.next;
            self.next = ClockTime::new(t.hours, t.minutes, (t.seconds + 1) % 60);
            self.reads += 1;
            t
        }
    }

    /// Fires on every poll.
    struct EveryFrame;

    impl TickSource for EveryFrame {
        fn poll(&mut self, _now: Instant) -> bool {
            true
        }

        fn next_deadline(&self) -> Option<Instant> {
            None
        }
    }

    #[test]
    fn construction_takes_a_first_reading() {
        let driver = ClockDriver::new(
            ClockFace::new(),
            SteppingClock::starting_at(ClockTime::new(10, 8, 42)),
            Cadence::default(),
        );
        assert_eq!(driver.face().clock_time(), ClockTime::new(10, 8, 42));
        assert_eq!(driver.source.reads, 1);
    }

    #[test]
    fn updates_follow_the_cadence() {
        let t0 = Instant::now();
        let mut driver = ClockDriver::new(
            ClockFace::new(),
            SteppingClock::starting_at(ClockTime::new(3, 0, 0)),
            Cadence::new(Duration::from_secs(1)),
        );

        // First frame fires.
        assert!(driver.update(t0));
        assert_eq!(driver.face().clock_time().seconds, 1);

        // Frames inside the interval do not read the clock.
        assert!(!driver.update(t0 + Duration::from_millis(16)));
        assert!(!driver.update(t0 + Duration::from_millis(999)));
        assert_eq!(driver.source.reads, 2);

        assert!(driver.update(t0 + Duration::from_millis(1001)));
        assert_eq!(driver.face().clock_time().seconds, 2);
        assert_eq!(driver.next_deadline(), Some(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn injected_tick_source_drives_every_frame() {
        let t0 = Instant::now();
        let mut driver = ClockDriver::new(
            ClockFace::new(),
            SteppingClock::starting_at(ClockTime::new(12, 0, 58)),
            EveryFrame,
        );
        assert!(driver.update(t0));
        assert!(driver.update(t0));
        assert_eq!(driver.face().clock_time(), ClockTime::new(12, 0, 0));
        assert_eq!(driver.next_deadline(), None);
    }

    #[test]
    fn face_mut_keeps_hand_values_until_next_tick() {
        let mut driver = ClockDriver::new(
            ClockFace::new(),
            SteppingClock::starting_at(ClockTime::new(1, 2, 3)),
            Cadence::default(),
        );
        driver.face_mut().set_time(6, 30, 0);
        assert_eq!(driver.face().clock_time(), ClockTime::new(6, 30, 0));
    }
}
