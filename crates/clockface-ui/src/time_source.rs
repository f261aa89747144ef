use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Timelike, Utc};
use chrono_tz::Tz;

/// A wall-clock reading decomposed for the dial.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ClockTime {
    /// 1–12; midnight and noon are 12.
    pub hours: i32,
    /// 0–59
    pub minutes: i32,
    /// 0–59
    pub seconds: i32,
}

impl ClockTime {
    #[inline]
    pub const fn new(hours: i32, minutes: i32, seconds: i32) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Decomposes any chrono time on a 12-hour dial.
    pub fn from_time<T: Timelike>(t: &T) -> Self {
        let (_pm, hours) = t.hour12();
        Self::new(hours as i32, t.minute() as i32, t.second() as i32)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:2}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Supplies the time shown by the face.
pub trait TimeSource {
    fn now(&mut self) -> ClockTime;
}

// ── timezone ──────────────────────────────────────────────────────────────

/// Error returned when a timezone name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZoneError {
    pub input: String,
}

impl fmt::Display for TimeZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown timezone '{}' (expected \"local\", \"UTC\" or an IANA name such as \"Europe/Paris\")",
            self.input
        )
    }
}

impl std::error::Error for TimeZoneError {}

/// Which zone the wall clock is read in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TimeZoneSetting {
    /// The operating system's local zone.
    #[default]
    Local,
    Utc,
    /// An IANA zone from the tz database.
    Named(Tz),
}

impl FromStr for TimeZoneSetting {
    type Err = TimeZoneError;

    /// Accepts `local`, `utc`/`Z` (any case) or an IANA zone name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(TimeZoneSetting::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s.eq_ignore_ascii_case("z") {
            return Ok(TimeZoneSetting::Utc);
        }
        s.parse::<Tz>()
            .map(TimeZoneSetting::Named)
            .map_err(|_| TimeZoneError { input: s.to_string() })
    }
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSetting::Local => f.write_str("local"),
            TimeZoneSetting::Utc => f.write_str("UTC"),
            TimeZoneSetting::Named(tz) => f.write_str(tz.name()),
        }
    }
}

// ── wall clock ────────────────────────────────────────────────────────────

/// [`TimeSource`] backed by the system clock, read in a configured zone.
#[derive(Debug, Copy, Clone, Default)]
pub struct WallClock {
    zone: TimeZoneSetting,
}

impl WallClock {
    pub fn new(zone: TimeZoneSetting) -> Self {
        Self { zone }
    }

    #[inline]
    pub fn zone(&self) -> TimeZoneSetting {
        self.zone
    }

    /// Reading of the instant `utc` in this clock's zone.
    pub fn read_at(&self, utc: DateTime<Utc>) -> ClockTime {
        match self.zone {
            TimeZoneSetting::Local => ClockTime::from_time(&utc.with_timezone(&Local)),
            TimeZoneSetting::Utc => ClockTime::from_time(&utc),
            TimeZoneSetting::Named(tz) => ClockTime::from_time(&utc.with_timezone(&tz)),
        }
    }
}

impl TimeSource for WallClock {
    fn now(&mut self) -> ClockTime {
        self.read_at(Utc::now())
    }
}
