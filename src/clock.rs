//! Time formatting for 12-hour displays and the wall-clock source frames read.

use chrono::{DateTime, FixedOffset, Local, TimeDelta, Timelike};

use crate::error::{Error, Result};

/// An absolute instant that remembers the UTC offset it was observed in.
pub type Instant = DateTime<FixedOffset>;

fn twelve_hour(hour: u32) -> u32 {
    match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    }
}

/// `" 9:05"`, `"12:30"`: hour space-padded to two columns, minutes zero-padded.
pub fn fmt_time(t: &impl Timelike) -> String {
    format!("{:>2}:{:02}", twelve_hour(t.hour()), t.minute())
}

pub fn fmt_am_pm(t: &impl Timelike) -> &'static str {
    if t.hour() >= 12 { "pm" } else { "am" }
}

/// Time with seconds and the am/pm suffix, e.g. `" 9:05:07 am"`.
pub fn fmt_clock(t: &impl Timelike) -> String {
    format!(
        "{:>2}:{:02}:{:02} {}",
        twelve_hour(t.hour()),
        t.minute(),
        t.second(),
        fmt_am_pm(t)
    )
}

/// Parses feed and command line timestamps.
///
/// Accepts RFC 3339 as well as the compact `+0000` offset some calendar
/// exports produce (`2024-05-01T10:00:00+0000`).
pub fn parse_instant(value: &str) -> Result<Instant> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|source| Error::Timestamp { value: value.to_owned(), source })
}

/// Source of "now" for a frame.
///
/// A forced clock starts at a fixed instant and only moves when the frame
/// driver advances it, so headless runs see the same times every run.
#[derive(Debug, Clone)]
pub struct WallClock {
    forced: Option<Instant>,
}

impl WallClock {
    pub fn system() -> Self {
        Self { forced: None }
    }

    pub fn forced(at: Instant) -> Self {
        Self { forced: Some(at) }
    }

    pub fn is_forced(&self) -> bool {
        self.forced.is_some()
    }

    pub fn now(&self) -> Instant {
        match self.forced {
            Some(at) => at,
            None => {
                let local = Local::now();
                local.with_timezone(local.offset())
            }
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(at) = self.forced.as_mut() {
            *at += TimeDelta::microseconds((f64::from(dt) * 1_000_000.0) as i64);
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::system()
    }
}
