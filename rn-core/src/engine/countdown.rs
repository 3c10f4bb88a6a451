use std::fmt;

use chrono::{DateTime, Utc};

/// Time remaining until an event, bucketed the way the event cards show it.
///
/// The caller supplies `now`, so the result is a pure function of two
/// timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// The event date is in the past.
    Past,
    /// At least one whole day remains.
    Days(i64),
    /// Less than a day but at least one whole hour remains.
    Hours(i64),
    /// Less than an hour remains (including sub-hour positive remainders).
    Today,
}

impl Countdown {
    pub fn new(event_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let diff_ms = event_date.signed_duration_since(now).num_milliseconds();
        if diff_ms < 0 {
            return Countdown::Past;
        }

        let days = diff_ms / (1000 * 60 * 60 * 24);
        let hours = (diff_ms % (1000 * 60 * 60 * 24)) / (1000 * 60 * 60);

        if days > 0 {
            Countdown::Days(days)
        } else if hours > 0 {
            Countdown::Hours(hours)
        } else {
            Countdown::Today
        }
    }
}

// Labels match the site's Norwegian badge text.
impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Past => f.write_str("Avholdt"),
            Countdown::Days(1) => f.write_str("1 dag"),
            Countdown::Days(n) => write!(f, "{n} dager"),
            Countdown::Hours(1) => f.write_str("1 time"),
            Countdown::Hours(n) => write!(f, "{n} timer"),
            Countdown::Today => f.write_str("I dag"),
        }
    }
}
