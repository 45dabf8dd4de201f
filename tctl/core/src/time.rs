//! Time constants, unit conversion and duration text

use core::fmt::{self, Write};

use heapless::String;

use crate::clock::MILLIS_PER_SECOND;

/// Seconds in a day
pub const SECONDS_PER_DAY: u32 = 86_400;
/// Seconds in an hour
pub const SECONDS_PER_HOUR: u32 = 3_600;
/// Seconds in a minute
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Capacity of a formatted duration; fits `49710:06:28:15`, the longest `u32` seconds text
pub const TIME_TEXT_CAPACITY: usize = 16;

/// Formatted duration text
pub type TimeText = String<TIME_TEXT_CAPACITY>;

/// Direction of a millisecond/second conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDirection {
    MillisecondsToSeconds,
    SecondsToMilliseconds,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeDirection {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::MillisecondsToSeconds => defmt::write!(fmt, "ms->s"),
            Self::SecondsToMilliseconds => defmt::write!(fmt, "s->ms"),
        }
    }
}

/// Convert between milliseconds and seconds.
///
/// Seconds to milliseconds saturates at `u32::MAX`; milliseconds to seconds
/// truncates.
pub const fn convert_time(time: u32, direction: TimeDirection) -> u32 {
    match direction {
        TimeDirection::MillisecondsToSeconds => time / MILLIS_PER_SECOND,
        TimeDirection::SecondsToMilliseconds => time.saturating_mul(MILLIS_PER_SECOND),
    }
}

/// A seconds count split into days, hours, minutes and seconds.
///
/// `Display` prints `days:HH:MM:SS` when there is at least one day and
/// `HH:MM:SS` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hms {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Hms {
    /// Split a seconds count, days included
    pub const fn from_secs(secs: u32) -> Self {
        Self {
            days: secs / SECONDS_PER_DAY,
            hours: (secs % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: secs % SECONDS_PER_MINUTE,
        }
    }

    /// Split a seconds count without a days field; hours keep counting past 24
    pub const fn hours_from_secs(secs: u32) -> Self {
        Self {
            days: 0,
            hours: secs / SECONDS_PER_HOUR,
            minutes: (secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: secs % SECONDS_PER_MINUTE,
        }
    }

    /// Render into a fixed-capacity string
    pub fn to_text(&self) -> TimeText {
        let mut text = TimeText::new();
        // Every Hms built from a u32 fits TIME_TEXT_CAPACITY.
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(
                f,
                "{}:{:02}:{:02}:{:02}",
                self.days, self.hours, self.minutes, self.seconds
            )
        } else {
            write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Hms {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", defmt::Display2Format(self));
    }
}

/// Format a seconds count as `days:HH:MM:SS` or `HH:MM:SS`
pub fn sec_to_time(secs: u32) -> TimeText {
    Hms::from_secs(secs).to_text()
}
