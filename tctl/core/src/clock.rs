//! Clock source contract and reference stamps

use core::fmt;

/// Milliseconds per second
pub const MILLIS_PER_SECOND: u32 = 1_000;

/// Microseconds per millisecond
pub const MICROS_PER_MILLI: u32 = 1_000;

/// Monotonic tick source consumed by the timers.
///
/// Both counters start at an arbitrary epoch and wrap at `u32::MAX`. They are
/// independent: nothing requires the microsecond counter to be phase-aligned
/// with the millisecond one.
pub trait Clock {
    /// Current millisecond tick
    fn millis(&self) -> u32;

    /// Current microsecond tick
    fn micros(&self) -> u32;

    /// Capture both counters as one reference
    fn stamp(&self) -> Stamp {
        Stamp {
            millis: self.millis(),
            micros: self.micros(),
        }
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn millis(&self) -> u32 {
        (**self).millis()
    }

    fn micros(&self) -> u32 {
        (**self).micros()
    }

    fn stamp(&self) -> Stamp {
        (**self).stamp()
    }
}

/// Pair of millisecond and microsecond ticks taken together.
///
/// A timer keeps exactly one `Stamp` as its reference and always replaces it
/// whole, so the two granularities can never drift apart through a partial
/// update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stamp {
    pub millis: u32,
    pub micros: u32,
}

impl Stamp {
    /// Stamp at tick zero on both counters
    pub const ZERO: Self = Self { millis: 0, micros: 0 };

    /// Create a stamp from raw ticks
    pub const fn new(millis: u32, micros: u32) -> Self {
        Self { millis, micros }
    }

    /// Milliseconds from `earlier` to `self`, correct across one wrap
    pub const fn millis_since(self, earlier: Stamp) -> u32 {
        self.millis.wrapping_sub(earlier.millis)
    }

    /// Microseconds from `earlier` to `self`, correct across one wrap
    pub const fn micros_since(self, earlier: Stamp) -> u32 {
        self.micros.wrapping_sub(earlier.micros)
    }

    /// Whole seconds between the truncated-to-second millisecond ticks.
    ///
    /// Equals `self.millis / 1000 - earlier.millis / 1000` when the counter has
    /// not wrapped, and keeps counting correctly when it has.
    pub const fn whole_seconds_since(self, earlier: Stamp) -> u32 {
        let phase = (earlier.millis % MILLIS_PER_SECOND) as u64;
        let span = self.millis_since(earlier) as u64;
        ((phase + span) / MILLIS_PER_SECOND as u64) as u32
    }

    /// Same stamp moved `millis` milliseconds into the past
    pub const fn rewound(self, millis: u32) -> Stamp {
        Stamp {
            millis: self.millis.wrapping_sub(millis),
            micros: self.micros.wrapping_sub(millis.wrapping_mul(MICROS_PER_MILLI)),
        }
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms/{}us", self.millis, self.micros)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Stamp {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}ms/{}us", self.millis, self.micros);
    }
}
