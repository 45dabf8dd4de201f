//! Host clocks

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tctl_core::{Clock, MICROS_PER_MILLI};

/// Ticks measured from the moment the clock was created.
///
/// Both counters are truncated to `u32`, so they wrap like a microcontroller
/// counter does: the microsecond one after about 71 minutes.
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn millis(&self) -> u32 {
        self.origin.elapsed().as_millis() as u32
    }

    fn micros(&self) -> u32 {
        self.origin.elapsed().as_micros() as u32
    }
}

/// Manually advanced clock.
///
/// Clones share one time base, so a test can keep a handle and move time
/// while a timer owns another. Time is kept as a 64-bit microsecond total;
/// each counter is that total truncated to `u32` in its unit, which makes
/// both wrap at their own word boundary.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    total_micros: Arc<AtomicU64>,
}

impl SimClock {
    /// Clock at tick zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock whose millisecond counter reads `millis`
    pub fn starting_at_millis(millis: u64) -> Self {
        Self::starting_at_micros(millis * MICROS_PER_MILLI as u64)
    }

    /// Clock whose 64-bit microsecond total is `micros`
    pub fn starting_at_micros(micros: u64) -> Self {
        Self {
            total_micros: Arc::new(AtomicU64::new(micros)),
        }
    }

    pub fn advance_millis(&self, millis: u32) {
        self.advance_micros_wide(millis as u64 * MICROS_PER_MILLI as u64);
    }

    pub fn advance_micros(&self, micros: u32) {
        self.advance_micros_wide(micros as u64);
    }

    /// Jump to an absolute microsecond total
    pub fn set_micros(&self, micros: u64) {
        self.total_micros.store(micros, Ordering::SeqCst);
    }

    /// Current 64-bit microsecond total
    pub fn total_micros(&self) -> u64 {
        self.total_micros.load(Ordering::SeqCst)
    }

    fn advance_micros_wide(&self, micros: u64) {
        self.total_micros.fetch_add(micros, Ordering::SeqCst);
    }
}

impl Clock for SimClock {
    fn millis(&self) -> u32 {
        (self.total_micros() / MICROS_PER_MILLI as u64) as u32
    }

    fn micros(&self) -> u32 {
        self.total_micros() as u32
    }
}
