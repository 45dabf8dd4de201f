//! Timer construction settings

use crate::callback::CallbackOrder;

/// Settings applied when an [`IntervalTimer`](crate::IntervalTimer) is built.
///
/// ```
/// use tctl_timer::{CallbackOrder, TimerConfig};
///
/// let cfg = TimerConfig::new(250)
///     .with_repeat(3)
///     .with_order(CallbackOrder::ElapsedFirst);
/// assert_eq!(cfg.interval, 250);
/// assert!(cfg.running);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Trigger threshold; milliseconds for `elapsed`, microseconds for `elapsed_micros`
    pub interval: u32,
    /// Initial running state
    pub running: bool,
    /// Triggers before auto-stop, 0 for unlimited
    pub repeat: u32,
    pub order: CallbackOrder,
    /// Millisecond tick to measure the first interval from, instead of "now"
    pub reference_millis: Option<u32>,
}

impl TimerConfig {
    pub const fn new(interval: u32) -> Self {
        Self {
            interval,
            running: true,
            repeat: 0,
            order: CallbackOrder::PlainFirst,
            reference_millis: None,
        }
    }

    /// Stopped timer with no interval, ready for [`countdown`](crate::IntervalTimer::countdown)
    pub const fn stopped() -> Self {
        Self::new(0).with_state(false)
    }

    pub const fn with_state(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    pub const fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    /// Stop after the first trigger
    pub const fn once(self) -> Self {
        self.with_repeat(1)
    }

    pub const fn with_order(mut self, order: CallbackOrder) -> Self {
        self.order = order;
        self
    }

    pub const fn with_reference(mut self, millis: u32) -> Self {
        self.reference_millis = Some(millis);
        self
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "TimerConfig{{interval: {}, running: {}, repeat: {}, order: {}}}",
            self.interval,
            self.running,
            self.repeat,
            self.order
        );
    }
}
