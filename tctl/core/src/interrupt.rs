//! Interrupt attachment contract

use crate::TcResult;

/// Edge or level that raises the interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    Low,
    High,
    Rising,
    Falling,
    Change,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TriggerMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(fmt, "Low"),
            Self::High => defmt::write!(fmt, "High"),
            Self::Rising => defmt::write!(fmt, "Rising"),
            Self::Falling => defmt::write!(fmt, "Falling"),
            Self::Change => defmt::write!(fmt, "Change"),
        }
    }
}

/// Context-free handler installed on an interrupt vector
pub type InterruptHandler = fn();

/// External interrupt controller seen from a timer.
///
/// Implementations must invoke the handler at most once per qualifying edge.
pub trait InterruptLine {
    /// Route interrupts from `pin` to `handler`
    fn attach(&mut self, pin: u8, mode: TriggerMode, handler: InterruptHandler) -> TcResult<()>;

    /// Stop routing interrupts from `pin`
    fn detach(&mut self, pin: u8) -> TcResult<()>;
}
