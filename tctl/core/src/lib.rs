#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # tctl core
//!
//! Contracts shared by the tctl timers: the wrapping millisecond/microsecond
//! [`Clock`], the [`InterruptLine`] a timer attaches its bridge to, the
//! [`ClockDelay`] busy-wait and the time conversion and formatting helpers.
//!
//! Nothing in here owns timer state; see `tctl-timer` for the state machine.

use core::fmt;

pub mod clock;
pub mod delay;
pub mod interrupt;
pub mod time;

pub use clock::*;
pub use delay::*;
pub use interrupt::*;
pub use time::*;

/// tctl version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used by the collaborator surfaces
pub type TcResult<T> = Result<T, TcError>;

/// Errors reported by interrupt lines and the shared-timer bridge.
///
/// Timer arithmetic itself never fails; stopped timers and out-of-range
/// arguments are clamped instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcError {
    /// Pin cannot raise interrupts
    InvalidPin(u8),
    /// No handler is attached to the pin
    NotAttached(u8),
    /// Timer state is borrowed by another context
    Busy,
    /// Shared slot holds no timer
    Empty,
    /// Interrupt controller rejected the request
    Hardware,
}

impl fmt::Display for TcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TcError::InvalidPin(pin) => write!(f, "pin {} cannot raise interrupts", pin),
            TcError::NotAttached(pin) => write!(f, "no handler attached to pin {}", pin),
            TcError::Busy => write!(f, "timer state is busy"),
            TcError::Empty => write!(f, "no timer installed"),
            TcError::Hardware => write!(f, "interrupt controller error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TcError {}

#[cfg(feature = "defmt")]
impl defmt::Format for TcError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TcError::InvalidPin(pin) => defmt::write!(fmt, "InvalidPin({})", pin),
            TcError::NotAttached(pin) => defmt::write!(fmt, "NotAttached({})", pin),
            TcError::Busy => defmt::write!(fmt, "Busy"),
            TcError::Empty => defmt::write!(fmt, "Empty"),
            TcError::Hardware => defmt::write!(fmt, "Hardware"),
        }
    }
}
