//! Host port for tctl.
//!
//! Supplies what a board support package supplies on a microcontroller:
//!
//! - [`StdClock`], millisecond/microsecond ticks from the host's monotonic clock
//! - [`SimClock`], a clock that only moves when told to, for tests and simulation
//! - [`SimInterruptLine`], an interrupt controller whose edges are raised in software
//!
//! Linking this crate also provides the `critical-section` implementation for
//! the host (a global mutex instead of masking interrupts).

use critical_section as _;

pub mod clock;
pub mod interrupt;

pub use clock::{SimClock, StdClock};
pub use interrupt::SimInterruptLine;
