#![no_std]
#![forbid(unsafe_code)]

//! # tctl timers
//!
//! Non-blocking interval timers for single-threaded control loops that may
//! also be driven from an interrupt.
//!
//! An [`IntervalTimer`] replaces a blocking delay with a cheap "has my interval
//! elapsed" check at millisecond, second or microsecond granularity. Every
//! trigger updates the trigger count, the last duration and a ten-entry
//! history used for averaging, runs the registered callbacks and honours an
//! optional repeat limit. [`IntervalTimer::countdown`] provides a self-starting
//! one-shot on the same state.
//!
//! The [`bridge`] module connects a context-free interrupt vector to one
//! [`SharedTimer`], reusing the same accounting and dispatch as the polled path.

pub mod bridge;
pub mod callback;
pub mod config;
mod countdown;
pub mod samples;
pub mod timer;

pub use bridge::{
    activate, deactivate, dispatch_interrupt, has_active, interrupt_handler, pause_all,
    InterruptOutcome, InterruptTarget, SharedTimer,
};
pub use callback::*;
pub use config::*;
pub use samples::*;
pub use timer::*;

pub use tctl_core::{
    convert_time, sec_to_time, Clock, ClockDelay, Hms, InterruptLine, Stamp, TcError, TcResult,
    TimeDirection, TriggerMode,
};
