//! Interrupt bridge.
//!
//! A hardware interrupt vector carries no context, so the bridge keeps one
//! process-wide slot naming the timer that interrupts are delivered to.
//! Attaching any [`SharedTimer`] overwrites the slot: only the most recently
//! attached (or [`activate`]d) timer receives interrupt-driven triggers.
//!
//! Timer state reached from an interrupt lives in a [`SharedTimer`], a
//! `critical_section::Mutex<RefCell<_>>`. The control loop goes through
//! [`SharedTimer::lock`] and the interrupt side through the same mutex, so
//! every multi-field update runs with interrupts masked. An update that finds
//! the timer already borrowed (a callback re-entering the bridge) is dropped
//! and reported as [`InterruptOutcome::Busy`] or [`TcError::Busy`].

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use tctl_core::{Clock, InterruptLine, TcError, TcResult, TriggerMode};

use crate::timer::IntervalTimer;

/// What an interrupt did to the active timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptOutcome {
    /// Counted, dispatched, timer left running
    Triggered,
    /// Counted, dispatched, repeat limit reached and timer stopped
    Stopped,
    /// No timer is attached
    NoActiveTimer,
    /// Active timer has no zero-argument callback; nothing changed
    NoCallback,
    /// Active timer was borrowed; nothing changed
    Busy,
    /// Active slot holds no timer; nothing changed
    Empty,
}

impl InterruptOutcome {
    /// Check if the trigger was counted
    pub const fn is_trigger(self) -> bool {
        matches!(self, Self::Triggered | Self::Stopped)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InterruptOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Triggered => defmt::write!(fmt, "Triggered"),
            Self::Stopped => defmt::write!(fmt, "Stopped"),
            Self::NoActiveTimer => defmt::write!(fmt, "NoActiveTimer"),
            Self::NoCallback => defmt::write!(fmt, "NoCallback"),
            Self::Busy => defmt::write!(fmt, "Busy"),
            Self::Empty => defmt::write!(fmt, "Empty"),
        }
    }
}

/// Something the interrupt bridge can deliver to
pub trait InterruptTarget: Sync {
    /// Run the interrupt trigger path
    fn on_interrupt(&self) -> InterruptOutcome;

    /// Stop the timer
    fn pause(&self) -> TcResult<()>;
}

/// The single active-instance slot
static ACTIVE: Mutex<Cell<Option<&'static dyn InterruptTarget>>> = Mutex::new(Cell::new(None));

fn active() -> Option<&'static dyn InterruptTarget> {
    critical_section::with(|cs| ACTIVE.borrow(cs).get())
}

/// Make `target` the receiver of interrupt-driven triggers
pub fn activate(target: &'static dyn InterruptTarget) {
    critical_section::with(|cs| ACTIVE.borrow(cs).set(Some(target)));
    log::debug!("interrupt target replaced");
}

/// Empty the active slot
pub fn deactivate() {
    critical_section::with(|cs| ACTIVE.borrow(cs).set(None));
}

/// Check if a timer receives interrupts
pub fn has_active() -> bool {
    active().is_some()
}

/// Deliver one interrupt to the active timer
pub fn dispatch_interrupt() -> InterruptOutcome {
    match active() {
        Some(target) => target.on_interrupt(),
        None => InterruptOutcome::NoActiveTimer,
    }
}

/// Handler installed on the interrupt line by [`SharedTimer::attach_interrupt`]
pub fn interrupt_handler() {
    let outcome = dispatch_interrupt();
    if !outcome.is_trigger() {
        log::trace!("interrupt not counted: {:?}", outcome);
    }
}

/// Stop the active timer.
///
/// Despite the name only the single active timer is paused; other timers are
/// not tracked anywhere. Returns `Ok(false)` when no timer is active.
pub fn pause_all() -> TcResult<bool> {
    match active() {
        Some(target) => {
            target.pause()?;
            log::debug!("active timer paused");
            Ok(true)
        }
        None => Ok(false),
    }
}

/// An [`IntervalTimer`] that can be shared with interrupt context.
///
/// Meant to live in a `static`:
///
/// ```
/// use tctl_posix::SimClock;
/// use tctl_timer::{IntervalTimer, SharedTimer};
///
/// static BLINK: SharedTimer<SimClock> = SharedTimer::new();
///
/// let clock = SimClock::new();
/// BLINK.install(IntervalTimer::new(clock.clone(), 500)).unwrap();
/// clock.advance_millis(500);
/// assert_eq!(BLINK.lock(|timer| timer.elapsed()), Ok(true));
/// ```
pub struct SharedTimer<C> {
    slot: Mutex<RefCell<Option<IntervalTimer<C>>>>,
}

impl<C> SharedTimer<C> {
    /// Empty slot
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Put `timer` in the slot, returning the previous one.
    ///
    /// Fails with [`TcError::Busy`] while the timer is locked, e.g. from one of
    /// its callbacks; `timer` is dropped in that case.
    pub fn install(&self, timer: IntervalTimer<C>) -> TcResult<Option<IntervalTimer<C>>> {
        critical_section::with(|cs| {
            let mut slot = self
                .slot
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| TcError::Busy)?;
            Ok(slot.replace(timer))
        })
    }

    /// Remove the timer from the slot.
    ///
    /// Fails with [`TcError::Busy`] while the timer is locked.
    pub fn take(&self) -> TcResult<Option<IntervalTimer<C>>> {
        critical_section::with(|cs| {
            let mut slot = self
                .slot
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| TcError::Busy)?;
            Ok(slot.take())
        })
    }

    /// Run `f` on the timer inside a critical section
    pub fn lock<R>(&self, f: impl FnOnce(&mut IntervalTimer<C>) -> R) -> TcResult<R> {
        critical_section::with(|cs| {
            let mut slot = self
                .slot
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| TcError::Busy)?;
            let timer = slot.as_mut().ok_or(TcError::Empty)?;
            Ok(f(timer))
        })
    }

    /// Check if this timer is the one receiving interrupts
    pub fn is_active(&self) -> bool {
        match active() {
            Some(target) => core::ptr::eq(
                target as *const dyn InterruptTarget as *const (),
                self as *const Self as *const (),
            ),
            None => false,
        }
    }
}

impl<C: Clock + Send + 'static> SharedTimer<C> {
    /// Make this timer the receiver of interrupt-driven triggers
    pub fn activate(&'static self) {
        activate(self);
    }

    /// Route `pin` on `line` to the bridge and make this timer the active one.
    ///
    /// The previously active timer, if any, stops receiving interrupts.
    pub fn attach_interrupt<L: InterruptLine + ?Sized>(
        &'static self,
        line: &mut L,
        pin: u8,
        mode: TriggerMode,
    ) -> TcResult<()> {
        line.attach(pin, mode, interrupt_handler)?;
        activate(self);
        log::debug!("timer attached to pin {}", pin);
        Ok(())
    }
}

impl<C: Clock + Send> InterruptTarget for SharedTimer<C> {
    fn on_interrupt(&self) -> InterruptOutcome {
        critical_section::with(|cs| match self.slot.borrow(cs).try_borrow_mut() {
            Ok(mut slot) => match slot.as_mut() {
                Some(timer) => timer.on_interrupt(),
                None => InterruptOutcome::Empty,
            },
            Err(_) => {
                log::warn!("interrupt dropped, timer busy");
                InterruptOutcome::Busy
            }
        })
    }

    fn pause(&self) -> TcResult<()> {
        self.lock(|timer| timer.stop())
    }
}

impl<C> Default for SharedTimer<C> {
    fn default() -> Self {
        Self::new()
    }
}
