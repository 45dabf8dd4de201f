//! The interval timer state machine

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use tctl_core::{
    sec_to_time, Clock, ClockDelay, Hms, Stamp, TimeText, MICROS_PER_MILLI, MILLIS_PER_SECOND,
};

use crate::bridge::InterruptOutcome;
use crate::callback::{Callback, CallbackOrder, Callbacks, ElapsedCallback};
use crate::config::TimerConfig;
use crate::samples::SampleHistory;

/// Unit an elapsed check compares the interval in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Millis,
    Seconds,
    Micros,
}

/// Non-blocking interval timer.
///
/// Poll one of the elapsed checks from the control loop; each returns `true`
/// once per interval and does the bookkeeping (trigger count, last and
/// average duration, repeat limit, callbacks) on that call. A stopped timer
/// never triggers.
///
/// ```
/// use tctl_posix::SimClock;
/// use tctl_timer::IntervalTimer;
///
/// let clock = SimClock::new();
/// let mut timer = IntervalTimer::new(clock.clone(), 100);
///
/// assert!(!timer.elapsed());
/// clock.advance_millis(100);
/// assert!(timer.elapsed());
/// assert_eq!(timer.trigger_count(), 1);
/// assert_eq!(timer.last_elapsed(), 100);
/// ```
#[derive(Debug)]
pub struct IntervalTimer<C> {
    pub(crate) clock: C,
    pub(crate) interval: u32,
    pub(crate) running: bool,
    pub(crate) reference: Stamp,
    pub(crate) origin: u32,
    pub(crate) triggers: u32,
    pub(crate) repeat: u32,
    pub(crate) last_elapsed: u32,
    pub(crate) samples: SampleHistory,
    pub(crate) callbacks: Callbacks,
    pub(crate) countdown_done: bool,
}

impl<C: Clock> IntervalTimer<C> {
    /// Running timer triggering every `interval`
    pub fn new(clock: C, interval: u32) -> Self {
        Self::with_config(clock, TimerConfig::new(interval))
    }

    pub fn with_config(clock: C, config: TimerConfig) -> Self {
        let now = clock.stamp();
        let reference = match config.reference_millis {
            Some(millis) => Stamp::new(millis, now.micros),
            None => now,
        };
        let mut callbacks = Callbacks::new();
        callbacks.set_order(config.order);

        Self {
            clock,
            interval: config.interval,
            running: config.running,
            reference,
            origin: now.millis,
            triggers: 0,
            repeat: config.repeat,
            last_elapsed: 0,
            samples: SampleHistory::new(),
            callbacks,
            countdown_done: false,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ------------------------------------------------------------------
    // Elapsed checks
    // ------------------------------------------------------------------

    /// Check if `interval` milliseconds have passed since the last trigger
    pub fn elapsed(&mut self) -> bool {
        self.check(Granularity::Millis)
    }

    /// Like [`elapsed`](Self::elapsed) but in whole seconds.
    ///
    /// Both ticks are truncated to seconds before comparing against
    /// `interval / 1000`, so sub-second remainders are dropped; an interval
    /// under one second triggers on every call.
    pub fn elapsed_seconds(&mut self) -> bool {
        self.check(Granularity::Seconds)
    }

    /// Like [`elapsed`](Self::elapsed) with `interval` read as microseconds.
    ///
    /// The recorded duration is still in milliseconds.
    pub fn elapsed_micros(&mut self) -> bool {
        self.check(Granularity::Micros)
    }

    /// Run `f` once if the millisecond interval has elapsed
    pub fn elapsed_exec<F: FnOnce()>(&mut self, f: F) -> bool {
        let triggered = self.elapsed();
        if triggered {
            f();
        }
        triggered
    }

    /// Millisecond check in `nb` form; `Ok` carries the trigger duration
    pub fn poll(&mut self) -> nb::Result<u32, Infallible> {
        if self.elapsed() {
            Ok(self.last_elapsed)
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn check(&mut self, granularity: Granularity) -> bool {
        if !self.running {
            return false;
        }

        let now = self.clock.stamp();
        let duration = match granularity {
            Granularity::Millis => {
                let span = now.millis_since(self.reference);
                if span < self.interval {
                    return false;
                }
                span
            }
            Granularity::Seconds => {
                let secs = now.whole_seconds_since(self.reference);
                if secs < self.interval / MILLIS_PER_SECOND {
                    return false;
                }
                secs.saturating_mul(MILLIS_PER_SECOND)
            }
            Granularity::Micros => {
                let span = now.micros_since(self.reference);
                if span < self.interval {
                    return false;
                }
                span / MICROS_PER_MILLI
            }
        };

        self.trigger(now, duration);
        true
    }

    fn trigger(&mut self, now: Stamp, duration: u32) {
        self.reference = now;
        self.last_elapsed = duration;
        self.samples.record(duration);
        self.triggers = self.triggers.saturating_add(1);
        log::trace!("trigger #{} after {}ms", self.triggers, duration);

        self.callbacks.dispatch(duration);

        if self.repeats_exhausted() {
            log::debug!("repeat limit {} reached, stopping", self.repeat);
            self.running = false;
        }
    }

    fn repeats_exhausted(&self) -> bool {
        self.repeat > 0 && self.triggers >= self.repeat
    }

    /// Trigger path taken when the attached interrupt fires.
    ///
    /// Requires a zero-argument callback. The trigger is counted even when the
    /// timer is stopped, in which case the recorded duration is 0, and unless
    /// the repeat limit is reached the timer is resumed afterwards, overriding
    /// any pause.
    pub fn on_interrupt(&mut self) -> InterruptOutcome {
        if !self.callbacks.has_plain() {
            return InterruptOutcome::NoCallback;
        }

        let now = self.clock.stamp();
        self.triggers = self.triggers.saturating_add(1);
        self.last_elapsed = if self.running {
            now.millis_since(self.reference)
        } else {
            0
        };
        self.reference = now;
        self.callbacks.dispatch(self.last_elapsed);
        self.samples.record(self.last_elapsed);

        if self.repeats_exhausted() {
            self.running = false;
            InterruptOutcome::Stopped
        } else {
            self.resume_from_interrupt();
            InterruptOutcome::Triggered
        }
    }

    // ------------------------------------------------------------------
    // Running state
    // ------------------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    /// Resume only if stopped
    pub fn resume_from_interrupt(&mut self) {
        if !self.running {
            self.resume();
        }
    }

    /// Stop and return the milliseconds elapsed before stopping
    pub fn pause_and_get_elapsed(&mut self) -> u32 {
        let elapsed = self.elapsed_time();
        self.stop();
        elapsed
    }

    /// Two-phase pause.
    ///
    /// While running: store the elapsed time in `stored` and stop. While
    /// stopped with a non-zero `stored`: move the reference back by that much,
    /// resume and zero `stored`, so the interval continues where it left off.
    pub fn pause_and_resume_later(&mut self, stored: &mut u32) {
        if self.running {
            *stored = self.elapsed_time();
            self.stop();
        } else if *stored > 0 {
            self.reference = self.clock.stamp().rewound(*stored);
            self.resume();
            *stored = 0;
        }
    }

    /// Fresh reference, cleared statistics; running state and interval kept
    pub fn reset(&mut self) {
        self.reference = self.clock.stamp();
        self.triggers = 0;
        self.last_elapsed = 0;
        self.samples.clear();
        self.countdown_done = false;
    }

    /// [`reset`](Self::reset) and resume
    pub fn restart(&mut self) {
        self.reset();
        self.resume();
    }

    /// Reset everything including the creation tick, and resume
    pub fn full_reset(&mut self) {
        self.reset();
        self.origin = self.reference.millis;
        self.running = true;
    }

    // ------------------------------------------------------------------
    // Interval and repeat configuration
    // ------------------------------------------------------------------

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn set_interval(&mut self, interval: u32) {
        self.interval = interval;
    }

    /// Grow or shrink the interval; never goes below 0
    pub fn adjust_interval(&mut self, adjustment: i32) {
        self.interval = self.interval.saturating_add_signed(adjustment);
    }

    pub fn repeat_limit(&self) -> u32 {
        self.repeat
    }

    /// Triggers before auto-stop, 0 for unlimited
    pub fn set_repeat_limit(&mut self, repeat: u32) {
        self.repeat = repeat;
    }

    /// Stop after the next trigger and make sure the timer runs until then
    pub fn run_once(&mut self) {
        self.repeat = 1;
        self.resume();
    }

    /// Switch between unlimited and single-shot
    pub fn toggle_repeat(&mut self) {
        self.repeat = if self.repeat == 0 { 1 } else { 0 };
    }

    /// Triggers left before auto-stop, 0 when unlimited or exhausted
    pub fn remaining_repeats(&self) -> u32 {
        if self.repeat > 0 {
            self.repeat.saturating_sub(self.triggers)
        } else {
            0
        }
    }

    // ------------------------------------------------------------------
    // Statistics and probes
    // ------------------------------------------------------------------

    /// Triggers since the last reset
    pub fn trigger_count(&self) -> u32 {
        self.triggers
    }

    /// Duration recorded by the latest trigger, in milliseconds
    pub fn last_elapsed(&self) -> u32 {
        self.last_elapsed
    }

    /// Mean of the `samples` most recent trigger durations
    pub fn average_elapsed(&self, samples: usize) -> u32 {
        self.samples.average(samples)
    }

    pub fn samples(&self) -> &SampleHistory {
        &self.samples
    }

    /// Milliseconds since the last trigger or reset; 0 when stopped
    pub fn elapsed_time(&self) -> u32 {
        if self.running {
            self.clock.stamp().millis_since(self.reference)
        } else {
            0
        }
    }

    /// Milliseconds left in the current interval.
    ///
    /// Runs [`elapsed`](Self::elapsed) first, so a due interval triggers here
    /// and reports 0.
    pub fn remaining_time(&mut self) -> u32 {
        if !self.running || self.elapsed() {
            return 0;
        }
        let span = self.clock.millis().wrapping_sub(self.reference.millis);
        self.interval.saturating_sub(span)
    }

    /// Running and more than twice the interval since the last trigger
    pub fn is_overdue(&self) -> bool {
        self.running
            && self.clock.millis().wrapping_sub(self.reference.millis)
                > self.interval.saturating_mul(2)
    }

    /// Check the interval against an external reference tick; no side effects
    pub fn elapsed_since(&self, reference_millis: u32) -> bool {
        self.clock.millis().wrapping_sub(reference_millis) >= self.interval
    }

    /// Check an ad-hoc interval against the current reference; no side effects
    pub fn elapsed_interval(&self, interval: u32) -> bool {
        self.clock.millis().wrapping_sub(self.reference.millis) >= interval
    }

    /// Milliseconds since creation, [`full_reset`](Self::full_reset) or
    /// [`set_start_time`](Self::set_start_time)
    pub fn total_elapsed(&self) -> u32 {
        self.clock.millis().wrapping_sub(self.origin)
    }

    pub fn set_start_time(&mut self, millis: u32) {
        self.origin = millis;
    }

    pub fn is_time_up(&self, timeout: u32) -> bool {
        self.total_elapsed() >= timeout
    }

    // ------------------------------------------------------------------
    // Callbacks
    // ------------------------------------------------------------------

    pub fn set_callback(&mut self, callback: Callback) {
        self.callbacks.set_plain(Some(callback));
    }

    pub fn set_elapsed_callback(&mut self, callback: ElapsedCallback) {
        self.callbacks.set_elapsed(Some(callback));
    }

    pub fn clear_callbacks(&mut self) {
        self.callbacks.clear();
    }

    pub fn set_callback_order(&mut self, order: CallbackOrder) {
        self.callbacks.set_order(order);
    }

    /// `true` runs the elapsed callback before the zero-argument one
    pub fn set_priority_callback(&mut self, elapsed_first: bool) {
        self.set_callback_order(CallbackOrder::from_elapsed_first(elapsed_first));
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    // ------------------------------------------------------------------
    // Text and clock helpers
    // ------------------------------------------------------------------

    /// Current elapsed time as `HH:MM:SS`
    pub fn format_elapsed(&self) -> TimeText {
        Hms::hours_from_secs(self.elapsed_time() / MILLIS_PER_SECOND).to_text()
    }

    /// Clock uptime as `days:HH:MM:SS` or `HH:MM:SS`
    pub fn run_time(&self) -> TimeText {
        sec_to_time(self.millis_to_seconds())
    }

    /// Clock uptime in whole seconds
    pub fn millis_to_seconds(&self) -> u32 {
        self.clock.millis() / MILLIS_PER_SECOND
    }

    /// Spin for `millis` without touching timer state
    pub fn wait(&self, millis: u32) {
        ClockDelay::new(&self.clock).delay_ms(millis);
    }
}
