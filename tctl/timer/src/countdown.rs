//! One-shot countdown on top of an [`IntervalTimer`]

use tctl_core::Clock;

use crate::callback::Callback;
use crate::timer::IntervalTimer;

impl<C: Clock> IntervalTimer<C> {
    /// Start or poll a countdown of `duration` milliseconds.
    ///
    /// A stopped timer is (re)started with `interval = duration`; a running one
    /// keeps its interval and reference. Returns the milliseconds left, or 0 once
    /// the countdown has reached zero. On that call the timer stops and
    /// `on_zero` runs; later calls keep returning 0 without running it again
    /// until the countdown is rearmed with [`reset_countdown`](Self::reset_countdown)
    /// or one of the resets. Resuming the timer (`resume`, `set_running`,
    /// `run_once`) does not rearm it.
    ///
    /// The countdown shares the interval, running flag and reference with the
    /// elapsed checks but never touches the trigger count or samples. Mixing
    /// both on one timer corrupts both; use a separate timer, built with
    /// [`TimerConfig::stopped`](crate::TimerConfig::stopped), for countdowns.
    ///
    /// ```
    /// use tctl_posix::SimClock;
    /// use tctl_timer::{IntervalTimer, TimerConfig};
    ///
    /// let clock = SimClock::new();
    /// let mut countdown = IntervalTimer::with_config(clock.clone(), TimerConfig::stopped());
    ///
    /// assert_eq!(countdown.countdown(300, None), 300);
    /// clock.advance_millis(120);
    /// assert_eq!(countdown.countdown(300, None), 180);
    /// clock.advance_millis(200);
    /// assert_eq!(countdown.countdown(300, None), 0);
    /// ```
    pub fn countdown(&mut self, duration: u32, on_zero: Option<Callback>) -> u32 {
        if self.countdown_done {
            return 0;
        }

        if !self.running {
            self.reference = self.clock.stamp();
            self.interval = duration;
            self.running = true;
        }

        let elapsed = self.clock.millis().wrapping_sub(self.reference.millis);
        if elapsed >= self.interval {
            self.running = false;
            self.countdown_done = true;
            log::debug!("countdown of {}ms finished", self.interval);
            if let Some(callback) = on_zero {
                callback();
            }
            return 0;
        }

        self.interval - elapsed
    }

    /// Rearm a finished countdown; the next [`countdown`](Self::countdown) call starts fresh
    pub fn reset_countdown(&mut self) {
        self.countdown_done = false;
        self.running = false;
    }

    /// Check if a countdown reached zero and has not been rearmed
    pub fn countdown_finished(&self) -> bool {
        self.countdown_done
    }
}
