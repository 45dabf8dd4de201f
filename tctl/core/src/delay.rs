//! Busy-wait delay driven by a [`Clock`]

use embedded_hal::delay::DelayNs;

use crate::clock::Clock;

/// Spins on a clock until the requested time has passed.
///
/// This is the only blocking helper in tctl. It reads the clock and nothing
/// else, so waiting never disturbs a timer sharing the same clock.
#[derive(Debug, Clone, Copy)]
pub struct ClockDelay<C> {
    clock: C,
}

impl<C: Clock> ClockDelay<C> {
    /// Create a delay on top of `clock`
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Give the clock back
    pub fn release(self) -> C {
        self.clock
    }

    fn spin_millis(&self, ms: u32) {
        let start = self.clock.millis();
        while self.clock.millis().wrapping_sub(start) < ms {
            core::hint::spin_loop();
        }
    }

    fn spin_micros(&self, us: u32) {
        let start = self.clock.micros();
        while self.clock.micros().wrapping_sub(start) < us {
            core::hint::spin_loop();
        }
    }
}

impl<C: Clock> DelayNs for ClockDelay<C> {
    fn delay_ns(&mut self, ns: u32) {
        self.spin_micros(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.spin_micros(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.spin_millis(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Clock that moves one tick forward on every read
    struct SteppingClock {
        millis: Cell<u32>,
        micros: Cell<u32>,
    }

    impl SteppingClock {
        fn starting_at(millis: u32, micros: u32) -> Self {
            Self {
                millis: Cell::new(millis),
                micros: Cell::new(micros),
            }
        }
    }

    impl Clock for SteppingClock {
        fn millis(&self) -> u32 {
            let now = self.millis.get();
            self.millis.set(now.wrapping_add(1));
            now
        }

        fn micros(&self) -> u32 {
            let now = self.micros.get();
            self.micros.set(now.wrapping_add(1));
            now
        }
    }

    #[test]
    fn delay_ms_spins_on_millis() {
        let clock = SteppingClock::starting_at(100, 0);
        let mut delay = ClockDelay::new(&clock);
        delay.delay_ms(5);
        assert!(clock.millis.get() >= 105);
        assert_eq!(clock.micros.get(), 0);
    }

    #[test]
    fn delay_us_survives_wrap() {
        let clock = SteppingClock::starting_at(0, u32::MAX - 2);
        let mut delay = ClockDelay::new(&clock);
        delay.delay_us(10);
        let now = clock.micros.get();
        assert!(now >= 7 && now < 100);
    }

    #[test]
    fn delay_ns_rounds_up_to_a_microsecond() {
        let clock = SteppingClock::starting_at(0, 0);
        let mut delay = ClockDelay::new(&clock);
        delay.delay_ns(1);
        assert!(clock.micros.get() >= 1);
    }
}
