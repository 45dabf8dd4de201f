//! Trigger callbacks and their dispatch order

/// Zero-argument trigger callback
pub type Callback = fn();

/// Trigger callback receiving the trigger duration in milliseconds
pub type ElapsedCallback = fn(u32);

/// Which registered callback runs first on a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackOrder {
    /// Zero-argument callback, then the elapsed callback
    #[default]
    PlainFirst,
    /// Elapsed callback, then the zero-argument callback
    ElapsedFirst,
}

impl CallbackOrder {
    /// Map the boolean priority flag onto an order
    pub const fn from_elapsed_first(elapsed_first: bool) -> Self {
        if elapsed_first {
            Self::ElapsedFirst
        } else {
            Self::PlainFirst
        }
    }

    pub const fn is_elapsed_first(self) -> bool {
        matches!(self, Self::ElapsedFirst)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CallbackOrder {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::PlainFirst => defmt::write!(fmt, "PlainFirst"),
            Self::ElapsedFirst => defmt::write!(fmt, "ElapsedFirst"),
        }
    }
}

/// The two optional callback slots of a timer
#[derive(Debug, Clone, Copy, Default)]
pub struct Callbacks {
    plain: Option<Callback>,
    elapsed: Option<ElapsedCallback>,
    order: CallbackOrder,
}

impl Callbacks {
    /// No callbacks, plain-first order
    pub const fn new() -> Self {
        Self {
            plain: None,
            elapsed: None,
            order: CallbackOrder::PlainFirst,
        }
    }

    pub fn set_plain(&mut self, callback: Option<Callback>) {
        self.plain = callback;
    }

    pub fn set_elapsed(&mut self, callback: Option<ElapsedCallback>) {
        self.elapsed = callback;
    }

    pub fn set_order(&mut self, order: CallbackOrder) {
        self.order = order;
    }

    pub fn order(&self) -> CallbackOrder {
        self.order
    }

    /// Check if the zero-argument slot is filled
    pub fn has_plain(&self) -> bool {
        self.plain.is_some()
    }

    /// Check if the elapsed slot is filled
    pub fn has_elapsed(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Empty both slots; the order is kept
    pub fn clear(&mut self) {
        self.plain = None;
        self.elapsed = None;
    }

    /// Run the registered callbacks in the configured order.
    ///
    /// Empty slots are skipped.
    pub fn dispatch(&self, duration: u32) {
        match self.order {
            CallbackOrder::ElapsedFirst => {
                self.run_elapsed(duration);
                self.run_plain();
            }
            CallbackOrder::PlainFirst => {
                self.run_plain();
                self.run_elapsed(duration);
            }
        }
    }

    fn run_plain(&self) {
        if let Some(callback) = self.plain {
            callback();
        }
    }

    fn run_elapsed(&self, duration: u32) {
        if let Some(callback) = self.elapsed {
            callback(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    // Each test owns its statics; tests run in parallel.

    #[test]
    fn test_plain_first_order() {
        static SEQ: AtomicU32 = AtomicU32::new(0);
        static PLAIN_AT: AtomicU32 = AtomicU32::new(0);
        static ELAPSED_AT: AtomicU32 = AtomicU32::new(0);

        fn plain() {
            PLAIN_AT.store(SEQ.fetch_add(1, Ordering::SeqCst) + 1, Ordering::SeqCst);
        }
        fn elapsed(_: u32) {
            ELAPSED_AT.store(SEQ.fetch_add(1, Ordering::SeqCst) + 1, Ordering::SeqCst);
        }

        let mut callbacks = Callbacks::new();
        callbacks.set_plain(Some(plain));
        callbacks.set_elapsed(Some(elapsed));
        callbacks.dispatch(5);

        assert_eq!(PLAIN_AT.load(Ordering::SeqCst), 1);
        assert_eq!(ELAPSED_AT.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_elapsed_first_order_passes_duration() {
        static SEQ: AtomicU32 = AtomicU32::new(0);
        static PLAIN_AT: AtomicU32 = AtomicU32::new(0);
        static ELAPSED_AT: AtomicU32 = AtomicU32::new(0);
        static DURATION: AtomicU32 = AtomicU32::new(0);

        fn plain() {
            PLAIN_AT.store(SEQ.fetch_add(1, Ordering::SeqCst) + 1, Ordering::SeqCst);
        }
        fn elapsed(duration: u32) {
            DURATION.store(duration, Ordering::SeqCst);
            ELAPSED_AT.store(SEQ.fetch_add(1, Ordering::SeqCst) + 1, Ordering::SeqCst);
        }

        let mut callbacks = Callbacks::new();
        callbacks.set_plain(Some(plain));
        callbacks.set_elapsed(Some(elapsed));
        callbacks.set_order(CallbackOrder::from_elapsed_first(true));
        callbacks.dispatch(250);

        assert_eq!(ELAPSED_AT.load(Ordering::SeqCst), 1);
        assert_eq!(PLAIN_AT.load(Ordering::SeqCst), 2);
        assert_eq!(DURATION.load(Ordering::SeqCst), 250);
    }

    #[test]
    fn test_empty_slots_are_skipped() {
        let callbacks = Callbacks::new();
        assert!(!callbacks.has_plain());
        assert!(!callbacks.has_elapsed());
        callbacks.dispatch(1);
    }
}
