//! Fixed-capacity history of trigger durations

use heapless::HistoryBuffer;

/// Number of trigger durations kept for averaging
pub const SAMPLE_CAPACITY: usize = 10;

/// Circular buffer of the most recent trigger durations, in milliseconds.
///
/// Writes overwrite the oldest entry once [`SAMPLE_CAPACITY`] samples have
/// been recorded.
#[derive(Clone)]
pub struct SampleHistory {
    buf: HistoryBuffer<u32, SAMPLE_CAPACITY>,
}

impl SampleHistory {
    /// Create an empty history
    pub const fn new() -> Self {
        Self {
            buf: HistoryBuffer::new(),
        }
    }

    /// Record one trigger duration
    pub fn record(&mut self, duration: u32) {
        self.buf.write(duration);
    }

    /// Forget every sample
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Number of valid samples, at most [`SAMPLE_CAPACITY`]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    /// Most recently recorded duration
    pub fn latest(&self) -> Option<u32> {
        self.buf.recent().copied()
    }

    /// Valid samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.buf.oldest_ordered().copied()
    }

    /// Mean of the `count` most recent samples.
    ///
    /// `count` is clamped to the number of valid samples; the result is 0 when
    /// that leaves nothing to average. Integer division truncates.
    pub fn average(&self, count: usize) -> u32 {
        let valid = count.min(self.len());
        if valid == 0 {
            return 0;
        }
        let sum: u64 = self
            .iter()
            .skip(self.len() - valid)
            .map(u64::from)
            .sum();
        (sum / valid as u64) as u32
    }
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for SampleHistory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_partial_history() {
        let mut history = SampleHistory::new();
        history.record(100);
        history.record(200);
        history.record(600);

        assert_eq!(history.len(), 3);
        assert_eq!(history.average(3), 300);
        assert_eq!(history.average(2), 400);
        assert_eq!(history.average(1), 600);
        // More than recorded clamps to what is there
        assert_eq!(history.average(10), 300);
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        let mut history = SampleHistory::new();
        assert_eq!(history.average(5), 0);
        history.record(10);
        assert_eq!(history.average(0), 0);
    }

    #[test]
    fn test_overwrites_oldest_when_full() {
        let mut history = SampleHistory::new();
        for duration in 1..=15 {
            history.record(duration);
        }

        assert_eq!(history.len(), SAMPLE_CAPACITY);
        assert_eq!(history.latest(), Some(15));
        assert_eq!(history.iter().next(), Some(6));
        // 6..=15
        assert_eq!(history.average(10), 10);
        assert_eq!(history.average(usize::MAX), 10);
    }

    #[test]
    fn test_large_samples_do_not_overflow() {
        let mut history = SampleHistory::new();
        for _ in 0..SAMPLE_CAPACITY {
            history.record(u32::MAX);
        }
        assert_eq!(history.average(SAMPLE_CAPACITY), u32::MAX);
    }

    #[test]
    fn test_clear() {
        let mut history = SampleHistory::new();
        history.record(42);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
    }
}
