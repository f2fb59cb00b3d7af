//! Lifetime RTT statistics.
//!
//! Tracks the minimum (base), maximum, sum and count of all accepted RTT
//! samples together with the most recent one. Unlike a windowed min filter
//! nothing here expires: the statistics describe the whole connection.

use std::time::Duration;

/// Running min/max/mean RTT tracker.
///
/// ## Invariant
///
/// Once a sample has been accepted, `base_rtt <= last_rtt <= max_rtt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RttTracker {
    /// Minimum RTT. `Duration::MAX` until the first sample.
    base_rtt: Duration,
    max_rtt: Duration,
    sum_rtt: Duration,
    sample_count: u32,
    last_rtt: Duration,
}

impl RttTracker {
    pub(crate) fn new() -> Self {
        Self {
            base_rtt: Duration::MAX,
            max_rtt: Duration::ZERO,
            sum_rtt: Duration::ZERO,
            sample_count: 0,
            last_rtt: Duration::ZERO,
        }
    }

    /// Build a tracker from raw accumulator values.
    #[cfg(test)]
    pub(crate) fn from_parts(
        base_rtt: Duration,
        max_rtt: Duration,
        sum_rtt: Duration,
        sample_count: u32,
        last_rtt: Duration,
    ) -> Self {
        Self {
            base_rtt,
            max_rtt,
            sum_rtt,
            sample_count,
            last_rtt,
        }
    }

    /// Record an RTT sample.
    ///
    /// # Returns
    /// `false` if the sample was rejected (zero, i.e. unset).
    pub(crate) fn on_sample(&mut self, rtt: Duration) -> bool {
        if rtt.is_zero() {
            return false;
        }

        self.base_rtt = self.base_rtt.min(rtt);
        self.max_rtt = self.max_rtt.max(rtt);
        self.sum_rtt = self.sum_rtt.saturating_add(rtt);
        self.sample_count = self.sample_count.saturating_add(1);
        self.last_rtt = rtt;
        true
    }

    /// Mean RTT minus base RTT, or zero before the first sample.
    pub(crate) fn average_delay(&self) -> Duration {
        if self.sample_count == 0 {
            return Duration::ZERO;
        }
        (self.sum_rtt / self.sample_count).saturating_sub(self.base_rtt)
    }

    /// Maximum RTT minus base RTT, or zero before the first sample.
    pub(crate) fn max_delay(&self) -> Duration {
        if self.sample_count == 0 {
            return Duration::ZERO;
        }
        self.max_rtt.saturating_sub(self.base_rtt)
    }

    /// The minimum RTT, or `None` if no valid sample exists.
    pub(crate) fn base_rtt(&self) -> Option<Duration> {
        (self.sample_count > 0).then_some(self.base_rtt)
    }

    pub(crate) fn max_rtt(&self) -> Duration {
        self.max_rtt
    }

    pub(crate) fn sum_rtt(&self) -> Duration {
        self.sum_rtt
    }

    pub(crate) fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Most recent sample, zero before the first one.
    pub(crate) fn last_rtt(&self) -> Duration {
        self.last_rtt
    }
}

impl Default for RttTracker {
    fn default() -> Self {
        Self::new()
    }
}
