//! Penalty, scalability and alpha computations.

use super::config::LibraConfig;
use super::rtt::RttTracker;

/// Congestion penalty `P = exp(-k2 * Qavg / Qmax)`, in `[0, 1]`.
///
/// `Qavg` is fed the maximum delay and `Qmax` the average delay, both in whole
/// milliseconds. Degenerate inputs resolve without producing NaN:
///
/// - no samples yet: `P = 1`
/// - zero average delay with a non-zero maximum: `P = 0`
/// - both delays zero: `P = 1`
pub(crate) fn penalty_factor(rtt: &RttTracker, k2: f64) -> f64 {
    if rtt.sample_count() == 0 {
        return 1.0;
    }

    let q_avg = rtt.max_delay().as_millis() as f64;
    let q_max = rtt.average_delay().as_millis() as f64;

    if q_max == 0.0 {
        return if q_avg > 0.0 { 0.0 } else { 1.0 };
    }

    (-k2 * q_avg / q_max).exp()
}

/// Scalability factor `S = k1 * Cr`. Depends on configuration only.
pub(crate) fn scalability_factor(config: &LibraConfig) -> f64 {
    config.k1 * config.bottleneck_capacity
}

/// Additive-increase coefficient `alpha = P * S`.
pub(crate) fn alpha(penalty: f64, scalability: f64) -> f64 {
    penalty * scalability
}
