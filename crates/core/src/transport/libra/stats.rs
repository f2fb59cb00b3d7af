//! Libra statistics and telemetry.
//!
//! This module provides the statistics snapshot struct for monitoring
//! and debugging Libra congestion control behavior.

use std::time::Duration;

/// Libra congestion control statistics.
///
/// Provides a snapshot of the controller state for telemetry and debugging.
/// Window sizes are not included: the connection owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraStats {
    /// Minimum observed RTT, `None` before the first sample.
    pub base_rtt: Option<Duration>,
    /// Maximum observed RTT.
    pub max_rtt: Duration,
    /// Most recent RTT sample.
    pub last_rtt: Duration,
    /// Number of accepted RTT samples over the connection lifetime.
    pub sample_count: u32,
    /// Lifetime mean RTT minus base RTT.
    pub average_delay: Duration,
    /// Maximum RTT minus base RTT.
    pub max_delay: Duration,
    /// Additive-increase coefficient from the last avoidance step.
    pub alpha: f64,
    /// Penalty factor from the last avoidance step.
    pub penalty: f64,
    /// Segments added to cwnd during slow start.
    pub slow_start_increments: usize,
    /// Times an ack batch carried cwnd across ssthresh.
    pub slow_start_exits: usize,
    /// Congestion avoidance steps taken.
    pub avoidance_steps: usize,
    /// Duplicate-ack window reductions applied.
    pub dup_ack_reductions: usize,
}
