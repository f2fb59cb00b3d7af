//! Libra congestion controller.
//!
//! This module contains the window update policy: slow start, delay-penalized
//! congestion avoidance, and the delay-scaled loss response.

use std::time::Duration;

use crate::transport::congestion_control::{
    CongestionControlAlgorithm, CongestionOps, CongestionState,
};
use crate::transport::errors::ConfigError;

use super::config::{LibraConfig, INITIAL_ALPHA};
use super::factors::{alpha, penalty_factor, scalability_factor};
use super::rtt::RttTracker;
use super::stats::LibraStats;

/// Libra congestion controller.
///
/// Holds the per-connection estimator state: lifetime RTT statistics, the
/// current alpha, and counters. The window itself is owned by the connection
/// and lent to each call as a [`CongestionState`].
///
/// ## Slow Start Phase
///
/// While `cwnd < ssthresh` each acked segment adds one segment to cwnd. If an
/// ack batch carries cwnd across ssthresh, the rest of the batch is handled by
/// congestion avoidance in the same call.
///
/// ## Congestion Avoidance
///
/// Once per ack batch, alpha is recomputed from the current delay penalty and
/// cwnd grows by `alpha * RTT² / ((T0 + RTT) * cwnd)` bytes, floored.
///
/// ## Forking
///
/// `Clone` copies every field; a forked controller shares nothing with its
/// source.
#[derive(Debug, Clone)]
pub struct LibraController {
    pub(crate) rtt: RttTracker,

    /// Additive-increase coefficient, refreshed at each avoidance step.
    pub(crate) alpha: f64,

    /// Penalty factor used for the current alpha.
    pub(crate) penalty: f64,

    /// `k1 * Cr`, fixed for the controller's lifetime.
    pub(crate) scalability: f64,

    pub(crate) config: LibraConfig,

    /// Statistics
    pub(crate) slow_start_increments: usize,
    pub(crate) slow_start_exits: usize,
    pub(crate) avoidance_steps: usize,
    pub(crate) dup_ack_reductions: usize,
}

impl LibraController {
    /// Create a controller with the given configuration.
    pub fn new(config: LibraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: LibraConfig) -> Self {
        Self {
            rtt: RttTracker::new(),
            alpha: INITIAL_ALPHA,
            penalty: 1.0,
            scalability: scalability_factor(&config),
            config,
            slow_start_increments: 0,
            slow_start_exits: 0,
            avoidance_steps: 0,
            dup_ack_reductions: 0,
        }
    }

    /// Create a controller with preloaded RTT statistics.
    #[cfg(test)]
    pub(crate) fn with_rtt_tracker(config: LibraConfig, rtt: RttTracker) -> Self {
        Self {
            rtt,
            ..Self::from_valid_config(config)
        }
    }

    pub fn config(&self) -> &LibraConfig {
        &self.config
    }

    /// Current additive-increase coefficient.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Minimum observed RTT, `None` before the first sample.
    pub fn base_rtt(&self) -> Option<Duration> {
        self.rtt.base_rtt()
    }

    pub fn max_rtt(&self) -> Duration {
        self.rtt.max_rtt()
    }

    pub fn last_rtt(&self) -> Duration {
        self.rtt.last_rtt()
    }

    pub fn sum_rtt(&self) -> Duration {
        self.rtt.sum_rtt()
    }

    pub fn sample_count(&self) -> u32 {
        self.rtt.sample_count()
    }

    /// Lifetime mean RTT minus base RTT (zero before the first sample).
    pub fn average_delay(&self) -> Duration {
        self.rtt.average_delay()
    }

    /// Maximum RTT minus base RTT (zero before the first sample).
    pub fn max_delay(&self) -> Duration {
        self.rtt.max_delay()
    }

    pub fn stats(&self) -> LibraStats {
        LibraStats {
            base_rtt: self.rtt.base_rtt(),
            max_rtt: self.rtt.max_rtt(),
            last_rtt: self.rtt.last_rtt(),
            sample_count: self.rtt.sample_count(),
            average_delay: self.rtt.average_delay(),
            max_delay: self.rtt.max_delay(),
            alpha: self.alpha,
            penalty: self.penalty,
            slow_start_increments: self.slow_start_increments,
            slow_start_exits: self.slow_start_exits,
            avoidance_steps: self.avoidance_steps,
            dup_ack_reductions: self.dup_ack_reductions,
        }
    }

    fn update_alpha(&mut self) {
        self.penalty = penalty_factor(&self.rtt, self.config.k2);
        self.alpha = alpha(self.penalty, self.scalability);
    }

    /// `floor(T1 * cwnd / (2 * (T0 + RTT)))`, shared by the dup-ack reduction
    /// and the post-loss threshold.
    fn delay_scaled_decrease(&self, cwnd: usize) -> usize {
        let rtt = self.rtt.last_rtt().as_secs_f64();
        let minus = (self.config.t1 * cwnd as f64) / (2.0 * (self.config.t0 + rtt));
        floor_bytes(minus)
    }

    fn slow_start(&mut self, state: &mut CongestionState, segments_acked: u32) -> u32 {
        let remaining = state.slow_start(segments_acked);
        self.slow_start_increments += (segments_acked - remaining) as usize;

        if state.cwnd >= state.ssthresh {
            self.slow_start_exits += 1;
            tracing::debug!(
                cwnd = state.cwnd,
                ssthresh = state.ssthresh,
                remaining,
                "Libra exiting slow start"
            );
        } else {
            tracing::trace!(
                cwnd = state.cwnd,
                ssthresh = state.ssthresh,
                "Libra slow start"
            );
        }

        remaining
    }

    fn congestion_avoidance(&mut self, state: &mut CongestionState, segments_acked: u32) {
        if segments_acked == 0 {
            return;
        }

        self.update_alpha();

        let rtt = self.rtt.last_rtt().as_secs_f64();
        let cwnd = state.cwnd.max(1) as f64;
        let increase = (self.alpha * rtt * rtt) / ((self.config.t0 + rtt) * cwnd);
        if !increase.is_finite() {
            tracing::warn!(
                alpha = self.alpha,
                rtt_secs = rtt,
                cwnd = state.cwnd,
                "Libra discarding non-finite window increase"
            );
        }

        let added = floor_bytes(increase);
        state.cwnd = state.cwnd.saturating_add(added);
        self.avoidance_steps += 1;

        tracing::trace!(
            cwnd = state.cwnd,
            added,
            alpha = self.alpha,
            penalty = self.penalty,
            rtt_ms = self.rtt.last_rtt().as_millis() as u64,
            "Libra congestion avoidance"
        );
    }
}

impl Default for LibraController {
    fn default() -> Self {
        Self::from_valid_config(LibraConfig::default())
    }
}

impl CongestionOps for LibraController {
    fn name(&self) -> &'static str {
        CongestionControlAlgorithm::Libra.name()
    }

    fn on_rtt_sample(&mut self, rtt: Duration) {
        if self.rtt.on_sample(rtt) {
            tracing::trace!(
                rtt_ms = rtt.as_millis() as u64,
                base_rtt_ms = self.rtt.base_rtt().unwrap_or_default().as_millis() as u64,
                max_rtt_ms = self.rtt.max_rtt().as_millis() as u64,
                samples = self.rtt.sample_count(),
                "Libra RTT sample"
            );
        }
    }

    fn on_ack(&mut self, state: &mut CongestionState, mut segments_acked: u32) {
        if state.cwnd < state.ssthresh {
            segments_acked = self.slow_start(state, segments_acked);
        }

        if state.cwnd >= state.ssthresh {
            self.congestion_avoidance(state, segments_acked);
        }
    }

    fn on_dup_ack_reduction(&mut self, state: &mut CongestionState) {
        let decrease = self.delay_scaled_decrease(state.cwnd);
        let old_cwnd = state.cwnd;
        state.cwnd = state
            .cwnd
            .saturating_sub(decrease)
            .max(state.segment_size);
        self.dup_ack_reductions += 1;

        tracing::debug!(
            old_cwnd,
            new_cwnd = state.cwnd,
            decrease,
            rtt_ms = self.rtt.last_rtt().as_millis() as u64,
            "Libra duplicate-ack window reduction"
        );
    }

    fn get_ssthresh(&self, state: &CongestionState, bytes_in_flight: usize) -> usize {
        let candidate = state
            .cwnd
            .saturating_sub(self.delay_scaled_decrease(state.cwnd));
        candidate.max(bytes_in_flight / 2)
    }

    fn fork(&self) -> Box<dyn CongestionOps> {
        Box::new(self.clone())
    }
}

/// Floor a byte count, mapping negative and non-finite values to zero.
fn floor_bytes(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value as usize
    } else {
        0
    }
}
