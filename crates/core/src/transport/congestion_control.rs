//! Congestion control interface for the transport layer.
//!
//! This module provides a pluggable interface for congestion control algorithms,
//! allowing selection between different algorithms via configuration.
//!
//! ## Design
//!
//! The connection owns its [`CongestionState`] and passes it by reference into
//! every controller call. Controllers only hold their own estimator state (RTT
//! statistics, gains, counters), so forking a controller for a new connection
//! is a plain value copy and no window state is ever aliased.
//!
//! ## Supported Algorithms
//!
//! - **Libra** (default): delay-scaled additive increase driven by an
//!   exponential queueing-delay penalty, with a delay-scaled loss response.
//! - **NewReno**: the conventional loss-based baseline Libra's phase machine
//!   is layered over.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use libra_cc::{CongestionOps, CongestionState, LibraController};
//!
//! let mut state = CongestionState::new(1_000, 10_000, 20_000);
//! let mut controller = LibraController::default();
//!
//! controller.on_rtt_sample(Duration::from_millis(50));
//! controller.on_ack(&mut state, 4);
//! assert_eq!(state.cwnd, 14_000);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::errors::CongestionControlError;

// =============================================================================
// Algorithm Identification
// =============================================================================

/// Identifies the congestion control algorithm in use.
///
/// This enum is used for:
/// - Configuration: Selecting which algorithm to use
/// - Logging: Human-readable algorithm names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum CongestionControlAlgorithm {
    /// Libra: delay-penalized, bandwidth-scaled additive increase.
    #[default]
    Libra,

    /// NewReno (RFC 6582) window growth and halving.
    NewReno,
}

impl CongestionControlAlgorithm {
    /// Stable identifier, also returned by [`CongestionOps::name`].
    pub const fn name(&self) -> &'static str {
        match self {
            CongestionControlAlgorithm::Libra => "TcpLibra",
            CongestionControlAlgorithm::NewReno => "TcpNewReno",
        }
    }
}

impl fmt::Display for CongestionControlAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CongestionControlAlgorithm {
    type Err = CongestionControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "libra" | "tcplibra" => Ok(CongestionControlAlgorithm::Libra),
            "newreno" | "tcpnewreno" => Ok(CongestionControlAlgorithm::NewReno),
            _ => Err(CongestionControlError::UnknownAlgorithm(s.to_string())),
        }
    }
}

// =============================================================================
// Connection-Owned State
// =============================================================================

/// Growth regime of a connection, implied by `cwnd < ssthresh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CongestionPhase {
    /// Exponential growth: one segment per acked segment.
    SlowStart,
    /// Algorithm-specific additive growth.
    CongestionAvoidance,
}

/// Window state owned by the connection and lent to the controller on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CongestionState {
    /// Congestion window (bytes).
    pub cwnd: usize,
    /// Slow start threshold (bytes).
    pub ssthresh: usize,
    /// Segment size (bytes), constant for the lifetime of the connection.
    pub segment_size: usize,
}

impl CongestionState {
    pub fn new(segment_size: usize, cwnd: usize, ssthresh: usize) -> Self {
        Self {
            cwnd,
            ssthresh,
            segment_size,
        }
    }

    pub fn phase(&self) -> CongestionPhase {
        if self.cwnd < self.ssthresh {
            CongestionPhase::SlowStart
        } else {
            CongestionPhase::CongestionAvoidance
        }
    }

    /// Grows `cwnd` by one segment per acked segment until `ssthresh` is reached.
    ///
    /// Returns the acked segments left over once the window crosses the
    /// threshold, which the caller feeds into congestion avoidance.
    pub(crate) fn slow_start(&mut self, mut segments_acked: u32) -> u32 {
        while segments_acked >= 1 && self.cwnd < self.ssthresh {
            self.cwnd = self.cwnd.saturating_add(self.segment_size);
            segments_acked -= 1;
        }
        segments_acked
    }
}

// =============================================================================
// Congestion Control Trait
// =============================================================================

/// Trait defining the interface for congestion control algorithms.
///
/// Calls for one connection are serialized by the transport, so every event
/// handler takes `&mut self`. Implementations must be `Send` so a connection
/// task can own its controller; they are never shared between connections.
pub trait CongestionOps: Send + fmt::Debug {
    /// Stable algorithm identifier for selection and diagnostics.
    fn name(&self) -> &'static str;

    /// Called for each RTT measurement. A zero sample means "unset" and is ignored.
    fn on_rtt_sample(&mut self, _rtt: Duration) {}

    /// Called when `segments_acked` new segments are cumulatively acknowledged.
    fn on_ack(&mut self, state: &mut CongestionState, segments_acked: u32);

    /// Called by the loss detector when duplicate acks are seen.
    ///
    /// Algorithms without their own duplicate-ack response leave the window to
    /// the transport's fast recovery.
    fn on_dup_ack_reduction(&mut self, _state: &mut CongestionState) {}

    /// Slow start threshold to adopt after a loss event. Does not mutate.
    fn get_ssthresh(&self, state: &CongestionState, bytes_in_flight: usize) -> usize;

    /// Independent copy for a connection derived from this one.
    fn fork(&self) -> Box<dyn CongestionOps>;
}

impl Clone for Box<dyn CongestionOps> {
    fn clone(&self) -> Self {
        self.fork()
    }
}
