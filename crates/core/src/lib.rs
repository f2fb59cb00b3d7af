//! Libra delay-scaled congestion control.
//!
//! The crate is consumed by a transport implementation: the connection owns its
//! [`CongestionState`](transport::CongestionState) and hands it to a
//! [`CongestionOps`](transport::CongestionOps) controller on every RTT sample,
//! ack batch and duplicate-ack event.

/// Configuration loading and algorithm selection.
pub mod config;

/// Congestion control algorithms and the interface the transport drives them through.
pub mod transport;

pub use config::CongestionControlConfig;
pub use transport::{
    ConfigError, CongestionControlAlgorithm, CongestionControlError, CongestionOps, CongestionPhase,
    CongestionRegistry, CongestionState, LibraConfig, LibraController, LibraStats,
    NewRenoController,
};
