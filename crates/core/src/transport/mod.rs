//! Transport-layer congestion control.
//!
//! The transport socket (sequence numbers, retransmission timers, duplicate-ack
//! detection) lives outside this crate. It owns one [`CongestionState`] per
//! connection and drives a [`CongestionOps`] implementation with:
//!
//! - RTT samples as acknowledgments arrive,
//! - ack batches (`on_ack`), which grow the window,
//! - duplicate-ack events (`on_dup_ack_reduction`) and loss (`get_ssthresh`),
//!   which shrink it.
//!
//! Algorithms are selected by name through a [`CongestionRegistry`].

pub mod congestion_control;
mod errors;
pub(crate) mod libra;
pub(crate) mod new_reno;
pub mod registry;

pub use congestion_control::{
    CongestionControlAlgorithm, CongestionOps, CongestionPhase, CongestionState,
};
pub use errors::{CongestionControlError, ConfigError};
pub use libra::{LibraConfig, LibraController, LibraStats};
pub use new_reno::NewRenoController;
pub use registry::{CongestionOpsFactory, CongestionRegistry};
