//! NewReno congestion controller implementation.

use crate::transport::congestion_control::{
    CongestionControlAlgorithm, CongestionOps, CongestionState,
};

/// NewReno (RFC 6582) window growth.
///
/// Stateless apart from counters: everything it needs is in the connection's
/// [`CongestionState`]. RTT samples are ignored and duplicate acks are left to
/// the transport's fast recovery.
#[derive(Debug, Clone, Default)]
pub struct NewRenoController {
    slow_start_increments: usize,
    avoidance_steps: usize,
}

impl NewRenoController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments added to cwnd during slow start.
    pub fn slow_start_increments(&self) -> usize {
        self.slow_start_increments
    }

    /// Congestion avoidance steps taken.
    pub fn avoidance_steps(&self) -> usize {
        self.avoidance_steps
    }

    fn congestion_avoidance(&mut self, state: &mut CongestionState, segments_acked: u32) {
        if segments_acked == 0 {
            return;
        }

        let segment = state.segment_size as f64;
        let adder = (segment * segment / state.cwnd.max(1) as f64).max(1.0);
        state.cwnd = state.cwnd.saturating_add(adder as usize);
        self.avoidance_steps += 1;

        tracing::trace!(
            cwnd = state.cwnd,
            ssthresh = state.ssthresh,
            "NewReno congestion avoidance"
        );
    }
}

impl CongestionOps for NewRenoController {
    fn name(&self) -> &'static str {
        CongestionControlAlgorithm::NewReno.name()
    }

    fn on_ack(&mut self, state: &mut CongestionState, mut segments_acked: u32) {
        if state.cwnd < state.ssthresh {
            let remaining = state.slow_start(segments_acked);
            self.slow_start_increments += (segments_acked - remaining) as usize;
            segments_acked = remaining;
        }

        if state.cwnd >= state.ssthresh {
            self.congestion_avoidance(state, segments_acked);
        }
    }

    fn get_ssthresh(&self, state: &CongestionState, bytes_in_flight: usize) -> usize {
        (2 * state.segment_size).max(bytes_in_flight / 2)
    }

    fn fork(&self) -> Box<dyn CongestionOps> {
        Box::new(self.clone())
    }
}
