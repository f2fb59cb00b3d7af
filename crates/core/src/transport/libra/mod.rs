//! Libra congestion controller.
//!
//! Libra grows the window in congestion avoidance by an additive term scaled
//! to the assumed bottleneck capacity and penalized by observed queueing delay:
//!
//! | Quantity | Definition |
//! |----------|------------|
//! | Penalty `P` | `exp(-k2 * Qavg / Qmax)` over lifetime delay statistics |
//! | Scalability `S` | `k1 * Cr` (configured bottleneck capacity) |
//! | Alpha | `P * S`, recomputed once per avoidance step |
//! | Increase | `alpha * RTT² / ((T0 + RTT) * cwnd)` bytes |
//! | Dup-ack decrease | `T1 * cwnd / (2 * (T0 + RTT))` bytes |
//!
//! ## Delay Statistics
//!
//! RTT statistics are Vegas-style minimum/maximum trackers plus a running mean.
//! They accumulate for the whole connection lifetime and are never reset per
//! round, so the average delay converges towards the lifetime average.
//!
//! `Qavg` is fed the *maximum* delay and `Qmax` the *average* delay. The names
//! are kept as the algorithm defines them even though the wiring is swapped.
//!
//! ## Loss Response
//!
//! Instead of halving, the window and the post-loss threshold are reduced by a
//! fraction that shrinks as RTT grows: with `T0 = T1 = 1s`, a 100ms path loses
//! `1 / 2.2` of its window.

mod config;
mod controller;
mod factors;
mod rtt;
mod stats;


// Re-export public API
pub use config::LibraConfig;
pub use controller::LibraController;
pub use stats::LibraStats;
