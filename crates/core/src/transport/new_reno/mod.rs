//! NewReno congestion controller.
//!
//! The loss-based baseline Libra is layered over: the same slow start, a
//! one-segment-per-window additive increase, and a halving threshold on loss.
//! It is registered alongside Libra so connections can be switched between
//! the two by name.

mod controller;

pub use controller::NewRenoController;
