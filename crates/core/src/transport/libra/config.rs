//! Libra configuration and constants.

use serde::{Deserialize, Serialize};

use crate::transport::errors::ConfigError;

/// Default scalability weight.
pub(crate) const DEFAULT_K1: f64 = 2.0;

/// Default penalty exponent weight.
pub(crate) const DEFAULT_K2: f64 = 2.0;

/// Default nominal timeout unit in the increase/decrease denominators (seconds).
pub(crate) const DEFAULT_T0: f64 = 1.0;

/// Default nominal timeout unit in the decrease numerator (seconds).
pub(crate) const DEFAULT_T1: f64 = 1.0;

/// Default bottleneck capacity: 100 Mbit/s in bytes/sec.
pub(crate) const DEFAULT_BOTTLENECK_CAPACITY: f64 = 100_000_000.0 / 8.0;

/// Alpha before the first congestion avoidance step has computed one.
pub(crate) const INITIAL_ALPHA: f64 = 10.0;

/// Configuration for the Libra controller.
///
/// All fields are optional when deserialized; missing keys take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LibraConfig {
    /// Scalability weight `k1`.
    #[serde(default = "default_k1")]
    pub k1: f64,
    /// Penalty exponent weight `k2`.
    #[serde(default = "default_k2")]
    pub k2: f64,
    /// `T0` (seconds). Must be positive: it is the whole denominator before
    /// the first RTT sample arrives.
    #[serde(default = "default_t0")]
    pub t0: f64,
    /// `T1` (seconds).
    #[serde(default = "default_t1")]
    pub t1: f64,
    /// Assumed bottleneck capacity `Cr` (bytes/sec).
    #[serde(default = "default_bottleneck_capacity")]
    pub bottleneck_capacity: f64,
}

impl Default for LibraConfig {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            k2: DEFAULT_K2,
            t0: DEFAULT_T0,
            t1: DEFAULT_T1,
            bottleneck_capacity: DEFAULT_BOTTLENECK_CAPACITY,
        }
    }
}

impl LibraConfig {
    /// Set the bottleneck capacity from a link rate in megabits per second.
    pub fn with_capacity_mbps(mut self, mbps: f64) -> Self {
        self.bottleneck_capacity = mbps * 1_000_000.0 / 8.0;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check("k1", self.k1, |v| v >= 0.0, "finite and >= 0")?;
        check("k2", self.k2, |v| v >= 0.0, "finite and >= 0")?;
        check("t0", self.t0, |v| v > 0.0, "finite and > 0")?;
        check("t1", self.t1, |v| v >= 0.0, "finite and >= 0")?;
        check(
            "bottleneck-capacity",
            self.bottleneck_capacity,
            |v| v > 0.0,
            "finite and > 0",
        )
    }
}

fn check(
    field: &'static str,
    value: f64,
    in_range: impl Fn(f64) -> bool,
    expected: &'static str,
) -> Result<(), ConfigError> {
    if value.is_finite() && in_range(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

fn default_k1() -> f64 {
    DEFAULT_K1
}

fn default_k2() -> f64 {
    DEFAULT_K2
}

fn default_t0() -> f64 {
    DEFAULT_T0
}

fn default_t1() -> f64 {
    DEFAULT_T1
}

fn default_bottleneck_capacity() -> f64 {
    DEFAULT_BOTTLENECK_CAPACITY
}
