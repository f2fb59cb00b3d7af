//! Congestion control configuration.
//!
//! The transport reads a [`CongestionControlConfig`] once, typically from a
//! TOML file, and uses it for every connection it opens:
//!
//! ```toml
//! congestion-control = "libra"
//! segment-size = 1448
//!
//! [libra]
//! k2 = 3.0
//! bottleneck-capacity = 1250000.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::transport::{
    CongestionControlAlgorithm, CongestionControlError, CongestionOps, CongestionRegistry,
    CongestionState, ConfigError, LibraConfig,
};

/// Default segment size (bytes).
pub const DEFAULT_SEGMENT_SIZE: usize = 536;

/// Default initial congestion window, in segments (IW10).
pub const DEFAULT_INITIAL_CWND_SEGMENTS: usize = 10;

/// Default initial slow start threshold: effectively unbounded, so the first
/// slow start only ends on loss.
pub const DEFAULT_INITIAL_SSTHRESH: usize = u32::MAX as usize;

/// Per-transport congestion control settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongestionControlConfig {
    /// Congestion control algorithm for transport connections.
    ///
    /// Available algorithms:
    /// - `libra` (default): delay-penalized, bandwidth-scaled additive increase
    /// - `newreno`: NewReno
    #[serde(default = "default_congestion_control", rename = "congestion-control")]
    pub congestion_control: String,

    /// Segment size (bytes).
    #[serde(default = "default_segment_size", rename = "segment-size")]
    pub segment_size: usize,

    /// Initial congestion window, in segments.
    #[serde(
        default = "default_initial_cwnd_segments",
        rename = "initial-cwnd-segments"
    )]
    pub initial_cwnd_segments: usize,

    /// Initial slow start threshold (bytes).
    #[serde(default = "default_initial_ssthresh", rename = "initial-ssthresh")]
    pub initial_ssthresh: usize,

    /// Libra tuning. Ignored by other algorithms.
    #[serde(default)]
    pub libra: LibraConfig,
}

impl Default for CongestionControlConfig {
    fn default() -> Self {
        Self {
            congestion_control: default_congestion_control(),
            segment_size: DEFAULT_SEGMENT_SIZE,
            initial_cwnd_segments: DEFAULT_INITIAL_CWND_SEGMENTS,
            initial_ssthresh: DEFAULT_INITIAL_SSTHRESH,
            libra: LibraConfig::default(),
        }
    }
}

impl CongestionControlConfig {
    /// Create a configuration for the specified algorithm with defaults.
    pub fn new(algorithm: CongestionControlAlgorithm) -> Self {
        Self {
            congestion_control: algorithm.name().to_string(),
            ..Self::default()
        }
    }

    /// Set the Libra tuning parameters.
    pub fn with_libra_config(mut self, libra: LibraConfig) -> Self {
        self.libra = libra;
        self
    }

    /// Set the segment size.
    pub fn with_segment_size(mut self, segment_size: usize) -> Self {
        self.segment_size = segment_size;
        self
    }

    /// Set the initial congestion window, in segments.
    pub fn with_initial_cwnd_segments(mut self, segments: usize) -> Self {
        self.initial_cwnd_segments = segments;
        self
    }

    /// Set the initial slow start threshold.
    pub fn with_initial_ssthresh(mut self, ssthresh: usize) -> Self {
        self.initial_ssthresh = ssthresh;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Loading congestion control config");
        Self::from_toml_str(&content)
    }

    /// Write the configuration as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segment_size == 0 {
            return Err(ConfigError::ZeroSegmentSize);
        }
        if self.initial_cwnd_segments == 0 {
            return Err(ConfigError::OutOfRange {
                field: "initial-cwnd-segments",
                value: 0.0,
                expected: "at least one segment",
            });
        }
        if self.initial_ssthresh == 0 {
            return Err(ConfigError::OutOfRange {
                field: "initial-ssthresh",
                value: 0.0,
                expected: "> 0",
            });
        }
        self.libra.validate()
    }

    /// Window state for a freshly established connection.
    pub fn initial_state(&self) -> CongestionState {
        CongestionState::new(
            self.segment_size,
            self.segment_size.saturating_mul(self.initial_cwnd_segments),
            self.initial_ssthresh,
        )
    }

    /// Build the configured controller from the built-in algorithms.
    pub fn build(&self) -> Result<Box<dyn CongestionOps>, CongestionControlError> {
        self.build_with(&CongestionRegistry::with_builtin())
    }

    /// Build the configured controller from a caller-supplied registry.
    pub fn build_with(
        &self,
        registry: &CongestionRegistry,
    ) -> Result<Box<dyn CongestionOps>, CongestionControlError> {
        self.validate()?;
        registry.build(&self.congestion_control, self)
    }
}

/// Default congestion control algorithm.
fn default_congestion_control() -> String {
    "libra".to_string()
}

fn default_segment_size() -> usize {
    DEFAULT_SEGMENT_SIZE
}

fn default_initial_cwnd_segments() -> usize {
    DEFAULT_INITIAL_CWND_SEGMENTS
}

fn default_initial_ssthresh() -> usize {
    DEFAULT_INITIAL_SSTHRESH
}
