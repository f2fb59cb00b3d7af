use thiserror::Error;

/// Errors raised while loading or validating congestion control configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} out of range: {value} ({expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("segment size must be non-zero")]
    ZeroSegmentSize,

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors raised when selecting or constructing a congestion controller.
#[derive(Debug, Error)]
pub enum CongestionControlError {
    #[error("unknown congestion control algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("congestion control algorithm already registered: {0}")]
    DuplicateAlgorithm(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
