//! Error types for simulator configuration.

/// Rejected ramp parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("nominal speed must be a positive finite number, got {0}")]
    NominalSpeed(f64),

    #[error("acceleration step must be a positive finite number, got {0}")]
    AccelStep(f64),
}

/// Result type for simulator configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;
