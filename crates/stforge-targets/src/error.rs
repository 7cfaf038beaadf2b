//! Error types for hardware profile operations.

use std::path::PathBuf;

/// Errors that can occur during profile operations.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading or writing profile files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile file not found.
    #[error("profile file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No built-in or project profile matches the name.
    #[error("unknown hardware profile: '{name}'")]
    UnknownProfile { name: String },

    /// Validation error in a profile definition.
    #[error("validation error: {detail}")]
    Validation {
        /// Description of the validation failure.
        detail: String,
    },
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, TargetError>;
