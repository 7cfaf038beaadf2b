//! Error types for program text operations.

use std::path::PathBuf;

/// Errors that can occur when building a program from text.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// The text contained no non-blank lines.
    #[error("program text is empty")]
    Empty,

    /// Program file not found.
    #[error("program file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// I/O error reading a program file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for program operations.
pub type Result<T> = std::result::Result<T, ProgramError>;
