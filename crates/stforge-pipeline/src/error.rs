//! Pipeline errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of an upstream draft source.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("cannot read draft file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot start generator '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("generator '{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("generator '{command}' produced output that is not UTF-8")]
    NotUtf8 { command: String },

    #[error("cannot encode prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("generator unavailable: {message}")]
    Unavailable { message: String },
}

/// Errors writing pipeline artifacts.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("output path {} exists and is not a directory", path.display())]
    NotADirectory { path: PathBuf },
}
