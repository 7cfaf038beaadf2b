//! CLI command implementations.

pub mod generate;
pub mod init;
pub mod profile;
pub mod prompt;
pub mod repair;
pub mod simulate;
pub mod tags;
pub mod validate;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a text input: the named file, or stdin when absent or `-`.
pub(crate) fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}
