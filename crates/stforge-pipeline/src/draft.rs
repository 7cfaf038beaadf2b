//! Upstream draft sources.
//!
//! A draft source is an untrusted text producer. Whatever it returns is
//! handed to the repairer; none of its output is trusted to be code.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use serde::{Deserialize, Serialize};
use stforge_targets::HardwareProfile;
use tracing::debug;

use crate::error::DraftError;
use crate::prompt::DraftPrompt;

/// Produces a raw draft for an instruction and hardware profile.
///
/// Object-safe so sources can be stored in `Box<dyn DraftSource>`.
pub trait DraftSource: fmt::Debug + Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Produce raw response text.
    fn draft_code(&self, instruction: &str, profile: &HardwareProfile) -> Result<String, DraftError>;
}

/// Returns the same canned text for every request.
#[derive(Debug, Clone)]
pub struct StaticDraft {
    text: String,
}

impl StaticDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DraftSource for StaticDraft {
    fn name(&self) -> &str {
        "static"
    }

    fn draft_code(&self, _instruction: &str, _profile: &HardwareProfile) -> Result<String, DraftError> {
        Ok(self.text.clone())
    }
}

/// Replays a response saved to disk.
#[derive(Debug, Clone)]
pub struct FileDraft {
    path: PathBuf,
}

impl FileDraft {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DraftSource for FileDraft {
    fn name(&self) -> &str {
        "file"
    }

    fn draft_code(&self, _instruction: &str, _profile: &HardwareProfile) -> Result<String, DraftError> {
        std::fs::read_to_string(&self.path).map_err(|source| DraftError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

/// How the prompt is written to a generator command's stdin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptFormat {
    /// System block, blank line, user block.
    #[default]
    Text,
    /// The [`DraftPrompt`] as one JSON object.
    Json,
}

/// Runs an external generator: prompt on stdin, response on stdout.
///
/// The hardware profile key is also exported as `STFORGE_HARDWARE`.
#[derive(Debug, Clone)]
pub struct CommandDraft {
    program: String,
    args: Vec<String>,
    format: PromptFormat,
}

impl CommandDraft {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            format: PromptFormat::default(),
        }
    }

    pub fn with_format(mut self, format: PromptFormat) -> Self {
        self.format = format;
        self
    }

    fn encode(&self, prompt: &DraftPrompt) -> Result<String, DraftError> {
        Ok(match self.format {
            PromptFormat::Text => prompt.render(),
            PromptFormat::Json => serde_json::to_string(prompt)?,
        })
    }
}

impl DraftSource for CommandDraft {
    fn name(&self) -> &str {
        &self.program
    }

    fn draft_code(&self, instruction: &str, profile: &HardwareProfile) -> Result<String, DraftError> {
        let input = self.encode(&DraftPrompt::new(instruction, profile))?;
        let spawn_err = |source| DraftError::Spawn {
            command: self.program.clone(),
            source,
        };

        debug!(command = %self.program, args = ?self.args, "starting generator");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("STFORGE_HARDWARE", &profile.key)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Stdin is fed from its own thread while stdout and stderr drain here.
        let writer = child
            .stdin
            .take()
            .map(|mut stdin| thread::spawn(move || stdin.write_all(input.as_bytes())));

        let output = child.wait_with_output().map_err(spawn_err)?;
        if let Some(writer) = writer {
            match writer.join() {
                // A generator that ignores its input may close stdin early.
                Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => return Err(spawn_err(e)),
                Ok(_) => {}
                Err(_) => {
                    return Err(spawn_err(io::Error::new(
                        io::ErrorKind::Other,
                        "prompt writer panicked",
                    )))
                }
            }
        }
        if !output.status.success() {
            return Err(DraftError::CommandFailed {
                command: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8(output.stdout).map_err(|_| DraftError::NotUtf8 {
            command: self.program.clone(),
        })
    }
}
