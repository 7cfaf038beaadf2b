//! Normalized program text.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{ProgramError, Result};
use crate::hash::{content_hash, hash_hex};
use crate::interlock;
use crate::lexicon::{self, BlockBalance};

/// Split text into lines without trailing whitespace and drop blank lines
/// at both ends. Items containing newlines are split further.
pub fn normalize_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines: Vec<String> = lines
        .into_iter()
        .flat_map(|l| {
            let l = l.as_ref();
            if l.is_empty() {
                return vec![String::new()];
            }
            l.lines().map(|s| s.trim_end().to_string()).collect()
        })
        .collect();

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);
    lines
}

/// A sequence of Structured Text lines.
///
/// Lines are stored without trailing whitespace and the sequence never
/// starts or ends with a blank line, so rendering and re-reading the text
/// yields an equal program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepairedProgram {
    lines: Vec<String>,
}

impl RepairedProgram {
    /// Build a program from lines, normalizing whitespace at the edges.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = normalize_lines(lines);
        if lines.is_empty() {
            return Err(ProgramError::Empty);
        }
        Ok(Self { lines })
    }

    /// Parse program text.
    pub fn parse(source: &str) -> Result<Self> {
        Self::from_lines(source.lines())
    }

    /// Load program text from a file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ProgramError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// A program consisting only of the injected interlock wrapper.
    pub fn interlock_stub() -> Self {
        Self {
            lines: interlock::wrap::<&str>(&[]),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The program rendered with `\n` separators and no trailing newline.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn balance(&self) -> BlockBalance {
        BlockBalance::of(&self.text())
    }

    /// True when `E_STOP` or `ESTOP` appears anywhere in the program.
    pub fn has_interlock(&self) -> bool {
        lexicon::has_interlock_token(&self.text())
    }

    /// SHA-256 of the rendered text, hex encoded.
    pub fn fingerprint(&self) -> String {
        hash_hex(&content_hash(self.text().as_bytes()))
    }
}

impl fmt::Display for RepairedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}
