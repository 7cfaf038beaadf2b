//! Code extraction from raw generator output.
//!
//! Three strategies are tried in order and the first that matches wins:
//! 1. the content of the first fenced block,
//! 2. a bounded capture from the first declaration-block opener through the
//!    last terminal marker, widened to whole code lines,
//! 3. the text with conversational lead-in lines and stray fences removed.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use stforge_core::lexicon::{is_code_line, is_comment_line};

/// Which extraction strategy produced the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionPath {
    Fenced,
    Bounded,
    Trimmed,
}

impl fmt::Display for ExtractionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionPath::Fenced => write!(f, "fenced block"),
            ExtractionPath::Bounded => write!(f, "bounded capture"),
            ExtractionPath::Trimmed => write!(f, "trimmed text"),
        }
    }
}

/// The code body pulled out of a raw response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub path: ExtractionPath,
    pub body: String,
}

/// Conversational lead-ins removed by the trimmed strategy (lower case).
const CONVERSATIONAL_PREFIXES: [&str; 4] = ["here is", "here's", "sure", "this is"];

fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)```[^\n`]*\n(.*?)```").expect("fence pattern compiles"))
}

fn opener_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(?:PROGRAM|FUNCTION_BLOCK|FUNCTION|VAR(?:_[A-Z_]+)?)\b")
            .expect("opener pattern compiles")
    })
}

fn terminal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\bEND_(?:IF\s*;|VAR\b;?|PROGRAM\b;?|FUNCTION_BLOCK\b;?|FUNCTION\b;?)",
        )
        .expect("terminal pattern compiles")
    })
}

/// Extract the code body from a raw response. Never fails: when no code
/// shape is recognized the trimmed text is returned.
pub fn extract(raw: &str) -> Extraction {
    if let Some(body) = fenced_block(raw) {
        return Extraction {
            path: ExtractionPath::Fenced,
            body: body.to_string(),
        };
    }
    if let Some(body) = bounded_block(raw) {
        return Extraction {
            path: ExtractionPath::Bounded,
            body: body.to_string(),
        };
    }
    Extraction {
        path: ExtractionPath::Trimmed,
        body: strip_narration(raw),
    }
}

/// Content of the first fenced block, verbatim, without the fence lines.
pub fn fenced_block(raw: &str) -> Option<&str> {
    fence_pattern()
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Capture from the first block opener through the last terminal marker.
///
/// Returns `None` when there is no opener or no terminal after it.
pub fn bounded_block(raw: &str) -> Option<&str> {
    let opener = opener_pattern().find(raw)?;
    let end = opener.start() + last_terminal_end(&raw[opener.start()..])?;
    let start = widen_start(raw, opener.start());
    let end = widen_end(raw, end);
    Some(&raw[start..end])
}

/// Byte offset just past the last terminal marker in `text`.
fn last_terminal_end(text: &str) -> Option<usize> {
    let keyword_end = terminal_pattern().find_iter(text).map(|m| m.end()).max();

    let bytes = text.as_bytes();
    let semicolon_end = bytes
        .iter()
        .enumerate()
        .filter(|(i, b)| {
            **b == b';'
                && bytes
                    .get(i + 1)
                    .map_or(true, |c| !(c.is_ascii_alphanumeric() || *c == b'_'))
        })
        .map(|(i, _)| i + 1)
        .max();

    keyword_end.max(semicolon_end)
}

/// Move a capture start back over contiguous code lines when the opener
/// begins its line.
fn widen_start(raw: &str, pos: usize) -> usize {
    let line_start = raw[..pos].rfind('\n').map_or(0, |i| i + 1);
    if !raw[line_start..pos].trim().is_empty() {
        return pos;
    }

    let mut start = line_start;
    while start > 0 {
        let prev_end = start - 1;
        let prev_start = raw[..prev_end].rfind('\n').map_or(0, |i| i + 1);
        if !is_code_line(&raw[prev_start..prev_end]) {
            break;
        }
        start = prev_start;
    }
    start
}

/// Move a capture end forward over a trailing comment and contiguous code
/// lines (truncated statements, closing keywords).
fn widen_end(raw: &str, pos: usize) -> usize {
    let line_end = raw[pos..].find('\n').map_or(raw.len(), |i| pos + i);
    let rest = raw[pos..line_end].trim();
    if !(rest.is_empty() || is_comment_line(rest)) {
        return pos;
    }

    let mut end = line_end;
    while end < raw.len() {
        let next_start = end + 1;
        let next_end = raw[next_start..]
            .find('\n')
            .map_or(raw.len(), |i| next_start + i);
        if !is_code_line(&raw[next_start..next_end]) {
            break;
        }
        end = next_end;
    }
    end
}

fn is_fence_marker(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Drop fence markers and leading conversational lines, then trim.
pub fn strip_narration(raw: &str) -> String {
    let mut lines: Vec<String> = raw
        .lines()
        .filter(|l| !is_fence_marker(l))
        .map(str::to_string)
        .collect();

    loop {
        let leading = lines.iter().take_while(|l| l.trim().is_empty()).count();
        lines.drain(..leading);
        let Some(first) = lines.first() else {
            break;
        };
        match strip_conversational_prefix(first) {
            None => break,
            Some(rest) if rest.is_empty() => {
                lines.remove(0);
            }
            Some(rest) => lines[0] = rest,
        }
    }

    lines.join("\n").trim().to_string()
}

/// If `line` opens with a conversational lead-in, return what follows the
/// first lone `:` on it (empty when there is none).
fn strip_conversational_prefix(line: &str) -> Option<String> {
    let t = line.trim_start();
    let lower = t.to_ascii_lowercase();
    let prefix = CONVERSATIONAL_PREFIXES.iter().find(|p| {
        lower.starts_with(*p)
            && lower[p.len()..]
                .chars()
                .next()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    })?;

    let bytes = t.as_bytes();
    let colon = (prefix.len()..bytes.len())
        .find(|&i| bytes[i] == b':' && bytes.get(i + 1) != Some(&b'='));
    Some(match colon {
        Some(i) => t[i + 1..].trim().to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_block_wins() {
        let raw = "Sure!\n```iecst\nVAR\n  x : INT;\nEND_VAR\n```\nHope this helps.";
        let e = extract(raw);
        assert_eq!(e.path, ExtractionPath::Fenced);
        assert_eq!(e.body, "VAR\n  x : INT;\nEND_VAR\n");
    }

    #[test]
    fn only_first_fenced_block_is_taken() {
        let raw = "```\nA := 1;\n```\ntext\n```\nB := 2;\n```";
        assert_eq!(fenced_block(raw), Some("A := 1;\n"));
    }

    #[test]
    fn unclosed_fence_falls_through_to_bounded() {
        let raw = "```st\nVAR\n  x : BOOL;\nEND_VAR\nIF x THEN\n  y := 1;";
        let e = extract(raw);
        assert_eq!(e.path, ExtractionPath::Bounded);
        assert_eq!(e.body, "VAR\n  x : BOOL;\nEND_VAR\nIF x THEN\n  y := 1;");
    }

    #[test]
    fn bounded_capture_drops_narration() {
        let raw = "Here is the program you asked for:\n\nVAR\n  Start : BOOL;\nEND_VAR\nMotor := Start;\n\nLet me know if you need more.";
        let e = extract(raw);
        assert_eq!(e.path, ExtractionPath::Bounded);
        assert_eq!(
            e.body.trim(),
            "VAR\n  Start : BOOL;\nEND_VAR\nMotor := Start;"
        );
    }

    #[test]
    fn lowercase_program_in_prose_does_not_open_capture() {
        let raw = "This program turns on the motor.\nVAR\n  m : BOOL;\nEND_VAR";
        let body = bounded_block(raw).unwrap();
        assert!(body.starts_with("VAR"));
    }

    #[test]
    fn bounded_capture_keeps_leading_comments_and_end_program() {
        let raw = "Explanation first.\n(* Conveyor control *)\nPROGRAM Main\nVAR\n  E_STOP : BOOL;\nEND_VAR\nEND_PROGRAM\nThat's all.";
        let body = bounded_block(raw).unwrap();
        assert!(body.starts_with("(* Conveyor control *)"));
        assert!(body.trim_end().ends_with("END_PROGRAM"));
    }

    #[test]
    fn bounded_capture_needs_terminal() {
        assert_eq!(bounded_block("VAR\n  x : BOOL"), None);
        assert_eq!(bounded_block("x := 1;"), None);
    }

    #[test]
    fn semicolon_followed_by_word_is_not_terminal() {
        assert_eq!(last_terminal_end("VAR a;b"), None);
        assert_eq!(last_terminal_end("VAR a; b"), Some(6));
    }

    #[test]
    fn mid_line_opener_is_not_widened() {
        let raw = "Code: VAR x : INT; END_VAR";
        assert_eq!(bounded_block(raw), Some("VAR x : INT; END_VAR"));
    }

    #[test]
    fn trailing_comment_on_terminal_line_is_kept() {
        let raw = "VAR\n  a : INT;\nEND_VAR (* io *)\nThanks!";
        assert_eq!(bounded_block(raw), Some("VAR\n  a : INT;\nEND_VAR (* io *)"));
    }

    #[test]
    fn trimmed_strips_conversational_lines() {
        let e = extract("Sure thing!\nHere is the logic: Motor := Start\n");
        assert_eq!(e.path, ExtractionPath::Trimmed);
        assert_eq!(e.body, "Motor := Start");
    }

    #[test]
    fn trimmed_keeps_assignment_after_prefix_without_colon() {
        assert_eq!(strip_narration("This is how it works\nLamp := TRUE"), "Lamp := TRUE");
    }

    #[test]
    fn prefix_must_be_whole_word() {
        assert_eq!(strip_conversational_prefix("Sure_Count := 1"), None);
        assert_eq!(strip_conversational_prefix("Surely"), None);
        assert_eq!(
            strip_conversational_prefix("here's: x").as_deref(),
            Some("x")
        );
    }

    #[test]
    fn trimmed_drops_stray_fences() {
        assert_eq!(strip_narration("```\nE_STOP := TRUE"), "E_STOP := TRUE");
    }

    #[test]
    fn empty_input_extracts_empty_body() {
        let e = extract("   \n  ");
        assert_eq!(e.path, ExtractionPath::Trimmed);
        assert!(e.body.is_empty());
    }
}
