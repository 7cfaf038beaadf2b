//! Lexical helpers for Structured Text.
//!
//! Block balance is checked by counting tokens, not by parsing scope:
//! an opener is a whole-word `IF` followed by whitespace (so `END_IF` and
//! `ELSIF` never count), a closer is any occurrence of `END_IF` (so
//! `END_IF;` counts once).

use std::sync::OnceLock;

use regex::Regex;

/// Block-closing keyword, matched as a substring.
pub const CLOSER: &str = "END_IF";

/// The line appended once per missing closer.
pub const CLOSER_STATEMENT: &str = "END_IF;";

/// Tokens that satisfy the repairer's interlock search.
pub const INTERLOCK_TOKENS: [&str; 2] = ["E_STOP", "ESTOP"];

/// Tokens that satisfy the validator's interlock check.
pub const EMERGENCY_TOKENS: [&str; 3] = ["E_STOP", "EMERGENCY", "ESTOP"];

/// Leading keywords that mark a line as Structured Text.
const LINE_KEYWORDS: &[&str] = &[
    "IF",
    "THEN",
    "ELSE",
    "ELSIF",
    "CASE",
    "OF",
    "FOR",
    "WHILE",
    "REPEAT",
    "UNTIL",
    "DO",
    "RETURN",
    "EXIT",
    "PROGRAM",
    "FUNCTION",
    "FUNCTION_BLOCK",
    "TYPE",
    "STRUCT",
    "CONSTANT",
    "RETAIN",
];

fn opener_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bIF\s").expect("opener pattern compiles"))
}

/// Opener and closer counts for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockBalance {
    pub openers: usize,
    pub closers: usize,
}

impl BlockBalance {
    /// Count openers and closers in `text`.
    pub fn of(text: &str) -> Self {
        Self {
            openers: count_openers(text),
            closers: count_closers(text),
        }
    }

    /// Number of closers that would have to be appended to balance the text.
    pub fn missing_closers(&self) -> usize {
        self.openers.saturating_sub(self.closers)
    }

    /// True when openers do not exceed closers. Excess closers are tolerated.
    pub fn is_balanced(&self) -> bool {
        self.openers <= self.closers
    }
}

/// Count conditional openers (case-insensitive whole-word `IF` + whitespace).
pub fn count_openers(text: &str) -> usize {
    opener_pattern().find_iter(text).count()
}

/// Count block closers (case-insensitive substring `END_IF`).
pub fn count_closers(text: &str) -> usize {
    text.to_ascii_uppercase().matches(CLOSER).count()
}

/// True when the text carries `E_STOP` or `ESTOP` in any case.
pub fn has_interlock_token(text: &str) -> bool {
    contains_any(text, &INTERLOCK_TOKENS)
}

/// True when the text carries `E_STOP`, `EMERGENCY`, or `ESTOP` in any case.
pub fn mentions_emergency_stop(text: &str) -> bool {
    contains_any(text, &EMERGENCY_TOKENS)
}

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    let upper = text.to_ascii_uppercase();
    tokens.iter().any(|t| upper.contains(t))
}

/// True for `(* ... *)` and `// ...` comment lines. Expects trimmed input.
pub fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("(*") || trimmed.starts_with("//")
}

/// The leading identifier-like word of a trimmed line, as written.
pub fn first_word(trimmed: &str) -> &str {
    let end = trimmed
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}

/// True when the line opens with an upper-case Structured Text keyword.
///
/// Matching is case-sensitive so prose such as "If you need..." is not
/// mistaken for code.
pub fn starts_with_keyword(trimmed: &str) -> bool {
    let word = first_word(trimmed);
    if word.is_empty() {
        return false;
    }
    word.starts_with("END_")
        || word == "VAR"
        || word.starts_with("VAR_")
        || LINE_KEYWORDS.contains(&word)
}

/// True for lines that plausibly belong to a code body: blank lines,
/// comments, terminated statements, assignments, and keyword lines.
pub fn is_code_line(line: &str) -> bool {
    let t = line.trim();
    t.is_empty()
        || is_comment_line(t)
        || t.ends_with(';')
        || t.contains(":=")
        || starts_with_keyword(t)
}
