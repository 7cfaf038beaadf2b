//! Declaration scanning.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use stforge_core::lexicon::has_interlock_token;
use stforge_core::{RepairedProgram, Tag};
use tracing::debug;

/// Identifiers that the declaration pattern can catch but which are
/// keywords, compared upper-cased.
const RESERVED: [&str; 7] = ["VAR", "END_VAR", "PROGRAM", "END_PROGRAM", "IF", "THEN", "ELSE"];

fn declaration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b([A-Za-z_]\w*)\s*(?:AT\s+[^\s:;]+\s*)?:\s*([A-Za-z_]\w*)\s*;")
            .expect("declaration pattern compiles")
    })
}

/// Extract the tag inventory of a repaired program.
pub fn extract_tags(program: &RepairedProgram) -> Vec<Tag> {
    extract_tags_from(&program.text())
}

/// Extract tags from arbitrary text.
///
/// Declarations with an initializer (`x : INT := 0;`) do not match. When
/// an interlock token (`E_STOP` or `ESTOP`, in any case, also inside longer
/// names) appears but no tag is named `E_STOP`, a synthetic `E_STOP : BOOL`
/// is appended last.
pub fn extract_tags_from(text: &str) -> Vec<Tag> {
    let mut seen = HashSet::new();
    let mut tags: Vec<Tag> = declaration_pattern()
        .captures_iter(text)
        .map(|c| Tag::new(&c[1], &c[2]))
        .filter(|t| !RESERVED.contains(&t.key().as_str()))
        .filter(|t| seen.insert(t.key()))
        .collect();

    if has_interlock_token(text) && !tags.iter().any(Tag::is_interlock) {
        debug!("interlock referenced without an E_STOP declaration, synthesizing tag");
        tags.push(Tag::interlock());
    }

    debug!(count = tags.len(), "extracted tags");
    tags
}
