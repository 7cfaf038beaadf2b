//! The emergency-stop wrapper injected around code that lacks an interlock.
//!
//! The declaration carries an initial value, which keeps it outside the tag
//! declaration pattern; the tag extractor synthesizes `E_STOP : BOOL` for it
//! after all formally declared tags.

/// Name of the mandatory interlock signal.
pub const INTERLOCK_SIGNAL: &str = "E_STOP";

/// Declared type of the interlock signal.
pub const INTERLOCK_TYPE: &str = "BOOL";

/// Comment line heading an injected wrapper.
pub const INJECTION_NOTE: &str =
    "(* Safety interlock injected: no emergency stop found in generated code *)";

const INDENT: &str = "    ";

/// Wrap `body` in an `E_STOP` declaration block and an `IF NOT E_STOP` guard.
///
/// Non-blank body lines are indented one level; blank lines stay blank.
pub fn wrap<S: AsRef<str>>(body: &[S]) -> Vec<String> {
    let mut lines = Vec::with_capacity(body.len() + 6);
    lines.push(INJECTION_NOTE.to_string());
    lines.push("VAR".to_string());
    lines.push(format!(
        "{INDENT}{INTERLOCK_SIGNAL} : {INTERLOCK_TYPE} := FALSE;"
    ));
    lines.push("END_VAR".to_string());
    lines.push(format!("IF NOT {INTERLOCK_SIGNAL} THEN"));
    for line in body {
        let line = line.as_ref();
        if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{INDENT}{line}"));
        }
    }
    lines.push("END_IF;".to_string());
    lines
}
