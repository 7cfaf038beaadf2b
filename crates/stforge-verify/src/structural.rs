//! The three structural checks.

use stforge_core::lexicon::{is_comment_line, mentions_emergency_stop, BlockBalance};
use stforge_core::RepairedProgram;
use tracing::debug;

use crate::finding::ValidationFinding;

/// Leading words (case-insensitive prefix match) that exempt a line from the
/// terminator check.
const EXEMPT_PREFIXES: [&str; 8] = [
    "VAR",
    "END_VAR",
    "IF",
    "THEN",
    "ELSE",
    "ELSIF",
    "PROGRAM",
    "END_PROGRAM",
];

/// Run every check over `text` and collect the findings.
///
/// An empty result means the text is compliant.
pub fn validate(text: &str) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    if !mentions_emergency_stop(text) {
        findings.push(ValidationFinding::MissingInterlock);
    }

    let balance = BlockBalance::of(text);
    if !balance.is_balanced() {
        findings.push(ValidationFinding::UnbalancedBlock {
            openers: balance.openers,
            closers: balance.closers,
        });
    }

    findings.extend(
        text.lines()
            .enumerate()
            .filter(|(_, line)| needs_terminator(line))
            .map(|(i, _)| ValidationFinding::MissingTerminator { line: i + 1 }),
    );

    debug!(findings = findings.len(), "validated program text");
    findings
}

/// Validate a repaired program.
pub fn validate_program(program: &RepairedProgram) -> Vec<ValidationFinding> {
    validate(&program.text())
}

/// True for a line that looks like a statement but lacks its `;`.
fn needs_terminator(line: &str) -> bool {
    let t = line.trim();
    if t.is_empty() || is_comment_line(t) || t.ends_with(';') {
        return false;
    }
    let upper = t.to_uppercase();
    if upper.starts_with("END_") || EXEMPT_PREFIXES.iter().any(|p| upper.starts_with(p)) {
        return false;
    }
    t.contains(":=") || t.contains('(')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compliant_program_has_no_findings() {
        let text = "VAR\n  E_STOP : BOOL;\nEND_VAR\nIF NOT E_STOP THEN\n  Motor := TRUE;\nEND_IF;";
        assert!(validate(text).is_empty());
    }

    #[test]
    fn findings_are_ordered_and_not_short_circuited() {
        let text = "IF a THEN\n  x := 1\n  y := F(2)\n";
        let findings = validate(text);
        assert_eq!(
            findings,
            vec![
                ValidationFinding::MissingInterlock,
                ValidationFinding::UnbalancedBlock {
                    openers: 1,
                    closers: 0
                },
                ValidationFinding::MissingTerminator { line: 2 },
                ValidationFinding::MissingTerminator { line: 3 },
            ]
        );
    }

    #[test]
    fn emergency_word_satisfies_interlock_check() {
        let findings = validate("Emergency_Button : BOOL;");
        assert!(findings.is_empty());
    }

    #[test]
    fn elsif_and_end_if_do_not_unbalance() {
        let text = "ESTOP;\nIF a THEN\n  x := 1;\nELSIF b THEN\n  x := 2;\nEND_IF;";
        assert!(validate(text).is_empty());
    }

    #[test]
    fn terminator_heuristic_exemptions() {
        assert!(!needs_terminator(""));
        assert!(!needs_terminator("  (* x := 1 *)"));
        assert!(!needs_terminator("// call(x)"));
        assert!(!needs_terminator("IF Run(x) THEN"));
        assert!(!needs_terminator("elsif a := b THEN"));
        assert!(!needs_terminator("END_CASE"));
        assert!(!needs_terminator("  x := 1;"));
        // Prefix match, not whole word.
        assert!(!needs_terminator("Variable := 3"));
        // Neither assignment nor call.
        assert!(!needs_terminator("CASE state OF"));
        assert!(needs_terminator("  Timer(IN := Start, PT := T#5S)"));
        assert!(needs_terminator("Motor := TRUE"));
    }

    #[test]
    fn validate_program_reads_repaired_text() {
        let program = RepairedProgram::parse("E_STOP := FALSE;").unwrap();
        assert!(validate_program(&program).is_empty());
    }
}
