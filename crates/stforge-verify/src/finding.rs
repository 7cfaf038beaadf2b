//! Individual validation findings.

use std::fmt;

use serde::Serialize;

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARN"),
        }
    }
}

/// One problem found in program text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValidationFinding {
    /// None of `E_STOP`, `EMERGENCY`, `ESTOP` appears.
    MissingInterlock,
    /// More `IF` openers than `END_IF` closers.
    UnbalancedBlock { openers: usize, closers: usize },
    /// A statement-like line (1-based) that does not end with `;`.
    MissingTerminator { line: usize },
}

impl ValidationFinding {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationFinding::MissingInterlock | ValidationFinding::UnbalancedBlock { .. } => {
                Severity::Error
            }
            ValidationFinding::MissingTerminator { .. } => Severity::Warning,
        }
    }

    /// The 1-based line a finding points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ValidationFinding::MissingTerminator { line } => Some(*line),
            _ => None,
        }
    }

    /// A short hint on how to resolve the finding.
    pub fn suggestion(&self) -> &'static str {
        match self {
            ValidationFinding::MissingInterlock => {
                "Declare E_STOP : BOOL and guard outputs with IF NOT E_STOP THEN"
            }
            ValidationFinding::UnbalancedBlock { .. } => "Close every IF with END_IF;",
            ValidationFinding::MissingTerminator { .. } => "Terminate the statement with ';'",
        }
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFinding::MissingInterlock => {
                write!(f, "missing mandatory emergency stop (E_STOP) logic")
            }
            ValidationFinding::UnbalancedBlock { openers, closers } => write!(
                f,
                "incomplete IF-THEN logic: {openers} IF opener(s), {closers} END_IF closer(s)"
            ),
            ValidationFinding::MissingTerminator { line } => {
                write!(f, "line {line}: statement is missing a terminating ';'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities() {
        assert_eq!(ValidationFinding::MissingInterlock.severity(), Severity::Error);
        assert_eq!(
            ValidationFinding::MissingTerminator { line: 3 }.severity(),
            Severity::Warning
        );
        assert!(Severity::Error < Severity::Warning);
    }

    #[test]
    fn display_mentions_line() {
        let f = ValidationFinding::MissingTerminator { line: 7 };
        assert_eq!(f.line(), Some(7));
        assert!(f.to_string().starts_with("line 7:"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(ValidationFinding::MissingTerminator { line: 2 }).unwrap();
        assert_eq!(json["kind"], "missing-terminator");
        assert_eq!(json["line"], 2);
    }
}
