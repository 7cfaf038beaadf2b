//! Validation report with summary statistics.

use std::fmt;

use serde::Serialize;

use crate::finding::{Severity, ValidationFinding};
use crate::structural::validate;

/// Summary statistics for a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportSummary {
    pub lines_checked: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// The findings for one piece of text plus their summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ValidationReport {
    pub summary: ReportSummary,
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    /// Validate `text` and summarize the findings.
    pub fn build(text: &str) -> Self {
        Self::from_findings(text.lines().count(), validate(text))
    }

    pub fn from_findings(lines_checked: usize, findings: Vec<ValidationFinding>) -> Self {
        let errors = findings
            .iter()
            .filter(|f| f.severity() == Severity::Error)
            .count();
        Self {
            summary: ReportSummary {
                lines_checked,
                errors,
                warnings: findings.len() - errors,
            },
            findings,
        }
    }

    /// Compliant means no findings at all, warnings included.
    pub fn is_compliant(&self) -> bool {
        self.findings.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Validation Report ===")?;
        writeln!(
            f,
            "Lines: {} | Errors: {} | Warnings: {}",
            self.summary.lines_checked, self.summary.errors, self.summary.warnings
        )?;

        if self.findings.is_empty() {
            writeln!(f, "Code passed all safety checks.")?;
        } else {
            writeln!(f, "--- Findings ---")?;
            for finding in &self.findings {
                writeln!(f, "[{}] {finding}", finding.severity())?;
                writeln!(f, "  Suggestion: {}", finding.suggestion())?;
            }
        }
        Ok(())
    }
}
