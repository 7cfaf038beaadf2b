//! Generation report aggregating all pipeline stages.

use std::fmt;

use serde::Serialize;
use stforge_repair::RepairReport;
use stforge_verify::ReportSummary;

use crate::pipeline::PipelineOutput;

/// Serializable summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GenerationReport {
    pub profile: String,
    pub source: String,
    pub duration_ms: u64,
    pub upstream_error: Option<String>,
    pub repair: RepairReport,
    pub raw_findings: usize,
    pub tag_count: usize,
    pub validation: ReportSummary,
    pub compliant: bool,
    /// SHA-256 of the repaired program text.
    pub fingerprint: String,
}

impl GenerationReport {
    pub fn from_output(output: &PipelineOutput) -> Self {
        Self {
            profile: output.profile.key.clone(),
            source: output.source.clone(),
            duration_ms: output.duration_ms,
            upstream_error: output.upstream_error.clone(),
            repair: output.repair.clone(),
            raw_findings: output.raw_findings.len(),
            tag_count: output.tags.len(),
            validation: output.validation.summary.clone(),
            compliant: output.validation.is_compliant(),
            fingerprint: output.program.fingerprint(),
        }
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Generation Report ===")?;
        writeln!(f, "Profile: {}", self.profile)?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f, "Duration: {} ms", self.duration_ms)?;
        if let Some(ref e) = self.upstream_error {
            writeln!(f, "Upstream error: {e}")?;
        }
        writeln!(f)?;
        writeln!(f, "--- Repair ---")?;
        writeln!(f, "  Extraction: {}", self.repair.path)?;
        writeln!(
            f,
            "  Interlock: {}",
            if self.repair.interlock_injected {
                "INJECTED"
            } else {
                "present"
            }
        )?;
        writeln!(f, "  Closers appended: {}", self.repair.closers_appended)?;
        writeln!(f, "  Raw findings: {}", self.raw_findings)?;
        writeln!(f)?;
        writeln!(f, "--- Result ---")?;
        writeln!(f, "  Tags: {}", self.tag_count)?;
        writeln!(
            f,
            "  Validation: {} ({} errors, {} warnings)",
            if self.compliant { "PASSED" } else { "FINDINGS" },
            self.validation.errors,
            self.validation.warnings
        )?;
        writeln!(f, "  Fingerprint: {}", self.fingerprint)
    }
}
