//! Generate → repair → inventory → validate.

use std::time::Instant;

use stforge_core::{RepairedProgram, Tag};
use stforge_repair::{repair_with_report, RepairReport};
use stforge_tags::extract_tags;
use stforge_targets::HardwareProfile;
use stforge_verify::{validate, ValidationFinding, ValidationReport};
use tracing::{info, warn};

use crate::draft::DraftSource;

/// Everything produced for one instruction.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Hardware profile the draft was requested for.
    pub profile: HardwareProfile,
    /// Name of the draft source.
    pub source: String,
    /// Text handed to the repairer (the generator error text on failure).
    pub raw: String,
    /// The generator error, when the source failed.
    pub upstream_error: Option<String>,
    /// Findings on the raw text, before repair.
    pub raw_findings: Vec<ValidationFinding>,
    pub program: RepairedProgram,
    pub repair: RepairReport,
    pub tags: Vec<Tag>,
    /// Validation of the repaired program.
    pub validation: ValidationReport,
    pub duration_ms: u64,
}

/// Ask `source` for a draft and run it through the pipeline.
///
/// Never fails: a source error is turned into `generator error: ...` text
/// and repaired like any response.
pub fn generate(source: &dyn DraftSource, instruction: &str, profile: &HardwareProfile) -> PipelineOutput {
    let start = Instant::now();
    info!(source = source.name(), profile = %profile.key, "requesting draft");

    let (raw, upstream_error) = match source.draft_code(instruction, profile) {
        Ok(text) => (text, None),
        Err(e) => {
            warn!(source = source.name(), error = %e, "draft source failed");
            let message = e.to_string();
            (format!("generator error: {message}"), Some(message))
        }
    };

    let mut output = process(raw, profile);
    output.source = source.name().to_string();
    output.upstream_error = upstream_error;
    output.duration_ms = start.elapsed().as_millis() as u64;
    output
}

/// Run an already obtained response through repair, tag extraction, and
/// validation.
pub fn process(raw: String, profile: &HardwareProfile) -> PipelineOutput {
    let start = Instant::now();

    // Stage 1: findings on the untouched response
    let raw_findings = validate(&raw);

    // Stage 2: repair
    let (program, repair) = repair_with_report(&raw);
    info!(
        path = %repair.path,
        interlock_injected = repair.interlock_injected,
        closers_appended = repair.closers_appended,
        "repaired draft"
    );

    // Stage 3: tag inventory and validation, both read-only
    let tags = extract_tags(&program);
    let validation = ValidationReport::build(&program.text());
    info!(
        tags = tags.len(),
        findings = validation.findings.len(),
        "validated program"
    );

    PipelineOutput {
        profile: profile.clone(),
        source: "response".into(),
        raw,
        upstream_error: None,
        raw_findings,
        program,
        repair,
        tags,
        validation,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::StaticDraft;
    use crate::error::DraftError;

    #[derive(Debug)]
    struct Offline;

    impl DraftSource for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn draft_code(&self, _: &str, _: &HardwareProfile) -> Result<String, DraftError> {
            Err(DraftError::Unavailable {
                message: "no network".into(),
            })
        }
    }

    #[test]
    fn process_repairs_and_validates() {
        let output = process(
            "```\nVAR\n  Run : BOOL;\nEND_VAR\nIF Run THEN\n  Motor := TRUE;\n```".into(),
            &HardwareProfile::codesys(),
        );
        assert!(output.repair.interlock_injected);
        assert!(output.raw_findings.contains(&ValidationFinding::MissingInterlock));
        assert!(output.validation.is_compliant());
        assert_eq!(output.tags.len(), 2);
    }

    #[test]
    fn upstream_failure_is_repaired_text() {
        let output = generate(&Offline, "start motor", &HardwareProfile::codesys());
        assert_eq!(
            output.upstream_error.as_deref(),
            Some("generator unavailable: no network")
        );
        assert!(output.raw.starts_with("generator error: "));
        assert!(output.program.has_interlock());
        assert_eq!(output.source, "offline");
    }

    #[test]
    fn static_source_records_name() {
        let output = generate(
            &StaticDraft::new("E_STOP : BOOL;"),
            "x",
            &HardwareProfile::siemens_tia(),
        );
        assert_eq!(output.source, "static");
        assert!(output.upstream_error.is_none());
        assert!(!output.repair.interlock_injected);
        assert_eq!(output.profile.key, "siemens-tia");
    }
}
