//! Integration tests for the conveyor line demo.

use conveyor_line::{panel_signals, run_pipeline, start_up};
use stforge_sim::Phase;
use stforge_targets::HardwareProfile;
use stforge_verify::ValidationFinding;

#[test]
fn draft_is_repaired_into_compliant_program() {
    let output = run_pipeline(&HardwareProfile::siemens_tia());

    assert!(output.upstream_error.is_none());
    assert_eq!(
        output.raw_findings,
        vec![
            ValidationFinding::MissingInterlock,
            ValidationFinding::UnbalancedBlock {
                openers: 1,
                closers: 0
            },
        ]
    );
    assert!(output.repair.interlock_injected);
    assert_eq!(output.repair.closers_appended, 1);
    assert!(output.validation.is_compliant());
    assert!(output.validation.findings.is_empty());
}

#[test]
fn tags_end_with_synthesized_interlock() {
    let output = run_pipeline(&HardwareProfile::codesys());
    let names: Vec<&str> = output.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Start_Btn", "Part_Sensor", "Motor_Run", "E_STOP"]);
}

#[test]
fn panel_signals_skip_interlock() {
    let output = run_pipeline(&HardwareProfile::codesys());
    let signals = panel_signals(&output.tags);
    assert_eq!(signals.len(), 3);
    assert!(!signals.contains_key("E_STOP"));
}

#[test]
fn start_up_reaches_rated_speed() {
    let output = run_pipeline(&HardwareProfile::codesys());
    let states = start_up(&panel_signals(&output.tags), 20);

    assert_eq!(states.len(), 10);
    assert!(states[..9].iter().all(|s| s.phase == Phase::Accelerating));
    let last = states.last().unwrap();
    assert_eq!(last.phase, Phase::Running);
    assert_eq!(last.speed, 1500.0);
}

#[test]
fn bundle_uses_profile_exports() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_pipeline(&HardwareProfile::rockwell_studio5000());
    let bundle = stforge_pipeline::ArtifactBundle::write(&output, dir.path(), "conveyor").unwrap();

    let names: Vec<&str> = bundle.entries.iter().map(|e| e.file_name.as_str()).collect();
    assert!(names.contains(&"conveyor.st"));
    assert!(names.contains(&"Tags.CSV"));
    assert!(dir.path().join("manifest.json").is_file());
}
