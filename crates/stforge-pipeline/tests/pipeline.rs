//! End-to-end pipeline tests.

use stforge_core::Tag;
use stforge_pipeline::{generate, ArtifactBundle, FileDraft, StaticDraft};
use stforge_repair::ExtractionPath;
use stforge_targets::{resolve_profile, HardwareProfile};
use stforge_verify::ValidationFinding;

const CHATTY: &str = "Sure, here:\n```\nVAR\n  Sensor_B : BOOL;\nEND_VAR\nIF Sensor_B THEN\n  Motor_Start := TRUE;\n```";

#[test]
fn chatty_response_becomes_compliant_program() {
    let output = generate(
        &StaticDraft::new(CHATTY),
        "Start Motor_Start when Sensor_B is TRUE",
        &HardwareProfile::codesys(),
    );

    assert_eq!(output.repair.path, ExtractionPath::Fenced);
    assert!(output.repair.interlock_injected);
    assert_eq!(output.repair.closers_appended, 1);
    assert_eq!(
        output.tags,
        vec![Tag::new("Sensor_B", "BOOL"), Tag::new("E_STOP", "BOOL")]
    );
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
    assert!(output.validation.is_compliant());
}

#[test]
fn saved_response_round_trips_through_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let response = dir.path().join("response.md");
    std::fs::write(
        &response,
        "Here is the program you asked for:\n\nPROGRAM Fan\nVAR\n  Fan_Run : BOOL;\n  ESTOP_OK : BOOL;\nEND_VAR\nIF ESTOP_OK THEN\n  Fan_Run := TRUE;\nEND_IF;\nEND_PROGRAM\n\nLet me know if you need changes.",
    )
    .unwrap();

    let profile = resolve_profile("Beckhoff TwinCAT").unwrap();
    let output = generate(&FileDraft::new(&response), "run the fan", &profile);
    assert_eq!(output.repair.path, ExtractionPath::Bounded);
    assert!(!output.repair.interlock_injected);
    assert_eq!(output.program.lines()[0], "PROGRAM Fan");
    assert_eq!(output.program.lines().last().unwrap(), "END_PROGRAM");

    let bundle = ArtifactBundle::write(&output, &dir.path().join("out"), "fan").unwrap();
    let gvl = std::fs::read_to_string(dir.path().join("out").join("GVL_IO.st")).unwrap();
    assert!(gvl.contains("    Fan_Run : BOOL;"));
    assert!(gvl.contains("    ESTOP_OK : BOOL;"));
    assert!(gvl.contains("    E_STOP : BOOL;"));
    let names: Vec<&str> = output.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Fan_Run", "ESTOP_OK", "E_STOP"]);
    assert_eq!(bundle.report.tag_count, 3);
    assert!(bundle.report.compliant);
}

#[test]
fn missing_response_file_still_yields_safe_program() {
    let dir = tempfile::tempdir().unwrap();
    let output = generate(
        &FileDraft::new(dir.path().join("nope.txt")),
        "x",
        &HardwareProfile::rockwell_studio5000(),
    );
    assert!(output.upstream_error.is_some());
    assert!(output.program.has_interlock());
    assert!(output.program.balance().is_balanced());
}
