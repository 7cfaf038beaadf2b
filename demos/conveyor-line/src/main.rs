//! Conveyor line: binary entry point.
//!
//! Usage:
//!   cargo run -p conveyor-line [-- <output-dir>]
//!
//! Default output directory: /tmp/conveyor-line

use std::path::PathBuf;

use stforge_pipeline::ArtifactBundle;
use stforge_targets::HardwareProfile;

fn main() {
    let out_dir: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/conveyor-line".into())
        .into();

    let profile = HardwareProfile::siemens_tia();
    println!("Repairing conveyor draft for {}", profile.display_name);
    let output = conveyor_line::run_pipeline(&profile);

    println!("  raw findings:   {}", output.raw_findings.len());
    println!("  interlock:      {}", if output.repair.interlock_injected { "injected" } else { "present" });
    println!("  closers added:  {}", output.repair.closers_appended);
    println!("  tags:           {}", output.tags.len());
    println!("  compliant:      {}", output.validation.is_compliant());

    let bundle =
        ArtifactBundle::write(&output, &out_dir, "conveyor").expect("failed to write artifacts");
    for path in bundle.paths() {
        println!("  wrote {}", path.display());
    }

    println!();
    println!("Start-up with all panel inputs on:");
    let signals = conveyor_line::panel_signals(&output.tags);
    for (n, state) in conveyor_line::start_up(&signals, 20).iter().enumerate() {
        println!("  {:>2}  {:<14} {:>7.1} rpm  {}", n + 1, state.phase, state.speed, state.message);
    }
}
