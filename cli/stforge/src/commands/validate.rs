//! `stforge validate`: structural safety checks on program text.

use std::path::Path;

use anyhow::{bail, Result};
use stforge_verify::ValidationReport;

use super::read_input;

/// Print the validation report; fails when any error-severity finding exists.
pub fn run(input: Option<&Path>, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let report = ValidationReport::build(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    if report.summary.errors > 0 {
        bail!(
            "validation failed: {} error(s), {} warning(s)",
            report.summary.errors,
            report.summary.warnings
        );
    }
    Ok(())
}
