//! `stforge repair`: turn a raw response into a safe program.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use stforge_repair::{repair_with_report, RepairReport};

use super::read_input;

#[derive(Serialize)]
struct RepairJson<'a> {
    program: String,
    report: &'a RepairReport,
}

pub fn run(input: Option<&Path>, output: Option<&Path>, report: bool, json: bool) -> Result<()> {
    let raw = read_input(input)?;
    let (program, repair_report) = repair_with_report(&raw);

    if json {
        let doc = RepairJson {
            program: program.text(),
            report: &repair_report,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::write(path, format!("{program}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {} ({} lines)", path.display(), program.line_count());
        }
        None => println!("{program}"),
    }

    if report {
        println!();
        print!("{repair_report}");
    }
    Ok(())
}
