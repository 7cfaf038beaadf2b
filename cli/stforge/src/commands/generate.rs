//! `stforge generate`: draft, repair, validate, and optionally save.

use std::path::Path;

use anyhow::{bail, Context, Result};
use stforge_pipeline::{
    generate, ArtifactBundle, CommandDraft, DraftSource, FileDraft, GenerationReport,
};
use stforge_tags::TagTable;
use stforge_targets::HardwareProfile;

use crate::manifest::StforgeManifest;

/// Pick the draft source: a saved response, an explicit command, or the
/// manifest's `[generator]` section, in that order.
pub fn select_source(
    response: Option<&Path>,
    command: Option<&str>,
    args: Vec<String>,
    manifest: Option<&StforgeManifest>,
) -> Result<Box<dyn DraftSource>> {
    if let Some(path) = response {
        return Ok(Box::new(FileDraft::new(path)));
    }
    if let Some(program) = command {
        return Ok(Box::new(CommandDraft::new(program, args)));
    }
    match manifest.and_then(|m| m.generator.as_ref()) {
        Some(g) => Ok(Box::new(
            CommandDraft::new(g.command.clone(), g.args.clone()).with_format(g.prompt_format),
        )),
        None => bail!(
            "no draft source: pass --response or --command, or add a [generator] section to stforge.toml"
        ),
    }
}

pub fn run(
    source: &dyn DraftSource,
    instruction: &str,
    profile: &HardwareProfile,
    out: Option<&Path>,
    stem: &str,
    json: bool,
) -> Result<()> {
    let output = generate(source, instruction, profile);

    let report = match out {
        Some(dir) => {
            let bundle = ArtifactBundle::write(&output, dir, stem)
                .with_context(|| format!("writing artifacts to {}", dir.display()))?;
            if !json {
                println!("Wrote artifacts:");
                for path in bundle.paths() {
                    println!("  {}", path.display());
                }
                println!();
            }
            bundle.report
        }
        None => GenerationReport::from_output(&output),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if out.is_none() {
        println!("{}", output.program);
        println!();
    }
    if !output.tags.is_empty() {
        println!("{}", TagTable::new(&output.tags));
        println!();
    }
    print!("{report}");
    Ok(())
}
