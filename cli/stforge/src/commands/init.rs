//! `stforge init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use stforge_targets::parse::generate_template;

use crate::manifest::StforgeManifest;

/// Create a new stforge project named `name` in the current directory.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("prompts")).context("creating prompts/ directory")?;
    fs::create_dir_all(project_dir.join("profiles")).context("creating profiles/ directory")?;
    fs::create_dir_all(project_dir.join("out")).context("creating out/ directory")?;

    fs::write(
        project_dir.join("stforge.toml"),
        StforgeManifest::template(name),
    )
    .context("writing stforge.toml")?;

    fs::write(
        project_dir.join("prompts").join("main.txt"),
        "Start the conveyor motor when the start button is pressed and the part sensor is clear.\n",
    )
    .context("writing prompts/main.txt")?;

    // Commented-out example so `profile list` shows the format without
    // registering a profile.
    let example = generate_template("custom-plc").context("rendering profile template")?;
    let example: String = example.lines().map(|l| format!("# {l}\n")).collect();
    fs::write(project_dir.join("profiles").join("README.txt"), example)
        .context("writing profiles/README.txt")?;

    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/stforge.toml");
    println!("  {name}/prompts/main.txt");
    println!("  {name}/profiles/");
    println!("  {name}/out/");
    println!("  {name}/.gitignore");

    Ok(())
}
