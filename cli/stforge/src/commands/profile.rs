//! `stforge profile`: hardware profile listing, description, and validation.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use stforge_targets::parse::{
    discover_profiles, find_profile, generate_template, has_errors, load_profile_toml,
    validate_profile, PROFILE_SUFFIX,
};
use stforge_targets::{builtin_profiles, export_tags, HardwareProfile};

/// List built-in profiles and any found in the project's `profiles/`.
pub fn list(project_dir: Option<&Path>) -> Result<()> {
    println!("Built-in profiles:");
    println!();
    for profile in builtin_profiles() {
        println!("  {:<22} {}", profile.key, profile.display_name);
    }

    if let Some(dir) = project_dir {
        let custom = discover_profiles(dir)?;
        if !custom.is_empty() {
            println!();
            println!("Project profiles:");
            println!();
            for (name, path) in custom {
                println!("  {name:<22} {}", path.display());
            }
        }
    }

    println!();
    println!("Use 'stforge profile describe <name>' for details.");
    Ok(())
}

/// Describe one profile in detail.
pub fn describe(name: &str, project_dir: Option<&Path>) -> Result<()> {
    let profile = find_profile(name, project_dir)
        .with_context(|| "use 'stforge profile list' to see available profiles")?;
    print_profile(&profile);
    Ok(())
}

fn print_profile(profile: &HardwareProfile) {
    println!("=== Profile: {} ===", profile.display_name);
    println!("Key:      {}", profile.key);
    println!("Vendor:   {}", profile.vendor);
    println!("Dialect:  {}", profile.dialect);
    println!();
    println!("--- Exports ---");
    println!(
        "  Program: <stem>{} ({})",
        profile.program_extension, profile.program_mime
    );
    let tags = export_tags(&[], profile);
    println!("  Tags:    {} ({})", tags.file_name, tags.mime);
}

/// Validate a profile given by name or by `.profile.toml` path.
pub fn validate(name: &str, project_dir: Option<&Path>) -> Result<()> {
    let path = Path::new(name);
    let profile = if path.is_file() {
        load_profile_toml(path).with_context(|| format!("loading {}", path.display()))?
    } else {
        find_profile(name, project_dir)?
    };

    match validate_profile(&profile) {
        Ok(()) => {
            println!("Profile '{}' is valid.", profile.key);
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                println!("[{}] {}", issue.severity, issue.message);
            }
            if has_errors(&issues) {
                bail!("profile '{}' has errors", profile.key);
            }
            println!("Profile '{}' is valid with warnings.", profile.key);
            Ok(())
        }
    }
}

/// Write `profiles/<key>.profile.toml` from the template.
pub fn add(key: &str, project_dir: &Path) -> Result<()> {
    let dir = project_dir.join("profiles");
    let path = dir.join(format!("{key}{PROFILE_SUFFIX}"));
    if path.exists() {
        bail!("profile file '{}' already exists", path.display());
    }

    let content = generate_template(key)?;
    let profile = stforge_targets::parse::parse_profile_toml(&content)?;
    if let Err(issues) = validate_profile(&profile) {
        if has_errors(&issues) {
            let messages: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();
            bail!("invalid profile key '{key}': {}", messages.join("; "));
        }
    }

    fs::create_dir_all(&dir).context("creating profiles/ directory")?;
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    println!("Edit the dialect and export settings, then run 'stforge profile validate {key}'.");
    Ok(())
}
