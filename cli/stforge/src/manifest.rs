//! `stforge.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stforge_pipeline::PromptFormat;
use stforge_sim::RampConfig;
use stforge_targets::parse::find_profile;
use stforge_targets::HardwareProfile;

/// File name searched for when locating a project.
pub const MANIFEST_FILE: &str = "stforge.toml";

/// The top-level manifest structure for a stforge project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StforgeManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Target hardware.
    #[serde(default)]
    pub hardware: Option<HardwareConfig>,
    /// Simulator tuning.
    #[serde(default)]
    pub simulator: Option<SimulatorConfig>,
    /// External generator command.
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Project version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Hardware section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareConfig {
    /// Profile key or display name.
    #[serde(default)]
    pub profile: Option<String>,
}

/// Simulator section. Unset values fall back to the built-in ramp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SimulatorConfig {
    #[serde(default)]
    pub nominal_speed: Option<f64>,
    #[serde(default)]
    pub accel_step: Option<f64>,
    #[serde(default)]
    pub jitter: Option<bool>,
}

/// Generator section: a command that reads a prompt and prints a draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneratorConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub prompt_format: PromptFormat,
}

impl StforgeManifest {
    /// Search upward from `start_dir` for a `stforge.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: StforgeManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing stforge.toml")
    }

    /// The hardware profile named in the manifest, if any.
    pub fn default_profile(&self) -> Option<&str> {
        self.hardware.as_ref().and_then(|h| h.profile.as_deref())
    }

    /// Generate the default template for `stforge init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
version = "0.1.0"

[hardware]
profile = "codesys"

[simulator]
nominal-speed = 1500.0
accel-step = 150.0
jitter = true

# [generator]
# command = "my-generator"
# args = []
# prompt-format = "text"
"#
        )
    }
}

/// Resolve the hardware profile: explicit name, then manifest, then the
/// CODESYS default. Project profiles are searched under `project_dir`.
pub fn resolve_profile(
    name: Option<&str>,
    manifest: Option<&StforgeManifest>,
    project_dir: Option<&Path>,
) -> Result<HardwareProfile> {
    match name.or_else(|| manifest.and_then(|m| m.default_profile())) {
        Some(name) => find_profile(name, project_dir)
            .with_context(|| "use 'stforge profile list' to see available profiles"),
        None => Ok(HardwareProfile::default()),
    }
}

/// Build the ramp configuration: flags override the manifest, which
/// overrides the defaults.
pub fn resolve_ramp(
    nominal_speed: Option<f64>,
    accel_step: Option<f64>,
    manifest: Option<&StforgeManifest>,
) -> Result<RampConfig> {
    let section = manifest
        .and_then(|m| m.simulator.clone())
        .unwrap_or_default();
    let defaults = RampConfig::default();
    let config = RampConfig::new(
        nominal_speed
            .or(section.nominal_speed)
            .unwrap_or(defaults.nominal_speed),
        accel_step
            .or(section.accel_step)
            .unwrap_or(defaults.accel_step),
    )?;
    Ok(config)
}
