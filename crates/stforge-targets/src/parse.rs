//! TOML parsing, serialization, validation, and discovery for profile files.
//!
//! Custom profiles are stored as `.profile.toml` files in the `profiles/`
//! directory of a stforge project.

use std::path::{Path, PathBuf};

use crate::error::{Result, TargetError};
use crate::profile::{resolve_profile, HardwareProfile};

/// File name suffix of project profile definitions.
pub const PROFILE_SUFFIX: &str = ".profile.toml";

/// A validation issue found in a profile definition.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Load a profile from a `.profile.toml` file.
pub fn load_profile_toml(path: &Path) -> Result<HardwareProfile> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_profile_toml(&content)
}

/// Parse a profile from a TOML string.
pub fn parse_profile_toml(toml_str: &str) -> Result<HardwareProfile> {
    let profile: HardwareProfile = toml::from_str(toml_str)?;
    Ok(profile)
}

/// Serialize a profile to pretty TOML.
pub fn profile_to_toml(profile: &HardwareProfile) -> Result<String> {
    let toml_str = toml::to_string_pretty(profile)?;
    Ok(toml_str)
}

/// Validate a profile definition.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_profile(profile: &HardwareProfile) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if profile.key.trim().is_empty() {
        issues.push(ValidationIssue {
            severity: "error",
            message: "profile key is empty".into(),
        });
    } else if !profile
        .key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!(
                "profile key '{}' may only contain letters, digits, '-' and '_'",
                profile.key
            ),
        });
    }

    if profile.display_name.trim().is_empty() {
        issues.push(ValidationIssue {
            severity: "warning",
            message: "display name is empty".into(),
        });
    }

    let ext = &profile.program_extension;
    if !ext.starts_with('.') || ext.len() < 2 {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!("program extension '{ext}' must start with '.'"),
        });
    }

    if !profile.program_mime.contains('/') {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!(
                "program MIME type '{}' is not of the form type/subtype",
                profile.program_mime
            ),
        });
    }

    if profile.dialect.trim().is_empty() {
        issues.push(ValidationIssue {
            severity: "warning",
            message: "dialect is empty; generators will get no hardware hint".into(),
        });
    }

    if resolve_profile(&profile.key).is_some_and(|builtin| builtin != *profile) {
        issues.push(ValidationIssue {
            severity: "warning",
            message: format!("profile key '{}' shadows a built-in profile", profile.key),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// True when any issue is an error rather than a warning.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == "error")
}

/// Generate a template `.profile.toml`, seeded from the CODESYS profile.
pub fn generate_template(key: &str) -> Result<String> {
    let mut profile = HardwareProfile::codesys();
    profile.key = key.into();
    profile.display_name = key.into();
    profile_to_toml(&profile)
}

/// Discover all `.profile.toml` files in a project's `profiles/` directory.
///
/// Returns a list of (profile key, file path) pairs sorted by key.
pub fn discover_profiles(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let profiles_dir = project_dir.join("profiles");
    if !profiles_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut profiles = Vec::new();
    for entry in std::fs::read_dir(&profiles_dir)? {
        let path = entry?.path();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(PROFILE_SUFFIX))
            .map(str::to_string);
        if let Some(name) = name {
            profiles.push((name, path));
        }
    }
    profiles.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(profiles)
}

/// Resolve a profile by name: built-ins first, then the project's
/// `profiles/` directory (by file stem, key, or display name).
pub fn find_profile(name: &str, project_dir: Option<&Path>) -> Result<HardwareProfile> {
    if let Some(profile) = resolve_profile(name) {
        return Ok(profile);
    }
    if let Some(dir) = project_dir {
        for (stem, path) in discover_profiles(dir)? {
            let profile = load_profile_toml(&path)?;
            if stem.eq_ignore_ascii_case(name) || profile.answers_to(name) {
                return Ok(profile);
            }
        }
    }
    Err(TargetError::UnknownProfile { name: name.into() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{builtin_profiles, TagFormat};

    #[test]
    fn round_trip_builtins() {
        for original in builtin_profiles() {
            let toml_str = profile_to_toml(&original).unwrap();
            let parsed = parse_profile_toml(&toml_str).unwrap();
            assert_eq!(original, parsed);
        }
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
key = "wago-e-cockpit"
display-name = "WAGO e!COCKPIT"
vendor = "WAGO"
dialect = "IEC 61131-3 Structured Text for WAGO e!COCKPIT"
program-extension = ".st"
program-mime = "text/plain"
tag-format = "global-variable-list"
"#;
        let profile = parse_profile_toml(toml_str).unwrap();
        assert_eq!(profile.key, "wago-e-cockpit");
        assert_eq!(profile.tag_format, TagFormat::GlobalVariableList);
        assert!(validate_profile(&profile).is_ok());
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(parse_profile_toml("this is not valid toml [[[").is_err());
    }

    #[test]
    fn parse_missing_field_returns_error() {
        assert!(parse_profile_toml("key = \"incomplete\"\n").is_err());
    }

    #[test]
    fn validate_builtins() {
        for profile in builtin_profiles() {
            assert!(validate_profile(&profile).is_ok(), "{}", profile.key);
        }
    }

    #[test]
    fn validate_bad_extension_and_mime() {
        let mut profile = HardwareProfile::codesys();
        profile.key = "custom".into();
        profile.program_extension = "st".into();
        profile.program_mime = "plain".into();
        let issues = validate_profile(&profile).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("extension")));
        assert!(issues.iter().any(|i| i.message.contains("MIME")));
        assert!(has_errors(&issues));
    }

    #[test]
    fn validate_empty_key() {
        let mut profile = HardwareProfile::codesys();
        profile.key = " ".into();
        let issues = validate_profile(&profile).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("key is empty")));
    }

    #[test]
    fn shadowing_builtin_is_a_warning() {
        let mut profile = HardwareProfile::codesys();
        profile.program_extension = ".txt".into();
        let issues = validate_profile(&profile).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("shadows")));
        assert!(!has_errors(&issues));
    }

    #[test]
    fn generate_template_is_valid() {
        let toml_str = generate_template("my-panel").unwrap();
        let profile = parse_profile_toml(&toml_str).unwrap();
        assert_eq!(profile.key, "my-panel");
        assert!(validate_profile(&profile).is_ok());
    }

    #[test]
    fn discover_profiles_finds_files() {
        let dir = tempfile::tempdir().unwrap();
        let profiles_dir = dir.path().join("profiles");
        std::fs::create_dir_all(&profiles_dir).unwrap();

        std::fs::write(
            profiles_dir.join("panel-b.profile.toml"),
            generate_template("panel-b").unwrap(),
        )
        .unwrap();
        std::fs::write(
            profiles_dir.join("panel-a.profile.toml"),
            generate_template("panel-a").unwrap(),
        )
        .unwrap();
        std::fs::write(profiles_dir.join("notes.txt"), "ignore me").unwrap();

        let profiles = discover_profiles(dir.path()).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].0, "panel-a");
        assert_eq!(profiles[1].0, "panel-b");
    }

    #[test]
    fn discover_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_profiles(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn find_profile_prefers_builtins_then_project() {
        let dir = tempfile::tempdir().unwrap();
        let profiles_dir = dir.path().join("profiles");
        std::fs::create_dir_all(&profiles_dir).unwrap();
        std::fs::write(
            profiles_dir.join("panel.profile.toml"),
            generate_template("panel").unwrap(),
        )
        .unwrap();

        assert_eq!(
            find_profile("codesys", Some(dir.path())).unwrap().key,
            "codesys"
        );
        assert_eq!(find_profile("panel", Some(dir.path())).unwrap().key, "panel");
        assert!(matches!(
            find_profile("panel", None),
            Err(TargetError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn load_not_found() {
        let result = load_profile_toml(Path::new("/nonexistent/path.profile.toml"));
        assert!(matches!(result, Err(TargetError::NotFound { .. })));
    }
}
