//! Hardware profile model and the built-in profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a tag inventory is exported for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagFormat {
    /// TIA Portal PLC tag table CSV.
    SiemensCsv,
    /// A `VAR_GLOBAL` block in Structured Text.
    GlobalVariableList,
    /// Studio 5000 Logix Designer tag import CSV.
    LogixCsv,
}

impl fmt::Display for TagFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFormat::SiemensCsv => write!(f, "TIA Portal tag table (CSV)"),
            TagFormat::GlobalVariableList => write!(f, "global variable list"),
            TagFormat::LogixCsv => write!(f, "Logix tag import (CSV)"),
        }
    }
}

/// A target PLC engineering environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HardwareProfile {
    /// Lookup key (e.g., "codesys", "siemens-tia").
    pub key: String,
    /// Name shown to users (e.g., "Siemens TIA Portal").
    pub display_name: String,
    pub vendor: String,
    /// Dialect description handed to code generators.
    pub dialect: String,
    /// Extension of the exported program, including the dot.
    pub program_extension: String,
    /// MIME type of the exported program.
    pub program_mime: String,
    pub tag_format: TagFormat,
}

impl HardwareProfile {
    /// Siemens TIA Portal, SCL source.
    pub fn siemens_tia() -> Self {
        Self {
            key: "siemens-tia".into(),
            display_name: "Siemens TIA Portal".into(),
            vendor: "Siemens".into(),
            dialect: "Siemens SCL (Structured Control Language) for TIA Portal".into(),
            program_extension: ".scl".into(),
            program_mime: "text/plain".into(),
            tag_format: TagFormat::SiemensCsv,
        }
    }

    /// Beckhoff TwinCAT 3.
    pub fn beckhoff_twincat() -> Self {
        Self {
            key: "beckhoff-twincat".into(),
            display_name: "Beckhoff TwinCAT".into(),
            vendor: "Beckhoff".into(),
            dialect: "IEC 61131-3 Structured Text for Beckhoff TwinCAT 3".into(),
            program_extension: ".st".into(),
            program_mime: "text/plain".into(),
            tag_format: TagFormat::GlobalVariableList,
        }
    }

    /// Rockwell Studio 5000 Logix Designer.
    pub fn rockwell_studio5000() -> Self {
        Self {
            key: "rockwell-studio5000".into(),
            display_name: "Rockwell Studio 5000".into(),
            vendor: "Rockwell Automation".into(),
            dialect: "Structured Text for Rockwell Studio 5000 Logix Designer".into(),
            program_extension: ".st".into(),
            program_mime: "text/plain".into(),
            tag_format: TagFormat::LogixCsv,
        }
    }

    /// CODESYS V3.
    pub fn codesys() -> Self {
        Self {
            key: "codesys".into(),
            display_name: "CODESYS Standard".into(),
            vendor: "CODESYS Group".into(),
            dialect: "IEC 61131-3 Structured Text for CODESYS V3".into(),
            program_extension: ".st".into(),
            program_mime: "text/plain".into(),
            tag_format: TagFormat::GlobalVariableList,
        }
    }

    /// True when `name` equals the key or display name, ignoring case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name) || self.display_name.eq_ignore_ascii_case(name)
    }
}

impl Default for HardwareProfile {
    fn default() -> Self {
        Self::codesys()
    }
}

/// All built-in profiles, in menu order.
pub fn builtin_profiles() -> Vec<HardwareProfile> {
    vec![
        HardwareProfile::siemens_tia(),
        HardwareProfile::beckhoff_twincat(),
        HardwareProfile::rockwell_studio5000(),
        HardwareProfile::codesys(),
    ]
}

/// Resolve a built-in profile by key or display name.
pub fn resolve_profile(name: &str) -> Option<HardwareProfile> {
    builtin_profiles().into_iter().find(|p| p.answers_to(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_have_unique_keys() {
        let profiles = builtin_profiles();
        assert_eq!(profiles.len(), 4);
        for (i, a) in profiles.iter().enumerate() {
            for b in &profiles[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn resolves_by_key_or_display_name() {
        assert_eq!(
            resolve_profile("Siemens TIA Portal"),
            Some(HardwareProfile::siemens_tia())
        );
        assert_eq!(resolve_profile("CODESYS"), Some(HardwareProfile::codesys()));
        assert_eq!(
            resolve_profile("rockwell-studio5000").map(|p| p.tag_format),
            Some(TagFormat::LogixCsv)
        );
        assert!(resolve_profile("s7-300").is_none());
    }

    #[test]
    fn siemens_exports_scl() {
        let p = HardwareProfile::siemens_tia();
        assert_eq!(p.program_extension, ".scl");
        assert_eq!(p.tag_format, TagFormat::SiemensCsv);
    }
}
