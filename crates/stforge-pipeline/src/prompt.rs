//! Generation prompt assembly.

use serde::Serialize;
use stforge_targets::HardwareProfile;

/// Sampling temperature requested from generators.
pub const TEMPERATURE: f32 = 0.1;

/// Response length cap requested from generators.
pub const MAX_TOKENS: u32 = 1024;

const RULES: [&str; 5] = [
    "Every 'IF' MUST have a corresponding 'END_IF;'.",
    "Every 'CASE' MUST have an 'END_CASE;'.",
    "Every line of logic must end with a semicolon (;).",
    "Ensure the code is complete and not truncated.",
    "Include a VAR...END_VAR block and E_STOP safety logic.",
];

/// The system and user messages sent to a generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DraftPrompt {
    pub system: String,
    pub user: String,
    pub hardware: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl DraftPrompt {
    pub fn new(instruction: &str, profile: &HardwareProfile) -> Self {
        let mut system = String::from(
            "You are an expert Senior Automation Engineer. \
             Convert instructions into professional IEC 61131-3 Structured Text (ST). \
             STRICT SYNTAX RULES:",
        );
        for (i, rule) in RULES.iter().enumerate() {
            system.push_str(&format!(" {}. {rule}", i + 1));
        }
        system.push_str(&format!(
            " {}. Target {} on {}.",
            RULES.len() + 1,
            profile.dialect,
            profile.display_name
        ));

        Self {
            system,
            user: format!("Convert this to PLC ST: {}", instruction.trim()),
            hardware: profile.key.clone(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    /// Plain-text rendering: system block, blank line, user block.
    pub fn render(&self) -> String {
        format!("{}\n\n{}\n", self.system, self.user)
    }
}
