//! `stforge prompt`: preview what a generator is asked.

use anyhow::Result;
use stforge_pipeline::DraftPrompt;
use stforge_targets::HardwareProfile;

pub fn run(instruction: &str, profile: &HardwareProfile, json: bool) -> Result<()> {
    let prompt = DraftPrompt::new(instruction, profile);
    if json {
        println!("{}", serde_json::to_string_pretty(&prompt)?);
    } else {
        println!("--- System ---");
        println!("{}", prompt.system);
        println!();
        println!("--- User ---");
        println!("{}", prompt.user);
        println!();
        println!(
            "Hardware: {}  temperature: {}  max tokens: {}",
            prompt.hardware, prompt.temperature, prompt.max_tokens
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_renders_for_every_builtin() {
        for profile in stforge_targets::builtin_profiles() {
            assert!(run("Start the motor", &profile, false).is_ok());
            assert!(run("Start the motor", &profile, true).is_ok());
        }
    }
}
