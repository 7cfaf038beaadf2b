//! `stforge tags`: tag inventory and profile exports.

use std::path::Path;

use anyhow::Result;
use stforge_tags::{extract_tags_from, TagTable};
use stforge_targets::{export_tags, HardwareProfile};

use super::read_input;

/// Print the tags declared in a program.
///
/// With `export` set, the profile's tag export is printed instead of the
/// table.
pub fn run(input: Option<&Path>, export: Option<&HardwareProfile>, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let tags = extract_tags_from(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    match export {
        Some(profile) => {
            let file = export_tags(&tags, profile);
            eprintln!("# {} ({})", file.file_name, file.mime);
            print!("{}", file.body);
        }
        None if tags.is_empty() => println!("No tags declared."),
        None => println!("{}", TagTable::new(&tags)),
    }
    Ok(())
}
