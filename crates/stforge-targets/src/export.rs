//! Program and tag exports in each profile's format.

use stforge_core::{RepairedProgram, Tag};

use crate::profile::{HardwareProfile, TagFormat};

/// A file ready to be written or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: String,
    pub body: String,
}

/// Export the program as plain source with the profile's extension.
pub fn export_program(program: &RepairedProgram, profile: &HardwareProfile, stem: &str) -> ExportFile {
    ExportFile {
        file_name: format!("{stem}{}", profile.program_extension),
        mime: profile.program_mime.clone(),
        body: format!("{}\n", program.text()),
    }
}

/// Export the tag inventory in the profile's tag format.
pub fn export_tags(tags: &[Tag], profile: &HardwareProfile) -> ExportFile {
    match profile.tag_format {
        TagFormat::SiemensCsv => ExportFile {
            file_name: "PLC_Tags.csv".into(),
            mime: "text/csv".into(),
            body: siemens_csv(tags),
        },
        TagFormat::GlobalVariableList => ExportFile {
            file_name: "GVL_IO.st".into(),
            mime: "text/plain".into(),
            body: global_variable_list(tags),
        },
        TagFormat::LogixCsv => ExportFile {
            file_name: "Tags.CSV".into(),
            mime: "text/csv".into(),
            body: logix_csv(tags),
        },
    }
}

fn siemens_csv(tags: &[Tag]) -> String {
    let mut out = String::from("Name,Path,Data Type,Logical Address,Comment\n");
    for tag in tags {
        out.push_str(&format!(
            "{},Default tag table,{},,{}\n",
            csv_field(&tag.name),
            csv_field(&tag.declared_type),
            csv_field(comment_for(tag))
        ));
    }
    out
}

fn global_variable_list(tags: &[Tag]) -> String {
    let mut out = String::from("VAR_GLOBAL\n");
    for tag in tags {
        out.push_str(&format!("    {} : {};", tag.name, tag.declared_type));
        if tag.is_interlock() {
            out.push_str(" (* emergency stop interlock *)");
        }
        out.push('\n');
    }
    out.push_str("END_VAR\n");
    out
}

fn logix_csv(tags: &[Tag]) -> String {
    let mut out = String::from(
        "remark,\"CSV-Import-Export\"\nTYPE,SCOPE,NAME,DESCRIPTION,DATATYPE,SPECIFIER,ATTRIBUTES\n",
    );
    for tag in tags {
        out.push_str(&format!(
            "TAG,,{},\"{}\",{},\"\",\"(ExternalAccess := Read/Write)\"\n",
            csv_field(&tag.name),
            comment_for(tag).replace('"', "\"\""),
            csv_field(&tag.declared_type.to_ascii_uppercase())
        ));
    }
    out
}

fn comment_for(tag: &Tag) -> &'static str {
    if tag.is_interlock() {
        "Emergency stop interlock"
    } else {
        ""
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> Vec<Tag> {
        vec![Tag::new("Sensor_B", "Bool"), Tag::interlock()]
    }

    #[test]
    fn program_export_uses_profile_extension() {
        let program = RepairedProgram::parse("E_STOP := FALSE;").unwrap();
        let file = export_program(&program, &HardwareProfile::siemens_tia(), "plc_logic");
        assert_eq!(file.file_name, "plc_logic.scl");
        assert_eq!(file.body, "E_STOP := FALSE;\n");

        let file = export_program(&program, &HardwareProfile::codesys(), "plc_logic");
        assert_eq!(file.file_name, "plc_logic.st");
    }

    #[test]
    fn siemens_tag_table() {
        let file = export_tags(&tags(), &HardwareProfile::siemens_tia());
        assert_eq!(file.mime, "text/csv");
        let lines: Vec<&str> = file.body.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Sensor_B,Default tag table,Bool,,");
        assert!(lines[2].starts_with("E_STOP,Default tag table,BOOL"));
    }

    #[test]
    fn global_variable_list_is_valid_block() {
        let file = export_tags(&tags(), &HardwareProfile::beckhoff_twincat());
        assert!(file.body.starts_with("VAR_GLOBAL\n"));
        assert!(file.body.contains("    Sensor_B : Bool;\n"));
        assert!(file.body.ends_with("END_VAR\n"));
    }

    #[test]
    fn logix_csv_uppercases_types() {
        let file = export_tags(&tags(), &HardwareProfile::rockwell_studio5000());
        assert!(file.body.contains("TAG,,Sensor_B,\"\",BOOL,"));
        assert!(file.body.contains("\"Emergency stop interlock\""));
    }

    #[test]
    fn csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
