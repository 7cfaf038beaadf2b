//! On-disk artifact bundle: program, tag export, raw response, manifest.

use std::path::{Path, PathBuf};

use serde::Serialize;
use stforge_core::hash::{content_hash, hash_hex};
use stforge_targets::{export_program, export_tags, ExportFile};
use tracing::info;

use crate::error::PipelineError;
use crate::pipeline::PipelineOutput;
use crate::report::GenerationReport;

/// Name of the manifest written beside the artifacts.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Name of the saved raw response.
pub const RAW_FILE: &str = "raw_response.txt";

/// One written file and its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArtifactEntry {
    pub file_name: String,
    pub mime: String,
    pub bytes: usize,
    pub sha256: String,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Manifest<'a> {
    tool: &'static str,
    version: &'static str,
    report: &'a GenerationReport,
    files: &'a [ArtifactEntry],
}

/// The files written for one pipeline run.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub dir: PathBuf,
    pub entries: Vec<ArtifactEntry>,
    pub report: GenerationReport,
}

impl ArtifactBundle {
    /// Write the program export, tag export, and raw response into `dir`,
    /// then `manifest.json` listing each file with its SHA-256.
    pub fn write(output: &PipelineOutput, dir: &Path, stem: &str) -> Result<Self, PipelineError> {
        if dir.exists() && !dir.is_dir() {
            return Err(PipelineError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        std::fs::create_dir_all(dir)?;

        let files = [
            export_program(&output.program, &output.profile, stem),
            export_tags(&output.tags, &output.profile),
            ExportFile {
                file_name: RAW_FILE.into(),
                mime: "text/plain".into(),
                body: output.raw.clone(),
            },
        ];

        let mut entries = Vec::with_capacity(files.len());
        for file in &files {
            std::fs::write(dir.join(&file.file_name), &file.body)?;
            entries.push(ArtifactEntry {
                file_name: file.file_name.clone(),
                mime: file.mime.clone(),
                bytes: file.body.len(),
                sha256: hash_hex(&content_hash(file.body.as_bytes())),
            });
        }

        let report = GenerationReport::from_output(output);
        let manifest = Manifest {
            tool: "stforge",
            version: env!("CARGO_PKG_VERSION"),
            report: &report,
            files: &entries,
        };
        std::fs::write(dir.join(MANIFEST_FILE), serde_json::to_string_pretty(&manifest)?)?;
        info!(dir = %dir.display(), files = entries.len(), "wrote artifact bundle");

        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
            report,
        })
    }

    /// Paths of every written file, manifest last.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .map(|e| self.dir.join(&e.file_name))
            .chain(std::iter::once(self.dir.join(MANIFEST_FILE)))
            .collect()
    }
}
