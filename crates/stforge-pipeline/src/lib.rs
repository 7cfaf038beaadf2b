//! The stforge pipeline: draft, repair, inventory, validate.
//!
//! A [`DraftSource`] produces untrusted Structured Text for an instruction
//! and hardware profile. [`generate`] feeds that text through repair, tag
//! extraction, and validation and never fails: a generator error becomes
//! the response text and is repaired like any other. [`ArtifactBundle`]
//! writes the results to disk with a hashed manifest.

pub mod artifacts;
pub mod draft;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod report;

pub use artifacts::{ArtifactBundle, ArtifactEntry};
pub use draft::{CommandDraft, DraftSource, FileDraft, PromptFormat, StaticDraft};
pub use error::{DraftError, PipelineError};
pub use pipeline::{generate, process, PipelineOutput};
pub use prompt::DraftPrompt;
pub use report::GenerationReport;
