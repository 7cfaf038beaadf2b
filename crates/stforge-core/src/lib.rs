//! Core text model for stforge.
//!
//! Everything downstream of an untrusted code generator works on the types
//! defined here:
//! - **[`RepairedProgram`]:** normalized Structured Text lines that carry the
//!   emergency-stop interlock and balanced `IF` blocks
//! - **[`Tag`]:** a declared variable (name + type) taken from program text
//! - **[`lexicon`]:** token counting and line classification shared by the
//!   repairer, validator, and tag extractor
//!
//! None of this parses Structured Text. All checks are lexical.

pub mod error;
pub mod hash;
pub mod interlock;
pub mod lexicon;
pub mod program;
pub mod tag;

pub use error::{ProgramError, Result};
pub use lexicon::BlockBalance;
pub use program::RepairedProgram;
pub use tag::Tag;
