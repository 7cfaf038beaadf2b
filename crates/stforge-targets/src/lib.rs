//! PLC hardware profiles for stforge.
//!
//! A profile names the engineering environment the generated program is
//! meant for and decides how it is exported:
//! - **Program file:** extension and MIME type of the exported source
//! - **Tag export:** CSV tag table or global variable list
//! - **Dialect:** the wording used when asking a generator for code
//!
//! Four profiles are built in. Projects can add their own as
//! `profiles/<key>.profile.toml`.

pub mod error;
pub mod export;
pub mod parse;
pub mod profile;

pub use error::{Result, TargetError};
pub use export::{export_program, export_tags, ExportFile};
pub use profile::{builtin_profiles, resolve_profile, HardwareProfile, TagFormat};
