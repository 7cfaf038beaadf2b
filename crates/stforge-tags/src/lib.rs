//! Tag inventory for Structured Text programs.
//!
//! [`extract_tags`] scans program text for simple declarations
//! (`Name [AT %addr] : TYPE;`) and returns them in order of first
//! appearance, de-duplicated by upper-cased name. [`TagTable`] renders the
//! inventory as a two-column table.

pub mod extract;
pub mod table;

pub use extract::{extract_tags, extract_tags_from};
pub use table::TagTable;
