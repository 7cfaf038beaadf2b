//! Read-only checks over Structured Text.
//!
//! [`validate`] can run on raw model output or on a repaired program. It
//! never modifies the text and never stops at the first problem: every
//! finding is reported, interlock first, then block balance, then
//! per-line terminator warnings in line order.

pub mod finding;
pub mod report;
pub mod structural;

pub use finding::{Severity, ValidationFinding};
pub use report::{ReportSummary, ValidationReport};
pub use structural::{validate, validate_program};
