//! Summary of what a repair pass changed.

use std::fmt;

use serde::Serialize;

use crate::extract::ExtractionPath;

/// What the repairer did to one raw response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepairReport {
    /// Strategy that located the code body.
    pub path: ExtractionPath,
    /// True when the emergency-stop wrapper was added.
    pub interlock_injected: bool,
    /// Number of `END_IF;` lines appended.
    pub closers_appended: usize,
    /// Line count of the raw response.
    pub raw_lines: usize,
    /// Line count of the repaired program.
    pub program_lines: usize,
}

impl RepairReport {
    /// True when the extracted body needed no structural change.
    pub fn is_untouched(&self) -> bool {
        !self.interlock_injected && self.closers_appended == 0
    }
}

impl fmt::Display for RepairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repair Report")?;
        writeln!(f, "=============")?;
        writeln!(f, "  Extraction:        {}", self.path)?;
        writeln!(
            f,
            "  Interlock:         {}",
            if self.interlock_injected {
                "injected"
            } else {
                "present"
            }
        )?;
        writeln!(f, "  Closers appended:  {}", self.closers_appended)?;
        write!(
            f,
            "  Lines:             {} raw -> {} repaired",
            self.raw_lines, self.program_lines
        )
    }
}
