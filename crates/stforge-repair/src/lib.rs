//! Structural repair of generated Structured Text.
//!
//! [`repair`] turns an untrusted, possibly chatty or truncated model
//! response into a [`RepairedProgram`] in four steps:
//! 1. extract the code body ([`extract`])
//! 2. normalize lines
//! 3. inject the emergency-stop wrapper when no interlock token is present
//!    ([`safety`])
//! 4. append `END_IF;` for every unmatched `IF` ([`balance`])
//!
//! Repair never fails and is idempotent on its own output: the steps are
//! repeated on the rendered program until it reads back unchanged.

pub mod balance;
pub mod extract;
pub mod report;
pub mod safety;

use stforge_core::program::normalize_lines;
use stforge_core::RepairedProgram;
use tracing::{debug, warn};

pub use extract::{extract, Extraction, ExtractionPath};
pub use report::RepairReport;

/// Upper bound on repair passes. Each pass that changes its input drops
/// narration from the front or adds the wrapper, so real input settles in
/// two or three.
const MAX_PASSES: usize = 8;

/// Repair a raw model response.
pub fn repair(raw: &str) -> RepairedProgram {
    repair_with_report(raw).0
}

/// Repair a raw model response and describe what was changed.
///
/// Passes are repeated on the rendered program until a pass returns it
/// unchanged, so the result re-extracts to the same bounds.
pub fn repair_with_report(raw: &str) -> (RepairedProgram, RepairReport) {
    let (mut program, first) = repair_pass(raw);
    let mut interlock_injected = first.interlock_injected;
    let mut closers_appended = first.closers_appended;

    for pass in 2..=MAX_PASSES {
        let (next, outcome) = repair_pass(&program.text());
        if next == program {
            break;
        }
        debug!(pass, "repaired program did not read back unchanged, repeating");
        interlock_injected |= outcome.interlock_injected;
        closers_appended += outcome.closers_appended;
        program = next;
        if pass == MAX_PASSES {
            warn!(passes = MAX_PASSES, "repair did not settle");
        }
    }

    let report = RepairReport {
        path: first.path,
        interlock_injected,
        closers_appended,
        raw_lines: raw.lines().count(),
        program_lines: program.line_count(),
    };
    (program, report)
}

struct PassOutcome {
    path: ExtractionPath,
    interlock_injected: bool,
    closers_appended: usize,
}

/// One extract, normalize, interlock, balance pass.
fn repair_pass(raw: &str) -> (RepairedProgram, PassOutcome) {
    let extraction = extract(raw);
    debug!(path = %extraction.path, bytes = extraction.body.len(), "extracted code body");

    let lines = normalize_lines(extraction.body.lines());
    let (mut lines, interlock_injected) = safety::ensure_interlock(lines);
    if interlock_injected {
        debug!("no interlock token found, injected E_STOP wrapper");
    }

    let closers_appended = balance::balance_blocks(&mut lines);
    if closers_appended > 0 {
        debug!(closers_appended, "appended missing END_IF closers");
    }

    // The wrapper guarantees at least one line, so the fallback is unreachable
    // in practice.
    let program =
        RepairedProgram::from_lines(&lines).unwrap_or_else(|_| RepairedProgram::interlock_stub());

    let outcome = PassOutcome {
        path: extraction.path,
        interlock_injected,
        closers_appended,
    };
    (program, outcome)
}
