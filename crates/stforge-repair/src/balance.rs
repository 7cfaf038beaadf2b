//! Additive `IF` / `END_IF` balance repair.

use stforge_core::lexicon::{BlockBalance, CLOSER_STATEMENT};

/// Append one `END_IF;` line per unmatched opener and return how many were
/// added. Surplus closers are never removed.
pub fn balance_blocks(lines: &mut Vec<String>) -> usize {
    let missing = BlockBalance::of(&lines.join("\n")).missing_closers();
    lines.extend(std::iter::repeat(CLOSER_STATEMENT.to_string()).take(missing));
    missing
}
