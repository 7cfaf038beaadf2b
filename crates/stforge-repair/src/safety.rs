//! Emergency-stop interlock enforcement.

use stforge_core::interlock;
use stforge_core::lexicon::has_interlock_token;

/// Wrap `lines` in the interlock guard unless they already mention
/// `E_STOP` or `ESTOP`. Returns the resulting lines and whether the wrapper
/// was injected.
///
/// An empty body still gets the wrapper, so the result is never empty.
pub fn ensure_interlock(lines: Vec<String>) -> (Vec<String>, bool) {
    let present = lines.iter().any(|l| has_interlock_token(l));
    if present {
        return (lines, false);
    }
    (interlock::wrap(&lines), true)
}
