//! Conveyor line: a chatty draft taken through repair, export, and a
//! simulated start-up.
//!
//! The canned response is the kind a generator returns on a bad day: prose
//! around a fenced block, no emergency stop, and an `IF` whose `END_IF;`
//! was cut off. Repair wraps it in the `E_STOP` interlock and closes the
//! block; the declared BOOL tags then drive the simulator.

use std::collections::BTreeMap;

use stforge_core::Tag;
use stforge_pipeline::{generate, PipelineOutput, StaticDraft};
use stforge_sim::{NoJitter, Phase, RampConfig, SimulationState, Simulator};
use stforge_targets::HardwareProfile;

pub const INSTRUCTION: &str =
    "Run the conveyor motor while the start button is held and a part is on the belt.";

pub const RESPONSE: &str = "Sure! Here is the conveyor logic you asked for:

```iecst
VAR
    Start_Btn : BOOL;
    Part_Sensor : BOOL;
    Motor_Run : BOOL;
END_VAR

IF Start_Btn AND Part_Sensor THEN
    Motor_Run := TRUE;
ELSE
    Motor_Run := FALSE;
```

The motor runs while a part is present.";

/// Run the canned response through the pipeline for `profile`.
pub fn run_pipeline(profile: &HardwareProfile) -> PipelineOutput {
    generate(&StaticDraft::new(RESPONSE), INSTRUCTION, profile)
}

/// Panel inputs for the declared BOOL tags, all switched on. The
/// interlock is driven separately and left out.
pub fn panel_signals(tags: &[Tag]) -> BTreeMap<String, bool> {
    tags.iter()
        .filter(|t| !t.is_interlock() && t.declared_type.eq_ignore_ascii_case("BOOL"))
        .map(|t| (t.name.clone(), true))
        .collect()
}

/// Tick from standstill until the drive reports `Running` or `max_ticks`
/// is reached. Returns every state seen.
pub fn start_up(signals: &BTreeMap<String, bool>, max_ticks: u32) -> Vec<SimulationState> {
    let sim = Simulator::with_jitter(RampConfig::default(), NoJitter);
    let mut speed = 0.0;
    let mut states = Vec::new();
    for _ in 0..max_ticks {
        let (state, next) = sim.tick(signals, false, true, speed);
        speed = next;
        let running = state.phase == Phase::Running;
        states.push(state);
        if running {
            break;
        }
    }
    states
}
