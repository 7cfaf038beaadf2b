//! The per-tick priority cascade.

use std::collections::BTreeMap;

use tracing::trace;

use crate::jitter::{ClockJitter, Jitter};
use crate::ramp::{step_toward, RampConfig};
use crate::signal::SignalSummary;
use crate::state::{Phase, SimulationState};

/// Load at standstill and its rise at rated speed, in percent.
const BASE_LOAD: f64 = 20.0;
const LOAD_SPAN: f64 = 55.0;

/// Interlocked ramp simulator.
#[derive(Debug, Clone)]
pub struct Simulator<J = ClockJitter> {
    config: RampConfig,
    jitter: J,
}

impl Simulator {
    pub fn new(config: RampConfig) -> Self {
        Self::with_jitter(config, ClockJitter::default())
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(RampConfig::default())
    }
}

impl<J: Jitter> Simulator<J> {
    pub fn with_jitter(config: RampConfig, jitter: J) -> Self {
        Self { config, jitter }
    }

    pub fn config(&self) -> &RampConfig {
        &self.config
    }

    /// Advance one tick.
    ///
    /// Returns the state to display and the speed to pass as
    /// `previous_speed` next time. Rules are checked in order: emergency
    /// stop, master start, fault signals, then start/sensor ramping.
    pub fn tick(
        &self,
        signals: &BTreeMap<String, bool>,
        e_stop: bool,
        master_start: bool,
        previous_speed: f64,
    ) -> (SimulationState, f64) {
        if e_stop {
            trace!("emergency stop active");
            return (SimulationState::stopped(Phase::Tripped), 0.0);
        }
        if !master_start {
            return (SimulationState::stopped(Phase::Standby), 0.0);
        }

        let summary = SignalSummary::from_signals(signals.iter().map(|(k, v)| (k.as_str(), *v)));
        if summary.fault {
            trace!("fault signal active");
            return (SimulationState::stopped(Phase::Fault), 0.0);
        }

        let target = if summary.permits_run() {
            self.config.nominal_speed
        } else {
            0.0
        };
        let speed = step_toward(previous_speed, target, self.config.accel_step);
        trace!(previous_speed, target, speed, "ramped");

        let state = if speed > 0.0 {
            let phase = if speed == target {
                Phase::Running
            } else {
                Phase::Accelerating
            };
            let (speed_jitter, load_jitter) = self.jitter.sample();
            let load = BASE_LOAD + LOAD_SPAN * (speed / self.config.nominal_speed).min(1.0);
            SimulationState::moving(
                phase,
                (speed + speed_jitter).max(0.0),
                (load + load_jitter).clamp(0.0, 100.0),
            )
        } else if summary.start {
            SimulationState::stopped(Phase::WaitingForSensor)
        } else {
            SimulationState::stopped(Phase::Idle)
        };

        (state, speed)
    }
}

/// Tick with the default ramp and clock jitter.
pub fn tick(
    signals: &BTreeMap<String, bool>,
    e_stop: bool,
    master_start: bool,
    previous_speed: f64,
) -> (SimulationState, f64) {
    Simulator::new(RampConfig::default()).tick(signals, e_stop, master_start, previous_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::NoJitter;
    use crate::state::StatusClass;

    struct FixedJitter;

    impl Jitter for FixedJitter {
        fn sample(&self) -> (f64, f64) {
            (7.0, -2.0)
        }
    }

    fn signals(pairs: &[(&str, bool)]) -> BTreeMap<String, bool> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn sim() -> Simulator<NoJitter> {
        Simulator::with_jitter(RampConfig::default(), NoJitter)
    }

    #[test]
    fn empty_signals_idle() {
        let (state, next) = tick(&BTreeMap::new(), false, true, 0.0);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(next, 0.0);
        assert!(!state.active);
    }

    #[test]
    fn start_button_accelerates_one_step() {
        let (state, next) = tick(&signals(&[("Start_Btn", true)]), false, true, 0.0);
        assert_eq!(state.phase, Phase::Accelerating);
        assert_eq!(next, 150.0_f64.min(1500.0));
        assert_eq!(state.status, StatusClass::Nominal);
    }

    #[test]
    fn emergency_stop_overrides_everything() {
        let sets = [
            signals(&[]),
            signals(&[("Start_Btn", true)]),
            signals(&[("Motor_Run", true), ("Sensor_B", true)]),
            signals(&[("Drive_Fault", true)]),
        ];
        for set in &sets {
            for master in [true, false] {
                for prev in [0.0, 750.0, 1500.0] {
                    let (state, next) = sim().tick(set, true, master, prev);
                    assert_eq!(state.phase, Phase::Tripped);
                    assert_eq!(next, 0.0);
                    assert_eq!(state.health, 0.0);
                }
            }
        }
    }

    #[test]
    fn master_start_off_is_standby() {
        let (state, next) = sim().tick(&signals(&[("Start", true)]), false, false, 900.0);
        assert_eq!(state.phase, Phase::Standby);
        assert_eq!(next, 0.0);
    }

    #[test]
    fn fault_stops_drive() {
        let (state, next) = sim().tick(
            &signals(&[("Start", true), ("Motor_Overload", true)]),
            false,
            true,
            1500.0,
        );
        assert_eq!(state.phase, Phase::Fault);
        assert_eq!(state.status, StatusClass::Critical);
        assert_eq!(next, 0.0);
    }

    #[test]
    fn ramps_up_monotonically_then_runs() {
        let s = sim();
        let input = signals(&[("Start_Btn", true)]);
        let mut speed = 0.0;
        for _ in 0..9 {
            let (state, next) = s.tick(&input, false, true, speed);
            assert!(next > speed);
            assert_eq!(state.phase, Phase::Accelerating);
            speed = next;
        }
        let (state, next) = s.tick(&input, false, true, speed);
        assert_eq!(next, 1500.0);
        assert_eq!(state.phase, Phase::Running);
        let (_, held) = s.tick(&input, false, true, next);
        assert_eq!(held, 1500.0);
    }

    #[test]
    fn ramps_down_monotonically_to_idle() {
        let s = sim();
        let mut speed = 1500.0;
        loop {
            let (state, next) = s.tick(&BTreeMap::new(), false, true, speed);
            if next == 0.0 {
                assert_eq!(state.phase, Phase::Idle);
                break;
            }
            assert!(next < speed);
            speed = next;
        }
    }

    #[test]
    fn unmet_sensor_waits() {
        let input = signals(&[("Start_Btn", true), ("Sensor_B", false)]);
        let (state, next) = sim().tick(&input, false, true, 0.0);
        assert_eq!(state.phase, Phase::WaitingForSensor);
        assert_eq!(state.status, StatusClass::Caution);
        assert_eq!(next, 0.0);

        let input = signals(&[("Start_Btn", true), ("Sensor_B", true)]);
        let (state, _) = sim().tick(&input, false, true, 0.0);
        assert_eq!(state.phase, Phase::Accelerating);
    }

    #[test]
    fn unknown_keys_are_inert() {
        let (state, next) = sim().tick(&signals(&[("Lamp", true)]), false, true, 0.0);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(next, 0.0);
    }

    #[test]
    fn invalid_previous_speed_is_treated_as_zero() {
        let input = signals(&[("Run", true)]);
        assert_eq!(sim().tick(&input, false, true, f64::NAN).1, 150.0);
        assert_eq!(sim().tick(&input, false, true, -40.0).1, 150.0);
    }

    #[test]
    fn jitter_only_touches_display() {
        let s = Simulator::with_jitter(RampConfig::default(), FixedJitter);
        let (state, next) = s.tick(&signals(&[("Start", true)]), false, true, 0.0);
        assert_eq!(next, 150.0);
        assert_eq!(state.speed, 157.0);
        assert!(state.load < BASE_LOAD + LOAD_SPAN * 0.1);
    }

    #[test]
    fn custom_ramp_config() {
        let s = Simulator::with_jitter(RampConfig::new(600.0, 400.0).unwrap(), NoJitter);
        let input = signals(&[("Start", true)]);
        let (_, first) = s.tick(&input, false, true, 0.0);
        let (state, second) = s.tick(&input, false, true, first);
        assert_eq!(first, 400.0);
        assert_eq!(second, 600.0);
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn state_serializes_kebab_case() {
        let (state, _) = sim().tick(&BTreeMap::new(), false, true, 0.0);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phase"], "idle");
        assert_eq!(json["status"], "neutral");
    }
}
