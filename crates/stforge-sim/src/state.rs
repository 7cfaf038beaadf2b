//! Operational phases and the state reported each tick.

use std::fmt;

use serde::Serialize;

/// Operational phase of the simulated drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Tripped,
    Standby,
    Fault,
    WaitingForSensor,
    Accelerating,
    Running,
    Idle,
}

/// Severity class used to color a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusClass {
    Critical,
    Caution,
    Neutral,
    Nominal,
}

impl Phase {
    pub fn status(self) -> StatusClass {
        match self {
            Phase::Tripped | Phase::Fault => StatusClass::Critical,
            Phase::WaitingForSensor => StatusClass::Caution,
            Phase::Standby | Phase::Idle => StatusClass::Neutral,
            Phase::Accelerating | Phase::Running => StatusClass::Nominal,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Phase::Tripped => "EMERGENCY STOP ACTIVE: all motion halted",
            Phase::Standby => "Standby: master start is off",
            Phase::Fault => "FAULT: drive stopped on fault signal",
            Phase::WaitingForSensor => "Start commanded, waiting for sensor",
            Phase::Accelerating => "Ramping toward rated speed",
            Phase::Running => "Running at rated speed",
            Phase::Idle => "Idle: no start command",
        }
    }

    /// Health reading reported with this phase, in percent.
    pub fn health(self) -> f64 {
        match self {
            Phase::Tripped => 0.0,
            Phase::Fault => 40.0,
            _ => 100.0,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Tripped => "tripped",
            Phase::Standby => "standby",
            Phase::Fault => "fault",
            Phase::WaitingForSensor => "waiting-for-sensor",
            Phase::Accelerating => "accelerating",
            Phase::Running => "running",
            Phase::Idle => "idle",
        };
        f.pad(name)
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusClass::Critical => "critical",
            StatusClass::Caution => "caution",
            StatusClass::Neutral => "neutral",
            StatusClass::Nominal => "nominal",
        };
        f.pad(name)
    }
}

/// What the drive looks like after one tick.
///
/// `speed` and `load` are display readings and may include jitter; the
/// speed to carry into the next tick is returned separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SimulationState {
    pub phase: Phase,
    pub speed: f64,
    pub load: f64,
    pub health: f64,
    pub message: &'static str,
    pub status: StatusClass,
    pub active: bool,
}

impl SimulationState {
    /// A state with zero speed and load.
    pub fn stopped(phase: Phase) -> Self {
        Self::moving(phase, 0.0, 0.0)
    }

    pub fn moving(phase: Phase, speed: f64, load: f64) -> Self {
        Self {
            phase,
            speed,
            load,
            health: phase.health(),
            message: phase.message(),
            status: phase.status(),
            active: speed > 0.0,
        }
    }
}
