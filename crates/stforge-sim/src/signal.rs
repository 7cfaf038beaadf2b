//! Signal-name classification.
//!
//! Matching is a case-insensitive substring test against fixed keyword
//! sets, so `Motor_Start`, `RUN_CMD`, and `conveyor_motor` are all start
//! signals.

use std::fmt;

use serde::Serialize;

/// What a signal name means to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalRole {
    Fault,
    Start,
    Sensor,
    Inert,
}

impl SignalRole {
    /// Keywords that select this role. Empty for [`SignalRole::Inert`].
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SignalRole::Fault => &["FAULT", "OVERLOAD", "ERR"],
            SignalRole::Start => &["START", "RUN", "MOTOR"],
            SignalRole::Sensor => &["SENSOR", "PROX", "SWITCH"],
            SignalRole::Inert => &[],
        }
    }

    /// True when `name` contains one of this role's keywords.
    pub fn matches(self, name: &str) -> bool {
        let upper = name.to_uppercase();
        self.keywords().iter().any(|k| upper.contains(k))
    }

    /// The dominant role of a name: fault, then start, then sensor.
    ///
    /// A name can match several keyword sets (`Motor_Sensor`); the
    /// simulator uses [`SignalRole::matches`] per role, this is the label
    /// shown to operators.
    pub fn classify(name: &str) -> Self {
        [SignalRole::Fault, SignalRole::Start, SignalRole::Sensor]
            .into_iter()
            .find(|role| role.matches(name))
            .unwrap_or(SignalRole::Inert)
    }
}

impl fmt::Display for SignalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalRole::Fault => write!(f, "fault"),
            SignalRole::Start => write!(f, "start"),
            SignalRole::Sensor => write!(f, "sensor"),
            SignalRole::Inert => write!(f, "inert"),
        }
    }
}

/// Classified view of one tick's signal set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalSummary {
    /// A true signal whose name is fault-like.
    pub fault: bool,
    /// A true, non-fault signal whose name is start-like.
    pub start: bool,
    /// A true, non-fault signal whose name is sensor-like.
    pub sensor: bool,
    /// Some signal name, true or not, contains `SENSOR`.
    pub requires_sensor: bool,
}

impl SignalSummary {
    pub fn from_signals<'a, I>(signals: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        signals
            .into_iter()
            .fold(Self::default(), |mut acc, (name, value)| {
                acc.requires_sensor |= name.to_uppercase().contains("SENSOR");
                if SignalRole::Fault.matches(name) {
                    acc.fault |= value;
                } else if value {
                    acc.start |= SignalRole::Start.matches(name);
                    acc.sensor |= SignalRole::Sensor.matches(name);
                }
                acc
            })
    }

    /// Start is commanded and the sensor condition, if any, is met.
    pub fn permits_run(&self) -> bool {
        self.start && (!self.requires_sensor || self.sensor)
    }
}
