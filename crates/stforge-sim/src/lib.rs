//! Interlocked ramp simulator.
//!
//! A heuristic motor/process model driven by named boolean signals and two
//! hard interlocks (emergency stop, master start). It does not interpret a
//! program; signal meaning comes from substring classification of the
//! signal names ([`SignalRole`]).
//!
//! The only state carried between ticks is the speed returned by
//! [`Simulator::tick`], which the caller passes back on the next call.

pub mod error;
pub mod jitter;
pub mod ramp;
pub mod signal;
pub mod simulator;
pub mod state;

pub use error::{ConfigError, Result};
pub use jitter::{ClockJitter, Jitter, NoJitter};
pub use ramp::RampConfig;
pub use signal::{SignalRole, SignalSummary};
pub use simulator::{tick, Simulator};
pub use state::{Phase, SimulationState, StatusClass};
