//! Rate-limited speed ramp.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Rated speed and per-tick acceleration, both in rpm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RampConfig {
    pub nominal_speed: f64,
    pub accel_step: f64,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            nominal_speed: 1500.0,
            accel_step: 150.0,
        }
    }
}

impl RampConfig {
    pub fn new(nominal_speed: f64, accel_step: f64) -> Result<Self> {
        let config = Self {
            nominal_speed,
            accel_step,
        };
        config.validate()?;
        Ok(config)
    }

    /// Both values must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.nominal_speed.is_finite() && self.nominal_speed > 0.0) {
            return Err(ConfigError::NominalSpeed(self.nominal_speed));
        }
        if !(self.accel_step.is_finite() && self.accel_step > 0.0) {
            return Err(ConfigError::AccelStep(self.accel_step));
        }
        Ok(())
    }

    /// Ticks needed to reach rated speed from standstill.
    pub fn ticks_to_nominal(&self) -> u32 {
        (self.nominal_speed / self.accel_step).ceil() as u32
    }
}

/// Move `current` toward `target` by at most `step` without overshooting.
///
/// A non-finite or negative `current` is treated as standstill.
pub fn step_toward(current: f64, target: f64, step: f64) -> f64 {
    let current = if current.is_finite() && current > 0.0 {
        current
    } else {
        0.0
    };
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}
