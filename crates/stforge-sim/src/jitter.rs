//! Display-only variation applied to speed and load readings.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of small offsets added to displayed readings.
///
/// Offsets never feed back into the carried speed.
pub trait Jitter: Send + Sync {
    /// Returns `(speed offset in rpm, load offset in percent)`.
    fn sample(&self) -> (f64, f64);
}

/// Time-based jitter: a slow sine of the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct ClockJitter {
    pub speed_amplitude: f64,
    pub load_amplitude: f64,
}

impl Default for ClockJitter {
    fn default() -> Self {
        Self {
            speed_amplitude: 5.0,
            load_amplitude: 1.5,
        }
    }
}

impl Jitter for ClockJitter {
    fn sample(&self) -> (f64, f64) {
        let t = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        (
            (t * 3.1).sin() * self.speed_amplitude,
            (t * 1.7).cos() * self.load_amplitude,
        )
    }
}

/// No variation, for deterministic output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn sample(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
}
