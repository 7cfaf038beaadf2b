//! `stforge simulate`: drive the interlocked ramp simulator.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use stforge_sim::{Jitter, NoJitter, RampConfig, Simulator};

/// Resolved options for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub signals: BTreeMap<String, bool>,
    pub e_stop: bool,
    pub master_start: bool,
    pub ticks: u32,
    pub previous_speed: f64,
    pub ramp: RampConfig,
    pub jitter: bool,
    pub json: bool,
}

/// Parse `NAME=BOOL` pairs. Accepts true/false, 1/0, on/off.
pub fn parse_signals(pairs: &[String]) -> Result<BTreeMap<String, bool>> {
    let mut signals = BTreeMap::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("invalid signal '{pair}': expected NAME=BOOL");
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("invalid signal '{pair}': empty name");
        }
        let value = match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" => true,
            "false" | "0" | "off" => false,
            other => bail!("invalid signal '{pair}': '{other}' is not a boolean"),
        };
        signals.insert(name.to_string(), value);
    }
    Ok(signals)
}

pub fn run(options: &SimulateOptions) -> Result<()> {
    if options.jitter {
        run_ticks(&Simulator::new(options.ramp.clone()), options)
    } else {
        run_ticks(&Simulator::with_jitter(options.ramp.clone(), NoJitter), options)
    }
}

fn run_ticks<J: Jitter>(sim: &Simulator<J>, options: &SimulateOptions) -> Result<()> {
    if !options.json {
        println!(
            "{:>4}  {:<18} {:>8} {:>6} {:>6}  {}",
            "tick", "phase", "speed", "load", "health", "message"
        );
    }

    let mut speed = options.previous_speed;
    for n in 1..=options.ticks {
        let (state, next) = sim.tick(
            &options.signals,
            options.e_stop,
            options.master_start,
            speed,
        );
        speed = next;
        if options.json {
            println!("{}", serde_json::to_string(&state)?);
        } else {
            println!(
                "{n:>4}  {:<18} {:>8.1} {:>6.1} {:>6.0}  {}",
                state.phase, state.speed, state.load, state.health, state.message
            );
        }
    }
    Ok(())
}
