//! stforge CLI: generate, repair, validate, and preview PLC Structured Text.

mod commands;
mod manifest;
mod telemetry;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use manifest::StforgeManifest;

#[derive(Parser)]
#[command(name = "stforge", version, about = "Safety-repaired PLC Structured Text")]
struct Cli {
    /// Default log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: Level,
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new stforge project
    Init {
        /// Project name
        name: String,
    },
    /// Repair a raw generator response into a safe program
    Repair {
        /// Response file (stdin when omitted or '-')
        input: Option<PathBuf>,
        /// Write the program here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Also print the repair report
        #[arg(long)]
        report: bool,
        /// Print program and report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check program text for interlock, balance, and terminators
    Validate {
        /// Program file (stdin when omitted or '-')
        input: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the tags declared in a program
    Tags {
        /// Program file (stdin when omitted or '-')
        input: Option<PathBuf>,
        /// Print the profile's tag export instead of a table
        #[arg(long)]
        export: bool,
        /// Hardware profile for --export
        #[arg(long)]
        profile: Option<String>,
        /// Print tags as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draft, repair, and validate a program for an instruction
    Generate {
        /// Plain-language description of the machine behavior
        instruction: String,
        /// Hardware profile key or name
        #[arg(long)]
        profile: Option<String>,
        /// Use a saved response file instead of a generator
        #[arg(long, conflicts_with = "command")]
        response: Option<PathBuf>,
        /// Generator command (prompt on stdin, draft on stdout)
        #[arg(long)]
        command: Option<String>,
        /// Arguments for --command
        #[arg(long = "arg", allow_hyphen_values = true)]
        args: Vec<String>,
        /// Write program, tag export, and manifest into this directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// File stem for the exported program
        #[arg(long, default_value = "plc_logic")]
        stem: String,
        /// Print the generation report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the interlocked ramp simulator
    Simulate {
        /// Signal value as NAME=true|false (repeatable)
        #[arg(long = "signal", value_name = "NAME=BOOL")]
        signals: Vec<String>,
        /// Emergency stop pressed
        #[arg(long)]
        estop: bool,
        /// Master start switched off
        #[arg(long)]
        no_master_start: bool,
        /// Number of ticks to run
        #[arg(long, default_value_t = 1)]
        ticks: u32,
        /// Speed carried in from a previous tick
        #[arg(long, default_value_t = 0.0)]
        previous_speed: f64,
        /// Rated speed in rpm
        #[arg(long)]
        nominal_speed: Option<f64>,
        /// Acceleration per tick in rpm
        #[arg(long)]
        accel_step: Option<f64>,
        /// Disable display jitter
        #[arg(long)]
        no_jitter: bool,
        /// Print one JSON object per tick
        #[arg(long)]
        json: bool,
    },
    /// Show the prompt a generator would receive
    Prompt {
        /// Plain-language description of the machine behavior
        instruction: String,
        /// Hardware profile key or name
        #[arg(long)]
        profile: Option<String>,
        /// Print the prompt as JSON
        #[arg(long)]
        json: bool,
    },
    /// Hardware profile management
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List built-in and project profiles
    List,
    /// Show details for a profile
    Describe {
        /// Profile key or display name
        name: String,
    },
    /// Validate a profile by name or .profile.toml path
    Validate {
        /// Profile key, display name, or file path
        name: String,
    },
    /// Write a new profile template into profiles/
    Add {
        /// Key of the new profile
        key: String,
    },
}

fn main() {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.log_json, cli.log_level);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Repair {
            input,
            output,
            report,
            json,
        } => commands::repair::run(input.as_deref(), output.as_deref(), report, json),

        Commands::Validate { input, json } => commands::validate::run(input.as_deref(), json),

        Commands::Tags {
            input,
            export,
            profile,
            json,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let profile = if export {
                Some(manifest::resolve_profile(
                    profile.as_deref(),
                    manifest.as_ref(),
                    Some(project_dir.as_deref().unwrap_or(cwd.as_path())),
                )?)
            } else {
                None
            };
            commands::tags::run(input.as_deref(), profile.as_ref(), json)
        }

        Commands::Generate {
            instruction,
            profile,
            response,
            command,
            args,
            out,
            stem,
            json,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let profile =
                manifest::resolve_profile(profile.as_deref(), manifest.as_ref(), Some(project_dir.as_path()))?;
            let source = commands::generate::select_source(
                response.as_deref(),
                command.as_deref(),
                args,
                manifest.as_ref(),
            )?;
            commands::generate::run(
                source.as_ref(),
                &instruction,
                &profile,
                out.as_deref(),
                &stem,
                json,
            )
        }

        Commands::Simulate {
            signals,
            estop,
            no_master_start,
            ticks,
            previous_speed,
            nominal_speed,
            accel_step,
            no_jitter,
            json,
        } => {
            let (manifest, _) = load_manifest_optional(&cwd)?;
            let ramp = manifest::resolve_ramp(nominal_speed, accel_step, manifest.as_ref())?;
            let jitter = !no_jitter
                && manifest
                    .as_ref()
                    .and_then(|m| m.simulator.as_ref())
                    .and_then(|s| s.jitter)
                    .unwrap_or(true);
            let options = commands::simulate::SimulateOptions {
                signals: commands::simulate::parse_signals(&signals)?,
                e_stop: estop,
                master_start: !no_master_start,
                ticks,
                previous_speed,
                ramp,
                jitter,
                json,
            };
            commands::simulate::run(&options)
        }

        Commands::Prompt {
            instruction,
            profile,
            json,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let profile =
                manifest::resolve_profile(profile.as_deref(), manifest.as_ref(), Some(project_dir.as_path()))?;
            commands::prompt::run(&instruction, &profile, json)
        }

        Commands::Profile { action } => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or_else(|| cwd.clone());
            match action {
                ProfileAction::List => commands::profile::list(Some(project_dir.as_path())),
                ProfileAction::Describe { name } => {
                    commands::profile::describe(&name, Some(project_dir.as_path()))
                }
                ProfileAction::Validate { name } => {
                    commands::profile::validate(&name, Some(project_dir.as_path()))
                }
                ProfileAction::Add { key } => commands::profile::add(&key, &project_dir),
            }
        }
    }
}

fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<StforgeManifest>, Option<PathBuf>)> {
    match StforgeManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}
