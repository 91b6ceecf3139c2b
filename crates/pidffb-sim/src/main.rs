//! pidffb-sim - PID force feedback scenario simulator
//!
//! Replays a scenario of host reports and telemetry updates against the
//! effect pool and force engine, printing the per-tick axis forces.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pidffb_sim::{Scenario, SimError, output, run_scenario};

#[derive(Parser)]
#[command(name = "pidffb-sim")]
#[command(about = "Replay a PID force feedback scenario and print the computed forces")]
#[command(version)]
#[command(long_about = "
pidffb-sim loads a YAML or JSON scenario describing host output reports,
create-effect requests, feature report reads and axis telemetry, then drives
the effect pool and force engine one tick at a time.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Scenario file (.json for JSON, anything else is read as YAML)
    scenario: PathBuf,

    /// Output in JSON format for machine parsing
    #[arg(long)]
    json: bool,

    /// Override the scenario's tick count
    #[arg(long)]
    ticks: Option<u64>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let code = e.downcast_ref::<SimError>().map_or(1, SimError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let mut scenario = Scenario::from_path(&cli.scenario)?;
    if let Some(ticks) = cli.ticks {
        scenario.ticks = ticks;
    }

    let report = run_scenario(&scenario);

    let mut stdout = io::stdout().lock();
    if cli.json {
        output::write_json(&report, &mut stdout)?;
    } else {
        output::write_text(&report, &mut stdout)?;
    }
    Ok(())
}
