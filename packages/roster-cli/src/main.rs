//! Roster CLI - apply doubles pairings to a team file offline.
//!
//! Reads a team as returned by the registration API, applies each `--pair`
//! choice, and prints the director team update body as JSON.

mod roster;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use registration::domain::team::Team;
use registration::domain::tournament::DEFAULT_TEAM_SIZE;
use registration::BowlerId;
use roster::{build_update, parse_pair, Outcome};
use tracing::info;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Reconcile doubles partners for a team and print the update payload")]
struct Args {
    /// Team JSON file
    team: PathBuf,

    /// Pair two bowlers by id, as CHOSEN:PARTNER (repeatable, applied in order)
    #[arg(long = "pair", value_parser = parse_pair)]
    pairs: Vec<(BowlerId, BowlerId)>,

    /// Number of roster positions on a team
    #[arg(long, default_value_t = DEFAULT_TEAM_SIZE)]
    team_size: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit structured JSON logs filtered by RUST_LOG
    #[arg(long, conflicts_with = "verbose")]
    log_json: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.log_json {
        registration::telemetry::init_tracing();
    } else {
        // Silent by default, only warnings/errors
        let filter = if args.verbose { "debug" } else { "warn" };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let contents = fs::read_to_string(&args.team)?;
    let team: Team = serde_json::from_str(&contents)?;
    info!(team = %team.identifier, bowlers = team.size(), "Loaded team");

    match build_update(&team, &args.pairs, args.team_size)? {
        Outcome::Payload(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Invalid(errors) => {
            for error in errors {
                eprintln!("{}: {}", error.field, error.message);
            }
            Ok(ExitCode::from(2))
        }
    }
}
