//! # copilot CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use copilot_cli::check::{run_check, CheckArgs};
use copilot_cli::policy::{run_policy, PolicyArgs};
use copilot_cli::schema::{run_schema, SchemaArgs};

/// Compliance copilot CLI.
///
/// Inspect policy templates and the model output schema, or review a
/// single message from the terminal.
#[derive(Parser, Debug)]
#[command(name = "copilot", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the reviewer policy for an industry.
    Policy(PolicyArgs),

    /// Print the strict output schema.
    Schema(SchemaArgs),

    /// Review one message with the configured model.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Policy(args) => run_policy(args, &mut stdout),
        Commands::Schema(args) => run_schema(args, &mut stdout),
        Commands::Check(args) => run_check(args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
