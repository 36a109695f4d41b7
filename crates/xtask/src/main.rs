//! Development tasks for the item workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Query};

/// Development tasks for the item workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Inspect item content and run container queries", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load a scenario and print what it contains
    Inspect(Inspect),

    /// Run one query against a container in a scenario
    Query(Query),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for ITEM_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(cmd) => cmd.execute(),
        Command::Query(cmd) => cmd.execute(),
    }
}
