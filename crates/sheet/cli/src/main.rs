//! `sheet` command-line front end.
//!
//! Loads an entity document and a ruleset, runs one recomputation cycle and
//! prints the result. Logs go to stderr so stdout stays machine-readable.
//!
//! ```bash
//! sheet derive crates/sheet/content/data/entities/brakka.ron
//! SHEET_RULES=crates/sheet/content/data/rules/variant.toml sheet derive --format json hero.ron
//! sheet rest long hero.ron
//! ```

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Derive, Digest, Rest};

/// Character sheet derivation
#[derive(Parser)]
#[command(name = "sheet")]
#[command(about = "Derive character sheets from entity documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Recompute a document and print its derived sheet
    Derive(Derive),

    /// Plan a short or long rest and print the resulting updates
    Rest(Rest),

    /// Print the snapshot digest of a document
    Digest(Digest),
}

fn main() -> Result<()> {
    // Load .env file if it exists (SHEET_RULES, SHEET_PRETTY, RUST_LOG)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::CliConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Derive(cmd) => cmd.execute(&config),
        Command::Rest(cmd) => cmd.execute(&config),
        Command::Digest(cmd) => cmd.execute(&config),
    }
}
