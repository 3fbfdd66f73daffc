//! Subcommands of the `sheet` binary.

mod derive;
mod digest;
mod rest;

pub use derive::Derive;
pub use digest::Digest;
pub use rest::Rest;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use sheet_content::{EntityLoader, RulesLoader};
use sheet_core::{Entity, RulesConfig};
use tracing::info;

use crate::config::CliConfig;

/// Document and ruleset shared by every subcommand.
#[derive(Args)]
pub struct Input {
    /// Entity document (.ron or .json)
    #[arg(value_name = "DOCUMENT")]
    document: PathBuf,

    /// Ruleset TOML; overrides SHEET_RULES
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,
}

impl Input {
    pub fn load(&self, config: &CliConfig) -> Result<(Entity, RulesConfig)> {
        let entity = EntityLoader::load(&self.document)?;
        let rules = match self.rules.as_ref().or(config.rules.as_ref()) {
            Some(path) => {
                info!(rules = %path.display(), "using ruleset");
                RulesLoader::load(path)?
            }
            None => RulesConfig::default(),
        };
        Ok((entity, rules))
    }
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to encode JSON")?;
    println!("{json}");
    Ok(())
}
