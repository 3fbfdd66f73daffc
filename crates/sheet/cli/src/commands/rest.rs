//! Plan a rest.

use anyhow::{Context, Result};
use clap::Parser;
use sheet_core::commands::{long_rest, short_rest};
use sheet_core::derive;
use tracing::info;

use super::{Input, print_json};
use crate::config::CliConfig;

/// Plan a short or long rest and print the resulting updates
#[derive(Parser)]
pub struct Rest {
    /// Kind of rest
    #[arg(value_enum)]
    kind: RestKind,

    #[command(flatten)]
    input: Input,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum RestKind {
    Short,
    Long,
}

impl Rest {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let (entity, rules) = self.input.load(config)?;
        let snapshot = derive(&entity, &rules);

        let rest = match self.kind {
            RestKind::Short => short_rest(&entity, &snapshot),
            RestKind::Long => long_rest(&entity, &snapshot),
        }
        .with_context(|| format!("{:?} rest failed for {}", self.kind, entity.id))?;

        info!(
            entity = %entity.id,
            updates = rest.updates.len(),
            pending_rolls = rest.pending_rolls.len(),
            "rest planned"
        );
        print_json(&rest, self.pretty || config.pretty)
    }
}
