//! Snapshot digest.

use anyhow::{Context, Result};
use clap::Parser;
use sheet_core::derive;

use super::Input;
use crate::config::CliConfig;

/// Print the snapshot digest of a document
#[derive(Parser)]
pub struct Digest {
    #[command(flatten)]
    input: Input,
}

impl Digest {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let (entity, rules) = self.input.load(config)?;
        let digest = derive(&entity, &rules)
            .digest()
            .context("failed to encode snapshot")?;
        println!("{}  {}", hex::encode(digest), entity.id);
        Ok(())
    }
}
