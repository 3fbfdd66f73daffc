//! Ruleset configuration loader.

use std::path::Path;

use anyhow::{Context, ensure};
use sheet_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for ruleset configuration from TOML files.
///
/// Missing keys fall back to [`RulesConfig::default`], so an empty file is
/// the standard ruleset.
pub struct RulesLoader;

impl RulesLoader {
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid ruleset {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let rules: RulesConfig = toml::from_str(content)?;
        validate(&rules)?;
        Ok(rules)
    }
}

fn validate(rules: &RulesConfig) -> LoadResult<()> {
    for (name, value) in [
        ("carry_multiplier", rules.carry_multiplier),
        ("encumbered_multiplier", rules.encumbered_multiplier),
        ("heavily_encumbered_multiplier", rules.heavily_encumbered_multiplier),
        ("coins_per_pound", rules.coins_per_pound),
        ("vehicle_weight_divisor", rules.vehicle_weight_divisor),
    ] {
        ensure!(
            value.is_finite() && value > 0.0,
            "{name} must be a positive number, got {value}"
        );
    }
    ensure!(
        rules.encumbered_multiplier <= rules.heavily_encumbered_multiplier,
        "encumbered_multiplier must not exceed heavily_encumbered_multiplier"
    );
    ensure!(
        rules.cantrip_tiers.windows(2).all(|pair| pair[0] < pair[1]),
        "cantrip_tiers must be strictly increasing"
    );
    ensure!(
        rules.xp_table.windows(2).all(|pair| pair[0] <= pair[1]),
        "xp_table must be non-decreasing"
    );
    Ok(())
}
