//! CLI configuration from the environment.

use std::env;
use std::path::PathBuf;

/// Settings shared by every subcommand; flags override them.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Ruleset TOML used when `--rules` is not given.
    pub rules: Option<PathBuf>,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl CliConfig {
    /// Reads `SHEET_RULES` and `SHEET_PRETTY`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = read_env::<PathBuf>("SHEET_RULES") {
            config.rules = Some(path);
        }
        if let Some(pretty) = read_env_bool("SHEET_PRETTY") {
            config.pretty = pretty;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
