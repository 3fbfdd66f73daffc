//! Loaders for entity documents and rulesets.

pub mod entity;
pub mod rules;

pub use entity::{DocumentFormat, EntityLoader};
pub use rules::RulesLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
