//! Document and ruleset loaders.
//!
//! This crate reads the files a host keeps on disk:
//! - Entity documents (characters, NPCs, vehicles) from RON or JSON
//! - Ruleset configuration from TOML
//!
//! Loaded values are plain `sheet-core` types; nothing here derives.

pub mod loaders;

pub use loaders::{DocumentFormat, EntityLoader, LoadResult, RulesLoader};
