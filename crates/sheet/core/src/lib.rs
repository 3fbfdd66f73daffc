//! Deterministic character-sheet derivation.
//!
//! `sheet-core` turns an entity document (a character, NPC or vehicle with
//! its items, effects and components) into a [`DerivedSnapshot`] of every
//! computed statistic. Recomputation is pure: the same entity and ruleset
//! always yield the same snapshot. All derivation flows through
//! [`engine::DerivationEngine`]; host-side writes are expressed as
//! [`commands::Update`]s.
pub mod commands;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod filters;
pub mod prepare;
pub mod state;
pub mod stats;

pub use commands::{RestResult, Update, UpdateTarget, UpdateValue};
pub use config::{EncumbranceMode, RulesConfig};
pub use engine::{DerivationEngine, DerivedSnapshot, EntityDerived, ItemIndex, derive};
pub use env::{ActivationOracle, StandardActivation};
pub use error::{CommandError, DerivationIssue, Diagnostics, ErrorSeverity, SheetError};
pub use filters::{FilterIndex, Predicate};
pub use prepare::items::{ComponentDerived, ItemDerived};
pub use state::{
    Ability, AbilityMap, Component, ComponentId, ComponentKind, Effect, EffectId, Entity,
    EntityId, EntityKind, Item, ItemId, ItemKind,
};
pub use stats::{ModifierStack, PartLabel, RollPart};
