//! Sheet commands.
//!
//! Commands never mutate the entity. Each one reads the entity and its
//! latest snapshot and returns the [`Update`]s a host commits atomically.
mod duplicate;
mod inventory;
mod resources;
mod rest;

use std::fmt;

pub use duplicate::{IdSource, RandomIds, duplicate_item};
pub use inventory::{detach_container_contents, receive_currency};
pub use resources::adjust_resource;
pub use rest::{PendingRoll, RestResult, long_rest, short_rest};

use crate::engine::DerivedSnapshot;
use crate::state::{ComponentId, Currency, EffectId, Entity, ItemId, Rule};

/// Persisted field a command writes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateTarget {
    /// `remaining` of a resource component.
    Resource {
        item: ItemId,
        effect: EffectId,
        component: ComponentId,
    },
    /// `remaining` of a `spells` component's own slot pool.
    Spells {
        item: ItemId,
        effect: EffectId,
        component: ComponentId,
    },
    HitPoints,
    TempHitPoints,
    HitDice(u32),
    SpellSlot(u8),
    PactSlot,
    /// Purse of the entity, or of a container item.
    Currency(Option<ItemId>),
    /// Container an item is stored in.
    Parent(ItemId),
}

impl UpdateTarget {
    /// Dotted document path of the field.
    pub fn path(&self) -> String {
        match self {
            UpdateTarget::Resource {
                item,
                effect,
                component,
            }
            | UpdateTarget::Spells {
                item,
                effect,
                component,
            } => format!("items.{item}.effects.{effect}.components.{component}.remaining"),
            UpdateTarget::HitPoints => "system.attributes.hp.value".to_owned(),
            UpdateTarget::TempHitPoints => "system.attributes.hp.temp".to_owned(),
            UpdateTarget::HitDice(die) => format!("system.hit_dice.{die}.value"),
            UpdateTarget::SpellSlot(level) => format!("system.spells.slots.{level}.value"),
            UpdateTarget::PactSlot => "system.spells.pact.value".to_owned(),
            UpdateTarget::Currency(None) => "system.currency".to_owned(),
            UpdateTarget::Currency(Some(item)) => format!("items.{item}.currency"),
            UpdateTarget::Parent(item) => format!("items.{item}.parent"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateValue {
    Int(i64),
    Currency(Currency),
    /// Unset an optional field.
    Clear,
}

/// One field write for the host to commit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Update {
    pub target: UpdateTarget,
    pub value: UpdateValue,
}

impl Update {
    pub fn new(target: UpdateTarget, value: UpdateValue) -> Self {
        Self { target, value }
    }

    pub fn int(target: UpdateTarget, value: impl Into<i64>) -> Self {
        Self::new(target, UpdateValue::Int(value.into()))
    }

    pub fn path(&self) -> String {
        self.target.path()
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            UpdateValue::Int(value) => write!(f, "{} = {value}", self.path()),
            UpdateValue::Currency(c) => write!(
                f,
                "{} = {{pp: {}, gp: {}, ep: {}, sp: {}, cp: {}}}",
                self.path(),
                c.pp,
                c.gp,
                c.ep,
                c.sp,
                c.cp
            ),
            UpdateValue::Clear => write!(f, "{} = null", self.path()),
        }
    }
}

/// Whether a rule currently applies: switched on for the entity and holding
/// in the snapshot.
pub fn is_rule_active(entity: &Entity, snapshot: &DerivedSnapshot, rule: Rule) -> bool {
    entity.rule_enabled(rule) && snapshot.rule(rule)
}
