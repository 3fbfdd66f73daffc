//! The top-level document: raw, persisted attributes plus owned items.
//!
//! Nothing in here is derived. The engine reads an [`Entity`] and produces a
//! separate snapshot; hosts persist only this structure.

use std::collections::BTreeMap;

use super::ability::{Ability, AbilityMap};
use super::ids::{EffectId, EntityId, ItemId};
use super::item::Item;
use super::types::{ConditionKind, Currency, DamageType, DefenseLevel, RollMode, Rule, Size};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityKind {
    #[default]
    Character,
    Npc,
    Vehicle,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: EntityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub system: EntitySystem,
    /// Statuses currently applied by the host.
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Vec<ActiveStatus>,
    /// Stats of the original creature while polymorphed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transform: Option<TransformSource>,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            items: Vec::new(),
            system: EntitySystem::default(),
            statuses: Vec::new(),
            transform: None,
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn is_vehicle(&self) -> bool {
        self.kind == EntityKind::Vehicle
    }

    pub fn is_character(&self) -> bool {
        self.kind == EntityKind::Character
    }

    /// A rule is enabled unless the entity switched it off.
    pub fn rule_enabled(&self, rule: Rule) -> bool {
        self.system.rules.get(&rule).copied().unwrap_or(true)
    }
}

/// Raw system data of an entity.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntitySystem {
    pub abilities: AbilityMap<AbilityScore>,
    pub attributes: Attributes,
    pub details: Details,
    pub size: Size,
    pub skills: SkillSettings,
    pub saves: AbilityMap<SaveSettings>,
    pub tools: BTreeMap<String, Proficiency>,
    /// Hit dice records keyed by die faces.
    pub hit_dice: BTreeMap<u32, HitDieRecord>,
    pub currency: Currency,
    pub defenses: Defenses,
    pub spells: SpellSlots,
    /// Per-entity rule switches; absent rules are on.
    pub rules: BTreeMap<Rule, bool>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityScore {
    pub value: i32,
    /// Saving throw proficiency multiple.
    pub proficient: f64,
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self {
            value: 10,
            proficient: 0.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    /// Proficiency bonus; ignored for vehicles.
    pub prof: i32,
    pub hp: HitPoints,
    pub ac: ArmourClass,
    pub init: Initiative,
    /// Default spellcasting ability when no class supplies one.
    pub spellcasting: Option<Ability>,
    /// Vehicle cargo capacity in the vehicle's weight unit.
    pub cargo_capacity: f64,
    /// Crew quality of a vehicle, used for initiative.
    pub quality: Option<i32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitPoints {
    pub value: i32,
    pub max: i32,
    pub temp: i32,
    pub tempmax: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArmourClass {
    pub override_value: Option<i32>,
    pub base: i32,
    pub ability1: Option<Ability>,
    pub ability2: Option<Ability>,
}

impl Default for ArmourClass {
    fn default() -> Self {
        Self {
            override_value: None,
            base: 10,
            ability1: Some(Ability::Dex),
            ability2: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Initiative {
    pub ability: Ability,
    pub bonus: i32,
    pub override_value: Option<i32>,
}

impl Default for Initiative {
    fn default() -> Self {
        Self {
            ability: Ability::Dex,
            bonus: 0,
            override_value: None,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VehicleKind {
    #[default]
    Land,
    Water,
    Air,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Details {
    /// Level of creatures without class items.
    pub level: u32,
    pub xp: u32,
    pub vehicle: VehicleKind,
}

/// Skill and tool proficiency settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Proficiency {
    pub ability: Ability,
    /// Proficiency multiple (0, 0.5, 1, 2).
    pub value: f64,
    pub override_value: Option<i32>,
    pub bonus: i32,
    pub passive_bonus: i32,
    pub roll: RollMode,
}

impl Default for Proficiency {
    fn default() -> Self {
        Self {
            ability: Ability::Str,
            value: 0.0,
            override_value: None,
            bonus: 0,
            passive_bonus: 0,
            roll: RollMode::Normal,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillSettings {
    /// Jack of all trades.
    pub joat: bool,
    /// Flat bonus to every skill.
    pub bonus: i32,
    /// Roll mode applied to every skill.
    pub roll: RollMode,
    pub entries: BTreeMap<String, Proficiency>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaveSettings {
    pub override_value: Option<i32>,
    pub bonus: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitDieRecord {
    pub value: u32,
    pub max: u32,
    /// Replaces the class-granted pool size when set.
    pub override_value: Option<u32>,
}

impl HitDieRecord {
    /// Dice in the pool once fully rested.
    pub fn size(&self) -> u32 {
        self.override_value.unwrap_or(self.max)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Defenses {
    pub damage: Vec<DamageDefense>,
    pub condition_immunities: Vec<ConditionKind>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageDefense {
    pub damage: DamageType,
    pub level: DefenseLevel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SlotRecord {
    pub value: u32,
    pub max: u32,
    /// Temporary extra slots.
    pub tmp: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellSlots {
    /// Slots keyed by spell level.
    pub slots: BTreeMap<u8, SlotRecord>,
    pub pact: Option<SlotRecord>,
}

/// Status applied by the host, optionally tied to the effect that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatus {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reference: Option<EffectId>,
}

impl ActiveStatus {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reference: None,
        }
    }
}

/// Values of the original creature kept while polymorphed.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformSource {
    pub saves: Option<AbilityMap<i32>>,
    pub skills: BTreeMap<String, OriginalSkill>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OriginalSkill {
    pub value: f64,
    pub total: i32,
}
