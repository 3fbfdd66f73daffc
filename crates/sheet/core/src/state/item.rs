//! Owned items and their kind-specific data.

use bitflags::bitflags;

use super::ability::Ability;
use super::component::SpellsComponent;
use super::effect::{ComponentKind, Effect};
use super::ids::{ComponentId, EffectId, ItemId};
use super::types::Currency;

/// Item owned by an entity.
///
/// The kind-specific payload lives in [`ItemKind`]; everything shared by all
/// kinds (weight, container membership, attunement, effects) lives here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sort: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    /// Container this item is stored in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<ItemId>,
    /// Class this item is sourced from (spells, class features).
    #[cfg_attr(feature = "serde", serde(default))]
    pub source_class: Option<ItemId>,
    /// `spells` component that granted this item.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_component: Option<ComponentId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight: f64,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub quantity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attunement: Attunement,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            sort: 0,
            effects: Vec::new(),
            parent: None,
            source_class: None,
            parent_component: None,
            weight: 0.0,
            quantity: 1,
            attunement: Attunement::default(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn item_type(&self) -> ItemType {
        ItemType::from(&self.kind)
    }

    /// Equipped state of equippable kinds; `None` for everything else.
    pub fn equipped(&self) -> Option<bool> {
        match &self.kind {
            ItemKind::Weapon(weapon) => Some(weapon.equipped),
            ItemKind::Equipment(equipment) => Some(equipment.equipped),
            _ => None,
        }
    }

    pub fn is_equippable(&self) -> bool {
        self.equipped().is_some()
    }

    pub fn is_physical(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Weapon(_)
                | ItemKind::Equipment(_)
                | ItemKind::Consumable(_)
                | ItemKind::Tool
                | ItemKind::Container(_)
                | ItemKind::Loot
        )
    }

    /// Magic enhancement bonus of weapons, armour and ammunition.
    pub fn magic_bonus(&self) -> i32 {
        match &self.kind {
            ItemKind::Weapon(weapon) => weapon.magic_bonus,
            ItemKind::Equipment(equipment) => equipment.magic_bonus,
            ItemKind::Consumable(consumable) => consumable.magic_bonus,
            _ => 0,
        }
    }

    pub fn is_magical(&self) -> bool {
        self.magic_bonus() != 0 || self.attunement.required
    }

    pub fn total_weight(&self) -> f64 {
        self.weight * f64::from(self.quantity)
    }

    pub fn effect(&self, uuid: &EffectId) -> Option<&Effect> {
        self.effects.iter().find(|e| &e.uuid == uuid)
    }

    /// All `spells` components across this item's effects.
    pub fn spells_components(
        &self,
    ) -> impl Iterator<Item = (&Effect, ComponentId, &SpellsComponent)> {
        self.effects.iter().flat_map(|effect| {
            effect.components.iter().filter_map(move |c| match &c.kind {
                ComponentKind::Spells(spells) => Some((effect, c.uuid.clone(), spells)),
                _ => None,
            })
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attunement {
    pub required: bool,
    pub attuned: bool,
}

/// Kind-specific item data.
#[derive(Clone, Debug, PartialEq, strum::EnumDiscriminants)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum_discriminants(name(ItemType))]
#[strum_discriminants(derive(Hash, PartialOrd, Ord, strum::AsRefStr, strum::Display))]
#[strum_discriminants(strum(serialize_all = "snake_case"))]
pub enum ItemKind {
    Class(ClassData),
    Weapon(WeaponData),
    Spell(SpellData),
    Feat(FeatData),
    Equipment(EquipmentData),
    Consumable(ConsumableData),
    Tool,
    Container(ContainerData),
    Loot,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassData {
    /// Machine key of the class.
    pub identifier: String,
    pub levels: u32,
    /// Hit die faces (6, 8, 10, 12).
    pub hit_die: u32,
    pub subclass: Option<String>,
    pub spellcasting: Option<ClassSpellcasting>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassSpellcasting {
    pub ability: Ability,
    pub progression: Progression,
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
pub enum Progression {
    #[default]
    Full,
    Half,
    Third,
    Pact,
}

bitflags! {
    /// Weapon properties that affect how attacks resolve.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct WeaponTags: u16 {
        const VERSATILE = 1 << 0;
        const THROWN    = 1 << 1;
        const FINESSE   = 1 << 2;
        const HEAVY     = 1 << 3;
        const LIGHT     = 1 << 4;
        const REACH     = 1 << 5;
        const AMMUNITION = 1 << 6;
        const TWO_HANDED = 1 << 7;
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
pub enum WeaponCategory {
    #[default]
    Simple,
    Martial,
    Unarmed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponData {
    pub equipped: bool,
    pub category: WeaponCategory,
    /// Ranged weapon (bows, crossbows); otherwise melee.
    pub ranged: bool,
    pub tags: WeaponTags,
    pub magic_bonus: i32,
    /// Loaded ammunition item.
    pub ammo: Option<ItemId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellData {
    /// 0 for cantrips.
    pub level: u8,
    pub prepared: bool,
    /// Always available (granted spells, cantrips).
    pub always: bool,
}

impl SpellData {
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activation {
    Action,
    BonusAction,
    Reaction,
    /// Triggered by an event rather than spent.
    Special,
    #[default]
    Passive,
}

/// Event a feat with special activation reacts to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Trigger {
    Hit,
    Damaged,
    TurnStart,
    TurnEnd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeatData {
    pub activation: Activation,
    pub trigger: Option<Trigger>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmourKind {
    Light,
    Medium,
    Heavy,
    Shield,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmourData {
    pub kind: ArmourKind,
    /// Base AC, or the bonus for shields.
    pub value: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub add_dex: bool,
    /// Cap on the Dex modifier added; uncapped when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_dex: Option<i32>,
    /// Minimum Str score to wear without penalty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strength: Option<i32>,
    /// Imposes disadvantage on stealth.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stealth: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentData {
    pub equipped: bool,
    pub armour: Option<ArmourData>,
    pub magic_bonus: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableKind {
    Ammunition,
    Potion,
    Scroll,
    Food,
    #[default]
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsumableData {
    pub kind: ConsumableKind,
    pub magic_bonus: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerData {
    /// Worn containers count towards carried weight; an unequipped one does not.
    pub equipped: bool,
    /// Contents weigh nothing (bag of holding).
    pub weightless: bool,
    pub currency: Currency,
}

impl Default for ContainerData {
    fn default() -> Self {
        Self {
            equipped: true,
            weightless: false,
            currency: Currency::default(),
        }
    }
}
