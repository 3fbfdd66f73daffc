//! The derived snapshot published at the end of a cycle.

use std::collections::BTreeMap;

use crate::error::DerivationIssue;
use crate::prepare::abilities::{AbilityDerived, CheckDerived};
use crate::prepare::armour::ArmourDerived;
use crate::prepare::attack::AttackType;
use crate::prepare::conditions::ConditionsDerived;
use crate::prepare::defenses::DefensesDerived;
use crate::prepare::inventory::{EncumbranceDerived, InventoryDerived};
use crate::prepare::items::ItemDerived;
use crate::prepare::saves::SaveDerived;
use crate::prepare::skills::SkillDerived;
use crate::prepare::spellcasting::SpellcastingSummary;
use crate::prepare::vitals::{ExperienceDerived, HitPointsDerived};
use crate::state::{
    AbilityMap, ComponentId, EffectId, HitDieRecord, ItemId, Rule, Trigger,
};

/// Activation state of one effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectStatus {
    pub active: bool,
    pub toggleable: bool,
    pub applied: bool,
}

impl EffectStatus {
    /// Contributes to the owner's filter queries.
    pub fn contributes(&self) -> bool {
        self.toggleable && self.active && !self.applied
    }
}

/// Reference to an effect through its owning item.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRef {
    pub item: ItemId,
    pub effect: EffectId,
}

/// An attack listed on the sheet, with its damage formulas.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackEntry {
    pub item: ItemId,
    pub effect: EffectId,
    pub component: ComponentId,
    pub name: String,
    pub attack_type: AttackType,
    pub value: i32,
    pub damage: Vec<String>,
}

/// Entity-level derived values.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityDerived {
    pub prof: i32,
    pub level: u32,
    pub abilities: AbilityMap<AbilityDerived>,
    pub hp: HitPointsDerived,
    pub xp: Option<ExperienceDerived>,
    pub armour: ArmourDerived,
    pub init: CheckDerived,
    pub defenses: DefensesDerived,
    pub defense_summary: Vec<String>,
    pub conditions: ConditionsDerived,
    pub skills: BTreeMap<String, SkillDerived>,
    pub saves: AbilityMap<SaveDerived>,
    pub inventory: InventoryDerived,
    pub encumbrance: EncumbranceDerived,
    pub hit_dice: BTreeMap<u32, HitDieRecord>,
    pub tools: BTreeMap<String, SkillDerived>,
    /// Class display line, e.g. `Champion Fighter 5 / Wizard 2`.
    pub classes: String,
    pub spellcasting: SpellcastingSummary,
    pub attacks: Vec<AttackEntry>,
    /// Effects the host can switch on and off, in document order.
    pub toggleable: Vec<EffectRef>,
    /// Feats grouped by the event that triggers them.
    pub triggers: BTreeMap<Trigger, Vec<ItemId>>,
    /// Item ids grouped by item kind key.
    pub collections: BTreeMap<String, Vec<ItemId>>,
    /// Rule outcomes (armour and encumbrance flags) after rule toggles.
    pub rules: BTreeMap<Rule, bool>,
}

/// Everything one recomputation cycle produces.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedSnapshot {
    pub entity: EntityDerived,
    pub items: BTreeMap<ItemId, ItemDerived>,
    pub issues: Vec<DerivationIssue>,
}

impl DerivedSnapshot {
    pub fn item(&self, id: &ItemId) -> Option<&ItemDerived> {
        self.items.get(id)
    }

    /// Whether a rule outcome currently holds for the entity.
    pub fn rule(&self, rule: Rule) -> bool {
        self.entity.rules.get(&rule).copied().unwrap_or(false)
    }

    /// SHA-256 over the bincode encoding.
    ///
    /// Two cycles over the same entity produce the same digest.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
