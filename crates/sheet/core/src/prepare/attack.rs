//! Attack rolls.
//!
//! An attack's range label is not stored: weapons resolve it from their
//! range type, tags and the component's explicit mode each cycle.

use crate::error::{Diagnostics, ReferenceKind};
use crate::filters::Predicate;
use crate::state::{
    AttackCategory, AttackComponent, AttackMode, AttackRange, Item, ItemKind, WeaponCategory,
    WeaponData, WeaponTags,
};
use crate::stats::{
    PartLabel, RollModSummary, RollPart, bonus_parts, bonus_to_parts, highest_proficiency,
    proficiency_part, total,
};

use super::Context;
use super::conditions::ConditionsDerived;
use super::dc::casting_ability;
use super::rolls::{RollKind, condition_modes};

/// Resolved attack label.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
#[strum(serialize_all = "kebab-case")]
pub enum AttackType {
    #[default]
    MeleeWeapon,
    RangedWeapon,
    MeleeSpell,
    RangedSpell,
}

impl AttackType {
    pub fn new(range: AttackRange, category: AttackCategory) -> Self {
        match (range, category) {
            (AttackRange::Melee, AttackCategory::Weapon) => AttackType::MeleeWeapon,
            (AttackRange::Ranged, AttackCategory::Weapon) => AttackType::RangedWeapon,
            (AttackRange::Melee, AttackCategory::Spell) => AttackType::MeleeSpell,
            (AttackRange::Ranged, AttackCategory::Spell) => AttackType::RangedSpell,
        }
    }

    pub fn range(self) -> AttackRange {
        match self {
            AttackType::MeleeWeapon | AttackType::MeleeSpell => AttackRange::Melee,
            AttackType::RangedWeapon | AttackType::RangedSpell => AttackRange::Ranged,
        }
    }

    pub fn category(self) -> AttackCategory {
        match self {
            AttackType::MeleeWeapon | AttackType::RangedWeapon => AttackCategory::Weapon,
            AttackType::MeleeSpell | AttackType::RangedSpell => AttackCategory::Spell,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackDerived {
    pub value: i32,
    pub parts: Vec<RollPart>,
    pub attack_type: AttackType,
    /// Wielding mode; weapons only.
    pub mode: Option<AttackMode>,
    pub roll_mod: RollModSummary,
}

/// Magic bonus of the item plus that of the ammunition it loads.
pub(super) fn magic_bonus(cx: &Context<'_, '_>, item: &Item, issues: &mut Diagnostics) -> i32 {
    let mut bonus = item.magic_bonus();
    if let Some(ammo) = weapon(item).and_then(|weapon| weapon.ammo.as_ref()) {
        match cx.index.item(ammo) {
            Some(ammo) => bonus += ammo.magic_bonus(),
            None => issues.missing(&item.id, ReferenceKind::Ammunition, ammo),
        }
    }
    bonus
}

fn weapon(item: &Item) -> Option<&WeaponData> {
    match &item.kind {
        ItemKind::Weapon(weapon) => Some(weapon),
        _ => None,
    }
}

/// Attack type and wielding mode of an attack component on `item`.
pub fn resolve(item: &Item, attack: &AttackComponent) -> (AttackType, Option<AttackMode>) {
    let weapon = match weapon(item) {
        Some(weapon) if attack.category == AttackCategory::Weapon => weapon,
        _ => return (AttackType::new(attack.attack, attack.category), None),
    };

    let requested = attack.mode.or(match (weapon.category, weapon.ranged) {
        (WeaponCategory::Unarmed, _) => Some(AttackMode::Unarmed),
        (_, true) => Some(AttackMode::Ranged),
        _ => None,
    });
    let mode = match requested {
        Some(AttackMode::Versatile) if !weapon.tags.contains(WeaponTags::VERSATILE) => {
            AttackMode::Melee
        }
        Some(AttackMode::Ranged) if !weapon.ranged && !weapon.tags.contains(WeaponTags::THROWN) => {
            AttackMode::Melee
        }
        Some(mode) => mode,
        None => AttackMode::Melee,
    };

    let attack_type = match mode {
        AttackMode::Ranged => AttackType::RangedWeapon,
        _ => AttackType::MeleeWeapon,
    };
    (attack_type, Some(mode))
}

pub fn attack(
    cx: &Context<'_, '_>,
    item: &Item,
    attack: &AttackComponent,
    conditions: &ConditionsDerived,
    issues: &mut Diagnostics,
) -> AttackDerived {
    let (attack_type, mode) = resolve(item, attack);
    let class_spell = casting_ability(cx, item);

    let flat = attack.bonus + magic_bonus(cx, item, issues);

    let mut parts = Vec::new();
    if flat != 0 {
        parts.push(RollPart::new(flat, PartLabel::Bonus));
    }
    if let Some(source) = attack.ability {
        let label = match source.ability() {
            Some(ability) => PartLabel::Ability(ability),
            None => PartLabel::Spell,
        };
        parts.push(RollPart::new(cx.stats.ability_ref_modifier(source, class_spell), label));
    }
    if attack.proficient {
        parts.push(proficiency_part(1.0, cx.stats.prof, PartLabel::Proficiency));
    }

    let predicate = Predicate::attack(attack_type.range(), attack_type.category());
    for matched in cx.filters.bonuses(&predicate) {
        parts.extend(bonus_to_parts(cx.stats, &matched, issues));
    }
    if let Some(extra) = &attack.extra_bonus {
        parts.extend(bonus_parts(cx.stats, extra, PartLabel::Bonus, &item.id, class_spell, issues));
    }
    let parts = highest_proficiency(parts);

    let roll_mod = RollModSummary::combine(
        condition_modes(conditions, RollKind::Attack),
        &cx.filters.mods(&predicate),
    );

    AttackDerived {
        value: total(&parts),
        parts,
        attack_type,
        mode,
        roll_mod,
    }
}
