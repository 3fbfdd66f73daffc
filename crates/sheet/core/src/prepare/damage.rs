use crate::error::Diagnostics;
use crate::filters::Predicate;
use crate::state::{DamageCalc, DamageComponent, DamageType, Effect, Item, ItemKind};
use crate::stats::{
    PartLabel, RollPart, bonus_parts, bonus_to_parts, highest_proficiency, sum_parts,
};

use super::attack::{magic_bonus, resolve};
use super::dc::casting_ability;
use super::{Context, format_number};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageDerived {
    /// Unfloored sum of the parts.
    pub modifier: f64,
    pub ndice: u32,
    pub die: u32,
    /// Dice rolled on a critical hit.
    pub ncrit: u32,
    pub damage: Option<DamageType>,
    pub parts: Vec<RollPart>,
    /// `NdM+mod`, the bare modifier, or `0`.
    pub display: String,
}

/// Damage of one component.
///
/// `extra_dice` comes from cantrip scaling of the owning effect. Damage
/// bonuses are filtered by the range and category of the effect's attack
/// component, when it has one.
pub fn damage(
    cx: &Context<'_, '_>,
    item: &Item,
    effect: &Effect,
    damage: &DamageComponent,
    extra_dice: u32,
    issues: &mut Diagnostics,
) -> DamageDerived {
    let class_spell = casting_ability(cx, item);
    let mut parts = Vec::new();

    if damage.bonus != 0.0 && damage.bonus.is_finite() {
        parts.push(RollPart::new(damage.bonus, PartLabel::Bonus));
    }
    if let ItemKind::Weapon(_) = &item.kind {
        let magic = magic_bonus(cx, item, issues);
        if magic != 0 {
            parts.push(RollPart::new(magic, PartLabel::Magic));
        }
    }
    if let Some(source) = damage.ability {
        let label = match source.ability() {
            Some(ability) => PartLabel::Ability(ability),
            None => PartLabel::Spell,
        };
        parts.push(RollPart::new(cx.stats.ability_ref_modifier(source, class_spell), label));
    }

    let attack_type = effect.attack().map(|attack| resolve(item, attack).0);
    let predicate = Predicate::damage(
        attack_type.map(|t| t.range()),
        attack_type.map(|t| t.category()),
        damage.damage,
    );
    for matched in cx.filters.bonuses(&predicate) {
        parts.extend(bonus_to_parts(cx.stats, &matched, issues));
    }
    if let Some(extra) = &damage.extra_bonus {
        parts.extend(bonus_parts(cx.stats, extra, PartLabel::Bonus, &item.id, class_spell, issues));
    }
    let parts = highest_proficiency(parts);
    let modifier = sum_parts(&parts);

    let (ndice, die) = match damage.calc {
        DamageCalc::Formula => (damage.ndice + extra_dice, damage.die),
        DamageCalc::Fixed => (0, 0),
    };
    let ncrit = damage.ncrit.unwrap_or(ndice);

    DamageDerived {
        modifier,
        ndice,
        die,
        ncrit,
        damage: damage.damage,
        parts,
        display: display(ndice, die, modifier),
    }
}

fn display(ndice: u32, die: u32, modifier: f64) -> String {
    if ndice > 0 && die > 0 {
        let dice = format!("{ndice}d{die}");
        if modifier > 0.0 {
            format!("{dice}+{}", format_number(modifier))
        } else if modifier < 0.0 {
            format!("{dice}-{}", format_number(-modifier))
        } else {
            dice
        }
    } else if modifier != 0.0 {
        format_number(modifier)
    } else {
        "0".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(display(1, 8, 3.0), "1d8+3");
        assert_eq!(display(2, 6, -1.0), "2d6-1");
        assert_eq!(display(1, 10, 0.0), "1d10");
        assert_eq!(display(0, 0, 4.5), "4.5");
        assert_eq!(display(0, 6, 0.0), "0");
    }
}
