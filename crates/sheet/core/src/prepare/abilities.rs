//! Ability scores and ability checks.

use crate::error::Diagnostics;
use crate::filters::Predicate;
use crate::state::{Ability, AbilityMap};
use crate::stats::{
    ModifierStack, PartLabel, RollModSummary, RollPart, bonus_to_parts, highest_proficiency, total,
};

use super::Context;

/// A d20 check: parts, floored total and the combined roll modification.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckDerived {
    pub parts: Vec<RollPart>,
    pub total: i32,
    pub roll_mod: RollModSummary,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDerived {
    pub value: i32,
    pub modifier: i32,
    pub check: CheckDerived,
}

/// Final ability scores: raw + bonuses → multipliers → setters, floored.
pub fn scores(cx: &Context<'_, '_>, issues: &mut Diagnostics) -> AbilityMap<AbilityDerived> {
    AbilityMap::from_fn(|ability| {
        let raw = cx.entity.system.abilities[ability].value;
        let value = ModifierStack::collect(
            cx.filters,
            cx.stats,
            &Predicate::AbilityScore(ability),
            issues,
        )
        .apply(f64::from(raw))
        .floor() as i32;
        AbilityDerived {
            value,
            modifier: Ability::modifier(value),
            check: CheckDerived::default(),
        }
    })
}

/// Ability-check parts, computed once every score is final.
///
/// Roll modes are left for the orchestrator to fill after conditions are known.
pub fn checks(
    cx: &Context<'_, '_>,
    abilities: &mut AbilityMap<AbilityDerived>,
    issues: &mut Diagnostics,
) {
    for ability in Ability::ALL {
        let predicate = Predicate::AbilityCheck(ability);
        let mut parts = vec![RollPart::new(
            abilities[ability].modifier,
            PartLabel::Ability(ability),
        )];
        for matched in cx.filters.bonuses(&predicate) {
            parts.extend(bonus_to_parts(cx.stats, &matched, issues));
        }
        let parts = highest_proficiency(parts);
        abilities[ability].check.total = total(&parts);
        abilities[ability].check.parts = parts;
    }
}
