//! Skills and tools.
//!
//! Both share one calculation: a proficiency part, the ability modifier and
//! a flat bonus, or a single override part. Skills additionally get a passive
//! score and honour the polymorph floor.

use std::collections::BTreeMap;

use crate::error::Diagnostics;
use crate::filters::Predicate;
use crate::state::{Ability, AbilityMap, OriginalSkill, Proficiency, RollMode, Rule};
use crate::stats::{
    ModifierStack, PartLabel, RollModSummary, RollPart, bonus_to_parts, highest_proficiency,
    proficiency_part, sum_parts,
};

use super::Context;
use super::abilities::AbilityDerived;
use super::armour::ArmourDerived;
use super::conditions::ConditionsDerived;
use super::rolls::{RollKind, condition_modes};

pub const STEALTH: &str = "stealth";

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDerived {
    pub ability: Ability,
    /// Effective proficiency multiple.
    pub proficiency: f64,
    pub parts: Vec<RollPart>,
    pub total: i32,
    /// Passive score; tools have none.
    pub passive: Option<i32>,
    pub roll_mod: RollModSummary,
}

/// Base parts of a skill or tool before bonuses.
///
/// Jack of all trades lifts an untrained proficiency to 0.5. While
/// polymorphed, a trained skill keeps the original creature's better
/// proficiency.
pub fn calculate_skill(
    settings: &Proficiency,
    modifier: i32,
    skill_bonus: i32,
    joat: bool,
    prof_bonus: i32,
    original: Option<&OriginalSkill>,
) -> (f64, Vec<RollPart>) {
    let mut proficiency = settings.value;
    if proficiency == 0.0 && joat {
        proficiency = 0.5;
    }
    if let Some(original) = original {
        if proficiency > 0.5 && original.value > proficiency {
            proficiency = original.value;
        }
    }

    let parts = match settings.override_value {
        Some(value) => vec![RollPart::new(value, PartLabel::Override)],
        None => {
            let mut parts = Vec::new();
            if proficiency > 0.0 {
                parts.push(proficiency_part(proficiency, prof_bonus, PartLabel::Proficiency));
            }
            parts.push(RollPart::new(modifier, PartLabel::Ability(settings.ability)));
            let bonus = skill_bonus + settings.bonus;
            if bonus != 0 {
                parts.push(RollPart::new(bonus, PartLabel::Bonus));
            }
            parts
        }
    };
    (proficiency, parts)
}

pub fn skills(
    cx: &Context<'_, '_>,
    abilities: &AbilityMap<AbilityDerived>,
    armour: &ArmourDerived,
    conditions: &ConditionsDerived,
    issues: &mut Diagnostics,
) -> BTreeMap<String, SkillDerived> {
    let settings = &cx.entity.system.skills;
    let originals = cx.entity.transform.as_ref().map(|t| &t.skills);
    let noisy = armour.noisy_armour && cx.entity.rule_enabled(Rule::NoisyArmour);

    settings
        .entries
        .iter()
        .map(|(key, skill)| {
            let original = originals.and_then(|skills| skills.get(key));
            let predicate = Predicate::skill(key.clone(), skill.ability);
            let (proficiency, mut parts) = calculate_skill(
                skill,
                abilities[skill.ability].modifier,
                settings.bonus,
                settings.joat,
                cx.stats.prof,
                original,
            );
            if skill.override_value.is_none() {
                for matched in cx.filters.bonuses(&predicate) {
                    parts.extend(bonus_to_parts(cx.stats, &matched, issues));
                }
                parts = highest_proficiency(parts);
            }

            let mut total = sum_parts(&parts).floor() as i32;
            let trained = parts
                .iter()
                .find_map(|part| part.proficiency)
                .is_some_and(|value| value > 0.5);
            if let Some(original) = original {
                if trained && original.total > total {
                    total = original.total;
                }
            }

            let mut modes = vec![skill.roll, settings.roll];
            modes.extend(condition_modes(conditions, RollKind::AbilityCheck));
            if noisy && key == STEALTH {
                modes.push(RollMode::Disadvantage);
            }
            let roll_mod = RollModSummary::combine(modes, &cx.filters.mods(&predicate));

            let passive_predicate = Predicate::passive(key.clone());
            let passive_base = 10 + total + skill.passive_bonus + 5 * roll_mod.advantage();
            let passive =
                ModifierStack::collect(cx.filters, cx.stats, &passive_predicate, issues)
                    .apply(f64::from(passive_base))
                    .floor() as i32;

            let derived = SkillDerived {
                ability: skill.ability,
                proficiency,
                parts,
                total,
                passive: Some(passive),
                roll_mod,
            };
            (key.clone(), derived)
        })
        .collect()
}

/// Tool checks; only characters track tools.
pub fn tools(
    cx: &Context<'_, '_>,
    abilities: &AbilityMap<AbilityDerived>,
    conditions: &ConditionsDerived,
    issues: &mut Diagnostics,
) -> BTreeMap<String, SkillDerived> {
    cx.entity
        .system
        .tools
        .iter()
        .map(|(key, tool)| {
            let predicate = Predicate::tool(key.clone(), tool.ability);
            let (proficiency, mut parts) = calculate_skill(
                tool,
                abilities[tool.ability].modifier,
                0,
                cx.entity.system.skills.joat,
                cx.stats.prof,
                None,
            );
            if tool.override_value.is_none() {
                for matched in cx.filters.bonuses(&predicate) {
                    parts.extend(bonus_to_parts(cx.stats, &matched, issues));
                }
                parts = highest_proficiency(parts);
            }
            let mut modes = vec![tool.roll];
            modes.extend(condition_modes(conditions, RollKind::AbilityCheck));
            let derived = SkillDerived {
                ability: tool.ability,
                proficiency,
                total: sum_parts(&parts).floor() as i32,
                parts,
                passive: None,
                roll_mod: RollModSummary::combine(modes, &cx.filters.mods(&predicate)),
            };
            (key.clone(), derived)
        })
        .collect()
}
