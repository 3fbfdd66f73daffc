use crate::error::Diagnostics;
use crate::filters::Predicate;
use crate::state::{Ability, AbilityMap};
use crate::stats::{
    PartLabel, RollModSummary, RollPart, bonus_to_parts, highest_proficiency, proficiency_part,
    total,
};

use super::Context;
use super::abilities::AbilityDerived;
use super::conditions::ConditionsDerived;
use super::rolls::{RollKind, condition_modes};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveDerived {
    pub parts: Vec<RollPart>,
    /// Floored total.
    pub save: i32,
    /// Proficiency multiple of the surviving proficiency part.
    pub proficient: f64,
    pub roll_mod: RollModSummary,
}

/// Saving throws: proficiency, ability modifier and flat bonus merged with
/// save bonuses, or a single override part.
pub fn saves(
    cx: &Context<'_, '_>,
    abilities: &AbilityMap<AbilityDerived>,
    conditions: &ConditionsDerived,
    issues: &mut Diagnostics,
) -> AbilityMap<SaveDerived> {
    let originals = cx.entity.transform.as_ref().and_then(|t| t.saves.as_ref());

    AbilityMap::from_fn(|ability: Ability| {
        let settings = cx.entity.system.saves[ability];
        let predicate = Predicate::Save(ability);

        let parts = match settings.override_value {
            Some(value) => vec![RollPart::new(value, PartLabel::Override)],
            None => {
                let prof = cx.entity.system.abilities[ability].proficient;
                let mut parts = Vec::new();
                if prof > 0.0 {
                    parts.push(proficiency_part(prof, cx.stats.prof, PartLabel::Proficiency));
                }
                parts.push(RollPart::new(
                    abilities[ability].modifier,
                    PartLabel::Ability(ability),
                ));
                if settings.bonus != 0 {
                    parts.push(RollPart::new(settings.bonus, PartLabel::Bonus));
                }
                for matched in cx.filters.bonuses(&predicate) {
                    parts.extend(bonus_to_parts(cx.stats, &matched, issues));
                }
                highest_proficiency(parts)
            }
        };

        let proficient = parts.iter().find_map(|part| part.proficiency).unwrap_or(0.0);
        let mut save = total(&parts);
        if let Some(originals) = originals {
            if proficient > 0.0 && originals[ability] > save {
                save = originals[ability];
            }
        }

        let roll_mod = RollModSummary::combine(
            condition_modes(conditions, RollKind::Save(ability)),
            &cx.filters.mods(&predicate),
        );

        SaveDerived {
            parts,
            save,
            proficient,
            roll_mod,
        }
    })
}
