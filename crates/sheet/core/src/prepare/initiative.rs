use crate::error::Diagnostics;
use crate::filters::Predicate;
use crate::state::{AbilityMap, VehicleKind};
use crate::stats::{
    PartLabel, RollModSummary, RollPart, bonus_to_parts, highest_proficiency, proficiency_part,
    total,
};

use super::Context;
use super::abilities::{AbilityDerived, CheckDerived};

/// Initiative parts: ability, flat bonus, half proficiency with jack of all
/// trades, vehicle crew quality, initiative bonuses. An override replaces all
/// of them.
///
/// The roll modification is attached once conditions are known.
pub fn initiative(
    cx: &Context<'_, '_>,
    abilities: &AbilityMap<AbilityDerived>,
    issues: &mut Diagnostics,
) -> CheckDerived {
    let settings = cx.entity.system.attributes.init;
    let predicate = Predicate::Initiative(settings.ability);

    let parts = match settings.override_value {
        Some(value) => vec![RollPart::new(value, PartLabel::Override)],
        None => {
            let mut parts = vec![RollPart::new(
                abilities[settings.ability].modifier,
                PartLabel::Ability(settings.ability),
            )];
            if settings.bonus != 0 {
                parts.push(RollPart::new(settings.bonus, PartLabel::Bonus));
            }
            if cx.entity.system.skills.joat {
                parts.push(proficiency_part(0.5, cx.stats.prof, PartLabel::Proficiency));
            }
            if cx.entity.is_vehicle() && cx.entity.system.details.vehicle != VehicleKind::Land {
                if let Some(quality) = cx.entity.system.attributes.quality {
                    parts.push(RollPart::new(quality, PartLabel::Quality));
                }
            }
            for matched in cx.filters.bonuses(&predicate) {
                parts.extend(bonus_to_parts(cx.stats, &matched, issues));
            }
            highest_proficiency(parts)
        }
    };

    CheckDerived {
        total: total(&parts),
        parts,
        roll_mod: RollModSummary::default(),
    }
}
