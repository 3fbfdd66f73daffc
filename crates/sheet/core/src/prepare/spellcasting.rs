use std::collections::BTreeMap;

use crate::error::Diagnostics;
use crate::filters::Predicate;
use crate::state::{Ability, AbilityRef, ItemId, Progression};
use crate::stats::{ModifierStack, apply_bonuses};

use super::Context;
use super::dc::BASE_DC;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellcastingDerived {
    pub ability: Ability,
    pub modifier: i32,
    pub dc: i32,
    pub attack: i32,
    /// Absent for the entity's default ability.
    pub progression: Option<Progression>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellcastingSummary {
    pub classes: BTreeMap<ItemId, SpellcastingDerived>,
    pub default: Option<SpellcastingDerived>,
}

fn casting(
    cx: &Context<'_, '_>,
    ability: Ability,
    progression: Option<Progression>,
    issues: &mut Diagnostics,
) -> SpellcastingDerived {
    let modifier = cx.stats.modifier(ability);
    let dc = ModifierStack::collect(
        cx.filters,
        cx.stats,
        &Predicate::Dc(Some(AbilityRef::Spell)),
        issues,
    )
    .apply(BASE_DC + f64::from(cx.stats.prof + modifier))
    .floor() as i32;
    let attack = (f64::from(cx.stats.prof + modifier)
        + apply_bonuses(cx.filters, cx.stats, &Predicate::SpellAttack, issues))
    .floor() as i32;
    SpellcastingDerived {
        ability,
        modifier,
        dc,
        attack,
        progression,
    }
}

/// Spell DC and attack per spellcasting class and for the entity default.
pub fn spellcasting(cx: &Context<'_, '_>, issues: &mut Diagnostics) -> SpellcastingSummary {
    let classes = cx
        .classes
        .iter()
        .filter_map(|class| {
            let spellcasting = class.data.spellcasting?;
            let derived = casting(cx, spellcasting.ability, Some(spellcasting.progression), issues);
            Some((class.item.id.clone(), derived))
        })
        .collect();
    let default = cx
        .stats
        .spellcasting
        .map(|ability| casting(cx, ability, None, issues));
    SpellcastingSummary { classes, default }
}
