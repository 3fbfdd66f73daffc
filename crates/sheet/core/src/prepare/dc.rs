use crate::error::Diagnostics;
use crate::filters::Predicate;
use crate::state::{
    Ability, AbilityRef, ComponentKind, DcCalc, Item, SaveComponent, SpellMethod,
};
use crate::stats::{ModifierStack, PartLabel, RollPart, bonus_to_parts, proficiency_part, sum_parts};

use super::Context;

/// Default base of a formula DC.
pub const BASE_DC: f64 = 8.0;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DcDerived {
    pub value: i32,
    pub parts: Vec<RollPart>,
    /// Spellcasting modifier used, when the DC scales with it.
    pub spell_mod: Option<i32>,
}

/// Spellcasting ability an item casts with.
///
/// A spell granted by an innate `spells` component casts with that
/// component's ability; otherwise the item's class decides, and the entity
/// default applies last (see [`StatContext::spell_modifier`]).
///
/// [`StatContext::spell_modifier`]: crate::stats::StatContext::spell_modifier
pub fn casting_ability(cx: &Context<'_, '_>, item: &Item) -> Option<Ability> {
    let innate = item
        .parent_component
        .as_ref()
        .and_then(|id| cx.index.component(id))
        .and_then(|(_, _, component)| match &component.kind {
            ComponentKind::Spells(spells) if spells.method == SpellMethod::Innate => spells.ability,
            _ => None,
        });
    innate.or_else(|| {
        cx.classes
            .for_item(item)
            .and_then(|class| class.spellcasting_ability())
    })
}

pub fn dc(
    cx: &Context<'_, '_>,
    item: &Item,
    save: &SaveComponent,
    issues: &mut Diagnostics,
) -> DcDerived {
    let (base, prof, ability) = match &save.dc {
        DcCalc::Fixed(value) => {
            return DcDerived {
                value: *value,
                parts: vec![RollPart::new(*value, PartLabel::Override)],
                spell_mod: None,
            };
        }
        DcCalc::Formula {
            base,
            prof,
            ability,
        } => (base.unwrap_or(BASE_DC), *prof, *ability),
    };

    let mut parts = vec![RollPart::new(base, PartLabel::Bonus)];
    if prof > 0.0 {
        parts.push(proficiency_part(prof, cx.stats.prof, PartLabel::Proficiency));
    }

    let mut spell_mod = None;
    match ability {
        Some(AbilityRef::Spell) => {
            let modifier = cx.stats.spell_modifier(casting_ability(cx, item));
            spell_mod = Some(modifier);
            parts.push(RollPart::new(modifier, PartLabel::Spell));
        }
        Some(AbilityRef::Ability(ability)) => {
            parts.push(RollPart::new(cx.stats.modifier(ability), PartLabel::Ability(ability)));
        }
        None => {}
    }

    let predicate = Predicate::Dc(ability);
    for matched in cx.filters.bonuses(&predicate) {
        parts.extend(bonus_to_parts(cx.stats, &matched, issues));
    }

    // Bonuses are already parts; only the multiplier and setter stages remain.
    let stack = ModifierStack::collect(cx.filters, cx.stats, &predicate, issues);
    let value = stack
        .apply_setter(stack.apply_multipliers(sum_parts(&parts).floor()))
        .floor() as i32;

    DcDerived {
        value,
        parts,
        spell_mod,
    }
}
