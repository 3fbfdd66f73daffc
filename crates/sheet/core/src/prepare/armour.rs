//! Armour class and worn-armour rules.

use crate::error::Diagnostics;
use crate::filters::Predicate;
use crate::state::{Ability, AbilityMap, ArmourData, ArmourKind, Entity, Item, ItemKind};
use crate::stats::ModifierStack;

use super::Context;
use super::abilities::AbilityDerived;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmourDerived {
    pub ac: i32,
    /// Wearing armour whose Str requirement exceeds the Str score.
    pub heavy_armour: bool,
    /// Wearing armour that hinders stealth.
    pub noisy_armour: bool,
    /// Lowercased names of worn armour and shields.
    pub display: String,
}

fn worn_armour(entity: &Entity) -> impl Iterator<Item = (&Item, &ArmourData)> {
    entity.items.iter().filter_map(|item| match &item.kind {
        ItemKind::Equipment(equipment) if equipment.equipped => {
            equipment.armour.as_ref().map(|armour| (item, armour))
        }
        _ => None,
    })
}

pub fn armour(
    cx: &Context<'_, '_>,
    abilities: &AbilityMap<AbilityDerived>,
    issues: &mut Diagnostics,
) -> ArmourDerived {
    let settings = cx.entity.system.attributes.ac;
    let modifier = |ability: Option<Ability>| ability.map_or(0, |a| abilities[a].modifier);

    let body = worn_armour(cx.entity).find(|(_, armour)| armour.kind != ArmourKind::Shield);
    let shields: Vec<_> = worn_armour(cx.entity)
        .filter(|(_, armour)| armour.kind == ArmourKind::Shield)
        .collect();

    let ac = match settings.override_value {
        Some(value) => value,
        None => {
            let mut base = match body {
                Some((item, armour)) => {
                    let dex = if armour.add_dex {
                        let dex = abilities[Ability::Dex].modifier;
                        armour.max_dex.map_or(dex, |cap| dex.min(cap))
                    } else {
                        0
                    };
                    armour.value + item.magic_bonus() + dex
                }
                None => settings.base + modifier(settings.ability1) + modifier(settings.ability2),
            };
            for (item, shield) in &shields {
                base += shield.value + item.magic_bonus();
            }
            ModifierStack::collect(cx.filters, cx.stats, &Predicate::Ac, issues)
                .apply(f64::from(base))
                .floor() as i32
        }
    };

    let strength = abilities[Ability::Str].value;
    let heavy_armour = worn_armour(cx.entity)
        .any(|(_, armour)| armour.strength.is_some_and(|needed| strength < needed));
    let noisy_armour = worn_armour(cx.entity).any(|(_, armour)| armour.stealth);
    let display = worn_armour(cx.entity)
        .map(|(item, _)| item.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(", ");

    ArmourDerived {
        ac,
        heavy_armour,
        noisy_armour,
        display,
    }
}
