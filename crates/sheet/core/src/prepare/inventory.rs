//! Carried weight, containers and encumbrance.

use std::collections::BTreeMap;

use tracing::trace;

use crate::config::EncumbranceMode;
use crate::error::{Diagnostics, ReferenceKind};
use crate::filters::Predicate;
use crate::state::{Ability, AbilityMap, Item, ItemId, ItemKind};
use crate::stats::ModifierStack;

use super::Context;
use super::abilities::AbilityDerived;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerDerived {
    /// Items stored inside, in sort order.
    pub contents: Vec<ItemId>,
    /// Weight of the contents, whether or not it counts for the owner.
    pub carried: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryDerived {
    /// Weight counted against the owner's capacity.
    pub weight: f64,
    pub attunements: u32,
    /// Top-level physical items, in sort order.
    pub root: Vec<ItemId>,
    pub containers: BTreeMap<ItemId, ContainerDerived>,
}

/// Accumulates weight over physical items.
///
/// A container inside a container is lifted to the root. Contents of a
/// weightless or unequipped container do not count towards the owner's
/// weight, and neither does an unequipped container itself.
pub fn inventory(cx: &Context<'_, '_>, issues: &mut Diagnostics) -> InventoryDerived {
    let mut derived = InventoryDerived::default();
    let mut root: Vec<&Item> = Vec::new();
    let mut contents: BTreeMap<ItemId, Vec<&Item>> = BTreeMap::new();

    for item in cx.entity.items.iter().filter(|item| item.is_physical()) {
        if let ItemKind::Container(_) = item.kind {
            derived.containers.entry(item.id.clone()).or_default();
        }
    }

    for item in cx.entity.items.iter().filter(|item| item.is_physical()) {
        let weight = item.total_weight();
        if item.attunement.required && item.attunement.attuned {
            derived.attunements += 1;
        }

        let container = item.parent.as_ref().and_then(|parent| {
            let found = cx.index.item(parent);
            if found.is_none() {
                issues.missing(&item.id, ReferenceKind::Item, parent);
            }
            found.and_then(|container| match &container.kind {
                ItemKind::Container(data) => Some((container, data)),
                _ => None,
            })
        });

        match container {
            Some((container, data)) if !matches!(item.kind, ItemKind::Container(_)) => {
                if let Some(entry) = derived.containers.get_mut(&container.id) {
                    entry.carried += weight;
                }
                if !data.weightless && data.equipped {
                    derived.weight += weight;
                }
                contents.entry(container.id.clone()).or_default().push(item);
            }
            _ => {
                if item.parent.is_some() {
                    trace!(item = %item.id, "lifting item to the inventory root");
                }
                let unequipped_container =
                    matches!(&item.kind, ItemKind::Container(data) if !data.equipped);
                if !unequipped_container {
                    derived.weight += weight;
                }
                root.push(item);
            }
        }
    }

    if cx.rules.coin_weight && cx.rules.coins_per_pound > 0.0 {
        let containers: i64 = cx
            .entity
            .items
            .iter()
            .filter_map(|item| match &item.kind {
                ItemKind::Container(data) => Some(data.currency.coin_count()),
                _ => None,
            })
            .sum();
        let coins = cx.entity.system.currency.coin_count() + containers;
        derived.weight += coins as f64 / cx.rules.coins_per_pound;
    }

    if cx.entity.is_vehicle() && cx.rules.vehicle_weight_divisor > 0.0 {
        derived.weight /= cx.rules.vehicle_weight_divisor;
    }

    root.sort_by_key(|item| item.sort);
    derived.root = root.into_iter().map(|item| item.id.clone()).collect();
    for (container, mut items) in contents {
        items.sort_by_key(|item| item.sort);
        if let Some(entry) = derived.containers.get_mut(&container) {
            entry.contents = items.into_iter().map(|item| item.id.clone()).collect();
        }
    }

    derived
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncumbranceDerived {
    pub value: f64,
    pub max: f64,
    pub pct: f64,
    pub encumbered: bool,
    pub heavily_encumbered: bool,
    pub over_capacity: bool,
}

/// Carrying capacity and encumbrance flags for the configured rules mode.
///
/// Size scales capacity only; variant thresholds are Strength times the
/// configured multipliers.
pub fn encumbrance(
    cx: &Context<'_, '_>,
    abilities: &AbilityMap<AbilityDerived>,
    inventory: &InventoryDerived,
    issues: &mut Diagnostics,
) -> EncumbranceDerived {
    let strength = f64::from(abilities[Ability::Str].value);
    let size = cx.entity.system.size.carry_multiplier();

    let max = if cx.entity.is_vehicle() {
        cx.entity.system.attributes.cargo_capacity
    } else {
        ModifierStack::collect(cx.filters, cx.stats, &Predicate::Carry, issues)
            .apply(strength * size * cx.rules.carry_multiplier)
    };
    let value = inventory.weight;
    let pct = if max > 0.0 {
        (value / max * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let mut derived = EncumbranceDerived {
        value,
        max,
        pct,
        ..EncumbranceDerived::default()
    };
    match cx.rules.encumbrance {
        EncumbranceMode::Disabled => {}
        EncumbranceMode::CapacityOnly => {
            derived.over_capacity = value >= max;
        }
        EncumbranceMode::Variant => {
            derived.over_capacity = value >= max;
            if !cx.entity.is_vehicle() {
                derived.encumbered = value >= strength * cx.rules.encumbered_multiplier;
                derived.heavily_encumbered =
                    value >= strength * cx.rules.heavily_encumbered_multiplier;
            }
        }
    }
    derived
}
