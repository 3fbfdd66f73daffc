//! Item re-pass: every component of an item, with final entity values.

use std::collections::BTreeMap;

use crate::engine::EffectStatus;
use crate::error::{Diagnostics, ReferenceKind};
use crate::state::{ComponentId, ComponentKind, EffectId, Item, ScalingMode};

use super::Context;
use super::attack::{AttackDerived, attack};
use super::conditions::ConditionsDerived;
use super::damage::{DamageDerived, damage};
use super::dc::{DcDerived, dc};
use super::resource::{ResourceDerived, resource};

/// Derived values of one numeric component.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentDerived {
    Dc(DcDerived),
    Attack(AttackDerived),
    Damage(DamageDerived),
    Resource(ResourceDerived),
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDerived {
    pub components: BTreeMap<ComponentId, ComponentDerived>,
    pub effects: BTreeMap<EffectId, EffectStatus>,
}

impl ItemDerived {
    pub fn attack(&self, id: &ComponentId) -> Option<&AttackDerived> {
        match self.components.get(id)? {
            ComponentDerived::Attack(attack) => Some(attack),
            _ => None,
        }
    }

    pub fn damage(&self, id: &ComponentId) -> Option<&DamageDerived> {
        match self.components.get(id)? {
            ComponentDerived::Damage(damage) => Some(damage),
            _ => None,
        }
    }

    pub fn resource(&self, id: &ComponentId) -> Option<&ResourceDerived> {
        match self.components.get(id)? {
            ComponentDerived::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    pub fn dc(&self, id: &ComponentId) -> Option<&DcDerived> {
        match self.components.get(id)? {
            ComponentDerived::Dc(dc) => Some(dc),
            _ => None,
        }
    }
}

/// Cantrip dice gained per damage component, keyed by the scaled effect.
fn cantrip_dice<'i>(
    cx: &Context<'_, '_>,
    item: &'i Item,
    issues: &mut Diagnostics,
) -> BTreeMap<&'i EffectId, &'i [u32]> {
    let mut scaled = BTreeMap::new();
    for effect in &item.effects {
        for component in &effect.components {
            let ComponentKind::Scaling(scaling) = &component.kind else {
                continue;
            };
            if scaling.mode != ScalingMode::Cantrip {
                continue;
            }
            let target = scaling.reference.as_ref().unwrap_or(&effect.uuid);
            if item.effect(target).is_none() && cx.index.effect(target).is_none() {
                issues.missing(&item.id, ReferenceKind::Effect, target);
                continue;
            }
            scaled.insert(target, scaling.ndice.as_slice());
        }
    }
    scaled
}

pub fn prepare_item(
    cx: &Context<'_, '_>,
    item: &Item,
    statuses: &BTreeMap<EffectId, EffectStatus>,
    conditions: &ConditionsDerived,
    issues: &mut Diagnostics,
) -> ItemDerived {
    let tier = cx.rules.cantrip_tier(cx.stats.level);
    let scaled = cantrip_dice(cx, item, issues);
    let mut derived = ItemDerived::default();

    for effect in &item.effects {
        if let Some(status) = statuses.get(&effect.uuid) {
            derived.effects.insert(effect.uuid.clone(), *status);
        }
        let steps = scaled.get(&effect.uuid).copied().unwrap_or_default();
        let mut damage_pos = 0;

        for component in &effect.components {
            let value = match &component.kind {
                ComponentKind::Save(save) => ComponentDerived::Dc(dc(cx, item, save, issues)),
                ComponentKind::Attack(data) => {
                    ComponentDerived::Attack(attack(cx, item, data, conditions, issues))
                }
                ComponentKind::Damage(data) => {
                    let extra = tier * steps.get(damage_pos).copied().unwrap_or(0);
                    damage_pos += 1;
                    ComponentDerived::Damage(damage(cx, item, effect, data, extra, issues))
                }
                ComponentKind::Resource(data) => {
                    ComponentDerived::Resource(resource(cx, item, data, issues))
                }
                _ => continue,
            };
            derived.components.insert(component.uuid.clone(), value);
        }
    }

    derived
}
