use tracing::debug;

use crate::engine::DerivedSnapshot;
use crate::error::CommandError;
use crate::state::{Component, ComponentId, ComponentKind, Effect, EffectId, Entity, Item, ItemId};

use super::{Update, UpdateTarget};

/// Resolves `item → effect → component`, failing at the first missing link.
pub(super) fn locate<'a>(
    entity: &'a Entity,
    item: &ItemId,
    effect: &EffectId,
    component: &ComponentId,
) -> Result<(&'a Item, &'a Effect, &'a Component), CommandError> {
    let owner = entity
        .item(item)
        .ok_or_else(|| CommandError::ItemNotFound(item.clone()))?;
    let found = owner
        .effect(effect)
        .ok_or_else(|| CommandError::EffectNotFound {
            item: item.clone(),
            effect: effect.clone(),
        })?;
    let component = found
        .component(component)
        .ok_or_else(|| CommandError::ComponentNotFound {
            effect: effect.clone(),
            component: component.clone(),
        })?;
    Ok((owner, found, component))
}

/// Sets or shifts a resource's remaining uses, clamped to `[0, max]`.
pub fn adjust_resource(
    entity: &Entity,
    snapshot: &DerivedSnapshot,
    item: &ItemId,
    effect: &EffectId,
    component: &ComponentId,
    value: i32,
    is_delta: bool,
) -> Result<Update, CommandError> {
    let (_, _, found) = locate(entity, item, effect, component)?;
    if !matches!(found.kind, ComponentKind::Resource(_)) {
        return Err(CommandError::NotAResource(component.clone()));
    }
    let derived = snapshot
        .item(item)
        .and_then(|derived| derived.resource(component))
        .ok_or_else(|| CommandError::StaleSnapshot(component.to_string()))?;

    let target = if is_delta {
        derived.remaining.saturating_add(value)
    } else {
        value
    };
    let remaining = target.clamp(0, derived.max.max(0));
    debug!(%component, from = derived.remaining, to = remaining, "adjusting resource");

    Ok(Update::int(
        UpdateTarget::Resource {
            item: item.clone(),
            effect: effect.clone(),
            component: component.clone(),
        },
        remaining,
    ))
}
