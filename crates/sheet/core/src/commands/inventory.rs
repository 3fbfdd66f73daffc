use crate::error::CommandError;
use crate::state::{Currency, Entity, ItemId, ItemKind};

use super::{Update, UpdateTarget, UpdateValue};

/// Adds coins to the entity's purse, or to a container's.
pub fn receive_currency(
    entity: &Entity,
    currency: &Currency,
    container: Option<&ItemId>,
) -> Result<Update, CommandError> {
    let purse = match container {
        None => entity.system.currency,
        Some(id) => {
            let item = entity
                .item(id)
                .ok_or_else(|| CommandError::ItemNotFound(id.clone()))?;
            match &item.kind {
                ItemKind::Container(data) => data.currency,
                _ => return Err(CommandError::NotAContainer(id.clone())),
            }
        }
    };
    Ok(Update::new(
        UpdateTarget::Currency(container.cloned()),
        UpdateValue::Currency(purse.add(currency)),
    ))
}

/// Clears the parent of every item stored in a container that is being
/// deleted, so its contents move to the inventory root.
pub fn detach_container_contents(
    entity: &Entity,
    deleted: &ItemId,
) -> Result<Vec<Update>, CommandError> {
    let container = entity
        .item(deleted)
        .ok_or_else(|| CommandError::ItemNotFound(deleted.clone()))?;
    if !matches!(container.kind, ItemKind::Container(_)) {
        return Err(CommandError::NotAContainer(deleted.clone()));
    }

    Ok(entity
        .items
        .iter()
        .filter(|item| item.parent.as_ref() == Some(deleted))
        .map(|item| Update::new(UpdateTarget::Parent(item.id.clone()), UpdateValue::Clear))
        .collect())
}
