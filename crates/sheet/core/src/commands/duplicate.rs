use std::collections::BTreeMap;

use crate::state::{ComponentId, ComponentKind, EffectId, Item, ItemId};

/// Source of fresh ids for duplicated documents.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

impl<F> IdSource for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Copies an item under a fresh id with fresh effect and component uuids.
///
/// References between the item's own effects and components (scaling
/// sources, consumed resources) follow the copy; references to anything
/// outside the item are kept.
pub fn duplicate_item(item: &Item, ids: &mut impl IdSource) -> Item {
    let mut copy = item.clone();
    copy.id = ItemId::new(ids.next_id());

    let mut effects: BTreeMap<EffectId, EffectId> = BTreeMap::new();
    let mut components: BTreeMap<ComponentId, ComponentId> = BTreeMap::new();
    for effect in &mut copy.effects {
        let fresh = EffectId::new(ids.next_id());
        effects.insert(std::mem::replace(&mut effect.uuid, fresh.clone()), fresh);
        for component in &mut effect.components {
            let fresh = ComponentId::new(ids.next_id());
            components.insert(std::mem::replace(&mut component.uuid, fresh.clone()), fresh);
        }
    }

    for effect in &mut copy.effects {
        for component in &mut effect.components {
            match &mut component.kind {
                ComponentKind::Scaling(scaling) => {
                    if let Some(fresh) = scaling.reference.as_ref().and_then(|r| effects.get(r)) {
                        scaling.reference = Some(fresh.clone());
                    }
                }
                ComponentKind::Consume(consume) => {
                    let fresh = consume.reference.as_ref().and_then(|r| components.get(r));
                    if let Some(fresh) = fresh {
                        consume.reference = Some(fresh.clone());
                    }
                }
                _ => {}
            }
        }
    }

    copy
}
