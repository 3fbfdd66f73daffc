use std::collections::BTreeMap;

use crate::error::{DerivationIssue, Diagnostics};
use crate::state::{
    Component, ComponentId, Effect, EffectId, Entity, Item, ItemId, ItemType,
};

/// Entity-scoped lookup arena over the item tree.
///
/// Built once per cycle by walking items in document order. When an id
/// repeats, the first occurrence wins and the duplicate is recorded.
#[derive(Clone, Debug, Default)]
pub struct ItemIndex<'a> {
    items: BTreeMap<&'a ItemId, &'a Item>,
    effects: BTreeMap<&'a EffectId, (&'a Item, &'a Effect)>,
    components: BTreeMap<&'a ComponentId, (&'a Item, &'a Effect, &'a Component)>,
    by_type: BTreeMap<ItemType, Vec<&'a Item>>,
}

impl<'a> ItemIndex<'a> {
    pub fn build(entity: &'a Entity, issues: &mut Diagnostics) -> Self {
        let mut index = Self::default();

        for item in &entity.items {
            if index.items.insert(&item.id, item).is_some() {
                issues.record(DerivationIssue::DuplicateId {
                    uuid: item.id.to_string(),
                });
            }
            index.by_type.entry(item.item_type()).or_default().push(item);

            for effect in &item.effects {
                if index.effects.contains_key(&effect.uuid) {
                    issues.record(DerivationIssue::DuplicateId {
                        uuid: effect.uuid.to_string(),
                    });
                } else {
                    index.effects.insert(&effect.uuid, (item, effect));
                }

                for component in &effect.components {
                    if index.components.contains_key(&component.uuid) {
                        issues.record(DerivationIssue::DuplicateId {
                            uuid: component.uuid.to_string(),
                        });
                    } else {
                        index
                            .components
                            .insert(&component.uuid, (item, effect, component));
                    }
                }
            }
        }

        index
    }

    pub fn item(&self, id: &ItemId) -> Option<&'a Item> {
        self.items.get(id).copied()
    }

    pub fn effect(&self, id: &EffectId) -> Option<(&'a Item, &'a Effect)> {
        self.effects.get(id).copied()
    }

    pub fn component(&self, id: &ComponentId) -> Option<(&'a Item, &'a Effect, &'a Component)> {
        self.components.get(id).copied()
    }

    /// Items of one kind, in document order.
    pub fn of_type(&self, item_type: ItemType) -> &[&'a Item] {
        self.by_type.get(&item_type).map_or(&[], Vec::as_slice)
    }

    /// Item kinds present, each with its items in document order.
    pub fn by_type(&self) -> impl Iterator<Item = (ItemType, &[&'a Item])> {
        self.by_type
            .iter()
            .map(|(item_type, items)| (*item_type, items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
