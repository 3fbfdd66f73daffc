//! Class-first pass: levels, hit dice and spellcasting per class.

use std::collections::BTreeMap;

use crate::state::{Ability, ClassData, Entity, Item, ItemId, ItemKind};

#[derive(Clone, Copy, Debug)]
pub struct ClassInfo<'a> {
    pub item: &'a Item,
    pub data: &'a ClassData,
}

impl ClassInfo<'_> {
    pub fn spellcasting_ability(&self) -> Option<Ability> {
        self.data.spellcasting.map(|spellcasting| spellcasting.ability)
    }
}

/// Every class item of the entity, in document order.
#[derive(Clone, Debug, Default)]
pub struct ClassContext<'a> {
    classes: Vec<ClassInfo<'a>>,
}

impl<'a> ClassContext<'a> {
    pub fn build(entity: &'a Entity) -> Self {
        let classes = entity
            .items
            .iter()
            .filter_map(|item| match &item.kind {
                ItemKind::Class(data) => Some(ClassInfo { item, data }),
                _ => None,
            })
            .collect();
        Self { classes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo<'a>> {
        self.classes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&ClassInfo<'a>> {
        self.classes.iter().find(|class| &class.item.id == id)
    }

    /// Class an item draws its spellcasting from: itself, or its source class.
    pub fn for_item(&self, item: &Item) -> Option<&ClassInfo<'a>> {
        self.get(&item.id)
            .or_else(|| item.source_class.as_ref().and_then(|id| self.get(id)))
    }

    pub fn levels_by_id(&self) -> BTreeMap<ItemId, u32> {
        self.classes
            .iter()
            .map(|class| (class.item.id.clone(), class.data.levels))
            .collect()
    }

    pub fn total_levels(&self) -> u32 {
        self.classes.iter().map(|class| class.data.levels).sum()
    }

    /// Levels summed per hit die size.
    pub fn hit_dice(&self) -> BTreeMap<u32, u32> {
        let mut dice = BTreeMap::new();
        for class in &self.classes {
            if class.data.hit_die == 0 || class.data.levels == 0 {
                continue;
            }
            *dice.entry(class.data.hit_die).or_insert(0) += class.data.levels;
        }
        dice
    }

    /// `"{subclass }{name} {levels}"` per class, highest levels first, joined by `" / "`.
    pub fn display(&self) -> String {
        let mut classes: Vec<_> = self.classes.iter().collect();
        classes.sort_by(|a, b| b.data.levels.cmp(&a.data.levels));
        classes
            .into_iter()
            .map(|class| match &class.data.subclass {
                Some(subclass) => format!("{subclass} {} {}", class.item.name, class.data.levels),
                None => format!("{} {}", class.item.name, class.data.levels),
            })
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Character level: class levels when the entity has classes, else the
/// document level. Vehicles have no level.
pub fn character_level(entity: &Entity, classes: &ClassContext<'_>) -> u32 {
    if entity.is_vehicle() {
        0
    } else if classes.is_empty() {
        entity.system.details.level
    } else {
        classes.total_levels()
    }
}
