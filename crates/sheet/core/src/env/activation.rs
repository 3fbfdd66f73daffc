use crate::state::{Effect, Item, ItemKind};

/// Host predicate deciding whether an effect is active this cycle.
pub trait ActivationOracle: Send + Sync {
    fn is_active(&self, item: &Item, effect: &Effect) -> bool;
}

/// Default activation rules.
///
/// An effect is active when its toggle is on, its item is equipped (if the
/// item can be equipped), attuned (if attunement is required) and, for
/// spells, prepared, always available or a cantrip.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardActivation;

impl ActivationOracle for StandardActivation {
    fn is_active(&self, item: &Item, effect: &Effect) -> bool {
        if !effect.enabled {
            return false;
        }
        if item.equipped() == Some(false) {
            return false;
        }
        if item.attunement.required && !item.attunement.attuned {
            return false;
        }
        is_usable(item)
    }
}

/// Whether an item's attacks belong on the sheet: weapons must be equipped,
/// spells prepared, always available or cantrips.
pub fn is_usable(item: &Item) -> bool {
    match &item.kind {
        ItemKind::Weapon(weapon) => weapon.equipped,
        ItemKind::Spell(spell) => spell.prepared || spell.always || spell.is_cantrip(),
        _ => true,
    }
}

impl<F> ActivationOracle for F
where
    F: Fn(&Item, &Effect) -> bool + Send + Sync,
{
    fn is_active(&self, item: &Item, effect: &Effect) -> bool {
        self(item, effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Attunement, EquipmentData, SpellData};

    #[test]
    fn unequipped_items_are_inactive() {
        let effect = Effect::new("e", "Ward");
        let mut item = Item::new(
            "ring",
            "Ring",
            ItemKind::Equipment(EquipmentData::default()),
        );
        assert!(!StandardActivation.is_active(&item, &effect));

        if let ItemKind::Equipment(data) = &mut item.kind {
            data.equipped = true;
        }
        assert!(StandardActivation.is_active(&item, &effect));

        item.attunement = Attunement {
            required: true,
            attuned: false,
        };
        assert!(!StandardActivation.is_active(&item, &effect));
    }

    #[test]
    fn unprepared_spells_are_inactive_unless_cantrips() {
        let effect = Effect::new("e", "Bless");
        let bless = Item::new(
            "bless",
            "Bless",
            ItemKind::Spell(SpellData {
                level: 1,
                ..SpellData::default()
            }),
        );
        assert!(!StandardActivation.is_active(&bless, &effect));

        let cantrip = Item::new("light", "Light", ItemKind::Spell(SpellData::default()));
        assert!(StandardActivation.is_active(&cantrip, &effect));
    }

    #[test]
    fn disabled_effects_are_inactive_and_closures_are_oracles() {
        let mut effect = Effect::new("e", "Rage");
        effect.enabled = false;
        let item = Item::new("feat", "Rage", ItemKind::Loot);
        assert!(!StandardActivation.is_active(&item, &effect));

        let always = |_: &Item, _: &Effect| true;
        assert!(always.is_active(&item, &effect));
    }
}
