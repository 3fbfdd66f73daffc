use std::collections::BTreeMap;

use crate::state::{Ability, AbilityMap, ItemId};

/// Entity values read by calculators.
///
/// Starts from raw document values and is refined as the entity pass
/// finalizes proficiency and ability scores; the item re-pass only ever sees
/// the final version.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatContext {
    /// Proficiency bonus.
    pub prof: i32,
    pub modifiers: AbilityMap<i32>,
    /// Character level (sum of class levels, or the document level).
    pub level: u32,
    pub class_levels: BTreeMap<ItemId, u32>,
    /// Default spellcasting ability.
    pub spellcasting: Option<Ability>,
}

impl StatContext {
    pub fn modifier(&self, ability: Ability) -> i32 {
        self.modifiers[ability]
    }

    /// Spellcasting modifier: the class ability when given, else the entity default.
    pub fn spell_modifier(&self, class_spell: Option<Ability>) -> i32 {
        class_spell
            .or(self.spellcasting)
            .map_or(0, |ability| self.modifier(ability))
    }
}
