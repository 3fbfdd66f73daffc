//! The six ability scores and a fixed-size map keyed by them.

use std::ops::{Index, IndexMut};

/// Core ability.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Ability {
    #[default]
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    /// Ability modifier for a score: `floor((score - 10) / 2)`.
    pub fn modifier(score: i32) -> i32 {
        (score - 10).div_euclid(2)
    }
}

/// Where a component takes its ability modifier from.
///
/// `Spell` resolves to the spellcasting ability of the granting class, falling
/// back to the entity's default spellcasting ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityRef {
    Ability(Ability),
    Spell,
}

impl AbilityRef {
    pub fn ability(self) -> Option<Ability> {
        match self {
            AbilityRef::Ability(ability) => Some(ability),
            AbilityRef::Spell => None,
        }
    }
}

impl From<Ability> for AbilityRef {
    fn from(ability: Ability) -> Self {
        AbilityRef::Ability(ability)
    }
}

/// One value per ability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityMap<T> {
    pub str: T,
    pub dex: T,
    pub con: T,
    pub int: T,
    pub wis: T,
    pub cha: T,
}

impl<T> AbilityMap<T> {
    pub fn from_fn(mut f: impl FnMut(Ability) -> T) -> Self {
        Self {
            str: f(Ability::Str),
            dex: f(Ability::Dex),
            con: f(Ability::Con),
            int: f(Ability::Int),
            wis: f(Ability::Wis),
            cha: f(Ability::Cha),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Ability, &T) -> U) -> AbilityMap<U> {
        AbilityMap::from_fn(|ability| f(ability, &self[ability]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, &T)> {
        Ability::ALL.into_iter().map(move |ability| (ability, &self[ability]))
    }
}

impl<T> Index<Ability> for AbilityMap<T> {
    type Output = T;

    fn index(&self, ability: Ability) -> &T {
        match ability {
            Ability::Str => &self.str,
            Ability::Dex => &self.dex,
            Ability::Con => &self.con,
            Ability::Int => &self.int,
            Ability::Wis => &self.wis,
            Ability::Cha => &self.cha,
        }
    }
}

impl<T> IndexMut<Ability> for AbilityMap<T> {
    fn index_mut(&mut self, ability: Ability) -> &mut T {
        match ability {
            Ability::Str => &mut self.str,
            Ability::Dex => &mut self.dex,
            Ability::Con => &mut self.con,
            Ability::Int => &mut self.int,
            Ability::Wis => &mut self.wis,
            Ability::Cha => &mut self.cha,
        }
    }
}
