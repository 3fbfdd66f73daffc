use std::collections::BTreeSet;

use crate::state::{
    BonusComponent, Component, ComponentKind, ConditionComponent, Effect, Item,
    MultiplierComponent, RollModComponent, SetterComponent,
};
use crate::stats::PartLabel;

use super::Predicate;

/// Effect that is toggleable and currently active.
#[derive(Clone, Copy, Debug)]
pub struct ActiveEffect<'a> {
    pub item: &'a Item,
    pub effect: &'a Effect,
}

/// A component returned by a query, with its owners.
#[derive(Debug)]
pub struct Matched<'a, T> {
    pub item: &'a Item,
    pub effect: &'a Effect,
    pub component: &'a Component,
    pub data: &'a T,
}

impl<T> Clone for Matched<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Matched<'_, T> {}

impl<T> Matched<'_, T> {
    /// Label of parts contributed by this component: the effect name, or the
    /// item name for unnamed effects.
    pub fn label(&self) -> PartLabel {
        if self.effect.name.is_empty() {
            PartLabel::Effect(self.item.name.clone())
        } else {
            PartLabel::Effect(self.effect.name.clone())
        }
    }
}

/// Query functions over the active effects of one cycle.
///
/// Built once per cycle and reused for every attribute. Results follow
/// document order (item, then effect, then component).
#[derive(Clone, Debug, Default)]
pub struct FilterIndex<'a> {
    effects: Vec<ActiveEffect<'a>>,
}

impl<'a> FilterIndex<'a> {
    pub fn new(effects: impl IntoIterator<Item = ActiveEffect<'a>>) -> Self {
        Self {
            effects: effects.into_iter().collect(),
        }
    }

    pub fn effects(&self) -> &[ActiveEffect<'a>] {
        &self.effects
    }

    pub fn bonuses(&self, predicate: &Predicate) -> Vec<Matched<'a, BonusComponent>> {
        self.query(predicate, false, |kind| match kind {
            ComponentKind::Bonus(bonus) => Some(bonus),
            _ => None,
        })
    }

    pub fn multipliers(&self, predicate: &Predicate) -> Vec<Matched<'a, MultiplierComponent>> {
        self.query(predicate, false, |kind| match kind {
            ComponentKind::Multiplier(multiplier) => Some(multiplier),
            _ => None,
        })
    }

    pub fn setters(&self, predicate: &Predicate) -> Vec<Matched<'a, SetterComponent>> {
        self.query(predicate, false, |kind| match kind {
            ComponentKind::Setter(setter) => Some(setter),
            _ => None,
        })
    }

    pub fn mods(&self, predicate: &Predicate) -> Vec<Matched<'a, RollModComponent>> {
        self.query(predicate, false, |kind| match kind {
            ComponentKind::RollMod(roll_mod) => Some(roll_mod),
            _ => None,
        })
    }

    /// Condition components; an effect without filters always matches.
    pub fn conditions(&self, predicate: &Predicate) -> Vec<Matched<'a, ConditionComponent>> {
        self.query(predicate, true, |kind| match kind {
            ComponentKind::Condition(condition) => Some(condition),
            _ => None,
        })
    }

    fn query<T>(
        &self,
        predicate: &Predicate,
        filterless_matches: bool,
        pick: impl Fn(&'a ComponentKind) -> Option<&'a T>,
    ) -> Vec<Matched<'a, T>> {
        let mut seen = BTreeSet::new();
        let mut matched = Vec::new();

        for active in &self.effects {
            let mut filters = active.effect.filters().peekable();
            let applies = if filters.peek().is_none() {
                filterless_matches
            } else {
                filters.any(|filter| predicate.matches(filter))
            };
            if !applies {
                continue;
            }

            for component in &active.effect.components {
                let Some(data) = pick(&component.kind) else {
                    continue;
                };
                if !seen.insert(component.uuid.as_str()) {
                    continue;
                }
                matched.push(Matched {
                    item: active.item,
                    effect: active.effect,
                    component,
                    data,
                });
            }
        }

        matched
    }
}
