//! Score pipeline: bonuses → multipliers → setters.
//!
//! Every scalar attribute that effects can touch (ability scores, AC, max HP,
//! carry capacity, DCs, passive scores, proficiency bonus) is finalized through
//! the same three stages. The order is fixed:
//!
//! 1. Additive bonuses are summed and added to the base
//! 2. Multipliers scale the running value in declaration order
//! 3. The last matching setter replaces the value outright

use crate::error::Diagnostics;
use crate::filters::{FilterIndex, Predicate};

use super::StatContext;
use super::bonus::{bonus_to_parts, sum_parts};

/// Collected bonus, multipliers and setter for one score.
///
/// # Example
/// ```
/// # use sheet_core::stats::ModifierStack;
/// let mut stack = ModifierStack::new();
/// stack.add_bonus(2.0);
/// stack.push_multiplier(2.0);
/// assert_eq!(stack.apply(10.0), 24.0);
///
/// stack.set(5.0);
/// assert_eq!(stack.apply(10.0), 5.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierStack {
    bonus: f64,
    multipliers: Vec<f64>,
    setter: Option<f64>,
}

impl ModifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every stage for `predicate` from the filter index.
    pub fn collect(
        index: &FilterIndex<'_>,
        stats: &StatContext,
        predicate: &Predicate,
        issues: &mut Diagnostics,
    ) -> Self {
        let mut stack = Self::new();
        stack.add_bonus(apply_bonuses(index, stats, predicate, issues));
        for matched in index.multipliers(predicate) {
            if matched.data.multiplier.is_finite() {
                stack.push_multiplier(matched.data.multiplier);
            } else {
                issues.malformed(
                    &matched.effect.uuid,
                    &matched.component.uuid,
                    "multiplier must be finite",
                );
            }
        }
        for matched in index.setters(predicate) {
            if matched.data.setter.is_finite() {
                stack.set(matched.data.setter);
            } else {
                issues.malformed(
                    &matched.effect.uuid,
                    &matched.component.uuid,
                    "setter must be finite",
                );
            }
        }
        stack
    }

    pub fn add_bonus(&mut self, bonus: f64) {
        self.bonus += bonus;
    }

    pub fn push_multiplier(&mut self, multiplier: f64) {
        self.multipliers.push(multiplier);
    }

    /// Later setters replace earlier ones.
    pub fn set(&mut self, value: f64) {
        self.setter = Some(value);
    }

    pub fn bonus(&self) -> f64 {
        self.bonus
    }

    pub fn apply(&self, base: f64) -> f64 {
        self.apply_setter(self.apply_multipliers(base + self.bonus))
    }

    /// Multiplier and setter stages only, for values whose bonuses were
    /// already folded in as roll parts.
    pub fn apply_multipliers(&self, value: f64) -> f64 {
        self.multipliers.iter().fold(value, |acc, m| acc * m)
    }

    pub fn apply_setter(&self, value: f64) -> f64 {
        self.setter.unwrap_or(value)
    }
}

/// Sum of every matched bonus's parts.
pub fn apply_bonuses(
    index: &FilterIndex<'_>,
    stats: &StatContext,
    predicate: &Predicate,
    issues: &mut Diagnostics,
) -> f64 {
    index
        .bonuses(predicate)
        .iter()
        .map(|matched| sum_parts(&bonus_to_parts(stats, matched, issues)))
        .sum()
}

/// Scales `value` by every matched multiplier.
pub fn apply_multipliers(
    index: &FilterIndex<'_>,
    predicate: &Predicate,
    value: f64,
    issues: &mut Diagnostics,
) -> f64 {
    index
        .multipliers(predicate)
        .iter()
        .fold(value, |acc, matched| {
            if matched.data.multiplier.is_finite() {
                acc * matched.data.multiplier
            } else {
                issues.malformed(
                    &matched.effect.uuid,
                    &matched.component.uuid,
                    "multiplier must be finite",
                );
                acc
            }
        })
}

/// Replaces `value` with the last matched setter, if any.
pub fn apply_setters(
    index: &FilterIndex<'_>,
    predicate: &Predicate,
    value: f64,
    issues: &mut Diagnostics,
) -> f64 {
    index
        .setters(predicate)
        .iter()
        .fold(value, |acc, matched| {
            if matched.data.setter.is_finite() {
                matched.data.setter
            } else {
                issues.malformed(
                    &matched.effect.uuid,
                    &matched.component.uuid,
                    "setter must be finite",
                );
                acc
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ActiveEffect;
    use crate::state::{
        BonusComponent, Component, ComponentKind, Effect, FilterComponent, Item, ItemKind,
        MultiplierComponent, ScoreFilter, SetterComponent,
    };

    fn carry_effect(name: &str, components: Vec<ComponentKind>) -> Effect {
        let mut effect = Effect::new(name, name).with_component(Component::new(
            format!("{name}-filter"),
            ComponentKind::Filter(FilterComponent::Score(ScoreFilter::Carry)),
        ));
        for (idx, kind) in components.into_iter().enumerate() {
            effect = effect.with_component(Component::new(format!("{name}-{idx}"), kind));
        }
        effect
    }

    #[test]
    fn pipeline_runs_bonus_then_multiplier_then_setter() {
        let mut item = Item::new("belt", "Belt", ItemKind::Loot);
        item.effects = vec![
            carry_effect("strong", vec![ComponentKind::Bonus(BonusComponent::flat(2.0))]),
            carry_effect(
                "mighty",
                vec![ComponentKind::Multiplier(MultiplierComponent { multiplier: 2.0 })],
            ),
        ];
        let index = FilterIndex::new(
            item.effects
                .iter()
                .map(|effect| ActiveEffect { item: &item, effect }),
        );
        let stats = StatContext::default();
        let mut issues = Diagnostics::new();

        let stack = ModifierStack::collect(&index, &stats, &Predicate::Carry, &mut issues);
        assert_eq!(stack.apply(10.0), 24.0);

        let value = 10.0 + apply_bonuses(&index, &stats, &Predicate::Carry, &mut issues);
        let value = apply_multipliers(&index, &Predicate::Carry, value, &mut issues);
        assert_eq!(apply_setters(&index, &Predicate::Carry, value, &mut issues), 24.0);
        assert!(issues.is_empty());
    }

    #[test]
    fn last_setter_in_document_order_wins() {
        let mut item = Item::new("belt", "Belt", ItemKind::Loot);
        item.effects = vec![
            carry_effect("a", vec![ComponentKind::Setter(SetterComponent { setter: 5.0 })]),
            carry_effect("b", vec![ComponentKind::Setter(SetterComponent { setter: 7.0 })]),
        ];
        let index = FilterIndex::new(
            item.effects
                .iter()
                .map(|effect| ActiveEffect { item: &item, effect }),
        );
        let mut issues = Diagnostics::new();
        assert_eq!(apply_setters(&index, &Predicate::Carry, 10.0, &mut issues), 7.0);
        assert_eq!(apply_setters(&index, &Predicate::Ac, 10.0, &mut issues), 10.0);
    }

    #[test]
    fn non_finite_multiplier_is_identity() {
        let mut item = Item::new("belt", "Belt", ItemKind::Loot);
        item.effects = vec![carry_effect(
            "broken",
            vec![ComponentKind::Multiplier(MultiplierComponent {
                multiplier: f64::NAN,
            })],
        )];
        let index = FilterIndex::new(
            item.effects
                .iter()
                .map(|effect| ActiveEffect { item: &item, effect }),
        );
        let mut issues = Diagnostics::new();
        assert_eq!(apply_multipliers(&index, &Predicate::Carry, 3.0, &mut issues), 3.0);
        assert_eq!(issues.into_issues().len(), 1);
    }
}
