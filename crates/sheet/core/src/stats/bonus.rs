//! Roll parts and bonus resolution.
//!
//! A roll total is the sum of named [`RollPart`]s. Bonus components become
//! one or more parts:
//!
//! ```text
//! constant  ──┐
//! prof × PB ──┤ (flagged proficiency)
//! ability   ──┼──▶ parts      (operator = Plus)
//! level     ──┘
//!
//! constant + floor(multiplier × Σ sources) ──▶ one part (operator = Mult)
//! ```

use std::fmt;

use crate::error::{Diagnostics, ReferenceKind};
use crate::filters::Matched;
use crate::state::{Ability, AbilityRef, BonusComponent, ItemId, LevelSource, Operator};

use super::StatContext;

/// Machine key naming where a roll part comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartLabel {
    Bonus,
    Magic,
    Spell,
    Proficiency,
    Ability(Ability),
    Override,
    Quality,
    /// Contributed by a named effect.
    Effect(String),
}

impl fmt::Display for PartLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartLabel::Bonus => f.write_str("bonus"),
            PartLabel::Magic => f.write_str("magic"),
            PartLabel::Spell => f.write_str("spell"),
            PartLabel::Proficiency => f.write_str("proficiency"),
            PartLabel::Ability(ability) => f.write_str(ability.as_ref()),
            PartLabel::Override => f.write_str("override"),
            PartLabel::Quality => f.write_str("quality"),
            PartLabel::Effect(name) => f.write_str(name),
        }
    }
}

/// Named numeric contribution to a roll total.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollPart {
    pub modifier: f64,
    pub label: PartLabel,
    /// Proficiency multiple when this part is a proficiency contribution.
    pub proficiency: Option<f64>,
}

impl RollPart {
    pub fn new(modifier: impl Into<f64>, label: PartLabel) -> Self {
        Self {
            modifier: modifier.into(),
            label,
            proficiency: None,
        }
    }

    pub fn proficiency(modifier: impl Into<f64>, label: PartLabel, value: f64) -> Self {
        Self {
            modifier: modifier.into(),
            label,
            proficiency: Some(value),
        }
    }

    pub fn is_proficiency(&self) -> bool {
        self.proficiency.is_some()
    }
}

/// Unfloored sum of part modifiers.
pub fn sum_parts(parts: &[RollPart]) -> f64 {
    parts.iter().map(|part| part.modifier).sum()
}

/// Floored sum of part modifiers.
pub fn total(parts: &[RollPart]) -> i32 {
    sum_parts(parts).floor() as i32
}

/// Keeps only the highest-valued proficiency part (first on ties); other
/// parts keep their order.
pub fn highest_proficiency(parts: Vec<RollPart>) -> Vec<RollPart> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, part) in parts.iter().enumerate() {
        let Some(value) = part.proficiency else {
            continue;
        };
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((idx, value));
        }
    }

    parts
        .into_iter()
        .enumerate()
        .filter(|(idx, part)| !part.is_proficiency() || best.is_some_and(|(top, _)| top == *idx))
        .map(|(_, part)| part)
        .collect()
}

/// Proficiency contribution: `floor(prof × PB)`, flagged with its multiple.
pub fn proficiency_part(prof: f64, proficiency_bonus: i32, label: PartLabel) -> RollPart {
    RollPart::proficiency(
        (prof * f64::from(proficiency_bonus)).floor(),
        label,
        prof,
    )
}

/// Converts a matched bonus component into roll parts.
pub fn bonus_to_parts(
    stats: &StatContext,
    matched: &Matched<'_, BonusComponent>,
    issues: &mut Diagnostics,
) -> Vec<RollPart> {
    if !is_well_formed(matched.data) {
        issues.malformed(
            &matched.effect.uuid,
            &matched.component.uuid,
            "bonus values must be finite",
        );
        return Vec::new();
    }
    bonus_parts(stats, matched.data, matched.label(), &matched.item.id, None, issues)
}

/// Shared conversion for bonus components and inline extra bonuses.
///
/// `class_spell` is the spellcasting ability of the class the owner is
/// sourced from, used when the bonus scales with the spellcasting modifier.
pub fn bonus_parts(
    stats: &StatContext,
    bonus: &BonusComponent,
    label: PartLabel,
    owner: &ItemId,
    class_spell: Option<Ability>,
    issues: &mut Diagnostics,
) -> Vec<RollPart> {
    if !is_well_formed(bonus) {
        return Vec::new();
    }

    let prof = (bonus.prof > 0.0)
        .then(|| proficiency_part(bonus.prof, stats.prof, label.clone()));
    let ability = bonus
        .ability
        .map(|source| stats.ability_ref_modifier(source, class_spell));
    let level = bonus
        .level
        .as_ref()
        .map(|source| level_of(stats, source, owner, issues));

    match bonus.operator {
        Operator::Plus => {
            let mut parts = Vec::new();
            if bonus.bonus != 0.0 {
                parts.push(RollPart::new(bonus.bonus, label.clone()));
            }
            if let Some(prof) = prof {
                parts.push(prof);
            }
            if let Some(modifier) = ability {
                parts.push(RollPart::new(modifier, label.clone()));
            }
            if let Some(level) = level {
                parts.push(RollPart::new(level, label));
            }
            parts
        }
        Operator::Mult => {
            let source = prof.map_or(0.0, |part| part.modifier)
                + f64::from(ability.unwrap_or(0))
                + f64::from(level.unwrap_or(0));
            let value = bonus.bonus + (bonus.multiplier * source).floor();
            vec![RollPart::new(value, label)]
        }
    }
}

fn is_well_formed(bonus: &BonusComponent) -> bool {
    bonus.bonus.is_finite() && bonus.prof.is_finite() && bonus.multiplier.is_finite()
}

fn level_of(
    stats: &StatContext,
    source: &LevelSource,
    owner: &ItemId,
    issues: &mut Diagnostics,
) -> u32 {
    match source {
        LevelSource::Character => stats.level,
        LevelSource::Class(class) => match stats.class_levels.get(class) {
            Some(levels) => *levels,
            None => {
                issues.missing(owner, ReferenceKind::Class, class);
                0
            }
        },
    }
}

impl StatContext {
    /// Modifier for a component's ability source.
    pub fn ability_ref_modifier(&self, source: AbilityRef, class_spell: Option<Ability>) -> i32 {
        match source {
            AbilityRef::Ability(ability) => self.modifier(ability),
            AbilityRef::Spell => self.spell_modifier(class_spell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AbilityMap;

    fn stats() -> StatContext {
        StatContext {
            prof: 3,
            modifiers: AbilityMap::from_fn(|ability| match ability {
                Ability::Str => 3,
                Ability::Wis => 2,
                _ => 0,
            }),
            level: 5,
            ..StatContext::default()
        }
    }

    #[test]
    fn tie_break_keeps_highest_proficiency() {
        let parts = vec![
            RollPart::new(1, PartLabel::Bonus),
            proficiency_part(0.5, 4, PartLabel::Proficiency),
            RollPart::new(3, PartLabel::Ability(Ability::Str)),
            proficiency_part(2.0, 4, PartLabel::Effect("Expertise".into())),
        ];
        let kept = highest_proficiency(parts);
        assert_eq!(kept.len(), 3);
        let profs: Vec<_> = kept.iter().filter(|p| p.is_proficiency()).collect();
        assert_eq!(profs.len(), 1);
        assert_eq!(profs[0].proficiency, Some(2.0));
        assert_eq!(profs[0].modifier, 8.0);
        assert_eq!(kept[0].label, PartLabel::Bonus);
        assert_eq!(kept[1].label, PartLabel::Ability(Ability::Str));
    }

    #[test]
    fn tie_break_prefers_first_on_equal_values() {
        let parts = vec![
            proficiency_part(1.0, 2, PartLabel::Proficiency),
            proficiency_part(1.0, 2, PartLabel::Effect("Other".into())),
        ];
        let kept = highest_proficiency(parts);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].label, PartLabel::Proficiency);
    }

    #[test]
    fn additive_bonus_splits_into_parts() {
        let bonus = BonusComponent {
            bonus: 1.0,
            prof: 0.5,
            ability: Some(AbilityRef::Ability(Ability::Wis)),
            ..BonusComponent::default()
        };
        let mut issues = Diagnostics::new();
        let parts = bonus_parts(
            &stats(),
            &bonus,
            PartLabel::Effect("Blessing".into()),
            &ItemId::from("feat"),
            None,
            &mut issues,
        );
        let modifiers: Vec<_> = parts.iter().map(|p| p.modifier).collect();
        assert_eq!(modifiers, vec![1.0, 1.0, 2.0]);
        assert_eq!(parts[1].proficiency, Some(0.5));
        assert!(issues.is_empty());
    }

    #[test]
    fn multiplicative_bonus_collapses_to_one_part() {
        let bonus = BonusComponent {
            bonus: 2.0,
            level: Some(LevelSource::Character),
            operator: Operator::Mult,
            multiplier: 0.5,
            ..BonusComponent::default()
        };
        let mut issues = Diagnostics::new();
        let parts = bonus_parts(
            &stats(),
            &bonus,
            PartLabel::Bonus,
            &ItemId::from("feat"),
            None,
            &mut issues,
        );
        assert_eq!(parts, vec![RollPart::new(4, PartLabel::Bonus)]);
    }

    #[test]
    fn missing_class_level_is_identity_and_reported() {
        let bonus = BonusComponent {
            level: Some(LevelSource::Class(ItemId::from("wizard"))),
            ..BonusComponent::default()
        };
        let mut issues = Diagnostics::new();
        let parts = bonus_parts(
            &stats(),
            &bonus,
            PartLabel::Bonus,
            &ItemId::from("feat"),
            None,
            &mut issues,
        );
        assert_eq!(sum_parts(&parts), 0.0);
        assert_eq!(issues.into_issues().len(), 1);
    }

    #[test]
    fn totals_floor_and_sums_do_not() {
        let parts = vec![
            RollPart::new(2.5, PartLabel::Bonus),
            RollPart::new(1, PartLabel::Magic),
        ];
        assert_eq!(sum_parts(&parts), 3.5);
        assert_eq!(total(&parts), 3);
    }
}
