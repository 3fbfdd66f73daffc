//! Resource pools.

use crate::error::{Diagnostics, ReferenceKind};
use crate::state::{Item, Operator, ResourceCalc, ResourceComponent, ResourceSource};

use super::Context;

/// One box in a row of use marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum UseMark {
    Used,
    Available,
    /// Remaining uses above the maximum.
    Over,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsesDisplay {
    /// Negative maximum; the pool is not shown.
    #[default]
    Hidden,
    Marks(Vec<UseMark>),
    Numeric { remaining: i32, max: i32 },
}

impl UsesDisplay {
    pub fn new(remaining: i32, max: i32, threshold: i32) -> Self {
        if max < 0 {
            return UsesDisplay::Hidden;
        }
        if max > threshold || remaining > threshold {
            return UsesDisplay::Numeric { remaining, max };
        }
        let marks = (0..max.max(remaining))
            .map(|slot| {
                if slot >= max {
                    UseMark::Over
                } else if slot < remaining {
                    UseMark::Available
                } else {
                    UseMark::Used
                }
            })
            .collect();
        UsesDisplay::Marks(marks)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceDerived {
    pub max: i32,
    pub remaining: i32,
    pub display: UsesDisplay,
}

/// Pool size of a resource.
///
/// A formula adds its source to the bonus (`+`) or scales the bonus by it
/// (`×`), is floored and then raised to its minimum. A class that is not
/// owned contributes the operator's identity.
pub fn max_uses(
    cx: &Context<'_, '_>,
    owner: &Item,
    calc: &ResourceCalc,
    issues: &mut Diagnostics,
) -> i32 {
    let (source, operator, bonus, min) = match calc {
        ResourceCalc::Fixed(value) => return *value,
        ResourceCalc::Formula {
            source,
            operator,
            bonus,
            min,
        } => (source, *operator, *bonus, *min),
    };

    let identity = match operator {
        Operator::Plus => 0.0,
        Operator::Mult => 1.0,
    };
    let value = match source {
        ResourceSource::Ability(ability) => f64::from(cx.stats.modifier(*ability)),
        ResourceSource::CharacterLevel => f64::from(cx.stats.level),
        ResourceSource::Proficiency => f64::from(cx.stats.prof),
        ResourceSource::ClassLevels(class) => match cx.stats.class_levels.get(class) {
            Some(levels) => f64::from(*levels),
            None => {
                issues.missing(&owner.id, ReferenceKind::Class, class);
                identity
            }
        },
    };

    let bonus = if bonus.is_finite() { bonus } else { 0.0 };
    let max = match operator {
        Operator::Plus => bonus + value,
        Operator::Mult => bonus * value,
    };
    (max.floor() as i32).max(min)
}

pub fn resource(
    cx: &Context<'_, '_>,
    owner: &Item,
    resource: &ResourceComponent,
    issues: &mut Diagnostics,
) -> ResourceDerived {
    let max = max_uses(cx, owner, &resource.calc, issues);
    let remaining = resource.remaining.unwrap_or(max).max(0);
    ResourceDerived {
        max,
        remaining,
        display: UsesDisplay::new(remaining, max, cx.rules.uses_mark_threshold),
    }
}
