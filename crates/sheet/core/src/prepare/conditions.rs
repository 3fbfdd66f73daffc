//! Active conditions from host statuses and temporary condition components.

use std::collections::BTreeMap;
use std::str::FromStr;

use strum::IntoEnumIterator;
use tracing::debug;

use crate::filters::Predicate;
use crate::state::{ConditionKind, DamageType};

use super::Context;
use super::defenses::DefensesDerived;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionsDerived {
    /// Every condition except exhaustion, which is levelled.
    pub conditions: BTreeMap<ConditionKind, bool>,
    /// Exhaustion level, 0–6.
    pub exhaustion: u8,
    /// A status ties the entity to a concentration effect.
    pub concentrating: bool,
}

impl ConditionsDerived {
    pub fn has(&self, condition: ConditionKind) -> bool {
        match condition {
            ConditionKind::Exhaustion => self.exhaustion > 0,
            other => self.conditions.get(&other).copied().unwrap_or(false),
        }
    }
}

/// Resolves conditions. Petrification also hardens `defenses`.
pub fn conditions(cx: &Context<'_, '_>, defenses: &mut DefensesDerived) -> ConditionsDerived {
    let mut derived = ConditionsDerived {
        conditions: ConditionKind::iter()
            .filter(|c| *c != ConditionKind::Exhaustion)
            .map(|c| (c, false))
            .collect(),
        ..ConditionsDerived::default()
    };

    for status in &cx.entity.statuses {
        if let Some(level) = ConditionKind::exhaustion_level(&status.id) {
            derived.exhaustion = derived.exhaustion.max(level);
            continue;
        }
        match ConditionKind::from_str(&status.id) {
            Ok(ConditionKind::Exhaustion) => {
                derived.exhaustion = derived.exhaustion.max(1);
            }
            Ok(condition) => {
                derived
                    .conditions
                    .insert(condition, !defenses.is_immune_to(condition));
            }
            Err(_) => debug!(status = %status.id, "status has no condition mapping"),
        }
    }

    for matched in cx.filters.conditions(&Predicate::Any) {
        if !matched.data.temp {
            continue;
        }
        match matched.data.condition {
            ConditionKind::Exhaustion => {
                derived.exhaustion = (derived.exhaustion + 1).min(ConditionKind::MAX_EXHAUSTION);
            }
            condition => {
                if !defenses.is_immune_to(condition) {
                    derived.conditions.insert(condition, true);
                }
            }
        }
    }

    if defenses.is_immune_to(ConditionKind::Exhaustion) {
        derived.exhaustion = 0;
    }

    if derived.has(ConditionKind::Petrified) {
        defenses.condition_immunities.insert(ConditionKind::Diseased);
        defenses.condition_immunities.insert(ConditionKind::Poisoned);
        defenses.resistances.extend(DamageType::iter());
    }

    derived.concentrating = cx.entity.statuses.iter().any(|status| {
        status
            .reference
            .as_ref()
            .and_then(|effect| cx.index.effect(effect))
            .is_some_and(|(_, effect)| effect.is_concentration())
    });

    derived
}
