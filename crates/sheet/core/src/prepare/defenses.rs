use std::collections::BTreeSet;

use crate::filters::Predicate;
use crate::state::{ConditionKind, DamageType, DefenseLevel};

use super::Context;

/// Damage resistances, immunities, vulnerabilities and condition immunities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefensesDerived {
    pub resistances: BTreeSet<DamageType>,
    pub immunities: BTreeSet<DamageType>,
    pub vulnerabilities: BTreeSet<DamageType>,
    pub condition_immunities: BTreeSet<ConditionKind>,
}

impl DefensesDerived {
    pub fn insert(&mut self, damage: DamageType, level: DefenseLevel) {
        match level {
            DefenseLevel::Resistance => self.resistances.insert(damage),
            DefenseLevel::Immunity => self.immunities.insert(damage),
            DefenseLevel::Vulnerability => self.vulnerabilities.insert(damage),
        };
    }

    pub fn is_immune_to(&self, condition: ConditionKind) -> bool {
        self.condition_immunities.contains(&condition)
    }

    /// One line per non-empty category, e.g. `"resistance: cold, fire"`.
    pub fn summary(&self) -> Vec<String> {
        fn line<T: AsRef<str>>(label: &str, values: &BTreeSet<T>) -> Option<String> {
            (!values.is_empty()).then(|| {
                let names: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
                format!("{label}: {}", names.join(", "))
            })
        }

        [
            line(DefenseLevel::Resistance.as_ref(), &self.resistances),
            line(DefenseLevel::Immunity.as_ref(), &self.immunities),
            line(DefenseLevel::Vulnerability.as_ref(), &self.vulnerabilities),
            line("condition_immunity", &self.condition_immunities),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Document defenses plus immunities granted by active non-temporary
/// condition components.
pub fn defenses(cx: &Context<'_, '_>) -> DefensesDerived {
    let mut derived = DefensesDerived::default();
    let document = &cx.entity.system.defenses;

    for defense in &document.damage {
        derived.insert(defense.damage, defense.level);
    }
    derived
        .condition_immunities
        .extend(document.condition_immunities.iter().copied());

    for matched in cx.filters.conditions(&Predicate::Any) {
        if !matched.data.temp {
            derived.condition_immunities.insert(matched.data.condition);
        }
    }

    derived
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_non_empty_categories() {
        let mut defenses = DefensesDerived::default();
        defenses.insert(DamageType::Fire, DefenseLevel::Resistance);
        defenses.insert(DamageType::Cold, DefenseLevel::Resistance);
        defenses.condition_immunities.insert(ConditionKind::Charmed);

        assert_eq!(
            defenses.summary(),
            vec![
                "resistance: cold, fire".to_string(),
                "condition_immunity: charmed".to_string(),
            ]
        );
    }
}
