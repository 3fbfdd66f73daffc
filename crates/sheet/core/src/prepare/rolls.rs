//! Roll modes imposed by active conditions.

use crate::state::{Ability, ConditionKind, RollMode};

use super::conditions::ConditionsDerived;

/// Kind of d20 roll a condition can affect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollKind {
    AbilityCheck,
    Attack,
    Save(Ability),
}

/// Modes that the entity's conditions impose on a roll.
pub fn condition_modes(conditions: &ConditionsDerived, kind: RollKind) -> Vec<RollMode> {
    let mut modes = Vec::new();
    let has = |condition| conditions.has(condition);

    match kind {
        RollKind::AbilityCheck => {
            if has(ConditionKind::Poisoned)
                || has(ConditionKind::Frightened)
                || conditions.exhaustion >= 1
            {
                modes.push(RollMode::Disadvantage);
            }
        }
        RollKind::Attack => {
            if has(ConditionKind::Poisoned)
                || has(ConditionKind::Frightened)
                || has(ConditionKind::Blinded)
                || has(ConditionKind::Prone)
                || has(ConditionKind::Restrained)
                || conditions.exhaustion >= 3
            {
                modes.push(RollMode::Disadvantage);
            }
            if has(ConditionKind::Invisible) {
                modes.push(RollMode::Advantage);
            }
        }
        RollKind::Save(ability) => {
            if conditions.exhaustion >= 3
                || (ability == Ability::Dex && has(ConditionKind::Restrained))
            {
                modes.push(RollMode::Disadvantage);
            }
        }
    }

    modes
}
