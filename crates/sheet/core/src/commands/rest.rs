//! Short and long rests.

use tracing::debug;

use crate::engine::DerivedSnapshot;
use crate::error::CommandError;
use crate::state::{
    ComponentId, ComponentKind, Dice, EffectId, Entity, HitDieRecord, ItemId, RechargeCalc,
    RechargeTime, SpellMethod,
};

use super::{Update, UpdateTarget};

/// A resource whose recharge needs a dice roll from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingRoll {
    pub item: ItemId,
    pub effect: EffectId,
    pub component: ComponentId,
    pub dice: Dice,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestResult {
    pub updates: Vec<Update>,
    pub pending_rolls: Vec<PendingRoll>,
}

pub fn short_rest(entity: &Entity, snapshot: &DerivedSnapshot) -> Result<RestResult, CommandError> {
    let mut rest = RestResult::default();
    recharge(entity, snapshot, RechargeTime::on_short_rest, &mut rest)?;
    if let Some(pact) = entity.system.spells.pact {
        if pact.value < pact.max {
            rest.updates.push(Update::int(UpdateTarget::PactSlot, pact.max));
        }
    }
    debug!(updates = rest.updates.len(), pending = rest.pending_rolls.len(), "short rest");
    Ok(rest)
}

/// Everything a short rest does, plus hit points, hit dice and spell slots.
pub fn long_rest(entity: &Entity, snapshot: &DerivedSnapshot) -> Result<RestResult, CommandError> {
    let mut rest = RestResult::default();
    recharge(entity, snapshot, RechargeTime::on_long_rest, &mut rest)?;

    let hp = &snapshot.entity.hp;
    if hp.value != hp.max {
        rest.updates.push(Update::int(UpdateTarget::HitPoints, hp.max));
    }
    if hp.temp != 0 {
        rest.updates.push(Update::int(UpdateTarget::TempHitPoints, 0));
    }

    recover_hit_dice(snapshot, &mut rest);

    for (&level, slot) in &entity.system.spells.slots {
        if slot.value < slot.max {
            rest.updates.push(Update::int(UpdateTarget::SpellSlot(level), slot.max));
        }
    }
    if let Some(pact) = entity.system.spells.pact {
        if pact.value < pact.max {
            rest.updates.push(Update::int(UpdateTarget::PactSlot, pact.max));
        }
    }

    debug!(updates = rest.updates.len(), pending = rest.pending_rolls.len(), "long rest");
    Ok(rest)
}

/// Refills resources whose recharge time matches, and innate spell pools.
fn recharge(
    entity: &Entity,
    snapshot: &DerivedSnapshot,
    recharges: fn(RechargeTime) -> bool,
    rest: &mut RestResult,
) -> Result<(), CommandError> {
    for item in &entity.items {
        for effect in &item.effects {
            for component in &effect.components {
                match &component.kind {
                    ComponentKind::Resource(resource) if recharges(resource.recharge.time) => {
                        let derived = snapshot
                            .item(&item.id)
                            .and_then(|derived| derived.resource(&component.uuid))
                            .ok_or_else(|| {
                                CommandError::StaleSnapshot(component.uuid.to_string())
                            })?;
                        if derived.remaining == derived.max {
                            continue;
                        }
                        match resource.recharge.calc {
                            RechargeCalc::All => rest.updates.push(Update::int(
                                UpdateTarget::Resource {
                                    item: item.id.clone(),
                                    effect: effect.uuid.clone(),
                                    component: component.uuid.clone(),
                                },
                                derived.max.max(0),
                            )),
                            RechargeCalc::Roll(dice) => rest.pending_rolls.push(PendingRoll {
                                item: item.id.clone(),
                                effect: effect.uuid.clone(),
                                component: component.uuid.clone(),
                                dice,
                            }),
                        }
                    }
                    ComponentKind::Spells(spells)
                        if spells.method == SpellMethod::Innate && spells.with_slot =>
                    {
                        let Some(max) = spells.max else {
                            continue;
                        };
                        if spells.remaining != Some(max) {
                            rest.updates.push(Update::int(
                                UpdateTarget::Spells {
                                    item: item.id.clone(),
                                    effect: effect.uuid.clone(),
                                    component: component.uuid.clone(),
                                },
                                max,
                            ));
                        }
                    }
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

/// Recovers half the total hit dice (at least one), largest dice first.
fn recover_hit_dice(snapshot: &DerivedSnapshot, rest: &mut RestResult) {
    let pools = &snapshot.entity.hit_dice;
    let total: u32 = pools.values().map(HitDieRecord::size).sum();
    if total == 0 {
        return;
    }
    let mut budget = (total / 2).max(1);

    for (&die, pool) in pools.iter().rev() {
        if budget == 0 {
            break;
        }
        let missing = pool.size().saturating_sub(pool.value);
        let recovered = missing.min(budget);
        if recovered > 0 {
            budget -= recovered;
            rest.updates
                .push(Update::int(UpdateTarget::HitDice(die), pool.value + recovered));
        }
    }
}
