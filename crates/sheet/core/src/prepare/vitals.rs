//! Proficiency bonus, hit points and experience.

use crate::error::Diagnostics;
use crate::filters::Predicate;
use crate::state::HitPoints;
use crate::stats::ModifierStack;

use super::Context;

/// Proficiency bonus through the proficiency score pipeline; vehicles have none.
pub fn proficiency(cx: &Context<'_, '_>, issues: &mut Diagnostics) -> i32 {
    let raw = if cx.entity.is_vehicle() {
        0
    } else {
        cx.entity.system.attributes.prof
    };
    ModifierStack::collect(cx.filters, cx.stats, &Predicate::Proficiency, issues)
        .apply(f64::from(raw))
        .floor() as i32
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitPointsDerived {
    pub value: i32,
    pub max: i32,
    pub temp: i32,
    pub tempmax: i32,
}

/// `max = raw max + tempmax`, then the max-HP pipeline.
pub fn hit_points(cx: &Context<'_, '_>, issues: &mut Diagnostics) -> HitPointsDerived {
    let HitPoints {
        value,
        max,
        temp,
        tempmax,
    } = cx.entity.system.attributes.hp;
    let max = ModifierStack::collect(cx.filters, cx.stats, &Predicate::MaxHp, issues)
        .apply(f64::from(max + tempmax))
        .floor() as i32;
    HitPointsDerived {
        value,
        max,
        temp,
        tempmax,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperienceDerived {
    pub value: u32,
    /// XP at which the current level started.
    pub min: u32,
    /// XP needed for the next level.
    pub max: u32,
    /// Progress towards the next level, 0–100.
    pub pct: f64,
}

/// Experience progress; only characters track it.
pub fn experience(cx: &Context<'_, '_>) -> Option<ExperienceDerived> {
    if !cx.entity.is_character() {
        return None;
    }
    let value = cx.entity.system.details.xp;
    let level = cx.stats.level.max(1);
    let min = cx.rules.xp_for_level(level);
    let max = cx.rules.xp_for_level(level + 1);
    let pct = if max > min {
        (f64::from(value.saturating_sub(min)) / f64::from(max - min) * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    };
    Some(ExperienceDerived {
        value,
        min,
        max,
        pct,
    })
}
