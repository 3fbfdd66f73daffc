use std::collections::BTreeMap;

use crate::state::HitDieRecord;

use super::Context;

/// Hit dice pools keyed by die size.
///
/// Levels are summed per die across classes. A die no class grants any more
/// keeps its record with a max of 0. An override replaces the pool size.
pub fn hit_dice(cx: &Context<'_, '_>) -> BTreeMap<u32, HitDieRecord> {
    let granted = cx.classes.hit_dice();
    let mut pools = BTreeMap::new();

    for (&die, record) in &cx.entity.system.hit_dice {
        let max = granted.get(&die).copied().unwrap_or(0);
        let pool = HitDieRecord { max, ..*record };
        pools.insert(
            die,
            HitDieRecord {
                value: record.value.min(pool.size()),
                ..pool
            },
        );
    }

    for (die, levels) in granted {
        pools.entry(die).or_insert(HitDieRecord {
            value: levels,
            max: levels,
            override_value: None,
        });
    }

    pools
}
