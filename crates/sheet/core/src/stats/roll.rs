//! Advantage resolution and combined roll modifications.

use crate::filters::Matched;
use crate::state::{RollModComponent, RollMode};

/// Net advantage of a set of modes: any advantage and any disadvantage cancel.
pub fn determine_advantage(modes: impl IntoIterator<Item = RollMode>) -> i32 {
    let (mut advantage, mut disadvantage) = (false, false);
    for mode in modes {
        match mode {
            RollMode::Advantage => advantage = true,
            RollMode::Disadvantage => disadvantage = true,
            RollMode::Normal => {}
        }
    }
    i32::from(advantage) - i32::from(disadvantage)
}

pub fn determine_mode(modes: impl IntoIterator<Item = RollMode>) -> RollMode {
    match determine_advantage(modes) {
        1 => RollMode::Advantage,
        -1 => RollMode::Disadvantage,
        _ => RollMode::Normal,
    }
}

/// Every roll modification that applies to one roll, combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollModSummary {
    pub mode: RollMode,
    /// Highest minimum die result.
    pub min: Option<u32>,
    /// Highest reroll threshold.
    pub reroll: Option<u32>,
    /// Extra dice.
    pub ndice: i32,
}

impl RollModSummary {
    /// Combines fixed modes (document settings, conditions) with matched mods.
    pub fn combine(
        modes: impl IntoIterator<Item = RollMode>,
        mods: &[Matched<'_, RollModComponent>],
    ) -> Self {
        let mode = determine_mode(
            modes
                .into_iter()
                .chain(mods.iter().map(|matched| matched.data.mode)),
        );
        Self {
            mode,
            min: mods.iter().filter_map(|m| m.data.min).max(),
            reroll: mods.iter().filter_map(|m| m.data.reroll).max(),
            ndice: mods.iter().map(|m| m.data.ndice).sum(),
        }
    }

    pub fn advantage(&self) -> i32 {
        self.mode.advantage()
    }
}
