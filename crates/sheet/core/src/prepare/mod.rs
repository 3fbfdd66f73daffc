//! Component and attribute calculators.
//!
//! Every calculator is a pure function of a [`Context`] (plus whatever
//! earlier phases finalized) returning its derived record. None of them
//! mutate the entity; issues go to the cycle's [`Diagnostics`].
//!
//! [`Diagnostics`]: crate::error::Diagnostics
pub mod abilities;
pub mod armour;
pub mod attack;
pub mod classes;
pub mod conditions;
pub mod damage;
pub mod dc;
pub mod defenses;
pub mod hit_dice;
pub mod initiative;
pub mod inventory;
pub mod items;
pub mod resource;
pub mod rolls;
pub mod saves;
pub mod skills;
pub mod spellcasting;
pub mod vitals;

use crate::config::RulesConfig;
use crate::engine::ItemIndex;
use crate::filters::FilterIndex;
use crate::state::Entity;
use crate::stats::StatContext;

pub use classes::{ClassContext, ClassInfo};

/// Read-only inputs shared by every calculator in a cycle.
#[derive(Clone, Copy)]
pub struct Context<'c, 'a> {
    pub entity: &'a Entity,
    pub rules: &'c RulesConfig,
    pub index: &'c ItemIndex<'a>,
    pub filters: &'c FilterIndex<'a>,
    pub classes: &'c ClassContext<'a>,
    pub stats: &'c StatContext,
}

impl<'c, 'a> Context<'c, 'a> {
    /// Same inputs with refined entity stats.
    pub fn with_stats<'s>(&self, stats: &'s StatContext) -> Context<'s, 'a>
    where
        'c: 's,
    {
        Context {
            entity: self.entity,
            rules: self.rules,
            index: self.index,
            filters: self.filters,
            classes: self.classes,
            stats,
        }
    }
}

/// Renders a modifier without a trailing `.0`.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
