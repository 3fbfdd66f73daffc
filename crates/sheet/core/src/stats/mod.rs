//! Roll parts, bonus resolution and the score pipeline.
//!
//! # Architecture
//!
//! ```text
//! [ FilterIndex query ]  (which components apply)
//!      ↓
//! [ bonus_to_parts ]     (bonus component → roll parts)
//!      ↓
//! [ highest_proficiency ] (one proficiency part per roll)
//!      ↓
//! [ ModifierStack ]      (bonus → multiplier → setter for scores)
//! ```

pub mod bonus;
mod context;
pub mod modifiers;
pub mod roll;

pub use bonus::{
    PartLabel, RollPart, bonus_parts, bonus_to_parts, highest_proficiency, proficiency_part,
    sum_parts, total,
};
pub use context::StatContext;
pub use modifiers::{ModifierStack, apply_bonuses, apply_multipliers, apply_setters};
pub use roll::{RollModSummary, determine_advantage, determine_mode};
