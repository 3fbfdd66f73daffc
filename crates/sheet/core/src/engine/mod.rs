//! Recomputation cycle.
//!
//! The [`DerivationEngine`] turns an [`Entity`](crate::state::Entity) into a
//! fresh [`DerivedSnapshot`]. Each cycle runs strictly in sequence:
//!
//! 1. index the item tree and collate effect activation
//! 2. class pass (levels, hit dice, spellcasting per class)
//! 3. entity pass, each field reading only fields finalized before it
//! 4. item pass, class items first, against final entity values
//! 5. aggregation (attacks, toggles, triggers, collections)
//!
//! Missing or malformed references never abort a cycle. They contribute the
//! identity value and are recorded on the snapshot as issues.
mod derivation;
mod index;
mod snapshot;

pub use derivation::{Collated, DerivationEngine, collate, derive};
pub use index::ItemIndex;
pub use snapshot::{AttackEntry, DerivedSnapshot, EffectRef, EffectStatus, EntityDerived};
