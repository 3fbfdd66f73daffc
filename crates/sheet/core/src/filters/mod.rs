//! Predicate filters over active effects.
//!
//! A [`Predicate`] describes the roll or score being computed; a
//! [`FilterIndex`] answers "which bonus/multiplier/setter/mod/condition
//! components apply to it" over the effects that are active this cycle.
mod index;
mod predicate;

pub use index::{ActiveEffect, FilterIndex, Matched};
pub use predicate::Predicate;
