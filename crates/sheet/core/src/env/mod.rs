//! Host-supplied collaborators.
//!
//! The engine never decides on its own whether an effect is switched on; it
//! asks an [`ActivationOracle`]. [`StandardActivation`] implements the usual
//! toggle, equipment, attunement and preparation rules.
mod activation;

pub use activation::{ActivationOracle, StandardActivation, is_usable};
