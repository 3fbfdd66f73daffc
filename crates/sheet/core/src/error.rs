//! Common error infrastructure for sheet-core.
//!
//! Two families live here:
//!
//! - [`DerivationIssue`]: problems found while recomputing a snapshot. They are
//!   never returned as `Err`; the engine substitutes an identity value and
//!   records the issue in the snapshot.
//! - [`CommandError`]: failures of sheet commands (rests, resource
//!   adjustment, currency) addressed at items or components that do not exist.
//!
//! Both implement [`SheetError`] for uniform severity classification.

use crate::state::{ComponentId, EffectId, ItemId};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The value was substituted; the snapshot is still usable.
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unknown item, component of the wrong kind
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: duplicate uuids in one item tree
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all sheet-core errors.
pub trait SheetError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier of the variant, for logging and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// What a dangling reference pointed at.
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ReferenceKind {
    Item,
    Class,
    Effect,
    Component,
    Ammunition,
}

/// Problem detected during a recomputation cycle.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DerivationIssue {
    #[error("{owner} references missing {kind} `{target}`")]
    MissingReference {
        /// Item holding the reference.
        owner: ItemId,
        kind: ReferenceKind,
        target: String,
    },

    #[error("component {component} of effect {effect} is malformed: {reason}")]
    MalformedComponent {
        effect: EffectId,
        component: ComponentId,
        reason: String,
    },

    #[error("uuid `{uuid}` appears more than once in the item tree")]
    DuplicateId { uuid: String },
}

impl SheetError for DerivationIssue {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingReference { .. } | Self::MalformedComponent { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::DuplicateId { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingReference { .. } => "MISSING_REFERENCE",
            Self::MalformedComponent { .. } => "MALFORMED_COMPONENT",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
        }
    }
}

/// Issue sink for one cycle.
///
/// Issues are deduplicated so that a reference consulted by several
/// calculators is reported once.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    issues: Vec<DerivationIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, issue: DerivationIssue) {
        if self.issues.contains(&issue) {
            return;
        }
        tracing::debug!(code = issue.error_code(), "{issue}");
        self.issues.push(issue);
    }

    pub fn missing(&mut self, owner: &ItemId, kind: ReferenceKind, target: impl ToString) {
        self.record(DerivationIssue::MissingReference {
            owner: owner.clone(),
            kind,
            target: target.to_string(),
        });
    }

    pub fn malformed(
        &mut self,
        effect: &EffectId,
        component: &ComponentId,
        reason: impl Into<String>,
    ) {
        self.record(DerivationIssue::MalformedComponent {
            effect: effect.clone(),
            component: component.clone(),
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn into_issues(self) -> Vec<DerivationIssue> {
        self.issues
    }
}

/// Failure of a sheet command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("item `{0}` not found")]
    ItemNotFound(ItemId),

    #[error("effect `{effect}` not found on item `{item}`")]
    EffectNotFound { item: ItemId, effect: EffectId },

    #[error("component `{component}` not found on effect `{effect}`")]
    ComponentNotFound {
        effect: EffectId,
        component: ComponentId,
    },

    #[error("component `{0}` is not a resource")]
    NotAResource(ComponentId),

    #[error("item `{0}` is not a container")]
    NotAContainer(ItemId),

    #[error("snapshot has no derived values for `{0}`; recompute before issuing commands")]
    StaleSnapshot(String),
}

impl SheetError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StaleSnapshot(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::EffectNotFound { .. } => "EFFECT_NOT_FOUND",
            Self::ComponentNotFound { .. } => "COMPONENT_NOT_FOUND",
            Self::NotAResource(_) => "NOT_A_RESOURCE",
            Self::NotAContainer(_) => "NOT_A_CONTAINER",
            Self::StaleSnapshot(_) => "STALE_SNAPSHOT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_deduplicate_issues() {
        let mut diagnostics = Diagnostics::new();
        let owner = ItemId::from("sword");
        diagnostics.missing(&owner, ReferenceKind::Ammunition, "arrows");
        diagnostics.missing(&owner, ReferenceKind::Ammunition, "arrows");
        assert_eq!(diagnostics.into_issues().len(), 1);
    }

    #[test]
    fn severities_follow_variant() {
        let issue = DerivationIssue::DuplicateId { uuid: "x".into() };
        assert_eq!(issue.severity(), ErrorSeverity::Internal);
        assert_eq!(issue.error_code(), "DUPLICATE_ID");

        let err = CommandError::NotAResource(ComponentId::from("c1"));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(!err.severity().is_recoverable());
    }
}
