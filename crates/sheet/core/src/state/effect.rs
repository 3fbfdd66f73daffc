use super::component::{
    AppliedComponent, AttackComponent, BonusComponent, ConditionComponent, ConsumeComponent,
    DamageComponent, DurationComponent, FilterComponent, MultiplierComponent, ResourceComponent,
    RollModComponent, SaveComponent, ScalingComponent, SetterComponent, SpellsComponent,
    TargetComponent,
};
use super::ids::{ComponentId, EffectId};

/// Named bundle of components, toggled as a unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub uuid: EffectId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub components: Vec<Component>,
    /// Persisted toggle flag.
    #[cfg_attr(feature = "serde", serde(default = "enabled"))]
    pub enabled: bool,
}

#[cfg(feature = "serde")]
fn enabled() -> bool {
    true
}

impl Effect {
    pub fn new(uuid: impl Into<EffectId>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            components: Vec::new(),
            enabled: true,
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Owns at least one component of an active kind.
    pub fn is_toggleable(&self) -> bool {
        self.components.iter().any(|c| c.kind.is_active_kind())
    }

    /// Applied to targets rather than to the owner.
    pub fn is_applied(&self) -> bool {
        self.components
            .iter()
            .any(|c| matches!(c.kind, ComponentKind::Applied(_)))
    }

    pub fn filters(&self) -> impl Iterator<Item = &FilterComponent> {
        self.components.iter().filter_map(|c| match &c.kind {
            ComponentKind::Filter(filter) => Some(filter),
            _ => None,
        })
    }

    pub fn component(&self, uuid: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| &c.uuid == uuid)
    }

    /// First attack component, used to scope sibling damage bonuses.
    pub fn attack(&self) -> Option<&AttackComponent> {
        self.components.iter().find_map(|c| match &c.kind {
            ComponentKind::Attack(attack) => Some(attack),
            _ => None,
        })
    }

    pub fn is_concentration(&self) -> bool {
        self.components
            .iter()
            .any(|c| matches!(&c.kind, ComponentKind::Duration(d) if d.concentration))
    }
}

/// Single typed rule unit inside an effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    pub uuid: ComponentId,
    pub kind: ComponentKind,
}

impl Component {
    pub fn new(uuid: impl Into<ComponentId>, kind: ComponentKind) -> Self {
        Self {
            uuid: uuid.into(),
            kind,
        }
    }
}

/// Closed set of component kinds.
#[derive(Clone, Debug, PartialEq, strum::EnumDiscriminants)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum_discriminants(name(ComponentType))]
#[strum_discriminants(derive(Hash, PartialOrd, Ord, strum::AsRefStr, strum::Display))]
#[strum_discriminants(strum(serialize_all = "snake_case"))]
pub enum ComponentKind {
    Attack(AttackComponent),
    Damage(DamageComponent),
    Save(SaveComponent),
    Resource(ResourceComponent),
    Bonus(BonusComponent),
    Multiplier(MultiplierComponent),
    Setter(SetterComponent),
    #[strum_discriminants(strum(serialize = "mod"))]
    RollMod(RollModComponent),
    Filter(FilterComponent),
    Condition(ConditionComponent),
    Scaling(ScalingComponent),
    Consume(ConsumeComponent),
    Target(TargetComponent),
    Spells(SpellsComponent),
    Applied(AppliedComponent),
    Duration(DurationComponent),
}

impl ComponentKind {
    pub fn component_type(&self) -> ComponentType {
        ComponentType::from(self)
    }

    /// Kinds that make their effect toggleable.
    pub fn is_active_kind(&self) -> bool {
        matches!(
            self,
            ComponentKind::Bonus(_)
                | ComponentKind::Multiplier(_)
                | ComponentKind::Setter(_)
                | ComponentKind::RollMod(_)
                | ComponentKind::Resource(_)
                | ComponentKind::Condition(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::component::{AppliedOn, ScoreFilter};

    #[test]
    fn toggleable_needs_an_active_kind() {
        let passive = Effect::new("e1", "Shape").with_component(Component::new(
            "c1",
            ComponentKind::Filter(FilterComponent::Score(ScoreFilter::Ac)),
        ));
        assert!(!passive.is_toggleable());

        let active = passive.with_component(Component::new(
            "c2",
            ComponentKind::Bonus(BonusComponent::flat(1.0)),
        ));
        assert!(active.is_toggleable());
    }

    #[test]
    fn applied_effects_are_detected() {
        let effect = Effect::new("e1", "Curse").with_component(Component::new(
            "c1",
            ComponentKind::Applied(AppliedComponent { on: AppliedOn::Hit }),
        ));
        assert!(effect.is_applied());
    }

    #[test]
    fn component_type_keys_are_snake_case() {
        let kind = ComponentKind::RollMod(RollModComponent::default());
        assert_eq!(kind.component_type().as_ref(), "mod");
        let kind = ComponentKind::Multiplier(MultiplierComponent { multiplier: 2.0 });
        assert_eq!(kind.component_type().to_string(), "multiplier");
    }
}
