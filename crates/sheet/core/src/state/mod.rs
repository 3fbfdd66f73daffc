//! Persisted document model: entities, items, effects and components.
//!
//! These types are what a host stores. All of them are plain data; the
//! recomputation engine never mutates them.
mod ability;
pub mod component;
mod effect;
mod entity;
mod ids;
pub mod item;
mod types;

pub use ability::{Ability, AbilityMap, AbilityRef};
pub use component::{
    AppliedComponent, AppliedOn, AttackCategory, AttackComponent, AttackMode, AttackRange,
    BonusComponent, CheckFilter, ConditionComponent, ConsumeComponent, DamageCalc,
    DamageComponent, DcCalc, DurationComponent, FilterComponent, LevelSource, MultiplierComponent,
    Operator, Recharge, RechargeCalc, ResourceCalc, ResourceComponent, ResourceSource,
    RollFilter, RollModComponent, SaveComponent, ScalingComponent, ScalingMode, ScoreFilter,
    Selection, SetterComponent, SpellMethod, SpellsComponent, TargetComponent, TargetKind,
};
pub use effect::{Component, ComponentKind, ComponentType, Effect};
pub use entity::{
    AbilityScore, ActiveStatus, ArmourClass, Attributes, DamageDefense, Defenses, Details, Entity,
    EntityKind, EntitySystem, HitDieRecord, HitPoints, Initiative, OriginalSkill, Proficiency,
    SaveSettings, SkillSettings, SlotRecord, SpellSlots, TransformSource, VehicleKind,
};
pub use ids::{ComponentId, EffectId, EntityId, ItemId};
pub use item::{
    Activation, ArmourData, ArmourKind, Attunement, ClassData, ClassSpellcasting, ConsumableData,
    ConsumableKind, ContainerData, EquipmentData, FeatData, Item, ItemKind, ItemType,
    Progression, SpellData, Trigger, WeaponCategory, WeaponData, WeaponTags,
};
pub use types::{
    ConditionKind, Currency, DamageType, DefenseLevel, Dice, RechargeTime, RollMode, Rule, Size,
};
