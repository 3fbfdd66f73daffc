//! Typed payloads of the component kinds an effect can carry.
//!
//! Every payload is plain data. Derived values (DC, attack totals, damage
//! formulas, pool sizes) never live here; they are produced per cycle by the
//! calculators in [`crate::prepare`].

use super::ability::{Ability, AbilityRef};
use super::ids::{ComponentId, EffectId, ItemId};
use super::types::{ConditionKind, DamageType, Dice, RechargeTime, RollMode};

/// Melee or ranged.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackRange {
    #[default]
    Melee,
    Ranged,
}

/// Weapon or spell.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackCategory {
    #[default]
    Weapon,
    Spell,
}

/// How a weapon is wielded for one attack.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackMode {
    Melee,
    Ranged,
    Unarmed,
    Versatile,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    #[default]
    Plus,
    Mult,
}

/// Inline bonus carried by attack/damage components and the payload of
/// `bonus` components.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BonusComponent {
    /// Constant contribution.
    pub bonus: f64,
    /// Proficiency multiple (0, 0.5, 1, 2).
    pub prof: f64,
    pub ability: Option<AbilityRef>,
    pub level: Option<LevelSource>,
    pub operator: Operator,
    /// Factor applied to the summed sources when `operator` is `Mult`.
    pub multiplier: f64,
}

impl Default for BonusComponent {
    fn default() -> Self {
        Self {
            bonus: 0.0,
            prof: 0.0,
            ability: None,
            level: None,
            operator: Operator::Plus,
            multiplier: 1.0,
        }
    }
}

impl BonusComponent {
    pub fn flat(bonus: f64) -> Self {
        Self {
            bonus,
            ..Self::default()
        }
    }
}

/// Level a bonus scales with.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelSource {
    Character,
    Class(ItemId),
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackComponent {
    pub attack: AttackRange,
    pub category: AttackCategory,
    pub ability: Option<AbilityRef>,
    pub bonus: i32,
    pub proficient: bool,
    /// Explicit wielding mode; resolved from weapon tags when absent.
    pub mode: Option<AttackMode>,
    pub extra_bonus: Option<BonusComponent>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageComponent {
    pub calc: DamageCalc,
    pub ndice: u32,
    pub die: u32,
    /// Crit dice override; defaults to `ndice`.
    pub ncrit: Option<u32>,
    pub bonus: f64,
    pub ability: Option<AbilityRef>,
    pub damage: Option<DamageType>,
    /// Damage used when the weapon is wielded two-handed.
    pub versatile: bool,
    pub extra_bonus: Option<BonusComponent>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageCalc {
    /// Dice plus modifier.
    #[default]
    Formula,
    /// Modifier only.
    Fixed,
}

/// Save DC definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DcCalc {
    Fixed(i32),
    Formula {
        /// Replaces the default base of 8.
        base: Option<f64>,
        prof: f64,
        ability: Option<AbilityRef>,
    },
}

impl Default for DcCalc {
    fn default() -> Self {
        DcCalc::Formula {
            base: None,
            prof: 1.0,
            ability: Some(AbilityRef::Spell),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaveComponent {
    pub dc: DcCalc,
    /// Ability the target saves with.
    pub save: Option<Ability>,
}

/// Pool size driver of a formula resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceSource {
    Ability(Ability),
    CharacterLevel,
    ClassLevels(ItemId),
    Proficiency,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceCalc {
    Fixed(i32),
    Formula {
        source: ResourceSource,
        operator: Operator,
        bonus: f64,
        min: i32,
    },
}

impl Default for ResourceCalc {
    fn default() -> Self {
        ResourceCalc::Fixed(1)
    }
}

/// How a recharging resource refills.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RechargeCalc {
    #[default]
    All,
    /// Refill by a dice roll; rolled by the host.
    Roll(Dice),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Recharge {
    pub time: RechargeTime,
    pub calc: RechargeCalc,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceComponent {
    pub name: String,
    pub calc: ResourceCalc,
    /// Persisted remaining uses; `None` means full.
    pub remaining: Option<i32>,
    pub recharge: Recharge,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiplierComponent {
    pub multiplier: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetterComponent {
    pub setter: f64,
}

/// Roll modification (advantage, minimum die, rerolls, extra dice).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RollModComponent {
    pub mode: RollMode,
    pub min: Option<u32>,
    pub reroll: Option<u32>,
    pub ndice: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionComponent {
    pub condition: ConditionKind,
    /// Imposed while the effect is active, rather than granting immunity.
    pub temp: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingMode {
    /// Damage dice grow with character level tiers.
    #[default]
    Cantrip,
    /// Values grow with the spell slot level.
    Spell,
    /// Values grow with resource uses spent.
    Resource,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScalingComponent {
    pub mode: ScalingMode,
    /// Effect whose damage this scaling applies to; the owning effect when absent.
    pub reference: Option<EffectId>,
    /// Damage dice gained per step, paired with damage components by position.
    pub ndice: Vec<u32>,
}

/// Resource consumed on use.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsumeComponent {
    /// Resource component drawn from.
    pub reference: Option<ComponentId>,
    /// Item quantity drawn from.
    pub item: Option<ItemId>,
    pub amount: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    #[default]
    Individual,
    Area,
    SelfOnly,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetComponent {
    pub target: TargetKind,
    pub count: u32,
    pub shape: Option<String>,
    pub distance: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellMethod {
    #[default]
    Innate,
    Known,
    Prepared,
}

/// Grants spells to the owner; innate grants cast from this component's ability.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellsComponent {
    pub method: SpellMethod,
    pub ability: Option<Ability>,
    /// Innate casting draws from this component's own slot pool.
    pub with_slot: bool,
    pub max: Option<i32>,
    pub remaining: Option<i32>,
    pub spells: Vec<ItemId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedOn {
    #[default]
    Target,
    Hit,
    FailedSave,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AppliedComponent {
    pub on: AppliedOn,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DurationComponent {
    pub concentration: bool,
    pub rounds: Option<u32>,
}

/// Value set of a filter field: either unconstrained or one of the listed values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection<T> {
    #[default]
    Any,
    Only(Vec<T>),
}

impl<T: PartialEq> Selection<T> {
    pub fn only(values: impl IntoIterator<Item = T>) -> Self {
        Selection::Only(values.into_iter().collect())
    }

    pub fn contains(&self, value: &T) -> bool {
        match self {
            Selection::Any => true,
            Selection::Only(values) => values.contains(value),
        }
    }

    /// An absent value only satisfies an unconstrained selection.
    pub fn contains_opt(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Selection::Any, _) => true,
            (Selection::Only(values), Some(value)) => values.contains(value),
            (Selection::Only(_), None) => false,
        }
    }
}

/// Declared condition under which sibling modifiers apply.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterComponent {
    Roll(RollFilter),
    Score(ScoreFilter),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollFilter {
    Attack {
        #[cfg_attr(feature = "serde", serde(default))]
        range: Selection<AttackRange>,
        #[cfg_attr(feature = "serde", serde(default))]
        category: Selection<AttackCategory>,
    },
    Damage {
        #[cfg_attr(feature = "serde", serde(default))]
        range: Selection<AttackRange>,
        #[cfg_attr(feature = "serde", serde(default))]
        category: Selection<AttackCategory>,
        #[cfg_attr(feature = "serde", serde(default))]
        damage: Selection<DamageType>,
    },
    Check(CheckFilter),
    Save(Selection<Ability>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckFilter {
    Ability(Selection<Ability>),
    Skill {
        #[cfg_attr(feature = "serde", serde(default))]
        skill: Selection<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        ability: Selection<Ability>,
    },
    Tool {
        #[cfg_attr(feature = "serde", serde(default))]
        tool: Selection<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        ability: Selection<Ability>,
    },
    Initiative,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreFilter {
    Ability(Selection<Ability>),
    Ac,
    MaxHp,
    Passive(Selection<String>),
    Carry,
    Dc(Selection<AbilityRef>),
    SpellAttack,
    Proficiency,
}
