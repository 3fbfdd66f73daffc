//! Small shared vocabularies used across entities, items and components.

/// Creature size category.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Size {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl Size {
    /// Carrying capacity multiplier relative to a medium creature.
    pub fn carry_multiplier(self) -> f64 {
        match self {
            Size::Tiny => 0.5,
            Size::Small | Size::Medium => 1.0,
            Size::Large => 2.0,
            Size::Huge => 4.0,
            Size::Gargantuan => 8.0,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    Acid,
    Bludgeoning,
    Cold,
    Fire,
    Force,
    Lightning,
    Necrotic,
    Piercing,
    Poison,
    Psychic,
    Radiant,
    Slashing,
    Thunder,
}

/// How a creature is affected by a damage type.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum DefenseLevel {
    Resistance,
    Immunity,
    Vulnerability,
}

/// Conditions that can be imposed by statuses or condition components.
///
/// Host status ids parse into this enum by their snake_case key; exhaustion
/// statuses carry their level in the id (`exhaust3`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConditionKind {
    Blinded,
    Charmed,
    Deafened,
    Diseased,
    Exhaustion,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralysed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

impl ConditionKind {
    pub const MAX_EXHAUSTION: u8 = 6;

    /// Parses an exhaustion status id such as `exhaust4`.
    pub fn exhaustion_level(status: &str) -> Option<u8> {
        status
            .strip_prefix("exhaust")
            .and_then(|level| level.parse::<u8>().ok())
            .map(|level| level.min(Self::MAX_EXHAUSTION))
    }
}

/// Advantage state of a roll.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RollMode {
    Advantage,
    Disadvantage,
    #[default]
    Normal,
}

impl RollMode {
    pub fn advantage(self) -> i32 {
        match self {
            RollMode::Advantage => 1,
            RollMode::Disadvantage => -1,
            RollMode::Normal => 0,
        }
    }
}

/// Coin purse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Currency {
    pub pp: i64,
    pub gp: i64,
    pub ep: i64,
    pub sp: i64,
    pub cp: i64,
}

impl Currency {
    /// Total number of coins, ignoring negative balances.
    pub fn coin_count(&self) -> i64 {
        [self.pp, self.gp, self.ep, self.sp, self.cp]
            .into_iter()
            .map(|coins| coins.max(0))
            .sum()
    }

    pub fn add(&self, other: &Currency) -> Currency {
        Currency {
            pp: self.pp + other.pp,
            gp: self.gp + other.gp,
            ep: self.ep + other.ep,
            sp: self.sp + other.sp,
            cp: self.cp + other.cp,
        }
    }
}

/// Sheet rules that can be switched off per entity and queried by hosts.
#[derive(
    Clone,
    Copy,
    Debug,
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
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Rule {
    HeavyArmour,
    NoisyArmour,
    Encumbered,
    HeavilyEncumbered,
    OverCapacity,
}

/// Rest that recharges a resource.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RechargeTime {
    #[default]
    Never,
    Short,
    Long,
    Dawn,
    Dusk,
}

impl RechargeTime {
    pub fn on_short_rest(self) -> bool {
        matches!(self, RechargeTime::Short)
    }

    pub fn on_long_rest(self) -> bool {
        matches!(
            self,
            RechargeTime::Short | RechargeTime::Long | RechargeTime::Dawn | RechargeTime::Dusk
        )
    }
}

/// Dice expression `NdM`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dice {
    pub count: u32,
    pub faces: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn exhaustion_status_ids_carry_their_level() {
        assert_eq!(ConditionKind::exhaustion_level("exhaust3"), Some(3));
        assert_eq!(ConditionKind::exhaustion_level("exhaust9"), Some(6));
        assert_eq!(ConditionKind::exhaustion_level("exhaustion"), None);
        assert_eq!(ConditionKind::exhaustion_level("poisoned"), None);
    }

    #[test]
    fn status_ids_parse_to_conditions() {
        assert_eq!(
            ConditionKind::from_str("Poisoned").ok(),
            Some(ConditionKind::Poisoned)
        );
        assert!(ConditionKind::from_str("bleeding").is_err());
    }

    #[test]
    fn coin_count_ignores_debts() {
        let purse = Currency {
            gp: 30,
            sp: -5,
            cp: 20,
            ..Currency::default()
        };
        assert_eq!(purse.coin_count(), 50);
    }

    #[test]
    fn long_rest_recharges_everything_short_does() {
        assert!(RechargeTime::Short.on_long_rest());
        assert!(RechargeTime::Dawn.on_long_rest());
        assert!(!RechargeTime::Never.on_long_rest());
        assert!(!RechargeTime::Long.on_short_rest());
    }
}
