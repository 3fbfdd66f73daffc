/// How carried weight restricts a creature.
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
pub enum EncumbranceMode {
    /// Only exceeding the carrying capacity has an effect.
    #[default]
    CapacityOnly,
    /// Encumbered / heavily encumbered thresholds below the capacity.
    Variant,
    /// Weight is tracked but never restricts.
    Disabled,
}

/// Ruleset configuration passed explicitly to every recomputation cycle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    pub encumbrance: EncumbranceMode,
    /// Carrying capacity per point of Str.
    pub carry_multiplier: f64,
    /// Variant rule: encumbered at Str × this.
    pub encumbered_multiplier: f64,
    /// Variant rule: heavily encumbered at Str × this.
    pub heavily_encumbered_multiplier: f64,
    /// Count coins towards carried weight.
    pub coin_weight: bool,
    pub coins_per_pound: f64,
    /// Vehicle cargo is measured in tons.
    pub vehicle_weight_divisor: f64,
    /// Resource pools up to this size render as marks.
    pub uses_mark_threshold: i32,
    /// Character level at which cantrips gain their next damage die.
    pub cantrip_tiers: Vec<u32>,
    /// XP needed to reach each level, starting at level 1.
    pub xp_table: Vec<u32>,
}

impl RulesConfig {
    pub const DEFAULT_CARRY_MULTIPLIER: f64 = 15.0;
    pub const DEFAULT_ENCUMBERED_MULTIPLIER: f64 = 5.0;
    pub const DEFAULT_HEAVILY_ENCUMBERED_MULTIPLIER: f64 = 10.0;
    pub const DEFAULT_COINS_PER_POUND: f64 = 50.0;
    pub const DEFAULT_VEHICLE_WEIGHT_DIVISOR: f64 = 2000.0;
    pub const DEFAULT_USES_MARK_THRESHOLD: i32 = 6;
    pub const DEFAULT_CANTRIP_TIERS: [u32; 3] = [5, 11, 17];
    pub const DEFAULT_XP_TABLE: [u32; 20] = [
        0, 300, 900, 2_700, 6_500, 14_000, 23_000, 34_000, 48_000, 64_000, 85_000, 100_000,
        120_000, 140_000, 165_000, 195_000, 225_000, 265_000, 305_000, 355_000,
    ];

    pub fn new() -> Self {
        Self {
            encumbrance: EncumbranceMode::default(),
            carry_multiplier: Self::DEFAULT_CARRY_MULTIPLIER,
            encumbered_multiplier: Self::DEFAULT_ENCUMBERED_MULTIPLIER,
            heavily_encumbered_multiplier: Self::DEFAULT_HEAVILY_ENCUMBERED_MULTIPLIER,
            coin_weight: false,
            coins_per_pound: Self::DEFAULT_COINS_PER_POUND,
            vehicle_weight_divisor: Self::DEFAULT_VEHICLE_WEIGHT_DIVISOR,
            uses_mark_threshold: Self::DEFAULT_USES_MARK_THRESHOLD,
            cantrip_tiers: Self::DEFAULT_CANTRIP_TIERS.to_vec(),
            xp_table: Self::DEFAULT_XP_TABLE.to_vec(),
        }
    }

    pub fn with_encumbrance(mut self, encumbrance: EncumbranceMode) -> Self {
        self.encumbrance = encumbrance;
        self
    }

    /// Cantrip tier reached at a character level (0 below the first tier).
    pub fn cantrip_tier(&self, level: u32) -> u32 {
        self.cantrip_tiers.iter().filter(|&&tier| level >= tier).count() as u32
    }

    /// XP needed for `level`, clamped to the table.
    pub fn xp_for_level(&self, level: u32) -> u32 {
        let idx = (level.max(1) as usize - 1).min(self.xp_table.len().saturating_sub(1));
        self.xp_table.get(idx).copied().unwrap_or(0)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
