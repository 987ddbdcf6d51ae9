/// Battle configuration constants and tunable parameters.
///
/// Every value is an integer so that resolution stays bit-exact across
/// platforms. Percentages are stored as whole percents (`150` = ×1.5).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Gauge value at which a combatant becomes ready.
    pub atb_max: u32,

    /// Gauge units gained per tick by a combatant running at the average
    /// speed of the encounter.
    pub fill_rate: u32,

    /// Ticks after a completed turn during which the gauge cannot grow.
    pub global_cooldown: u32,

    /// Upper bound of the randomized starting gauge, as a percent of `atb_max`.
    pub start_band_percent: u32,

    /// Share of the cast-start gauge returned when a cast is interrupted.
    pub cast_refund_percent: u32,

    /// HP damage multiplier applied once against a broken target.
    pub break_bonus_percent: u32,

    /// Defense multiplier granted by Defend until the next turn start.
    pub defend_percent: u32,

    /// Chance that a paralyzed combatant loses its turn.
    pub paralyze_skip_percent: u32,

    /// Speed multiplier while confused.
    pub confusion_speed_percent: u32,

    /// Accuracy removed while blinded.
    pub blind_accuracy_penalty: i32,

    /// Ceiling for the combined critical rate.
    pub crit_cap_percent: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of combatants in one encounter (both teams).
    pub const MAX_COMBATANTS: usize = 16;
    /// Maximum number of simultaneous status effects on one combatant.
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATB_MAX: u32 = 10_000;
    pub const DEFAULT_FILL_RATE: u32 = 100;
    pub const DEFAULT_GLOBAL_COOLDOWN: u32 = 1;
    pub const DEFAULT_START_BAND_PERCENT: u32 = 30;
    pub const DEFAULT_CAST_REFUND_PERCENT: u32 = 30;
    pub const DEFAULT_BREAK_BONUS_PERCENT: u32 = 150;
    pub const DEFAULT_DEFEND_PERCENT: u32 = 150;
    pub const DEFAULT_PARALYZE_SKIP_PERCENT: u32 = 50;
    pub const DEFAULT_CONFUSION_SPEED_PERCENT: u32 = 70;
    pub const DEFAULT_BLIND_ACCURACY_PENALTY: i32 = 60;
    pub const DEFAULT_CRIT_CAP_PERCENT: u32 = 50;

    pub fn new() -> Self {
        Self {
            atb_max: Self::DEFAULT_ATB_MAX,
            fill_rate: Self::DEFAULT_FILL_RATE,
            global_cooldown: Self::DEFAULT_GLOBAL_COOLDOWN,
            start_band_percent: Self::DEFAULT_START_BAND_PERCENT,
            cast_refund_percent: Self::DEFAULT_CAST_REFUND_PERCENT,
            break_bonus_percent: Self::DEFAULT_BREAK_BONUS_PERCENT,
            defend_percent: Self::DEFAULT_DEFEND_PERCENT,
            paralyze_skip_percent: Self::DEFAULT_PARALYZE_SKIP_PERCENT,
            confusion_speed_percent: Self::DEFAULT_CONFUSION_SPEED_PERCENT,
            blind_accuracy_penalty: Self::DEFAULT_BLIND_ACCURACY_PENALTY,
            crit_cap_percent: Self::DEFAULT_CRIT_CAP_PERCENT,
        }
    }

    /// Converts an ATB-percent value (0..=100) into gauge units.
    pub fn percent_of_gauge(&self, percent: u32) -> u32 {
        (u64::from(self.atb_max) * u64::from(percent.min(100)) / 100) as u32
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
