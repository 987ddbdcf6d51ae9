//! Critical chance and critical tiers.
//!
//! Two layers coexist:
//!
//! 1. [`critical_chance`]: a luck-only rate used by combatants without a job.
//! 2. The job layer ([`combined_crit_percent`]): a class base rate (4%–20%)
//!    plus equipment/buff bonuses plus `luck / 10` percent.
//!
//! Whichever layer produced the rate, [`roll_critical_tier`] turns it into a
//! tier with one roll.

use strum::{Display, EnumIter, IntoStaticStr};

/// Base critical chance in basis points (5%).
pub const BASE_CRIT_CHANCE_BP: u32 = 500;

/// Ceiling of [`critical_chance`] in basis points (50%).
pub const MAX_CRIT_CHANCE_BP: u32 = 5_000;

/// Resolution of critical rolls (basis points).
pub const CRIT_ROLL_SCALE: u32 = 10_000;

/// Critical tier of a landed hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CriticalTier {
    #[default]
    Normal,
    Great,
    Perfect,
    Legendary,
}

impl CriticalTier {
    /// Damage multiplier for this tier, in percent.
    pub const fn multiplier_percent(self) -> u32 {
        match self {
            Self::Normal => 100,
            Self::Great => 150,
            Self::Perfect => 200,
            Self::Legendary => 300,
        }
    }
}

/// Character class, which fixes the base critical rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JobClass {
    /// No class table; the luck-only layer applies.
    #[default]
    Unclassed,
    Warrior,
    Knight,
    Archer,
    Thief,
    Assassin,
    Monk,
    Mage,
    Cleric,
    Bard,
}

impl JobClass {
    /// Base critical rate in percent, or `None` for [`JobClass::Unclassed`].
    pub const fn base_crit_percent(self) -> Option<u32> {
        match self {
            Self::Unclassed => None,
            Self::Warrior => Some(10),
            Self::Knight => Some(6),
            Self::Archer => Some(15),
            Self::Thief => Some(18),
            Self::Assassin => Some(20),
            Self::Monk => Some(12),
            Self::Mage => Some(4),
            Self::Cleric => Some(4),
            Self::Bard => Some(8),
        }
    }
}

/// Luck-only critical chance in basis points.
///
/// # Formula
///
/// ```text
/// chance = min(50%, base + luck × 0.1%)
/// ```
///
/// Negative luck counts as zero.
pub fn critical_chance(luck: i32, base_bp: u32) -> u32 {
    let luck_bp = u32::try_from(luck.max(0)).unwrap_or(0).saturating_mul(10);
    base_bp.saturating_add(luck_bp).min(MAX_CRIT_CHANCE_BP)
}

/// Combined critical rate in percent for a combatant.
///
/// # Formula
///
/// ```text
/// job:       rate = job_base + bonus + luck / 10
/// unclassed: rate = critical_chance(luck) / 100 + bonus
/// clamped to [0, cap]
/// ```
pub fn combined_crit_percent(job: JobClass, bonus_percent: i32, luck: i32, cap_percent: u32) -> u32 {
    let base = match job.base_crit_percent() {
        Some(job_base) => i64::from(job_base) + i64::from(luck.max(0) / 10),
        None => i64::from(critical_chance(luck, BASE_CRIT_CHANCE_BP) / 100),
    };
    (base + i64::from(bonus_percent)).clamp(0, i64::from(cap_percent)) as u32
}

/// Turn a critical rate and a roll into a tier.
///
/// `roll` is uniform in `[0, 10000)`. The thresholds nest: Legendary below
/// 1% of the rate, Perfect below 10% of the rate, Great below the full rate.
pub fn roll_critical_tier(rate_percent: u32, roll: u32) -> CriticalTier {
    let rate_bp = rate_percent.min(100) * 100;

    if roll < rate_bp / 100 {
        CriticalTier::Legendary
    } else if roll < rate_bp / 10 {
        CriticalTier::Perfect
    } else if roll < rate_bp {
        CriticalTier::Great
    } else {
        CriticalTier::Normal
    }
}
