//! Temporary bonus layer.
//!
//! Buffs and debuffs never touch base stats. Each active effect adds its
//! contribution to [`StatBonuses`] when applied (once per stack) and removes
//! exactly the same contribution when it expires or is cleansed.

use strum::EnumCount;

use super::core::{CombatStats, Stat};

/// A single bonus that can be applied to a stat value.
///
/// - **Flat**: Added to the base value first (e.g., +5 ATK)
/// - **Increased**: Percentage increases, summed then multiplied (e.g., +20%)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first)
    Flat(i32),

    /// Percentage increase (summed with other %Inc, then multiplied)
    /// Stored as integer percentage (e.g., 20 = +20%, -25 = -25%)
    Increased(i32),
}

impl Bonus {
    /// Create a flat bonus
    pub fn flat(value: i32) -> Self {
        Bonus::Flat(value)
    }

    /// Create a percentage increase bonus (20 = +20%)
    pub fn increased(percent: i32) -> Self {
        Bonus::Increased(percent)
    }

    /// The same bonus scaled by a stack count.
    #[must_use]
    pub fn times(self, count: u32) -> Self {
        let count = i32::try_from(count).unwrap_or(i32::MAX);
        match self {
            Bonus::Flat(v) => Bonus::Flat(v.saturating_mul(count)),
            Bonus::Increased(p) => Bonus::Increased(p.saturating_mul(count)),
        }
    }
}

/// Bounds configuration for effective stats.
#[derive(Clone, Copy, Debug)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Attack, defense, accuracy, evasion and luck: [0, 9999]
    pub const COMBAT: Self = Self { min: 0, max: 9999 };

    /// Speed: [1, 9999]
    ///
    /// A speed of zero would stall the scheduler's average.
    pub const SPEED: Self = Self { min: 1, max: 9999 };

    /// Bounds for a given stat.
    pub const fn for_stat(stat: Stat) -> Self {
        match stat {
            Stat::Speed => Self::SPEED,
            _ => Self::COMBAT,
        }
    }
}

/// Running sums of every active bonus, one slot per [`Stat`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonuses {
    flat: [i32; Stat::COUNT],
    increased: [i32; Stat::COUNT],
}

impl StatBonuses {
    /// Create empty bonuses (no effects)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bonus to the accumulator.
    pub fn add(&mut self, stat: Stat, bonus: Bonus) {
        match bonus {
            Bonus::Flat(v) => self.flat[stat.index()] += v,
            Bonus::Increased(p) => self.increased[stat.index()] += p,
        }
    }

    /// Remove a bonus previously added with [`StatBonuses::add`].
    pub fn remove(&mut self, stat: Stat, bonus: Bonus) {
        match bonus {
            Bonus::Flat(v) => self.flat[stat.index()] -= v,
            Bonus::Increased(p) => self.increased[stat.index()] -= p,
        }
    }

    /// Current flat sum for a stat.
    pub fn flat(&self, stat: Stat) -> i32 {
        self.flat[stat.index()]
    }

    /// Current %Inc sum for a stat.
    pub fn increased(&self, stat: Stat) -> i32 {
        self.increased[stat.index()]
    }

    /// Returns true if no bonus is currently applied.
    pub fn is_empty(&self) -> bool {
        self.flat.iter().all(|v| *v == 0) && self.increased.iter().all(|v| *v == 0)
    }

    /// Apply the accumulated bonuses to a base value.
    ///
    /// # Formula
    /// ```text
    /// result = clamp((base + flat) × (100 + inc) / 100, min, max)
    /// ```
    pub fn apply(&self, stat: Stat, base: i32) -> i32 {
        let bounds = StatBounds::for_stat(stat);
        let after_flat = i64::from(base) + i64::from(self.flat(stat));
        let multiplier = (100 + i64::from(self.increased(stat))).max(0);
        let value = after_flat * multiplier / 100;

        value.clamp(i64::from(bounds.min), i64::from(bounds.max)) as i32
    }

    /// Effective value of a stat for the given base snapshot.
    pub fn effective(&self, base: &CombatStats, stat: Stat) -> i32 {
        self.apply(stat, base.get(stat))
    }
}
