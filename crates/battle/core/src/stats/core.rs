//! Base combat stats.

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// Individual combat stat.
///
/// Used by stat-modifying status effects and bonus accumulators to reference
/// a specific stat.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    PhysicalAttack,
    MagicAttack,
    PhysicalDefense,
    MagicDefense,
    Accuracy,
    Evasion,
    Speed,
    Luck,
}

impl Stat {
    /// Position of this stat in per-stat arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Base stat snapshot taken from the roster when the battle starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub physical_attack: i32,
    pub magic_attack: i32,
    pub physical_defense: i32,
    pub magic_defense: i32,
    pub accuracy: i32,
    pub evasion: i32,
    pub speed: i32,
    pub luck: i32,
}

impl CombatStats {
    /// Get the value of a single stat.
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::PhysicalAttack => self.physical_attack,
            Stat::MagicAttack => self.magic_attack,
            Stat::PhysicalDefense => self.physical_defense,
            Stat::MagicDefense => self.magic_defense,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
            Stat::Speed => self.speed,
            Stat::Luck => self.luck,
        }
    }

    /// Builder-style setter, mostly for fixtures.
    #[must_use]
    pub fn with(mut self, stat: Stat, value: i32) -> Self {
        let slot = match stat {
            Stat::PhysicalAttack => &mut self.physical_attack,
            Stat::MagicAttack => &mut self.magic_attack,
            Stat::PhysicalDefense => &mut self.physical_defense,
            Stat::MagicDefense => &mut self.magic_defense,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
            Stat::Speed => &mut self.speed,
            Stat::Luck => &mut self.luck,
        };
        *slot = value;
        self
    }
}

impl Default for CombatStats {
    /// An unremarkable level-1 adventurer.
    fn default() -> Self {
        Self {
            physical_attack: 20,
            magic_attack: 20,
            physical_defense: 20,
            magic_defense: 20,
            accuracy: 50,
            evasion: 50,
            speed: 100,
            luck: 10,
        }
    }
}
