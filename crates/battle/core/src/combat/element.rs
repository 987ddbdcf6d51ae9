//! Elemental affinity chart.

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// Attack or defense element.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Ice,
    Lightning,
    Earth,
    Wind,
    Water,
    Holy,
    Dark,
    Poison,
}

/// Multipliers in percent, indexed `[attack][defense]`.
///
/// Same element against itself is always 80; Neutral on either side is 100.
const ELEMENT_CHART: [[u16; Element::COUNT]; Element::COUNT] = [
    //  Neu  Fir  Ice  Lig  Ear  Win  Wat  Hol  Drk  Poi
    [100, 100, 100, 100, 100, 100, 100, 100, 100, 100], // Neutral
    [100, 80, 150, 100, 100, 120, 60, 100, 100, 120],   // Fire
    [100, 60, 80, 100, 120, 100, 120, 100, 100, 100],   // Ice
    [100, 100, 100, 80, 60, 120, 150, 100, 100, 100],   // Lightning
    [100, 120, 100, 150, 80, 60, 100, 100, 100, 120],   // Earth
    [100, 100, 120, 100, 150, 80, 100, 100, 100, 100],  // Wind
    [100, 150, 80, 100, 120, 100, 80, 100, 100, 100],   // Water
    [100, 100, 100, 100, 100, 100, 100, 80, 180, 100],  // Holy
    [100, 100, 100, 100, 100, 100, 100, 180, 80, 120],  // Dark
    [100, 100, 100, 100, 80, 100, 100, 60, 100, 80],    // Poison
];

/// Look up the elemental multiplier (percent) for an attack hitting a defender.
pub fn element_multiplier(attack: Element, defense: Element) -> u32 {
    u32::from(ELEMENT_CHART[attack as usize][defense as usize])
}
