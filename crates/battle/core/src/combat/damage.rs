//! Damage calculation and application.

// ============================================================================
// Damage Type
// ============================================================================

/// Which attack/defense stat pair a hit reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Physical attack vs physical defense.
    #[default]
    Physical,
    /// Magic attack vs magic defense.
    Magical,
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Calculate raw damage from an attack.
///
/// # Formula
///
/// ```text
/// damage = max(1, floor(base_power × attack / max(1, defense)
///                      × crit% / 100 × element% / 100))
/// ```
///
/// The whole product is evaluated in 64-bit integer space and floored once,
/// so `(100, 50, 10, 100, 100)` yields exactly 500.
///
/// # Arguments
///
/// * `attack` - Attacker's effective attack stat
/// * `defense` - Defender's effective defense stat
/// * `base_power` - Power of the attack or skill
/// * `crit_percent` - Critical multiplier (100 = no critical)
/// * `element_percent` - Elemental multiplier (100 = neutral)
pub fn calculate_damage(
    attack: u32,
    defense: u32,
    base_power: u32,
    crit_percent: u32,
    element_percent: u32,
) -> u32 {
    let numerator = u128::from(base_power)
        * u128::from(attack)
        * u128::from(crit_percent)
        * u128::from(element_percent);
    let denominator = u128::from(defense.max(1)) * 100 * 100;

    (numerator / denominator).clamp(1, u128::from(u32::MAX)) as u32
}

/// Convert a spent BRV pool into HP damage.
///
/// # Formula
///
/// ```text
/// factor = 2 × attack / (attack + defense)      (1.0 when attack == defense)
/// damage = max(1, floor(pool × factor × bonus% / 100))
/// ```
///
/// The factor is bounded to `[0, 2)`, so the pool stays the dominant term and
/// the attack/defense ratio only bends it.
pub fn hp_attack_damage(pool: u32, attack: u32, defense: u32, bonus_percent: u32) -> u32 {
    let atk = u128::from(attack);
    let def = u128::from(defense);
    let pool = u128::from(pool);

    let adjusted = if atk + def == 0 {
        pool
    } else {
        pool * 2 * atk / (atk + def)
    };
    let damage = adjusted * u128::from(bonus_percent) / 100;

    damage.clamp(1, u128::from(u32::MAX)) as u32
}
