//! Hit chance and evasion calculations.

/// Lower bound of [`hit_chance`].
pub const MIN_HIT_CHANCE: i64 = 25;
/// Upper bound of [`hit_chance`].
pub const MAX_HIT_CHANCE: i64 = 95;
/// Lower bound of [`evasion_rate`].
pub const MIN_EVASION_RATE: i64 = 5;
/// Upper bound of [`evasion_rate`].
pub const MAX_EVASION_RATE: i64 = 75;

/// Calculate hit chance based on accuracy vs evasion.
///
/// # Formula
///
/// ```text
/// hit_chance = 90 + (accuracy - evasion) × 0.5
/// clamped to [25, 95]
/// ```
///
/// The half step is floored, so `(acc - eva) = -1` lands on 89.
///
/// # Returns
///
/// Hit chance as percentage
pub fn hit_chance(accuracy: i32, evasion: i32) -> u32 {
    let diff = i64::from(accuracy) - i64::from(evasion);
    let doubled = 180 + diff;
    doubled
        .div_euclid(2)
        .clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE) as u32
}

/// Calculate the defender-relative evasion rate.
///
/// # Formula
///
/// ```text
/// evasion_rate = 15 + (evasion - accuracy) × 0.3
/// clamped to [5, 75]
/// ```
///
/// Resolution never rolls against this value; [`hit_chance`] is authoritative.
/// It exists for views that only see the defender side.
pub fn evasion_rate(evasion: i32, accuracy: i32) -> u32 {
    let diff = i64::from(evasion) - i64::from(accuracy);
    let scaled = 150 + diff * 3;
    scaled
        .div_euclid(10)
        .clamp(MIN_EVASION_RATE, MAX_EVASION_RATE) as u32
}

/// Check if an attack hits based on accuracy, evasion, and a d100 roll (1-100).
///
/// # Returns
///
/// `true` if attack hits, `false` if it misses.
pub fn check_hit(accuracy: i32, evasion: i32, roll: u32) -> bool {
    roll <= hit_chance(accuracy, evasion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_chance_baseline_and_slope() {
        assert_eq!(hit_chance(50, 50), 90);
        assert_eq!(hit_chance(60, 50), 95);
        assert_eq!(hit_chance(40, 50), 85);
        assert_eq!(hit_chance(49, 50), 89);
    }

    #[test]
    fn hit_chance_stays_in_bounds_for_extremes() {
        let samples = [i32::MIN, -10_000, -1, 0, 1, 77, 10_000, i32::MAX];
        for &acc in &samples {
            for &eva in &samples {
                let chance = hit_chance(acc, eva);
                assert!((25..=95).contains(&chance), "acc={acc} eva={eva} -> {chance}");
            }
        }
    }

    #[test]
    fn evasion_rate_stays_in_bounds_for_extremes() {
        let samples = [i32::MIN, -500, 0, 3, 500, i32::MAX];
        for &eva in &samples {
            for &acc in &samples {
                let rate = evasion_rate(eva, acc);
                assert!((5..=75).contains(&rate), "eva={eva} acc={acc} -> {rate}");
            }
        }
        assert_eq!(evasion_rate(50, 50), 15);
        assert_eq!(evasion_rate(60, 50), 18);
    }

    #[test]
    fn check_hit_uses_inclusive_threshold() {
        assert!(check_hit(50, 50, 90));
        assert!(!check_hit(50, 50, 91));
        assert!(check_hit(0, 1000, 25));
        assert!(!check_hit(1000, 0, 96));
    }
}
