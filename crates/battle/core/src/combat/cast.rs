//! Skill cast duration.

/// Cast time in ATB-percent units (0..=100).
///
/// # Formula
///
/// ```text
/// cast_time = clamp(skill_power / 50 - magic / 100, 0, 100)
/// ```
///
/// Evaluated as `(2 × power - magic) / 100` and floored, so strong casters
/// shave time off heavy spells and weak spells are instant.
pub fn cast_time(skill_power: u32, magic: i32) -> u32 {
    let scaled = i64::from(skill_power) * 2 - i64::from(magic);
    scaled.div_euclid(100).clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heavy_spell_takes_longer() {
        assert_eq!(cast_time(500, 0), 10);
        assert_eq!(cast_time(500, 200), 8);
        assert_eq!(cast_time(1_000, 50), 19);
    }

    #[test]
    fn weak_spell_or_strong_caster_is_instant() {
        assert_eq!(cast_time(40, 0), 0);
        assert_eq!(cast_time(100, 500), 0);
    }

    #[test]
    fn cast_time_is_capped() {
        assert_eq!(cast_time(u32::MAX, 0), 100);
        assert_eq!(cast_time(0, i32::MIN), 100);
    }
}
