//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`BattleConfig`] from TOML files.
///
/// Missing keys fall back to the built-in defaults, so a file only needs the
/// values it changes.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.atb_max == 0 {
            anyhow::bail!("atb_max must be positive");
        }
        if config.fill_rate == 0 {
            anyhow::bail!("fill_rate must be positive");
        }
        if config.start_band_percent > 100 || config.cast_refund_percent > 100 {
            anyhow::bail!("gauge percentages must be within 0..=100");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("cast_refund_percent = 50\n").unwrap();
        assert_eq!(config.cast_refund_percent, 50);
        assert_eq!(config.atb_max, BattleConfig::DEFAULT_ATB_MAX);
        assert_eq!(config.break_bonus_percent, BattleConfig::DEFAULT_BREAK_BONUS_PERCENT);
    }

    #[test]
    fn zero_gauge_is_rejected() {
        assert!(ConfigLoader::parse("atb_max = 0\n").is_err());
        assert!(ConfigLoader::parse("start_band_percent = 140\n").is_err());
    }
}
