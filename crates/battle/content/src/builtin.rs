//! Content compiled into the crate.
//!
//! The files under `data/` are embedded with `include_str!`, parsed with the
//! same loaders as an on-disk data directory, and validated.

use battle_core::{BattleConfig, ContentTables};

use crate::loaders::{
    ConfigLoader, Encounter, EncounterLoader, ItemLoader, LoadResult, SkillLoader, StatusLoader,
    assemble_tables, validate_encounter,
};

const CONFIG: &str = include_str!("../data/config.toml");
const SKILLS: &str = include_str!("../data/skills.ron");
const ITEMS: &str = include_str!("../data/items.ron");
const STATUSES: &str = include_str!("../data/statuses.ron");

const ENCOUNTERS: &[(&str, &str)] = &[
    ("training", include_str!("../data/encounters/training.ron")),
    ("boss", include_str!("../data/encounters/boss.ron")),
];

pub fn config() -> LoadResult<BattleConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn tables() -> LoadResult<ContentTables> {
    assemble_tables(
        SkillLoader::parse(SKILLS)?,
        ItemLoader::parse(ITEMS)?,
        StatusLoader::parse(STATUSES)?,
    )
}

/// Names of the embedded encounters.
pub fn encounter_names() -> impl Iterator<Item = &'static str> {
    ENCOUNTERS.iter().map(|(name, _)| *name)
}

pub fn encounter(name: &str) -> LoadResult<Encounter> {
    let (_, source) = ENCOUNTERS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .ok_or_else(|| anyhow::anyhow!("no built-in encounter named '{name}'"))?;
    let encounter = EncounterLoader::parse(source)?;
    validate_encounter(&encounter, &tables()?)?;
    Ok(encounter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Magnitude, PeriodicMode, StatusId, StatusKind, Team};

    #[test]
    fn embedded_tables_parse_and_validate() {
        let tables = tables().unwrap();
        assert!(!tables.skills.is_empty());
        assert!(!tables.items.is_empty());
        assert!(!tables.statuses.is_empty());
    }

    #[test]
    fn poison_template_matches_the_reference_numbers() {
        let tables = tables().unwrap();
        let poison = &tables.statuses[&StatusId::new("poison")];

        assert_eq!(poison.name, "독");
        assert_eq!(poison.kind, StatusKind::Poison);
        assert_eq!(poison.duration, 5);
        assert_eq!(
            poison.magnitude,
            Magnitude::Periodic {
                amount: 15,
                mode: PeriodicMode::Fixed
            }
        );
        assert!(poison.stackable);
        assert_eq!(poison.max_stacks, 3);
    }

    #[test]
    fn every_embedded_encounter_has_both_sides() {
        for name in encounter_names() {
            let encounter = encounter(name).unwrap();
            assert!(encounter.team(Team::Ally).next().is_some(), "{name}");
            assert!(encounter.team(Team::Enemy).next().is_some(), "{name}");
        }
        assert!(encounter("nowhere").is_err());
    }

    #[test]
    fn embedded_config_is_the_default() {
        assert_eq!(config().unwrap(), BattleConfig::default());
    }
}
