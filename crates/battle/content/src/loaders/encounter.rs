//! Encounter (roster) loader.

use std::path::Path;

use battle_core::{CombatantSpec, Team};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A named roster plus an optional fixed seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub name: String,
    #[serde(default)]
    pub seed: Option<u64>,
    pub combatants: Vec<CombatantSpec>,
}

impl Encounter {
    pub fn team(&self, team: Team) -> impl Iterator<Item = &CombatantSpec> {
        self.combatants.iter().filter(move |spec| spec.team == team)
    }
}

/// Loader for encounters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Encounter> {
        let encounter: Encounter = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        for spec in &encounter.combatants {
            if spec.max_hp == 0 {
                anyhow::bail!("combatant '{}' has zero max_hp", spec.name);
            }
            if spec.base_brave > spec.max_brave {
                anyhow::bail!("combatant '{}' starts above its BRV cap", spec.name);
            }
        }
        Ok(encounter)
    }
}
