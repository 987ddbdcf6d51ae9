//! Content factory for building content tables from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, ContentTables, ItemDefinition, SkillDefinition, StatusTemplate};

use crate::loaders::{
    ConfigLoader, Encounter, EncounterLoader, ItemLoader, LoadResult, SkillLoader, StatusLoader,
    validate_encounter, validate_tables,
};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// ├── items.ron
/// ├── statuses.ron
/// └── encounters/
///     └── training.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load status templates from `statuses.ron`.
    pub fn load_statuses(&self) -> LoadResult<Vec<StatusTemplate>> {
        StatusLoader::load(&self.data_dir.join("statuses.ron"))
    }

    /// Load every catalog into one validated table set.
    pub fn load_tables(&self) -> LoadResult<ContentTables> {
        assemble_tables(self.load_skills()?, self.load_items()?, self.load_statuses()?)
    }

    /// Load `encounters/{name}.ron` and check it against the tables.
    pub fn load_encounter(&self, name: &str, tables: &ContentTables) -> LoadResult<Encounter> {
        let path = self.data_dir.join("encounters").join(format!("{name}.ron"));
        let encounter = EncounterLoader::load(&path)?;
        validate_encounter(&encounter, tables)?;
        Ok(encounter)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Collect parsed catalogs into one table set, rejecting duplicate ids, then
/// validate cross-references.
pub fn assemble_tables(
    skills: Vec<SkillDefinition>,
    items: Vec<ItemDefinition>,
    statuses: Vec<StatusTemplate>,
) -> LoadResult<ContentTables> {
    let mut tables = ContentTables::new();
    for skill in skills {
        if let Some(previous) = tables.insert_skill(skill) {
            anyhow::bail!("duplicate skill id '{}'", previous.id);
        }
    }
    for item in items {
        if let Some(previous) = tables.insert_item(item) {
            anyhow::bail!("duplicate item id '{}'", previous.id);
        }
    }
    for status in statuses {
        if let Some(previous) = tables.insert_status(status) {
            anyhow::bail!("duplicate status id '{}'", previous.id);
        }
    }
    validate_tables(&tables)?;
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{SkillId, SkillKind, StatusKind};

    fn bundled() -> ContentFactory {
        ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_data_directory_loads() {
        let factory = bundled();
        let tables = factory.load_tables().unwrap();
        assert!(tables.skills.contains_key(&SkillId::new("slash")));

        let encounter = factory.load_encounter("training", &tables).unwrap();
        assert_eq!(encounter.name, "training");
        assert_eq!(factory.load_config().unwrap(), BattleConfig::default());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let skills = vec![
            SkillDefinition::new("slash", "Slash", SkillKind::Brave),
            SkillDefinition::new("slash", "Slash II", SkillKind::Brave),
        ];
        let err = assemble_tables(skills, Vec::new(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("duplicate skill id 'slash'"));

        let statuses = vec![
            StatusTemplate::new("poison", "Poison", StatusKind::Poison),
            StatusTemplate::new("poison", "Venom", StatusKind::Poison),
        ];
        let err = assemble_tables(Vec::new(), Vec::new(), statuses).unwrap_err();
        assert!(err.to_string().contains("duplicate status id 'poison'"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ContentFactory::new("/nonexistent").load_skills().unwrap_err();
        assert!(err.to_string().contains("skills.ron"));
    }
}
