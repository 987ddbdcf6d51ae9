//! In-memory content tables.
//!
//! [`ContentTables`] is the plain-data form of every lookup the engine needs.
//! Loaders fill it from files; tests build it inline. It implements all three
//! content oracles so one value can back an entire [`super::Env`].

use std::collections::BTreeMap;

use crate::state::{ItemId, SkillId, StatusId, StatusTemplate};

use super::{ItemDefinition, ItemOracle, SkillDefinition, SkillOracle, StatusOracle};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentTables {
    pub skills: BTreeMap<SkillId, SkillDefinition>,
    pub items: BTreeMap<ItemId, ItemDefinition>,
    pub statuses: BTreeMap<StatusId, StatusTemplate>,
}

impl ContentTables {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillDefinition) -> Self {
        self.insert_skill(skill);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.insert_item(item);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusTemplate) -> Self {
        self.insert_status(status);
        self
    }

    pub fn insert_skill(&mut self, skill: SkillDefinition) -> Option<SkillDefinition> {
        self.skills.insert(skill.id.clone(), skill)
    }

    pub fn insert_item(&mut self, item: ItemDefinition) -> Option<ItemDefinition> {
        self.items.insert(item.id.clone(), item)
    }

    pub fn insert_status(&mut self, status: StatusTemplate) -> Option<StatusTemplate> {
        self.statuses.insert(status.id.clone(), status)
    }

    /// Merge another table set into this one; later entries win.
    pub fn extend(&mut self, other: ContentTables) {
        self.skills.extend(other.skills);
        self.items.extend(other.items);
        self.statuses.extend(other.statuses);
    }
}

impl SkillOracle for ContentTables {
    fn skill(&self, id: &SkillId) -> Option<SkillDefinition> {
        self.skills.get(id).cloned()
    }
}

impl ItemOracle for ContentTables {
    fn item(&self, id: &ItemId) -> Option<ItemDefinition> {
        self.items.get(id).cloned()
    }
}

impl StatusOracle for ContentTables {
    fn status(&self, id: &StatusId) -> Option<StatusTemplate> {
        self.statuses.get(id).cloned()
    }
}
