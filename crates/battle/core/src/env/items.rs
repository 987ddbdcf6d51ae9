use crate::state::{ItemId, StatusKind};

use super::skills::StatusApplication;

pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &ItemId) -> Option<ItemDefinition>;
}

/// One thing a consumable does to its target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    RestoreHp(u32),
    /// Percent of max HP.
    RestoreHpPercent(u32),
    RestoreMp(u32),
    RestoreBrave(u32),
    Cure(Vec<StatusKind>),
    ApplyStatus(StatusApplication),
}

/// Consumable definition. Inventory counts are tracked outside the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub effects: Vec<ItemEffect>,
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, effects: Vec<ItemEffect>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effects,
        }
    }
}
