//! Status template loader.

use std::path::Path;

use battle_core::{Magnitude, StatusKind, StatusTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Status catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalog {
    pub statuses: Vec<StatusTemplate>,
}

/// Loader for status templates from RON files.
pub struct StatusLoader;

impl StatusLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatusTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a catalog and reject templates the engine would misread.
    pub fn parse(content: &str) -> LoadResult<Vec<StatusTemplate>> {
        let catalog: StatusCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse status catalog RON: {}", e))?;

        for template in &catalog.statuses {
            if template.duration == 0 {
                anyhow::bail!("status '{}' has zero duration", template.id);
            }
            if template.stackable && template.max_stacks < 2 {
                anyhow::bail!("stackable status '{}' needs max_stacks >= 2", template.id);
            }
            let speed_kind = matches!(template.kind, StatusKind::Haste | StatusKind::Slow);
            let speed_payload = matches!(template.magnitude, Magnitude::Speed { .. });
            if speed_kind != speed_payload {
                anyhow::bail!(
                    "status '{}': Speed magnitude belongs to Haste/Slow only",
                    template.id
                );
            }
        }
        Ok(catalog.statuses)
    }
}
