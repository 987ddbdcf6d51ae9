//! Content loaders for reading battle data from files.
//!
//! Every loader has a `load(path)` entry point for files and a `parse(text)`
//! entry point for embedded or generated data.

pub mod config;
pub mod encounter;
pub mod factory;
pub mod item;
pub mod skill;
pub mod status;
pub mod validate;

pub use config::ConfigLoader;
pub use encounter::{Encounter, EncounterLoader};
pub use factory::{ContentFactory, assemble_tables};
pub use item::ItemLoader;
pub use skill::SkillLoader;
pub use status::StatusLoader;
pub use validate::{validate_encounter, validate_tables};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
