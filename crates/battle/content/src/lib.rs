//! Data-driven battle content.
//!
//! Skills, items and status templates are authored as RON catalogs, the
//! battle configuration as TOML, and encounters (rosters) as RON. Loaders
//! turn them into [`battle_core::ContentTables`], which implements every
//! content oracle the engine consults.
//!
//! A default content set is compiled into the crate (see [`builtin`]) so
//! tools and tests can start a battle without a data directory.

#[cfg(feature = "loaders")]
pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, Encounter, EncounterLoader, ItemLoader, LoadResult,
    SkillLoader, StatusLoader, assemble_tables, validate_encounter, validate_tables,
};
