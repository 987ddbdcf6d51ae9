//! Traits describing read-only battle data.
//!
//! Oracles expose skill, item and status tables plus the random source. The
//! [`Env`] aggregate bundles them so the engine can reach everything it needs
//! without coupling to concrete storage.
mod error;
mod items;
mod rng;
mod skills;
mod statuses;
mod tables;

pub use error::OracleError;
pub use items::{ItemDefinition, ItemEffect, ItemOracle};
pub use rng::{PcgRng, RngOracle, RollContext, RollStream, compute_seed};
pub use skills::{
    SkillDefinition, SkillKind, SkillOracle, StatusApplication, StatusRecipient, TargetScope,
};
pub use statuses::StatusOracle;
pub use tables::ContentTables;

/// Aggregates the oracles required by the scheduler and resolver.
pub struct Env<'a, S, I, T, R>
where
    S: SkillOracle + ?Sized,
    I: ItemOracle + ?Sized,
    T: StatusOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    skills: Option<&'a S>,
    items: Option<&'a I>,
    statuses: Option<&'a T>,
    rng: Option<&'a R>,
}

pub type BattleEnv<'a> =
    Env<'a, dyn SkillOracle + 'a, dyn ItemOracle + 'a, dyn StatusOracle + 'a, dyn RngOracle + 'a>;

// Manual impls: the oracles are borrowed, so the aggregate is always `Copy`
// even when the oracle types themselves are unsized trait objects.
impl<S, I, T, R> Clone for Env<'_, S, I, T, R>
where
    S: SkillOracle + ?Sized,
    I: ItemOracle + ?Sized,
    T: StatusOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, I, T, R> Copy for Env<'_, S, I, T, R>
where
    S: SkillOracle + ?Sized,
    I: ItemOracle + ?Sized,
    T: StatusOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<'a, S, I, T, R> Env<'a, S, I, T, R>
where
    S: SkillOracle + ?Sized,
    I: ItemOracle + ?Sized,
    T: StatusOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        skills: Option<&'a S>,
        items: Option<&'a I>,
        statuses: Option<&'a T>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            skills,
            items,
            statuses,
            rng,
        }
    }

    pub fn empty() -> Self {
        Self {
            skills: None,
            items: None,
            statuses: None,
            rng: None,
        }
    }

    /// Returns the SkillOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SkillsNotAvailable` if no skill oracle was provided.
    pub fn skills(&self) -> Result<&'a S, OracleError> {
        self.skills.ok_or(OracleError::SkillsNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the StatusOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::StatusesNotAvailable` if no status oracle was provided.
    pub fn statuses(&self) -> Result<&'a T, OracleError> {
        self.statuses.ok_or(OracleError::StatusesNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a> BattleEnv<'a> {
    /// One table set backing all content lookups, plus a random source.
    pub fn from_tables(tables: &'a ContentTables, rng: &'a dyn RngOracle) -> Self {
        Env::new(
            Some(tables as &dyn SkillOracle),
            Some(tables as &dyn ItemOracle),
            Some(tables as &dyn StatusOracle),
            Some(rng),
        )
    }
}
