//! Deterministic ATB/Brave combat rules.
//!
//! `battle-core` owns the canonical rules of an encounter: gauge scheduling,
//! Brave and HP damage, Break, casting, status effects and disables. It has
//! no I/O and no clock; time only moves when [`Battle::step`] is called.
//! Content (skills, items, statuses) and randomness are injected through the
//! oracle traits in [`env`], so the same seed and the same submitted actions
//! always reproduce the same [`BattleEvent`] stream.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;
pub mod stats;

pub use action::{ActionKind, ActionRequest, FailureReason};
pub use combat::{CriticalTier, DamageType, Element, JobClass};
pub use config::BattleConfig;
pub use engine::{
    ActionResolver, AdvanceReport, ApplyOutcome, Application, Battle, BattleError, Commit,
    GaugeScheduler, Interrupted, StepOutcome, StepResult,
};
pub use env::{
    BattleEnv, ContentTables, Env, ItemDefinition, ItemEffect, ItemOracle, OracleError, PcgRng,
    RngOracle, RollContext, RollStream, SkillDefinition, SkillKind, SkillOracle,
    StatusApplication, StatusOracle, StatusRecipient, TargetScope, compute_seed,
};
pub use error::{BattleErrorKind, ErrorSeverity};
pub use event::{BattleEvent, Resource};
pub use state::{
    BattleState, BlockCause, CastState, Combatant, CombatantId, CombatantSpec, Disables, ItemId,
    Magnitude, PeriodicMode, SkillId, StatusEffect, StatusEffects, StatusId, StatusKind,
    StatusTemplate, Team, Tick, TickPhase, TickTiming,
};
pub use stats::{Bonus, CombatStats, Stat, StatBonuses};
