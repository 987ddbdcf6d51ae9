//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the battle engine, and action
//! providers so clients can bubble them up with consistent context.
use battle_core::{BattleError, CombatantId, Team};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{team} action provider not set")]
    ProviderNotSet { team: Team },

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("runtime requires a roster before building")]
    MissingRoster,

    #[error("combatant {0} is not in the battle")]
    UnknownCombatant(CombatantId),

    #[error("battle did not finish within {limit} steps")]
    StepLimit { limit: u64 },

    #[error("action provider failed: {0}")]
    Provider(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
