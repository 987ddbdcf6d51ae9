//! Contract violations surfaced by the battle engine.

use crate::env::OracleError;
use crate::error::{BattleErrorKind, ErrorSeverity};
use crate::state::{CombatantId, ItemId, SkillId, StatusId};

/// Errors returned when a caller drives the engine incorrectly.
///
/// Game-rule failures never appear here; they are reported as
/// [`crate::BattleEvent::ActionFailed`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error("combatant {actor} is not awaiting an action")]
    ActorNotAwaiting { actor: CombatantId },

    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} is defeated")]
    TargetDefeated(CombatantId),

    #[error("unknown skill '{0}'")]
    UnknownSkill(SkillId),

    #[error("unknown item '{0}'")]
    UnknownItem(ItemId),

    #[error("unknown status '{0}'")]
    UnknownStatus(StatusId),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("a team has no combatants")]
    EmptyTeam,

    #[error("roster exceeds {max} combatants")]
    RosterFull { max: usize },

    #[error("battle already finished")]
    BattleFinished,
}

impl BattleErrorKind for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotAwaiting { .. } => ErrorSeverity::Recoverable,
            Self::UnknownCombatant(_)
            | Self::TargetDefeated(_)
            | Self::UnknownSkill(_)
            | Self::UnknownItem(_)
            | Self::UnknownStatus(_)
            | Self::EmptyTeam
            | Self::RosterFull { .. } => ErrorSeverity::Validation,
            Self::Oracle(err) => err.severity(),
            Self::BattleFinished => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotAwaiting { .. } => "BATTLE_ACTOR_NOT_AWAITING",
            Self::UnknownCombatant(_) => "BATTLE_UNKNOWN_COMBATANT",
            Self::TargetDefeated(_) => "BATTLE_TARGET_DEFEATED",
            Self::UnknownSkill(_) => "BATTLE_UNKNOWN_SKILL",
            Self::UnknownItem(_) => "BATTLE_UNKNOWN_ITEM",
            Self::UnknownStatus(_) => "BATTLE_UNKNOWN_STATUS",
            Self::Oracle(err) => err.error_code(),
            Self::EmptyTeam => "BATTLE_EMPTY_TEAM",
            Self::RosterFull { .. } => "BATTLE_ROSTER_FULL",
            Self::BattleFinished => "BATTLE_FINISHED",
        }
    }
}
