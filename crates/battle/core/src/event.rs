//! Observable outcomes of a battle step.
//!
//! Every state change the engine makes is reported as a [`BattleEvent`], in
//! the order it happened. Game-rule failures are events too; only contract
//! violations surface as errors.

use crate::action::{ActionKind, FailureReason};
use crate::combat::CriticalTier;
use crate::state::{BlockCause, CombatantId, SkillId, StatusId, StatusKind, Team};

/// Pool restored by a heal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    Hp,
    Mp,
    Brave,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// Gauge full; the actor waits for an action.
    TurnReady { actor: CombatantId },

    /// The turn was lost to a disable.
    TurnSkipped {
        actor: CombatantId,
        cause: BlockCause,
    },

    ActionDeclared {
        actor: CombatantId,
        action: ActionKind,
        targets: Vec<CombatantId>,
    },

    CastStarted {
        actor: CombatantId,
        skill: SkillId,
        /// Gauge units of progress needed.
        duration: u32,
    },

    CastCompleted { actor: CombatantId, skill: SkillId },

    CastInterrupted {
        actor: CombatantId,
        skill: SkillId,
        refund: u32,
    },

    Missed {
        actor: CombatantId,
        target: CombatantId,
    },

    /// BRV moved from target to actor.
    BraveDamage {
        actor: CombatantId,
        target: CombatantId,
        /// Raw damage before the target's pool floored it.
        amount: u32,
        /// BRV the actor actually gained.
        gained: u32,
        critical: CriticalTier,
        element_percent: u32,
    },

    Break {
        actor: CombatantId,
        target: CombatantId,
    },

    BreakCleared { target: CombatantId },

    HpDamage {
        actor: CombatantId,
        target: CombatantId,
        /// Damage that reached HP.
        amount: u32,
        /// Damage soaked by shields.
        absorbed: u32,
        remaining_hp: u32,
    },

    Healed {
        target: CombatantId,
        resource: Resource,
        amount: u32,
    },

    StatusApplied {
        target: CombatantId,
        status: StatusId,
        kind: StatusKind,
        stacks: u32,
        duration: u32,
    },

    /// The effect list was full.
    StatusRejected {
        target: CombatantId,
        status: StatusId,
    },

    /// The application chance roll failed.
    StatusResisted {
        target: CombatantId,
        status: StatusId,
    },

    /// A periodic payload fired.
    StatusTicked {
        target: CombatantId,
        status: StatusId,
        kind: StatusKind,
        amount: u32,
        /// True for HOTs.
        restores: bool,
        remaining_hp: u32,
    },

    StatusExpired {
        target: CombatantId,
        status: StatusId,
    },

    StatusCleansed {
        target: CombatantId,
        status: StatusId,
    },

    Defending { actor: CombatantId },

    ActionFailed {
        actor: CombatantId,
        reason: FailureReason,
    },

    Defeated { target: CombatantId },

    BattleEnded { winner: Team },
}

impl BattleEvent {
    /// The combatant the event is mainly about, if any.
    pub fn subject(&self) -> Option<CombatantId> {
        use BattleEvent::*;
        match self {
            TurnReady { actor }
            | TurnSkipped { actor, .. }
            | ActionDeclared { actor, .. }
            | CastStarted { actor, .. }
            | CastCompleted { actor, .. }
            | CastInterrupted { actor, .. }
            | Missed { actor, .. }
            | BraveDamage { actor, .. }
            | Break { actor, .. }
            | HpDamage { actor, .. }
            | Defending { actor }
            | ActionFailed { actor, .. } => Some(*actor),
            BreakCleared { target }
            | Healed { target, .. }
            | StatusApplied { target, .. }
            | StatusRejected { target, .. }
            | StatusResisted { target, .. }
            | StatusTicked { target, .. }
            | StatusExpired { target, .. }
            | StatusCleansed { target, .. }
            | Defeated { target } => Some(*target),
            BattleEnded { .. } => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use BattleEvent::*;
        match self {
            TurnReady { .. } => "turn_ready",
            TurnSkipped { .. } => "turn_skipped",
            ActionDeclared { .. } => "action_declared",
            CastStarted { .. } => "cast_started",
            CastCompleted { .. } => "cast_completed",
            CastInterrupted { .. } => "cast_interrupted",
            Missed { .. } => "missed",
            BraveDamage { .. } => "brave_damage",
            Break { .. } => "break",
            BreakCleared { .. } => "break_cleared",
            HpDamage { .. } => "hp_damage",
            Healed { .. } => "healed",
            StatusApplied { .. } => "status_applied",
            StatusRejected { .. } => "status_rejected",
            StatusResisted { .. } => "status_resisted",
            StatusTicked { .. } => "status_ticked",
            StatusExpired { .. } => "status_expired",
            StatusCleansed { .. } => "status_cleansed",
            Defending { .. } => "defending",
            ActionFailed { .. } => "action_failed",
            Defeated { .. } => "defeated",
            BattleEnded { .. } => "battle_ended",
        }
    }
}
