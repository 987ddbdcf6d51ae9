//! Action requests and their game-rule failures.

use crate::state::{BlockCause, CombatantId, ItemId, SkillId};

/// What an actor wants to do with its turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    BraveAttack,
    HpAttack,
    Skill(SkillId),
    Item(ItemId),
    Defend,
    Move,
    Wait,
}

impl ActionKind {
    /// Whether the action needs at least one explicit target.
    pub fn needs_target(&self) -> bool {
        matches!(self, Self::BraveAttack | Self::HpAttack | Self::Item(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BraveAttack => "brave_attack",
            Self::HpAttack => "hp_attack",
            Self::Skill(_) => "skill",
            Self::Item(_) => "item",
            Self::Defend => "defend",
            Self::Move => "move",
            Self::Wait => "wait",
        }
    }
}

/// A single action submitted for the actor whose turn it is.
///
/// Requests are consumed by value: once resolved (or parked as a cast) they
/// cannot be replayed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub actor: CombatantId,
    pub kind: ActionKind,
    pub targets: Vec<CombatantId>,
}

impl ActionRequest {
    pub fn new(actor: CombatantId, kind: ActionKind, targets: Vec<CombatantId>) -> Self {
        Self {
            actor,
            kind,
            targets,
        }
    }

    pub fn brave_attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::BraveAttack, vec![target])
    }

    pub fn hp_attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::HpAttack, vec![target])
    }

    pub fn skill(actor: CombatantId, skill: impl Into<SkillId>, targets: Vec<CombatantId>) -> Self {
        Self::new(actor, ActionKind::Skill(skill.into()), targets)
    }

    pub fn item(actor: CombatantId, item: impl Into<ItemId>, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::Item(item.into()), vec![target])
    }

    pub fn defend(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Defend, Vec::new())
    }

    pub fn wait(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Wait, Vec::new())
    }
}

/// Game-rule reasons an action had no effect. These end the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureReason {
    #[error("no valid target")]
    InvalidTarget,

    #[error("not enough resources")]
    InsufficientResource,

    #[error("action blocked: {0}")]
    ActionBlocked(BlockCause),

    #[error("skill is on cooldown")]
    OnCooldown,
}
