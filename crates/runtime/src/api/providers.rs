//! Asynchronous abstraction for sourcing combatant intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with human input, scripted fixtures, or AI policies.
use async_trait::async_trait;
use battle_core::{ActionRequest, BattleEnv, BattleState, CombatantId};

use super::errors::Result;

/// Trait for choosing an action for the combatant whose turn is open.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Enemy AI decisions
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `actor` based on a snapshot of the battle.
    ///
    /// The returned request is submitted as-is. If the engine rejects it as
    /// a contract violation the runtime submits Wait instead.
    async fn provide_action(
        &self,
        actor: CombatantId,
        state: &BattleState,
        env: BattleEnv<'_>,
    ) -> Result<ActionRequest>;
}

/// A simple action provider that always returns Wait.
/// Useful for testing or as a fallback.
pub struct WaitActionProvider;

#[async_trait]
impl ActionProvider for WaitActionProvider {
    async fn provide_action(
        &self,
        actor: CombatantId,
        _state: &BattleState,
        _env: BattleEnv<'_>,
    ) -> Result<ActionRequest> {
        Ok(ActionRequest::wait(actor))
    }
}
