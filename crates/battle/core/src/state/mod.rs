//! Battle state: the roster of combatants and the clock.
//!
//! The state is plain data. All rules live in [`crate::engine`]; this module
//! only offers lookups that the scheduler, the resolver and the runtime share.

pub mod combatant;
pub mod common;
pub mod disable;
pub mod status;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

pub use combatant::{CastState, Combatant, CombatantSpec};
pub use common::{CombatantId, ItemId, SkillId, StatusId, Team, Tick};
pub use disable::{BlockCause, Disables};
pub use status::{
    Magnitude, PeriodicMode, StatusEffect, StatusEffects, StatusKind, StatusTemplate, TickPhase,
    TickTiming,
};

/// Every combatant in registration order plus the battle clock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub combatants: ArrayVec<Combatant, { BattleConfig::MAX_COMBATANTS }>,
    pub tick: Tick,
}

impl BattleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_alive())
    }

    pub fn living_on(&self, team: Team) -> impl Iterator<Item = &Combatant> {
        self.living().filter(move |c| c.team == team)
    }

    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(Combatant::is_alive)
    }

    /// The team with living members when the other side has none.
    pub fn winner(&self) -> Option<Team> {
        let allies = self.living_on(Team::Ally).next().is_some();
        let enemies = self.living_on(Team::Enemy).next().is_some();
        match (allies, enemies) {
            (true, false) => Some(Team::Ally),
            (false, true) => Some(Team::Enemy),
            _ => None,
        }
    }
}
