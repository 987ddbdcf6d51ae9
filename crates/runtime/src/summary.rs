//! End-of-battle report.

use battle_core::{Battle, CombatantId, Team, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSummary {
    pub id: CombatantId,
    pub name: String,
    pub team: Team,
    pub hp: u32,
    pub max_hp: u32,
    pub brave: u32,
    pub turns_taken: u32,
    pub alive: bool,
}

/// Snapshot of a battle's outcome, exportable as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    /// `None` while the battle is still running.
    pub winner: Option<Team>,
    /// Engine steps taken by the runtime.
    pub steps: u64,
    pub clock: Tick,
    pub combatants: Vec<CombatantSummary>,
    /// In order of defeat.
    pub defeated: Vec<CombatantId>,
}

impl BattleSummary {
    pub fn from_battle(battle: &Battle, steps: u64) -> Self {
        let combatants = battle
            .state()
            .iter()
            .map(|c| CombatantSummary {
                id: c.id,
                name: c.name.clone(),
                team: c.team,
                hp: c.hp,
                max_hp: c.max_hp,
                brave: c.brave,
                turns_taken: c.turns_taken,
                alive: c.is_alive(),
            })
            .collect();

        Self {
            winner: battle.winner(),
            steps,
            clock: battle.state().tick,
            combatants,
            defeated: battle.defeated().map(|c| c.id).collect(),
        }
    }

    /// Combatants still standing.
    pub fn survivors(&self) -> impl Iterator<Item = &CombatantSummary> {
        self.combatants.iter().filter(|c| c.alive)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
