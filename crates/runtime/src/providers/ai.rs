//! Utility-based Brave AI.
//!
//! Each turn the provider scores a handful of candidate actions and submits
//! the best one:
//!
//! 1. **Heal** a wounded ally when a healing skill is usable.
//! 2. **Spend** BRV as HP damage once the pool is worth it.
//! 3. **Build** BRV with the strongest usable Brave skill, or a plain
//!    Brave attack on the richest enemy.
//!
//! Scoring only reads the snapshot it is given, so the same state always
//! yields the same choice.

use async_trait::async_trait;
use battle_core::{
    ActionRequest, BattleEnv, BattleState, Combatant, CombatantId, Disables, SkillDefinition,
    SkillKind, SkillOracle, TargetScope,
};
use tracing::debug;

use crate::api::{ActionProvider, Result, RuntimeError};

#[derive(Debug, Clone)]
pub struct BraveAiProvider {
    /// Allies below this share of max HP get healed.
    pub heal_below_percent: u32,
    /// Spend BRV once it reaches this share of the actor's base BRV.
    pub spend_at_percent: u32,
}

impl Default for BraveAiProvider {
    fn default() -> Self {
        Self {
            heal_below_percent: 40,
            spend_at_percent: 200,
        }
    }
}

impl BraveAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick an action for `me`.
    pub fn decide(
        &self,
        me: &Combatant,
        state: &BattleState,
        skills: Option<&dyn SkillOracle>,
    ) -> ActionRequest {
        let enemies: Vec<&Combatant> = state.living_on(me.team.opponent()).collect();
        if enemies.is_empty() {
            return ActionRequest::wait(me.id);
        }

        let usable: Vec<SkillDefinition> = skills
            .map(|oracle| {
                me.skills
                    .iter()
                    .filter_map(|id| oracle.skill(id))
                    .filter(|skill| Self::can_use(me, skill))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(request) = self.heal(me, state, &usable) {
            return request;
        }
        if let Some(request) = self.spend(me, &enemies, &usable) {
            return request;
        }
        self.build(me, &enemies, &usable)
    }

    fn can_use(me: &Combatant, skill: &SkillDefinition) -> bool {
        me.skill_cooldown(&skill.id) == 0
            && me.mp >= skill.mp_cost
            && !me.disables.contains(Disables::SILENCE)
    }

    fn heal(
        &self,
        me: &Combatant,
        state: &BattleState,
        usable: &[SkillDefinition],
    ) -> Option<ActionRequest> {
        let wounded = state
            .living_on(me.team)
            .filter(|ally| hp_percent(ally) < self.heal_below_percent)
            .min_by_key(|ally| (hp_percent(ally), ally.id))?;

        let skill = usable
            .iter()
            .filter(|skill| skill.kind == SkillKind::Support && skill.base_power > 0)
            .filter(|skill| match skill.target {
                TargetScope::SingleAlly | TargetScope::AllAllies => true,
                TargetScope::Caster => wounded.id == me.id,
                TargetScope::SingleEnemy | TargetScope::AllEnemies => false,
            })
            .max_by_key(|skill| skill.base_power)?;

        Some(ActionRequest::skill(me.id, skill.id.clone(), vec![wounded.id]))
    }

    fn spend(
        &self,
        me: &Combatant,
        enemies: &[&Combatant],
        usable: &[SkillDefinition],
    ) -> Option<ActionRequest> {
        if me.brave == 0 {
            return None;
        }
        let target = enemies.iter().min_by_key(|enemy| (enemy.hp, enemy.id))?;
        let threshold = u64::from(me.base_brave.max(1)) * u64::from(self.spend_at_percent) / 100;
        let lethal = me.brave >= target.hp;
        if !lethal && u64::from(me.brave) < threshold {
            return None;
        }

        let hp_skill = usable
            .iter()
            .filter(|skill| skill.kind == SkillKind::Hp)
            .max_by_key(|skill| skill.base_power);
        Some(match hp_skill {
            Some(skill) => ActionRequest::skill(me.id, skill.id.clone(), vec![target.id]),
            None => ActionRequest::hp_attack(me.id, target.id),
        })
    }

    fn build(
        &self,
        me: &Combatant,
        enemies: &[&Combatant],
        usable: &[SkillDefinition],
    ) -> ActionRequest {
        // Prefer targets that are not already broken.
        let target = enemies
            .iter()
            .filter(|enemy| !enemy.is_broken)
            .max_by_key(|enemy| (enemy.brave, std::cmp::Reverse(enemy.id)))
            .or_else(|| enemies.first())
            .map(|enemy| enemy.id);
        let Some(target) = target else {
            return ActionRequest::wait(me.id);
        };

        let brave_skill = usable
            .iter()
            .filter(|skill| skill.kind == SkillKind::Brave && skill.base_power > 100)
            .max_by_key(|skill| skill.base_power);
        match brave_skill {
            Some(skill) => ActionRequest::skill(me.id, skill.id.clone(), vec![target]),
            None => ActionRequest::brave_attack(me.id, target),
        }
    }
}

fn hp_percent(combatant: &Combatant) -> u32 {
    (u64::from(combatant.hp) * 100 / u64::from(combatant.max_hp.max(1))) as u32
}

#[async_trait]
impl ActionProvider for BraveAiProvider {
    async fn provide_action(
        &self,
        actor: CombatantId,
        state: &BattleState,
        env: BattleEnv<'_>,
    ) -> Result<ActionRequest> {
        let me = state
            .get(actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        let request = self.decide(me, state, env.skills().ok());
        debug!(
            target: "battle_runtime::ai",
            %actor,
            action = request.kind.as_str(),
            targets = ?request.targets,
            "ai decision"
        );
        Ok(request)
    }
}
