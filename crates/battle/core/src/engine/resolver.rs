//! Action resolution.
//!
//! Every resolution runs in two passes:
//!
//! 1. **Plan**: look up content, validate targets and resources, draw every
//!    roll. Contract violations return [`BattleError`] here, before anything
//!    is written; game-rule failures become [`Commit::Failed`].
//! 2. **Apply**: mutate combatants from the plan and push events.
//!
//! The resolver never resets gauges or ticks the actor's turn boundary; the
//! battle session does that once the returned [`Commit`] says the turn is
//! over.

use crate::action::{ActionKind, ActionRequest, FailureReason};
use crate::combat::critical::CRIT_ROLL_SCALE;
use crate::combat::{
    CriticalTier, DamageType, Element, cast_time, calculate_damage, check_hit,
    combined_crit_percent, element_multiplier, hp_attack_damage, roll_critical_tier,
};
use crate::config::BattleConfig;
use crate::env::{
    BattleEnv, ItemDefinition, ItemEffect, RngOracle, RollContext, RollStream, SkillDefinition,
    SkillKind, StatusApplication, StatusRecipient, TargetScope,
};
use crate::event::{BattleEvent, Resource};
use crate::state::{
    BattleState, BlockCause, CastState, CombatantId, ItemId, SkillId, StatusKind, StatusTemplate,
    Team,
};
use crate::stats::Stat;

use super::errors::BattleError;
use super::scheduler::GaugeScheduler;
use super::status::{self, Application};

/// Power of a plain Brave or HP attack.
pub const BASIC_ATTACK_POWER: u32 = 100;

/// Outcome of committing an action for the ready actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Commit {
    /// The action resolved; the turn is over. A used skill with a cooldown
    /// reports it so the session can start it after the turn-end tick.
    Resolved { cooldown: Option<(SkillId, u32)> },
    /// The action became a cast; the gauge is held until it completes.
    Cast {
        skill: SkillId,
        duration: u32,
        mp_paid: u32,
    },
    /// A game rule stopped the action; the turn is still over.
    Failed(FailureReason),
}

/// Offensive parameters shared by basic attacks and damage skills.
#[derive(Clone, Copy, Debug)]
struct Strike {
    power: u32,
    damage_type: DamageType,
    element: Element,
    crit_bonus: i32,
}

impl Strike {
    const BASIC: Self = Self {
        power: BASIC_ATTACK_POWER,
        damage_type: DamageType::Physical,
        element: Element::Neutral,
        crit_bonus: 0,
    };

    fn of(skill: &SkillDefinition) -> Self {
        Self {
            power: skill.base_power,
            damage_type: skill.damage_type,
            element: skill.element,
            crit_bonus: skill.crit_bonus,
        }
    }
}

/// One planned hit against one target.
#[derive(Clone, Copy, Debug)]
struct PlannedHit {
    target: CombatantId,
    hit: bool,
    tier: CriticalTier,
    element_percent: u32,
    amount: u32,
}

/// One planned status roll.
#[derive(Clone, Debug)]
struct PlannedStatus {
    recipient: CombatantId,
    template: StatusTemplate,
    duration: Option<u32>,
    lands: bool,
}

pub struct ActionResolver<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
    env: BattleEnv<'a>,
    rng: &'a dyn RngOracle,
    rolls: &'a mut RollStream,
    events: &'a mut Vec<BattleEvent>,
}

impl<'a> ActionResolver<'a> {
    /// # Errors
    ///
    /// Returns `BattleError::Oracle` if the environment has no RNG.
    pub fn new(
        state: &'a mut BattleState,
        config: &'a BattleConfig,
        env: BattleEnv<'a>,
        rolls: &'a mut RollStream,
        events: &'a mut Vec<BattleEvent>,
    ) -> Result<Self, BattleError> {
        let rng = env.rng()?;
        Ok(Self {
            state,
            config,
            env,
            rng,
            rolls,
            events,
        })
    }

    /// Commit a request for the actor whose turn it is.
    ///
    /// An actor stunned, asleep or frozen while its turn is open loses the
    /// action with `ActionBlocked`.
    pub fn commit(&mut self, request: &ActionRequest) -> Result<Commit, BattleError> {
        self.ensure_known(request)?;

        let hard = self
            .state
            .get(request.actor)
            .and_then(|actor| actor.disables.hard_cause());
        if let Some(cause) = hard {
            self.declare(request);
            return Ok(self.fail(request.actor, FailureReason::ActionBlocked(cause)));
        }

        match &request.kind {
            ActionKind::Skill(id) => {
                let skill = self.lookup_skill(id)?;
                let statuses = self.lookup_statuses(&skill.statuses)?;
                self.declare(request);
                self.commit_skill(request, &skill, &statuses)
            }
            ActionKind::Item(id) => {
                let item = self.lookup_item(id)?;
                let applications: Vec<StatusApplication> = item
                    .effects
                    .iter()
                    .filter_map(|effect| match effect {
                        ItemEffect::ApplyStatus(application) => Some(application.clone()),
                        _ => None,
                    })
                    .collect();
                let statuses = self.lookup_statuses(&applications)?;
                self.declare(request);
                Ok(self.use_item(request, &item, &statuses))
            }
            ActionKind::BraveAttack => {
                self.declare(request);
                let Some(target) = self.hostile_target(request) else {
                    return Ok(self.fail(request.actor, FailureReason::InvalidTarget));
                };
                let hits = self.plan_hits(request.actor, &[target], Strike::BASIC);
                self.apply_brave(request.actor, &hits);
                Ok(Commit::Resolved { cooldown: None })
            }
            ActionKind::HpAttack => {
                self.declare(request);
                let Some(target) = self.hostile_target(request) else {
                    return Ok(self.fail(request.actor, FailureReason::InvalidTarget));
                };
                let hits = self.plan_hp(request.actor, &[target], Strike::BASIC);
                self.apply_hp(request.actor, &hits);
                Ok(Commit::Resolved { cooldown: None })
            }
            ActionKind::Defend => {
                self.declare(request);
                if let Some(actor) = self.state.get_mut(request.actor) {
                    actor.guarding = true;
                }
                self.events.push(BattleEvent::Defending {
                    actor: request.actor,
                });
                Ok(Commit::Resolved { cooldown: None })
            }
            ActionKind::Move | ActionKind::Wait => {
                self.declare(request);
                Ok(Commit::Resolved { cooldown: None })
            }
        }
    }

    /// Resolve a cast whose progress reached 100%.
    ///
    /// A caster silenced mid-cast loses the action and gets its MP back.
    pub fn complete_cast(&mut self, cast: CastState) -> Result<Commit, BattleError> {
        let ActionKind::Skill(id) = &cast.request.kind else {
            return self.commit(&cast.request);
        };
        let skill = self.lookup_skill(id)?;
        let statuses = self.lookup_statuses(&skill.statuses)?;
        let actor = cast.request.actor;

        self.events.push(BattleEvent::CastCompleted {
            actor,
            skill: skill.id.clone(),
        });

        let silenced = self
            .state
            .get(actor)
            .is_some_and(|c| c.disables.blocks_skills());
        if silenced {
            if let Some(caster) = self.state.get_mut(actor) {
                caster.restore_mp(cast.mp_paid);
            }
            return Ok(self.fail(actor, FailureReason::ActionBlocked(BlockCause::Silenced)));
        }

        let Some(targets) = self.skill_targets(&cast.request, &skill) else {
            return Ok(self.fail(actor, FailureReason::InvalidTarget));
        };
        self.resolve_skill(actor, &skill, &statuses, &targets);
        Ok(Commit::Resolved {
            cooldown: (skill.cooldown > 0).then(|| (skill.id.clone(), skill.cooldown)),
        })
    }

    // ========================================================================
    // Skills
    // ========================================================================

    fn commit_skill(
        &mut self,
        request: &ActionRequest,
        skill: &SkillDefinition,
        statuses: &[(StatusApplication, StatusTemplate)],
    ) -> Result<Commit, BattleError> {
        let actor_id = request.actor;
        let actor = self
            .state
            .get(actor_id)
            .ok_or(BattleError::UnknownCombatant(actor_id))?;

        if actor.disables.blocks_skills() {
            return Ok(self.fail(actor_id, FailureReason::ActionBlocked(BlockCause::Silenced)));
        }
        if actor.skill_cooldown(&skill.id) > 0 {
            return Ok(self.fail(actor_id, FailureReason::OnCooldown));
        }
        let Some(targets) = self.skill_targets(request, skill) else {
            return Ok(self.fail(actor_id, FailureReason::InvalidTarget));
        };
        let actor = self
            .state
            .get(actor_id)
            .ok_or(BattleError::UnknownCombatant(actor_id))?;
        if actor.mp < skill.mp_cost {
            return Ok(self.fail(actor_id, FailureReason::InsufficientResource));
        }

        let percent = skill
            .cast_time
            .unwrap_or_else(|| cast_time(skill.base_power, actor.stat(Stat::MagicAttack)));
        let duration = self.config.percent_of_gauge(percent);

        if let Some(actor) = self.state.get_mut(actor_id) {
            actor.mp -= skill.mp_cost;
        }

        if duration > 0 {
            self.events.push(BattleEvent::CastStarted {
                actor: actor_id,
                skill: skill.id.clone(),
                duration,
            });
            return Ok(Commit::Cast {
                skill: skill.id.clone(),
                duration,
                mp_paid: skill.mp_cost,
            });
        }

        self.resolve_skill(actor_id, skill, statuses, &targets);
        Ok(Commit::Resolved {
            cooldown: (skill.cooldown > 0).then(|| (skill.id.clone(), skill.cooldown)),
        })
    }

    fn resolve_skill(
        &mut self,
        actor: CombatantId,
        skill: &SkillDefinition,
        statuses: &[(StatusApplication, StatusTemplate)],
        targets: &[CombatantId],
    ) {
        let strike = Strike::of(skill);
        let landed: Vec<CombatantId> = match skill.kind {
            SkillKind::Brave => {
                let hits = self.plan_hits(actor, targets, strike);
                let landed = landed_targets(&hits);
                let planned = self.plan_statuses(actor, statuses, &landed);
                self.apply_brave(actor, &hits);
                self.apply_statuses(actor, planned);
                return;
            }
            SkillKind::Hp => {
                let hits = self.plan_hp(actor, targets, strike);
                let landed = landed_targets(&hits);
                let planned = self.plan_statuses(actor, statuses, &landed);
                self.apply_hp(actor, &hits);
                self.apply_statuses(actor, planned);
                return;
            }
            SkillKind::Support => targets.to_vec(),
        };

        let planned = self.plan_statuses(actor, statuses, &landed);
        let magic = self
            .state
            .get(actor)
            .map_or(0, |c| u64::try_from(c.stat(Stat::MagicAttack)).unwrap_or(0));
        let heal = u32::try_from(u64::from(skill.base_power) * magic / 100).unwrap_or(u32::MAX);
        if heal > 0 {
            for target in &landed {
                self.heal(*target, Resource::Hp, heal);
            }
        }
        self.apply_statuses(actor, planned);
    }

    /// Resolve the skill's scope against the request.
    fn skill_targets(&self, request: &ActionRequest, skill: &SkillDefinition) -> Option<Vec<CombatantId>> {
        let actor = self.state.get(request.actor)?;
        let team = actor.team;
        let targets: Vec<CombatantId> = match skill.target {
            TargetScope::SingleEnemy => vec![self.hostile_target(request)?],
            TargetScope::SingleAlly => {
                let target = request.targets.first().copied().unwrap_or(request.actor);
                let ally = self.state.get(target)?;
                if !ally.is_alive() || ally.team != team {
                    return None;
                }
                vec![target]
            }
            TargetScope::AllEnemies => self.state.living_on(team.opponent()).map(|c| c.id).collect(),
            TargetScope::AllAllies => self.state.living_on(team).map(|c| c.id).collect(),
            TargetScope::Caster => vec![request.actor],
        };
        (!targets.is_empty()).then_some(targets)
    }

    // ========================================================================
    // Items
    // ========================================================================

    fn use_item(
        &mut self,
        request: &ActionRequest,
        item: &ItemDefinition,
        statuses: &[(StatusApplication, StatusTemplate)],
    ) -> Commit {
        let target = request.targets.first().copied().unwrap_or(request.actor);
        if !self.state.is_alive(target) {
            return self.fail(request.actor, FailureReason::InvalidTarget);
        }

        let planned = self.plan_statuses(request.actor, statuses, &[target]);
        for effect in &item.effects {
            match effect {
                ItemEffect::RestoreHp(amount) => self.heal(target, Resource::Hp, *amount),
                ItemEffect::RestoreHpPercent(percent) => {
                    let max_hp = self.state.get(target).map_or(0, |c| c.max_hp);
                    let amount = (u64::from(max_hp) * u64::from(*percent) / 100) as u32;
                    self.heal(target, Resource::Hp, amount);
                }
                ItemEffect::RestoreMp(amount) => self.heal(target, Resource::Mp, *amount),
                ItemEffect::RestoreBrave(amount) => self.heal(target, Resource::Brave, *amount),
                ItemEffect::Cure(kinds) => {
                    if let Some(combatant) = self.state.get_mut(target) {
                        status::cleanse(combatant, kinds, self.events);
                    }
                }
                ItemEffect::ApplyStatus(_) => {}
            }
        }
        self.apply_statuses(request.actor, planned);
        Commit::Resolved { cooldown: None }
    }

    // ========================================================================
    // Planning
    // ========================================================================

    /// Hit, critical and raw Brave damage per target.
    fn plan_hits(&mut self, actor: CombatantId, targets: &[CombatantId], strike: Strike) -> Vec<PlannedHit> {
        let Some(attacker) = self.state.get(actor) else {
            return Vec::new();
        };
        let accuracy = attacker.effective_accuracy(self.config);
        let attack = attacker.attack(strike.damage_type);
        let crit_rate = combined_crit_percent(
            attacker.job,
            strike.crit_bonus,
            attacker.stat(Stat::Luck),
            self.config.crit_cap_percent,
        );

        let mut planned = Vec::with_capacity(targets.len());
        for &target_id in targets {
            let Some(target) = self.state.get(target_id) else {
                continue;
            };
            let evasion = target.stat(Stat::Evasion);
            let defense = target.defense(strike.damage_type, self.config);
            let element_percent = element_multiplier(strike.element, target.element);

            let hit_roll = self.rolls.d100(self.rng, actor.0, RollContext::Hit);
            let crit_roll = self
                .rolls
                .below(self.rng, actor.0, RollContext::Critical, CRIT_ROLL_SCALE);
            let hit = check_hit(accuracy, evasion, hit_roll);
            let tier = roll_critical_tier(crit_rate, crit_roll);
            let amount = calculate_damage(
                attack,
                defense,
                strike.power,
                tier.multiplier_percent(),
                element_percent,
            );

            planned.push(PlannedHit {
                target: target_id,
                hit,
                tier,
                element_percent,
                amount,
            });
        }
        planned
    }

    /// HP damage per target. The actor's BRV pool is split evenly.
    fn plan_hp(&mut self, actor: CombatantId, targets: &[CombatantId], strike: Strike) -> Vec<PlannedHit> {
        let Some(attacker) = self.state.get(actor) else {
            return Vec::new();
        };
        let accuracy = attacker.effective_accuracy(self.config);
        let attack = attacker.attack(strike.damage_type);
        let count = u32::try_from(targets.len().max(1)).unwrap_or(u32::MAX);
        let share = attacker.brave / count;

        let mut planned = Vec::with_capacity(targets.len());
        for &target_id in targets {
            let Some(target) = self.state.get(target_id) else {
                continue;
            };
            let defense = target.defense(strike.damage_type, self.config);
            let break_bonus = if target.is_broken {
                self.config.break_bonus_percent
            } else {
                100
            };
            let bonus = break_bonus * strike.power / BASIC_ATTACK_POWER;

            let hit_roll = self.rolls.d100(self.rng, actor.0, RollContext::Hit);
            let hit = check_hit(accuracy, target.stat(Stat::Evasion), hit_roll);
            let amount = hp_attack_damage(share, attack, defense, bonus);

            planned.push(PlannedHit {
                target: target_id,
                hit,
                tier: CriticalTier::Normal,
                element_percent: 100,
                amount,
            });
        }
        planned
    }

    /// Chance rolls for every status a resolution may apply.
    fn plan_statuses(
        &mut self,
        actor: CombatantId,
        statuses: &[(StatusApplication, StatusTemplate)],
        landed: &[CombatantId],
    ) -> Vec<PlannedStatus> {
        let mut planned = Vec::new();
        for (application, template) in statuses {
            let recipients: Vec<CombatantId> = match application.recipient {
                StatusRecipient::Target => landed.to_vec(),
                StatusRecipient::Caster if landed.is_empty() => Vec::new(),
                StatusRecipient::Caster => vec![actor],
            };
            for recipient in recipients {
                let roll = self.rolls.d100(self.rng, actor.0, RollContext::Status);
                planned.push(PlannedStatus {
                    recipient,
                    template: template.clone(),
                    duration: application.duration,
                    lands: roll <= application.chance,
                });
            }
        }
        planned
    }

    // ========================================================================
    // Application
    // ========================================================================

    fn apply_brave(&mut self, actor_id: CombatantId, hits: &[PlannedHit]) {
        for planned in hits {
            if !planned.hit {
                self.events.push(BattleEvent::Missed {
                    actor: actor_id,
                    target: planned.target,
                });
                continue;
            }

            let Some(target) = self.state.get_mut(planned.target) else {
                continue;
            };
            let before = target.brave;
            target.brave = before.saturating_sub(planned.amount);
            let broke = before > 0 && target.brave == 0 && !target.is_broken;
            if broke {
                target.is_broken = true;
            }

            let Some(actor) = self.state.get_mut(actor_id) else {
                continue;
            };
            let actor_before = actor.brave;
            let cleared = actor.gain_brave(planned.amount);
            let gained = actor.brave - actor_before;

            self.events.push(BattleEvent::BraveDamage {
                actor: actor_id,
                target: planned.target,
                amount: planned.amount,
                gained,
                critical: planned.tier,
                element_percent: planned.element_percent,
            });
            if cleared {
                self.events.push(BattleEvent::BreakCleared { target: actor_id });
            }
            if broke {
                self.events.push(BattleEvent::Break {
                    actor: actor_id,
                    target: planned.target,
                });
            }
        }
    }

    fn apply_hp(&mut self, actor_id: CombatantId, hits: &[PlannedHit]) {
        if let Some(actor) = self.state.get_mut(actor_id) {
            actor.brave = 0;
        }

        for planned in hits {
            if !planned.hit {
                self.events.push(BattleEvent::Missed {
                    actor: actor_id,
                    target: planned.target,
                });
                continue;
            }

            let Some(target) = self.state.get_mut(planned.target) else {
                continue;
            };
            let absorbed = status::absorb(target, planned.amount, self.events);
            let dealt = (planned.amount - absorbed).min(target.hp);
            target.hp -= dealt;
            let was_broken = target.is_broken;
            target.is_broken = false;
            let remaining_hp = target.hp;

            self.events.push(BattleEvent::HpDamage {
                actor: actor_id,
                target: planned.target,
                amount: dealt,
                absorbed,
                remaining_hp,
            });
            if was_broken {
                self.events.push(BattleEvent::BreakCleared {
                    target: planned.target,
                });
            }

            if dealt > 0 && remaining_hp > 0 {
                self.on_hp_damage(planned.target);
            }
        }
    }

    /// HP damage wakes the target and breaks its concentration.
    fn on_hp_damage(&mut self, target_id: CombatantId) {
        if let Some(target) = self.state.get_mut(target_id) {
            status::cleanse(target, &[StatusKind::Sleep], self.events);
        }

        let interrupted = GaugeScheduler::new(self.state, self.config).interrupt(target_id);
        if let Some(interrupted) = interrupted {
            if let ActionKind::Skill(skill) = interrupted.request.kind {
                self.events.push(BattleEvent::CastInterrupted {
                    actor: target_id,
                    skill,
                    refund: interrupted.refund,
                });
            }
        }
    }

    fn apply_statuses(&mut self, actor_id: CombatantId, planned: Vec<PlannedStatus>) {
        let potency = self
            .state
            .get(actor_id)
            .map_or(0, |c| c.stat(Stat::MagicAttack));

        for status in planned {
            let Some(recipient) = self.state.get_mut(status.recipient) else {
                continue;
            };
            if !recipient.is_alive() {
                continue;
            }
            if !status.lands {
                self.events.push(BattleEvent::StatusResisted {
                    target: status.recipient,
                    status: status.template.id.clone(),
                });
                continue;
            }
            status::apply(
                recipient,
                &status.template,
                Application {
                    duration: status.duration,
                    source: Some(actor_id),
                    potency,
                },
                self.events,
            );
        }
    }

    fn heal(&mut self, target_id: CombatantId, resource: Resource, amount: u32) {
        let Some(target) = self.state.get_mut(target_id) else {
            return;
        };
        if !target.is_alive() {
            return;
        }
        let (restored, cleared) = match resource {
            Resource::Hp => (target.heal(amount), false),
            Resource::Mp => (target.restore_mp(amount), false),
            Resource::Brave => {
                let before = target.brave;
                let cleared = target.gain_brave(amount);
                (target.brave - before, cleared)
            }
        };
        self.events.push(BattleEvent::Healed {
            target: target_id,
            resource,
            amount: restored,
        });
        if cleared {
            self.events.push(BattleEvent::BreakCleared { target: target_id });
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn ensure_known(&self, request: &ActionRequest) -> Result<(), BattleError> {
        std::iter::once(&request.actor)
            .chain(request.targets.iter())
            .try_for_each(|id| {
                self.state
                    .get(*id)
                    .map(|_| ())
                    .ok_or(BattleError::UnknownCombatant(*id))
            })
    }

    fn lookup_skill(&self, id: &SkillId) -> Result<SkillDefinition, BattleError> {
        self.env
            .skills()?
            .skill(id)
            .ok_or_else(|| BattleError::UnknownSkill(id.clone()))
    }

    fn lookup_item(&self, id: &ItemId) -> Result<ItemDefinition, BattleError> {
        self.env
            .items()?
            .item(id)
            .ok_or_else(|| BattleError::UnknownItem(id.clone()))
    }

    fn lookup_statuses(
        &self,
        applications: &[StatusApplication],
    ) -> Result<Vec<(StatusApplication, StatusTemplate)>, BattleError> {
        if applications.is_empty() {
            return Ok(Vec::new());
        }
        let oracle = self.env.statuses()?;
        applications
            .iter()
            .map(|application| {
                oracle
                    .status(&application.status)
                    .map(|template| (application.clone(), template))
                    .ok_or_else(|| BattleError::UnknownStatus(application.status.clone()))
            })
            .collect()
    }

    /// The first requested target, if it is a living opponent.
    fn hostile_target(&self, request: &ActionRequest) -> Option<CombatantId> {
        let team: Team = self.state.get(request.actor)?.team;
        let target = *request.targets.first()?;
        let combatant = self.state.get(target)?;
        (combatant.is_alive() && combatant.team != team).then_some(target)
    }

    fn declare(&mut self, request: &ActionRequest) {
        self.events.push(BattleEvent::ActionDeclared {
            actor: request.actor,
            action: request.kind.clone(),
            targets: request.targets.clone(),
        });
    }

    fn fail(&mut self, actor: CombatantId, reason: FailureReason) -> Commit {
        self.events.push(BattleEvent::ActionFailed { actor, reason });
        Commit::Failed(reason)
    }
}

fn landed_targets(hits: &[PlannedHit]) -> Vec<CombatantId> {
    hits.iter().filter(|h| h.hit).map(|h| h.target).collect()
}
