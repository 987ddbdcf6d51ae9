//! Battle session: turn loop, scheduling and action execution.
//!
//! [`Battle`] is the authoritative owner of [`BattleState`]. One call to
//! [`Battle::step`] does exactly one of:
//!
//! - resolve a completed cast,
//! - open the turn of the next ready actor (TurnStart tick, paralysis roll),
//! - advance every gauge by one tick.
//!
//! When an actor is ready the battle waits for [`Battle::submit`]. The turn
//! closes (TurnEnd tick, gauge reset, global cooldown) once the submitted
//! action resolves or fails, or after its cast completes.

mod errors;
pub mod resolver;
pub mod scheduler;
pub mod status;

pub use errors::BattleError;
pub use resolver::{ActionResolver, Commit};
pub use scheduler::{AdvanceReport, GaugeScheduler, Interrupted};
pub use status::{ApplyOutcome, Application};

use crate::action::{ActionKind, ActionRequest};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, RollContext, RollStream};
use crate::event::BattleEvent;
use crate::state::{
    BattleState, BlockCause, CastState, Combatant, CombatantId, CombatantSpec, StatusId,
    StatusKind, Team, TickPhase,
};

/// What a step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Gauges moved; nobody acted.
    Advanced,
    /// The actor's turn is open and an action must be submitted.
    AwaitingAction(CombatantId),
    /// An action or cast resolved.
    Resolved,
    /// The actor lost its turn.
    TurnSkipped(CombatantId),
    Finished(Team),
}

/// Outcome plus the events produced, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepResult {
    pub outcome: StepOutcome,
    pub events: Vec<BattleEvent>,
}

impl StepResult {
    fn new(outcome: StepOutcome, events: Vec<BattleEvent>) -> Self {
        Self { outcome, events }
    }
}

/// One encounter.
#[derive(Clone, Debug)]
pub struct Battle {
    state: BattleState,
    config: BattleConfig,
    rolls: RollStream,
    awaiting: Option<CombatantId>,
    winner: Option<Team>,
    defeated: Vec<CombatantId>,
}

impl Battle {
    /// Build a battle from a roster. Ids follow roster order.
    ///
    /// Starting gauges are rolled into `[0, start_band_percent]` of the
    /// gauge.
    ///
    /// # Errors
    ///
    /// - `EmptyTeam` if either side has no combatants
    /// - `RosterFull` if the roster exceeds `MAX_COMBATANTS`
    /// - `Oracle` if the environment has no RNG
    pub fn new(
        roster: &[CombatantSpec],
        config: BattleConfig,
        seed: u64,
        env: BattleEnv<'_>,
    ) -> Result<Self, BattleError> {
        if roster.len() > BattleConfig::MAX_COMBATANTS {
            return Err(BattleError::RosterFull {
                max: BattleConfig::MAX_COMBATANTS,
            });
        }
        let has = |team: Team| roster.iter().any(|spec| spec.team == team);
        if !has(Team::Ally) || !has(Team::Enemy) {
            return Err(BattleError::EmptyTeam);
        }

        let rng = env.rng()?;
        let mut rolls = RollStream::new(seed);
        let band = config.percent_of_gauge(config.start_band_percent);

        let mut state = BattleState::new();
        for (index, spec) in roster.iter().enumerate() {
            let id = CombatantId(index as u32);
            let mut combatant = Combatant::from_spec(id, spec);
            combatant.atb_gauge = rolls.below(rng, id.0, RollContext::StartGauge, band + 1);
            state.combatants.push(combatant);
        }

        Ok(Self {
            state,
            config,
            rolls,
            awaiting: None,
            winner: None,
            defeated: Vec::new(),
        })
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.state.get(id)
    }

    /// Actor whose turn is open, if any.
    pub fn awaiting(&self) -> Option<CombatantId> {
        self.awaiting
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Defeated combatants in order of defeat.
    pub fn defeated(&self) -> impl Iterator<Item = &Combatant> {
        self.defeated.iter().filter_map(|id| self.state.get(*id))
    }

    /// Run one scheduling step.
    ///
    /// # Errors
    ///
    /// - `BattleFinished` once a side has been wiped out
    /// - `Oracle` / `Unknown*` if a parked cast references missing content
    pub fn step(&mut self, env: BattleEnv<'_>) -> Result<StepResult, BattleError> {
        if self.winner.is_some() {
            return Err(BattleError::BattleFinished);
        }
        if let Some(actor) = self.awaiting {
            return Ok(StepResult::new(StepOutcome::AwaitingAction(actor), Vec::new()));
        }

        let mut events = Vec::new();

        // completed casts resolve before anyone else acts
        let completed = self
            .state
            .living()
            .find(|c| c.cast.as_ref().is_some_and(CastState::is_complete))
            .map(|c| c.id);
        let cast = completed.and_then(|id| {
            GaugeScheduler::new(&mut self.state, &self.config).take_completed_cast(id)
        });
        if let Some(cast) = cast {
            let caster = cast.request.actor;
            let commit = {
                let mut resolver = ActionResolver::new(
                    &mut self.state,
                    &self.config,
                    env,
                    &mut self.rolls,
                    &mut events,
                )?;
                resolver.complete_cast(cast)?
            };
            self.end_turn(caster, &commit, &mut events);
            return Ok(self.finish_step(StepOutcome::Resolved, events));
        }

        let next = GaugeScheduler::new(&mut self.state, &self.config).pick_next_actor();
        if let Some(actor) = next {
            let outcome = self.begin_turn(actor, env, &mut events)?;
            return Ok(self.finish_step(outcome, events));
        }

        let report = GaugeScheduler::new(&mut self.state, &self.config).advance(1);
        for id in report.recovered {
            self.skip_disabled_turn(id, &mut events);
        }
        Ok(self.finish_step(StepOutcome::Advanced, events))
    }

    /// Submit the action for the actor whose turn is open.
    ///
    /// # Errors
    ///
    /// - `BattleFinished` after the battle ended
    /// - `UnknownCombatant` if the actor or a target is not in the roster
    /// - `ActorNotAwaiting` if it is not this actor's turn
    /// - `UnknownSkill` / `UnknownItem` / `UnknownStatus` / `Oracle` for
    ///   missing content
    ///
    /// On error nothing is mutated and the turn stays open.
    pub fn submit(
        &mut self,
        request: ActionRequest,
        env: BattleEnv<'_>,
    ) -> Result<StepResult, BattleError> {
        if self.winner.is_some() {
            return Err(BattleError::BattleFinished);
        }
        if self.state.get(request.actor).is_none() {
            return Err(BattleError::UnknownCombatant(request.actor));
        }
        if self.awaiting != Some(request.actor) {
            return Err(BattleError::ActorNotAwaiting {
                actor: request.actor,
            });
        }

        let mut events = Vec::new();
        let commit = {
            let mut resolver = ActionResolver::new(
                &mut self.state,
                &self.config,
                env,
                &mut self.rolls,
                &mut events,
            )?;
            resolver.commit(&request)?
        };
        self.awaiting = None;

        match &commit {
            Commit::Cast {
                duration, mp_paid, ..
            } => {
                GaugeScheduler::new(&mut self.state, &self.config)
                    .start_cast(request, *duration, *mp_paid);
            }
            Commit::Resolved { .. } | Commit::Failed(_) => {
                self.end_turn(request.actor, &commit, &mut events);
            }
        }
        Ok(self.finish_step(StepOutcome::Resolved, events))
    }

    /// Cancel a cast from outside the action flow.
    ///
    /// Returns the gauge refunded, or `None` if the combatant was not casting.
    ///
    /// # Errors
    ///
    /// - `BattleFinished` after the battle ended
    /// - `UnknownCombatant` if the id is not in the roster
    /// - `TargetDefeated` if the combatant is at 0 HP
    pub fn interrupt(
        &mut self,
        id: CombatantId,
    ) -> Result<(Option<u32>, Vec<BattleEvent>), BattleError> {
        self.ensure_living(id)?;
        let mut events = Vec::new();
        let interrupted = GaugeScheduler::new(&mut self.state, &self.config).interrupt(id);
        let refund = interrupted.map(|interrupted| {
            if let ActionKind::Skill(skill) = interrupted.request.kind {
                events.push(BattleEvent::CastInterrupted {
                    actor: id,
                    skill,
                    refund: interrupted.refund,
                });
            }
            interrupted.refund
        });
        Ok((refund, events))
    }

    /// Apply a status from outside the action flow, e.g. an encounter opener.
    ///
    /// # Errors
    ///
    /// - `BattleFinished` after the battle ended
    /// - `UnknownCombatant` if the id is not in the roster
    /// - `TargetDefeated` if the combatant is at 0 HP
    /// - `UnknownStatus` / `Oracle` if the status cannot be looked up
    pub fn apply_status(
        &mut self,
        target: CombatantId,
        status: &StatusId,
        duration: Option<u32>,
        env: BattleEnv<'_>,
    ) -> Result<(ApplyOutcome, Vec<BattleEvent>), BattleError> {
        self.ensure_living(target)?;
        let template = env
            .statuses()?
            .status(status)
            .ok_or_else(|| BattleError::UnknownStatus(status.clone()))?;
        let combatant = self
            .state
            .get_mut(target)
            .ok_or(BattleError::UnknownCombatant(target))?;

        let mut events = Vec::new();
        let outcome = status::apply(
            combatant,
            &template,
            Application {
                duration,
                ..Application::default()
            },
            &mut events,
        );
        Ok((outcome, events))
    }

    /// Remove effects of the given kinds from a combatant.
    ///
    /// # Errors
    ///
    /// - `BattleFinished` after the battle ended
    /// - `UnknownCombatant` if the id is not in the roster
    /// - `TargetDefeated` if the combatant is at 0 HP
    pub fn cleanse(
        &mut self,
        target: CombatantId,
        kinds: &[StatusKind],
    ) -> Result<Vec<BattleEvent>, BattleError> {
        self.ensure_living(target)?;
        let combatant = self
            .state
            .get_mut(target)
            .ok_or(BattleError::UnknownCombatant(target))?;
        let mut events = Vec::new();
        status::cleanse(combatant, kinds, &mut events);
        Ok(events)
    }

    /// Guard for effects injected from outside the action flow.
    fn ensure_living(&self, id: CombatantId) -> Result<(), BattleError> {
        if self.winner.is_some() {
            return Err(BattleError::BattleFinished);
        }
        match self.state.get(id) {
            None => Err(BattleError::UnknownCombatant(id)),
            Some(combatant) if !combatant.is_alive() => Err(BattleError::TargetDefeated(id)),
            Some(_) => Ok(()),
        }
    }

    // ========================================================================
    // Turn boundaries
    // ========================================================================

    fn begin_turn(
        &mut self,
        actor: CombatantId,
        env: BattleEnv<'_>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<StepOutcome, BattleError> {
        let rng = env.rng()?;
        let Some(combatant) = self.state.get_mut(actor) else {
            return Err(BattleError::UnknownCombatant(actor));
        };

        combatant.guarding = false;
        status::tick(combatant, TickPhase::TurnStart, events);

        if !combatant.is_alive() {
            return Ok(StepOutcome::Resolved);
        }
        if combatant.disables.paralysis_rolls() {
            let roll = self.rolls.d100(rng, actor.0, RollContext::Paralysis);
            if roll <= self.config.paralyze_skip_percent {
                events.push(BattleEvent::TurnSkipped {
                    actor,
                    cause: BlockCause::Paralyzed,
                });
                self.end_turn(actor, &Commit::Resolved { cooldown: None }, events);
                return Ok(StepOutcome::TurnSkipped(actor));
            }
        }

        events.push(BattleEvent::TurnReady { actor });
        self.awaiting = Some(actor);
        Ok(StepOutcome::AwaitingAction(actor))
    }

    fn end_turn(&mut self, actor: CombatantId, commit: &Commit, events: &mut Vec<BattleEvent>) {
        if let Some(combatant) = self.state.get_mut(actor) {
            if combatant.is_alive() {
                status::tick(combatant, TickPhase::TurnEnd, events);
            }
            combatant.tick_skill_cooldowns();
            if let Commit::Resolved {
                cooldown: Some((skill, turns)),
            } = commit
            {
                combatant.start_skill_cooldown(skill, *turns);
            }
        }
        GaugeScheduler::new(&mut self.state, &self.config).complete_turn(actor);
    }

    /// A hard-disabled combatant's recovery meter filled: the turn is lost
    /// but its statuses still count down.
    fn skip_disabled_turn(&mut self, id: CombatantId, events: &mut Vec<BattleEvent>) {
        let Some(combatant) = self.state.get_mut(id) else {
            return;
        };
        if !combatant.is_alive() {
            return;
        }
        let cause = combatant.disables.hard_cause().unwrap_or(BlockCause::Stunned);
        events.push(BattleEvent::TurnSkipped { actor: id, cause });

        combatant.guarding = false;
        status::tick(combatant, TickPhase::TurnStart, events);
        if combatant.is_alive() {
            status::tick(combatant, TickPhase::TurnEnd, events);
        }
        combatant.tick_skill_cooldowns();
        GaugeScheduler::new(&mut self.state, &self.config).complete_skip(id);
    }

    /// Record defeats and detect the end of the battle.
    fn finish_step(&mut self, outcome: StepOutcome, mut events: Vec<BattleEvent>) -> StepResult {
        for combatant in self.state.combatants.iter_mut() {
            if combatant.hp == 0 && !self.defeated.contains(&combatant.id) {
                combatant.clear_on_defeat();
                self.defeated.push(combatant.id);
                events.push(BattleEvent::Defeated {
                    target: combatant.id,
                });
            }
        }

        if self.awaiting.is_some_and(|id| !self.state.is_alive(id)) {
            self.awaiting = None;
        }

        if let Some(winner) = self.state.winner() {
            self.winner = Some(winner);
            self.awaiting = None;
            events.push(BattleEvent::BattleEnded { winner });
            return StepResult::new(StepOutcome::Finished(winner), events);
        }
        StepResult::new(outcome, events)
    }
}
