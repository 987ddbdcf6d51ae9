//! Simulation worker that owns the authoritative [`battle_core::Battle`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives the engine, and
//! publishes every produced [`BattleEvent`] on the [`EventBus`]. The battle
//! is only ever touched from this task, one command at a time.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use battle_core::{
    ActionRequest, ApplyOutcome, Battle, BattleEnv, BattleEvent, BattleState, CombatantId,
    ContentTables, PcgRng, StatusId, StepOutcome, StepResult,
};

use crate::api::Result;
use crate::events::{Event, EventBus};
use crate::summary::BattleSummary;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Run one engine step.
    Step {
        reply: oneshot::Sender<Result<StepResult>>,
    },
    /// Submit the action for the combatant whose turn is open.
    Submit {
        request: ActionRequest,
        reply: oneshot::Sender<Result<StepResult>>,
    },
    /// Cancel a cast from outside the action flow.
    Interrupt {
        id: CombatantId,
        reply: oneshot::Sender<Result<Option<u32>>>,
    },
    /// Apply a status from outside the action flow.
    ApplyStatus {
        target: CombatantId,
        status: StatusId,
        duration: Option<u32>,
        reply: oneshot::Sender<Result<ApplyOutcome>>,
    },
    /// Query the current battle state (read-only).
    QueryState { reply: oneshot::Sender<BattleState> },
    /// Build an outcome report.
    Summary {
        reply: oneshot::Sender<BattleSummary>,
    },
}

/// Background task that processes battle commands.
pub struct SimulationWorker {
    battle: Battle,
    tables: Arc<ContentTables>,
    rng: PcgRng,
    steps: u64,
    command_rx: mpsc::Receiver<Command>,
    bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        battle: Battle,
        tables: Arc<ContentTables>,
        command_rx: mpsc::Receiver<Command>,
        bus: EventBus,
    ) -> Self {
        Self {
            battle,
            tables,
            rng: PcgRng,
            steps: 0,
            command_rx,
            bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "battle_runtime::worker", steps = self.steps, "simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Step { reply } => {
                let result = self.step();
                let _ = reply.send(result);
            }
            Command::Submit { request, reply } => {
                let result = self.submit(request);
                let _ = reply.send(result);
            }
            Command::Interrupt { id, reply } => {
                let result = self.interrupt(id);
                let _ = reply.send(result);
            }
            Command::ApplyStatus {
                target,
                status,
                duration,
                reply,
            } => {
                let result = self.apply_status(target, &status, duration);
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.battle.state().clone());
            }
            Command::Summary { reply } => {
                let _ = reply.send(BattleSummary::from_battle(&self.battle, self.steps));
            }
        }
    }

    fn step(&mut self) -> Result<StepResult> {
        let env = BattleEnv::from_tables(&self.tables, &self.rng);
        let result = self.battle.step(env)?;
        self.steps += 1;

        debug!(
            target: "battle_runtime::worker",
            step = self.steps,
            clock = %self.battle.state().tick,
            outcome = ?result.outcome,
            events = result.events.len(),
            "step"
        );
        if let StepOutcome::Finished(winner) = result.outcome {
            info!(
                target: "battle_runtime::worker",
                %winner,
                steps = self.steps,
                clock = %self.battle.state().tick,
                "battle finished"
            );
        }

        self.publish(&result.events);
        Ok(result)
    }

    fn submit(&mut self, request: ActionRequest) -> Result<StepResult> {
        let env = BattleEnv::from_tables(&self.tables, &self.rng);
        debug!(
            target: "battle_runtime::worker",
            actor = %request.actor,
            action = request.kind.as_str(),
            "submit"
        );
        let result = self.battle.submit(request, env)?;
        self.publish(&result.events);
        Ok(result)
    }

    fn interrupt(&mut self, id: CombatantId) -> Result<Option<u32>> {
        let (refund, events) = self.battle.interrupt(id)?;
        self.publish(&events);
        Ok(refund)
    }

    fn apply_status(
        &mut self,
        target: CombatantId,
        status: &StatusId,
        duration: Option<u32>,
    ) -> Result<ApplyOutcome> {
        let env = BattleEnv::from_tables(&self.tables, &self.rng);
        let (outcome, events) = self.battle.apply_status(target, status, duration, env)?;
        self.publish(&events);
        Ok(outcome)
    }

    fn publish(&self, events: &[BattleEvent]) {
        let clock = self.battle.state().tick;
        for event in events {
            self.bus.publish(Event {
                step: self.steps,
                clock,
                event: event.clone(),
            });
        }
    }
}
