//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up the command channel and
//! the event bus, and asks the team providers for actions whenever a turn
//! opens. It exposes a builder-based API for clients to drive a battle.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use battle_content::Encounter;
use battle_core::{
    ActionRequest, Battle, BattleConfig, BattleEnv, BattleError, CombatantSpec, ContentTables,
    PcgRng, StepOutcome, Team,
};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::summary::BattleSummary;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// `run` gives up after this many engine steps.
    pub step_limit: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
            step_limit: 100_000,
        }
    }
}

/// Drives one battle to completion.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients that only
/// observe or inject external effects.
pub struct BattleRuntime {
    handle: RuntimeHandle,
    tables: Arc<ContentTables>,
    rng: PcgRng,
    step_limit: u64,

    // Action providers (injected by user)
    ally_provider: Option<Box<dyn ActionProvider>>,
    enemy_provider: Option<Box<dyn ActionProvider>>,

    worker_handle: JoinHandle<()>,
}

impl BattleRuntime {
    /// Create a new runtime builder
    pub fn builder() -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    fn provider(&self, team: Team) -> Result<&dyn ActionProvider> {
        let provider = match team {
            Team::Ally => self.ally_provider.as_deref(),
            Team::Enemy => self.enemy_provider.as_deref(),
        };
        provider.ok_or(RuntimeError::ProviderNotSet { team })
    }

    /// Execute a single engine step.
    ///
    /// When the step opens a turn, the actor's team provider is asked for an
    /// action and it is submitted before returning. A request the engine
    /// rejects as a contract violation is replaced by Wait.
    pub async fn step(&mut self) -> Result<StepOutcome> {
        let result = self.handle.step().await?;
        let StepOutcome::AwaitingAction(actor) = result.outcome else {
            return Ok(result.outcome);
        };

        let state = self.handle.query_state().await?;
        let team = state
            .get(actor)
            .map(|c| c.team)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        let provider = self.provider(team)?;
        let env = BattleEnv::from_tables(&self.tables, &self.rng);
        let request = provider.provide_action(actor, &state, env).await?;

        debug!(
            target: "battle_runtime",
            %actor,
            %team,
            action = request.kind.as_str(),
            "provider chose"
        );

        match self.handle.submit(request.clone()).await {
            Ok(_) => {}
            Err(RuntimeError::Battle(error)) if error != BattleError::BattleFinished => {
                warn!(
                    target: "battle_runtime",
                    %actor,
                    ?request,
                    %error,
                    "provider action rejected, waiting instead"
                );
                self.handle.submit(ActionRequest::wait(actor)).await?;
            }
            Err(error) => return Err(error),
        }
        Ok(result.outcome)
    }

    /// Step until one side is wiped out.
    ///
    /// # Errors
    ///
    /// `StepLimit` if the battle is still running after the configured
    /// number of steps.
    pub async fn run(&mut self) -> Result<BattleSummary> {
        for _ in 0..self.step_limit {
            match self.step().await {
                Ok(StepOutcome::Finished(_)) | Err(RuntimeError::Battle(BattleError::BattleFinished)) => {
                    return self.handle.summary().await;
                }
                Ok(_) => {}
                Err(error) => return Err(error),
            }
        }
        Err(RuntimeError::StepLimit {
            limit: self.step_limit,
        })
    }

    /// Set the ally action provider
    pub fn set_ally_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.ally_provider = Some(Box::new(provider));
    }

    /// Set the enemy action provider
    pub fn set_enemy_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.enemy_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every cloned [`RuntimeHandle`] is dropped too.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct BattleRuntimeBuilder {
    config: RuntimeConfig,
    roster: Vec<CombatantSpec>,
    seed: u64,
    tables: Arc<ContentTables>,
    ally_provider: Option<Box<dyn ActionProvider>>,
    enemy_provider: Option<Box<dyn ActionProvider>>,
}

impl BattleRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: Vec::new(),
            seed: 0,
            tables: Arc::new(ContentTables::new()),
            ally_provider: None,
            enemy_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the battle rules
    pub fn battle_config(mut self, battle: BattleConfig) -> Self {
        self.config.battle = battle;
        self
    }

    pub fn roster(mut self, roster: Vec<CombatantSpec>) -> Self {
        self.roster = roster;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Roster and, if the encounter fixes one, seed.
    pub fn encounter(mut self, encounter: &Encounter) -> Self {
        self.roster = encounter.combatants.clone();
        if let Some(seed) = encounter.seed {
            self.seed = seed;
        }
        self
    }

    pub fn tables(mut self, tables: ContentTables) -> Self {
        self.tables = Arc::new(tables);
        self
    }

    pub fn shared_tables(mut self, tables: Arc<ContentTables>) -> Self {
        self.tables = tables;
        self
    }

    pub fn step_limit(mut self, limit: u64) -> Self {
        self.config.step_limit = limit;
        self
    }

    /// Set ally action provider (optional until an ally turn opens)
    pub fn ally_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.ally_provider = Some(Box::new(provider));
        self
    }

    /// Set enemy action provider (optional until an enemy turn opens)
    pub fn enemy_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.enemy_provider = Some(Box::new(provider));
        self
    }

    /// Build the battle and start the simulation worker.
    pub async fn build(self) -> Result<BattleRuntime> {
        if self.roster.is_empty() {
            return Err(RuntimeError::MissingRoster);
        }

        let rng = PcgRng;
        let battle = Battle::new(
            &self.roster,
            self.config.battle.clone(),
            self.seed,
            BattleEnv::from_tables(&self.tables, &rng),
        )?;
        info!(
            target: "battle_runtime",
            combatants = self.roster.len(),
            seed = self.seed,
            "battle started"
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, bus.clone());

        let worker = SimulationWorker::new(battle, Arc::clone(&self.tables), command_rx, bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(BattleRuntime {
            handle,
            tables: self.tables,
            rng,
            step_limit: self.config.step_limit,
            ally_provider: self.ally_provider,
            enemy_provider: self.enemy_provider,
            worker_handle,
        })
    }
}
