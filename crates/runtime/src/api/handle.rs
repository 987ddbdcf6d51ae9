//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the battle or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{ActionRequest, ApplyOutcome, BattleState, CombatantId, StatusId, StepResult};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::summary::BattleSummary;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Run one engine step without consulting any provider.
    pub async fn step(&self) -> Result<StepResult> {
        self.request(|reply| Command::Step { reply }).await?
    }

    /// Submit an action for the combatant whose turn is open.
    pub async fn submit(&self, request: ActionRequest) -> Result<StepResult> {
        self.request(|reply| Command::Submit { request, reply })
            .await?
    }

    /// Cancel a cast. Returns the refunded gauge, if a cast was running.
    pub async fn interrupt(&self, id: CombatantId) -> Result<Option<u32>> {
        self.request(|reply| Command::Interrupt { id, reply }).await?
    }

    /// Apply a status by id, e.g. an encounter opener.
    pub async fn apply_status(
        &self,
        target: CombatantId,
        status: impl Into<StatusId>,
        duration: Option<u32>,
    ) -> Result<ApplyOutcome> {
        let status = status.into();
        self.request(|reply| Command::ApplyStatus {
            target,
            status,
            duration,
            reply,
        })
        .await?
    }

    /// Query the current battle state (read-only snapshot)
    pub async fn query_state(&self) -> Result<BattleState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Outcome report for the battle so far.
    pub async fn summary(&self) -> Result<BattleSummary> {
        self.request(|reply| Command::Summary { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Damage, Break, heals, defeats
    /// - `Topic::Turn` - Turn readiness, skips, casts, battle end
    /// - `Topic::Status` - Status applications, ticks, expiry
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use battle_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
