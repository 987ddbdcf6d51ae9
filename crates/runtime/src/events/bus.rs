//! Topic-based event bus implementation.

use battle_core::{BattleEvent, Tick};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Damage, misses, Break, heals, defeats
    Combat,
    /// Turn flow: readiness, skips, casts, battle end
    Turn,
    /// Status applications, ticks and expiry
    Status,
}

impl Topic {
    pub fn of(event: &BattleEvent) -> Self {
        use BattleEvent::*;
        match event {
            TurnReady { .. }
            | TurnSkipped { .. }
            | ActionDeclared { .. }
            | CastStarted { .. }
            | CastCompleted { .. }
            | CastInterrupted { .. }
            | BattleEnded { .. } => Topic::Turn,
            StatusApplied { .. }
            | StatusRejected { .. }
            | StatusResisted { .. }
            | StatusTicked { .. }
            | StatusExpired { .. }
            | StatusCleansed { .. } => Topic::Status,
            Missed { .. }
            | BraveDamage { .. }
            | Break { .. }
            | BreakCleared { .. }
            | HpDamage { .. }
            | Healed { .. }
            | Defending { .. }
            | ActionFailed { .. }
            | Defeated { .. } => Topic::Combat,
        }
    }
}

/// A battle event stamped with the clock and the runtime step it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub step: u64,
    pub clock: Tick,
    pub event: BattleEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        Topic::of(&self.event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events sent while a
/// topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    combat: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    status: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            combat: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
            status: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Turn => &self.turn,
            Topic::Status => &self.status,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CombatantId, Team};

    fn stamped(event: BattleEvent) -> Event {
        Event {
            step: 1,
            clock: Tick(3),
            event,
        }
    }

    #[tokio::test]
    async fn routes_events_by_topic() {
        let bus = EventBus::new();
        let mut combat = bus.subscribe(Topic::Combat);
        let mut turn = bus.subscribe(Topic::Turn);

        bus.publish(stamped(BattleEvent::Defeated {
            target: CombatantId(1),
        }));
        bus.publish(stamped(BattleEvent::BattleEnded { winner: Team::Ally }));

        let first = combat.recv().await.unwrap();
        assert_eq!(first.topic(), Topic::Combat);
        assert!(combat.try_recv().is_err());

        let second = turn.recv().await.unwrap();
        assert_eq!(
            second.event,
            BattleEvent::BattleEnded { winner: Team::Ally }
        );
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(4);
        for _ in 0..10 {
            bus.publish(stamped(BattleEvent::TurnReady {
                actor: CombatantId(0),
            }));
        }
    }
}
