//! Topic-based event bus for battle events.
//!
//! Every [`battle_core::BattleEvent`] produced by the simulation worker is
//! stamped with the step and clock it happened at and published to one
//! topic; consumers subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
