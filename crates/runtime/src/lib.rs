//! Async orchestration for the deterministic battle engine.
//!
//! This crate wires together the action provider abstraction, content
//! tables, and a simulation worker into a cohesive runtime API. Consumers
//! embed [`BattleRuntime`] to drive a battle, subscribe to events, and inject
//! external effects through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus for battle events
//! - [`providers`] contains scripted and AI action providers
//! - [`summary`] is the end-of-battle report
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;
pub mod summary;

mod workers;

pub use api::{ActionProvider, Result, RuntimeError, RuntimeHandle, WaitActionProvider};
pub use events::{Event, EventBus, Topic};
pub use providers::{BraveAiProvider, ScriptedActionProvider};
pub use runtime::{BattleRuntime, BattleRuntimeBuilder, RuntimeConfig};
pub use summary::{BattleSummary, CombatantSummary};
