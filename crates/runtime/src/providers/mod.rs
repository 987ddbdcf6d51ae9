//! Action provider implementations for different combatant behaviors.

pub mod ai;
pub mod scripted;

pub use ai::BraveAiProvider;
pub use scripted::ScriptedActionProvider;
