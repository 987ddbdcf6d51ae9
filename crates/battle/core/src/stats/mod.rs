//! Stat system: base stats plus a temporary bonus layer.
//!
//! # Architecture
//!
//! ```text
//! [ CombatStats (base snapshot from the roster) ]
//!      ↓
//! [ StatBonuses (buffs/debuffs, added and subtracted exactly) ]
//!      ↓
//! [ Effective stat = clamp((base + flat) × (100 + increased%) / 100) ]
//! ```
//!
//! ## Principles
//!
//! 1. **Base stats are never written** after the battle starts
//! 2. **Bonuses are reversible**: every contribution is subtracted on expiry,
//!    so buff churn cannot drift the effective value
//! 3. **Deterministic**: integer arithmetic only

pub mod bonus;
pub mod core;

pub use bonus::{Bonus, StatBonuses, StatBounds};
pub use core::{CombatStats, Stat};
