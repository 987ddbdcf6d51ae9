//! Combat formulas.
//!
//! This module provides pure functions for resolving combat interactions.
//! Every function is deterministic given its numeric inputs; randomness is
//! always passed in as an explicit roll.
//!
//! # Core Functions
//!
//! - `hit_chance` / `evasion_rate`: Accuracy vs Evasion
//! - `calculate_damage`: Brave damage from attack/defense ratio
//! - `hp_attack_damage`: Conversion of a BRV pool into HP damage
//! - `critical_chance` / `roll_critical_tier`: Critical rate and tiers
//! - `element_multiplier`: Attack element vs defense element chart
//! - `cast_time`: Skill cast duration in ATB-percent units

pub mod cast;
pub mod critical;
pub mod damage;
pub mod element;
pub mod hit;

pub use cast::cast_time;
pub use critical::{
    BASE_CRIT_CHANCE_BP, CriticalTier, JobClass, combined_crit_percent, critical_chance,
    roll_critical_tier,
};
pub use damage::{DamageType, calculate_damage, hp_attack_damage};
pub use element::{Element, element_multiplier};
pub use hit::{check_hit, evasion_rate, hit_chance};
