//! Status effect data.
//!
//! Templates come from content tables keyed by [`StatusId`]; instances are
//! stamped from a template when applied and owned by the combatant they sit
//! on. Durations count the owner's turns, not ticks.

use arrayvec::ArrayVec;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::config::BattleConfig;
use crate::stats::{Bonus, Stat};

use super::common::{CombatantId, StatusId};

/// Closed set of effect kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    Buff,
    Debuff,
    Dot,
    Hot,
    Poison,
    Burn,
    Stun,
    Silence,
    Freeze,
    Paralyze,
    Sleep,
    Blind,
    Confusion,
    Shield,
    Haste,
    Slow,
}

impl StatusKind {
    /// Periodic payloads of this kind restore HP instead of removing it.
    pub const fn restores(self) -> bool {
        matches!(self, Self::Hot)
    }
}

/// Turn boundary at which a status is processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPhase {
    TurnStart,
    TurnEnd,
}

/// When a periodic payload fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickTiming {
    #[default]
    TurnStart,
    TurnEnd,
    Both,
}

impl TickTiming {
    pub const fn fires_at(self, phase: TickPhase) -> bool {
        matches!(
            (self, phase),
            (Self::Both, _)
                | (Self::TurnStart, TickPhase::TurnStart)
                | (Self::TurnEnd, TickPhase::TurnEnd)
        )
    }
}

/// How a periodic amount is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PeriodicMode {
    /// Flat HP per stack.
    #[default]
    Fixed,
    /// Percent of the owner's max HP per stack.
    Percent,
    /// Percent of the source's magic attack, captured at application.
    Scaled,
}

/// Payload carried by an effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Magnitude {
    #[default]
    None,
    Periodic {
        amount: u32,
        mode: PeriodicMode,
    },
    Stat {
        stat: Stat,
        bonus: Bonus,
    },
    /// Speed factor in percent. Haste multiplies speed by it, Slow divides
    /// speed by it, so both use values above 100.
    Speed {
        percent: u32,
    },
    /// HP absorbed per stack before the owner takes damage.
    Shield {
        amount: u32,
    },
}

/// Static description of a status, as stored in content tables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTemplate {
    pub id: StatusId,
    pub name: String,
    pub kind: StatusKind,
    /// Default duration in owner turns.
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude: Magnitude,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub max_stacks: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_timing: TickTiming,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

impl StatusTemplate {
    pub fn new(id: impl Into<StatusId>, name: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            duration: 1,
            magnitude: Magnitude::None,
            stackable: false,
            max_stacks: 1,
            tick_timing: TickTiming::TurnStart,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_magnitude(mut self, magnitude: Magnitude) -> Self {
        self.magnitude = magnitude;
        self
    }

    #[must_use]
    pub fn stacking(mut self, max_stacks: u32) -> Self {
        self.stackable = true;
        self.max_stacks = max_stacks.max(1);
        self
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TickTiming) -> Self {
        self.tick_timing = timing;
        self
    }
}

/// A status instance on a combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: StatusId,
    pub name: String,
    pub kind: StatusKind,
    /// Owner turns left.
    pub duration: u32,
    pub max_duration: u32,
    pub magnitude: Magnitude,
    pub stackable: bool,
    pub max_stacks: u32,
    pub current_stacks: u32,
    pub tick_timing: TickTiming,
    /// Magic attack of the source when the effect was applied.
    pub potency: i32,
    pub source: Option<CombatantId>,
    /// Stacks whose stat bonus is currently in the owner's bonus layer.
    pub applied_units: u32,
    /// Remaining absorption for [`Magnitude::Shield`].
    pub shield: u32,
}

impl StatusEffect {
    /// Stamp a fresh single-stack instance from a template.
    pub fn from_template(
        template: &StatusTemplate,
        duration: u32,
        source: Option<CombatantId>,
        potency: i32,
    ) -> Self {
        let duration = duration.max(1);
        let shield = match template.magnitude {
            Magnitude::Shield { amount } => amount,
            _ => 0,
        };
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            kind: template.kind,
            duration,
            max_duration: duration,
            magnitude: template.magnitude,
            stackable: template.stackable,
            max_stacks: template.max_stacks.max(1),
            current_stacks: 1,
            tick_timing: template.tick_timing,
            potency,
            source,
            applied_units: 0,
            shield,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.duration == 0
    }

    /// Refresh duration to the longer of the current and the new one.
    pub fn refresh(&mut self, duration: u32) {
        let duration = duration.max(1);
        if duration >= self.duration {
            self.duration = duration;
            self.max_duration = self.max_duration.max(duration);
        }
    }

    /// HP moved by one firing of a periodic payload, before direction.
    pub fn periodic_amount(&self, owner_max_hp: u32) -> u32 {
        let Magnitude::Periodic { amount, mode } = self.magnitude else {
            return 0;
        };
        if amount == 0 {
            return 0;
        }
        let per_stack = match mode {
            PeriodicMode::Fixed => u64::from(amount),
            PeriodicMode::Percent => u64::from(owner_max_hp) * u64::from(amount) / 100,
            PeriodicMode::Scaled => {
                u64::from(amount) * u64::from(u32::try_from(self.potency.max(0)).unwrap_or(0))
                    / 100
            }
        };
        let total = per_stack.max(1) * u64::from(self.current_stacks);
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Speed multiplier this effect contributes, if any.
    pub fn speed_percent(&self) -> Option<u32> {
        match (self.kind, self.magnitude) {
            (StatusKind::Haste | StatusKind::Slow, Magnitude::Speed { percent }) => Some(percent),
            _ => None,
        }
    }
}

/// Ordered effect list of one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn get(&self, id: &StatusId) -> Option<&StatusEffect> {
        self.effects.iter().find(|effect| &effect.id == id)
    }

    pub fn get_mut(&mut self, id: &StatusId) -> Option<&mut StatusEffect> {
        self.effects.iter_mut().find(|effect| &effect.id == id)
    }

    /// Append an effect. Hands it back when the list is full.
    pub fn push(&mut self, effect: StatusEffect) -> Result<(), StatusEffect> {
        self.effects.try_push(effect).map_err(|err| err.element())
    }

    /// Remove every effect matching the predicate, preserving order, and
    /// return them in their original order.
    pub fn drain_where(
        &mut self,
        mut predicate: impl FnMut(&StatusEffect) -> bool,
    ) -> Vec<StatusEffect> {
        let mut removed = Vec::new();
        let mut kept = ArrayVec::new();
        for effect in self.effects.drain(..) {
            if predicate(&effect) {
                removed.push(effect);
            } else {
                kept.push(effect);
            }
        }
        self.effects = kept;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poison() -> StatusTemplate {
        StatusTemplate::new("poison", "Poison", StatusKind::Poison)
            .with_duration(5)
            .with_magnitude(Magnitude::Periodic {
                amount: 15,
                mode: PeriodicMode::Fixed,
            })
            .stacking(3)
    }

    #[test]
    fn periodic_amount_scales_with_stacks() {
        let mut effect = StatusEffect::from_template(&poison(), 5, None, 0);
        assert_eq!(effect.periodic_amount(200), 15);
        effect.current_stacks = 3;
        assert_eq!(effect.periodic_amount(200), 45);
    }

    #[test]
    fn percent_and_scaled_modes() {
        let regen = StatusTemplate::new("regen", "Regen", StatusKind::Hot).with_magnitude(
            Magnitude::Periodic {
                amount: 10,
                mode: PeriodicMode::Percent,
            },
        );
        let effect = StatusEffect::from_template(&regen, 3, None, 0);
        assert_eq!(effect.periodic_amount(250), 25);
        // tiny pools still move at least one point
        assert_eq!(effect.periodic_amount(5), 1);

        let burn = StatusTemplate::new("burn", "Burn", StatusKind::Burn).with_magnitude(
            Magnitude::Periodic {
                amount: 50,
                mode: PeriodicMode::Scaled,
            },
        );
        let effect = StatusEffect::from_template(&burn, 3, Some(CombatantId(1)), 80);
        assert_eq!(effect.periodic_amount(1000), 40);
    }

    #[test]
    fn zero_duration_is_clamped_and_refresh_keeps_longer() {
        let mut effect = StatusEffect::from_template(&poison(), 0, None, 0);
        assert_eq!(effect.duration, 1);

        effect.refresh(4);
        assert_eq!(effect.duration, 4);
        effect.refresh(2);
        assert_eq!(effect.duration, 4);
    }

    #[test]
    fn timing_matches_phase() {
        assert!(TickTiming::Both.fires_at(TickPhase::TurnEnd));
        assert!(TickTiming::TurnStart.fires_at(TickPhase::TurnStart));
        assert!(!TickTiming::TurnStart.fires_at(TickPhase::TurnEnd));
    }

    #[test]
    fn full_list_hands_effect_back() {
        let mut list = StatusEffects::empty();
        for i in 0..BattleConfig::MAX_STATUS_EFFECTS {
            let template = StatusTemplate::new(format!("s{i}").as_str(), "s", StatusKind::Buff);
            assert!(list.push(StatusEffect::from_template(&template, 1, None, 0)).is_ok());
        }
        let extra = StatusTemplate::new("extra", "extra", StatusKind::Buff);
        let rejected = list.push(StatusEffect::from_template(&extra, 1, None, 0));
        assert_eq!(rejected.map_err(|e| e.id), Err(StatusId::new("extra")));
    }

    #[test]
    fn drain_where_preserves_order() {
        let mut list = StatusEffects::empty();
        for (id, kind) in [("a", StatusKind::Poison), ("b", StatusKind::Buff), ("c", StatusKind::Burn)] {
            let template = StatusTemplate::new(id, id, kind);
            list.push(StatusEffect::from_template(&template, 1, None, 0)).unwrap();
        }
        let removed = list.drain_where(|e| e.kind != StatusKind::Buff);
        let ids: Vec<_> = removed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(list.len(), 1);
    }
}
