//! ATB gauge scheduler.
//!
//! The scheduler only touches gauge fields: `atb_gauge`, `gauge_carry`,
//! `cooldown`, `recovery` and cast progress. It never resolves actions or
//! ticks statuses; it reports who crossed a boundary and lets the battle
//! session do the rest.
//!
//! # Gain
//!
//! ```text
//! scaled = effective_speed × delta × fill_rate + carry
//! gain   = scaled / average_effective_speed_of_living
//! carry  = scaled % average_effective_speed_of_living
//! ```
//!
//! Effective speeds are snapshotted once per `advance`, before any gauge
//! moves, so the order combatants are visited in cannot matter.

use crate::action::ActionRequest;
use crate::config::BattleConfig;
use crate::state::{BattleState, CastState, Combatant, CombatantId};

/// Who crossed a boundary during one `advance`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Hard-disabled combatants whose recovery meter filled.
    pub recovered: Vec<CombatantId>,
    /// Casters whose cast reached 100%.
    pub completed_casts: Vec<CombatantId>,
}

/// Result of an interrupt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interrupted {
    pub request: ActionRequest,
    pub refund: u32,
}

pub struct GaugeScheduler<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
}

impl<'a> GaugeScheduler<'a> {
    pub fn new(state: &'a mut BattleState, config: &'a BattleConfig) -> Self {
        Self { state, config }
    }

    /// A combatant may take a turn now.
    pub fn is_ready(combatant: &Combatant, config: &BattleConfig) -> bool {
        combatant.is_alive()
            && combatant.atb_gauge >= config.atb_max
            && !combatant.is_casting()
            && !combatant.disables.is_hard()
    }

    /// Mean effective speed of the living, at least 1.
    pub fn average_speed(&self) -> u64 {
        let (sum, count) = self
            .state
            .living()
            .fold((0u64, 0u64), |(sum, count), c| {
                (sum + u64::from(c.effective_speed(self.config)), count + 1)
            });
        if count == 0 { 1 } else { (sum / count).max(1) }
    }

    /// Grow every living gauge by `delta` ticks.
    pub fn advance(&mut self, delta: u32) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let average = self.average_speed();
        let atb_max = self.config.atb_max;

        let speeds: Vec<u64> = self
            .state
            .combatants
            .iter()
            .map(|c| u64::from(c.effective_speed(self.config)))
            .collect();

        for (combatant, speed) in self.state.combatants.iter_mut().zip(speeds) {
            if !combatant.is_alive() {
                continue;
            }
            if combatant.cooldown > 0 {
                combatant.cooldown = combatant.cooldown.saturating_sub(delta);
                continue;
            }

            let scaled = speed * u64::from(delta) * u64::from(self.config.fill_rate)
                + combatant.gauge_carry;
            let gain = u32::try_from(scaled / average).unwrap_or(u32::MAX);
            combatant.gauge_carry = scaled % average;

            if combatant.disables.is_hard() {
                combatant.recovery = combatant.recovery.saturating_add(gain).min(atb_max);
                if combatant.recovery >= atb_max {
                    report.recovered.push(combatant.id);
                }
            } else if let Some(cast) = combatant.cast.as_mut() {
                cast.accrued = cast.accrued.saturating_add(gain).min(cast.duration);
                if cast.is_complete() {
                    report.completed_casts.push(combatant.id);
                }
            } else {
                combatant.atb_gauge = combatant.atb_gauge.saturating_add(gain).min(atb_max);
                if combatant.atb_gauge == atb_max {
                    combatant.gauge_carry = 0;
                }
            }
        }

        self.state.tick = self.state.tick + u64::from(delta);
        report
    }

    /// Next actor among the ready: highest effective speed, ties to the
    /// first registered.
    pub fn pick_next_actor(&self) -> Option<CombatantId> {
        let mut best: Option<(u32, CombatantId)> = None;
        for combatant in self.state.iter() {
            if !Self::is_ready(combatant, self.config) {
                continue;
            }
            let speed = combatant.effective_speed(self.config);
            if best.is_none_or(|(best_speed, _)| speed > best_speed) {
                best = Some((speed, combatant.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Park a request as a cast. The gauge is held until it completes.
    pub fn start_cast(&mut self, request: ActionRequest, duration: u32, mp_paid: u32) {
        if let Some(caster) = self.state.get_mut(request.actor) {
            caster.cast = Some(CastState {
                start_gauge: caster.atb_gauge,
                request,
                duration,
                accrued: 0,
                mp_paid,
            });
        }
    }

    /// Take a completed cast off its caster.
    pub fn take_completed_cast(&mut self, id: CombatantId) -> Option<CastState> {
        let caster = self.state.get_mut(id)?;
        if caster.cast.as_ref().is_some_and(CastState::is_complete) {
            caster.cast.take()
        } else {
            None
        }
    }

    /// Cancel a cast and refund part of the gauge held at cast start.
    pub fn interrupt(&mut self, id: CombatantId) -> Option<Interrupted> {
        let caster = self.state.get_mut(id)?;
        let cast = caster.cast.take()?;
        let refund = (u64::from(cast.start_gauge) * u64::from(self.config.cast_refund_percent)
            / 100) as u32;
        caster.atb_gauge = refund.min(self.config.atb_max);
        caster.gauge_carry = 0;
        Some(Interrupted {
            request: cast.request,
            refund,
        })
    }

    /// Reset the gauge after a turn and start the global cooldown.
    pub fn complete_turn(&mut self, id: CombatantId) {
        if let Some(actor) = self.state.get_mut(id) {
            actor.atb_gauge = 0;
            actor.gauge_carry = 0;
            actor.cooldown = self.config.global_cooldown;
            actor.turns_taken += 1;
        }
    }

    /// Reset the recovery meter after a skipped turn.
    pub fn complete_skip(&mut self, id: CombatantId) {
        if let Some(actor) = self.state.get_mut(id) {
            actor.recovery = 0;
        }
    }
}
