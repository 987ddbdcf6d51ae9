//! Status effect engine: application, stacking, turn ticks, cleanse and
//! shield absorption.
//!
//! Every function takes the owning [`Combatant`] and pushes what happened
//! into an event buffer. After any change to the effect list the owner's
//! disable flags are re-derived, and stat bonuses are kept in lockstep with
//! `applied_units` so expiry removes exactly what was added.

use crate::event::BattleEvent;
use crate::state::{
    Combatant, CombatantId, Magnitude, StatusEffect, StatusKind, StatusTemplate, TickPhase,
};
use crate::stats::StatBonuses;

/// What [`apply`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Added,
    Stacked,
    /// Already present (non-stackable or at max stacks); duration refreshed.
    Refreshed,
    /// The effect list was full.
    Rejected,
}

/// Parameters of one application.
#[derive(Clone, Copy, Debug, Default)]
pub struct Application {
    /// Overrides the template duration.
    pub duration: Option<u32>,
    pub source: Option<CombatantId>,
    /// Source magic attack for scaled payloads.
    pub potency: i32,
}

/// Apply a status template to a combatant.
///
/// - not present: appended, or rejected when the list is full
/// - present, non-stackable: duration becomes the longer of old and new
/// - present, stackable below max: one more stack, duration refreshed
/// - present, stackable at max: duration refreshed, stacks unchanged
pub fn apply(
    owner: &mut Combatant,
    template: &StatusTemplate,
    application: Application,
    events: &mut Vec<BattleEvent>,
) -> ApplyOutcome {
    let duration = application.duration.unwrap_or(template.duration).max(1);

    let outcome = match owner.status_effects.get_mut(&template.id) {
        Some(effect) => {
            let outcome = if effect.stackable && effect.current_stacks < effect.max_stacks {
                effect.current_stacks += 1;
                ApplyOutcome::Stacked
            } else {
                ApplyOutcome::Refreshed
            };
            effect.refresh(duration);
            refill_shield(effect);
            sync_bonus(effect, &mut owner.bonuses);
            events.push(applied_event(owner.id, effect));
            outcome
        }
        None => {
            let mut effect = StatusEffect::from_template(
                template,
                duration,
                application.source,
                application.potency,
            );
            sync_bonus(&mut effect, &mut owner.bonuses);
            let event = applied_event(owner.id, &effect);
            match owner.status_effects.push(effect) {
                Ok(()) => {
                    events.push(event);
                    ApplyOutcome::Added
                }
                Err(mut rejected) => {
                    remove_bonus(&mut rejected, &mut owner.bonuses);
                    events.push(BattleEvent::StatusRejected {
                        target: owner.id,
                        status: template.id.clone(),
                    });
                    ApplyOutcome::Rejected
                }
            }
        }
    };

    owner.refresh_disables();
    outcome
}

/// Process one turn boundary for the owner.
///
/// Payloads fire in list order when their timing matches the phase.
/// Durations count down at turn end; expired effects are removed after the
/// pass. Returns total HP lost.
pub fn tick(owner: &mut Combatant, phase: TickPhase, events: &mut Vec<BattleEvent>) -> u32 {
    let mut lost = 0u32;

    for effect in owner.status_effects.iter_mut() {
        if effect.tick_timing.fires_at(phase) && owner.hp > 0 {
            let amount = effect.periodic_amount(owner.max_hp);
            if amount > 0 {
                let restores = effect.kind.restores();
                let moved = if restores {
                    let healed = amount.min(owner.max_hp - owner.hp);
                    owner.hp += healed;
                    healed
                } else {
                    let dealt = amount.min(owner.hp);
                    owner.hp -= dealt;
                    lost += dealt;
                    dealt
                };
                events.push(BattleEvent::StatusTicked {
                    target: owner.id,
                    status: effect.id.clone(),
                    kind: effect.kind,
                    amount: moved,
                    restores,
                    remaining_hp: owner.hp,
                });
            }
        }

        if phase == TickPhase::TurnEnd {
            effect.duration = effect.duration.saturating_sub(1);
        }
    }

    for mut expired in owner.status_effects.drain_where(StatusEffect::is_expired) {
        remove_bonus(&mut expired, &mut owner.bonuses);
        events.push(BattleEvent::StatusExpired {
            target: owner.id,
            status: expired.id,
        });
    }

    owner.refresh_disables();
    lost
}

/// Remove every effect whose kind is listed. Returns how many were removed.
pub fn cleanse(owner: &mut Combatant, kinds: &[StatusKind], events: &mut Vec<BattleEvent>) -> usize {
    let removed = owner
        .status_effects
        .drain_where(|effect| kinds.contains(&effect.kind));
    let count = removed.len();

    for mut effect in removed {
        remove_bonus(&mut effect, &mut owner.bonuses);
        events.push(BattleEvent::StatusCleansed {
            target: owner.id,
            status: effect.id,
        });
    }

    if count > 0 {
        owner.refresh_disables();
    }
    count
}

/// Drain shield pools in list order. Returns the damage soaked.
///
/// Depleted shields are removed and reported as expired.
pub fn absorb(owner: &mut Combatant, damage: u32, events: &mut Vec<BattleEvent>) -> u32 {
    let mut remaining = damage;

    for effect in owner.status_effects.iter_mut() {
        if remaining == 0 {
            break;
        }
        if matches!(effect.magnitude, Magnitude::Shield { .. }) && effect.shield > 0 {
            let soaked = remaining.min(effect.shield);
            effect.shield -= soaked;
            remaining -= soaked;
        }
    }

    let depleted = owner
        .status_effects
        .drain_where(|effect| matches!(effect.magnitude, Magnitude::Shield { .. }) && effect.shield == 0);
    for effect in depleted {
        events.push(BattleEvent::StatusExpired {
            target: owner.id,
            status: effect.id,
        });
    }
    owner.refresh_disables();

    damage - remaining
}

fn applied_event(target: CombatantId, effect: &StatusEffect) -> BattleEvent {
    BattleEvent::StatusApplied {
        target,
        status: effect.id.clone(),
        kind: effect.kind,
        stacks: effect.current_stacks,
        duration: effect.duration,
    }
}

fn refill_shield(effect: &mut StatusEffect) {
    if let Magnitude::Shield { amount } = effect.magnitude {
        effect.shield = effect.shield.max(amount.saturating_mul(effect.current_stacks));
    }
}

/// Bring the bonus layer up to one contribution per stack.
fn sync_bonus(effect: &mut StatusEffect, bonuses: &mut StatBonuses) {
    if let Magnitude::Stat { stat, bonus } = effect.magnitude {
        while effect.applied_units < effect.current_stacks {
            bonuses.add(stat, bonus);
            effect.applied_units += 1;
        }
    }
}

fn remove_bonus(effect: &mut StatusEffect, bonuses: &mut StatBonuses) {
    if let Magnitude::Stat { stat, bonus } = effect.magnitude {
        bonuses.remove(stat, bonus.times(effect.applied_units));
        effect.applied_units = 0;
    }
}
