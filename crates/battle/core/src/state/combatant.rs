//! Combatant state.
//!
//! A [`Combatant`] is built once from a roster [`CombatantSpec`] and then
//! mutated only by the scheduler, the resolver and the status engine. Base
//! stats are a frozen snapshot; everything temporary lives in the bonus
//! layer, the status list or the scheduling fields.

use crate::action::ActionRequest;
use crate::combat::{DamageType, Element, JobClass};
use crate::config::BattleConfig;
use crate::stats::{CombatStats, Stat, StatBonuses};

use super::common::{CombatantId, SkillId, Team};
use super::disable::Disables;
use super::status::{StatusEffects, StatusKind};

/// Roster snapshot handed to the engine at battle start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    pub team: Team,
    #[cfg_attr(feature = "serde", serde(default = "level_one"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub job: JobClass,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: CombatStats,
    pub max_hp: u32,
    /// Starting HP; defaults to `max_hp`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_mp: u32,
    pub max_brave: u32,
    /// BRV at battle start.
    pub base_brave: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
}

#[cfg(feature = "serde")]
fn level_one() -> u32 {
    1
}

impl CombatantSpec {
    pub fn new(name: impl Into<String>, team: Team) -> Self {
        Self {
            name: name.into(),
            team,
            level: 1,
            job: JobClass::Unclassed,
            element: Element::Neutral,
            stats: CombatStats::default(),
            max_hp: 100,
            hp: None,
            max_mp: 0,
            max_brave: 9999,
            base_brave: 0,
            skills: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self
    }

    #[must_use]
    pub fn with_mp(mut self, max_mp: u32) -> Self {
        self.max_mp = max_mp;
        self
    }

    #[must_use]
    pub fn with_brave(mut self, base_brave: u32, max_brave: u32) -> Self {
        self.base_brave = base_brave;
        self.max_brave = max_brave;
        self
    }

    #[must_use]
    pub fn with_job(mut self, job: JobClass) -> Self {
        self.job = job;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = SkillId>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }
}

/// An action parked until its cast completes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastState {
    pub request: ActionRequest,
    /// Gauge held when the cast began.
    pub start_gauge: u32,
    /// Gauge units of progress needed.
    pub duration: u32,
    pub accrued: u32,
    /// MP taken when the cast started.
    pub mp_paid: u32,
}

impl CastState {
    /// Progress in percent, clamped to `[0, 100]`.
    pub fn progress_percent(&self) -> u32 {
        if self.duration == 0 {
            return 100;
        }
        (u64::from(self.accrued) * 100 / u64::from(self.duration)).min(100) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.accrued >= self.duration
    }
}

/// Live combatant inside a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub team: Team,
    pub level: u32,
    pub job: JobClass,
    pub element: Element,
    pub skills: Vec<SkillId>,

    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub brave: u32,
    pub max_brave: u32,
    pub base_brave: u32,

    pub stats: CombatStats,
    pub bonuses: StatBonuses,

    pub atb_gauge: u32,
    /// Fractional gain left over from the last `advance`, scaled by the
    /// average speed it was divided by.
    pub gauge_carry: u64,
    pub cast: Option<CastState>,
    pub is_broken: bool,
    pub disables: Disables,
    /// Ticks of global cooldown left.
    pub cooldown: u32,
    /// Turn meter used while a hard disable freezes the gauge.
    pub recovery: u32,
    pub guarding: bool,
    pub skill_cooldowns: Vec<(SkillId, u32)>,
    pub status_effects: StatusEffects,
    pub turns_taken: u32,
}

impl Combatant {
    pub fn from_spec(id: CombatantId, spec: &CombatantSpec) -> Self {
        let max_hp = spec.max_hp.max(1);
        let max_brave = spec.max_brave;
        Self {
            id,
            name: spec.name.clone(),
            team: spec.team,
            level: spec.level,
            job: spec.job,
            element: spec.element,
            skills: spec.skills.clone(),
            hp: spec.hp.unwrap_or(max_hp).min(max_hp),
            max_hp,
            mp: spec.max_mp,
            max_mp: spec.max_mp,
            brave: spec.base_brave.min(max_brave),
            max_brave,
            base_brave: spec.base_brave.min(max_brave),
            stats: spec.stats,
            bonuses: StatBonuses::new(),
            atb_gauge: 0,
            gauge_carry: 0,
            cast: None,
            is_broken: false,
            disables: Disables::empty(),
            cooldown: 0,
            recovery: 0,
            guarding: false,
            skill_cooldowns: Vec::new(),
            status_effects: StatusEffects::empty(),
            turns_taken: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_casting(&self) -> bool {
        self.cast.is_some()
    }

    /// Stat after the bonus layer.
    pub fn stat(&self, stat: Stat) -> i32 {
        self.bonuses.effective(&self.stats, stat)
    }

    /// Speed used by the scheduler.
    ///
    /// ```text
    /// effective = speed × haste% / slow% (× confusion%)
    /// ```
    ///
    /// The strongest Haste and the strongest Slow apply; weaker ones are
    /// masked while both are active.
    pub fn effective_speed(&self, config: &BattleConfig) -> u32 {
        let mut haste = 100u64;
        let mut slow = 100u64;
        for effect in self.status_effects.iter() {
            match (effect.kind, effect.speed_percent()) {
                (StatusKind::Haste, Some(p)) => haste = haste.max(u64::from(p)),
                (StatusKind::Slow, Some(p)) => slow = slow.max(u64::from(p)),
                _ => {}
            }
        }

        let base = u64::try_from(self.stat(Stat::Speed)).unwrap_or(1);
        let mut speed = base * haste / slow;
        if self.disables.contains(Disables::CONFUSION) {
            speed = speed * u64::from(config.confusion_speed_percent) / 100;
        }
        u32::try_from(speed.max(1)).unwrap_or(u32::MAX)
    }

    /// Accuracy with the Blind penalty applied.
    pub fn effective_accuracy(&self, config: &BattleConfig) -> i32 {
        let accuracy = self.stat(Stat::Accuracy);
        if self.disables.contains(Disables::BLIND) {
            (accuracy - config.blind_accuracy_penalty).max(0)
        } else {
            accuracy
        }
    }

    /// Offensive stat for a damage type.
    pub fn attack(&self, damage_type: DamageType) -> u32 {
        let value = match damage_type {
            DamageType::Physical => self.stat(Stat::PhysicalAttack),
            DamageType::Magical => self.stat(Stat::MagicAttack),
        };
        u32::try_from(value).unwrap_or(0)
    }

    /// Defensive stat for a damage type, including Defend.
    pub fn defense(&self, damage_type: DamageType, config: &BattleConfig) -> u32 {
        let value = match damage_type {
            DamageType::Physical => self.stat(Stat::PhysicalDefense),
            DamageType::Magical => self.stat(Stat::MagicDefense),
        };
        let value = u64::try_from(value).unwrap_or(0);
        let value = if self.guarding {
            value * u64::from(config.defend_percent) / 100
        } else {
            value
        };
        u32::try_from(value).unwrap_or(u32::MAX)
    }

    /// Remaining cooldown for a skill, in owner turns.
    pub fn skill_cooldown(&self, skill: &SkillId) -> u32 {
        self.skill_cooldowns
            .iter()
            .find(|(id, _)| id == skill)
            .map_or(0, |(_, turns)| *turns)
    }

    pub fn start_skill_cooldown(&mut self, skill: &SkillId, turns: u32) {
        if turns == 0 {
            return;
        }
        match self.skill_cooldowns.iter_mut().find(|(id, _)| id == skill) {
            Some((_, remaining)) => *remaining = turns,
            None => self.skill_cooldowns.push((skill.clone(), turns)),
        }
    }

    /// Count skill cooldowns down by one owner turn.
    pub fn tick_skill_cooldowns(&mut self) {
        for (_, remaining) in &mut self.skill_cooldowns {
            *remaining = remaining.saturating_sub(1);
        }
        self.skill_cooldowns.retain(|(_, remaining)| *remaining > 0);
    }

    /// Re-derive the disable set from the status list.
    pub fn refresh_disables(&mut self) {
        self.disables = Disables::from_effects(self.status_effects.iter());
    }

    /// Add BRV up to the cap. Rebuilding BRV above zero clears Break.
    ///
    /// Returns true if Break was cleared.
    pub fn gain_brave(&mut self, amount: u32) -> bool {
        self.brave = self.brave.saturating_add(amount).min(self.max_brave);
        if self.is_broken && self.brave > 0 {
            self.is_broken = false;
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        let before = self.mp;
        self.mp = self.mp.saturating_add(amount).min(self.max_mp);
        self.mp - before
    }

    /// Drop scheduling state after defeat.
    pub fn clear_on_defeat(&mut self) {
        self.hp = 0;
        self.atb_gauge = 0;
        self.gauge_carry = 0;
        self.cast = None;
        self.recovery = 0;
        self.guarding = false;
    }
}
