//! Skill definitions.

use crate::combat::{DamageType, Element};
use crate::state::{SkillId, StatusId};

pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: &SkillId) -> Option<SkillDefinition>;
}

/// How a skill resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Damages BRV like a Brave attack.
    #[default]
    Brave,
    /// Spends the caster's BRV as HP damage.
    Hp,
    /// Heals and applies statuses; never rolls to hit.
    Support,
}

/// Who a skill lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetScope {
    /// The first requested target, which must be an enemy.
    #[default]
    SingleEnemy,
    AllEnemies,
    /// The first requested target, which must be an ally (or the caster).
    SingleAlly,
    AllAllies,
    Caster,
}

impl TargetScope {
    pub fn is_single(self) -> bool {
        matches!(self, Self::SingleEnemy | Self::SingleAlly)
    }

    pub fn is_hostile(self) -> bool {
        matches!(self, Self::SingleEnemy | Self::AllEnemies)
    }
}

/// Who receives a status riding on a skill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusRecipient {
    #[default]
    Target,
    Caster,
}

/// A status a skill or item may apply.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub status: StatusId,
    /// Chance in percent (100 always lands).
    #[cfg_attr(feature = "serde", serde(default = "always"))]
    pub chance: u32,
    /// Overrides the template duration.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub recipient: StatusRecipient,
}

#[cfg(feature = "serde")]
fn always() -> u32 {
    100
}

impl StatusApplication {
    pub fn new(status: impl Into<StatusId>) -> Self {
        Self {
            status: status.into(),
            chance: 100,
            duration: None,
            recipient: StatusRecipient::Target,
        }
    }

    #[must_use]
    pub fn with_chance(mut self, chance: u32) -> Self {
        self.chance = chance;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn on_caster(mut self) -> Self {
        self.recipient = StatusRecipient::Caster;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub kind: SkillKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    /// Brave power, HP bonus percent, or heal percent of magic attack,
    /// depending on `kind`.
    pub base_power: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp_cost: u32,
    /// Cast time in ATB percent. `None` derives it from power and magic.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast_time: Option<u32>,
    /// Owner turns before the skill can be used again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetScope,
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Vec<StatusApplication>,
    /// Added to the caster's critical rate, in percent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_bonus: i32,
}

impl SkillDefinition {
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>, kind: SkillKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            damage_type: DamageType::Physical,
            element: Element::Neutral,
            base_power: 100,
            mp_cost: 0,
            cast_time: Some(0),
            cooldown: 0,
            target: TargetScope::SingleEnemy,
            statuses: Vec::new(),
            crit_bonus: 0,
        }
    }

    #[must_use]
    pub fn magical(mut self, element: Element) -> Self {
        self.damage_type = DamageType::Magical;
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_power(mut self, base_power: u32) -> Self {
        self.base_power = base_power;
        self
    }

    #[must_use]
    pub fn with_mp_cost(mut self, mp_cost: u32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    #[must_use]
    pub fn with_cast_time(mut self, cast_time: Option<u32>) -> Self {
        self.cast_time = cast_time;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetScope) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_status(mut self, application: StatusApplication) -> Self {
        self.statuses.push(application);
        self
    }
}
