//! Active disables as one flag set.
//!
//! Disables are never stored independently: [`Disables::from_effects`]
//! derives them from the owner's status list after every change, so the flag
//! set and the effects cannot disagree. Precedence between flags lives here
//! and nowhere else.

use bitflags::bitflags;

use super::status::{StatusEffect, StatusKind};

bitflags! {
    /// Crowd-control conditions currently affecting a combatant.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Disables: u8 {
        const STUN      = 0b0000_0001;
        const SLEEP     = 0b0000_0010;
        const FREEZE    = 0b0000_0100;
        const PARALYZE  = 0b0000_1000;
        const SILENCE   = 0b0001_0000;
        const BLIND     = 0b0010_0000;
        const CONFUSION = 0b0100_0000;

        /// Conditions that stop the gauge and every action.
        const HARD = Self::STUN.bits() | Self::SLEEP.bits() | Self::FREEZE.bits();
    }
}

/// Why an actor could not act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockCause {
    Stunned,
    Asleep,
    Frozen,
    Paralyzed,
    Silenced,
}

impl Disables {
    /// Flag set by a status kind, if any.
    pub const fn for_kind(kind: StatusKind) -> Self {
        match kind {
            StatusKind::Stun => Self::STUN,
            StatusKind::Sleep => Self::SLEEP,
            StatusKind::Freeze => Self::FREEZE,
            StatusKind::Paralyze => Self::PARALYZE,
            StatusKind::Silence => Self::SILENCE,
            StatusKind::Blind => Self::BLIND,
            StatusKind::Confusion => Self::CONFUSION,
            _ => Self::empty(),
        }
    }

    /// Union of the flags of every effect in the list.
    pub fn from_effects<'a>(effects: impl IntoIterator<Item = &'a StatusEffect>) -> Self {
        effects
            .into_iter()
            .fold(Self::empty(), |acc, effect| acc | Self::for_kind(effect.kind))
    }

    /// Stun, Sleep, or Freeze is active.
    pub fn is_hard(self) -> bool {
        self.intersects(Self::HARD)
    }

    /// The cause reported when a hard disable blocks a turn.
    ///
    /// Stun wins over Freeze, Freeze over Sleep.
    pub fn hard_cause(self) -> Option<BlockCause> {
        if self.contains(Self::STUN) {
            Some(BlockCause::Stunned)
        } else if self.contains(Self::FREEZE) {
            Some(BlockCause::Frozen)
        } else if self.contains(Self::SLEEP) {
            Some(BlockCause::Asleep)
        } else {
            None
        }
    }

    /// Paralysis only rolls when no hard disable already blocks the turn.
    pub fn paralysis_rolls(self) -> bool {
        self.contains(Self::PARALYZE) && !self.is_hard()
    }

    /// Skills are unavailable.
    pub fn blocks_skills(self) -> bool {
        self.contains(Self::SILENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stun_overrides_paralysis_roll() {
        let flags = Disables::STUN | Disables::PARALYZE;
        assert!(flags.is_hard());
        assert!(!flags.paralysis_rolls());
        assert_eq!(flags.hard_cause(), Some(BlockCause::Stunned));

        assert!(Disables::PARALYZE.paralysis_rolls());
        assert!(!Disables::PARALYZE.is_hard());
    }

    #[test]
    fn hard_cause_precedence() {
        assert_eq!(
            (Disables::SLEEP | Disables::FREEZE).hard_cause(),
            Some(BlockCause::Frozen)
        );
        assert_eq!(Disables::SLEEP.hard_cause(), Some(BlockCause::Asleep));
        assert_eq!(Disables::SILENCE.hard_cause(), None);
    }

    #[test]
    fn non_disable_kinds_map_to_empty() {
        assert!(Disables::for_kind(StatusKind::Poison).is_empty());
        assert!(Disables::for_kind(StatusKind::Haste).is_empty());
        assert_eq!(Disables::for_kind(StatusKind::Silence), Disables::SILENCE);
    }
}
