//! Common error infrastructure for battle-core.
//!
//! Game-rule outcomes (missed attacks, silenced casters, empty MP pools) are
//! never errors: they travel as [`crate::BattleEvent`]s. The types here cover
//! contract violations only, i.e. callers feeding the engine requests it can
//! never accept.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each layer has its own error enum
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Stable Codes**: Each variant exposes a static code for logs and tests

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller can retry with a different request.
    ///
    /// Examples: submitting for an actor that is not awaiting input
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: unknown skill id, unknown combatant
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// The battle cannot continue.
    ///
    /// Examples: missing oracle, battle already finished
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleErrorKind: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
