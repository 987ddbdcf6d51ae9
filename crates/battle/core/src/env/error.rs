//! Oracle access errors.

use crate::error::{BattleErrorKind, ErrorSeverity};

/// Errors raised when the environment lacks an oracle the engine needs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("SkillOracle not available")]
    SkillsNotAvailable,

    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("StatusOracle not available")]
    StatusesNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl BattleErrorKind for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // The engine cannot resolve anything without its tables.
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SkillsNotAvailable => "ORACLE_SKILLS_NOT_AVAILABLE",
            Self::ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            Self::StatusesNotAvailable => "ORACLE_STATUSES_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
