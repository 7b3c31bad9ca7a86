//! Domain-level error type used by the rules engine and everything above it.
//!
//! The engine reports machine-checkable kinds only. Session and view layers
//! are responsible for turning a kind into a user-facing message.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rejected-input kinds. A rejected action never mutates the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValidationKind {
    WrongTurn,
    AlreadyPassed,
    BidTooLow,
    BidTooHigh,
    BidWrongStep,
    BidNotHigher,
    /// Kitty, snos and rospis are reserved for the contract holder.
    NotContractHolder,
    WrongActionForPhase,
    PhaseMismatch,
    DiscardCountMismatch,
    CardNotInHand,
    HandSizeMismatch,
    IllegalCardPlay,
    MarriageAlreadyDeclared,
    MarriagePreconditionUnmet,
    RospisAfterPlayStarted,
    ParseCard,
    InvariantViolated,
}

/// Configuration faults. These abort game creation or dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigKind {
    DeckNotExhausted,
    InvalidPlayerCount,
    InvalidDeck,
    InvalidBidLadder,
    InvalidHandSizes,
    InvalidPenalty,
    Parse,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input/user validation or game rule violation
    Validation(ValidationKind, String),
    /// Rules configuration cannot produce a playable game
    Config(ConfigKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Config(kind, d) => write!(f, "configuration error {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn config(kind: ConfigKind, detail: impl Into<String>) -> Self {
        Self::Config(kind, detail.into())
    }

    /// The validation kind, if this is a rejected-input error.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(*kind),
            DomainError::Config(..) => None,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, DomainError::Config(..))
    }
}
