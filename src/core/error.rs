//! Error taxonomy.
//!
//! - `RuleViolation`: an operation the rules forbid right now. The match
//!   state is left untouched and the variant is the reason.
//! - `DeckError`: deck construction and persisted-deck problems.
//! - `ParseError`: unknown classification strings from a card repository.
//! - `SnapshotError`: match snapshot encoding.
//!
//! Depletion (empty deck, no target for an effect) is not an error and never
//! shows up here.

use thiserror::Error;

use super::entity::EntityId;
use super::state::Phase;
use crate::cards::Category;
use crate::zones::Zone;

/// Reason an operation was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("The match is already over")]
    MatchOver,

    #[error("Wrong phase: expected {expected:?}, currently {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("Card not found: {0}")]
    CardNotFound(EntityId),

    #[error("Card {card} is not in the expected zone ({expected})")]
    NotInZone { card: EntityId, expected: Zone },

    #[error("Card {0} is not controlled by the acting player")]
    NotControlled(EntityId),

    #[error("Card {card} is not a {expected:?} card")]
    WrongCategory { card: EntityId, expected: Category },

    #[error("You can only summon {limit} cards per turn")]
    SummonLimitReached { limit: u32 },

    #[error("Insufficient resources: {reason}")]
    InsufficientResources { reason: String },

    #[error("Invalid tribute: {0}")]
    InvalidTribute(String),

    #[error("You cannot attack on the first turn of the game")]
    FirstTurnAttack,

    #[error("Card {0} has already attacked this turn")]
    AlreadyAttacked(EntityId),

    #[error("Card {card} cannot attack: {reason}")]
    CannotAttack { card: EntityId, reason: String },

    #[error("Invalid target {card}: {reason}")]
    InvalidTarget { card: EntityId, reason: String },

    #[error("Effect of {card} cannot be activated: {reason}")]
    EffectUnavailable { card: EntityId, reason: String },
}

/// Result type for rule-checked operations.
pub type RuleResult<T> = std::result::Result<T, RuleViolation>;

/// Deck construction and persistence errors.
#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Maximum {limit} copies of {name}")]
    CopyLimit { name: String, limit: usize },

    #[error("Maximum {limit} {what} cards per deck")]
    CategoryCap { what: &'static str, limit: usize },

    #[error("Deck is full ({size} cards)")]
    DeckFull { size: usize },

    #[error("Deck must have exactly {expected} cards (currently {actual})")]
    WrongSize { expected: usize, actual: usize },

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Card not in deck: {0}")]
    NotInDeck(String),

    #[error("Deck serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An unrecognised classification string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

/// Match snapshot encoding errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}
