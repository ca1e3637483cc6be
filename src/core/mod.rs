//! Core match types: entities, players, state, actions, RNG, configuration
//! and errors.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use entity::EntityId;
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{DeckRules, RulesConfig};
pub use action::{Action, ActionRecord, AttackTarget, SummonPayment};
pub use state::{MatchState, Phase};
pub use error::{DeckError, ParseError, RuleResult, RuleViolation, SnapshotError};
