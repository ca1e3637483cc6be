//! # scholar-duel
//!
//! Rules engine for a two-player trading-card duel between historical
//! scholars, philosophers and scientists.
//!
//! ## Design Principles
//!
//! 1. **One mutating entry point**: every player action goes through
//!    [`rules::Duel`], which validates before it touches state. A rejected
//!    action leaves the match exactly as it was.
//!
//! 2. **Deterministic**: all randomness (shuffles, random picks, coin
//!    flips) comes from the seeded [`GameRng`] inside the match state, so a
//!    seed plus an action list replays a match.
//!
//! 3. **Data-driven cards**: definitions are plain serde data; effects are
//!    looked up by card name in an [`effects::EffectRegistry`].
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: zones are `im` vectors, so cloning a
//!   `MatchState` for look-ahead is cheap.
//!
//! - **Conditions over flags**: transient rules (cannot attack, effects
//!   negated, skip next turn) are typed conditions with an expiry instead
//!   of ad-hoc strings.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, match state, actions, RNG, configuration, errors
//! - `zones`: Deck, hand, battlefield and graveyard
//! - `cards`: Card definitions, the starter catalog, card instances
//! - `combat`: Battle values and battle resolution
//! - `effects`: Card effect catalog and auras
//! - `rules`: The turn controller (`Duel`), summon costs, attack legality, clock
//! - `deck`: Deck building and the saved deck format
//! - `ai`: Scripted opponent and a self-play driver

pub mod core;
pub mod zones;
pub mod cards;
pub mod combat;
pub mod effects;
pub mod rules;
pub mod deck;
pub mod ai;

// Re-export commonly used types
pub use crate::core::{
    EntityId, PlayerId, PlayerMap, Player,
    GameRng, GameRngState,
    RulesConfig, DeckRules,
    Action, ActionRecord, AttackTarget, SummonPayment,
    MatchState, Phase,
    DeckError, RuleResult, RuleViolation,
};

pub use crate::zones::{Zone, ZonePosition};

pub use crate::cards::{
    Card, CardDefinition, CardId, CardRegistry, Category, Domain, School, Stance, Tier,
    starter_catalog,
};

pub use crate::combat::{BattlePreview, BattleResult, Verdict};

pub use crate::effects::{EffectRegistry, EffectResult, EffectSignals};

pub use crate::rules::{Duel, Outcome, Cue, EventSink, TurnClock, TimeLimit};

pub use crate::deck::{DeckBuilder, DeckList};

pub use crate::ai::{Difficulty, HeuristicPolicy, TurnPolicy};
