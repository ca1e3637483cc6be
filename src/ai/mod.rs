//! Computer opponents and a driver that plays them against each other.

pub mod policy;

pub use policy::{play_match, play_turn, smart_stance, smart_target, Difficulty, HeuristicPolicy, TurnPolicy};
