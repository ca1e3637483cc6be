//! Turn controller and the rules around it.
//!
//! - `engine`: `Duel`, the only mutating entry point for player actions
//! - `summon`: tier costs and payment validation
//! - `battle`: attack and response legality
//! - `events`: cues handed to an injected `EventSink`
//! - `clock`: optional per-turn countdown

pub mod battle;
pub mod clock;
pub mod engine;
pub mod events;
pub mod summon;

pub use battle::{check_attacker, check_reactive, check_target, legal_attack_targets, response_candidates, AttackRight, Strike};
pub use clock::{tick_duel, Tick, TimeLimit, TurnClock};
pub use engine::{AttackReport, Duel, Outcome, PhaseStep, SummonReport, TurnReport};
pub use events::{Cue, EventSink, NullSink, RecordingSink};
pub use summon::{check_summon, pay, payment_options, summon_cost, Charge, SummonCost};
