//! Effect system for card abilities.
//!
//! Card abilities are built from a small set of primitives:
//! - `Effect`: enumeration of match mutations (damage, draw, move, stats, conditions)
//! - `TargetSpec`: how to select the cards an ability touches
//! - `EffectResolver`: executes primitives on a `MatchState`
//!
//! On top of the primitives sits the name-keyed `EffectRegistry`. Each
//! card's procedure receives an `EffectContext` and returns an
//! `EffectResult` whose `EffectSignals` tell the turn controller how to
//! react (negate an attack, skip a turn, redirect).
//!
//! ## Design Philosophy
//!
//! Procedures never touch zones directly. Every mutation is a primitive, so
//! zone bookkeeping, protection and victory checks live in one place.

mod auras;
mod catalog;
mod context;
mod effect;
mod outcome;
mod registry;
mod resolver;
mod targeting;

pub use auras::{
    aura_active, aura_source, is_sanctuary_shielded, refresh_auras, ENLIGHTENMENT_BONUS, ENLIGHTENMENT_SOURCE,
    SANCTUARY_SOURCE,
};
pub use context::EffectContext;
pub use effect::Effect;
pub use outcome::{EffectResult, EffectSignals};
pub use registry::{EffectProcedure, EffectRegistry};
pub use resolver::{EffectResolver, ResolveResult};
pub use targeting::{Pick, Side, TargetFilter, TargetSelector, TargetSpec};
