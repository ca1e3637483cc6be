//! Combat: effective stats, battle forecasts, battle resolution and
//! destruction.

pub mod resolver;

pub use resolver::{
    assess_battle, destroy, effective_attack, effective_defense, resolve_battle,
    resolve_direct_attack, school_clash, BattlePreview, BattleResult, DestroyCause, Destruction,
    Verdict,
};
