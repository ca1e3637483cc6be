//! Name-keyed effect registry.
//!
//! Every card's special effect is a plain function looked up by exact card
//! name. Names without a procedure fall back to a generic activation that
//! succeeds without touching the match, so a repository may introduce new
//! cards before their behavior exists.

use rustc_hash::FxHashMap;

use crate::cards::Category;
use crate::core::{EntityId, MatchState, PlayerId};

use super::catalog;
use super::context::EffectContext;
use super::outcome::EffectResult;

/// A card's effect procedure.
pub type EffectProcedure = fn(&mut EffectContext<'_>) -> EffectResult;

/// Registry of effect procedures.
///
/// ## Example
///
/// ```
/// use scholar_duel::effects::EffectRegistry;
///
/// let registry = EffectRegistry::standard();
/// assert!(registry.contains("Isaac Newton"));
/// assert!(!registry.contains("Unknown Scholar"));
/// ```
#[derive(Clone, Default)]
pub struct EffectRegistry {
    procedures: FxHashMap<String, EffectProcedure>,
}

impl EffectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in card procedure.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        catalog::register_all(&mut registry);
        registry
    }

    /// Register (or replace) a procedure.
    pub fn register(&mut self, name: impl Into<String>, procedure: EffectProcedure) {
        self.procedures.insert(name.into(), procedure);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<EffectProcedure> {
        self.procedures.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Run the effect of `source` on behalf of `owner`.
    ///
    /// Usage bookkeeping is the caller's job.
    pub fn resolve(&self, state: &mut MatchState, source: EntityId, owner: PlayerId) -> EffectResult {
        let Some(card) = state.card(source) else {
            return EffectResult::failure(format!("Card {} not found", source));
        };
        let name = card.name().to_string();
        let category = card.category();

        let result = match self.get(&name) {
            Some(procedure) => {
                let mut ctx = EffectContext::new(state, source, owner);
                procedure(&mut ctx)
            }
            None => match category {
                Category::Creature => EffectResult::success(format!("{}'s effect activated!", name)),
                Category::Instant | Category::Reactive => {
                    EffectResult::success(format!("{} activated!", name))
                }
            },
        };

        tracing::debug!(
            card = %name,
            player = %owner,
            success = result.success,
            message = %result.message,
            "effect resolved"
        );
        result
    }
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("procedures", &self.procedures.len())
            .finish()
    }
}
