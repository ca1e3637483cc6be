//! Match and deck configuration.
//!
//! - `RulesConfig`: life totals, summon limits and costs, combat bonuses
//! - `DeckRules`: deck size, copy limits and category caps
//!
//! Both are plain serde data with builder-style setters; the defaults are
//! the standard game.

use serde::{Deserialize, Serialize};

use crate::cards::Domain;

/// Numeric rules of a match.
///
/// ```
/// use scholar_duel::core::RulesConfig;
///
/// let config = RulesConfig::default().with_starting_life(8000);
/// assert_eq!(config.starting_life, 8000);
/// assert_eq!(config.max_summons_per_turn, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Life each player starts with.
    pub starting_life: u32,

    /// Ceiling for healing.
    pub max_life: u32,

    /// Creature summons allowed per turn.
    pub max_summons_per_turn: u32,

    /// Cards drawn before the first turn.
    pub starting_hand: usize,

    /// Life paid to summon a MASTER creature.
    pub alchemy_cost: u32,

    /// Life paid to summon a LEGENDARY creature without tributes.
    pub ritual_cost: u32,

    /// Creatures tributed to summon a LEGENDARY creature.
    pub ritual_tributes: usize,

    /// Attack bonus for a creature backed by same-domain creatures.
    pub synergy_bonus: u32,

    /// Same-domain creatures needed for the synergy bonus (attacker included).
    pub synergy_threshold: usize,

    /// Attack swing between clashing schools.
    pub clash_bonus: u32,

    /// Domain whose creatures defend better in numbers.
    pub supportive_domain: Domain,

    /// Defense bonus of the supportive domain.
    pub supportive_bonus: u32,

    /// Whether attacks are allowed on turn 1.
    pub first_turn_attacks: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_life: 20_000,
            max_life: 20_000,
            max_summons_per_turn: 2,
            starting_hand: 5,
            alchemy_cost: 1000,
            ritual_cost: 3000,
            ritual_tributes: 2,
            synergy_bonus: 200,
            synergy_threshold: 2,
            clash_bonus: 500,
            supportive_domain: Domain::Spirituality,
            supportive_bonus: 200,
            first_turn_attacks: false,
        }
    }
}

impl RulesConfig {
    /// Set starting life (also raises the ceiling if needed).
    #[must_use]
    pub fn with_starting_life(mut self, life: u32) -> Self {
        self.starting_life = life;
        self.max_life = self.max_life.max(life);
        self
    }

    /// Set the healing ceiling.
    #[must_use]
    pub fn with_max_life(mut self, life: u32) -> Self {
        self.max_life = life;
        self
    }

    /// Set the per-turn summon limit.
    #[must_use]
    pub fn with_max_summons(mut self, limit: u32) -> Self {
        self.max_summons_per_turn = limit;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_starting_hand(mut self, cards: usize) -> Self {
        self.starting_hand = cards;
        self
    }

    /// Allow or forbid attacks on turn 1.
    #[must_use]
    pub fn with_first_turn_attacks(mut self, allowed: bool) -> Self {
        self.first_turn_attacks = allowed;
        self
    }
}

/// Deck construction limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRules {
    /// Exact number of cards in a legal deck.
    pub deck_size: usize,

    /// Copies allowed of an ordinary card.
    pub copy_limit: usize,

    /// Copies allowed of legendary creatures, instants and reactives.
    pub restricted_copy_limit: usize,

    pub max_instants: usize,
    pub max_reactives: usize,
    pub max_legendaries: usize,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            deck_size: 30,
            copy_limit: 4,
            restricted_copy_limit: 2,
            max_instants: 5,
            max_reactives: 5,
            max_legendaries: 6,
        }
    }
}

impl DeckRules {
    /// Set the exact deck size.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set both copy limits.
    #[must_use]
    pub fn with_copy_limits(mut self, ordinary: usize, restricted: usize) -> Self {
        self.copy_limit = ordinary;
        self.restricted_copy_limit = restricted;
        self
    }
}
