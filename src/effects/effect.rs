//! Effect primitives.
//!
//! Effects are atomic match mutations that card procedures compose into
//! abilities. Each one names its own target (a player or a card), so a
//! procedure can describe its whole outcome as data before anything is
//! applied.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCondition, Expiry, PlayerCondition, School, Stance};
use crate::core::{EntityId, PlayerId};
use crate::zones::{Zone, ZonePosition};

/// An atomic match mutation.
///
/// ## Life
///
/// - `Damage`, `Heal`: change a player's life total within `0..=max_life`
///
/// ## Card Movement
///
/// - `Draw`: front of deck to hand, stopping when the deck runs out
/// - `MoveCard`: relocate a card to a zone of its owner (or controller, for
///   the battlefield)
/// - `Destroy`: effect destruction, honouring protective conditions
/// - `Shuffle`: randomise a zone, or only its first `count` cards
/// - `Summon`: put a card onto its owner's battlefield face-up
/// - `TakeControl`: move a battlefield creature to another player's side
///
/// ## Card State
///
/// - `AdjustStats`, `SetStats`, `ResetStats`, `SetSchool`, `SetStance`
/// - `AddCardCondition`, `AddPlayerCondition`
///
/// ## Composite
///
/// - `Batch`: execute several effects in order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    // === Life ===

    /// Reduce a player's life.
    Damage { player: PlayerId, amount: u32 },

    /// Restore a player's life.
    Heal { player: PlayerId, amount: u32 },

    // === Card Movement ===

    /// Draw cards from a player's deck.
    Draw { player: PlayerId, count: usize },

    /// Move a card to a zone.
    MoveCard {
        card: EntityId,
        zone: Zone,
        position: ZonePosition,
    },

    /// Destroy a battlefield card by effect.
    Destroy { card: EntityId },

    /// Shuffle a zone. `count` limits the shuffle to the front cards.
    Shuffle {
        player: PlayerId,
        zone: Zone,
        count: Option<usize>,
    },

    /// Special-summon a creature to its owner's battlefield.
    Summon { card: EntityId, stance: Stance },

    /// Move a battlefield card to another player's battlefield.
    TakeControl { card: EntityId, player: PlayerId },

    // === Card State ===

    /// Add signed deltas to a card's current stats.
    AdjustStats {
        card: EntityId,
        attack: i32,
        defense: i32,
    },

    /// Overwrite a card's current stats.
    SetStats {
        card: EntityId,
        attack: u32,
        defense: u32,
    },

    /// Restore a card's stats and school to its definition.
    ResetStats { card: EntityId },

    /// Change a creature's school.
    SetSchool { card: EntityId, school: School },

    /// Change a creature's battle stance.
    SetStance { card: EntityId, stance: Stance },

    /// Attach a condition to a card.
    AddCardCondition {
        card: EntityId,
        condition: CardCondition,
        expiry: Expiry,
    },

    /// Attach a condition to a player.
    AddPlayerCondition {
        player: PlayerId,
        condition: PlayerCondition,
        expiry: Expiry,
    },

    // === Composite ===

    /// Execute multiple effects in sequence.
    Batch(Vec<Effect>),
}

impl Effect {
    /// Damage a player.
    #[must_use]
    pub fn damage(player: PlayerId, amount: u32) -> Self {
        Self::Damage { player, amount }
    }

    /// Heal a player.
    #[must_use]
    pub fn heal(player: PlayerId, amount: u32) -> Self {
        Self::Heal { player, amount }
    }

    /// Draw cards for a player.
    #[must_use]
    pub fn draw(player: PlayerId, count: usize) -> Self {
        Self::Draw { player, count }
    }

    /// Move a card to the back of a zone.
    #[must_use]
    pub fn move_to(card: EntityId, zone: Zone) -> Self {
        Self::MoveCard {
            card,
            zone,
            position: ZonePosition::Back,
        }
    }

    /// Move a card to the front of a zone (top of deck).
    #[must_use]
    pub fn move_to_top(card: EntityId, zone: Zone) -> Self {
        Self::MoveCard {
            card,
            zone,
            position: ZonePosition::Front,
        }
    }

    /// Destroy a card.
    #[must_use]
    pub fn destroy(card: EntityId) -> Self {
        Self::Destroy { card }
    }

    /// Shuffle the first `count` cards of a player's deck.
    #[must_use]
    pub fn shuffle_top(player: PlayerId, count: usize) -> Self {
        Self::Shuffle {
            player,
            zone: Zone::Deck,
            count: Some(count),
        }
    }

    /// Special-summon in ATTACK stance.
    #[must_use]
    pub fn summon(card: EntityId) -> Self {
        Self::Summon {
            card,
            stance: Stance::Attack,
        }
    }

    /// Summon a creature from the graveyard with fixed stats.
    #[must_use]
    pub fn revive(card: EntityId, attack: u32, defense: u32) -> Self {
        Self::Batch(vec![
            Self::summon(card),
            Self::SetStats {
                card,
                attack,
                defense,
            },
        ])
    }

    /// Adjust a card's current stats.
    #[must_use]
    pub fn adjust(card: EntityId, attack: i32, defense: i32) -> Self {
        Self::AdjustStats {
            card,
            attack,
            defense,
        }
    }

    /// Overwrite a card's current stats.
    #[must_use]
    pub fn set_stats(card: EntityId, attack: u32, defense: u32) -> Self {
        Self::SetStats {
            card,
            attack,
            defense,
        }
    }

    /// Attach a card condition.
    #[must_use]
    pub fn grant(card: EntityId, condition: CardCondition, expiry: Expiry) -> Self {
        Self::AddCardCondition {
            card,
            condition,
            expiry,
        }
    }

    /// Attach a player condition.
    #[must_use]
    pub fn mark(player: PlayerId, condition: PlayerCondition, expiry: Expiry) -> Self {
        Self::AddPlayerCondition {
            player,
            condition,
            expiry,
        }
    }

    /// Create a batch of effects.
    pub fn batch(effects: impl IntoIterator<Item = Effect>) -> Self {
        Self::Batch(effects.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_effect() {
        let effect = Effect::damage(PlayerId::TWO, 800);
        assert_eq!(
            effect,
            Effect::Damage {
                player: PlayerId::TWO,
                amount: 800
            }
        );
    }

    #[test]
    fn test_move_to_top() {
        match Effect::move_to_top(EntityId(4), Zone::Deck) {
            Effect::MoveCard { card, zone, position } => {
                assert_eq!(card, EntityId(4));
                assert_eq!(zone, Zone::Deck);
                assert_eq!(position, ZonePosition::Front);
            }
            _ => panic!("Expected MoveCard"),
        }
    }

    #[test]
    fn test_revive_is_summon_then_stats() {
        match Effect::revive(EntityId(9), 1000, 1000) {
            Effect::Batch(effects) => {
                assert_eq!(effects.len(), 2);
                assert!(matches!(effects[0], Effect::Summon { .. }));
                assert_eq!(effects[1], Effect::set_stats(EntityId(9), 1000, 1000));
            }
            _ => panic!("Expected Batch"),
        }
    }

    #[test]
    fn test_effect_serialization() {
        let effect = Effect::grant(EntityId(2), CardCondition::DamageOnDestroy(1000), Expiry::Permanent);
        let json = serde_json::to_string(&effect).unwrap();
        let deserialized: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, deserialized);
    }
}
