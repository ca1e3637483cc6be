//! Per-player zone storage and card movement.
//!
//! `Zones` owns the four ordered zones of one player. Cards are stored by
//! value, so a card can only ever be in one zone: moving it means taking it
//! out of one sequence and inserting it into another.
//!
//! Index 0 is the front of a zone. For the deck that is the next draw; for
//! the other zones order is display-only.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// The four zones a card can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Battlefield,
    Graveyard,
}

impl Zone {
    /// All zones, in storage order.
    pub const ALL: [Zone; 4] = [Zone::Deck, Zone::Hand, Zone::Battlefield, Zone::Graveyard];

    const fn slot(self) -> usize {
        match self {
            Zone::Deck => 0,
            Zone::Hand => 1,
            Zone::Battlefield => 2,
            Zone::Graveyard => 3,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Deck => "DECK",
            Zone::Hand => "HAND",
            Zone::Battlefield => "BATTLEFIELD",
            Zone::Graveyard => "GRAVEYARD",
        };
        f.write_str(name)
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Front of the zone (top of deck: drawn next).
    Front,
    /// Back of the zone.
    Back,
    /// Insert at specific index, clamped to the zone length.
    Index(usize),
}

/// Ordered storage for one player's deck, hand, battlefield and graveyard.
///
/// ```
/// use scholar_duel::cards::{Card, CardDefinition, CardId};
/// use scholar_duel::core::{EntityId, PlayerId};
/// use scholar_duel::zones::{Zone, ZonePosition, Zones};
///
/// let def = CardDefinition::creature(CardId::new(1), "Homer").with_stats(1200, 1000);
/// let mut zones = Zones::new();
/// zones.insert(Card::from_definition(EntityId(1), &def, PlayerId::ONE), Zone::Deck, ZonePosition::Back);
///
/// assert_eq!(zones.zone_of(EntityId(1)), Some(Zone::Deck));
/// let card = zones.take(EntityId(1)).unwrap();
/// zones.insert(card, Zone::Hand, ZonePosition::Back);
/// assert_eq!(zones.len(Zone::Hand), 1);
/// assert_eq!(zones.len(Zone::Deck), 0);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Zones {
    slots: [Vector<Card>; 4],
}

impl Zones {
    /// Create empty zones.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in a zone, front first.
    #[must_use]
    pub fn cards(&self, zone: Zone) -> &Vector<Card> {
        &self.slots[zone.slot()]
    }

    /// Ids of the cards in a zone, front first.
    #[must_use]
    pub fn ids(&self, zone: Zone) -> Vec<EntityId> {
        self.cards(zone).iter().map(|c| c.id).collect()
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn len(&self, zone: Zone) -> usize {
        self.cards(zone).len()
    }

    /// Check if a zone is empty.
    #[must_use]
    pub fn is_empty(&self, zone: Zone) -> bool {
        self.cards(zone).is_empty()
    }

    /// Total cards across all zones.
    #[must_use]
    pub fn total(&self) -> usize {
        self.slots.iter().map(Vector::len).sum()
    }

    /// Find the zone and index holding a card.
    #[must_use]
    pub fn locate(&self, id: EntityId) -> Option<(Zone, usize)> {
        Zone::ALL.into_iter().find_map(|zone| {
            self.cards(zone)
                .iter()
                .position(|c| c.id == id)
                .map(|index| (zone, index))
        })
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn zone_of(&self, id: EntityId) -> Option<Zone> {
        self.locate(id).map(|(zone, _)| zone)
    }

    /// Get a card from any zone.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Card> {
        let (zone, index) = self.locate(id)?;
        self.cards(zone).get(index)
    }

    /// Get a mutable card from any zone.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Card> {
        let (zone, index) = self.locate(id)?;
        self.slots[zone.slot()].get_mut(index)
    }

    /// Remove a card from whichever zone holds it.
    ///
    /// The returned card still records its old zone until it is inserted
    /// somewhere else.
    pub fn take(&mut self, id: EntityId) -> Option<Card> {
        let (zone, index) = self.locate(id)?;
        Some(self.slots[zone.slot()].remove(index))
    }

    /// Remove and return the front card of a zone.
    pub fn pop_front(&mut self, zone: Zone) -> Option<Card> {
        self.slots[zone.slot()].pop_front()
    }

    /// Insert a card into a zone.
    ///
    /// Leaving the battlefield resets the card's battlefield state, and any
    /// zone change clears its conditions.
    pub fn insert(&mut self, mut card: Card, zone: Zone, position: ZonePosition) {
        debug_assert!(
            self.locate(card.id).is_none(),
            "card {} would occupy two zones",
            card.id
        );

        if card.zone == Zone::Battlefield && zone != Zone::Battlefield {
            card.leave_battlefield();
        }
        if card.zone != zone {
            card.conditions.clear();
        }
        card.zone = zone;

        let order = &mut self.slots[zone.slot()];
        match position {
            ZonePosition::Front => order.push_front(card),
            ZonePosition::Back => order.push_back(card),
            ZonePosition::Index(i) => {
                let idx = i.min(order.len());
                order.insert(idx, card);
            }
        }
    }

    /// Shuffle an entire zone.
    pub fn shuffle(&mut self, zone: Zone, rng: &mut GameRng) {
        self.shuffle_front(zone, usize::MAX, rng);
    }

    /// Shuffle the first `count` cards of a zone, leaving the rest in place.
    pub fn shuffle_front(&mut self, zone: Zone, count: usize, rng: &mut GameRng) {
        let order = &mut self.slots[zone.slot()];
        let count = count.min(order.len());
        if count < 2 {
            return;
        }
        let rest = order.split_off(count);
        let mut front: Vec<Card> = order.iter().cloned().collect();
        rng.shuffle(&mut front);
        let mut shuffled: Vector<Card> = front.into_iter().collect();
        shuffled.append(rest);
        *order = shuffled;
    }

    /// Mutable iteration over a zone.
    pub fn iter_mut(&mut self, zone: Zone) -> impl Iterator<Item = &mut Card> + '_ {
        self.slots[zone.slot()].iter_mut()
    }
}
