//! Players: identification, per-player storage and the player model.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. A duel always has exactly two seats:
//! `PlayerId::ONE` moves first, `PlayerId::TWO` second.
//!
//! ## PlayerMap
//!
//! Two-slot per-player storage indexed by `PlayerId`.
//!
//! ## Player
//!
//! Life total, the four ordered zones and the per-turn summon counter.
//! Zone operations here are plain transfers: they never trigger effects.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use im::Vector;

use super::config::RulesConfig;
use super::entity::EntityId;
use crate::cards::{Card, ConditionSet, Domain, PlayerCondition, School};
use crate::zones::{Zone, ZonePosition, Zones};

/// Seat identifier for one of the two duelists.
///
/// Indices are 0-based: the first player is `PlayerId(0)`, displayed as
/// "Player 1".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who takes the first turn.
    pub const ONE: PlayerId = PlayerId(0);
    /// The player who moves second.
    pub const TWO: PlayerId = PlayerId(1);

    /// Create a new player ID.
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "A duel has exactly two players");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats in turn order.
    #[must_use]
    pub const fn all() -> [PlayerId; 2] {
        [Self::ONE, Self::TWO]
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use scholar_duel::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<u32> = PlayerMap::new(|_| 20_000);
/// life[PlayerId::TWO] = 15_000;
/// assert_eq!(life[PlayerId::ONE], 20_000);
/// assert_eq!(life[PlayerId::TWO], 15_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Mutable access to both entries at once, in the requested order.
    pub fn pair_mut(&mut self, first: PlayerId) -> (&mut T, &mut T) {
        let [a, b] = &mut self.data;
        if first == PlayerId::ONE {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all().into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// One duelist: life total, zones, and turn counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Seat of this player.
    pub id: PlayerId,

    life: u32,
    max_life: u32,

    /// Deck, hand, battlefield and graveyard.
    pub zones: Zones,

    /// Creatures summoned during the current turn.
    pub summons_this_turn: u32,

    /// Summon limit per turn.
    pub max_summons_per_turn: u32,

    /// Match-wide conditions attached to this player.
    pub conditions: ConditionSet<PlayerCondition>,
}

impl Player {
    /// Create a player with empty zones and full life.
    #[must_use]
    pub fn new(id: PlayerId, config: &RulesConfig) -> Self {
        Self {
            id,
            life: config.starting_life.min(config.max_life),
            max_life: config.max_life,
            zones: Zones::new(),
            summons_this_turn: 0,
            max_summons_per_turn: config.max_summons_per_turn,
            conditions: ConditionSet::new(),
        }
    }

    // === Life ===

    /// Current life total.
    #[must_use]
    pub fn life(&self) -> u32 {
        self.life
    }

    /// Configured life ceiling.
    #[must_use]
    pub fn max_life(&self) -> u32 {
        self.max_life
    }

    /// Lose life, flooring at zero. Returns the life actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.life);
        self.life -= lost;
        lost
    }

    /// Gain life, capped at the maximum. Returns the life actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_life.saturating_sub(self.life));
        self.life += gained;
        gained
    }

    /// A player at zero life has lost.
    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.life == 0
    }

    // === Zone transfers ===

    /// Move the front card of the deck into the hand.
    ///
    /// Returns `None` when the deck is empty; that is depletion, not an error.
    pub fn draw(&mut self) -> Option<EntityId> {
        let card = self.zones.pop_front(Zone::Deck)?;
        let id = card.id;
        self.zones.insert(card, Zone::Hand, ZonePosition::Back);
        Some(id)
    }

    /// Move a card from hand to battlefield.
    ///
    /// Returns `false` (and changes nothing) if the card is not in hand.
    pub fn play_to_battlefield(&mut self, card: EntityId) -> bool {
        if self.zones.zone_of(card) != Some(Zone::Hand) {
            return false;
        }
        match self.zones.take(card) {
            Some(taken) => {
                self.zones.insert(taken, Zone::Battlefield, ZonePosition::Back);
                true
            }
            None => false,
        }
    }

    /// Move a card from deck, hand or battlefield to the end of the graveyard.
    ///
    /// Calling this on a card already in the graveyard, or on a card this
    /// player does not hold, is a no-op. Returns whether the card moved.
    pub fn send_to_graveyard(&mut self, card: EntityId) -> bool {
        match self.zones.zone_of(card) {
            None | Some(Zone::Graveyard) => false,
            Some(_) => match self.zones.take(card) {
                Some(taken) => {
                    self.zones.insert(taken, Zone::Graveyard, ZonePosition::Back);
                    true
                }
                None => false,
            },
        }
    }

    // === Queries ===

    /// Cards in the deck, front first.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        self.zones.cards(Zone::Deck)
    }

    /// Cards in hand.
    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        self.zones.cards(Zone::Hand)
    }

    /// Cards on the battlefield, including face-down reactives.
    #[must_use]
    pub fn battlefield(&self) -> &Vector<Card> {
        self.zones.cards(Zone::Battlefield)
    }

    /// Cards in the graveyard, oldest first.
    #[must_use]
    pub fn graveyard(&self) -> &Vector<Card> {
        self.zones.cards(Zone::Graveyard)
    }

    /// Look up a card in any of this player's zones.
    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&Card> {
        self.zones.get(id)
    }

    /// Mutable lookup in any of this player's zones.
    pub fn card_mut(&mut self, id: EntityId) -> Option<&mut Card> {
        self.zones.get_mut(id)
    }

    /// Creature cards on the battlefield, in battlefield order.
    pub fn creatures(&self) -> impl Iterator<Item = &Card> + '_ {
        self.battlefield().iter().filter(|c| c.is_creature())
    }

    /// Ids of battlefield creatures, in battlefield order.
    #[must_use]
    pub fn creature_ids(&self) -> Vec<EntityId> {
        self.creatures().map(|c| c.id).collect()
    }

    /// Number of creatures on the battlefield.
    #[must_use]
    pub fn creature_count(&self) -> usize {
        self.creatures().count()
    }

    /// Battlefield creatures of the given domain.
    #[must_use]
    pub fn domain_count(&self, domain: Domain) -> usize {
        self.creatures().filter(|c| c.domain() == Some(domain)).count()
    }

    /// Battlefield creatures of the given school.
    #[must_use]
    pub fn school_count(&self, school: School) -> usize {
        self.creatures().filter(|c| c.school() == Some(school)).count()
    }

    /// Whether another creature may be summoned this turn.
    #[must_use]
    pub fn can_summon_more(&self) -> bool {
        self.summons_this_turn < self.max_summons_per_turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, Stance};

    fn player_with_deck(count: u32) -> Player {
        let mut player = Player::new(PlayerId::ONE, &RulesConfig::default());
        for i in 0..count {
            let def = CardDefinition::creature(CardId::new(i), format!("Card {}", i))
                .with_stats(1000, 1000);
            let card = Card::from_definition(EntityId(i), &def, PlayerId::ONE);
            player.zones.insert(card, Zone::Deck, ZonePosition::Back);
        }
        player
    }

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::ONE.index(), 0);
        assert_eq!(PlayerId::TWO.index(), 1);
        assert_eq!(PlayerId::ONE.opponent(), PlayerId::TWO);
        assert_eq!(PlayerId::TWO.opponent(), PlayerId::ONE);
        assert_eq!(format!("{}", PlayerId::ONE), "Player 1");
        assert_eq!(format!("{}", PlayerId::TWO), "Player 2");
    }

    #[test]
    #[should_panic(expected = "exactly two players")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_player_map_access() {
        let mut map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);
        assert_eq!(map[PlayerId::ONE], 0);
        assert_eq!(map[PlayerId::TWO], 10);

        map[PlayerId::ONE] = 5;
        assert_eq!(map[PlayerId::ONE], 5);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::ONE, &5), (PlayerId::TWO, &10)]);
    }

    #[test]
    fn test_player_map_pair_mut() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(0);
        let (first, second) = map.pair_mut(PlayerId::TWO);
        *first = 2;
        *second = 1;
        assert_eq!(map[PlayerId::ONE], 1);
        assert_eq!(map[PlayerId::TWO], 2);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut player = Player::new(PlayerId::ONE, &RulesConfig::default());
        assert_eq!(player.take_damage(5000), 5000);
        assert_eq!(player.life(), 15_000);
        assert_eq!(player.take_damage(50_000), 15_000);
        assert_eq!(player.life(), 0);
        assert!(player.has_lost());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut player = Player::new(PlayerId::ONE, &RulesConfig::default());
        player.take_damage(1000);
        assert_eq!(player.heal(5000), 1000);
        assert_eq!(player.life(), player.max_life());
    }

    #[test]
    fn test_draw_takes_front_of_deck() {
        let mut player = player_with_deck(3);
        assert_eq!(player.draw(), Some(EntityId(0)));
        assert_eq!(player.hand().len(), 1);
        assert_eq!(player.deck().len(), 2);
        assert_eq!(player.hand()[0].zone, Zone::Hand);
    }

    #[test]
    fn test_draw_from_empty_deck() {
        let mut player = player_with_deck(0);
        assert_eq!(player.draw(), None);
        assert!(player.hand().is_empty());
    }

    #[test]
    fn test_play_to_battlefield_requires_hand() {
        let mut player = player_with_deck(2);
        assert!(!player.play_to_battlefield(EntityId(0)));

        player.draw();
        assert!(player.play_to_battlefield(EntityId(0)));
        assert_eq!(player.battlefield().len(), 1);
        assert_eq!(player.battlefield()[0].stance, Stance::Attack);
    }

    #[test]
    fn test_send_to_graveyard_from_any_zone() {
        let mut player = player_with_deck(3);
        player.draw();
        player.play_to_battlefield(EntityId(0));
        player.draw();

        assert!(player.send_to_graveyard(EntityId(0)));
        assert!(player.send_to_graveyard(EntityId(1)));
        assert!(player.send_to_graveyard(EntityId(2)));
        assert_eq!(player.graveyard().len(), 3);
        assert!(player.deck().is_empty());
        assert!(player.hand().is_empty());
        assert!(player.battlefield().is_empty());
    }

    #[test]
    fn test_send_to_graveyard_is_idempotent() {
        let mut player = player_with_deck(1);
        assert!(player.send_to_graveyard(EntityId(0)));
        assert!(!player.send_to_graveyard(EntityId(0)));
        assert_eq!(player.graveyard().len(), 1);
        assert!(!player.send_to_graveyard(EntityId(99)));
    }
}
