//! Match state.
//!
//! ## Phase
//!
//! The fixed turn cycle `DRAW -> MAIN -> BATTLE -> END`, after which the turn
//! passes to the other player.
//!
//! ## MatchState
//!
//! Both players, the active-player pointer, turn counter, phase, winner,
//! RNG and action history. Zones are `im` vectors, so cloning a match for a
//! preview is cheap.
//!
//! Cards live in the zones of the player currently holding them. That is the
//! owner everywhere except the battlefield, where a stolen card sits with its
//! controller. `move_card` routes a card to the right player.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::config::RulesConfig;
use super::entity::EntityId;
use super::error::SnapshotError;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, CardDefinition};
use crate::zones::{Zone, ZonePosition};

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Draw,
    Main,
    Battle,
    End,
}

impl Phase {
    /// The phase after this one within a turn. `End` has none.
    #[must_use]
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::Draw => Some(Phase::Main),
            Phase::Main => Some(Phase::Battle),
            Phase::Battle => Some(Phase::End),
            Phase::End => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Draw => "DRAW",
            Phase::Main => "MAIN",
            Phase::Battle => "BATTLE",
            Phase::End => "END",
        };
        f.write_str(name)
    }
}

/// Complete state of one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    /// Both duelists.
    pub players: PlayerMap<Player>,

    active: PlayerId,

    /// Turn number (starts at 1).
    pub turn: u32,

    /// Current phase of the active player's turn.
    pub phase: Phase,

    winner: Option<PlayerId>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Rules in force.
    pub config: RulesConfig,

    next_entity: u32,

    /// Every accepted action, in order.
    pub history: Vector<ActionRecord>,

    sequence: u32,
}

impl MatchState {
    /// Create an empty match: no cards, turn 1, Player 1 in DRAW.
    #[must_use]
    pub fn new(config: RulesConfig, seed: u64) -> Self {
        Self {
            players: PlayerMap::new(|id| Player::new(id, &config)),
            active: PlayerId::ONE,
            turn: 1,
            phase: Phase::Draw,
            winner: None,
            rng: GameRng::new(seed),
            config,
            next_entity: 1,
            history: Vector::new(),
            sequence: 0,
        }
    }

    // === Players ===

    /// Whose turn it is.
    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    /// The player waiting for their turn.
    #[must_use]
    pub fn inactive(&self) -> PlayerId {
        self.active.opponent()
    }

    /// Hand the turn to the other player.
    pub(crate) fn swap_active(&mut self) {
        self.active = self.active.opponent();
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    // === Victory ===

    /// Winner, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Check if the match has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Re-evaluate the life totals.
    ///
    /// Player 1 is checked first: if both players are at zero in the same
    /// evaluation, Player 2 wins.
    pub fn check_victory(&mut self) -> Option<PlayerId> {
        if self.winner.is_none() {
            self.winner = PlayerId::all()
                .into_iter()
                .find(|&id| self.players[id].has_lost())
                .map(PlayerId::opponent);
        }
        self.winner
    }

    // === Cards ===

    /// Create a card for `owner` from a definition and put it in `zone`.
    pub fn add_card(&mut self, owner: PlayerId, definition: &CardDefinition, zone: Zone) -> EntityId {
        let id = EntityId::new(self.next_entity);
        self.next_entity += 1;
        let card = Card::from_definition(id, definition, owner);
        self.players[owner]
            .zones
            .insert(card, zone, ZonePosition::Back);
        id
    }

    /// Instantiate a whole deck for `owner`, in order.
    pub fn load_deck(&mut self, owner: PlayerId, definitions: &[CardDefinition]) -> Vec<EntityId> {
        definitions
            .iter()
            .map(|definition| self.add_card(owner, definition, Zone::Deck))
            .collect()
    }

    /// Find the player holding a card and the zone it is in.
    #[must_use]
    pub fn locate(&self, id: EntityId) -> Option<(PlayerId, Zone)> {
        self.players
            .iter()
            .find_map(|(pid, player)| player.zones.zone_of(id).map(|zone| (pid, zone)))
    }

    /// Look up a card anywhere in the match.
    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&Card> {
        self.players.iter().find_map(|(_, player)| player.card(id))
    }

    /// Mutable lookup anywhere in the match.
    pub fn card_mut(&mut self, id: EntityId) -> Option<&mut Card> {
        let (holder, _) = self.locate(id)?;
        self.players[holder].card_mut(id)
    }

    /// Move a card to a zone.
    ///
    /// Battlefield cards go to their controller's side; every other zone
    /// belongs to the card's owner. Returns `false` if the card is unknown.
    pub fn move_card(&mut self, id: EntityId, zone: Zone, position: ZonePosition) -> bool {
        let Some((holder, _)) = self.locate(id) else {
            return false;
        };
        let Some(card) = self.players[holder].zones.take(id) else {
            return false;
        };
        let destination = if zone == Zone::Battlefield {
            card.controller
        } else {
            card.owner()
        };
        self.players[destination].zones.insert(card, zone, position);
        true
    }

    /// Purge card and player conditions whose window has closed.
    pub fn expire_conditions(&mut self) {
        let turn = self.turn;
        for (_, player) in self.players.iter_mut() {
            player.conditions.expire(turn);
            for zone in Zone::ALL {
                for card in player.zones.iter_mut(zone) {
                    card.conditions.expire(turn);
                }
            }
        }
    }

    // === History ===

    /// Append an accepted action to the history.
    pub fn record(&mut self, player: PlayerId, action: Action) {
        let record = ActionRecord::new(player, action, self.turn, self.sequence);
        self.sequence += 1;
        self.history.push_back(record);
    }

    // === Snapshots ===

    /// Encode the complete match with bincode.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a match produced by `snapshot`.
    pub fn restore(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Stance};

    fn creature(id: u32, attack: u32) -> CardDefinition {
        CardDefinition::creature(CardId::new(id), format!("Creature {}", id)).with_stats(attack, 1000)
    }

    #[test]
    fn test_phase_cycle() {
        assert_eq!(Phase::Draw.next(), Some(Phase::Main));
        assert_eq!(Phase::Main.next(), Some(Phase::Battle));
        assert_eq!(Phase::Battle.next(), Some(Phase::End));
        assert_eq!(Phase::End.next(), None);
        assert_eq!(Phase::Battle.to_string(), "BATTLE");
    }

    #[test]
    fn test_new_match() {
        let state = MatchState::new(RulesConfig::default(), 1);
        assert_eq!(state.active(), PlayerId::ONE);
        assert_eq!(state.inactive(), PlayerId::TWO);
        assert_eq!(state.turn, 1);
        assert_eq!(state.phase, Phase::Draw);
        assert!(!state.is_over());
        assert_eq!(state.player(PlayerId::TWO).life(), 20_000);
    }

    #[test]
    fn test_add_card_allocates_ids() {
        let mut state = MatchState::new(RulesConfig::default(), 1);
        let a = state.add_card(PlayerId::ONE, &creature(1, 1000), Zone::Hand);
        let b = state.add_card(PlayerId::TWO, &creature(2, 1000), Zone::Battlefield);
        assert_ne!(a, b);
        assert_eq!(state.locate(a), Some((PlayerId::ONE, Zone::Hand)));
        assert_eq!(state.locate(b), Some((PlayerId::TWO, Zone::Battlefield)));
        assert_eq!(state.card(b).unwrap().owner(), PlayerId::TWO);
    }

    #[test]
    fn test_move_card_follows_controller_and_owner() {
        let mut state = MatchState::new(RulesConfig::default(), 1);
        let id = state.add_card(PlayerId::TWO, &creature(1, 1000), Zone::Battlefield);

        state.card_mut(id).unwrap().controller = PlayerId::ONE;
        assert!(state.move_card(id, Zone::Battlefield, ZonePosition::Back));
        assert_eq!(state.locate(id), Some((PlayerId::ONE, Zone::Battlefield)));

        assert!(state.move_card(id, Zone::Graveyard, ZonePosition::Back));
        assert_eq!(state.locate(id), Some((PlayerId::TWO, Zone::Graveyard)));
        assert_eq!(state.card(id).unwrap().controller, PlayerId::TWO);
        assert!(!state.move_card(EntityId(999), Zone::Hand, ZonePosition::Back));
    }

    #[test]
    fn test_victory_precedence() {
        let mut state = MatchState::new(RulesConfig::default(), 1);
        assert_eq!(state.check_victory(), None);

        state.player_mut(PlayerId::ONE).take_damage(20_000);
        state.player_mut(PlayerId::TWO).take_damage(20_000);
        assert_eq!(state.check_victory(), Some(PlayerId::TWO));
        assert!(state.is_over());
    }

    #[test]
    fn test_expire_conditions() {
        use crate::cards::{CardCondition, Expiry, PlayerCondition};

        let mut state = MatchState::new(RulesConfig::default(), 1);
        let id = state.add_card(PlayerId::ONE, &creature(1, 1000), Zone::Battlefield);
        state
            .card_mut(id)
            .unwrap()
            .conditions
            .add(CardCondition::CannotAttack, Expiry::ThroughTurn(1));
        state
            .player_mut(PlayerId::TWO)
            .conditions
            .add(PlayerCondition::DiscardOnDraw, Expiry::Permanent);

        state.turn = 2;
        state.expire_conditions();
        assert!(state.card(id).unwrap().conditions.is_empty());
        assert!(state.player(PlayerId::TWO).conditions.has(PlayerCondition::DiscardOnDraw, 2));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = MatchState::new(RulesConfig::default(), 99);
        let id = state.add_card(PlayerId::ONE, &creature(1, 1500), Zone::Battlefield);
        state.card_mut(id).unwrap().stance = Stance::Defense;
        state.record(PlayerId::ONE, Action::EndTurn);

        let bytes = state.snapshot().unwrap();
        let restored = MatchState::restore(&bytes).unwrap();

        assert_eq!(restored.card(id), state.card(id));
        assert_eq!(restored.history.len(), 1);
        assert_eq!(restored.rng.seed(), 99);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = MatchState::new(RulesConfig::default(), 1);
        state.add_card(PlayerId::ONE, &creature(1, 1000), Zone::Deck);
        let preview = state.clone();
        state.player_mut(PlayerId::ONE).draw();
        assert_eq!(preview.player(PlayerId::ONE).deck().len(), 1);
        assert_eq!(state.player(PlayerId::ONE).deck().len(), 0);
    }
}
