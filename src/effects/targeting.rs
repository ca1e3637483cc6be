//! Effect targeting.
//!
//! Card procedures describe their targets declaratively:
//! - `TargetSpec`: which side, which zone, which filters, how many
//! - `TargetFilter`: predicates over cards
//! - `TargetSelector`: resolves a spec against a match for an acting player
//!
//! ## Protection
//!
//! Cards held by the acting player's opponent are screened before filters
//! run. `ImmuneToEffects` hides a card from every hostile selection;
//! `CannotBeTargeted` hides it from picks that single cards out (`First`,
//! `UpTo`, `LowestAttack`) but not from mass effects (`All`).

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardCondition, Category, Domain, School, Stance, Tier};
use crate::core::{EntityId, MatchState, PlayerId};
use crate::zones::Zone;

/// Whose cards a spec looks at, relative to the acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Own,
    Opponent,
    Both,
}

/// How many of the matching cards to take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pick {
    /// The first match in zone order.
    First,
    /// Up to N matches in zone order.
    UpTo(usize),
    /// Every match.
    All,
    /// The match with the lowest current attack (first on ties).
    LowestAttack,
}

impl Pick {
    /// Whether this pick singles cards out.
    #[must_use]
    pub const fn is_targeted(self) -> bool {
        !matches!(self, Pick::All)
    }
}

/// Card predicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFilter {
    // === Category ===

    /// Creature cards only.
    Creature,
    /// Instants and reactives only.
    NonCreature,
    /// Cards of a category.
    OfCategory(Category),

    // === Classification ===

    OfDomain(Domain),
    OfSchool(School),
    OfTier(Tier),

    // === Battlefield State ===

    InStance(Stance),
    FaceDown,

    // === Stats ===

    /// Base attack strictly above.
    BaseAttackAbove(u32),
    /// Base attack strictly below.
    BaseAttackBelow(u32),
    /// Base defense strictly below.
    BaseDefenseBelow(u32),

    // === Generic ===

    /// Not the card whose effect is resolving.
    NotSource,
}

/// Declarative target description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub side: Side,
    pub zone: Zone,
    pub filters: Vec<TargetFilter>,
    pub pick: Pick,
}

impl TargetSpec {
    /// Every card in one of the acting player's zones.
    #[must_use]
    pub fn own(zone: Zone) -> Self {
        Self::new(Side::Own, zone)
    }

    /// Every card in one of the opponent's zones.
    #[must_use]
    pub fn opponent(zone: Zone) -> Self {
        Self::new(Side::Opponent, zone)
    }

    /// Every card in a zone on both sides, acting player first.
    #[must_use]
    pub fn both(zone: Zone) -> Self {
        Self::new(Side::Both, zone)
    }

    fn new(side: Side, zone: Zone) -> Self {
        Self {
            side,
            zone,
            filters: Vec::new(),
            pick: Pick::All,
        }
    }

    /// Shorthand for the acting player's battlefield creatures.
    #[must_use]
    pub fn own_creatures() -> Self {
        Self::own(Zone::Battlefield).with_filter(TargetFilter::Creature)
    }

    /// Shorthand for the opponent's battlefield creatures.
    #[must_use]
    pub fn opponent_creatures() -> Self {
        Self::opponent(Zone::Battlefield).with_filter(TargetFilter::Creature)
    }

    /// Add a filter (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Exclude the resolving card (builder pattern).
    #[must_use]
    pub fn others(self) -> Self {
        self.with_filter(TargetFilter::NotSource)
    }

    /// Take only the first match.
    #[must_use]
    pub fn first(mut self) -> Self {
        self.pick = Pick::First;
        self
    }

    /// Take up to `count` matches.
    #[must_use]
    pub fn up_to(mut self, count: usize) -> Self {
        self.pick = Pick::UpTo(count);
        self
    }

    /// Take the weakest match by current attack.
    #[must_use]
    pub fn lowest_attack(mut self) -> Self {
        self.pick = Pick::LowestAttack;
        self
    }
}

/// Resolves a `TargetSpec` for an acting player.
#[derive(Clone, Debug)]
pub struct TargetSelector {
    spec: TargetSpec,
    acting_player: PlayerId,
    source_entity: Option<EntityId>,
}

impl TargetSelector {
    /// Create a new target selector.
    #[must_use]
    pub fn new(spec: TargetSpec, acting_player: PlayerId) -> Self {
        Self {
            spec,
            acting_player,
            source_entity: None,
        }
    }

    /// Set the source entity (for `NotSource`).
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source_entity = Some(source);
        self
    }

    /// Every card matching side, zone, protection and filters, in zone order.
    #[must_use]
    pub fn valid_targets(&self, state: &MatchState) -> Vec<EntityId> {
        let me = self.acting_player;
        let holders = match self.spec.side {
            Side::Own => [Some(me), None],
            Side::Opponent => [Some(me.opponent()), None],
            Side::Both => [Some(me), Some(me.opponent())],
        };

        holders
            .into_iter()
            .flatten()
            .flat_map(|holder| state.player(holder).zones.cards(self.spec.zone).iter())
            .filter(|card| self.unprotected(state, card))
            .filter(|card| self.passes_filters(card))
            .map(|card| card.id)
            .collect()
    }

    /// Apply the spec's pick to the valid targets.
    #[must_use]
    pub fn select(&self, state: &MatchState) -> Vec<EntityId> {
        let targets = self.valid_targets(state);
        match self.spec.pick {
            Pick::All => targets,
            Pick::First => targets.into_iter().take(1).collect(),
            Pick::UpTo(n) => targets.into_iter().take(n).collect(),
            Pick::LowestAttack => targets
                .into_iter()
                .filter_map(|id| state.card(id).map(|c| (c.current_attack, id)))
                .min_by_key(|&(attack, _)| attack)
                .map(|(_, id)| id)
                .into_iter()
                .collect(),
        }
    }

    fn unprotected(&self, state: &MatchState, card: &Card) -> bool {
        if card.controller == self.acting_player {
            return true;
        }
        let turn = state.turn;
        if card.has(CardCondition::ImmuneToEffects, turn) {
            return false;
        }
        !(self.spec.pick.is_targeted() && card.has(CardCondition::CannotBeTargeted, turn))
    }

    fn passes_filters(&self, card: &Card) -> bool {
        self.spec.filters.iter().all(|filter| self.passes_filter(card, filter))
    }

    fn passes_filter(&self, card: &Card, filter: &TargetFilter) -> bool {
        match filter {
            TargetFilter::Creature => card.is_creature(),
            TargetFilter::NonCreature => !card.is_creature(),
            TargetFilter::OfCategory(category) => card.category() == *category,
            TargetFilter::OfDomain(domain) => card.domain() == Some(*domain),
            TargetFilter::OfSchool(school) => card.school() == Some(*school),
            TargetFilter::OfTier(tier) => card.tier() == Some(*tier),
            TargetFilter::InStance(stance) => card.is_creature() && card.stance == *stance,
            TargetFilter::FaceDown => card.face_down,
            TargetFilter::BaseAttackAbove(n) => card.is_creature() && card.base_attack() > *n,
            TargetFilter::BaseAttackBelow(n) => card.is_creature() && card.base_attack() < *n,
            TargetFilter::BaseDefenseBelow(n) => card.is_creature() && card.base_defense() < *n,
            TargetFilter::NotSource => self.source_entity != Some(card.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, Expiry};
    use crate::core::RulesConfig;

    fn creature(name: &str, domain: Domain, attack: u32) -> CardDefinition {
        CardDefinition::creature(CardId::new(1), name)
            .with_classification(domain, School::Empiricism, Tier::Master)
            .with_stats(attack, 1500)
    }

    fn board() -> (MatchState, Vec<EntityId>) {
        let mut state = MatchState::new(RulesConfig::default(), 1);
        let ids = vec![
            state.add_card(PlayerId::ONE, &creature("A", Domain::Science, 2000), Zone::Battlefield),
            state.add_card(PlayerId::TWO, &creature("B", Domain::Science, 2600), Zone::Battlefield),
            state.add_card(PlayerId::TWO, &creature("C", Domain::Humanities, 1200), Zone::Battlefield),
            state.add_card(PlayerId::TWO, &CardDefinition::reactive(CardId::new(2), "Trap"), Zone::Battlefield),
        ];
        (state, ids)
    }

    #[test]
    fn test_spec_builder() {
        let spec = TargetSpec::opponent_creatures()
            .with_filter(TargetFilter::OfDomain(Domain::Science))
            .first();
        assert_eq!(spec.side, Side::Opponent);
        assert_eq!(spec.zone, Zone::Battlefield);
        assert_eq!(spec.filters.len(), 2);
        assert_eq!(spec.pick, Pick::First);
    }

    #[test]
    fn test_side_and_category() {
        let (state, ids) = board();
        let selector = TargetSelector::new(TargetSpec::opponent_creatures(), PlayerId::ONE);
        assert_eq!(selector.valid_targets(&state), vec![ids[1], ids[2]]);

        let selector = TargetSelector::new(
            TargetSpec::both(Zone::Battlefield).with_filter(TargetFilter::Creature),
            PlayerId::ONE,
        );
        assert_eq!(selector.valid_targets(&state), vec![ids[0], ids[1], ids[2]]);

        let selector = TargetSelector::new(
            TargetSpec::opponent(Zone::Battlefield).with_filter(TargetFilter::NonCreature),
            PlayerId::ONE,
        );
        assert_eq!(selector.valid_targets(&state), vec![ids[3]]);
    }

    #[test]
    fn test_lowest_attack_pick() {
        let (state, ids) = board();
        let selector = TargetSelector::new(TargetSpec::opponent_creatures().lowest_attack(), PlayerId::ONE);
        assert_eq!(selector.select(&state), vec![ids[2]]);
    }

    #[test]
    fn test_not_source() {
        let (state, ids) = board();
        let selector = TargetSelector::new(TargetSpec::both(Zone::Battlefield).others(), PlayerId::TWO)
            .with_source(ids[1]);
        assert!(!selector.valid_targets(&state).contains(&ids[1]));
    }

    #[test]
    fn test_protection_rules() {
        let (mut state, ids) = board();
        state
            .card_mut(ids[1])
            .unwrap()
            .conditions
            .add(CardCondition::CannotBeTargeted, Expiry::Permanent);
        state
            .card_mut(ids[2])
            .unwrap()
            .conditions
            .add(CardCondition::ImmuneToEffects, Expiry::Permanent);

        let targeted = TargetSelector::new(TargetSpec::opponent_creatures().first(), PlayerId::ONE);
        assert!(targeted.select(&state).is_empty());

        let mass = TargetSelector::new(TargetSpec::opponent_creatures(), PlayerId::ONE);
        assert_eq!(mass.select(&state), vec![ids[1]]);

        // Protection only screens hostile selections.
        let own = TargetSelector::new(TargetSpec::own_creatures().first(), PlayerId::TWO);
        assert_eq!(own.select(&state), vec![ids[1]]);
    }

    #[test]
    fn test_base_stat_filters() {
        let (state, ids) = board();
        let above = TargetSelector::new(
            TargetSpec::opponent_creatures().with_filter(TargetFilter::BaseAttackAbove(2500)),
            PlayerId::ONE,
        );
        assert_eq!(above.valid_targets(&state), vec![ids[1]]);

        let below = TargetSelector::new(
            TargetSpec::opponent_creatures().with_filter(TargetFilter::BaseAttackBelow(1500)),
            PlayerId::ONE,
        );
        assert_eq!(below.valid_targets(&state), vec![ids[2]]);
    }
}
