//! Attack legality.
//!
//! Read-only checks behind `Duel::declare_attack`: who may attack, what
//! they may aim at, and which reactives a defender may answer with.
//! Resolution itself is in `combat`.

use crate::cards::{Card, CardCondition, Category, PlayerCondition, Stance};
use crate::core::{AttackTarget, EntityId, MatchState, PlayerId, RuleResult, RuleViolation};
use crate::effects::is_sanctuary_shielded;
use crate::zones::Zone;

/// What a legal attack will resolve as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strike {
    Battle(EntityId),
    Direct { halved: bool },
}

/// Whether an attacker may attack again only through an extra-attack grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackRight {
    Fresh,
    Extra,
}

fn battlefield_card<'a>(state: &'a MatchState, player: PlayerId, card: EntityId) -> RuleResult<&'a Card> {
    let (holder, zone) = state.locate(card).ok_or(RuleViolation::CardNotFound(card))?;
    if holder != player {
        return Err(RuleViolation::NotControlled(card));
    }
    if zone != Zone::Battlefield {
        return Err(RuleViolation::NotInZone {
            card,
            expected: Zone::Battlefield,
        });
    }
    state.card(card).ok_or(RuleViolation::CardNotFound(card))
}

/// Check that the active player's `attacker` may declare an attack now.
///
/// Phase gating is the caller's job; the first-turn rule is checked here.
pub fn check_attacker(state: &MatchState, attacker: EntityId) -> RuleResult<AttackRight> {
    if state.turn == 1 && !state.config.first_turn_attacks {
        return Err(RuleViolation::FirstTurnAttack);
    }
    let player = state.active();
    let card = battlefield_card(state, player, attacker)?;
    if !card.is_creature() {
        return Err(RuleViolation::WrongCategory {
            card: attacker,
            expected: Category::Creature,
        });
    }
    let refuse = |reason: &str| {
        Err(RuleViolation::CannotAttack {
            card: attacker,
            reason: reason.to_string(),
        })
    };
    if card.face_down {
        return refuse("it is face-down");
    }
    if card.stance != Stance::Attack {
        return refuse("it is in defense stance");
    }
    if card.has(CardCondition::CannotAttack, state.turn) {
        return refuse("it is restrained this turn");
    }
    if !card.attacked_this_turn {
        return Ok(AttackRight::Fresh);
    }
    if state
        .player(player)
        .conditions
        .has(PlayerCondition::ExtraAttack, state.turn)
    {
        Ok(AttackRight::Extra)
    } else {
        Err(RuleViolation::AlreadyAttacked(attacker))
    }
}

/// Check an attack target for `attacker`, whoever controls it.
pub fn check_target(state: &MatchState, attacker: EntityId, target: AttackTarget) -> RuleResult<Strike> {
    let source = state.card(attacker).ok_or(RuleViolation::CardNotFound(attacker))?;
    let defending = source.controller.opponent();
    let turn = state.turn;

    match target {
        AttackTarget::Direct => {
            if state.player(defending).creature_count() == 0 {
                Ok(Strike::Direct { halved: false })
            } else if source.has(CardCondition::DirectAttackHalf, turn) {
                Ok(Strike::Direct { halved: true })
            } else {
                Err(RuleViolation::InvalidTarget {
                    card: attacker,
                    reason: "the opponent still controls creatures".to_string(),
                })
            }
        }
        AttackTarget::Creature(id) => {
            let card = battlefield_card(state, defending, id).map_err(|_| RuleViolation::InvalidTarget {
                card: id,
                reason: "not an opposing battlefield card".to_string(),
            })?;
            let invalid = |reason: &str| {
                Err(RuleViolation::InvalidTarget {
                    card: id,
                    reason: reason.to_string(),
                })
            };
            if !card.is_creature() {
                return invalid("not a creature");
            }
            if card.has(CardCondition::CannotBeAttacked, turn) {
                return invalid("it cannot be attacked");
            }
            if card.has(CardCondition::CannotBeTargeted, turn) {
                return invalid("it cannot be targeted");
            }
            if is_sanctuary_shielded(state, id) {
                return invalid("it is sheltered by Sanctuary");
            }
            Ok(Strike::Battle(id))
        }
    }
}

/// Every target `attacker` could legally aim at, creatures first.
#[must_use]
pub fn legal_attack_targets(state: &MatchState, attacker: EntityId) -> Vec<AttackTarget> {
    let Some(source) = state.card(attacker) else {
        return Vec::new();
    };
    let defending = source.controller.opponent();
    state
        .player(defending)
        .creature_ids()
        .into_iter()
        .map(AttackTarget::Creature)
        .chain(std::iter::once(AttackTarget::Direct))
        .filter(|&target| check_target(state, attacker, target).is_ok())
        .collect()
}

/// Check that `player` may activate the reactive `card` right now.
///
/// Set face-down reactives always qualify; reactives in hand need
/// `CanActivateFromHand`.
pub fn check_reactive(state: &MatchState, player: PlayerId, card: EntityId) -> RuleResult<()> {
    let (holder, zone) = state.locate(card).ok_or(RuleViolation::CardNotFound(card))?;
    if holder != player {
        return Err(RuleViolation::NotControlled(card));
    }
    let reactive = state.card(card).ok_or(RuleViolation::CardNotFound(card))?;
    if !reactive.is_reactive() {
        return Err(RuleViolation::WrongCategory {
            card,
            expected: Category::Reactive,
        });
    }
    let ready = match zone {
        Zone::Battlefield => reactive.face_down,
        Zone::Hand => reactive.has(CardCondition::CanActivateFromHand, state.turn),
        Zone::Deck | Zone::Graveyard => false,
    };
    if ready {
        Ok(())
    } else {
        Err(RuleViolation::EffectUnavailable {
            card,
            reason: "reactives must be set face-down or playable from hand".to_string(),
        })
    }
}

/// Reactives `player` could answer an attack with.
#[must_use]
pub fn response_candidates(state: &MatchState, player: PlayerId) -> Vec<EntityId> {
    let holder = state.player(player);
    holder
        .battlefield()
        .iter()
        .chain(holder.hand().iter())
        .map(|card| card.id)
        .filter(|&id| check_reactive(state, player, id).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, Domain, Expiry, School, Tier};
    use crate::core::RulesConfig;

    fn creature(name: &str, school: School) -> CardDefinition {
        CardDefinition::creature(CardId::new(1), name)
            .with_classification(Domain::Humanities, school, Tier::Scholar)
            .with_stats(1500, 1000)
    }

    fn battle_state() -> MatchState {
        let mut state = MatchState::new(RulesConfig::default(), 3);
        state.turn = 2;
        state
    }

    #[test]
    fn test_first_turn_attack_forbidden() {
        let mut state = MatchState::new(RulesConfig::default(), 3);
        let attacker = state.add_card(PlayerId::ONE, &creature("A", School::Materialism), Zone::Battlefield);
        assert_eq!(check_attacker(&state, attacker), Err(RuleViolation::FirstTurnAttack));

        state.config = state.config.clone().with_first_turn_attacks(true);
        assert_eq!(check_attacker(&state, attacker), Ok(AttackRight::Fresh));
    }

    #[test]
    fn test_attacker_restrictions() {
        let mut state = battle_state();
        let attacker = state.add_card(PlayerId::ONE, &creature("A", School::Materialism), Zone::Battlefield);

        state.card_mut(attacker).unwrap().stance = Stance::Defense;
        assert!(matches!(
            check_attacker(&state, attacker),
            Err(RuleViolation::CannotAttack { .. })
        ));

        let card = state.card_mut(attacker).unwrap();
        card.stance = Stance::Attack;
        card.attacked_this_turn = true;
        assert_eq!(check_attacker(&state, attacker), Err(RuleViolation::AlreadyAttacked(attacker)));

        state
            .player_mut(PlayerId::ONE)
            .conditions
            .add(PlayerCondition::ExtraAttack, Expiry::ThroughTurn(2));
        assert_eq!(check_attacker(&state, attacker), Ok(AttackRight::Extra));
    }

    #[test]
    fn test_direct_attack_needs_empty_board() {
        let mut state = battle_state();
        let attacker = state.add_card(PlayerId::ONE, &creature("A", School::Materialism), Zone::Battlefield);
        assert_eq!(
            check_target(&state, attacker, AttackTarget::Direct),
            Ok(Strike::Direct { halved: false })
        );

        state.add_card(PlayerId::TWO, &creature("B", School::Materialism), Zone::Battlefield);
        assert!(check_target(&state, attacker, AttackTarget::Direct).is_err());

        state
            .card_mut(attacker)
            .unwrap()
            .conditions
            .add(CardCondition::DirectAttackHalf, Expiry::Permanent);
        assert_eq!(
            check_target(&state, attacker, AttackTarget::Direct),
            Ok(Strike::Direct { halved: true })
        );
    }

    #[test]
    fn test_protected_targets_excluded() {
        let mut state = battle_state();
        let attacker = state.add_card(PlayerId::ONE, &creature("A", School::Materialism), Zone::Battlefield);
        let open = state.add_card(PlayerId::TWO, &creature("Open", School::Materialism), Zone::Battlefield);
        let hidden = state.add_card(PlayerId::TWO, &creature("Hidden", School::Materialism), Zone::Battlefield);
        let poet = state.add_card(PlayerId::TWO, &creature("Poet", School::Humanism), Zone::Battlefield);
        state
            .card_mut(hidden)
            .unwrap()
            .conditions
            .add(CardCondition::CannotBeAttacked, Expiry::ThroughTurn(2));
        state.add_card(PlayerId::TWO, &creature("Nelson Mandela", School::Humanism), Zone::Graveyard);

        assert_eq!(legal_attack_targets(&state, attacker), vec![AttackTarget::Creature(open)]);
        assert!(check_target(&state, attacker, AttackTarget::Creature(poet)).is_err());
        assert!(check_target(&state, attacker, AttackTarget::Creature(attacker)).is_err());
    }

    #[test]
    fn test_response_candidates() {
        let mut state = battle_state();
        let trap = CardDefinition::reactive(CardId::new(9), "Trap");
        let set = state.add_card(PlayerId::TWO, &trap, Zone::Battlefield);
        state.card_mut(set).unwrap().face_down = true;
        let held = state.add_card(PlayerId::TWO, &trap, Zone::Hand);
        let ready = state.add_card(PlayerId::TWO, &trap, Zone::Hand);
        state
            .card_mut(ready)
            .unwrap()
            .conditions
            .add(CardCondition::CanActivateFromHand, Expiry::Permanent);

        assert_eq!(response_candidates(&state, PlayerId::TWO), vec![set, ready]);
        assert!(check_reactive(&state, PlayerId::TWO, held).is_err());
        assert_eq!(
            check_reactive(&state, PlayerId::ONE, set),
            Err(RuleViolation::NotControlled(set))
        );
    }
}
