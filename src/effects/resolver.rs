//! Effect resolution: applying primitives to a match.
//!
//! The resolver knows nothing about individual cards. It validates that a
//! primitive's target exists, performs the mutation, and reports whether
//! anything happened. Depletion (empty deck, protected card) is `Skipped`,
//! never `Failed`.

use crate::cards::{AuraKind, Card, CardCondition};
use crate::combat::{self, DestroyCause, Destruction};
use crate::core::{EntityId, MatchState};
use crate::zones::{Zone, ZonePosition};

use super::Effect;

/// Result of resolving an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Effect resolved successfully.
    Success,
    /// Effect failed (e.g., missing target).
    Failed(String),
    /// Nothing to do (empty deck, immune card).
    Skipped,
}

impl ResolveResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ResolveResult::Success)
    }
}

/// Applies effects to a match.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply a sequence of effects, collecting one result per effect.
    pub fn apply_all(state: &mut MatchState, effects: &[Effect]) -> Vec<ResolveResult> {
        effects.iter().map(|effect| Self::apply(state, effect)).collect()
    }

    /// Apply a single effect.
    pub fn apply(state: &mut MatchState, effect: &Effect) -> ResolveResult {
        tracing::trace!(?effect, "applying effect");
        match effect {
            Effect::Damage { player, amount } => {
                state.player_mut(*player).take_damage(*amount);
                state.check_victory();
                ResolveResult::Success
            }

            Effect::Heal { player, amount } => {
                state.player_mut(*player).heal(*amount);
                ResolveResult::Success
            }

            Effect::Draw { player, count } => {
                let drawn = (0..*count)
                    .map_while(|_| state.player_mut(*player).draw())
                    .count();
                if drawn > 0 || *count == 0 {
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            Effect::MoveCard {
                card,
                zone,
                position,
            } => {
                if state.move_card(*card, *zone, *position) {
                    ResolveResult::Success
                } else {
                    ResolveResult::Failed(format!("Card {} not found", card))
                }
            }

            Effect::Destroy { card } => {
                let outcome = combat::destroy(state, *card, DestroyCause::Effect);
                state.check_victory();
                match outcome {
                    Destruction::Destroyed | Destruction::ReturnedToHand => ResolveResult::Success,
                    Destruction::Immune | Destruction::Missing => ResolveResult::Skipped,
                }
            }

            Effect::Shuffle {
                player,
                zone,
                count,
            } => {
                let count = count.unwrap_or(usize::MAX);
                state.players[*player]
                    .zones
                    .shuffle_front(*zone, count, &mut state.rng);
                ResolveResult::Success
            }

            Effect::Summon { card, stance } => {
                let Some(target) = state.card(*card) else {
                    return ResolveResult::Failed(format!("Card {} not found", card));
                };
                if !target.is_creature() {
                    return ResolveResult::Failed(format!("{} is not a creature", target.name()));
                }
                if target.zone == Zone::Battlefield {
                    return ResolveResult::Skipped;
                }
                state.move_card(*card, Zone::Battlefield, ZonePosition::Back);
                if let Some(summoned) = state.card_mut(*card) {
                    summoned.stance = *stance;
                    summoned.face_down = false;
                }
                ResolveResult::Success
            }

            Effect::TakeControl { card, player } => {
                let Some(target) = state.card_mut(*card) else {
                    return ResolveResult::Failed(format!("Card {} not found", card));
                };
                if target.zone != Zone::Battlefield {
                    return ResolveResult::Failed(format!("{} is not on the battlefield", target.name()));
                }
                if target.controller == *player {
                    return ResolveResult::Skipped;
                }
                target.controller = *player;
                state.move_card(*card, Zone::Battlefield, ZonePosition::Back);
                ResolveResult::Success
            }

            Effect::AdjustStats {
                card,
                attack,
                defense,
            } => Self::with_card(state, *card, |c| c.adjust_stats(*attack, *defense)),

            Effect::SetStats {
                card,
                attack,
                defense,
            } => Self::with_card(state, *card, |c| {
                c.set_stats(*attack, *defense);
                c.conditions
                    .remove(CardCondition::AuraApplied(AuraKind::Enlightenment));
            }),

            Effect::ResetStats { card } => Self::with_card(state, *card, |c| {
                c.reset_stats();
                c.conditions
                    .remove(CardCondition::AuraApplied(AuraKind::Enlightenment));
            }),

            Effect::SetSchool { card, school } => Self::with_card(state, *card, |c| c.set_school(*school)),

            Effect::SetStance { card, stance } => Self::with_card(state, *card, |c| c.stance = *stance),

            Effect::AddCardCondition {
                card,
                condition,
                expiry,
            } => Self::with_card(state, *card, |c| c.conditions.add(*condition, *expiry)),

            Effect::AddPlayerCondition {
                player,
                condition,
                expiry,
            } => {
                state.player_mut(*player).conditions.add(*condition, *expiry);
                ResolveResult::Success
            }

            Effect::Batch(effects) => {
                for sub_effect in effects {
                    let result = Self::apply(state, sub_effect);
                    if matches!(result, ResolveResult::Failed(_)) {
                        return result;
                    }
                }
                ResolveResult::Success
            }
        }
    }

    fn with_card(
        state: &mut MatchState,
        card: EntityId,
        mutate: impl FnOnce(&mut Card),
    ) -> ResolveResult {
        match state.card_mut(card) {
            Some(target) => {
                mutate(target);
                ResolveResult::Success
            }
            None => ResolveResult::Failed(format!("Card {} not found", card)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, Domain, Expiry, School, Stance, Tier};
    use crate::core::{PlayerId, RulesConfig};

    fn creature(attack: u32) -> CardDefinition {
        CardDefinition::creature(CardId::new(1), "Subject")
            .with_classification(Domain::Science, School::Empiricism, Tier::Scholar)
            .with_stats(attack, 1000)
    }

    fn setup() -> MatchState {
        MatchState::new(RulesConfig::default(), 42)
    }

    #[test]
    fn test_damage_and_heal() {
        let mut state = setup();
        EffectResolver::apply(&mut state, &Effect::damage(PlayerId::TWO, 3000));
        assert_eq!(state.player(PlayerId::TWO).life(), 17_000);

        EffectResolver::apply(&mut state, &Effect::heal(PlayerId::TWO, 5000));
        assert_eq!(state.player(PlayerId::TWO).life(), 20_000);
    }

    #[test]
    fn test_lethal_damage_decides_match() {
        let mut state = setup();
        EffectResolver::apply(&mut state, &Effect::damage(PlayerId::ONE, 25_000));
        assert_eq!(state.winner(), Some(PlayerId::TWO));
    }

    #[test]
    fn test_draw_stops_at_empty_deck() {
        let mut state = setup();
        state.add_card(PlayerId::ONE, &creature(1000), Zone::Deck);

        let result = EffectResolver::apply(&mut state, &Effect::draw(PlayerId::ONE, 3));
        assert_eq!(result, ResolveResult::Success);
        assert_eq!(state.player(PlayerId::ONE).hand().len(), 1);

        let result = EffectResolver::apply(&mut state, &Effect::draw(PlayerId::ONE, 1));
        assert_eq!(result, ResolveResult::Skipped);
    }

    #[test]
    fn test_destroy_respects_immunity() {
        let mut state = setup();
        let id = state.add_card(PlayerId::TWO, &creature(1000), Zone::Battlefield);
        state
            .card_mut(id)
            .unwrap()
            .conditions
            .add(CardCondition::DestructionImmune, Expiry::Permanent);

        let result = EffectResolver::apply(&mut state, &Effect::destroy(id));
        assert_eq!(result, ResolveResult::Skipped);
        assert_eq!(state.locate(id), Some((PlayerId::TWO, Zone::Battlefield)));
    }

    #[test]
    fn test_revive_from_graveyard() {
        let mut state = setup();
        let id = state.add_card(PlayerId::ONE, &creature(2400), Zone::Graveyard);

        let result = EffectResolver::apply(&mut state, &Effect::revive(id, 1000, 1000));
        assert_eq!(result, ResolveResult::Success);

        let card = state.card(id).unwrap();
        assert_eq!(card.zone, Zone::Battlefield);
        assert_eq!(card.stance, Stance::Attack);
        assert_eq!((card.current_attack, card.current_defense), (1000, 1000));
    }

    #[test]
    fn test_take_control() {
        let mut state = setup();
        let id = state.add_card(PlayerId::TWO, &creature(1200), Zone::Battlefield);

        let effect = Effect::TakeControl {
            card: id,
            player: PlayerId::ONE,
        };
        assert_eq!(EffectResolver::apply(&mut state, &effect), ResolveResult::Success);
        assert_eq!(state.locate(id), Some((PlayerId::ONE, Zone::Battlefield)));
        assert_eq!(state.card(id).unwrap().owner(), PlayerId::TWO);

        // Destroyed stolen cards go home.
        EffectResolver::apply(&mut state, &Effect::destroy(id));
        assert_eq!(state.locate(id), Some((PlayerId::TWO, Zone::Graveyard)));
    }

    #[test]
    fn test_batch_stops_on_failure() {
        let mut state = setup();
        let effect = Effect::batch([
            Effect::damage(PlayerId::TWO, 100),
            Effect::adjust(EntityId(999), 100, 0),
            Effect::damage(PlayerId::TWO, 100),
        ]);

        let result = EffectResolver::apply(&mut state, &effect);
        assert!(matches!(result, ResolveResult::Failed(_)));
        assert_eq!(state.player(PlayerId::TWO).life(), 19_900);
    }

    #[test]
    fn test_reset_clears_aura_marker() {
        let mut state = setup();
        let id = state.add_card(PlayerId::ONE, &creature(1000), Zone::Battlefield);
        {
            let card = state.card_mut(id).unwrap();
            card.adjust_stats(1000, 0);
            card.conditions.add(
                CardCondition::AuraApplied(AuraKind::Enlightenment),
                Expiry::Permanent,
            );
        }

        EffectResolver::apply(&mut state, &Effect::ResetStats { card: id });
        let card = state.card(id).unwrap();
        assert_eq!(card.current_attack, 1000);
        assert!(card.conditions.is_empty());
    }

    #[test]
    fn test_shuffle_top_keeps_rest() {
        let mut state = setup();
        let ids: Vec<_> = (0..6)
            .map(|_| state.add_card(PlayerId::ONE, &creature(1000), Zone::Deck))
            .collect();

        EffectResolver::apply(&mut state, &Effect::shuffle_top(PlayerId::ONE, 3));
        let deck = state.player(PlayerId::ONE).zones.ids(Zone::Deck);
        assert_eq!(&deck[3..], &ids[3..]);

        let mut front = deck[..3].to_vec();
        front.sort();
        assert_eq!(front, ids[..3].to_vec());
    }
}
