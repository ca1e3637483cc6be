//! Summon costs.
//!
//! | Tier      | Cost                                                        |
//! |-----------|-------------------------------------------------------------|
//! | Scholar   | free                                                        |
//! | Master    | `alchemy_cost` life, only while life is above it            |
//! | Legendary | `ritual_tributes` own creatures, or `ritual_cost` life      |
//!
//! Validation never mutates. `check_summon` turns an offered payment into a
//! `Charge` and `pay` applies it, so every rejection leaves the match as it
//! was.

use smallvec::SmallVec;

use crate::cards::{Category, Tier};
use crate::core::{EntityId, MatchState, PlayerId, RuleResult, RuleViolation, RulesConfig, SummonPayment};
use crate::zones::{Zone, ZonePosition};

/// Price of summoning a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummonCost {
    Free,
    /// Pay life.
    Alchemy { life: u32 },
    /// Tribute creatures or pay life.
    Ritual { life: u32, tributes: usize },
}

impl SummonCost {
    #[must_use]
    pub fn for_tier(config: &RulesConfig, tier: Tier) -> Self {
        match tier {
            Tier::Scholar => SummonCost::Free,
            Tier::Master => SummonCost::Alchemy {
                life: config.alchemy_cost,
            },
            Tier::Legendary => SummonCost::Ritual {
                life: config.ritual_cost,
                tributes: config.ritual_tributes,
            },
        }
    }
}

/// What a validated summon will take from its player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Charge {
    Nothing,
    Life(u32),
    Tribute(SmallVec<[EntityId; 2]>),
}

/// Cost of summoning a card. Cards without a tier summon for free.
#[must_use]
pub fn summon_cost(state: &MatchState, card: EntityId) -> SummonCost {
    state
        .card(card)
        .and_then(|c| c.tier())
        .map_or(SummonCost::Free, |tier| SummonCost::for_tier(&state.config, tier))
}

/// Creatures `player` could tribute for `card`, in battlefield order.
fn tribute_pool(state: &MatchState, player: PlayerId, card: EntityId) -> Vec<EntityId> {
    state
        .player(player)
        .creatures()
        .map(|c| c.id)
        .filter(|&id| id != card)
        .collect()
}

/// Every payment that would currently be accepted for `card`.
///
/// Empty when the card cannot be paid for at all. Zone, category and
/// summon-limit checks are not part of this.
#[must_use]
pub fn payment_options(state: &MatchState, player: PlayerId, card: EntityId) -> Vec<SummonPayment> {
    let life = state.player(player).life();
    match summon_cost(state, card) {
        SummonCost::Free => vec![SummonPayment::Free],
        SummonCost::Alchemy { life: cost } => {
            if life > cost {
                vec![SummonPayment::Life]
            } else {
                Vec::new()
            }
        }
        SummonCost::Ritual { life: cost, tributes } => {
            let mut options = Vec::new();
            if life > cost {
                options.push(SummonPayment::Life);
            }
            let pool = tribute_pool(state, player, card);
            if tributes == 2 {
                for (i, &first) in pool.iter().enumerate() {
                    for &second in &pool[i + 1..] {
                        options.push(SummonPayment::Tribute(SmallVec::from_buf([first, second])));
                    }
                }
            } else if pool.len() >= tributes {
                options.push(SummonPayment::Tribute(pool.into_iter().take(tributes).collect()));
            }
            options
        }
    }
}

/// Validate a summon of `card` by `player` and work out its charge.
///
/// Checks, in order: the card is in `player`'s hand, it is a creature, the
/// summon limit, then the tier cost. Phase gating is the caller's job.
pub fn check_summon(
    state: &MatchState,
    player: PlayerId,
    card: EntityId,
    payment: &SummonPayment,
) -> RuleResult<Charge> {
    let (holder, zone) = state.locate(card).ok_or(RuleViolation::CardNotFound(card))?;
    if holder != player {
        return Err(RuleViolation::NotControlled(card));
    }
    if zone != Zone::Hand {
        return Err(RuleViolation::NotInZone {
            card,
            expected: Zone::Hand,
        });
    }
    let target = state.card(card).ok_or(RuleViolation::CardNotFound(card))?;
    if !target.is_creature() {
        return Err(RuleViolation::WrongCategory {
            card,
            expected: Category::Creature,
        });
    }
    let summoner = state.player(player);
    if !summoner.can_summon_more() {
        return Err(RuleViolation::SummonLimitReached {
            limit: summoner.max_summons_per_turn,
        });
    }

    let life = summoner.life();
    let name = target.name();
    match summon_cost(state, card) {
        SummonCost::Free => Ok(Charge::Nothing),
        SummonCost::Alchemy { life: cost } => {
            if life > cost {
                Ok(Charge::Life(cost))
            } else {
                Err(RuleViolation::InsufficientResources {
                    reason: format!("{} requires more than {} life (you have {})", name, cost, life),
                })
            }
        }
        SummonCost::Ritual { life: cost, tributes } => {
            let pool = tribute_pool(state, player, card);
            if life <= cost && pool.len() < tributes {
                return Err(RuleViolation::InsufficientResources {
                    reason: format!(
                        "{} requires {} creatures to tribute or more than {} life",
                        name, tributes, cost
                    ),
                });
            }
            match payment {
                SummonPayment::Tribute(chosen) => {
                    check_tributes(&pool, chosen, tributes)?;
                    Ok(Charge::Tribute(chosen.clone()))
                }
                SummonPayment::Life if life > cost => Ok(Charge::Life(cost)),
                SummonPayment::Life => Err(RuleViolation::InsufficientResources {
                    reason: format!("{} requires more than {} life (you have {})", name, cost, life),
                }),
                SummonPayment::Free => Err(RuleViolation::InsufficientResources {
                    reason: format!("{} must be paid for with tributes or life", name),
                }),
            }
        }
    }
}

fn check_tributes(pool: &[EntityId], chosen: &[EntityId], needed: usize) -> RuleResult<()> {
    if chosen.len() != needed {
        return Err(RuleViolation::InvalidTribute(format!(
            "exactly {} creatures must be tributed",
            needed
        )));
    }
    for (i, id) in chosen.iter().enumerate() {
        if chosen[..i].contains(id) {
            return Err(RuleViolation::InvalidTribute(format!("{} was chosen twice", id)));
        }
        if !pool.contains(id) {
            return Err(RuleViolation::InvalidTribute(format!(
                "{} is not one of your creatures on the battlefield",
                id
            )));
        }
    }
    Ok(())
}

/// Take a validated charge from `player`.
pub fn pay(state: &mut MatchState, player: PlayerId, charge: &Charge) {
    match charge {
        Charge::Nothing => {}
        Charge::Life(amount) => {
            state.player_mut(player).take_damage(*amount);
        }
        Charge::Tribute(cards) => {
            for &card in cards {
                state.move_card(card, Zone::Graveyard, ZonePosition::Back);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, Domain, School};
    use smallvec::smallvec;

    fn creature(tier: Tier) -> CardDefinition {
        CardDefinition::creature(CardId::new(1), "Scribe")
            .with_classification(Domain::Humanities, School::Humanism, tier)
            .with_stats(1000, 1000)
    }

    fn setup(tier: Tier) -> (MatchState, EntityId) {
        let mut state = MatchState::new(RulesConfig::default(), 1);
        let card = state.add_card(PlayerId::ONE, &creature(tier), Zone::Hand);
        (state, card)
    }

    #[test]
    fn test_scholar_is_free() {
        let (state, card) = setup(Tier::Scholar);
        assert_eq!(
            check_summon(&state, PlayerId::ONE, card, &SummonPayment::Free),
            Ok(Charge::Nothing)
        );
    }

    #[test]
    fn test_master_needs_life_above_cost() {
        let (mut state, card) = setup(Tier::Master);
        assert_eq!(
            check_summon(&state, PlayerId::ONE, card, &SummonPayment::Life),
            Ok(Charge::Life(1000))
        );

        state.player_mut(PlayerId::ONE).take_damage(19_000);
        let err = check_summon(&state, PlayerId::ONE, card, &SummonPayment::Life).unwrap_err();
        assert!(matches!(err, RuleViolation::InsufficientResources { .. }));
        assert!(payment_options(&state, PlayerId::ONE, card).is_empty());
    }

    #[test]
    fn test_legendary_without_resources() {
        let (mut state, card) = setup(Tier::Legendary);
        state.player_mut(PlayerId::ONE).take_damage(17_000);

        for payment in [SummonPayment::Life, SummonPayment::Free, SummonPayment::Tribute(SmallVec::new())] {
            let err = check_summon(&state, PlayerId::ONE, card, &payment).unwrap_err();
            assert!(matches!(err, RuleViolation::InsufficientResources { .. }));
        }
    }

    #[test]
    fn test_legendary_tribute_options() {
        let (mut state, card) = setup(Tier::Legendary);
        let a = state.add_card(PlayerId::ONE, &creature(Tier::Scholar), Zone::Battlefield);
        let b = state.add_card(PlayerId::ONE, &creature(Tier::Scholar), Zone::Battlefield);
        let c = state.add_card(PlayerId::ONE, &creature(Tier::Scholar), Zone::Battlefield);

        let options = payment_options(&state, PlayerId::ONE, card);
        assert_eq!(options.len(), 4);
        assert_eq!(options[0], SummonPayment::Life);
        assert!(options.contains(&SummonPayment::Tribute(smallvec![a, c])));
        assert!(options.contains(&SummonPayment::Tribute(smallvec![b, c])));
    }

    #[test]
    fn test_invalid_tributes() {
        let (mut state, card) = setup(Tier::Legendary);
        let a = state.add_card(PlayerId::ONE, &creature(Tier::Scholar), Zone::Battlefield);
        state.add_card(PlayerId::ONE, &creature(Tier::Scholar), Zone::Battlefield);
        let foreign = state.add_card(PlayerId::TWO, &creature(Tier::Scholar), Zone::Battlefield);

        for chosen in [smallvec![a, a], smallvec![a, foreign], smallvec![a]] {
            let err = check_summon(&state, PlayerId::ONE, card, &SummonPayment::Tribute(chosen)).unwrap_err();
            assert!(matches!(err, RuleViolation::InvalidTribute(_)));
        }
    }

    #[test]
    fn test_limit_checked_before_cost() {
        let (mut state, card) = setup(Tier::Legendary);
        state.player_mut(PlayerId::ONE).summons_this_turn = 2;
        state.player_mut(PlayerId::ONE).take_damage(19_000);
        assert_eq!(
            check_summon(&state, PlayerId::ONE, card, &SummonPayment::Life),
            Err(RuleViolation::SummonLimitReached { limit: 2 })
        );
    }

    #[test]
    fn test_pay_tribute_moves_to_graveyard() {
        let (mut state, _card) = setup(Tier::Legendary);
        let a = state.add_card(PlayerId::ONE, &creature(Tier::Scholar), Zone::Battlefield);
        let b = state.add_card(PlayerId::ONE, &creature(Tier::Scholar), Zone::Battlefield);

        pay(&mut state, PlayerId::ONE, &Charge::Tribute(smallvec![a, b]));
        assert_eq!(state.player(PlayerId::ONE).graveyard().len(), 2);
        assert_eq!(state.player(PlayerId::ONE).life(), 20_000);
    }

    #[test]
    fn test_wrong_zone_and_owner() {
        let (state, card) = setup(Tier::Scholar);
        assert_eq!(
            check_summon(&state, PlayerId::TWO, card, &SummonPayment::Free),
            Err(RuleViolation::NotControlled(card))
        );
        assert_eq!(
            check_summon(&state, PlayerId::ONE, EntityId(99), &SummonPayment::Free),
            Err(RuleViolation::CardNotFound(EntityId(99)))
        );
    }
}
