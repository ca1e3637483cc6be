//! Scripted opponents.
//!
//! A `TurnPolicy` only ever looks at a `Duel` and proposes the same
//! `Action`s a human would; it never mutates state. `play_turn` feeds its
//! proposals to the duel one call at a time until the turn passes.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, EffectTrigger, Stance, Tier};
use crate::combat::{assess_battle, BattlePreview};
use crate::core::{Action, AttackTarget, EntityId, GameRng, Phase, PlayerId, RuleResult};
use crate::rules::{Duel, Outcome, PhaseStep};

// =============================================================================
// Policy trait
// =============================================================================

/// Decision procedure for one seat.
pub trait TurnPolicy {
    /// Next action for the active player of `duel`.
    fn next_action(&mut self, duel: &Duel) -> Action;

    /// Reactive to answer an attack with, when this seat is defending.
    fn respond(&mut self, duel: &Duel, attacker: EntityId, target: AttackTarget) -> Option<EntityId>;
}

// =============================================================================
// Heuristic policy
// =============================================================================

/// How often the policy deliberately picks a random attack target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn misplay_rate(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Normal => 0.1,
            Difficulty::Hard => 0.0,
        }
    }
}

const EFFECT_CHANCE: f64 = 0.4;
const INSTANT_CHANCE: f64 = 0.3;
const TRAP_CHANCE: f64 = 0.6;
const TRAP_MIN_CREATURES: usize = 2;
const SUMMON_CANDIDATES: usize = 3;

/// Rolls made at most once per turn.
#[derive(Clone, Debug, Default)]
struct TurnMemo {
    turn: u32,
    summons_tried: usize,
    tried: Vec<EntityId>,
    effect_rolled: bool,
    instant_rolled: bool,
    trap_rolled: bool,
}

/// The scripted opponent.
///
/// Main phase: summon the best-synergy creatures up to the summon limit,
/// then maybe activate one manual effect, maybe play one instant, and maybe
/// set a reactive when two or more creatures need protecting. Battle phase:
/// attack with everything that can, picking targets by priority.
#[derive(Clone, Debug)]
pub struct HeuristicPolicy {
    difficulty: Difficulty,
    rng: GameRng,
    memo: TurnMemo,
}

impl HeuristicPolicy {
    #[must_use]
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: GameRng::new(seed),
            memo: TurnMemo::default(),
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn memo_for(&mut self, turn: u32) -> &mut TurnMemo {
        if self.memo.turn != turn {
            self.memo = TurnMemo {
                turn,
                ..TurnMemo::default()
            };
        }
        &mut self.memo
    }

    fn main_phase(&mut self, duel: &Duel) -> Action {
        let state = duel.state();
        let player = state.active();
        let me = state.player(player);

        if me.can_summon_more() && self.memo.summons_tried < SUMMON_CANDIDATES {
            let mut ranked: Vec<&Card> = me
                .hand()
                .iter()
                .filter(|card| card.is_creature() && !self.memo.tried.contains(&card.id))
                .collect();
            ranked.sort_by_key(|card| std::cmp::Reverse(synergy_score(duel, player, card)));
            for card in ranked {
                self.memo.tried.push(card.id);
                if let Some(payment) = duel.summon_options(card.id).into_iter().next() {
                    self.memo.summons_tried += 1;
                    return Action::Summon {
                        card: card.id,
                        stance: smart_stance(card),
                        payment,
                    };
                }
            }
        }

        let legal = duel.legal_actions();

        if !self.memo.effect_rolled {
            self.memo.effect_rolled = true;
            let usable: Vec<EntityId> = me
                .creatures()
                .filter(|card| card.trigger() == EffectTrigger::Manual)
                .map(|card| card.id)
                .filter(|&id| legal.contains(&Action::ActivateEffect(id)))
                .collect();
            if !usable.is_empty() && self.rng.chance(EFFECT_CHANCE) {
                if let Some(&card) = self.rng.choose(&usable) {
                    return Action::ActivateEffect(card);
                }
            }
        }

        if !self.memo.instant_rolled {
            self.memo.instant_rolled = true;
            let instant = me.hand().iter().find(|card| card.is_instant()).map(|card| card.id);
            if let Some(card) = instant {
                if self.rng.chance(INSTANT_CHANCE) {
                    return Action::ActivateInstant(card);
                }
            }
        }

        if !self.memo.trap_rolled {
            self.memo.trap_rolled = true;
            let trap = me.hand().iter().find(|card| card.is_reactive()).map(|card| card.id);
            if let Some(card) = trap {
                if me.creature_count() >= TRAP_MIN_CREATURES && self.rng.chance(TRAP_CHANCE) {
                    return Action::SetReactive(card);
                }
            }
        }

        Action::AdvancePhase
    }

    fn battle_phase(&mut self, duel: &Duel) -> Action {
        let state = duel.state();
        for attacker in state.player(state.active()).creature_ids() {
            let targets = duel.legal_attack_targets(attacker);
            if targets.is_empty() {
                continue;
            }
            let target = if self.rng.chance(self.difficulty.misplay_rate()) {
                tracing::debug!(attacker = %attacker, "policy misplays");
                self.rng.choose(&targets).copied()
            } else {
                smart_target(duel, attacker, &targets)
            };
            if let Some(target) = target {
                return Action::Attack {
                    attacker,
                    target,
                    response: None,
                };
            }
        }
        Action::AdvancePhase
    }
}

impl TurnPolicy for HeuristicPolicy {
    fn next_action(&mut self, duel: &Duel) -> Action {
        let state = duel.state();
        self.memo_for(state.turn);
        match state.phase {
            Phase::Draw => Action::AdvancePhase,
            Phase::Main => self.main_phase(duel),
            Phase::Battle => self.battle_phase(duel),
            Phase::End => Action::EndTurn,
        }
    }

    fn respond(&mut self, duel: &Duel, attacker: EntityId, target: AttackTarget) -> Option<EntityId> {
        let state = duel.state();
        let defender = state.active().opponent();
        let threatening = match target {
            AttackTarget::Direct => true,
            AttackTarget::Creature(id) => {
                assess_battle(state, attacker, id).is_some_and(|preview| preview.defender_falls())
            }
        };
        if !threatening {
            return None;
        }
        duel.response_candidates(defender).first().copied()
    }
}

/// Summon priority: shared domain and school with the board, tier, raw power.
fn synergy_score(duel: &Duel, player: PlayerId, card: &Card) -> u32 {
    let board: Vec<&Card> = duel.state().player(player).creatures().collect();
    let same_domain = board.iter().filter(|c| c.domain().is_some() && c.domain() == card.domain()).count();
    let same_school = board.iter().filter(|c| c.school().is_some() && c.school() == card.school()).count();

    let mut score = same_domain as u32 * 10 + same_school as u32 * 5;
    if card.tier() == Some(Tier::Legendary) {
        score += 20;
    }
    if card.base_attack() >= 2500 {
        score += 10;
    }
    score
}

/// Attack with strong or balanced creatures, defend with walls.
#[must_use]
pub fn smart_stance(card: &Card) -> Stance {
    let (attack, defense) = (card.base_attack(), card.base_defense());
    if attack >= 2500 || attack >= defense {
        Stance::Attack
    } else {
        Stance::Defense
    }
}

/// Pick a target from `targets` (all legal for `attacker`).
///
/// Unblocked direct attacks come first. Otherwise, in order: the weakest
/// legendary this attacker beats outright, the strongest attack-stance
/// creature it beats, the softest defense-stance creature, the weakest
/// creature overall.
#[must_use]
pub fn smart_target(duel: &Duel, attacker: EntityId, targets: &[AttackTarget]) -> Option<AttackTarget> {
    let state = duel.state();
    let previews: Vec<(EntityId, BattlePreview, bool)> = targets
        .iter()
        .filter_map(|target| match target {
            AttackTarget::Creature(id) => {
                let preview = assess_battle(state, attacker, *id)?;
                let legendary = state.card(*id).and_then(Card::tier) == Some(Tier::Legendary);
                Some((*id, preview, legendary))
            }
            AttackTarget::Direct => None,
        })
        .collect();

    if previews.is_empty() {
        return targets.contains(&AttackTarget::Direct).then_some(AttackTarget::Direct);
    }

    let beats = |p: &BattlePreview| p.attack_value > p.defense_value;

    let legend = previews
        .iter()
        .filter(|(_, p, legendary)| *legendary && beats(p))
        .min_by_key(|(_, p, _)| p.defense_value);
    let attacker_stance = previews
        .iter()
        .filter(|(_, p, _)| p.defender_stance == Stance::Attack && beats(p))
        .max_by_key(|(_, p, _)| p.defense_value);
    let wall = previews
        .iter()
        .filter(|(_, p, _)| p.defender_stance == Stance::Defense)
        .min_by_key(|(_, p, _)| p.defense_value);
    let weakest = previews.iter().min_by_key(|(_, p, _)| p.defense_value);

    legend
        .or(attacker_stance)
        .or(wall)
        .or(weakest)
        .map(|(id, _, _)| AttackTarget::Creature(*id))
}

// =============================================================================
// Driving a duel
// =============================================================================

/// Hard stop for a single turn, in engine calls.
const MAX_STEPS_PER_TURN: usize = 64;

/// Let `actor` play the active player's turn to completion.
///
/// Attacks are answered by `defender`. A rejected proposal ends the turn so
/// a confused policy cannot stall the match. Returns the accepted actions.
pub fn play_turn(duel: &mut Duel, actor: &mut dyn TurnPolicy, defender: &mut dyn TurnPolicy) -> RuleResult<Vec<Action>> {
    let mut played = Vec::new();
    for _ in 0..MAX_STEPS_PER_TURN {
        if duel.is_over() {
            return Ok(played);
        }
        let mut action = actor.next_action(duel);
        if let Action::Attack {
            attacker,
            target,
            response,
        } = &mut action
        {
            *response = defender.respond(duel, *attacker, *target);
        }

        match duel.apply(action.clone()) {
            Ok(Outcome::Turn(_) | Outcome::Phase(PhaseStep::NextTurn(_))) => {
                played.push(action);
                return Ok(played);
            }
            Ok(_) => played.push(action),
            Err(violation) => {
                tracing::warn!(?action, %violation, "policy proposed an illegal action");
                duel.end_turn()?;
                played.push(Action::EndTurn);
                return Ok(played);
            }
        }
    }
    tracing::warn!("turn step limit reached");
    duel.end_turn()?;
    played.push(Action::EndTurn);
    Ok(played)
}

/// Play until someone wins or `max_turns` is passed. Returns the winner.
pub fn play_match(
    duel: &mut Duel,
    first: &mut dyn TurnPolicy,
    second: &mut dyn TurnPolicy,
    max_turns: u32,
) -> RuleResult<Option<PlayerId>> {
    while !duel.is_over() && duel.state().turn <= max_turns {
        if duel.state().active() == PlayerId::ONE {
            play_turn(duel, first, second)?;
        } else {
            play_turn(duel, second, first)?;
        }
    }
    Ok(duel.winner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{starter_catalog, CardRegistry};
    use crate::core::{MatchState, RulesConfig};
    use crate::deck::starter_deck;
    use crate::zones::Zone;

    fn put(duel: &mut Duel, registry: &CardRegistry, player: PlayerId, name: &str, zone: Zone) -> EntityId {
        let definition = registry.get_by_name(name).cloned().unwrap();
        duel.state_mut().add_card(player, &definition, zone)
    }

    fn duel_in(phase: Phase) -> Duel {
        let mut duel = Duel::new(MatchState::new(RulesConfig::default(), 8));
        duel.state_mut().turn = 3;
        duel.state_mut().phase = phase;
        duel
    }

    #[test]
    fn test_smart_stance() {
        let registry = starter_catalog();
        let mut duel = duel_in(Phase::Main);
        let newton = put(&mut duel, &registry, PlayerId::ONE, "Isaac Newton", Zone::Hand);
        let gandhi = put(&mut duel, &registry, PlayerId::ONE, "Mahatma Gandhi", Zone::Hand);
        let homer = put(&mut duel, &registry, PlayerId::ONE, "Homer", Zone::Hand);

        let state = duel.state();
        assert_eq!(smart_stance(state.card(newton).unwrap()), Stance::Attack);
        assert_eq!(smart_stance(state.card(gandhi).unwrap()), Stance::Defense);
        assert_eq!(smart_stance(state.card(homer).unwrap()), Stance::Attack);
    }

    #[test]
    fn test_smart_target_prefers_beatable_legend() {
        let registry = starter_catalog();
        let mut duel = duel_in(Phase::Battle);
        let newton = put(&mut duel, &registry, PlayerId::ONE, "Isaac Newton", Zone::Battlefield);
        let homer = put(&mut duel, &registry, PlayerId::TWO, "Homer", Zone::Battlefield);
        let curie = put(&mut duel, &registry, PlayerId::TWO, "Marie Curie", Zone::Battlefield);

        let targets = duel.legal_attack_targets(newton);
        assert_eq!(
            smart_target(&duel, newton, &targets),
            Some(AttackTarget::Creature(curie))
        );
        assert_ne!(smart_target(&duel, newton, &targets), Some(AttackTarget::Creature(homer)));
    }

    #[test]
    fn test_smart_target_direct_when_open() {
        let registry = starter_catalog();
        let mut duel = duel_in(Phase::Battle);
        let homer = put(&mut duel, &registry, PlayerId::ONE, "Homer", Zone::Battlefield);
        let targets = duel.legal_attack_targets(homer);
        assert_eq!(smart_target(&duel, homer, &targets), Some(AttackTarget::Direct));
    }

    #[test]
    fn test_policy_summons_in_main() {
        let registry = starter_catalog();
        let mut duel = duel_in(Phase::Main);
        let homer = put(&mut duel, &registry, PlayerId::ONE, "Homer", Zone::Hand);

        let mut policy = HeuristicPolicy::new(Difficulty::Hard, 1);
        assert!(matches!(
            policy.next_action(&duel),
            Action::Summon { card, .. } if card == homer
        ));
    }

    #[test]
    fn test_respond_to_direct_attack() {
        let registry = starter_catalog();
        let mut duel = duel_in(Phase::Battle);
        let homer = put(&mut duel, &registry, PlayerId::ONE, "Homer", Zone::Battlefield);
        let trap = put(&mut duel, &registry, PlayerId::TWO, "Schrödinger's Cat", Zone::Battlefield);
        duel.state_mut().card_mut(trap).unwrap().face_down = true;

        let mut policy = HeuristicPolicy::new(Difficulty::Normal, 1);
        assert_eq!(policy.respond(&duel, homer, AttackTarget::Direct), Some(trap));
    }

    #[test]
    fn test_play_turn_passes_the_turn() {
        let registry = starter_catalog();
        let deck = starter_deck(&registry, "Starter").unwrap().build().unwrap();
        let mut duel = Duel::start(RulesConfig::default(), 4, &deck, &deck);
        let mut first = HeuristicPolicy::new(Difficulty::Hard, 10);
        let mut second = HeuristicPolicy::new(Difficulty::Hard, 20);

        let actions = play_turn(&mut duel, &mut first, &mut second).unwrap();
        assert_eq!(actions.last(), Some(&Action::EndTurn));
        assert_eq!(duel.state().active(), PlayerId::TWO);
        assert!(!actions.iter().any(|a| matches!(a, Action::Attack { .. })));
    }

    #[test]
    fn test_play_match_is_deterministic() {
        let registry = starter_catalog();
        let deck = starter_deck(&registry, "Starter").unwrap().build().unwrap();
        let run = || {
            let mut duel = Duel::start(RulesConfig::default(), 77, &deck, &deck);
            let mut first = HeuristicPolicy::new(Difficulty::Normal, 1);
            let mut second = HeuristicPolicy::new(Difficulty::Normal, 2);
            let winner = play_match(&mut duel, &mut first, &mut second, 60).unwrap();
            (winner, duel.state().turn, duel.state().history.len())
        };
        assert_eq!(run(), run());
    }
}
