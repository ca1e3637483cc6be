//! Battle math and resolution.
//!
//! ## Effective values
//!
//! - Attack: current ATK, +synergy when the controller has enough creatures
//!   of the attacker's domain (the attacker counts), +/- school clash
//!   against a creature opponent.
//! - Defense: current DEF, +supportive bonus when the defender belongs to
//!   the supportive domain and its controller has enough of them.
//!
//! ## Branches
//!
//! | Defender stance | Comparison      | Result                                   |
//! |-----------------|-----------------|------------------------------------------|
//! | ATTACK          | atk > atk       | defender destroyed, defender takes diff  |
//! | ATTACK          | atk < atk       | attacker destroyed, attacker takes diff  |
//! | ATTACK          | equal           | both destroyed, no damage                |
//! | DEFENSE         | atk >= def      | defender destroyed, no damage            |
//! | DEFENSE         | atk < def       | attacker's controller takes def - atk    |
//!
//! A first striker (`AttacksFirst`) survives the ATTACK tie when its
//! opponent is not also a first striker.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardCondition, School, Stance};
use crate::core::{EntityId, MatchState, PlayerId};
use crate::zones::{Zone, ZonePosition};

/// School pairs where the first member has the upper hand.
const CLASHES: [(School, School); 3] = [
    (School::Rationalism, School::Mysticism),
    (School::Empiricism, School::Idealism),
    (School::Materialism, School::Humanism),
];

/// Signed school-clash modifier for `attacker` against `defender`.
#[must_use]
pub fn school_clash(attacker: School, defender: School, bonus: u32) -> i32 {
    let bonus = i32::try_from(bonus).unwrap_or(i32::MAX);
    if CLASHES.contains(&(attacker, defender)) {
        bonus
    } else if CLASHES.contains(&(defender, attacker)) {
        -bonus
    } else {
        0
    }
}

/// Attack value of a battlefield creature, optionally against an opponent.
///
/// Returns 0 for unknown cards.
#[must_use]
pub fn effective_attack(state: &MatchState, attacker: EntityId, defender: Option<EntityId>) -> u32 {
    let Some(card) = state.card(attacker) else {
        return 0;
    };
    let mut value = i64::from(card.current_attack);

    if let Some(domain) = card.domain() {
        let holder = state.player(card.controller);
        if holder.domain_count(domain) >= state.config.synergy_threshold {
            value += i64::from(state.config.synergy_bonus);
        }
    }

    let opponent = defender.and_then(|id| state.card(id));
    if let (Some(mine), Some(theirs)) = (card.school(), opponent.and_then(Card::school)) {
        value += i64::from(school_clash(mine, theirs, state.config.clash_bonus));
    }

    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Defense value of a battlefield creature.
#[must_use]
pub fn effective_defense(state: &MatchState, defender: EntityId) -> u32 {
    let Some(card) = state.card(defender) else {
        return 0;
    };
    let supportive = state.config.supportive_domain;
    let mut value = card.current_defense;
    if card.domain() == Some(supportive)
        && state.player(card.controller).domain_count(supportive) >= state.config.synergy_threshold
    {
        value = value.saturating_add(state.config.supportive_bonus);
    }
    value
}

/// How a creature-vs-creature battle ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// ATTACK vs ATTACK, attacker higher.
    Overpower { damage: u32 },
    /// ATTACK vs ATTACK, defender higher.
    Counter { damage: u32 },
    /// ATTACK vs ATTACK, equal values.
    Clash,
    /// DEFENSE broken or matched.
    Break,
    /// DEFENSE held; the difference is reflected.
    Reflect { damage: u32 },
}

/// Pure battle forecast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattlePreview {
    pub attack_value: u32,
    pub defense_value: u32,
    pub defender_stance: Stance,
    pub verdict: Verdict,
}

impl BattlePreview {
    /// Whether the attacking creature leaves the battlefield.
    #[must_use]
    pub fn attacker_falls(&self) -> bool {
        matches!(self.verdict, Verdict::Counter { .. } | Verdict::Clash)
    }

    /// Whether the defending creature leaves the battlefield.
    #[must_use]
    pub fn defender_falls(&self) -> bool {
        matches!(
            self.verdict,
            Verdict::Overpower { .. } | Verdict::Clash | Verdict::Break
        )
    }
}

/// Forecast a battle without touching the state.
#[must_use]
pub fn assess_battle(state: &MatchState, attacker: EntityId, defender: EntityId) -> Option<BattlePreview> {
    let target = state.card(defender)?;
    state.card(attacker)?;
    let attack_value = effective_attack(state, attacker, Some(defender));

    let preview = match target.stance {
        Stance::Attack => {
            let counter = effective_attack(state, defender, Some(attacker));
            let verdict = match attack_value.cmp(&counter) {
                std::cmp::Ordering::Greater => Verdict::Overpower {
                    damage: attack_value - counter,
                },
                std::cmp::Ordering::Less => Verdict::Counter {
                    damage: counter - attack_value,
                },
                std::cmp::Ordering::Equal => Verdict::Clash,
            };
            BattlePreview {
                attack_value,
                defense_value: counter,
                defender_stance: Stance::Attack,
                verdict,
            }
        }
        Stance::Defense => {
            let defense = effective_defense(state, defender);
            let verdict = if attack_value >= defense {
                Verdict::Break
            } else {
                Verdict::Reflect {
                    damage: defense - attack_value,
                }
            };
            BattlePreview {
                attack_value,
                defense_value: defense,
                defender_stance: Stance::Defense,
                verdict,
            }
        }
    };
    Some(preview)
}

/// What triggered a destruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestroyCause {
    Battle,
    Effect,
}

/// What happened to a card that was destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destruction {
    /// Sent to its owner's graveyard.
    Destroyed,
    /// Returned to its owner's hand instead.
    ReturnedToHand,
    /// Protected from effect destruction.
    Immune,
    /// Not on a battlefield; nothing happened.
    Missing,
}

impl Destruction {
    /// Whether the card left the battlefield.
    #[must_use]
    pub fn removed(self) -> bool {
        matches!(self, Destruction::Destroyed | Destruction::ReturnedToHand)
    }
}

/// Destroy a battlefield card, honouring its protective conditions.
pub fn destroy(state: &mut MatchState, card: EntityId, cause: DestroyCause) -> Destruction {
    let turn = state.turn;
    let Some(target) = state.card(card) else {
        return Destruction::Missing;
    };
    if target.zone != Zone::Battlefield {
        return Destruction::Missing;
    }
    if cause == DestroyCause::Effect && target.has(CardCondition::DestructionImmune, turn) {
        tracing::debug!(card = %card, "destruction prevented");
        return Destruction::Immune;
    }
    if target.has(CardCondition::ReturnToHandOnDestroy, turn) {
        state.move_card(card, Zone::Hand, ZonePosition::Back);
        tracing::debug!(card = %card, "returned to hand instead of destroyed");
        return Destruction::ReturnedToHand;
    }

    let backlash = target
        .conditions
        .find(turn, |c| matches!(c, CardCondition::DamageOnDestroy(_)));
    let controller = target.controller;

    state.move_card(card, Zone::Graveyard, ZonePosition::Back);
    tracing::debug!(card = %card, ?cause, "destroyed");

    if let Some(CardCondition::DamageOnDestroy(amount)) = backlash {
        state.player_mut(controller.opponent()).take_damage(amount);
    }
    Destruction::Destroyed
}

/// Outcome of one attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleResult {
    pub attacker: EntityId,
    /// `None` for a direct attack.
    pub defender: Option<EntityId>,
    pub attack_value: u32,
    /// Counter attack or defense value; 0 for a direct attack.
    pub defense_value: u32,
    /// `None` for a direct attack.
    pub verdict: Option<Verdict>,
    /// Player who lost life, if any.
    pub damaged_player: Option<PlayerId>,
    pub damage: u32,
    /// Cards that left the battlefield.
    pub destroyed: SmallVec<[EntityId; 2]>,
    pub message: String,
}

/// Resolve a creature-vs-creature battle.
///
/// Returns `None` if either card is missing. Victory is re-checked after
/// the damage is dealt.
pub fn resolve_battle(state: &mut MatchState, attacker: EntityId, defender: EntityId) -> Option<BattleResult> {
    let preview = assess_battle(state, attacker, defender)?;
    let turn = state.turn;
    let (attacker_name, attacking_player, attacker_first) = {
        let card = state.card(attacker)?;
        (
            card.name().to_string(),
            card.controller,
            card.has(CardCondition::AttacksFirst, turn),
        )
    };
    let (defender_name, defending_player, defender_first) = {
        let card = state.card(defender)?;
        (
            card.name().to_string(),
            card.controller,
            card.has(CardCondition::AttacksFirst, turn),
        )
    };

    let mut result = BattleResult {
        attacker,
        defender: Some(defender),
        attack_value: preview.attack_value,
        defense_value: preview.defense_value,
        verdict: Some(preview.verdict),
        damaged_player: None,
        damage: 0,
        destroyed: SmallVec::new(),
        message: String::new(),
    };
    let (atk, def) = (preview.attack_value, preview.defense_value);

    let mut losers: SmallVec<[EntityId; 2]> = SmallVec::new();
    match preview.verdict {
        Verdict::Overpower { damage } => {
            state.player_mut(defending_player).take_damage(damage);
            result.damaged_player = Some(defending_player);
            result.damage = damage;
            losers.push(defender);
            result.message = format!(
                "{attacker_name} ({atk} ATK) destroyed {defender_name} ({def} ATK)! {damage} damage!"
            );
        }
        Verdict::Counter { damage } => {
            state.player_mut(attacking_player).take_damage(damage);
            result.damaged_player = Some(attacking_player);
            result.damage = damage;
            losers.push(attacker);
            result.message = format!(
                "{defender_name} ({def} ATK) destroyed {attacker_name} ({atk} ATK)! {damage} damage!"
            );
        }
        Verdict::Clash => {
            match (attacker_first, defender_first) {
                (true, false) => losers.push(defender),
                (false, true) => losers.push(attacker),
                _ => {
                    losers.push(attacker);
                    losers.push(defender);
                }
            }
            result.message = if losers.len() == 2 {
                format!(
                    "MUTUAL DESTRUCTION! {attacker_name} and {defender_name} destroyed! (Both {atk} ATK)"
                )
            } else {
                format!("First strike! Only one of {attacker_name} and {defender_name} survives the clash ({atk} ATK)")
            };
        }
        Verdict::Break => {
            losers.push(defender);
            result.message = if atk > def {
                format!("{attacker_name} ({atk} ATK) destroyed {defender_name} ({def} DEF)! [Defense Position]")
            } else {
                format!("{attacker_name} ({atk} ATK) barely destroyed {defender_name} ({def} DEF)!")
            };
        }
        Verdict::Reflect { damage } => {
            state.player_mut(attacking_player).take_damage(damage);
            result.damaged_player = Some(attacking_player);
            result.damage = damage;
            result.message = format!(
                "{defender_name} ({def} DEF) blocked {attacker_name} ({atk} ATK)! {damage} damage reflected!"
            );
        }
    }

    for card in losers {
        if destroy(state, card, DestroyCause::Battle).removed() {
            result.destroyed.push(card);
        }
    }

    tracing::debug!(
        attacker = %attacker,
        defender = %defender,
        verdict = ?preview.verdict,
        damage = result.damage,
        "battle resolved"
    );
    state.check_victory();
    Some(result)
}

/// Resolve an attack on the opposing player's life.
///
/// `halved` applies the half-damage rule for attacks past blockers.
pub fn resolve_direct_attack(state: &mut MatchState, attacker: EntityId, halved: bool) -> Option<BattleResult> {
    let card = state.card(attacker)?;
    let name = card.name().to_string();
    let defending_player = card.controller.opponent();

    let attack_value = effective_attack(state, attacker, None);
    let damage = if halved { attack_value / 2 } else { attack_value };
    state.player_mut(defending_player).take_damage(damage);

    tracing::debug!(attacker = %attacker, damage, "direct attack");
    state.check_victory();

    Some(BattleResult {
        attacker,
        defender: None,
        attack_value,
        defense_value: 0,
        verdict: None,
        damaged_player: Some(defending_player),
        damage,
        destroyed: SmallVec::new(),
        message: format!("{name} attacks directly! {damage} damage!"),
    })
}
