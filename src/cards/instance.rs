//! Card instances - runtime card state.
//!
//! `Card` is a specific copy of a definition inside a match. It tracks the
//! mutable state: current stats, zone, stance, face-down flag, effect usage
//! counters and attached conditions.
//!
//! ## Invariants
//!
//! - Current stats are unsigned; signed adjustments clamp at zero.
//! - Base stats come from the definition and never change.
//! - The owner is fixed at creation. The controller differs from the owner
//!   only while the card sits on an opponent's battlefield.

use serde::{Deserialize, Serialize};

use super::attributes::{Category, Domain, EffectFrequency, EffectTrigger, School, Stance, Tier};
use super::condition::{CardCondition, ConditionSet};
use super::definition::{CardDefinition, CardId};
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;
use crate::zones::Zone;

/// A card instance in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique entity ID for this instance.
    pub id: EntityId,

    /// The template this card was cloned from.
    pub definition: CardDefinition,

    owner: PlayerId,

    /// Who currently controls the card.
    pub controller: PlayerId,

    /// Current zone.
    pub zone: Zone,

    /// Face-down on the battlefield (reactives only).
    pub face_down: bool,

    /// Battle position (creatures only).
    pub stance: Stance,

    pub current_attack: u32,
    pub current_defense: u32,

    school: Option<School>,

    /// Effect activated during the current turn.
    pub used_this_turn: bool,
    /// Effect activated at least once this match (once-per-duel tracking).
    pub used_this_duel: bool,
    /// Total effect activations this match.
    pub times_used: u32,
    /// Declared an attack during the current turn.
    pub attacked_this_turn: bool,

    /// Attached continuous conditions.
    pub conditions: ConditionSet<CardCondition>,
}

impl Card {
    /// Clone a definition into a fresh instance in its owner's deck.
    #[must_use]
    pub fn from_definition(id: EntityId, definition: &CardDefinition, owner: PlayerId) -> Self {
        let (attack, defense) = definition.base_stats();
        Self {
            id,
            definition: definition.clone(),
            owner,
            controller: owner,
            zone: Zone::Deck,
            face_down: false,
            stance: Stance::Attack,
            current_attack: attack,
            current_defense: defense,
            school: definition.school(),
            used_this_turn: false,
            used_this_duel: false,
            times_used: 0,
            attacked_this_turn: false,
            conditions: ConditionSet::new(),
        }
    }

    // === Identity ===

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.definition.id
    }

    /// The player who brought this card into the match.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.definition.category
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.definition.category == Category::Creature
    }

    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.definition.category == Category::Instant
    }

    #[must_use]
    pub fn is_reactive(&self) -> bool {
        self.definition.category == Category::Reactive
    }

    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        self.definition.tier()
    }

    #[must_use]
    pub fn domain(&self) -> Option<Domain> {
        self.definition.domain()
    }

    /// Current school; effects can rewrite it.
    #[must_use]
    pub fn school(&self) -> Option<School> {
        self.school
    }

    /// Rewrite the school of a creature. No-op for non-creatures.
    pub fn set_school(&mut self, school: School) {
        if self.is_creature() {
            self.school = Some(school);
        }
    }

    #[must_use]
    pub fn trigger(&self) -> EffectTrigger {
        self.definition.trigger
    }

    #[must_use]
    pub fn frequency(&self) -> EffectFrequency {
        self.definition.frequency
    }

    // === Stats ===

    #[must_use]
    pub fn base_attack(&self) -> u32 {
        self.definition.base_stats().0
    }

    #[must_use]
    pub fn base_defense(&self) -> u32 {
        self.definition.base_stats().1
    }

    /// Restore current stats and school to the definition's values.
    pub fn reset_stats(&mut self) {
        let (attack, defense) = self.definition.base_stats();
        self.current_attack = attack;
        self.current_defense = defense;
        self.school = self.definition.school();
    }

    /// Add signed deltas to current stats, clamping at zero.
    pub fn adjust_stats(&mut self, attack: i32, defense: i32) {
        self.current_attack = apply_delta(self.current_attack, attack);
        self.current_defense = apply_delta(self.current_defense, defense);
    }

    /// Overwrite current stats.
    pub fn set_stats(&mut self, attack: u32, defense: u32) {
        self.current_attack = attack;
        self.current_defense = defense;
    }

    // === Turn bookkeeping ===

    /// Clear per-turn usage and attack flags.
    pub fn reset_turn_flags(&mut self) {
        self.used_this_turn = false;
        self.attacked_this_turn = false;
    }

    /// Record one effect activation.
    pub fn mark_effect_used(&mut self) {
        self.used_this_turn = true;
        self.times_used += 1;
        if self.definition.frequency == EffectFrequency::OncePerDuel {
            self.used_this_duel = true;
        }
    }

    /// Why the effect cannot run again, if it cannot.
    #[must_use]
    pub fn effect_exhausted(&self) -> Option<&'static str> {
        match self.definition.frequency {
            EffectFrequency::OncePerTurn if self.used_this_turn => {
                Some("effect can only be used once per turn")
            }
            EffectFrequency::OncePerDuel if self.used_this_duel => {
                Some("effect can only be used once per duel")
            }
            _ => None,
        }
    }

    /// Reset battlefield-only state when the card leaves play.
    pub fn leave_battlefield(&mut self) {
        self.reset_stats();
        self.stance = Stance::Attack;
        self.face_down = false;
        self.attacked_this_turn = false;
        self.controller = self.owner;
    }

    /// Check an attached condition on `turn`.
    #[must_use]
    pub fn has(&self, condition: CardCondition, turn: u32) -> bool {
        self.conditions.has(condition, turn)
    }
}

fn apply_delta(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}
