//! Player actions.
//!
//! Every public operation of the turn controller has an `Action` variant, so
//! a policy can enumerate legal moves, an embedding can replay a match, and
//! the match history is plain data.
//!
//! - `AdvancePhase` / `EndTurn`: phase control
//! - `Summon`: creature from hand, with stance and cost payment
//! - `ActivateInstant` / `SetReactive` / `ActivateReactive`: non-creature play
//! - `ActivateEffect`: manual creature effect
//! - `Attack`: attack declaration plus the defender's chosen response
//! - `SwitchStance`: toggle a creature between attack and defense

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;
use super::player::PlayerId;
use crate::cards::Stance;

/// How the cost of a summon is paid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummonPayment {
    /// No cost (SCHOLAR tier).
    Free,
    /// Pay the tier's life cost.
    Life,
    /// Send the named battlefield creatures to the graveyard.
    Tribute(SmallVec<[EntityId; 2]>),
}

/// What an attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    /// An opposing creature.
    Creature(EntityId),
    /// The opposing player's life.
    Direct,
}

/// A complete player action.
///
/// ```
/// use scholar_duel::core::{Action, AttackTarget, EntityId};
///
/// let attack = Action::Attack {
///     attacker: EntityId(3),
///     target: AttackTarget::Direct,
///     response: None,
/// };
/// assert_eq!(attack.subject(), Some(EntityId(3)));
/// assert_eq!(Action::EndTurn.subject(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    AdvancePhase,
    EndTurn,
    Summon {
        card: EntityId,
        stance: Stance,
        payment: SummonPayment,
    },
    ActivateInstant(EntityId),
    SetReactive(EntityId),
    ActivateReactive(EntityId),
    ActivateEffect(EntityId),
    Attack {
        attacker: EntityId,
        target: AttackTarget,
        /// Reactive the defending player answers with, if any.
        response: Option<EntityId>,
    },
    SwitchStance(EntityId),
}

impl Action {
    /// The card this action is about, if any.
    #[must_use]
    pub fn subject(&self) -> Option<EntityId> {
        match self {
            Action::AdvancePhase | Action::EndTurn => None,
            Action::Summon { card, .. } => Some(*card),
            Action::ActivateInstant(card)
            | Action::SetReactive(card)
            | Action::ActivateReactive(card)
            | Action::ActivateEffect(card)
            | Action::SwitchStance(card) => Some(*card),
            Action::Attack { attacker, .. } => Some(*attacker),
        }
    }

    /// Check if this action ends or advances the phase.
    #[must_use]
    pub fn is_phase_control(&self) -> bool {
        matches!(self, Action::AdvancePhase | Action::EndTurn)
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Match-wide sequence number.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
