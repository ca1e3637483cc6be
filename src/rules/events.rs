//! Event cues.
//!
//! The duel performs no I/O. Whenever something a presentation layer might
//! want to react to happens (a card drawn, an attack declared, a victory)
//! it hands a `Cue` to the injected `EventSink`. Sound, animation and
//! notification live entirely behind that trait.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::core::{AttackTarget, EntityId, Phase, PlayerId};

/// Something observable happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Draw { player: PlayerId, card: EntityId },
    Summon { player: PlayerId, card: EntityId },
    Attack { attacker: EntityId, target: AttackTarget },
    Destroy { card: EntityId },
    /// A reactive was set face-down.
    TrapSet { player: PlayerId },
    /// An instant resolved.
    Discovery { card: EntityId },
    PhaseChange { phase: Phase },
    Victory { winner: PlayerId },
}

impl Cue {
    /// Stable cue name, as used by sound tables.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Cue::Draw { .. } => "draw",
            Cue::Summon { .. } => "summon",
            Cue::Attack { .. } => "attack",
            Cue::Destroy { .. } => "destroy",
            Cue::TrapSet { .. } => "trap_set",
            Cue::Discovery { .. } => "discovery",
            Cue::PhaseChange { .. } => "phase_change",
            Cue::Victory { .. } => "victory",
        }
    }
}

/// Receiver of cues.
pub trait EventSink: Send {
    fn cue(&mut self, cue: Cue);
}

/// Drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn cue(&mut self, _cue: Cue) {}
}

/// Keeps every cue in order.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to a duel.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<Cue>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cue received so far.
    #[must_use]
    pub fn cues(&self) -> Vec<Cue> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Names of every cue received so far.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.cues().iter().map(Cue::name).collect()
    }

    /// Number of received cues with the given name.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.cues().iter().filter(|cue| cue.name() == name).count()
    }
}

impl EventSink for RecordingSink {
    fn cue(&mut self, cue: Cue) {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).push(cue);
    }
}
