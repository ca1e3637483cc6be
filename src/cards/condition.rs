//! Continuous conditions attached to cards and players.
//!
//! A condition is a named kind plus an expiry. Rules code checks for a kind
//! at the point where it matters (target validity, attack legality,
//! destruction, draw) instead of searching free text.
//!
//! ## Expiry
//!
//! - `Permanent`: until removed, or until the card changes zone
//! - `ThroughTurn(n)`: active while the match turn counter is `<= n`
//!
//! Expired entries are purged when the turn passes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// When a condition stops applying.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expiry {
    /// Lasts until explicitly removed.
    Permanent,
    /// Active through the given turn number, inclusive.
    ThroughTurn(u32),
}

impl Expiry {
    /// Check whether the condition still applies on `turn`.
    #[must_use]
    pub const fn is_active(self, turn: u32) -> bool {
        match self {
            Expiry::Permanent => true,
            Expiry::ThroughTurn(last) => turn <= last,
        }
    }
}

/// Graveyard-resident auras that leave a marker on the cards they buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraKind {
    /// Spirituality creatures gain attack.
    Enlightenment,
    /// Humanism creatures cannot be attacked.
    Sanctuary,
}

/// Conditions that can be attached to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCondition {
    /// Opponent effects do not apply to this card.
    ImmuneToEffects,
    /// Cannot be destroyed by card effects.
    DestructionImmune,
    /// Cannot be chosen as an attack target.
    CannotBeAttacked,
    /// Cannot be chosen by opponent effects or attacks.
    CannotBeTargeted,
    /// Cannot declare attacks.
    CannotAttack,
    /// Survives an attack-vs-attack tie.
    AttacksFirst,
    /// Manual effect cannot be activated.
    EffectsNegated,
    /// Next destruction returns it to its owner's hand instead.
    ReturnToHandOnDestroy,
    /// When destroyed, the opposing player takes this much damage.
    DamageOnDestroy(u32),
    /// May attack directly past blockers for half damage.
    DirectAttackHalf,
    /// Reactive or instant that may be activated straight from hand.
    CanActivateFromHand,
    /// Marker left by a graveyard aura so it applies once.
    AuraApplied(AuraKind),
}

/// Conditions that can be attached to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCondition {
    /// Discards the first card of hand after each draw-phase draw.
    DiscardOnDraw,
    /// The player's next turn is skipped.
    SkipNextTurn,
    /// One creature may attack a second time.
    ExtraAttack,
}

/// A set of conditions with their expiries.
///
/// ```
/// use scholar_duel::cards::{CardCondition, ConditionSet, Expiry};
///
/// let mut set = ConditionSet::new();
/// set.add(CardCondition::CannotAttack, Expiry::ThroughTurn(3));
/// assert!(set.has(CardCondition::CannotAttack, 3));
/// assert!(!set.has(CardCondition::CannotAttack, 4));
///
/// set.expire(4);
/// assert!(set.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSet<K> {
    entries: SmallVec<[(K, Expiry); 2]>,
}

impl<K> Default for ConditionSet<K> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<K: Copy + PartialEq> ConditionSet<K> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a condition. Re-adding a kind keeps the longer expiry.
    pub fn add(&mut self, kind: K, expiry: Expiry) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = match (entry.1, expiry) {
                (Expiry::Permanent, _) | (_, Expiry::Permanent) => Expiry::Permanent,
                (Expiry::ThroughTurn(a), Expiry::ThroughTurn(b)) => Expiry::ThroughTurn(a.max(b)),
            };
        } else {
            self.entries.push((kind, expiry));
        }
    }

    /// Check whether a condition applies on `turn`.
    #[must_use]
    pub fn has(&self, kind: K, turn: u32) -> bool {
        self.entries
            .iter()
            .any(|(k, expiry)| *k == kind && expiry.is_active(turn))
    }

    /// Find the first active condition matching a predicate.
    #[must_use]
    pub fn find(&self, turn: u32, predicate: impl Fn(&K) -> bool) -> Option<K> {
        self.entries
            .iter()
            .find(|(k, expiry)| predicate(k) && expiry.is_active(turn))
            .map(|(k, _)| *k)
    }

    /// Remove a condition. Returns whether it was present.
    pub fn remove(&mut self, kind: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| *k != kind);
        self.entries.len() != before
    }

    /// Drop every entry that no longer applies on `turn`.
    pub fn expire(&mut self, turn: u32) {
        self.entries.retain(|(_, expiry)| expiry.is_active(turn));
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check if no conditions are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over attached conditions and their expiries.
    pub fn iter(&self) -> impl Iterator<Item = &(K, Expiry)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        assert!(Expiry::Permanent.is_active(1000));
        assert!(Expiry::ThroughTurn(2).is_active(2));
        assert!(!Expiry::ThroughTurn(2).is_active(3));
    }

    #[test]
    fn test_add_keeps_longest_expiry() {
        let mut set = ConditionSet::new();
        set.add(PlayerCondition::ExtraAttack, Expiry::ThroughTurn(5));
        set.add(PlayerCondition::ExtraAttack, Expiry::ThroughTurn(3));
        assert!(set.has(PlayerCondition::ExtraAttack, 5));

        set.add(PlayerCondition::ExtraAttack, Expiry::Permanent);
        assert!(set.has(PlayerCondition::ExtraAttack, 99));
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = ConditionSet::new();
        set.add(PlayerCondition::SkipNextTurn, Expiry::Permanent);
        assert!(set.remove(PlayerCondition::SkipNextTurn));
        assert!(!set.remove(PlayerCondition::SkipNextTurn));
        assert!(set.is_empty());
    }

    #[test]
    fn test_find_with_payload() {
        let mut set = ConditionSet::new();
        set.add(CardCondition::DamageOnDestroy(1000), Expiry::Permanent);
        let found = set.find(1, |c| matches!(c, CardCondition::DamageOnDestroy(_)));
        assert_eq!(found, Some(CardCondition::DamageOnDestroy(1000)));
    }

    #[test]
    fn test_expire_purges_only_stale() {
        let mut set = ConditionSet::new();
        set.add(CardCondition::CannotAttack, Expiry::ThroughTurn(2));
        set.add(CardCondition::AttacksFirst, Expiry::Permanent);
        set.expire(3);
        assert!(!set.has(CardCondition::CannotAttack, 1));
        assert!(set.has(CardCondition::AttacksFirst, 3));
    }
}
