//! Graveyard auras.
//!
//! Two cards keep working after they die:
//!
//! | Aura          | Source in graveyard | Effect on holder's creatures           |
//! |---------------|---------------------|----------------------------------------|
//! | Enlightenment | Buddha              | SPIRITUALITY creatures +1000 ATK       |
//! | Sanctuary     | Nelson Mandela      | HUMANISM creatures cannot be attacked  |
//!
//! Enlightenment mutates stats, so each buffed creature carries an
//! `AuraApplied` marker. `refresh_auras` adds the bonus where the marker is
//! missing and takes it back where the source is gone, which makes repeated
//! refreshes a no-op. Sanctuary is checked live at target selection.

use crate::cards::{AuraKind, Card, CardCondition, Domain, Expiry, School};
use crate::core::{EntityId, MatchState, PlayerId};
use crate::zones::Zone;

pub const ENLIGHTENMENT_SOURCE: &str = "Buddha";
pub const SANCTUARY_SOURCE: &str = "Nelson Mandela";
pub const ENLIGHTENMENT_BONUS: i32 = 1000;

const MARKER: CardCondition = CardCondition::AuraApplied(AuraKind::Enlightenment);

/// Card that projects an aura from its graveyard.
#[must_use]
pub const fn aura_source(aura: AuraKind) -> &'static str {
    match aura {
        AuraKind::Enlightenment => ENLIGHTENMENT_SOURCE,
        AuraKind::Sanctuary => SANCTUARY_SOURCE,
    }
}

/// Whether `player`'s graveyard currently projects an aura.
#[must_use]
pub fn aura_active(state: &MatchState, player: PlayerId, aura: AuraKind) -> bool {
    let source = aura_source(aura);
    state
        .player(player)
        .graveyard()
        .iter()
        .any(|card| card.name() == source)
}

fn enlightened(card: &Card) -> bool {
    card.is_creature() && card.domain() == Some(Domain::Spirituality)
}

/// Bring every battlefield creature in line with the graveyards.
///
/// Returns the number of creatures whose stats changed.
pub fn refresh_auras(state: &mut MatchState) -> usize {
    let mut changed = 0;
    for player in PlayerId::all() {
        let active = aura_active(state, player, AuraKind::Enlightenment);
        let turn = state.turn;
        for card in state.player_mut(player).zones.iter_mut(Zone::Battlefield) {
            let marked = card.has(MARKER, turn);
            let eligible = active && enlightened(card);
            if eligible && !marked {
                card.adjust_stats(ENLIGHTENMENT_BONUS, 0);
                card.conditions.add(MARKER, Expiry::Permanent);
                changed += 1;
            } else if marked && !eligible {
                card.adjust_stats(-ENLIGHTENMENT_BONUS, 0);
                card.conditions.remove(MARKER);
                changed += 1;
            }
        }
    }
    if changed > 0 {
        tracing::debug!(changed, "auras refreshed");
    }
    changed
}

/// Whether a battlefield creature is hidden from attacks by Sanctuary.
#[must_use]
pub fn is_sanctuary_shielded(state: &MatchState, card: EntityId) -> bool {
    state.card(card).is_some_and(|c| {
        c.is_creature()
            && c.school() == Some(School::Humanism)
            && aura_active(state, c.controller, AuraKind::Sanctuary)
    })
}
