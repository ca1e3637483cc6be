//! Card instance identification.
//!
//! Every card instance in a match has a unique `EntityId`, allocated by
//! `MatchState` when a deck is loaded. Ids are never reused: a card keeps
//! its id while it moves between zones for the rest of the match.
//!
//! ```
//! use scholar_duel::core::EntityId;
//!
//! let card = EntityId::new(7);
//! assert_eq!(card.raw(), 7);
//! assert_eq!(format!("{}", card), "#7");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
