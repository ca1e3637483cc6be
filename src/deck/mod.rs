//! Deck construction and the saved deck format.

pub mod builder;
pub mod format;

pub use builder::{starter_deck, DeckBuilder, DeckStatistics};
pub use format::DeckList;
