//! Zone system for card locations.
//!
//! Every player owns four ordered zones: deck, hand, battlefield and
//! graveyard. A card occupies exactly one of them at a time.
//!
//! ## Key Types
//!
//! - `Zone`: Which of the four zones
//! - `Zones`: Ordered card storage and movement for one player
//! - `ZonePosition`: Insertion point (front, back, index)

pub mod manager;

pub use manager::{Zone, ZonePosition, Zones};
