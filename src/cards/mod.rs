//! Card system: classifications, definitions, instances, conditions and the
//! card repository.
//!
//! ## Key Types
//!
//! - `CardDefinition`: immutable template supplied by a repository
//! - `Card`: runtime card state (zone, stance, current stats, usage)
//! - `ConditionSet`: continuous conditions with expiry
//! - `CardRegistry`: ordered name- and id-keyed template lookup
//! - `starter_catalog`: the built-in card pool

pub mod attributes;
pub mod catalog;
pub mod condition;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{Category, Domain, EffectFrequency, EffectTrigger, School, Stance, Tier};
pub use catalog::{starter_catalog, StarterCatalog};
pub use condition::{AuraKind, CardCondition, ConditionSet, Expiry, PlayerCondition};
pub use definition::{CardDefinition, CardId, CreatureProfile};
pub use instance::Card;
pub use registry::{CardRegistry, CardRepository};
