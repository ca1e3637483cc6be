//! Saved deck format.
//!
//! A saved deck is its name plus the ordered card names, as JSON:
//!
//! ```json
//! { "DeckName": "Starter", "CardNames": ["Isaac Newton", "Isaac Newton"] }
//! ```
//!
//! Card state is never saved. Loading resolves every name against a
//! registry and yields fresh definitions.

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardRegistry};
use crate::core::DeckError;

/// Persisted deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeckList {
    pub deck_name: String,
    pub card_names: Vec<String>,
}

impl DeckList {
    pub fn new(deck_name: impl Into<String>, card_names: Vec<String>) -> Self {
        Self {
            deck_name: deck_name.into(),
            card_names,
        }
    }

    pub fn to_json(&self) -> Result<String, DeckError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve every name in order. Limits are not checked here.
    pub fn hydrate(&self, registry: &CardRegistry) -> Result<Vec<CardDefinition>, DeckError> {
        self.card_names
            .iter()
            .map(|name| {
                registry
                    .get_by_name(name)
                    .cloned()
                    .ok_or_else(|| DeckError::UnknownCard(name.clone()))
            })
            .collect()
    }
}
