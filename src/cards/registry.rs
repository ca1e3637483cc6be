//! Card repository interface and the in-memory registry.
//!
//! A `CardRepository` supplies immutable card templates in a stable order.
//! `CardRegistry` is the in-memory implementation: it keeps insertion order
//! and provides fast lookup by `CardId` and by exact name.

use rustc_hash::FxHashMap;

use super::attributes::Category;
use super::definition::{CardDefinition, CardId};

/// Source of card templates.
pub trait CardRepository {
    /// Every known card template, in catalog order.
    fn card_definitions(&self) -> Vec<CardDefinition>;
}

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use scholar_duel::cards::{CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::instant(CardId::new(1), "Quantum Leap"));
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Quantum Leap");
/// assert!(registry.get_by_name("Quantum Leap").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<CardDefinition>,
    by_id: FxHashMap<CardId, usize>,
    by_name: FxHashMap<String, usize>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from any repository.
    pub fn from_repository(repository: &impl CardRepository) -> Self {
        let mut registry = Self::new();
        for card in repository.card_definitions() {
            registry.register(card);
        }
        registry
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID or name already exists.
    pub fn register(&mut self, card: CardDefinition) {
        assert!(
            !self.by_id.contains_key(&card.id),
            "Card with ID {} already registered",
            card.id
        );
        assert!(
            !self.by_name.contains_key(&card.name),
            "Card named {} already registered",
            card.name
        );
        let index = self.cards.len();
        self.by_id.insert(card.id, index);
        self.by_name.insert(card.name.clone(), index);
        self.cards.push(card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.by_id.get(&id).map(|&i| &self.cards[i])
    }

    /// Get a card definition by exact name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.by_name.get(name).map(|&i| &self.cards[i])
    }

    /// Check if a card name is registered.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Find cards of a category.
    pub fn find_by_category(&self, category: Category) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter().filter(move |c| c.category == category)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }
}

impl CardRepository for CardRegistry {
    fn card_definitions(&self) -> Vec<CardDefinition> {
        self.cards.clone()
    }
}
