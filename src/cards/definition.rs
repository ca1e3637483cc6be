//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable template a card repository supplies:
//! name, category, creature classification and base stats, effect text and
//! effect timing. Templates are never mutated; deck building clones them
//! into `Card` instances.

use serde::{Deserialize, Serialize};

use super::attributes::{Category, Domain, EffectFrequency, EffectTrigger, School, Tier};

/// Unique identifier for a card definition in a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Classification and base stats of a creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureProfile {
    pub country: String,
    pub domain: Domain,
    pub school: School,
    pub tier: Tier,
    pub attack: u32,
    pub defense: u32,
}

impl Default for CreatureProfile {
    fn default() -> Self {
        Self {
            country: String::new(),
            domain: Domain::Science,
            school: School::Empiricism,
            tier: Tier::Scholar,
            attack: 0,
            defense: 0,
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use scholar_duel::cards::{CardDefinition, CardId, Domain, School, Tier};
///
/// let curie = CardDefinition::creature(CardId::new(5), "Marie Curie")
///     .with_classification(Domain::Science, School::Empiricism, Tier::Legendary)
///     .with_stats(2800, 2400)
///     .with_country("Poland");
///
/// assert!(curie.is_creature());
/// assert_eq!(curie.tier(), Some(Tier::Legendary));
/// assert_eq!(curie.base_stats(), (2800, 2400));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Catalog identifier.
    pub id: CardId,

    /// Card name. Effects are dispatched by exact name.
    pub name: String,

    /// Creature, instant or reactive.
    pub category: Category,

    /// Creature data; `None` for instants and reactives.
    pub creature: Option<CreatureProfile>,

    /// Free-text rules text.
    pub effect_text: String,

    /// When the effect runs.
    pub trigger: EffectTrigger,

    /// How often a manual effect may run.
    pub frequency: EffectFrequency,
}

impl CardDefinition {
    /// Create a definition of the given category.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: Category) -> Self {
        let (creature, trigger) = match category {
            Category::Creature => (Some(CreatureProfile::default()), EffectTrigger::Manual),
            Category::Instant => (None, EffectTrigger::Manual),
            Category::Reactive => (None, EffectTrigger::Reactive),
        };
        Self {
            id,
            name: name.into(),
            category,
            creature,
            effect_text: String::new(),
            trigger,
            frequency: EffectFrequency::default(),
        }
    }

    /// Create a creature definition.
    #[must_use]
    pub fn creature(id: CardId, name: impl Into<String>) -> Self {
        Self::new(id, name, Category::Creature)
    }

    /// Create an instant definition.
    #[must_use]
    pub fn instant(id: CardId, name: impl Into<String>) -> Self {
        Self::new(id, name, Category::Instant)
    }

    /// Create a reactive definition.
    #[must_use]
    pub fn reactive(id: CardId, name: impl Into<String>) -> Self {
        Self::new(id, name, Category::Reactive)
    }

    /// Set domain, school and tier. No-op for non-creatures.
    #[must_use]
    pub fn with_classification(mut self, domain: Domain, school: School, tier: Tier) -> Self {
        if let Some(profile) = self.creature.as_mut() {
            profile.domain = domain;
            profile.school = school;
            profile.tier = tier;
        }
        self
    }

    /// Set base attack and defense. No-op for non-creatures.
    #[must_use]
    pub fn with_stats(mut self, attack: u32, defense: u32) -> Self {
        if let Some(profile) = self.creature.as_mut() {
            profile.attack = attack;
            profile.defense = defense;
        }
        self
    }

    /// Set the country of origin. No-op for non-creatures.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        if let Some(profile) = self.creature.as_mut() {
            profile.country = country.into();
        }
        self
    }

    /// Set the rules text.
    #[must_use]
    pub fn with_effect_text(mut self, text: impl Into<String>) -> Self {
        self.effect_text = text.into();
        self
    }

    /// Set the effect trigger.
    #[must_use]
    pub fn with_trigger(mut self, trigger: EffectTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Set the effect frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: EffectFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.category == Category::Creature
    }

    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        self.creature.as_ref().map(|p| p.tier)
    }

    #[must_use]
    pub fn domain(&self) -> Option<Domain> {
        self.creature.as_ref().map(|p| p.domain)
    }

    #[must_use]
    pub fn school(&self) -> Option<School> {
        self.creature.as_ref().map(|p| p.school)
    }

    /// Base (attack, defense); zero for non-creatures.
    #[must_use]
    pub fn base_stats(&self) -> (u32, u32) {
        self.creature
            .as_ref()
            .map_or((0, 0), |p| (p.attack, p.defense))
    }

    /// Cards limited to two copies per deck: top tier, instants, reactives.
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        self.category != Category::Creature || self.tier() == Some(Tier::Legendary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_creature_builder() {
        let card = CardDefinition::creature(CardId::new(1), "Socrates")
            .with_classification(Domain::Philosophy, School::Idealism, Tier::Legendary)
            .with_stats(3000, 2500)
            .with_country("Greece")
            .with_effect_text("Deal 2000 damage")
            .with_frequency(EffectFrequency::OncePerDuel);

        assert_eq!(card.name, "Socrates");
        assert_eq!(card.domain(), Some(Domain::Philosophy));
        assert_eq!(card.school(), Some(School::Idealism));
        assert_eq!(card.base_stats(), (3000, 2500));
        assert_eq!(card.trigger, EffectTrigger::Manual);
        assert_eq!(card.frequency, EffectFrequency::OncePerDuel);
        assert!(card.is_restricted());
    }

    #[test]
    fn test_non_creature_ignores_stats() {
        let card = CardDefinition::reactive(CardId::new(2), "Time Dilation").with_stats(9000, 9000);
        assert!(card.creature.is_none());
        assert_eq!(card.base_stats(), (0, 0));
        assert_eq!(card.trigger, EffectTrigger::Reactive);
        assert!(card.is_restricted());
    }

    #[test]
    fn test_restricted_copy_class() {
        let scholar = CardDefinition::creature(CardId::new(3), "Homer")
            .with_classification(Domain::Humanities, School::Humanism, Tier::Scholar);
        assert!(!scholar.is_restricted());
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::instant(CardId::new(1), "Quantum Leap");
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
