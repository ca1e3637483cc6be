//! Deck construction.
//!
//! `DeckBuilder` enforces the per-name copy limits and the category caps on
//! every `add`, so a builder never holds an over-limit deck. Only the exact
//! size is left to `validate`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardRegistry, Category, Domain, Tier};
use crate::core::{DeckError, DeckRules};

use super::format::DeckList;

/// A deck under construction.
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    name: String,
    rules: DeckRules,
    cards: Vec<CardDefinition>,
    counts: FxHashMap<String, usize>,
}

impl DeckBuilder {
    /// Create an empty deck with the default limits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: DeckRules::default(),
            cards: Vec::new(),
            counts: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: DeckRules) -> Self {
        self.rules = rules;
        self
    }

    /// Rebuild a saved deck, enforcing every limit.
    pub fn from_list(list: &DeckList, registry: &CardRegistry, rules: DeckRules) -> Result<Self, DeckError> {
        let mut builder = Self::new(list.deck_name.clone()).with_rules(rules);
        for card in list.hydrate(registry)? {
            builder.add(&card)?;
        }
        Ok(builder)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rules(&self) -> &DeckRules {
        &self.rules
    }

    #[must_use]
    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Copies of `name` in the deck.
    #[must_use]
    pub fn count_of(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Check whether one more copy of `card` would fit.
    pub fn can_add(&self, card: &CardDefinition) -> Result<(), DeckError> {
        let rules = &self.rules;
        if self.cards.len() >= rules.deck_size {
            return Err(DeckError::DeckFull { size: rules.deck_size });
        }

        let caps = [
            (card.category == Category::Instant, "instant", rules.max_instants, Category::Instant),
            (card.category == Category::Reactive, "reactive", rules.max_reactives, Category::Reactive),
        ];
        for (applies, what, limit, category) in caps {
            if applies && count_matching(&self.cards, |c| c.category == category) >= limit {
                return Err(DeckError::CategoryCap { what, limit });
            }
        }
        if card.tier() == Some(Tier::Legendary)
            && count_matching(&self.cards, |c| c.tier() == Some(Tier::Legendary)) >= rules.max_legendaries
        {
            return Err(DeckError::CategoryCap {
                what: "legendary",
                limit: rules.max_legendaries,
            });
        }

        let limit = if card.is_restricted() {
            rules.restricted_copy_limit
        } else {
            rules.copy_limit
        };
        if self.count_of(&card.name) >= limit {
            return Err(DeckError::CopyLimit {
                name: card.name.clone(),
                limit,
            });
        }
        Ok(())
    }

    /// Add one copy of `card`.
    pub fn add(&mut self, card: &CardDefinition) -> Result<(), DeckError> {
        self.can_add(card)?;
        self.cards.push(card.clone());
        *self.counts.entry(card.name.clone()).or_insert(0) += 1;
        tracing::debug!(deck = %self.name, card = %card.name, size = self.cards.len(), "card added");
        Ok(())
    }

    /// Remove one copy of the named card.
    pub fn remove(&mut self, name: &str) -> Result<CardDefinition, DeckError> {
        let index = self
            .cards
            .iter()
            .position(|card| card.name == name)
            .ok_or_else(|| DeckError::NotInDeck(name.to_string()))?;
        let removed = self.cards.remove(index);
        if let Some(count) = self.counts.get_mut(name) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(name);
            }
        }
        Ok(removed)
    }

    /// A deck is playable at exactly the configured size.
    pub fn validate(&self) -> Result<(), DeckError> {
        if self.cards.len() == self.rules.deck_size {
            Ok(())
        } else {
            Err(DeckError::WrongSize {
                expected: self.rules.deck_size,
                actual: self.cards.len(),
            })
        }
    }

    /// The validated card list, ready for `Duel::start`.
    pub fn build(&self) -> Result<Vec<CardDefinition>, DeckError> {
        self.validate()?;
        Ok(self.cards.clone())
    }

    /// The persisted form of this deck.
    #[must_use]
    pub fn to_list(&self) -> DeckList {
        DeckList {
            deck_name: self.name.clone(),
            card_names: self.cards.iter().map(|card| card.name.clone()).collect(),
        }
    }

    #[must_use]
    pub fn statistics(&self) -> DeckStatistics {
        DeckStatistics::of(&self.cards)
    }
}

/// Composition summary of a deck.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckStatistics {
    pub total: usize,
    pub creatures: usize,
    pub instants: usize,
    pub reactives: usize,
    pub legendary: usize,
    pub master: usize,
    pub scholar: usize,
    /// Mean base ATK over creatures, 0 without creatures.
    pub average_attack: f64,
    pub average_defense: f64,
    pub science: usize,
    pub philosophy: usize,
    pub spirituality: usize,
    pub humanities: usize,
}

impl DeckStatistics {
    #[must_use]
    pub fn of(cards: &[CardDefinition]) -> Self {
        let tier = |t: Tier| count_matching(cards, |c| c.tier() == Some(t));
        let domain = |d: Domain| count_matching(cards, |c| c.domain() == Some(d));

        let creatures: Vec<(u32, u32)> = cards
            .iter()
            .filter(|card| card.is_creature())
            .map(CardDefinition::base_stats)
            .collect();
        let average = |pick: fn(&(u32, u32)) -> u32| {
            if creatures.is_empty() {
                0.0
            } else {
                creatures.iter().map(|s| f64::from(pick(s))).sum::<f64>() / creatures.len() as f64
            }
        };

        Self {
            total: cards.len(),
            creatures: creatures.len(),
            instants: count_matching(cards, |c| c.category == Category::Instant),
            reactives: count_matching(cards, |c| c.category == Category::Reactive),
            legendary: tier(Tier::Legendary),
            master: tier(Tier::Master),
            scholar: tier(Tier::Scholar),
            average_attack: average(|s| s.0),
            average_defense: average(|s| s.1),
            science: domain(Domain::Science),
            philosophy: domain(Domain::Philosophy),
            spirituality: domain(Domain::Spirituality),
            humanities: domain(Domain::Humanities),
        }
    }
}

fn count_matching(cards: &[CardDefinition], predicate: impl Fn(&CardDefinition) -> bool) -> usize {
    cards.iter().filter(|card| predicate(card)).count()
}

impl std::fmt::Display for DeckStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Total: {} | Creatures: {} (L:{} M:{} S:{})",
            self.total, self.creatures, self.legendary, self.master, self.scholar
        )?;
        writeln!(f, "Instants: {} | Reactives: {}", self.instants, self.reactives)?;
        writeln!(
            f,
            "Avg ATK: {:.0} | Avg DEF: {:.0}",
            self.average_attack, self.average_defense
        )?;
        write!(
            f,
            "Domains: Sci:{} Phil:{} Spir:{} Hum:{}",
            self.science, self.philosophy, self.spirituality, self.humanities
        )
    }
}

/// The default starter deck: the first three legendaries and five masters
/// twice each, then four scholars, five instants and five reactives.
pub fn starter_deck(registry: &CardRegistry, name: impl Into<String>) -> Result<DeckBuilder, DeckError> {
    let mut builder = DeckBuilder::new(name);
    let of_tier = |tier: Tier| registry.find(move |c| c.tier() == Some(tier));

    for card in of_tier(Tier::Legendary).take(3).chain(of_tier(Tier::Master).take(5)) {
        builder.add(card)?;
        builder.add(card)?;
    }
    let singles = of_tier(Tier::Scholar)
        .take(4)
        .chain(registry.find_by_category(Category::Instant).take(5))
        .chain(registry.find_by_category(Category::Reactive).take(5));
    for card in singles {
        builder.add(card)?;
    }
    Ok(builder)
}
