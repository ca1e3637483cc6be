//! The built-in starter catalog.
//!
//! 99 creatures (20 legendary, 39 master, 40 scholar), 10 instants and 10
//! reactives. Every card here has a matching procedure in the effect
//! catalog.

use super::attributes::{Domain, EffectFrequency, EffectTrigger, School, Tier};
use super::definition::{CardDefinition, CardId};
use super::registry::{CardRegistry, CardRepository};

use super::attributes::Domain::{Humanities, Philosophy, Science, Spirituality};
use super::attributes::School::{Empiricism, Humanism, Idealism, Materialism, Mysticism, Rationalism};

/// name, country, domain, school, attack, defense, rules text
type CreatureRow = (&'static str, &'static str, Domain, School, u32, u32, &'static str);

const LEGENDARY: &[CreatureRow] = &[
    ("Isaac Newton", "England", Science, Rationalism, 3000, 2500, "Destroy one opponent creature."),
    ("Albert Einstein", "Germany", Science, Rationalism, 3200, 2600, "Destroy one opponent creature."),
    ("Galileo Galilei", "Italy", Science, Empiricism, 2800, 2300, "Shuffle the top 3 cards of the opponent's deck."),
    ("Charles Darwin", "England", Science, Empiricism, 2700, 2700, "This card gains 200 ATK and 200 DEF."),
    ("Marie Curie", "Poland", Science, Empiricism, 2800, 2400, "Deal 500 damage for each Science creature you control."),
    ("Aristotle", "Greece", Philosophy, Empiricism, 2900, 2600, "Your Philosophy creatures gain 500 ATK."),
    ("Plato", "Greece", Philosophy, Idealism, 2800, 2800, "Reveal the first instant in your graveyard."),
    ("Socrates", "Greece", Philosophy, Idealism, 3000, 2500, "Deal 2000 damage to your opponent."),
    ("Immanuel Kant", "Germany", Philosophy, Rationalism, 2700, 2900, "Draw 1 card."),
    ("René Descartes", "France", Philosophy, Rationalism, 2800, 2500, "This card is unaffected by opponent effects."),
    ("Jesus Christ", "Judea", Spirituality, Mysticism, 3000, 3000, "Heal 3000 and revive every creature in your graveyard as 1000/1000."),
    ("Muhammad", "Arabia", Spirituality, Idealism, 2900, 3000, "Heal 5000. Your Spirituality creatures gain 1000 DEF."),
    ("Buddha", "India", Spirituality, Mysticism, 2600, 3200, "While in your graveyard, your Spirituality creatures gain 1000 ATK."),
    ("Moses", "Egypt", Spirituality, Idealism, 2700, 2900, "Destroy every reactive your opponent has set."),
    ("Confucius", "China", Philosophy, Humanism, 2600, 2800, "Heal 1000 and draw 1 card for each school you control."),
    ("Leonardo da Vinci", "Italy", Humanities, Humanism, 2800, 2600, "Instants and reactives in your hand can be activated from hand."),
    ("William Shakespeare", "England", Humanities, Humanism, 2700, 2500, "Summon up to 2 Scholar creatures from your deck."),
    ("Karl Marx", "Germany", Philosophy, Materialism, 2900, 2400, "Destroy opponent creatures with more than 2500 base ATK."),
    ("Sigmund Freud", "Austria", Science, Empiricism, 2500, 2500, "Reveal the size of your opponent's hand."),
    ("Mahatma Gandhi", "India", Spirituality, Humanism, 2400, 3200, "Heal 1000. This card cannot be attacked until your next turn."),
];

const MASTER: &[CreatureRow] = &[
    ("Nikola Tesla", "Serbia", Science, Materialism, 2400, 1800, "Deal 1000 damage for each opponent creature."),
    ("Archimedes", "Greece", Science, Rationalism, 2000, 2000, "Draw 2 cards."),
    ("Pythagoras", "Greece", Science, Rationalism, 1900, 1900, "Gain 100 ATK for each card in your hand."),
    ("Euclid", "Greece", Science, Rationalism, 1800, 2100, "Your Rationalism creatures gain 300 ATK and 300 DEF."),
    ("Al-Khwarizmi", "Persia", Science, Rationalism, 1900, 1900, "Shuffle the top 5 cards of your deck."),
    ("Copernicus", "Poland", Science, Empiricism, 2100, 1800, "Switch the stance of one attacking and one defending opponent creature."),
    ("Johannes Kepler", "Germany", Science, Empiricism, 2000, 1900, "Put the first card of your graveyard on top of your deck."),
    ("Max Planck", "Germany", Science, Materialism, 2200, 1700, "Deal damage equal to this card's ATK."),
    ("Niels Bohr", "Denmark", Science, Empiricism, 2100, 2000, "Destroy an opponent creature with less than 2000 base DEF."),
    ("Louis Pasteur", "France", Science, Empiricism, 1700, 2200, "Heal 2000."),
    ("Gregor Mendel", "Austria", Science, Empiricism, 1600, 2000, "Copy the stats of another creature you control."),
    ("Michael Faraday", "England", Science, Empiricism, 2000, 1800, "Your Science creatures gain 400 ATK."),
    ("James Clerk Maxwell", "Scotland", Science, Rationalism, 2100, 1900, "If you control 3 Science creatures, draw 3 cards."),
    ("Stephen Hawking", "England", Science, Rationalism, 2500, 1600, "Destroy one opponent creature and deal 1000 damage."),
    ("John Locke", "England", Philosophy, Empiricism, 1900, 2100, "Reset an opponent creature's stats."),
    ("David Hume", "Scotland", Philosophy, Empiricism, 1800, 2000, "Draw 1 card."),
    ("Jean-Jacques Rousseau", "France", Philosophy, Humanism, 2000, 1800, "If your opponent controls more creatures, destroy two of them."),
    ("Voltaire", "France", Philosophy, Rationalism, 2100, 1700, "Halve an opponent creature's ATK."),
    ("Friedrich Nietzsche", "Germany", Philosophy, Idealism, 2200, 1600, "Gain 500 ATK for each card in your graveyard (max 2000)."),
    ("Thomas Aquinas", "Italy", Spirituality, Rationalism, 1800, 2200, "Heal 1500. A Mysticism creature you control gains 800 ATK."),
    ("Augustine", "Numidia", Spirituality, Idealism, 1700, 2300, "Your Spirituality creatures cannot be destroyed by effects."),
    ("John Stuart Mill", "England", Philosophy, Empiricism, 1900, 2000, "If you have less life than your opponent, heal the difference (max 3000)."),
    ("Adam Smith", "Scotland", Humanities, Materialism, 1800, 1900, "Draw 1 card for each Materialism creature you control."),
    ("Baruch Spinoza", "Netherlands", Philosophy, Rationalism, 1900, 2000, "Your creatures gain 200 ATK and DEF for each domain you control."),
    ("Laozi", "China", Spirituality, Mysticism, 1700, 2300, "Heal 2000. Return another creature you control to your hand."),
    ("Avicenna", "Persia", Science, Rationalism, 1800, 2100, "Heal 3000."),
    ("Martin Luther", "Germany", Spirituality, Idealism, 2000, 2000, "Destroy an opponent instant or reactive. Summon a Spirituality creature from your deck."),
    ("Thomas More", "England", Humanities, Humanism, 1800, 2000, "If this is your only creature, summon up to 3 creatures from your hand."),
    ("Rumi", "Persia", Spirituality, Mysticism, 1900, 2100, "Return every other creature to its owner's hand."),
    ("Francis of Assisi", "Italy", Spirituality, Mysticism, 1600, 2400, "Heal 500. This card cannot be attacked until your next turn."),
    ("Hippocrates", "Greece", Science, Empiricism, 1700, 2200, "Heal 2500."),
    ("Sun Tzu", "China", Humanities, Materialism, 2400, 1800, "This card strikes first and survives attack ties."),
    ("Martin Luther King Jr.", "USA", Humanities, Humanism, 2000, 2100, "Your Humanism creatures gain 600 ATK. Heal 1500."),
    ("Nelson Mandela", "South Africa", Humanities, Humanism, 1800, 2400, "While in your graveyard, your Humanism creatures cannot be attacked."),
    ("Abraham Lincoln", "USA", Humanities, Humanism, 2000, 2200, "Opponent creature effects are negated until your next turn."),
    ("Winston Churchill", "England", Humanities, Materialism, 2100, 2100, "If you have less than 5000 life, your creatures gain 1000 DEF."),
    ("Machiavelli", "Italy", Philosophy, Materialism, 2200, 1700, "Take control of the weakest opponent creature if it has less than 1500 ATK."),
    ("Thomas Edison", "USA", Science, Materialism, 2100, 1800, "Reveal the first instant in your graveyard."),
    ("Johannes Gutenberg", "Germany", Humanities, Materialism, 1800, 1900, "Draw 2 cards. Your opponent draws 1 card."),
];

const SCHOLAR: &[CreatureRow] = &[
    ("Werner Heisenberg", "Germany", Science, Empiricism, 1500, 1200, "This card cannot be targeted."),
    ("Erwin Schrödinger", "Austria", Science, Idealism, 1400, 1400, "Simultaneously alive and destroyed."),
    ("Alexander Fleming", "Scotland", Science, Empiricism, 1200, 1500, "Heal 1500."),
    ("James Watt", "Scotland", Science, Materialism, 1600, 1100, "Your Materialism creatures gain 300 ATK."),
    ("Carl Sagan", "USA", Science, Empiricism, 1300, 1300, "Draw 1 card. If it is a Science creature, draw 1 more."),
    ("Rachel Carson", "USA", Science, Empiricism, 1100, 1600, "Your Empiricism creatures gain 400 DEF."),
    ("Rosalind Franklin", "England", Science, Empiricism, 1400, 1300, "Reveal the size of your opponent's hand."),
    ("Linus Pauling", "USA", Science, Materialism, 1500, 1200, "This card and another creature you control gain 500 ATK."),
    ("Richard Feynman", "USA", Science, Rationalism, 1600, 1200, "Deal 800 damage."),
    ("Ada Lovelace", "England", Science, Rationalism, 1300, 1400, "Add a Rationalism creature from your deck to your hand."),
    ("Bertrand Russell", "England", Philosophy, Rationalism, 1400, 1400, "Negate an effect."),
    ("Ludwig Wittgenstein", "Austria", Philosophy, Rationalism, 1400, 1300, "An opponent creature's school becomes Rationalism."),
    ("Søren Kierkegaard", "Denmark", Philosophy, Idealism, 1300, 1300, "Flip a coin: gain 2000 ATK or lose 1000 ATK."),
    ("Martin Heidegger", "Germany", Philosophy, Idealism, 1500, 1200, "Send another creature you control to the graveyard and draw 1 card."),
    ("Jean-Paul Sartre", "France", Philosophy, Humanism, 1200, 1200, "Double this card's ATK."),
    ("Simone de Beauvoir", "France", Philosophy, Humanism, 1300, 1400, "Your Humanities creatures gain 500 ATK and 500 DEF."),
    ("John Dewey", "USA", Philosophy, Empiricism, 1200, 1400, "Draw 1 card."),
    ("Georg Hegel", "Germany", Philosophy, Idealism, 1400, 1400, "Add another creature's ATK to this card."),
    ("Arthur Schopenhauer", "Germany", Philosophy, Idealism, 1300, 1500, "Your creatures lose 300 ATK and gain 300 DEF."),
    ("Francis Bacon", "England", Philosophy, Empiricism, 1400, 1300, "Take the top card of your deck into your hand."),
    ("Guru Nanak", "India", Spirituality, Mysticism, 1100, 1700, "Your Spirituality creatures gain 300 DEF."),
    ("Zoroaster", "Persia", Spirituality, Mysticism, 1200, 1500, "Heal 1000."),
    ("Maimonides", "Spain", Spirituality, Rationalism, 1300, 1500, "If you control Mysticism and Rationalism creatures, draw 2 cards."),
    ("John Calvin", "France", Spirituality, Idealism, 1200, 1600, "Flip a coin: heal 1000 on heads."),
    ("Origen", "Egypt", Spirituality, Mysticism, 1100, 1600, "Heal 1200."),
    ("Meister Eckhart", "Germany", Spirituality, Mysticism, 1200, 1500, "When destroyed, your opponent takes 1000 damage."),
    ("Homer", "Greece", Humanities, Humanism, 1300, 1300, "Draw 2 cards."),
    ("Dante Alighieri", "Italy", Humanities, Humanism, 1400, 1400, "Revive the first creature in your graveyard as 1200/1200."),
    ("Miguel de Cervantes", "Spain", Humanities, Humanism, 1500, 1100, "Can attack directly for half damage."),
    ("Leo Tolstoy", "Russia", Humanities, Humanism, 1200, 1400, "Draw 2 cards."),
    ("Fyodor Dostoevsky", "Russia", Humanities, Idealism, 1500, 1200, "Deal 1000 damage to your opponent and 500 to yourself."),
    ("Victor Hugo", "France", Humanities, Humanism, 1300, 1300, "Summon a Scholar creature from your deck."),
    ("Charles Dickens", "England", Humanities, Materialism, 1200, 1300, "Gain 300 ATK for each card in your hand."),
    ("Mark Twain", "USA", Humanities, Humanism, 1400, 1200, "Draw 1 card and gain 500 ATK."),
    ("Jane Austen", "England", Humanities, Humanism, 1100, 1500, "An opponent creature cannot attack until your next turn."),
    ("George Orwell", "England", Humanities, Materialism, 1400, 1300, "Reveal the size of your opponent's hand."),
    ("Carl Jung", "Switzerland", Science, Mysticism, 1300, 1400, "Your Mysticism creatures gain 400 ATK."),
    ("Émile Durkheim", "France", Humanities, Empiricism, 1300, 1300, "Gain 200 ATK for each opponent creature."),
    ("Max Weber", "Germany", Humanities, Materialism, 1300, 1400, "Draw 1 card for each Materialism creature you control."),
    ("Ibn Khaldun", "Tunisia", Humanities, Empiricism, 1300, 1400, "Return a reactive from your graveyard to your hand."),
];

const INSTANTS: &[(&str, &str)] = &[
    ("Theory of Relativity", "Draw 3 cards."),
    ("Scientific Method", "Add a Science creature from your deck to your hand."),
    ("Renaissance Awakening", "Your Humanities creatures gain 1000 ATK."),
    ("Enlightenment Era", "Heal 5000 and draw 1 card."),
    ("Quantum Leap", "One creature may attack twice this turn."),
    ("Universal Truth", "Creatures in your hand gain 500 ATK and 500 DEF."),
    ("Divine Intervention", "Revive the first creature in your graveyard at half its stats."),
    ("Philosophical Debate", "Your Philosophy creatures gain 800 ATK."),
    ("Breakthrough Discovery", "Draw 2 cards."),
    ("Chain of Knowledge", "Draw 1 card for each Rationalism creature you control (max 3)."),
];

const REACTIVES: &[(&str, &str)] = &[
    ("Schrödinger's Cat", "Negate an attack."),
    ("Infinite Regression", "Negate an attack and its effects."),
    ("Existential Crisis", "Opponent Legendary creatures lose all ATK."),
    ("Butterfly Effect", "If you have less than 5000 life, destroy opponent creatures with less than 1500 base ATK."),
    ("Heisenberg's Uncertainty", "Redirect an attack to a random target."),
    ("Occam's Razor", "If your opponent controls 3 or more creatures, destroy the weakest."),
    ("Eternal Return", "Your Spirituality creatures return to hand instead of being destroyed."),
    ("Prisoner's Dilemma", "Your opponent discards a card after each draw."),
    ("Time Dilation", "Your opponent skips their next turn."),
    ("Cognitive Dissonance", "Flip a coin: on tails, reverse an effect."),
];

/// When a creature's effect fires. Every creature effect runs at most once
/// per turn.
fn trigger(name: &str) -> EffectTrigger {
    match name {
        "Albert Einstein" | "Isaac Newton" | "Nikola Tesla" | "Marie Curie" | "Muhammad" | "Jesus Christ"
        | "Archimedes" | "Max Planck" => EffectTrigger::OnSummon,
        "Buddha" | "Nelson Mandela" | "Dante Alighieri" => EffectTrigger::Graveyard,
        "Charles Darwin" | "Mahatma Gandhi" | "Friedrich Nietzsche" | "Søren Kierkegaard" => {
            EffectTrigger::Continuous
        }
        _ => EffectTrigger::Manual,
    }
}

/// Every card of the base game, in catalog order.
#[must_use]
pub fn starter_catalog() -> CardRegistry {
    let mut registry = CardRegistry::new();
    let mut next_id = 1;
    let mut id = || {
        let current = CardId::new(next_id);
        next_id += 1;
        current
    };

    let tiers = [
        (Tier::Legendary, LEGENDARY),
        (Tier::Master, MASTER),
        (Tier::Scholar, SCHOLAR),
    ];
    for (tier, rows) in tiers {
        for &(name, country, domain, school, attack, defense, text) in rows {
            registry.register(
                CardDefinition::creature(id(), name)
                    .with_classification(domain, school, tier)
                    .with_stats(attack, defense)
                    .with_country(country)
                    .with_effect_text(text)
                    .with_trigger(trigger(name))
                    .with_frequency(EffectFrequency::OncePerTurn),
            );
        }
    }

    for &(name, text) in INSTANTS {
        registry.register(CardDefinition::instant(id(), name).with_effect_text(text));
    }
    for &(name, text) in REACTIVES {
        registry.register(CardDefinition::reactive(id(), name).with_effect_text(text));
    }

    registry
}

/// The starter catalog as a repository.
#[derive(Clone, Copy, Debug, Default)]
pub struct StarterCatalog;

impl CardRepository for StarterCatalog {
    fn card_definitions(&self) -> Vec<CardDefinition> {
        starter_catalog().iter().cloned().collect()
    }
}
