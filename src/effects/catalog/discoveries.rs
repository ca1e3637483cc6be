//! Instants.

use crate::cards::{Domain, School};
use crate::effects::context::EffectContext;
use crate::effects::outcome::EffectResult;
use crate::effects::registry::EffectRegistry;
use crate::effects::targeting::{TargetFilter, TargetSpec};
use crate::effects::Effect;
use crate::zones::Zone;

use super::{deck_creatures, draw, fetch, graveyard_creatures, own_domain, rally};

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register("Theory of Relativity", relativity);
    registry.register("Scientific Method", scientific_method);
    registry.register("Renaissance Awakening", renaissance);
    registry.register("Enlightenment Era", enlightenment_era);
    registry.register("Quantum Leap", quantum_leap);
    registry.register("Universal Truth", universal_truth);
    registry.register("Divine Intervention", divine_intervention);
    registry.register("Philosophical Debate", philosophical_debate);
    registry.register("Breakthrough Discovery", breakthrough);
    registry.register("Chain of Knowledge", chain_of_knowledge);
}

fn relativity(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 3)
}

fn scientific_method(ctx: &mut EffectContext<'_>) -> EffectResult {
    fetch(ctx, deck_creatures().with_filter(TargetFilter::OfDomain(Domain::Science)))
}

fn renaissance(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_domain(Domain::Humanities), 1000, 0, "Humanities")
}

fn enlightenment_era(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.heal(5000);
    let drawn = ctx.draw(1);
    EffectResult::success(format!("Enlightenment Era: healed 5000 LP and drew {} card(s)!", drawn))
}

fn quantum_leap(_ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success("Quantum Leap: a creature may attack twice this turn!").doubling_attack()
}

fn universal_truth(ctx: &mut EffectContext<'_>) -> EffectResult {
    let count = ctx.adjust_each(
        TargetSpec::own(Zone::Hand).with_filter(TargetFilter::Creature),
        500,
        500,
    );
    EffectResult::success(format!(
        "Universal Truth: {} creature(s) in hand gain 500 ATK and 500 DEF!",
        count
    ))
}

fn divine_intervention(ctx: &mut EffectContext<'_>) -> EffectResult {
    let Some(card) = ctx.pick(graveyard_creatures()) else {
        return EffectResult::success("Divine Intervention: no creature in the graveyard.");
    };
    let Some((attack, defense)) = ctx
        .card(card)
        .map(|c| (c.base_attack() / 2, c.base_defense() / 2))
    else {
        return EffectResult::failure(format!("Card {} not found", card));
    };
    ctx.apply(Effect::revive(card, attack, defense));
    EffectResult::success(format!(
        "Divine Intervention revived {} as {}/{}!",
        ctx.card_name(card),
        attack,
        defense
    ))
}

fn philosophical_debate(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_domain(Domain::Philosophy), 800, 0, "Philosophy")
}

fn breakthrough(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 2)
}

fn chain_of_knowledge(ctx: &mut EffectContext<'_>) -> EffectResult {
    let links = ctx.me().school_count(School::Rationalism).min(3);
    draw(ctx, links)
}

#[cfg(test)]
mod tests {
    use super::super::testing::Table;
    use crate::core::PlayerId;
    use crate::zones::Zone;

    #[test]
    fn test_scientific_method_fetches_scientist() {
        let mut table = Table::new();
        let method = table.put(PlayerId::ONE, "Scientific Method", Zone::Hand);
        table.put(PlayerId::ONE, "Homer", Zone::Deck);
        let newton = table.put(PlayerId::ONE, "Isaac Newton", Zone::Deck);

        table.resolve(method);
        assert_eq!(table.zone_of(newton), Zone::Hand);
    }

    #[test]
    fn test_quantum_leap_signals_double_attack() {
        let mut table = Table::new();
        let leap = table.put(PlayerId::ONE, "Quantum Leap", Zone::Hand);
        assert!(table.resolve(leap).signals.double_attack);
    }

    #[test]
    fn test_universal_truth_boosts_hand() {
        let mut table = Table::new();
        let truth = table.put(PlayerId::ONE, "Universal Truth", Zone::Hand);
        let held = table.put(PlayerId::ONE, "Homer", Zone::Hand);
        let fielded = table.put(PlayerId::ONE, "Leo Tolstoy", Zone::Battlefield);

        table.resolve(truth);
        assert_eq!(table.attack_of(held), 1800);
        assert_eq!(table.defense_of(held), 1800);
        assert_eq!(table.attack_of(fielded), 1200);
    }

    #[test]
    fn test_divine_intervention_halves_base() {
        let mut table = Table::new();
        let miracle = table.put(PlayerId::ONE, "Divine Intervention", Zone::Hand);
        let fallen = table.put(PlayerId::ONE, "Stephen Hawking", Zone::Graveyard);

        table.resolve(miracle);
        assert_eq!(table.zone_of(fallen), Zone::Battlefield);
        assert_eq!(table.attack_of(fallen), 1250);
        assert_eq!(table.defense_of(fallen), 800);
    }

    #[test]
    fn test_chain_of_knowledge_caps_at_three() {
        let mut table = Table::new();
        let chain = table.put(PlayerId::ONE, "Chain of Knowledge", Zone::Hand);
        for _ in 0..4 {
            table.put(PlayerId::ONE, "Euclid", Zone::Battlefield);
            table.put(PlayerId::ONE, "Homer", Zone::Deck);
        }

        table.resolve(chain);
        // The chain itself plus three drawn cards.
        assert_eq!(table.state.player(PlayerId::ONE).hand().len(), 4);
    }
}
