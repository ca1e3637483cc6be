//! Humanities legends and masters.

use crate::cards::{CardCondition, Expiry, School, Tier};
use crate::effects::context::EffectContext;
use crate::effects::outcome::EffectResult;
use crate::effects::registry::EffectRegistry;
use crate::effects::targeting::{TargetFilter, TargetSpec};
use crate::zones::Zone;

use super::{deck_creatures, own_school, rally, summon_all};

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register("Leonardo da Vinci", da_vinci);
    registry.register("William Shakespeare", shakespeare);
    registry.register("Adam Smith", adam_smith);
    registry.register("Thomas More", thomas_more);
    registry.register("Sun Tzu", sun_tzu);
    registry.register("Martin Luther King Jr.", king);
    registry.register("Nelson Mandela", mandela);
    registry.register("Abraham Lincoln", lincoln);
    registry.register("Winston Churchill", churchill);
    registry.register("Johannes Gutenberg", gutenberg);
}

fn da_vinci(ctx: &mut EffectContext<'_>) -> EffectResult {
    let sketches = ctx.select(TargetSpec::own(Zone::Hand).with_filter(TargetFilter::NonCreature));
    for &card in &sketches {
        ctx.grant(card, CardCondition::CanActivateFromHand, Expiry::Permanent);
    }
    EffectResult::success(format!(
        "Leonardo da Vinci: {} card(s) in hand can be activated directly!",
        sketches.len()
    ))
}

fn shakespeare(ctx: &mut EffectContext<'_>) -> EffectResult {
    summon_all(
        ctx,
        deck_creatures().with_filter(TargetFilter::OfTier(Tier::Scholar)).up_to(2),
    )
}

fn adam_smith(ctx: &mut EffectContext<'_>) -> EffectResult {
    let traders = ctx.me().school_count(School::Materialism);
    let drawn = ctx.draw(traders);
    EffectResult::success(format!(
        "Adam Smith drew {} card(s) from {} Materialism creature(s)!",
        drawn, traders
    ))
}

fn thomas_more(ctx: &mut EffectContext<'_>) -> EffectResult {
    if !ctx.select(TargetSpec::own_creatures().others()).is_empty() {
        return EffectResult::success("Thomas More: Utopia needs an empty field.");
    }
    summon_all(
        ctx,
        TargetSpec::own(Zone::Hand).with_filter(TargetFilter::Creature).up_to(3),
    )
}

fn sun_tzu(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.grant_source(CardCondition::AttacksFirst, Expiry::Permanent);
    EffectResult::success("Sun Tzu strikes first in every battle.")
}

fn king(ctx: &mut EffectContext<'_>) -> EffectResult {
    let count = ctx.adjust_each(own_school(School::Humanism), 600, 0);
    ctx.heal(1500);
    EffectResult::success(format!(
        "Martin Luther King Jr.: {} Humanism creature(s) gain 600 ATK and you heal 1500 LP!",
        count
    ))
}

fn mandela(_ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success("Nelson Mandela will shelter your Humanism creatures from the graveyard.")
}

fn lincoln(ctx: &mut EffectContext<'_>) -> EffectResult {
    let expiry = ctx.until_next_turn();
    let targets = ctx.select(TargetSpec::opponent_creatures());
    for &card in &targets {
        ctx.grant(card, CardCondition::EffectsNegated, expiry);
    }
    EffectResult::success(format!(
        "Abraham Lincoln negated the effects of {} creature(s) until your next turn!",
        targets.len()
    ))
}

fn churchill(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.me().life() >= 5000 {
        return EffectResult::success("Winston Churchill: not yet your darkest hour.");
    }
    rally(ctx, TargetSpec::own_creatures(), 0, 1000, "allied")
}

fn gutenberg(ctx: &mut EffectContext<'_>) -> EffectResult {
    let drawn = ctx.draw(2);
    let shared = ctx.draw_for(ctx.opponent, 1);
    EffectResult::success(format!(
        "Johannes Gutenberg printed {} card(s) for you and {} for your opponent!",
        drawn, shared
    ))
}

#[cfg(test)]
mod tests {
    use super::super::testing::Table;
    use crate::cards::CardCondition;
    use crate::core::PlayerId;
    use crate::zones::Zone;

    #[test]
    fn test_da_vinci_unlocks_hand() {
        let mut table = Table::new();
        let leonardo = table.put(PlayerId::ONE, "Leonardo da Vinci", Zone::Battlefield);
        let trap = table.put(PlayerId::ONE, "Time Dilation", Zone::Hand);
        let creature = table.put(PlayerId::ONE, "Homer", Zone::Hand);

        table.resolve(leonardo);
        let turn = table.state.turn;
        assert!(table.state.card(trap).unwrap().has(CardCondition::CanActivateFromHand, turn));
        assert!(!table.state.card(creature).unwrap().has(CardCondition::CanActivateFromHand, turn));
    }

    #[test]
    fn test_shakespeare_summons_two_scholars() {
        let mut table = Table::new();
        let bard = table.put(PlayerId::ONE, "William Shakespeare", Zone::Battlefield);
        table.put(PlayerId::ONE, "Archimedes", Zone::Deck);
        let first = table.put(PlayerId::ONE, "Homer", Zone::Deck);
        let second = table.put(PlayerId::ONE, "Leo Tolstoy", Zone::Deck);
        let third = table.put(PlayerId::ONE, "Carl Jung", Zone::Deck);

        table.resolve(bard);
        assert_eq!(table.zone_of(first), Zone::Battlefield);
        assert_eq!(table.zone_of(second), Zone::Battlefield);
        assert_eq!(table.zone_of(third), Zone::Deck);
    }

    #[test]
    fn test_thomas_more_needs_empty_field() {
        let mut table = Table::new();
        let more = table.put(PlayerId::ONE, "Thomas More", Zone::Battlefield);
        let hand: Vec<_> = ["Homer", "Leo Tolstoy", "Carl Jung", "Zoroaster"]
            .into_iter()
            .map(|name| table.put(PlayerId::ONE, name, Zone::Hand))
            .collect();

        table.resolve(more);
        assert_eq!(table.state.player(PlayerId::ONE).creature_count(), 4);
        assert_eq!(table.zone_of(hand[3]), Zone::Hand);

        table.resolve(more);
        assert_eq!(table.zone_of(hand[3]), Zone::Hand);
    }

    #[test]
    fn test_lincoln_negates_opponent_creatures() {
        let mut table = Table::new();
        let lincoln = table.put(PlayerId::ONE, "Abraham Lincoln", Zone::Battlefield);
        let foe = table.put(PlayerId::TWO, "Homer", Zone::Battlefield);

        table.resolve(lincoln);
        assert!(table.state.card(foe).unwrap().has(CardCondition::EffectsNegated, 2));
        assert!(!table.state.card(lincoln).unwrap().has(CardCondition::EffectsNegated, 1));
    }

    #[test]
    fn test_churchill_only_in_dark_hour() {
        let mut table = Table::new();
        let churchill = table.put(PlayerId::ONE, "Winston Churchill", Zone::Battlefield);
        table.resolve(churchill);
        assert_eq!(table.defense_of(churchill), 2100);

        table.state.player_mut(PlayerId::ONE).take_damage(16_000);
        table.resolve(churchill);
        assert_eq!(table.defense_of(churchill), 3100);
    }

    #[test]
    fn test_gutenberg_prints_for_both() {
        let mut table = Table::new();
        let gutenberg = table.put(PlayerId::ONE, "Johannes Gutenberg", Zone::Battlefield);
        for _ in 0..3 {
            table.put(PlayerId::ONE, "Homer", Zone::Deck);
            table.put(PlayerId::TWO, "Homer", Zone::Deck);
        }

        table.resolve(gutenberg);
        assert_eq!(table.state.player(PlayerId::ONE).hand().len(), 2);
        assert_eq!(table.state.player(PlayerId::TWO).hand().len(), 1);
    }
}
