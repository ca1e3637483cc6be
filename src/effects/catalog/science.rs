//! Science legends and masters.

use crate::cards::{Domain, School, Stance};
use crate::effects::context::EffectContext;
use crate::effects::outcome::EffectResult;
use crate::effects::registry::EffectRegistry;
use crate::effects::targeting::{TargetFilter, TargetSpec};
use crate::effects::Effect;
use crate::zones::Zone;

use super::{
    burn, delta, destroy_first, destroy_one, draw, empower_self, heal, own_domain, own_other_creature,
    own_school, rally, reveal_graveyard_instant, reveal_opponent_hand, times,
};

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register("Isaac Newton", newton);
    registry.register("Albert Einstein", einstein);
    registry.register("Galileo Galilei", galileo);
    registry.register("Charles Darwin", darwin);
    registry.register("Marie Curie", curie);
    registry.register("Sigmund Freud", freud);
    registry.register("Nikola Tesla", tesla);
    registry.register("Archimedes", archimedes);
    registry.register("Pythagoras", pythagoras);
    registry.register("Euclid", euclid);
    registry.register("Al-Khwarizmi", al_khwarizmi);
    registry.register("Copernicus", copernicus);
    registry.register("Johannes Kepler", kepler);
    registry.register("Max Planck", planck);
    registry.register("Niels Bohr", bohr);
    registry.register("Louis Pasteur", pasteur);
    registry.register("Gregor Mendel", mendel);
    registry.register("Michael Faraday", faraday);
    registry.register("James Clerk Maxwell", maxwell);
    registry.register("Stephen Hawking", hawking);
    registry.register("Avicenna", avicenna);
    registry.register("Hippocrates", hippocrates);
    registry.register("Thomas Edison", edison);
}

fn newton(ctx: &mut EffectContext<'_>) -> EffectResult {
    destroy_one(ctx, TargetSpec::opponent_creatures())
}

fn einstein(ctx: &mut EffectContext<'_>) -> EffectResult {
    destroy_one(ctx, TargetSpec::opponent_creatures())
}

fn galileo(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.rival().deck().len() < 3 {
        return EffectResult::success("Galileo Galilei: the opponent's deck is too thin to observe.");
    }
    ctx.apply(Effect::shuffle_top(ctx.opponent, 3));
    EffectResult::success("Galileo Galilei rearranged the top 3 cards of the opponent's deck!")
}

fn darwin(ctx: &mut EffectContext<'_>) -> EffectResult {
    empower_self(ctx, 200, 200)
}

fn curie(ctx: &mut EffectContext<'_>) -> EffectResult {
    let scientists = ctx.select(own_domain(Domain::Science)).len();
    let damage = times(scientists, 500);
    ctx.damage_opponent(damage);
    EffectResult::success(format!(
        "Marie Curie: {} damage from {} Science creature(s)!",
        damage, scientists
    ))
}

fn freud(ctx: &mut EffectContext<'_>) -> EffectResult {
    reveal_opponent_hand(ctx)
}

fn tesla(ctx: &mut EffectContext<'_>) -> EffectResult {
    let creatures = ctx.rival().creature_count();
    burn(ctx, times(creatures, 1000))
}

fn archimedes(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 2)
}

fn pythagoras(ctx: &mut EffectContext<'_>) -> EffectResult {
    let hand = ctx.me().hand().len();
    empower_self(ctx, delta(times(hand, 100)), 0)
}

fn euclid(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_school(School::Rationalism), 300, 300, "Rationalism")
}

fn al_khwarizmi(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.me().deck().len() < 5 {
        return EffectResult::success("Al-Khwarizmi: fewer than 5 cards in deck.");
    }
    ctx.apply(Effect::shuffle_top(ctx.owner, 5));
    EffectResult::success("Al-Khwarizmi rearranged the top 5 cards of your deck!")
}

fn copernicus(ctx: &mut EffectContext<'_>) -> EffectResult {
    let attacker = ctx.pick(TargetSpec::opponent_creatures().with_filter(TargetFilter::InStance(Stance::Attack)));
    let defender = ctx.pick(TargetSpec::opponent_creatures().with_filter(TargetFilter::InStance(Stance::Defense)));

    let mut switched = 0;
    for (card, stance) in [(attacker, Stance::Defense), (defender, Stance::Attack)] {
        if let Some(card) = card {
            ctx.apply(Effect::SetStance { card, stance });
            switched += 1;
        }
    }
    EffectResult::success(format!("Copernicus switched the stance of {} card(s)!", switched))
}

fn kepler(ctx: &mut EffectContext<'_>) -> EffectResult {
    match ctx.pick(TargetSpec::own(Zone::Graveyard)) {
        Some(card) => {
            ctx.apply(Effect::move_to_top(card, Zone::Deck));
            EffectResult::success(format!("Johannes Kepler put {} on top of your deck!", ctx.card_name(card)))
        }
        None => EffectResult::success("Johannes Kepler: the graveyard is empty."),
    }
}

fn planck(ctx: &mut EffectContext<'_>) -> EffectResult {
    let damage = ctx.source_card().map_or(0, |card| card.current_attack);
    burn(ctx, damage)
}

fn bohr(ctx: &mut EffectContext<'_>) -> EffectResult {
    destroy_one(
        ctx,
        TargetSpec::opponent_creatures().with_filter(TargetFilter::BaseDefenseBelow(2000)),
    )
}

fn pasteur(ctx: &mut EffectContext<'_>) -> EffectResult {
    heal(ctx, 2000)
}

fn mendel(ctx: &mut EffectContext<'_>) -> EffectResult {
    let Some(model) = ctx.pick(own_other_creature()) else {
        return EffectResult::success("Gregor Mendel: no other creature to copy.");
    };
    let (attack, defense) = ctx
        .card(model)
        .map_or((0, 0), |card| (card.current_attack, card.current_defense));
    ctx.apply(Effect::set_stats(ctx.source, attack, defense));
    EffectResult::success(format!(
        "Gregor Mendel copied {}: now {}/{}!",
        ctx.card_name(model),
        attack,
        defense
    ))
}

fn faraday(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_domain(Domain::Science), 400, 0, "Science")
}

fn maxwell(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.select(own_domain(Domain::Science)).len() < 3 {
        return EffectResult::success("James Clerk Maxwell: fewer than 3 Science creatures.");
    }
    draw(ctx, 3)
}

fn hawking(ctx: &mut EffectContext<'_>) -> EffectResult {
    match destroy_first(ctx, TargetSpec::opponent_creatures()) {
        Some(name) => {
            ctx.damage_opponent(1000);
            EffectResult::success(format!("Stephen Hawking destroyed {} and dealt 1000 damage!", name))
        }
        None => EffectResult::success("Stephen Hawking: nothing crossed the event horizon."),
    }
}

fn avicenna(ctx: &mut EffectContext<'_>) -> EffectResult {
    heal(ctx, 3000)
}

fn hippocrates(ctx: &mut EffectContext<'_>) -> EffectResult {
    heal(ctx, 2500)
}

fn edison(ctx: &mut EffectContext<'_>) -> EffectResult {
    reveal_graveyard_instant(ctx)
}
