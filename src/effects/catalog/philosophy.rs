//! Philosophy legends and masters.

use rustc_hash::FxHashSet;

use crate::cards::{CardCondition, Domain, Expiry};
use crate::effects::context::EffectContext;
use crate::effects::outcome::EffectResult;
use crate::effects::registry::EffectRegistry;
use crate::effects::targeting::{TargetFilter, TargetSpec};
use crate::effects::Effect;

use super::{delta, destroy_all, destroy_one, draw, own_domain, rally, reveal_graveyard_instant, times};

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register("Aristotle", aristotle);
    registry.register("Plato", plato);
    registry.register("Socrates", socrates);
    registry.register("Immanuel Kant", kant);
    registry.register("René Descartes", descartes);
    registry.register("Confucius", confucius);
    registry.register("Karl Marx", marx);
    registry.register("John Locke", locke);
    registry.register("David Hume", hume);
    registry.register("Jean-Jacques Rousseau", rousseau);
    registry.register("Voltaire", voltaire);
    registry.register("Friedrich Nietzsche", nietzsche);
    registry.register("John Stuart Mill", mill);
    registry.register("Baruch Spinoza", spinoza);
    registry.register("Machiavelli", machiavelli);
}

fn aristotle(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_domain(Domain::Philosophy), 500, 0, "Philosophy")
}

fn plato(ctx: &mut EffectContext<'_>) -> EffectResult {
    reveal_graveyard_instant(ctx)
}

fn socrates(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.damage_opponent(2000);
    EffectResult::success("Socrates questioned the opponent for 2000 damage!")
}

fn kant(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 1)
}

fn descartes(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.grant_source(CardCondition::ImmuneToEffects, Expiry::Permanent);
    EffectResult::success("René Descartes thinks, therefore is unaffected by opponent effects.")
}

fn confucius(ctx: &mut EffectContext<'_>) -> EffectResult {
    let schools: FxHashSet<_> = ctx.me().creatures().filter_map(|card| card.school()).collect();
    ctx.heal(1000);
    let drawn = ctx.draw(schools.len());
    EffectResult::success(format!(
        "Confucius healed 1000 LP and drew {} card(s) for {} school(s)!",
        drawn,
        schools.len()
    ))
}

fn marx(ctx: &mut EffectContext<'_>) -> EffectResult {
    destroy_all(
        ctx,
        TargetSpec::opponent_creatures().with_filter(TargetFilter::BaseAttackAbove(2500)),
    )
}

fn locke(ctx: &mut EffectContext<'_>) -> EffectResult {
    match ctx.pick(TargetSpec::opponent_creatures()) {
        Some(card) => {
            ctx.apply(Effect::ResetStats { card });
            EffectResult::success(format!("John Locke reset {} to a blank slate!", ctx.card_name(card)))
        }
        None => EffectResult::success("John Locke: no creature to reset."),
    }
}

fn hume(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 1)
}

fn rousseau(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.rival().creature_count() <= ctx.me().creature_count() {
        return EffectResult::success("Jean-Jacques Rousseau: the opponent does not outnumber you.");
    }
    let targets = ctx.select(TargetSpec::opponent_creatures().up_to(2));
    let destroyed = ctx.destroy_each(&targets);
    EffectResult::success(format!("Jean-Jacques Rousseau destroyed {} creature(s)!", destroyed))
}

fn voltaire(ctx: &mut EffectContext<'_>) -> EffectResult {
    let Some(target) = ctx.pick(TargetSpec::opponent_creatures()) else {
        return EffectResult::success("Voltaire: no creature to mock.");
    };
    let attack = ctx.card(target).map_or(0, |card| card.current_attack);
    ctx.adjust(target, -delta(attack - attack / 2), 0);
    EffectResult::success(format!(
        "Voltaire halved {}'s ATK to {}!",
        ctx.card_name(target),
        attack / 2
    ))
}

fn nietzsche(ctx: &mut EffectContext<'_>) -> EffectResult {
    let fallen = ctx.me().graveyard().len();
    let Some((base, defense)) = ctx
        .source_card()
        .map(|card| (card.base_attack(), card.current_defense))
    else {
        return EffectResult::failure("Friedrich Nietzsche is not in play");
    };
    let attack = base + times(fallen, 500).min(2000);
    ctx.apply(Effect::set_stats(ctx.source, attack, defense));
    EffectResult::success(format!("Friedrich Nietzsche rises to {} ATK!", attack))
}

fn mill(ctx: &mut EffectContext<'_>) -> EffectResult {
    let mine = ctx.me().life();
    let theirs = ctx.rival().life();
    if mine >= theirs {
        return EffectResult::success("John Stuart Mill: you are not behind on life.");
    }
    let amount = (theirs - mine).min(3000);
    ctx.heal(amount);
    EffectResult::success(format!("John Stuart Mill healed {} LP for the greater good!", amount))
}

fn spinoza(ctx: &mut EffectContext<'_>) -> EffectResult {
    let domains: FxHashSet<_> = ctx.me().creatures().filter_map(|card| card.domain()).collect();
    let bonus = delta(times(domains.len(), 200));
    let count = ctx.adjust_each(TargetSpec::own_creatures(), bonus, bonus);
    EffectResult::success(format!(
        "Baruch Spinoza: {} creature(s) gain {} ATK and DEF from {} domain(s)!",
        count,
        bonus,
        domains.len()
    ))
}

fn machiavelli(ctx: &mut EffectContext<'_>) -> EffectResult {
    let Some(target) = ctx.pick(TargetSpec::opponent_creatures().lowest_attack()) else {
        return EffectResult::success("Machiavelli: no creature to seize.");
    };
    let attack = ctx.card(target).map_or(0, |card| card.current_attack);
    if attack >= 1500 {
        return EffectResult::success(format!(
            "Machiavelli: {} is too strong to seize.",
            ctx.card_name(target)
        ));
    }
    ctx.apply(Effect::TakeControl {
        card: target,
        player: ctx.owner,
    });
    EffectResult::success(format!("Machiavelli took control of {}!", ctx.card_name(target)))
}
