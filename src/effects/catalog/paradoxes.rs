//! Reactives.
//!
//! Resolved either by their controller in the main phase or by the
//! defending player in response to an attack. In the second case the
//! context owner is the defender and the opponent is the attacker.

use crate::cards::{CardCondition, Domain, Expiry, PlayerCondition, Tier};
use crate::effects::context::EffectContext;
use crate::effects::outcome::EffectResult;
use crate::effects::registry::EffectRegistry;
use crate::effects::targeting::{TargetFilter, TargetSpec};

use super::{delta, destroy_all, destroy_one, own_domain};

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register("Schrödinger's Cat", schrodingers_cat);
    registry.register("Infinite Regression", infinite_regression);
    registry.register("Existential Crisis", existential_crisis);
    registry.register("Butterfly Effect", butterfly_effect);
    registry.register("Heisenberg's Uncertainty", uncertainty);
    registry.register("Occam's Razor", occams_razor);
    registry.register("Eternal Return", eternal_return);
    registry.register("Prisoner's Dilemma", prisoners_dilemma);
    registry.register("Time Dilation", time_dilation);
    registry.register("Cognitive Dissonance", cognitive_dissonance);
}

fn schrodingers_cat(_ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success("Schrödinger's Cat: the attack both happened and didn't. Negated!").negating_attack()
}

fn infinite_regression(_ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success("Infinite Regression: the attack and its effects are negated!")
        .negating_attack()
        .negating_effect()
}

fn existential_crisis(ctx: &mut EffectContext<'_>) -> EffectResult {
    let legends = ctx.select(TargetSpec::opponent_creatures().with_filter(TargetFilter::OfTier(Tier::Legendary)));
    for &card in &legends {
        let attack = ctx.card(card).map_or(0, |c| c.current_attack);
        ctx.adjust(card, -delta(attack), 0);
    }
    EffectResult::success(format!(
        "Existential Crisis: {} Legendary creature(s) lost all ATK!",
        legends.len()
    ))
}

fn butterfly_effect(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.me().life() >= 5000 {
        return EffectResult::success("Butterfly Effect: the wings did not stir.");
    }
    destroy_all(
        ctx,
        TargetSpec::opponent_creatures().with_filter(TargetFilter::BaseAttackBelow(1500)),
    )
}

fn uncertainty(_ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success("Heisenberg's Uncertainty: the attack is redirected!").redirecting()
}

fn occams_razor(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.rival().creature_count() < 3 {
        return EffectResult::success("Occam's Razor: the board is already simple enough.");
    }
    destroy_one(ctx, TargetSpec::opponent_creatures().lowest_attack())
}

fn eternal_return(ctx: &mut EffectContext<'_>) -> EffectResult {
    let faithful = ctx.select(own_domain(Domain::Spirituality));
    for &card in &faithful {
        ctx.grant(card, CardCondition::ReturnToHandOnDestroy, Expiry::Permanent);
    }
    EffectResult::success(format!(
        "Eternal Return: {} Spirituality creature(s) will return to hand when destroyed.",
        faithful.len()
    ))
}

fn prisoners_dilemma(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.mark(ctx.opponent, PlayerCondition::DiscardOnDraw, Expiry::Permanent);
    EffectResult::success("Prisoner's Dilemma: your opponent discards after each draw.")
}

fn time_dilation(_ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success("Time Dilation: your opponent skips their next turn!").skipping_turn()
}

fn cognitive_dissonance(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.coin_flip() {
        EffectResult::success("Cognitive Dissonance: heads, nothing changes.")
    } else {
        EffectResult::success("Cognitive Dissonance: tails, the effect is reversed!").reversing()
    }
}
