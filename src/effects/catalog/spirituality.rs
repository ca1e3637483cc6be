//! Spirituality legends and masters.

use crate::cards::{CardCondition, Category, Domain, Expiry, School};
use crate::effects::context::EffectContext;
use crate::effects::outcome::EffectResult;
use crate::effects::registry::EffectRegistry;
use crate::effects::targeting::{TargetFilter, TargetSpec};
use crate::effects::Effect;
use crate::zones::Zone;

use super::{deck_creatures, destroy_all, destroy_first, graveyard_creatures, own_domain, own_other_creature, own_school};

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register("Jesus Christ", jesus);
    registry.register("Muhammad", muhammad);
    registry.register("Buddha", buddha);
    registry.register("Moses", moses);
    registry.register("Mahatma Gandhi", gandhi);
    registry.register("Thomas Aquinas", aquinas);
    registry.register("Augustine", augustine);
    registry.register("Laozi", laozi);
    registry.register("Martin Luther", luther);
    registry.register("Rumi", rumi);
    registry.register("Francis of Assisi", francis);
}

fn jesus(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.heal(3000);
    let fallen = ctx.select(graveyard_creatures());
    for &card in &fallen {
        ctx.apply(Effect::revive(card, 1000, 1000));
    }
    EffectResult::success(format!(
        "Jesus Christ healed 3000 LP and revived {} creature(s)!",
        fallen.len()
    ))
}

fn muhammad(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.heal(5000);
    let count = ctx.adjust_each(own_domain(Domain::Spirituality), 0, 1000);
    EffectResult::success(format!(
        "Muhammad healed 5000 LP and {} Spirituality creature(s) gain 1000 DEF!",
        count
    ))
}

fn buddha(_ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success("Buddha's wisdom will enlighten your Spirituality creatures from the graveyard.")
}

fn moses(ctx: &mut EffectContext<'_>) -> EffectResult {
    destroy_all(
        ctx,
        TargetSpec::opponent(Zone::Battlefield).with_filter(TargetFilter::OfCategory(Category::Reactive)),
    )
}

/// Heal and hide the source until the owner's next turn.
fn sanctuary_self(ctx: &mut EffectContext<'_>, amount: u32) -> EffectResult {
    ctx.heal(amount);
    let expiry = ctx.until_next_turn();
    ctx.grant_source(CardCondition::CannotBeAttacked, expiry);
    EffectResult::success(format!(
        "{} healed {} LP and cannot be attacked until your next turn!",
        ctx.name(),
        amount
    ))
}

fn gandhi(ctx: &mut EffectContext<'_>) -> EffectResult {
    sanctuary_self(ctx, 1000)
}

fn francis(ctx: &mut EffectContext<'_>) -> EffectResult {
    sanctuary_self(ctx, 500)
}

fn aquinas(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.heal(1500);
    match ctx.pick(own_school(School::Mysticism)) {
        Some(card) => {
            ctx.adjust(card, 800, 0);
            EffectResult::success(format!(
                "Thomas Aquinas healed 1500 LP and {} gains 800 ATK!",
                ctx.card_name(card)
            ))
        }
        None => EffectResult::success("Thomas Aquinas healed 1500 LP."),
    }
}

fn augustine(ctx: &mut EffectContext<'_>) -> EffectResult {
    let faithful = ctx.select(own_domain(Domain::Spirituality));
    for &card in &faithful {
        ctx.grant(card, CardCondition::DestructionImmune, Expiry::Permanent);
    }
    EffectResult::success(format!(
        "Augustine: {} Spirituality creature(s) cannot be destroyed by effects!",
        faithful.len()
    ))
}

fn laozi(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.heal(2000);
    match ctx.pick(own_other_creature()) {
        Some(card) => {
            ctx.apply(Effect::move_to(card, Zone::Hand));
            EffectResult::success(format!(
                "Laozi healed 2000 LP and returned {} to your hand.",
                ctx.card_name(card)
            ))
        }
        None => EffectResult::success("Laozi healed 2000 LP."),
    }
}

fn luther(ctx: &mut EffectContext<'_>) -> EffectResult {
    let reformed = destroy_first(
        ctx,
        TargetSpec::opponent(Zone::Battlefield).with_filter(TargetFilter::NonCreature),
    );
    let recruit = ctx.pick(deck_creatures().with_filter(TargetFilter::OfDomain(Domain::Spirituality)));
    let summoned = recruit.filter(|&card| ctx.summon(card));

    let mut parts = Vec::new();
    if let Some(name) = reformed {
        parts.push(format!("destroyed {}", name));
    }
    if let Some(card) = summoned {
        parts.push(format!("summoned {}", ctx.card_name(card)));
    }
    if parts.is_empty() {
        return EffectResult::success("Martin Luther: nothing to reform.");
    }
    EffectResult::success(format!("Martin Luther {}!", parts.join(" and ")))
}

fn rumi(ctx: &mut EffectContext<'_>) -> EffectResult {
    let dancers = ctx.select(TargetSpec::both(Zone::Battlefield).with_filter(TargetFilter::Creature).others());
    for &card in &dancers {
        ctx.apply(Effect::move_to(card, Zone::Hand));
    }
    EffectResult::success(format!(
        "Rumi whirled {} creature(s) back to their owners' hands!",
        dancers.len()
    ))
}
