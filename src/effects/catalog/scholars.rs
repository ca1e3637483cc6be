//! Scholar-tier creatures of every domain.

use crate::cards::{CardCondition, Category, Domain, Expiry, School, Tier};
use crate::effects::context::EffectContext;
use crate::effects::outcome::EffectResult;
use crate::effects::registry::EffectRegistry;
use crate::effects::targeting::{TargetFilter, TargetSpec};
use crate::effects::Effect;
use crate::zones::Zone;

use super::{
    burn, deck_creatures, delta, draw, empower_self, fetch, heal, own_domain, own_other_creature, own_school,
    rally, reveal_opponent_hand, revive_first, summon_all, times,
};

pub(super) fn register(registry: &mut EffectRegistry) {
    // Science
    registry.register("Werner Heisenberg", heisenberg);
    registry.register("Erwin Schrödinger", schrodinger);
    registry.register("Alexander Fleming", fleming);
    registry.register("James Watt", watt);
    registry.register("Carl Sagan", sagan);
    registry.register("Rachel Carson", carson);
    registry.register("Rosalind Franklin", reveal_opponent_hand);
    registry.register("Linus Pauling", pauling);
    registry.register("Richard Feynman", feynman);
    registry.register("Ada Lovelace", lovelace);
    registry.register("Carl Jung", jung);

    // Philosophy
    registry.register("Bertrand Russell", russell);
    registry.register("Ludwig Wittgenstein", wittgenstein);
    registry.register("Søren Kierkegaard", kierkegaard);
    registry.register("Martin Heidegger", heidegger);
    registry.register("Jean-Paul Sartre", sartre);
    registry.register("Simone de Beauvoir", beauvoir);
    registry.register("John Dewey", draw_one);
    registry.register("Georg Hegel", hegel);
    registry.register("Arthur Schopenhauer", schopenhauer);
    registry.register("Francis Bacon", bacon);

    // Spirituality
    registry.register("Guru Nanak", nanak);
    registry.register("Zoroaster", zoroaster);
    registry.register("Maimonides", maimonides);
    registry.register("John Calvin", calvin);
    registry.register("Origen", origen);
    registry.register("Meister Eckhart", eckhart);

    // Humanities
    registry.register("Homer", draw_two);
    registry.register("Dante Alighieri", dante);
    registry.register("Miguel de Cervantes", cervantes);
    registry.register("Leo Tolstoy", draw_two);
    registry.register("Fyodor Dostoevsky", dostoevsky);
    registry.register("Victor Hugo", hugo);
    registry.register("Charles Dickens", dickens);
    registry.register("Mark Twain", twain);
    registry.register("Jane Austen", austen);
    registry.register("George Orwell", reveal_opponent_hand);
    registry.register("Émile Durkheim", durkheim);
    registry.register("Max Weber", weber);
    registry.register("Ibn Khaldun", ibn_khaldun);
}

fn draw_one(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 1)
}

fn draw_two(ctx: &mut EffectContext<'_>) -> EffectResult {
    draw(ctx, 2)
}

// === Science ===

fn heisenberg(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.grant_source(CardCondition::CannotBeTargeted, Expiry::Permanent);
    EffectResult::success("Werner Heisenberg's position is uncertain: it cannot be targeted.")
}

fn schrodinger(_ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success("Erwin Schrödinger is simultaneously alive and destroyed!")
}

fn fleming(ctx: &mut EffectContext<'_>) -> EffectResult {
    heal(ctx, 1500)
}

fn watt(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_school(School::Materialism), 300, 0, "Materialism")
}

fn sagan(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.draw(1) == 0 {
        return EffectResult::success("Carl Sagan: the deck is empty.");
    }
    let stargazer = ctx
        .me()
        .hand()
        .last()
        .is_some_and(|card| card.is_creature() && card.domain() == Some(Domain::Science));
    if stargazer {
        let extra = ctx.draw(1);
        return EffectResult::success(format!(
            "Carl Sagan drew a Science creature and {} more card(s)!",
            extra
        ));
    }
    EffectResult::success("Carl Sagan drew 1 card.")
}

fn carson(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_school(School::Empiricism), 0, 400, "Empiricism")
}

fn pauling(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.adjust_source(500, 0);
    match ctx.pick(own_other_creature()) {
        Some(partner) => {
            ctx.adjust(partner, 500, 0);
            EffectResult::success(format!(
                "Linus Pauling bonded with {}: both gain 500 ATK!",
                ctx.card_name(partner)
            ))
        }
        None => EffectResult::success("Linus Pauling gains 500 ATK."),
    }
}

fn feynman(ctx: &mut EffectContext<'_>) -> EffectResult {
    burn(ctx, 800)
}

fn lovelace(ctx: &mut EffectContext<'_>) -> EffectResult {
    fetch(ctx, deck_creatures().with_filter(TargetFilter::OfSchool(School::Rationalism)))
}

fn jung(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_school(School::Mysticism), 400, 0, "Mysticism")
}

// === Philosophy ===

fn russell(_ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success("Bertrand Russell found a paradox: the effect is negated!").negating_effect()
}

fn wittgenstein(ctx: &mut EffectContext<'_>) -> EffectResult {
    match ctx.pick(TargetSpec::opponent_creatures()) {
        Some(card) => {
            ctx.apply(Effect::SetSchool {
                card,
                school: School::Rationalism,
            });
            EffectResult::success(format!(
                "Ludwig Wittgenstein redefined {} as Rationalism!",
                ctx.card_name(card)
            ))
        }
        None => EffectResult::success("Ludwig Wittgenstein: whereof one cannot speak, thereof one must be silent."),
    }
}

fn kierkegaard(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.coin_flip() {
        let now = ctx.adjust_source(2000, 0);
        EffectResult::success(format!("Søren Kierkegaard leapt to faith: {} ATK!", now))
    } else {
        let now = ctx.adjust_source(-1000, 0);
        EffectResult::success(format!("Søren Kierkegaard fell into despair: {} ATK.", now))
    }
}

fn heidegger(ctx: &mut EffectContext<'_>) -> EffectResult {
    let Some(other) = ctx.pick(own_other_creature()) else {
        return EffectResult::success("Martin Heidegger: no other being to send away.");
    };
    ctx.apply(Effect::move_to(other, Zone::Graveyard));
    let drawn = ctx.draw(1);
    EffectResult::success(format!(
        "Martin Heidegger sent {} to the graveyard and drew {} card(s).",
        ctx.card_name(other),
        drawn
    ))
}

fn sartre(ctx: &mut EffectContext<'_>) -> EffectResult {
    let attack = ctx.source_card().map_or(0, |card| card.current_attack);
    let now = ctx.adjust_source(delta(attack), 0);
    EffectResult::success(format!("Jean-Paul Sartre doubled its ATK to {}!", now))
}

fn beauvoir(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_domain(Domain::Humanities), 500, 500, "Humanities")
}

fn hegel(ctx: &mut EffectContext<'_>) -> EffectResult {
    let Some(thesis) = ctx.pick(own_other_creature()) else {
        return EffectResult::success("Georg Hegel: no antithesis to synthesize.");
    };
    let attack = ctx.card(thesis).map_or(0, |card| card.current_attack);
    let now = ctx.adjust_source(delta(attack), 0);
    EffectResult::success(format!(
        "Georg Hegel synthesized {}: now {} ATK!",
        ctx.card_name(thesis),
        now
    ))
}

fn schopenhauer(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, TargetSpec::own_creatures(), -300, 300, "allied")
}

fn bacon(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.me().deck().len() < 3 {
        return EffectResult::success("Francis Bacon: too few cards left to experiment.");
    }
    draw(ctx, 1)
}

// === Spirituality ===

fn nanak(ctx: &mut EffectContext<'_>) -> EffectResult {
    rally(ctx, own_domain(Domain::Spirituality), 0, 300, "Spirituality")
}

fn zoroaster(ctx: &mut EffectContext<'_>) -> EffectResult {
    heal(ctx, 1000)
}

fn maimonides(ctx: &mut EffectContext<'_>) -> EffectResult {
    let me = ctx.me();
    if me.school_count(School::Mysticism) == 0 || me.school_count(School::Rationalism) == 0 {
        return EffectResult::success("Maimonides: faith and reason must both be present.");
    }
    draw(ctx, 2)
}

fn calvin(ctx: &mut EffectContext<'_>) -> EffectResult {
    if ctx.coin_flip() {
        ctx.heal(1000);
        EffectResult::success("John Calvin: heads, healed 1000 LP.")
    } else {
        EffectResult::success("John Calvin: tails, nothing happens.")
    }
}

fn origen(ctx: &mut EffectContext<'_>) -> EffectResult {
    heal(ctx, 1200)
}

fn eckhart(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.grant_source(CardCondition::DamageOnDestroy(1000), Expiry::Permanent);
    EffectResult::success("Meister Eckhart: your opponent takes 1000 damage when this card is destroyed.")
}

// === Humanities ===

fn dante(ctx: &mut EffectContext<'_>) -> EffectResult {
    revive_first(ctx, 1200, 1200)
}

fn cervantes(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.grant_source(CardCondition::DirectAttackHalf, Expiry::Permanent);
    EffectResult::success("Miguel de Cervantes can tilt directly at your opponent for half damage.")
}

fn dostoevsky(ctx: &mut EffectContext<'_>) -> EffectResult {
    ctx.damage_opponent(1000);
    ctx.damage_owner(500);
    EffectResult::success("Fyodor Dostoevsky: 1000 damage to your opponent, 500 to yourself.")
}

fn hugo(ctx: &mut EffectContext<'_>) -> EffectResult {
    summon_all(ctx, deck_creatures().with_filter(TargetFilter::OfTier(Tier::Scholar)).first())
}

fn dickens(ctx: &mut EffectContext<'_>) -> EffectResult {
    let hand = ctx.me().hand().len();
    empower_self(ctx, delta(times(hand, 300)), 0)
}

fn twain(ctx: &mut EffectContext<'_>) -> EffectResult {
    let drawn = ctx.draw(1);
    let now = ctx.adjust_source(500, 0);
    EffectResult::success(format!("Mark Twain drew {} card(s) and rose to {} ATK!", drawn, now))
}

fn austen(ctx: &mut EffectContext<'_>) -> EffectResult {
    let Some(target) = ctx.pick(TargetSpec::opponent_creatures()) else {
        return EffectResult::success("Jane Austen: no creature to restrain.");
    };
    let expiry = ctx.until_next_turn();
    ctx.grant(target, CardCondition::CannotAttack, expiry);
    EffectResult::success(format!(
        "Jane Austen: {} cannot attack until your next turn.",
        ctx.card_name(target)
    ))
}

fn durkheim(ctx: &mut EffectContext<'_>) -> EffectResult {
    let crowd = ctx.rival().creature_count();
    empower_self(ctx, delta(times(crowd, 200)), 0)
}

fn weber(ctx: &mut EffectContext<'_>) -> EffectResult {
    let workers = ctx.me().school_count(School::Materialism);
    let drawn = ctx.draw(workers);
    EffectResult::success(format!(
        "Max Weber drew {} card(s) from {} Materialism creature(s)!",
        drawn, workers
    ))
}

fn ibn_khaldun(ctx: &mut EffectContext<'_>) -> EffectResult {
    fetch(
        ctx,
        TargetSpec::own(Zone::Graveyard).with_filter(TargetFilter::OfCategory(Category::Reactive)),
    )
}
