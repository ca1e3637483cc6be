//! Built-in card procedures.
//!
//! One function per card, grouped by where the card sits in the pool:
//! legendary and master creatures by domain, scholars together, then
//! instants (discoveries) and reactives (paradoxes). The helpers below cover
//! the shapes most procedures share.

mod discoveries;
mod humanities;
mod paradoxes;
mod philosophy;
mod scholars;
mod science;
mod spirituality;

use crate::cards::{Category, Domain, School};
use crate::zones::Zone;

use super::context::EffectContext;
use super::outcome::EffectResult;
use super::registry::EffectRegistry;
use super::targeting::{TargetFilter, TargetSpec};
use super::Effect;

/// Register every built-in procedure.
pub(super) fn register_all(registry: &mut EffectRegistry) {
    science::register(registry);
    philosophy::register(registry);
    spirituality::register(registry);
    humanities::register(registry);
    scholars::register(registry);
    discoveries::register(registry);
    paradoxes::register(registry);
}

// === Specs ===

fn own_domain(domain: Domain) -> TargetSpec {
    TargetSpec::own_creatures().with_filter(TargetFilter::OfDomain(domain))
}

fn own_school(school: School) -> TargetSpec {
    TargetSpec::own_creatures().with_filter(TargetFilter::OfSchool(school))
}

fn own_other_creature() -> TargetSpec {
    TargetSpec::own_creatures().others().first()
}

fn deck_creatures() -> TargetSpec {
    TargetSpec::own(Zone::Deck).with_filter(TargetFilter::Creature)
}

fn graveyard_creatures() -> TargetSpec {
    TargetSpec::own(Zone::Graveyard).with_filter(TargetFilter::Creature)
}

// === Arithmetic ===

fn delta(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn times(count: usize, each: u32) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(each)
}

fn stat_text(attack: i32, defense: i32) -> String {
    match (attack, defense) {
        (a, 0) => format!("{:+} ATK", a),
        (0, d) => format!("{:+} DEF", d),
        (a, d) => format!("{:+} ATK / {:+} DEF", a, d),
    }
}

// === Shared shapes ===

fn heal(ctx: &mut EffectContext<'_>, amount: u32) -> EffectResult {
    ctx.heal(amount);
    EffectResult::success(format!("{}: healed {} LP!", ctx.name(), amount))
}

fn burn(ctx: &mut EffectContext<'_>, amount: u32) -> EffectResult {
    ctx.damage_opponent(amount);
    EffectResult::success(format!("{}: {} damage!", ctx.name(), amount))
}

fn draw(ctx: &mut EffectContext<'_>, count: usize) -> EffectResult {
    let drawn = ctx.draw(count);
    EffectResult::success(format!("{}: drew {} card(s)!", ctx.name(), drawn))
}

/// Adjust a group and report how many were affected.
fn rally(ctx: &mut EffectContext<'_>, spec: TargetSpec, attack: i32, defense: i32, group: &str) -> EffectResult {
    let count = ctx.adjust_each(spec, attack, defense);
    EffectResult::success(format!(
        "{}: {} {} creature(s) {}!",
        ctx.name(),
        count,
        group,
        stat_text(attack, defense)
    ))
}

fn empower_self(ctx: &mut EffectContext<'_>, attack: i32, defense: i32) -> EffectResult {
    let now = ctx.adjust_source(attack, defense);
    EffectResult::success(format!("{}: {}, now {} ATK!", ctx.name(), stat_text(attack, defense), now))
}

/// Destroy the first opponent card a spec picks.
fn destroy_first(ctx: &mut EffectContext<'_>, spec: TargetSpec) -> Option<String> {
    let target = ctx.pick(spec)?;
    let name = ctx.card_name(target);
    ctx.destroy(target).then_some(name)
}

fn destroy_one(ctx: &mut EffectContext<'_>, spec: TargetSpec) -> EffectResult {
    match destroy_first(ctx, spec) {
        Some(name) => EffectResult::success(format!("{} destroyed {}!", ctx.name(), name)),
        None => EffectResult::success(format!("{}: nothing to destroy.", ctx.name())),
    }
}

fn destroy_all(ctx: &mut EffectContext<'_>, spec: TargetSpec) -> EffectResult {
    let targets = ctx.select(spec);
    let destroyed = ctx.destroy_each(&targets);
    EffectResult::success(format!("{}: destroyed {} card(s)!", ctx.name(), destroyed))
}

fn reveal_opponent_hand(ctx: &mut EffectContext<'_>) -> EffectResult {
    EffectResult::success(format!(
        "{}: opponent holds {} card(s) in hand.",
        ctx.name(),
        ctx.rival().hand().len()
    ))
}

fn reveal_graveyard_instant(ctx: &mut EffectContext<'_>) -> EffectResult {
    let spec = TargetSpec::own(Zone::Graveyard).with_filter(TargetFilter::OfCategory(Category::Instant));
    match ctx.pick(spec) {
        Some(id) => EffectResult::success(format!("{} recalls {} from the graveyard!", ctx.name(), ctx.card_name(id))),
        None => EffectResult::success(format!("{}: no instant in the graveyard.", ctx.name())),
    }
}

/// Move the first card a spec picks into hand.
fn fetch(ctx: &mut EffectContext<'_>, spec: TargetSpec) -> EffectResult {
    match ctx.pick(spec) {
        Some(id) => {
            ctx.apply(Effect::move_to(id, Zone::Hand));
            EffectResult::success(format!("{}: added {} to hand!", ctx.name(), ctx.card_name(id)))
        }
        None => EffectResult::success(format!("{}: nothing to add to hand.", ctx.name())),
    }
}

/// Special-summon every card a spec selects.
fn summon_all(ctx: &mut EffectContext<'_>, spec: TargetSpec) -> EffectResult {
    let targets = ctx.select(spec);
    let summoned = targets.iter().filter(|&&id| ctx.summon(id)).count();
    EffectResult::success(format!("{}: summoned {} creature(s)!", ctx.name(), summoned))
}

/// Revive the first graveyard creature with fixed stats.
fn revive_first(ctx: &mut EffectContext<'_>, attack: u32, defense: u32) -> EffectResult {
    match ctx.pick(graveyard_creatures()) {
        Some(id) => {
            ctx.apply(Effect::revive(id, attack, defense));
            EffectResult::success(format!(
                "{} revived {} as {}/{}!",
                ctx.name(),
                ctx.card_name(id),
                attack,
                defense
            ))
        }
        None => EffectResult::success(format!("{}: no creature in the graveyard.", ctx.name())),
    }
}
