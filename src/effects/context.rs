//! Resolution context handed to card procedures.
//!
//! `EffectContext` binds the match, the resolving card and its two players.
//! Its helpers route every mutation through `EffectResolver`, so procedures
//! read as a list of primitives plus the message they report.

use crate::cards::{Card, CardCondition, Expiry, PlayerCondition};
use crate::core::{EntityId, MatchState, Player, PlayerId};

use super::resolver::{EffectResolver, ResolveResult};
use super::targeting::{Pick, TargetSelector, TargetSpec};
use super::Effect;

/// Everything a card procedure may touch.
pub struct EffectContext<'a> {
    pub state: &'a mut MatchState,
    /// Card whose effect is resolving.
    pub source: EntityId,
    /// Player resolving the effect.
    pub owner: PlayerId,
    pub opponent: PlayerId,
    name: String,
}

impl<'a> EffectContext<'a> {
    pub fn new(state: &'a mut MatchState, source: EntityId, owner: PlayerId) -> Self {
        let name = state
            .card(source)
            .map(|card| card.name().to_string())
            .unwrap_or_default();
        Self {
            state,
            source,
            owner,
            opponent: owner.opponent(),
            name,
        }
    }

    // === Queries ===

    /// Name of the resolving card.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    /// Expiry lasting through the opponent's coming turn.
    #[must_use]
    pub fn until_next_turn(&self) -> Expiry {
        Expiry::ThroughTurn(self.state.turn + 1)
    }

    #[must_use]
    pub fn source_card(&self) -> Option<&Card> {
        self.state.card(self.source)
    }

    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&Card> {
        self.state.card(id)
    }

    /// Name of a card, or an empty string if it is unknown.
    #[must_use]
    pub fn card_name(&self, id: EntityId) -> String {
        self.state
            .card(id)
            .map(|card| card.name().to_string())
            .unwrap_or_default()
    }

    /// The resolving player.
    #[must_use]
    pub fn me(&self) -> &Player {
        self.state.player(self.owner)
    }

    /// The resolving player's opponent.
    #[must_use]
    pub fn rival(&self) -> &Player {
        self.state.player(self.opponent)
    }

    // === Targeting ===

    /// Every card matching a spec, after its pick.
    #[must_use]
    pub fn select(&self, spec: TargetSpec) -> Vec<EntityId> {
        TargetSelector::new(spec, self.owner)
            .with_source(self.source)
            .select(self.state)
    }

    /// A single card matching a spec. `All` specs take the first match.
    #[must_use]
    pub fn pick(&self, spec: TargetSpec) -> Option<EntityId> {
        let spec = if spec.pick == Pick::All { spec.first() } else { spec };
        self.select(spec).into_iter().next()
    }

    // === Mutation ===

    /// Apply one primitive.
    pub fn apply(&mut self, effect: Effect) -> ResolveResult {
        EffectResolver::apply(self.state, &effect)
    }

    pub fn damage_opponent(&mut self, amount: u32) {
        self.apply(Effect::damage(self.opponent, amount));
    }

    pub fn damage_owner(&mut self, amount: u32) {
        self.apply(Effect::damage(self.owner, amount));
    }

    pub fn heal(&mut self, amount: u32) {
        self.apply(Effect::heal(self.owner, amount));
    }

    /// Draw for the resolving player. Returns the number of cards drawn.
    pub fn draw(&mut self, count: usize) -> usize {
        self.draw_for(self.owner, count)
    }

    /// Draw for any player. Returns the number of cards drawn.
    pub fn draw_for(&mut self, player: PlayerId, count: usize) -> usize {
        let drawn = count.min(self.state.player(player).deck().len());
        self.apply(Effect::draw(player, count));
        drawn
    }

    /// Destroy a card. Returns whether it left the battlefield.
    pub fn destroy(&mut self, card: EntityId) -> bool {
        self.apply(Effect::destroy(card)).is_success()
    }

    /// Destroy several cards. Returns how many left the battlefield.
    pub fn destroy_each(&mut self, cards: &[EntityId]) -> usize {
        cards.iter().filter(|&&card| self.destroy(card)).count()
    }

    pub fn adjust(&mut self, card: EntityId, attack: i32, defense: i32) {
        self.apply(Effect::adjust(card, attack, defense));
    }

    /// Adjust every card a spec selects. Returns how many were adjusted.
    pub fn adjust_each(&mut self, spec: TargetSpec, attack: i32, defense: i32) -> usize {
        let targets = self.select(spec);
        for &card in &targets {
            self.adjust(card, attack, defense);
        }
        targets.len()
    }

    /// Adjust the resolving card. Returns its new current attack.
    pub fn adjust_source(&mut self, attack: i32, defense: i32) -> u32 {
        self.adjust(self.source, attack, defense);
        self.source_card().map_or(0, |card| card.current_attack)
    }

    pub fn grant(&mut self, card: EntityId, condition: CardCondition, expiry: Expiry) {
        self.apply(Effect::grant(card, condition, expiry));
    }

    pub fn grant_source(&mut self, condition: CardCondition, expiry: Expiry) {
        self.grant(self.source, condition, expiry);
    }

    pub fn mark(&mut self, player: PlayerId, condition: PlayerCondition, expiry: Expiry) {
        self.apply(Effect::mark(player, condition, expiry));
    }

    /// Special-summon a creature. Returns whether it reached the battlefield.
    pub fn summon(&mut self, card: EntityId) -> bool {
        self.apply(Effect::summon(card)).is_success()
    }

    /// Fair coin flip from the match RNG. `true` is heads.
    pub fn coin_flip(&mut self) -> bool {
        self.state.rng.coin_flip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, Domain, School, Tier};
    use crate::core::RulesConfig;
    use crate::effects::TargetFilter;
    use crate::zones::Zone;

    fn creature(name: &str, domain: Domain) -> CardDefinition {
        CardDefinition::creature(CardId::new(1), name)
            .with_classification(domain, School::Rationalism, Tier::Scholar)
            .with_stats(1000, 1000)
    }

    #[test]
    fn test_context_players() {
        let mut state = MatchState::new(RulesConfig::default(), 1);
        let source = state.add_card(PlayerId::TWO, &creature("Euclid", Domain::Science), Zone::Battlefield);
        let ctx = EffectContext::new(&mut state, source, PlayerId::TWO);
        assert_eq!(ctx.name(), "Euclid");
        assert_eq!(ctx.opponent, PlayerId::ONE);
        assert_eq!(ctx.until_next_turn(), Expiry::ThroughTurn(2));
    }

    #[test]
    fn test_adjust_each_counts_targets() {
        let mut state = MatchState::new(RulesConfig::default(), 1);
        let source = state.add_card(PlayerId::ONE, &creature("A", Domain::Science), Zone::Battlefield);
        state.add_card(PlayerId::ONE, &creature("B", Domain::Science), Zone::Battlefield);
        let other = state.add_card(PlayerId::ONE, &creature("C", Domain::Humanities), Zone::Battlefield);

        let mut ctx = EffectContext::new(&mut state, source, PlayerId::ONE);
        let spec = TargetSpec::own_creatures().with_filter(TargetFilter::OfDomain(Domain::Science));
        assert_eq!(ctx.adjust_each(spec, 400, 0), 2);
        assert_eq!(ctx.card(source).unwrap().current_attack, 1400);
        assert_eq!(ctx.card(other).unwrap().current_attack, 1000);
    }

    #[test]
    fn test_draw_reports_cards_drawn() {
        let mut state = MatchState::new(RulesConfig::default(), 1);
        let source = state.add_card(PlayerId::ONE, &creature("A", Domain::Science), Zone::Battlefield);
        state.add_card(PlayerId::ONE, &creature("B", Domain::Science), Zone::Deck);

        let mut ctx = EffectContext::new(&mut state, source, PlayerId::ONE);
        assert_eq!(ctx.draw(3), 1);
        assert_eq!(ctx.draw(1), 0);
        assert_eq!(ctx.me().hand().len(), 1);
    }
}
