//! The turn controller.
//!
//! `Duel` owns a `MatchState` and is the only place where player actions
//! change it. Every public operation validates completely before it mutates,
//! so an `Err` always leaves the match as it was.
//!
//! ## Operation shape
//!
//! 1. Refuse if the match is over.
//! 2. Check phase and legality (read-only).
//! 3. Mutate, record the action and emit cues.
//! 4. Refresh graveyard auras and re-check victory.
//!
//! Effect signals are interpreted here, never in the resolver: a signal from
//! the active player's own activation and one from a defender's response
//! mean different things.

use smallvec::SmallVec;

use super::battle::{
    check_attacker, check_reactive, check_target, legal_attack_targets, response_candidates, AttackRight, Strike,
};
use super::events::{Cue, EventSink, NullSink};
use super::summon::{check_summon, pay, payment_options, Charge};
use crate::cards::{CardCondition, CardDefinition, Category, EffectTrigger, Expiry, PlayerCondition, Stance};
use crate::combat::{resolve_battle, resolve_direct_attack, BattleResult};
use crate::core::{
    Action, AttackTarget, EntityId, MatchState, Phase, PlayerId, RuleResult, RuleViolation, RulesConfig,
    SummonPayment,
};
use crate::effects::{refresh_auras, EffectRegistry, EffectResult, EffectSignals};
use crate::zones::{Zone, ZonePosition};

/// What a turn switch did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// The player whose turn it now is.
    pub player: PlayerId,
    pub turn: u32,
    /// Players whose turn was skipped on the way.
    pub skipped: SmallVec<[PlayerId; 2]>,
    pub drawn: Option<EntityId>,
    /// Card lost to a discard-on-draw condition.
    pub discarded: Option<EntityId>,
}

/// Result of `advance_phase`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhaseStep {
    /// Moved to the next phase of the same turn.
    Within(Phase),
    /// Left END, so the turn passed.
    NextTurn(TurnReport),
}

/// What a successful summon did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummonReport {
    pub card: EntityId,
    pub charge: Charge,
    /// On-summon effect, if the card has one.
    pub effect: Option<EffectResult>,
}

/// What an attack declaration did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: EntityId,
    /// Target the attack finally resolved against.
    pub target: AttackTarget,
    pub response: Option<EffectResult>,
    /// A response cancelled the attack.
    pub negated: bool,
    /// `None` when the attack was negated or fizzled.
    pub battle: Option<BattleResult>,
}

/// Result of `Duel::apply`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Phase(PhaseStep),
    Turn(TurnReport),
    Summoned(SummonReport),
    Effect(EffectResult),
    Set,
    Attack(AttackReport),
    Stance(Stance),
}

/// A live match between two players.
pub struct Duel {
    state: MatchState,
    effects: EffectRegistry,
    sink: Box<dyn EventSink>,
    announced: bool,
}

impl Duel {
    /// Wrap an existing match state with the standard effect catalog.
    #[must_use]
    pub fn new(state: MatchState) -> Self {
        let announced = state.is_over();
        Self {
            state,
            effects: EffectRegistry::standard(),
            sink: Box::new(NullSink),
            announced,
        }
    }

    /// Set up a fresh match.
    ///
    /// Both decks are instantiated and shuffled, each player draws the
    /// starting hand, and Player 1 opens turn 1 with the DRAW-phase draw.
    #[must_use]
    pub fn start(config: RulesConfig, seed: u64, first: &[CardDefinition], second: &[CardDefinition]) -> Self {
        let mut state = MatchState::new(config, seed);
        for (player, deck) in [(PlayerId::ONE, first), (PlayerId::TWO, second)] {
            state.load_deck(player, deck);
            let MatchState { players, rng, .. } = &mut state;
            players[player].zones.shuffle(Zone::Deck, rng);
        }
        for player in PlayerId::all() {
            for _ in 0..state.config.starting_hand {
                state.player_mut(player).draw();
            }
        }
        state.player_mut(PlayerId::ONE).draw();

        tracing::info!(
            seed,
            first = first.len(),
            second = second.len(),
            "match started"
        );
        Self::new(state)
    }

    /// Replace the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Replace the effect catalog.
    #[must_use]
    pub fn with_effects(mut self, effects: EffectRegistry) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Direct access for setups and tests. Bypasses every rule.
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    #[must_use]
    pub fn into_state(self) -> MatchState {
        self.state
    }

    #[must_use]
    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    // === Phase control ===

    /// Move to the next phase. Leaving END ends the turn.
    pub fn advance_phase(&mut self) -> RuleResult<PhaseStep> {
        self.ensure_live()?;
        let Some(next) = self.state.phase.next() else {
            return self.end_turn().map(PhaseStep::NextTurn);
        };
        let player = self.state.active();
        self.state.record(player, Action::AdvancePhase);
        self.state.phase = next;
        tracing::debug!(%player, phase = %next, "phase advanced");
        self.sink.cue(Cue::PhaseChange { phase: next });
        Ok(PhaseStep::Within(next))
    }

    /// Pass the turn. Legal in any phase while the match is live.
    pub fn end_turn(&mut self) -> RuleResult<TurnReport> {
        self.ensure_live()?;
        let ending = self.state.active();
        self.state.record(ending, Action::EndTurn);

        let mut skipped = SmallVec::new();
        let player = loop {
            self.state.swap_active();
            self.state.turn += 1;
            self.state.expire_conditions();

            let player = self.state.active();
            let holder = self.state.player_mut(player);
            for card in holder.zones.iter_mut(Zone::Battlefield) {
                card.reset_turn_flags();
            }
            holder.summons_this_turn = 0;
            self.state.phase = Phase::Draw;

            if self.state.player_mut(player).conditions.remove(PlayerCondition::SkipNextTurn) {
                tracing::info!(%player, turn = self.state.turn, "turn skipped");
                skipped.push(player);
                continue;
            }
            break player;
        };

        let turn = self.state.turn;
        tracing::info!(%player, turn, "turn started");
        self.sink.cue(Cue::PhaseChange { phase: Phase::Draw });
        let (drawn, discarded) = self.draw_for_turn(player);

        self.settle();
        Ok(TurnReport {
            player,
            turn,
            skipped,
            drawn,
            discarded,
        })
    }

    fn draw_for_turn(&mut self, player: PlayerId) -> (Option<EntityId>, Option<EntityId>) {
        let turn = self.state.turn;
        let holder = self.state.player_mut(player);
        let Some(drawn) = holder.draw() else {
            tracing::debug!(%player, "deck empty, no draw");
            return (None, None);
        };
        self.sink.cue(Cue::Draw { player, card: drawn });
        tracing::debug!(%player, card = %drawn, "drew");

        let holder = self.state.player_mut(player);
        if !holder.conditions.has(PlayerCondition::DiscardOnDraw, turn) {
            return (Some(drawn), None);
        }
        let discarded = holder.hand().front().map(|card| card.id);
        if let Some(card) = discarded {
            holder.send_to_graveyard(card);
            tracing::debug!(%player, card = %card, "discarded on draw");
        }
        (Some(drawn), discarded)
    }

    // === Main phase ===

    /// Summon a creature from the active player's hand.
    pub fn summon(&mut self, card: EntityId, stance: Stance, payment: SummonPayment) -> RuleResult<SummonReport> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Main)?;
        let player = self.state.active();
        let charge = check_summon(&self.state, player, card, &payment)?;

        pay(&mut self.state, player, &charge);
        let holder = self.state.player_mut(player);
        holder.play_to_battlefield(card);
        holder.summons_this_turn += 1;
        if let Some(summoned) = self.state.card_mut(card) {
            summoned.stance = stance;
        }
        self.state.record(
            player,
            Action::Summon {
                card,
                stance,
                payment,
            },
        );
        tracing::debug!(%player, card = %card, ?stance, ?charge, "summoned");
        self.sink.cue(Cue::Summon { player, card });
        refresh_auras(&mut self.state);

        let on_summon = self
            .state
            .card(card)
            .is_some_and(|c| c.trigger() == EffectTrigger::OnSummon);
        let effect = if on_summon {
            let result = self.effects.resolve(&mut self.state, card, player);
            if let Some(summoned) = self.state.card_mut(card) {
                summoned.mark_effect_used();
            }
            self.apply_own_signals(player, result.signals);
            Some(result)
        } else {
            None
        };

        self.settle();
        Ok(SummonReport {
            card,
            charge,
            effect,
        })
    }

    /// Resolve an instant from hand, then send it to the graveyard.
    pub fn activate_instant(&mut self, card: EntityId) -> RuleResult<EffectResult> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Main)?;
        let player = self.state.active();
        self.check_in_hand(player, card, Category::Instant)?;

        self.state.record(player, Action::ActivateInstant(card));
        let result = self.effects.resolve(&mut self.state, card, player);
        self.state.move_card(card, Zone::Graveyard, ZonePosition::Back);
        self.sink.cue(Cue::Discovery { card });
        self.apply_own_signals(player, result.signals);

        self.settle();
        Ok(result)
    }

    /// Set a reactive face-down on the battlefield.
    pub fn set_reactive(&mut self, card: EntityId) -> RuleResult<()> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Main)?;
        let player = self.state.active();
        self.check_in_hand(player, card, Category::Reactive)?;

        self.state.player_mut(player).play_to_battlefield(card);
        if let Some(set) = self.state.card_mut(card) {
            set.face_down = true;
        }
        self.state.record(player, Action::SetReactive(card));
        tracing::debug!(%player, card = %card, "reactive set");
        self.sink.cue(Cue::TrapSet { player });
        Ok(())
    }

    /// Resolve one of the active player's reactives outside of combat.
    pub fn activate_reactive(&mut self, card: EntityId) -> RuleResult<EffectResult> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Main)?;
        let player = self.state.active();
        check_reactive(&self.state, player, card)?;

        self.state.record(player, Action::ActivateReactive(card));
        let result = self.effects.resolve(&mut self.state, card, player);
        self.state.move_card(card, Zone::Graveyard, ZonePosition::Back);
        self.apply_own_signals(player, result.signals);

        self.settle();
        Ok(result)
    }

    /// Activate a battlefield creature's manual effect.
    pub fn activate_effect(&mut self, card: EntityId) -> RuleResult<EffectResult> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Main)?;
        let player = self.state.active();
        self.check_manual(player, card)?;

        self.state.record(player, Action::ActivateEffect(card));
        let result = self.effects.resolve(&mut self.state, card, player);
        if let Some(source) = self.state.card_mut(card) {
            source.mark_effect_used();
        }
        self.apply_own_signals(player, result.signals);

        self.settle();
        Ok(result)
    }

    /// Toggle a battlefield creature between attack and defense.
    pub fn switch_stance(&mut self, card: EntityId) -> RuleResult<Stance> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Main)?;
        let player = self.state.active();
        self.check_own_creature(player, card)?;

        let stance = match self.state.card_mut(card) {
            Some(creature) => {
                creature.stance = creature.stance.toggled();
                creature.stance
            }
            None => return Err(RuleViolation::CardNotFound(card)),
        };
        self.state.record(player, Action::SwitchStance(card));
        tracing::debug!(%player, card = %card, ?stance, "stance switched");
        Ok(stance)
    }

    // === Battle phase ===

    /// Declare an attack, let the defender respond, and resolve it.
    ///
    /// `response` is the defending player's chosen reactive. It is validated
    /// with everything else before anything changes.
    pub fn declare_attack(
        &mut self,
        attacker: EntityId,
        target: AttackTarget,
        response: Option<EntityId>,
    ) -> RuleResult<AttackReport> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Battle)?;
        let right = check_attacker(&self.state, attacker)?;
        check_target(&self.state, attacker, target)?;
        let player = self.state.active();
        let defender = player.opponent();
        if let Some(reactive) = response {
            check_reactive(&self.state, defender, reactive)?;
        }

        if right == AttackRight::Extra {
            self.state.player_mut(player).conditions.remove(PlayerCondition::ExtraAttack);
        }
        if let Some(card) = self.state.card_mut(attacker) {
            card.attacked_this_turn = true;
        }
        self.state.record(
            player,
            Action::Attack {
                attacker,
                target,
                response,
            },
        );
        tracing::debug!(%player, attacker = %attacker, ?target, ?response, "attack declared");
        self.sink.cue(Cue::Attack { attacker, target });

        let mut report = AttackReport {
            attacker,
            target,
            response: None,
            negated: false,
            battle: None,
        };

        if let Some(reactive) = response {
            let result = self.effects.resolve(&mut self.state, reactive, defender);
            self.state.move_card(reactive, Zone::Graveyard, ZonePosition::Back);
            let signals = result.signals;
            report.response = Some(result);
            self.apply_response_signals(player, signals);

            if signals.negated_attack {
                tracing::debug!(attacker = %attacker, "attack negated");
                report.negated = true;
                self.settle();
                return Ok(report);
            }
            if signals.redirect_target {
                report.target = self.redirect(attacker, report.target);
            }
        }

        report.battle = match self.revalidate(attacker, report.target) {
            Some(Strike::Battle(defending)) => resolve_battle(&mut self.state, attacker, defending),
            Some(Strike::Direct { halved }) => resolve_direct_attack(&mut self.state, attacker, halved),
            None => {
                tracing::debug!(attacker = %attacker, "attack fizzled");
                None
            }
        };
        if let Some(battle) = &report.battle {
            for &card in &battle.destroyed {
                self.sink.cue(Cue::Destroy { card });
            }
        }

        self.settle();
        Ok(report)
    }

    /// Re-check an attack after a response may have changed the board.
    fn revalidate(&self, attacker: EntityId, target: AttackTarget) -> Option<Strike> {
        let (holder, zone) = self.state.locate(attacker)?;
        if holder != self.state.active() || zone != Zone::Battlefield {
            return None;
        }
        check_target(&self.state, attacker, target).ok()
    }

    fn redirect(&mut self, attacker: EntityId, current: AttackTarget) -> AttackTarget {
        let options = legal_attack_targets(&self.state, attacker);
        if options.len() < 2 {
            return current;
        }
        let chosen = self.state.rng.choose(&options).copied().unwrap_or(current);
        tracing::debug!(attacker = %attacker, from = ?current, to = ?chosen, "attack redirected");
        chosen
    }

    // === Signals ===

    fn apply_own_signals(&mut self, player: PlayerId, signals: EffectSignals) {
        let turn = self.state.turn;
        if signals.double_attack {
            self.state
                .player_mut(player)
                .conditions
                .add(PlayerCondition::ExtraAttack, Expiry::ThroughTurn(turn));
        }
        if signals.skip_next_turn {
            self.state
                .player_mut(player.opponent())
                .conditions
                .add(PlayerCondition::SkipNextTurn, Expiry::Permanent);
        }
    }

    /// Signals from a defender's response to `attacking`'s attack.
    ///
    /// `negated_effect` and `effect_reversed` are informational only: they are
    /// logged and leave the match unchanged.
    fn apply_response_signals(&mut self, attacking: PlayerId, signals: EffectSignals) {
        let turn = self.state.turn;
        if signals.skip_next_turn {
            self.state
                .player_mut(attacking)
                .conditions
                .add(PlayerCondition::SkipNextTurn, Expiry::Permanent);
        }
        if signals.double_attack {
            self.state
                .player_mut(attacking.opponent())
                .conditions
                .add(PlayerCondition::ExtraAttack, Expiry::ThroughTurn(turn + 1));
        }
        if signals.negated_effect || signals.effect_reversed {
            tracing::debug!(?signals, "response reported effect signals");
        }
    }

    // === Checks ===

    fn ensure_live(&self) -> RuleResult<()> {
        if self.state.is_over() {
            Err(RuleViolation::MatchOver)
        } else {
            Ok(())
        }
    }

    fn ensure_phase(&self, expected: Phase) -> RuleResult<()> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(RuleViolation::WrongPhase {
                expected,
                actual: self.state.phase,
            })
        }
    }

    fn check_in_hand(&self, player: PlayerId, card: EntityId, category: Category) -> RuleResult<()> {
        let (holder, zone) = self.state.locate(card).ok_or(RuleViolation::CardNotFound(card))?;
        if holder != player {
            return Err(RuleViolation::NotControlled(card));
        }
        if zone != Zone::Hand {
            return Err(RuleViolation::NotInZone {
                card,
                expected: Zone::Hand,
            });
        }
        match self.state.card(card) {
            Some(found) if found.category() == category => Ok(()),
            Some(_) => Err(RuleViolation::WrongCategory {
                card,
                expected: category,
            }),
            None => Err(RuleViolation::CardNotFound(card)),
        }
    }

    fn check_own_creature(&self, player: PlayerId, card: EntityId) -> RuleResult<()> {
        let (holder, zone) = self.state.locate(card).ok_or(RuleViolation::CardNotFound(card))?;
        if holder != player {
            return Err(RuleViolation::NotControlled(card));
        }
        if zone != Zone::Battlefield {
            return Err(RuleViolation::NotInZone {
                card,
                expected: Zone::Battlefield,
            });
        }
        match self.state.card(card) {
            Some(found) if found.is_creature() => Ok(()),
            Some(_) => Err(RuleViolation::WrongCategory {
                card,
                expected: Category::Creature,
            }),
            None => Err(RuleViolation::CardNotFound(card)),
        }
    }

    fn check_manual(&self, player: PlayerId, card: EntityId) -> RuleResult<()> {
        self.check_own_creature(player, card)?;
        let source = self.state.card(card).ok_or(RuleViolation::CardNotFound(card))?;
        let unavailable = |reason: &str| {
            Err(RuleViolation::EffectUnavailable {
                card,
                reason: reason.to_string(),
            })
        };
        if source.trigger() != EffectTrigger::Manual {
            return unavailable("effect is not activated manually");
        }
        if source.has(CardCondition::EffectsNegated, self.state.turn) {
            return unavailable("effects are negated");
        }
        match source.effect_exhausted() {
            Some(reason) => unavailable(reason),
            None => Ok(()),
        }
    }

    fn settle(&mut self) {
        refresh_auras(&mut self.state);
        if let Some(winner) = self.state.check_victory() {
            if !self.announced {
                self.announced = true;
                tracing::info!(%winner, turn = self.state.turn, "match decided");
                self.sink.cue(Cue::Victory { winner });
            }
        }
    }

    // === Queries ===

    /// Legal attack targets for one of the active player's creatures.
    #[must_use]
    pub fn legal_attack_targets(&self, attacker: EntityId) -> Vec<AttackTarget> {
        if check_attacker(&self.state, attacker).is_err() {
            return Vec::new();
        }
        legal_attack_targets(&self.state, attacker)
    }

    /// Accepted payments for summoning `card` from the active hand.
    #[must_use]
    pub fn summon_options(&self, card: EntityId) -> Vec<SummonPayment> {
        let player = self.state.active();
        payment_options(&self.state, player, card)
            .into_iter()
            .filter(|payment| check_summon(&self.state, player, card, payment).is_ok())
            .collect()
    }

    /// Reactives `player` could answer an attack with.
    #[must_use]
    pub fn response_candidates(&self, player: PlayerId) -> Vec<EntityId> {
        response_candidates(&self.state, player)
    }

    /// Every action the active player may take right now.
    ///
    /// Attacks are listed without a response; the defender picks one from
    /// `response_candidates`.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.state.is_over() {
            return Vec::new();
        }
        let player = self.state.active();
        let holder = self.state.player(player);
        let mut actions = vec![Action::AdvancePhase, Action::EndTurn];

        match self.state.phase {
            Phase::Main => {
                for card in holder.hand() {
                    let id = card.id;
                    match card.category() {
                        Category::Creature => {
                            for payment in self.summon_options(id) {
                                for stance in [Stance::Attack, Stance::Defense] {
                                    actions.push(Action::Summon {
                                        card: id,
                                        stance,
                                        payment: payment.clone(),
                                    });
                                }
                            }
                        }
                        Category::Instant => actions.push(Action::ActivateInstant(id)),
                        Category::Reactive => {
                            actions.push(Action::SetReactive(id));
                            if check_reactive(&self.state, player, id).is_ok() {
                                actions.push(Action::ActivateReactive(id));
                            }
                        }
                    }
                }
                for card in holder.battlefield() {
                    let id = card.id;
                    if card.is_creature() {
                        if self.check_manual(player, id).is_ok() {
                            actions.push(Action::ActivateEffect(id));
                        }
                        actions.push(Action::SwitchStance(id));
                    } else if check_reactive(&self.state, player, id).is_ok() {
                        actions.push(Action::ActivateReactive(id));
                    }
                }
            }
            Phase::Battle => {
                for attacker in holder.creature_ids() {
                    for target in self.legal_attack_targets(attacker) {
                        actions.push(Action::Attack {
                            attacker,
                            target,
                            response: None,
                        });
                    }
                }
            }
            Phase::Draw | Phase::End => {}
        }
        actions
    }

    /// Dispatch an action to its operation.
    pub fn apply(&mut self, action: Action) -> RuleResult<Outcome> {
        match action {
            Action::AdvancePhase => self.advance_phase().map(Outcome::Phase),
            Action::EndTurn => self.end_turn().map(Outcome::Turn),
            Action::Summon {
                card,
                stance,
                payment,
            } => self.summon(card, stance, payment).map(Outcome::Summoned),
            Action::ActivateInstant(card) => self.activate_instant(card).map(Outcome::Effect),
            Action::SetReactive(card) => self.set_reactive(card).map(|()| Outcome::Set),
            Action::ActivateReactive(card) => self.activate_reactive(card).map(Outcome::Effect),
            Action::ActivateEffect(card) => self.activate_effect(card).map(Outcome::Effect),
            Action::Attack {
                attacker,
                target,
                response,
            } => self.declare_attack(attacker, target, response).map(Outcome::Attack),
            Action::SwitchStance(card) => self.switch_stance(card).map(Outcome::Stance),
        }
    }
}

impl std::fmt::Debug for Duel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Duel")
            .field("turn", &self.state.turn)
            .field("phase", &self.state.phase)
            .field("active", &self.state.active())
            .field("winner", &self.state.winner())
            .field("effects", &self.effects.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{starter_catalog, CardRegistry};
    use crate::rules::events::RecordingSink;

    fn catalog() -> CardRegistry {
        starter_catalog()
    }

    fn put(duel: &mut Duel, player: PlayerId, name: &str, zone: Zone) -> EntityId {
        let definition = catalog().get_by_name(name).cloned().unwrap();
        duel.state_mut().add_card(player, &definition, zone)
    }

    fn duel_in(phase: Phase) -> Duel {
        let mut duel = Duel::new(MatchState::new(RulesConfig::default(), 11));
        duel.state_mut().turn = 3;
        duel.state_mut().phase = phase;
        duel
    }

    #[test]
    fn test_phase_cycle_and_turn_switch() {
        let mut duel = duel_in(Phase::Draw);
        assert_eq!(duel.advance_phase(), Ok(PhaseStep::Within(Phase::Main)));
        assert_eq!(duel.advance_phase(), Ok(PhaseStep::Within(Phase::Battle)));
        assert_eq!(duel.advance_phase(), Ok(PhaseStep::Within(Phase::End)));

        let Ok(PhaseStep::NextTurn(report)) = duel.advance_phase() else {
            panic!("expected a turn switch");
        };
        assert_eq!(report.player, PlayerId::TWO);
        assert_eq!(report.turn, 4);
        assert_eq!(report.drawn, None);
        assert_eq!(duel.state().phase, Phase::Draw);
    }

    #[test]
    fn test_end_turn_resets_new_active_player() {
        let mut duel = duel_in(Phase::Battle);
        let creature = put(&mut duel, PlayerId::TWO, "Homer", Zone::Battlefield);
        duel.state_mut().card_mut(creature).unwrap().attacked_this_turn = true;
        duel.state_mut().player_mut(PlayerId::TWO).summons_this_turn = 2;
        let top = put(&mut duel, PlayerId::TWO, "Archimedes", Zone::Deck);

        let report = duel.end_turn().unwrap();
        assert_eq!(report.drawn, Some(top));
        assert!(!duel.state().card(creature).unwrap().attacked_this_turn);
        assert_eq!(duel.state().player(PlayerId::TWO).summons_this_turn, 0);
    }

    #[test]
    fn test_skip_next_turn_is_consumed() {
        let mut duel = duel_in(Phase::Main);
        duel.state_mut()
            .player_mut(PlayerId::TWO)
            .conditions
            .add(PlayerCondition::SkipNextTurn, Expiry::Permanent);

        let report = duel.end_turn().unwrap();
        assert_eq!(report.player, PlayerId::ONE);
        assert_eq!(report.turn, 5);
        assert_eq!(report.skipped.as_slice(), &[PlayerId::TWO]);
        assert!(duel.state().player(PlayerId::TWO).conditions.is_empty());
    }

    #[test]
    fn test_discard_on_draw() {
        let mut duel = duel_in(Phase::End);
        let held = put(&mut duel, PlayerId::TWO, "Homer", Zone::Hand);
        let top = put(&mut duel, PlayerId::TWO, "Archimedes", Zone::Deck);
        duel.state_mut()
            .player_mut(PlayerId::TWO)
            .conditions
            .add(PlayerCondition::DiscardOnDraw, Expiry::Permanent);

        let report = duel.end_turn().unwrap();
        assert_eq!(report.drawn, Some(top));
        assert_eq!(report.discarded, Some(held));
        assert_eq!(duel.state().locate(held), Some((PlayerId::TWO, Zone::Graveyard)));
    }

    #[test]
    fn test_summon_wrong_phase_leaves_state() {
        let mut duel = duel_in(Phase::Battle);
        let homer = put(&mut duel, PlayerId::ONE, "Homer", Zone::Hand);
        assert_eq!(
            duel.summon(homer, Stance::Attack, SummonPayment::Free),
            Err(RuleViolation::WrongPhase {
                expected: Phase::Main,
                actual: Phase::Battle
            })
        );
        assert!(duel.state().history.is_empty());
        assert_eq!(duel.state().locate(homer), Some((PlayerId::ONE, Zone::Hand)));
    }

    #[test]
    fn test_summon_master_pays_life() {
        let sink = RecordingSink::new();
        let mut duel = duel_in(Phase::Main).with_sink(sink.clone());
        let legend = put(&mut duel, PlayerId::ONE, "Marie Curie", Zone::Hand);
        assert_eq!(duel.summon_options(legend), vec![SummonPayment::Life]);

        let master = put(&mut duel, PlayerId::ONE, "Archimedes", Zone::Hand);
        let report = duel.summon(master, Stance::Defense, SummonPayment::Life).unwrap();
        assert_eq!(report.charge, Charge::Life(1000));
        assert_eq!(duel.state().player(PlayerId::ONE).life(), 19_000);
        assert_eq!(duel.state().card(master).unwrap().stance, Stance::Defense);
        assert_eq!(duel.state().player(PlayerId::ONE).summons_this_turn, 1);
        assert_eq!(sink.count("summon"), 1);
    }

    #[test]
    fn test_on_summon_effect_resolves() {
        let mut duel = duel_in(Phase::Main);
        let homer = put(&mut duel, PlayerId::TWO, "Homer", Zone::Battlefield);
        let einstein = put(&mut duel, PlayerId::ONE, "Albert Einstein", Zone::Hand);

        let report = duel.summon(einstein, Stance::Attack, SummonPayment::Life).unwrap();
        assert!(report.effect.unwrap().success);
        assert_eq!(duel.state().locate(homer), Some((PlayerId::TWO, Zone::Graveyard)));
        assert!(duel.state().card(einstein).unwrap().effect_exhausted().is_some());
    }

    #[test]
    fn test_manual_creature_does_not_fire_on_summon() {
        let mut duel = duel_in(Phase::Main);
        let homer = put(&mut duel, PlayerId::ONE, "Homer", Zone::Hand);
        let report = duel.summon(homer, Stance::Attack, SummonPayment::Free).unwrap();
        assert!(report.effect.is_none());
        assert!(duel.activate_effect(homer).is_ok());

        let darwin = put(&mut duel, PlayerId::ONE, "Charles Darwin", Zone::Battlefield);
        assert!(matches!(
            duel.activate_effect(darwin),
            Err(RuleViolation::EffectUnavailable { .. })
        ));
    }

    #[test]
    fn test_manual_effect_frequency() {
        let mut duel = duel_in(Phase::Main);
        let socrates = put(&mut duel, PlayerId::ONE, "Socrates", Zone::Battlefield);

        let result = duel.activate_effect(socrates).unwrap();
        assert!(result.success);
        assert_eq!(duel.state().player(PlayerId::TWO).life(), 18_000);
        assert!(matches!(
            duel.activate_effect(socrates),
            Err(RuleViolation::EffectUnavailable { .. })
        ));
    }

    #[test]
    fn test_negated_creature_cannot_activate() {
        let mut duel = duel_in(Phase::Main);
        let homer = put(&mut duel, PlayerId::ONE, "Homer", Zone::Battlefield);
        duel.state_mut()
            .card_mut(homer)
            .unwrap()
            .conditions
            .add(CardCondition::EffectsNegated, Expiry::ThroughTurn(3));
        assert!(matches!(
            duel.activate_effect(homer),
            Err(RuleViolation::EffectUnavailable { .. })
        ));
    }

    #[test]
    fn test_instant_goes_to_graveyard() {
        let sink = RecordingSink::new();
        let mut duel = duel_in(Phase::Main).with_sink(sink.clone());
        let instant = put(&mut duel, PlayerId::ONE, "Chain of Knowledge", Zone::Hand);
        duel.activate_instant(instant).unwrap();
        assert_eq!(duel.state().locate(instant), Some((PlayerId::ONE, Zone::Graveyard)));
        assert_eq!(sink.names(), vec!["discovery"]);
    }

    #[test]
    fn test_set_reactive_is_face_down() {
        let sink = RecordingSink::new();
        let mut duel = duel_in(Phase::Main).with_sink(sink.clone());
        let trap = put(&mut duel, PlayerId::ONE, "Time Dilation", Zone::Hand);
        duel.set_reactive(trap).unwrap();
        let card = duel.state().card(trap).unwrap();
        assert!(card.face_down);
        assert_eq!(card.zone, Zone::Battlefield);
        assert_eq!(sink.count("trap_set"), 1);
    }

    #[test]
    fn test_time_dilation_skips_opponent() {
        let mut duel = duel_in(Phase::Main);
        let trap = put(&mut duel, PlayerId::ONE, "Time Dilation", Zone::Hand);
        duel.set_reactive(trap).unwrap();
        duel.activate_reactive(trap).unwrap();

        let report = duel.end_turn().unwrap();
        assert_eq!(report.player, PlayerId::ONE);
        assert_eq!(report.skipped.as_slice(), &[PlayerId::TWO]);
    }

    #[test]
    fn test_direct_attack() {
        let sink = RecordingSink::new();
        let mut duel = duel_in(Phase::Battle).with_sink(sink.clone());
        let homer = put(&mut duel, PlayerId::ONE, "Homer", Zone::Battlefield);

        let report = duel.declare_attack(homer, AttackTarget::Direct, None).unwrap();
        let battle = report.battle.unwrap();
        assert_eq!(battle.damage, 1300);
        assert_eq!(duel.state().player(PlayerId::TWO).life(), 18_700);
        assert_eq!(
            duel.declare_attack(homer, AttackTarget::Direct, None),
            Err(RuleViolation::AlreadyAttacked(homer))
        );
        assert_eq!(sink.names(), vec!["attack"]);
    }

    #[test]
    fn test_negating_response() {
        let mut duel = duel_in(Phase::Battle);
        let homer = put(&mut duel, PlayerId::ONE, "Homer", Zone::Battlefield);
        let cat = put(&mut duel, PlayerId::TWO, "Schrödinger's Cat", Zone::Battlefield);
        duel.state_mut().card_mut(cat).unwrap().face_down = true;

        let report = duel.declare_attack(homer, AttackTarget::Direct, Some(cat)).unwrap();
        assert!(report.negated);
        assert!(report.battle.is_none());
        assert_eq!(duel.state().player(PlayerId::TWO).life(), 20_000);
        assert_eq!(duel.state().locate(cat), Some((PlayerId::TWO, Zone::Graveyard)));
        assert!(duel.state().card(homer).unwrap().attacked_this_turn);
    }

    #[test]
    fn test_invalid_response_changes_nothing() {
        let mut duel = duel_in(Phase::Battle);
        let homer = put(&mut duel, PlayerId::ONE, "Homer", Zone::Battlefield);
        let cat = put(&mut duel, PlayerId::TWO, "Schrödinger's Cat", Zone::Hand);

        assert!(duel.declare_attack(homer, AttackTarget::Direct, Some(cat)).is_err());
        assert!(!duel.state().card(homer).unwrap().attacked_this_turn);
        assert!(duel.state().history.is_empty());
    }

    #[test]
    fn test_time_dilation_response_skips_attacker() {
        let mut duel = duel_in(Phase::Battle);
        let homer = put(&mut duel, PlayerId::ONE, "Homer", Zone::Battlefield);
        let trap = put(&mut duel, PlayerId::TWO, "Time Dilation", Zone::Battlefield);
        duel.state_mut().card_mut(trap).unwrap().face_down = true;

        duel.declare_attack(homer, AttackTarget::Direct, Some(trap)).unwrap();
        assert!(duel
            .state()
            .player(PlayerId::ONE)
            .conditions
            .has(PlayerCondition::SkipNextTurn, 3));
    }

    #[test]
    fn test_redirect_picks_from_seeded_rng() {
        let mut duel = duel_in(Phase::Battle);
        let freud = put(&mut duel, PlayerId::ONE, "Sigmund Freud", Zone::Battlefield);
        let homer = put(&mut duel, PlayerId::TWO, "Homer", Zone::Battlefield);
        put(&mut duel, PlayerId::TWO, "Leo Tolstoy", Zone::Battlefield);
        let trap = put(&mut duel, PlayerId::TWO, "Heisenberg's Uncertainty", Zone::Battlefield);
        duel.state_mut().card_mut(trap).unwrap().face_down = true;

        let options = legal_attack_targets(duel.state(), freud);
        assert_eq!(options.len(), 2);
        let expected = *duel.state().rng.clone().choose(&options).unwrap();
        let AttackTarget::Creature(struck) = expected else {
            panic!("a creature should be chosen while the opponent has creatures");
        };

        let report = duel
            .declare_attack(freud, AttackTarget::Creature(homer), Some(trap))
            .unwrap();
        assert!(report.response.unwrap().signals.redirect_target);
        assert_eq!(report.target, expected);
        assert_eq!(report.battle.unwrap().defender, Some(struck));
        assert_eq!(duel.state().locate(struck), Some((PlayerId::TWO, Zone::Graveyard)));
        assert_eq!(duel.state().locate(trap), Some((PlayerId::TWO, Zone::Graveyard)));
    }

    #[test]
    fn test_redirect_with_single_target_keeps_target() {
        let mut duel = duel_in(Phase::Battle);
        let freud = put(&mut duel, PlayerId::ONE, "Sigmund Freud", Zone::Battlefield);
        let homer = put(&mut duel, PlayerId::TWO, "Homer", Zone::Battlefield);
        let trap = put(&mut duel, PlayerId::TWO, "Heisenberg's Uncertainty", Zone::Battlefield);
        duel.state_mut().card_mut(trap).unwrap().face_down = true;
        let rng_before = duel.state().rng.state();

        let report = duel
            .declare_attack(freud, AttackTarget::Creature(homer), Some(trap))
            .unwrap();
        assert_eq!(report.target, AttackTarget::Creature(homer));
        assert_eq!(report.battle.unwrap().defender, Some(homer));
        assert_eq!(duel.state().rng.state(), rng_before);
        assert_eq!(duel.state().player(PlayerId::TWO).life(), 18_800);
    }

    #[test]
    fn test_quantum_leap_allows_one_extra_attack() {
        let mut duel = duel_in(Phase::Main);
        let freud = put(&mut duel, PlayerId::ONE, "Sigmund Freud", Zone::Battlefield);
        let leap = put(&mut duel, PlayerId::ONE, "Quantum Leap", Zone::Hand);

        assert!(duel.activate_instant(leap).unwrap().signals.double_attack);
        assert!(duel
            .state()
            .player(PlayerId::ONE)
            .conditions
            .has(PlayerCondition::ExtraAttack, 3));
        assert_eq!(duel.advance_phase(), Ok(PhaseStep::Within(Phase::Battle)));

        duel.declare_attack(freud, AttackTarget::Direct, None).unwrap();
        duel.declare_attack(freud, AttackTarget::Direct, None).unwrap();
        assert_eq!(duel.state().player(PlayerId::TWO).life(), 15_000);
        assert!(!duel
            .state()
            .player(PlayerId::ONE)
            .conditions
            .has(PlayerCondition::ExtraAttack, 3));

        assert_eq!(
            duel.declare_attack(freud, AttackTarget::Direct, None),
            Err(RuleViolation::AlreadyAttacked(freud))
        );
        assert_eq!(duel.state().player(PlayerId::TWO).life(), 15_000);
    }

    #[test]
    fn test_double_attack_response_grants_responder_next_turn() {
        let mut duel = duel_in(Phase::Battle);
        let homer = put(&mut duel, PlayerId::TWO, "Homer", Zone::Battlefield);
        duel.apply_response_signals(
            PlayerId::ONE,
            EffectSignals {
                double_attack: true,
                ..EffectSignals::default()
            },
        );

        let conditions = &duel.state().player(PlayerId::TWO).conditions;
        assert!(conditions.has(PlayerCondition::ExtraAttack, 4));
        assert!(!duel
            .state()
            .player(PlayerId::ONE)
            .conditions
            .has(PlayerCondition::ExtraAttack, 3));

        let report = duel.end_turn().unwrap();
        assert_eq!(report.player, PlayerId::TWO);
        duel.state_mut().phase = Phase::Battle;
        duel.declare_attack(homer, AttackTarget::Direct, None).unwrap();
        duel.declare_attack(homer, AttackTarget::Direct, None).unwrap();
        assert_eq!(duel.state().player(PlayerId::ONE).life(), 17_400);
        assert_eq!(
            duel.declare_attack(homer, AttackTarget::Direct, None),
            Err(RuleViolation::AlreadyAttacked(homer))
        );
    }

    #[test]
    fn test_victory_blocks_further_actions() {
        let sink = RecordingSink::new();
        let mut duel = duel_in(Phase::Battle).with_sink(sink.clone());
        let homer = put(&mut duel, PlayerId::ONE, "Homer", Zone::Battlefield);
        duel.state_mut().player_mut(PlayerId::TWO).take_damage(19_000);

        duel.declare_attack(homer, AttackTarget::Direct, None).unwrap();
        assert_eq!(duel.winner(), Some(PlayerId::ONE));
        assert_eq!(sink.count("victory"), 1);
        assert_eq!(duel.end_turn(), Err(RuleViolation::MatchOver));
        assert!(duel.legal_actions().is_empty());
    }

    #[test]
    fn test_legal_actions_by_phase() {
        let mut duel = duel_in(Phase::Main);
        let homer = put(&mut duel, PlayerId::ONE, "Homer", Zone::Hand);
        let on_field = put(&mut duel, PlayerId::ONE, "Archimedes", Zone::Battlefield);

        let actions = duel.legal_actions();
        assert!(actions.contains(&Action::Summon {
            card: homer,
            stance: Stance::Defense,
            payment: SummonPayment::Free,
        }));
        assert!(actions.contains(&Action::SwitchStance(on_field)));

        duel.state_mut().phase = Phase::Battle;
        let actions = duel.legal_actions();
        assert!(actions.contains(&Action::Attack {
            attacker: on_field,
            target: AttackTarget::Direct,
            response: None,
        }));
        assert!(!actions.iter().any(|a| matches!(a, Action::Summon { .. })));
    }

    #[test]
    fn test_start_deals_hands() {
        let catalog = catalog();
        let deck: Vec<CardDefinition> = catalog.iter().take(30).cloned().collect();
        let duel = Duel::start(RulesConfig::default(), 21, &deck, &deck);

        let state = duel.state();
        assert_eq!(state.player(PlayerId::ONE).hand().len(), 6);
        assert_eq!(state.player(PlayerId::TWO).hand().len(), 5);
        assert_eq!(state.player(PlayerId::ONE).deck().len(), 24);
        assert_eq!(state.turn, 1);
        assert_eq!(state.phase, Phase::Draw);
    }
}
