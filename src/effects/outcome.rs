//! Effect results and caller-facing signals.

use serde::{Deserialize, Serialize};

/// Instructions an effect hands back to the battle flow.
///
/// The resolver never acts on these itself; the rules layer decides what a
/// signal means in context (response to an attack vs. own activation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSignals {
    pub negated_attack: bool,
    pub negated_effect: bool,
    pub skip_next_turn: bool,
    pub redirect_target: bool,
    pub double_attack: bool,
    pub effect_reversed: bool,
}

impl EffectSignals {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Outcome of one effect procedure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectResult {
    pub success: bool,
    pub message: String,
    pub signals: EffectSignals,
}

impl EffectResult {
    /// A resolved effect.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            signals: EffectSignals::default(),
        }
    }

    /// An effect that could not run.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            signals: EffectSignals::default(),
        }
    }

    #[must_use]
    pub fn negating_attack(mut self) -> Self {
        self.signals.negated_attack = true;
        self
    }

    #[must_use]
    pub fn negating_effect(mut self) -> Self {
        self.signals.negated_effect = true;
        self
    }

    #[must_use]
    pub fn skipping_turn(mut self) -> Self {
        self.signals.skip_next_turn = true;
        self
    }

    #[must_use]
    pub fn redirecting(mut self) -> Self {
        self.signals.redirect_target = true;
        self
    }

    #[must_use]
    pub fn doubling_attack(mut self) -> Self {
        self.signals.double_attack = true;
        self
    }

    #[must_use]
    pub fn reversing(mut self) -> Self {
        self.signals.effect_reversed = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_builders() {
        let result = EffectResult::success("Negated!").negating_attack().negating_effect();
        assert!(result.success);
        assert!(result.signals.negated_attack);
        assert!(result.signals.negated_effect);
        assert!(!result.signals.skip_next_turn);
        assert!(!result.signals.is_empty());
    }

    #[test]
    fn test_plain_result_has_no_signals() {
        assert!(EffectResult::success("ok").signals.is_empty());
        assert!(!EffectResult::failure("no").success);
    }
}
