//! Turn clock.
//!
//! The clock does not own a thread or a timer. The embedding calls `tick`
//! once per elapsed second, and `tick_duel` ends the turn when time runs
//! out.

use serde::{Deserialize, Serialize};

use super::engine::{Duel, TurnReport};
use crate::core::RuleResult;

/// Time allowed per turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeLimit {
    Seconds30,
    #[default]
    Seconds60,
    Seconds90,
    Unlimited,
}

impl TimeLimit {
    pub const ALL: [TimeLimit; 4] = [
        TimeLimit::Seconds30,
        TimeLimit::Seconds60,
        TimeLimit::Seconds90,
        TimeLimit::Unlimited,
    ];

    /// Length of a turn, or `None` for no limit.
    #[must_use]
    pub const fn seconds(self) -> Option<u32> {
        match self {
            TimeLimit::Seconds30 => Some(30),
            TimeLimit::Seconds60 => Some(60),
            TimeLimit::Seconds90 => Some(90),
            TimeLimit::Unlimited => None,
        }
    }
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Clock stopped or unlimited.
    Idle,
    /// Seconds left after this tick.
    Running(u32),
    /// The turn's time just ran out.
    Expired,
}

/// Countdown for the current turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnClock {
    limit: TimeLimit,
    remaining: u32,
    running: bool,
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new(TimeLimit::default())
    }
}

impl TurnClock {
    #[must_use]
    pub fn new(limit: TimeLimit) -> Self {
        Self {
            limit,
            remaining: limit.seconds().unwrap_or(0),
            running: false,
        }
    }

    #[must_use]
    pub fn limit(&self) -> TimeLimit {
        self.limit
    }

    /// Change the limit. The countdown restarts from the new length.
    pub fn set_limit(&mut self, limit: TimeLimit) {
        self.limit = limit;
        self.reset();
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Refill and start counting. An unlimited clock never runs.
    pub fn start(&mut self) {
        self.reset();
        self.running = self.limit.seconds().is_some();
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Refill without changing whether the clock runs.
    pub fn reset(&mut self) {
        self.remaining = self.limit.seconds().unwrap_or(0);
    }

    /// Count one second down.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    /// Remaining time as `mm:ss`, or `--:--` without a limit.
    #[must_use]
    pub fn display(&self) -> String {
        if self.limit == TimeLimit::Unlimited {
            return "--:--".to_string();
        }
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

/// Advance `clock` by one second and force the turn over on expiry.
///
/// On expiry the clock restarts for the next player. Returns the report of
/// the forced turn switch, if there was one.
pub fn tick_duel(clock: &mut TurnClock, duel: &mut Duel) -> RuleResult<Option<TurnReport>> {
    match clock.tick() {
        Tick::Expired => {
            tracing::debug!(player = %duel.state().active(), "turn clock expired");
            let report = duel.end_turn()?;
            clock.start();
            Ok(Some(report))
        }
        Tick::Idle | Tick::Running(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MatchState, PlayerId, RulesConfig};

    #[test]
    fn test_display_format() {
        let mut clock = TurnClock::new(TimeLimit::Seconds90);
        assert_eq!(clock.display(), "01:30");
        clock.start();
        for _ in 0..31 {
            clock.tick();
        }
        assert_eq!(clock.display(), "00:59");
        assert_eq!(TurnClock::new(TimeLimit::Unlimited).display(), "--:--");
    }

    #[test]
    fn test_default_is_sixty_seconds() {
        let clock = TurnClock::default();
        assert_eq!(clock.limit(), TimeLimit::Seconds60);
        assert_eq!(clock.remaining(), 60);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_expiry() {
        let mut clock = TurnClock::new(TimeLimit::Seconds30);
        assert_eq!(clock.tick(), Tick::Idle);

        clock.start();
        for expected in (1..30).rev() {
            assert_eq!(clock.tick(), Tick::Running(expected));
        }
        assert_eq!(clock.tick(), Tick::Expired);
        assert_eq!(clock.tick(), Tick::Idle);
    }

    #[test]
    fn test_unlimited_never_runs() {
        let mut clock = TurnClock::new(TimeLimit::Unlimited);
        clock.start();
        assert!(!clock.is_running());
        assert_eq!(clock.tick(), Tick::Idle);
    }

    #[test]
    fn test_tick_duel_ends_turn() {
        let mut duel = Duel::new(MatchState::new(RulesConfig::default(), 5));
        let mut clock = TurnClock::new(TimeLimit::Seconds30);
        clock.start();

        for _ in 0..29 {
            assert_eq!(tick_duel(&mut clock, &mut duel), Ok(None));
        }
        let report = tick_duel(&mut clock, &mut duel).unwrap().unwrap();
        assert_eq!(report.player, PlayerId::TWO);
        assert_eq!(duel.state().turn, 2);
        assert_eq!(clock.remaining(), 30);
        assert!(clock.is_running());
    }
}
