//! Card classification attributes.
//!
//! Card repositories describe cards with upper-case classification strings
//! ("CHARACTER", "SCIENCE", "RATIONALISM", ...). Each axis is a closed enum
//! here, parsed with `FromStr` and printed back in the repository spelling.
//!
//! ## Axes
//!
//! - `Category`: creature, instant or reactive
//! - `Domain` / `School`: creature classifications driving synergy and clash
//! - `Tier`: creature power class driving summon cost
//! - `Stance`: attack or defense position on the battlefield
//! - `EffectTrigger` / `EffectFrequency`: when and how often an effect runs

use serde::{Deserialize, Serialize};

use crate::core::error::ParseError;

macro_rules! classification {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every value on this axis.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Repository spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($text $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(ParseError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

classification! {
    /// What kind of card this is.
    Category, "category" {
        /// Summoned to the battlefield, fights.
        Creature => "CREATURE" | "CHARACTER",
        /// Resolves from hand, then goes to the graveyard.
        Instant => "INSTANT" | "DISCOVERY",
        /// Set face-down, activated later.
        Reactive => "REACTIVE" | "PARADOX",
    }
}

classification! {
    /// Field of study of a creature.
    Domain, "domain" {
        Science => "SCIENCE",
        Philosophy => "PHILOSOPHY",
        Spirituality => "SPIRITUALITY",
        Humanities => "HUMANITIES",
    }
}

classification! {
    /// School of thought of a creature.
    School, "school" {
        Rationalism => "RATIONALISM",
        Empiricism => "EMPIRICISM",
        Mysticism => "MYSTICISM",
        Idealism => "IDEALISM",
        Materialism => "MATERIALISM",
        Humanism => "HUMANISM",
    }
}

classification! {
    /// Power class of a creature.
    Tier, "tier" {
        /// Top tier: ritual summon.
        Legendary => "LEGENDARY",
        /// Middle tier: alchemy summon.
        Master => "MASTER",
        /// Free summon.
        Scholar => "SCHOLAR",
    }
}

classification! {
    /// Battle position of a creature.
    Stance, "stance" {
        Attack => "ATTACK",
        Defense => "DEFENSE",
    }
}

classification! {
    /// When a card's effect runs.
    EffectTrigger, "effect trigger" {
        OnSummon => "ON_SUMMON",
        Continuous => "CONTINUOUS",
        Graveyard => "GRAVEYARD",
        Manual => "MANUAL",
        Reactive => "REACTIVE",
        WhenDestroyed => "WHEN_DESTROYED",
    }
}

classification! {
    /// How often a manual effect may run.
    EffectFrequency, "effect frequency" {
        OncePerTurn => "ONCE_PER_TURN",
        OncePerDuel => "ONCE_PER_DUEL",
        Unlimited => "UNLIMITED",
    }
}

impl Stance {
    /// The other stance.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Stance::Attack => Stance::Defense,
            Stance::Defense => Stance::Attack,
        }
    }
}

impl Default for Stance {
    fn default() -> Self {
        Stance::Attack
    }
}

impl Default for EffectTrigger {
    fn default() -> Self {
        EffectTrigger::Manual
    }
}

impl Default for EffectFrequency {
    fn default() -> Self {
        EffectFrequency::OncePerTurn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository_spellings() {
        assert_eq!("CHARACTER".parse::<Category>(), Ok(Category::Creature));
        assert_eq!("discovery".parse::<Category>(), Ok(Category::Instant));
        assert_eq!(" PARADOX ".parse::<Category>(), Ok(Category::Reactive));
        assert_eq!("SPIRITUALITY".parse::<Domain>(), Ok(Domain::Spirituality));
        assert_eq!("MATERIALISM".parse::<School>(), Ok(School::Materialism));
        assert_eq!("MASTER".parse::<Tier>(), Ok(Tier::Master));
        assert_eq!("ON_SUMMON".parse::<EffectTrigger>(), Ok(EffectTrigger::OnSummon));
        assert_eq!(
            "ONCE_PER_DUEL".parse::<EffectFrequency>(),
            Ok(EffectFrequency::OncePerDuel)
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "STOICISM".parse::<School>().unwrap_err();
        assert_eq!(err.kind, "school");
        assert_eq!(err.value, "STOICISM");
    }

    #[test]
    fn test_display_round_trip() {
        for school in School::ALL {
            assert_eq!(school.to_string().parse::<School>(), Ok(*school));
        }
        assert_eq!(Category::Creature.to_string(), "CREATURE");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Stance::default(), Stance::Attack);
        assert_eq!(EffectTrigger::default(), EffectTrigger::Manual);
        assert_eq!(EffectFrequency::default(), EffectFrequency::OncePerTurn);
        assert_eq!(Stance::Attack.toggled(), Stance::Defense);
    }
}
