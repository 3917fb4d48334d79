//! Table phases and the actions each phase allows.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::GameError;

/// The table-wide stage of a hand.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Phase {
    #[default]
    BuyIn,
    Check,
    Bet,
    Winner,
}

impl Phase {
    pub const ALL: [Self; 4] = [Self::BuyIn, Self::Check, Self::Bet, Self::Winner];

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::BuyIn => Self::Check,
            Self::Check => Self::Bet,
            Self::Bet => Self::Winner,
            Self::Winner => Self::BuyIn,
        }
    }

    /// Actions a player may take during this phase. Buying in goes through
    /// the dedicated call command, so the buy-in phase has none.
    #[must_use]
    pub const fn valid_actions(self) -> &'static [Action] {
        match self {
            Self::BuyIn | Self::Winner => &[],
            Self::Check => &[Action::Check, Action::Fold, Action::Raise],
            Self::Bet => &[Action::Fold, Action::Call, Action::Raise],
        }
    }

    #[must_use]
    pub fn is_valid_action(self, action: Action) -> bool {
        self.valid_actions().contains(&action)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::BuyIn => "BuyIn",
            Self::Check => "Check",
            Self::Bet => "Bet",
            Self::Winner => "Winner",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Phase {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.to_string() == s)
            .ok_or(GameError::Invalid)
    }
}

/// The last thing a player did this hand.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    /// Nothing yet. Never legal as a move.
    #[default]
    #[serde(rename = "")]
    None,
    Check,
    Fold,
    Call,
    Raise,
}

impl Action {
    pub const ALL: [Self; 5] = [Self::None, Self::Check, Self::Fold, Self::Call, Self::Raise];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::None => "",
            Self::Check => "Check",
            Self::Fold => "Fold",
            Self::Call => "Call",
            Self::Raise => "Raise",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.to_string() == s)
            .ok_or(GameError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_next_cycles() {
        assert_eq!(Phase::BuyIn.next(), Phase::Check);
        assert_eq!(Phase::Check.next(), Phase::Bet);
        assert_eq!(Phase::Bet.next(), Phase::Winner);
        assert_eq!(Phase::Winner.next(), Phase::BuyIn);
        for phase in Phase::ALL {
            assert_eq!(phase.next().next().next().next(), phase);
        }
    }

    #[test]
    fn test_legality_table() {
        use Action::*;
        let expected = [
            (Phase::BuyIn, [false, false, false, false, false]),
            (Phase::Check, [false, true, true, false, true]),
            (Phase::Bet, [false, false, true, true, true]),
            (Phase::Winner, [false, false, false, false, false]),
        ];
        for (phase, row) in expected {
            for (action, legal) in [None, Check, Fold, Call, Raise].into_iter().zip(row) {
                assert_eq!(
                    phase.is_valid_action(action),
                    legal,
                    "{phase} / {action:?}"
                );
            }
        }
    }

    #[test]
    fn test_phase_parse() {
        assert_eq!("Bet".parse::<Phase>(), Ok(Phase::Bet));
        assert_eq!("bet".parse::<Phase>(), Err(GameError::Invalid));
        assert_eq!("".parse::<Phase>(), Err(GameError::Invalid));
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("Raise".parse::<Action>(), Ok(Action::Raise));
        assert_eq!("".parse::<Action>(), Ok(Action::None));
        assert_eq!("AllIn".parse::<Action>(), Err(GameError::Invalid));
    }

    #[test]
    fn test_action_json() {
        assert_eq!(serde_json::to_string(&Action::Fold).unwrap(), "\"Fold\"");
        assert_eq!(serde_json::to_string(&Action::None).unwrap(), "\"\"");
        assert_eq!(serde_json::from_str::<Phase>("\"Winner\"").unwrap(), Phase::Winner);
        assert!(serde_json::from_str::<Action>("\"Bluff\"").is_err());
    }
}
