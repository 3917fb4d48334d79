use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Chips;

/// Every way a table command can be refused.
///
/// None of these indicate corrupted state: whichever `Game`, `Board` or
/// `Player` the command targeted is left exactly as it was.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("table is full")]
    Full,
    #[error("player already seated")]
    Present,
    #[error("player not found")]
    NotFound,
    #[error("player has folded")]
    Folded,
    #[error("insufficient funds")]
    Funds,
    #[error("player has not bought in")]
    BuyIn,
    #[error("action not allowed in this phase")]
    Phase,
    #[error("invalid value")]
    Invalid,
    #[error("invalid rank")]
    InvalidRank,
    #[error("invalid suit")]
    InvalidSuit,
    #[error("deck has run out of cards")]
    DeckEmpty,
    #[error("chip total does not fit in a bank or pot")]
    Overflow,
    #[error("raise must exceed the minimum bet of ${min_bet}")]
    RaiseTooSmall { min_bet: Chips },
}
