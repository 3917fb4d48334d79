//! Table game rules and state.
//!
//! Everything in here is synchronous and lock-free. A [`Game`] is a plain
//! value: commands validate first and mutate second, so a refused command
//! leaves it untouched. The [`crate::table`] layer owns games and serializes
//! access to them.

pub mod board;
pub mod card;
pub mod constants;
mod error;
pub mod player;
pub mod rules;
pub mod scoring;
pub mod state;

/// Chip amounts: banks, bets, pots and minimum bets.
pub type Chips = u64;

pub use board::Board;
pub use card::{Card, Rank, Suit};
pub use error::GameError;
pub use player::{Player, PlayerId};
pub use rules::{Action, Phase};
pub use scoring::{HandScore, HandScorer, TieScorer};
pub use state::{Game, GameId, Payout};
