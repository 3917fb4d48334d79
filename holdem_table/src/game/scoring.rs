//! The seam where hand evaluation plugs in.
//!
//! Working out who won is not this crate's job. `Game::settle` asks a
//! [`HandScorer`] for a score per contending hand and pays the highest.

use serde::{Deserialize, Serialize};

use super::{
    card::Card,
    constants::{BOARD_SIZE, HAND_SIZE},
};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandScore {
    /// Higher wins. Equal scores split the pot.
    pub score: u32,
    /// Human-readable description of what the hand made.
    pub hand_types: Vec<String>,
}

pub trait HandScorer: Send + Sync {
    fn score(&self, board: &[Card; BOARD_SIZE], hole: &[Card; HAND_SIZE]) -> HandScore;
}

/// Scores every hand the same, so every contender splits the pot.
#[derive(Clone, Copy, Debug, Default)]
pub struct TieScorer;

impl HandScorer for TieScorer {
    fn score(&self, _board: &[Card; BOARD_SIZE], _hole: &[Card; HAND_SIZE]) -> HandScore {
        HandScore::default()
    }
}
