//! A stand-in hand scorer for the simulator.

use holdem_table::{
    Card, HandScore, HandScorer, Rank,
    constants::{BOARD_SIZE, HAND_SIZE},
};

/// Scores a hand by its highest card, aces high. Suits never matter, so
/// equal high cards split the pot.
#[derive(Clone, Copy, Debug, Default)]
pub struct HighCardScorer;

fn rank_value(rank: Rank) -> u32 {
    match Rank::PLAYABLE.iter().position(|&r| r == rank) {
        Some(0) => Rank::PLAYABLE.len() as u32,
        Some(position) => position as u32,
        None => 0,
    }
}

impl HandScorer for HighCardScorer {
    fn score(&self, board: &[Card; BOARD_SIZE], hole: &[Card; HAND_SIZE]) -> HandScore {
        let best = board
            .iter()
            .chain(hole)
            .filter(|card| !card.is_blank())
            .max_by_key(|card| rank_value(card.rank));

        match best {
            Some(card) => HandScore {
                score: rank_value(card.rank),
                hand_types: vec![format!("{} high", card.rank)],
            },
            None => HandScore::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_table::{Suit, game::card::BLANK_BOARD};

    #[test]
    fn test_ace_beats_king() {
        let ace = [
            Card::new(Rank::Ace, Suit::Club),
            Card::new(Rank::Two, Suit::Heart),
        ];
        let king = [
            Card::new(Rank::King, Suit::Spade),
            Card::new(Rank::Queen, Suit::Spade),
        ];
        let scorer = HighCardScorer;
        let ace = scorer.score(&BLANK_BOARD, &ace);
        let king = scorer.score(&BLANK_BOARD, &king);
        assert!(ace.score > king.score);
        assert_eq!(ace.hand_types, ["A high"]);
    }

    #[test]
    fn test_board_counts() {
        let mut board = BLANK_BOARD;
        board[0] = Card::new(Rank::Ace, Suit::Diamond);
        let hole = [
            Card::new(Rank::Three, Suit::Club),
            Card::new(Rank::Four, Suit::Club),
        ];
        assert_eq!(HighCardScorer.score(&board, &hole).score, 13);
    }
}
