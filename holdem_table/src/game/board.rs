use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    Chips, GameError,
    card::{self, BLANK_BOARD, Card},
    constants::BOARD_SIZE,
};

/// Community state shared by every seat.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub pot: Chips,
    pub min_bet: Chips,
    pub round: u32,
    /// Community cards, filled left to right.
    pub cards: [Card; BOARD_SIZE],
    /// Undealt cards. Popped from the end and never sent to clients.
    #[serde(skip)]
    pub(crate) deck: Vec<Card>,
}

impl Board {
    #[must_use]
    pub fn new(min_bet: Chips) -> Self {
        Self {
            min_bet,
            ..Default::default()
        }
    }

    /// Copy of the board that's safe to hand to a client.
    #[must_use]
    pub fn view(&self) -> Self {
        Self {
            deck: Vec::new(),
            ..self.clone()
        }
    }

    pub fn pop_deck(&mut self) -> Result<Card, GameError> {
        self.deck.pop().ok_or(GameError::DeckEmpty)
    }

    /// Turn over the next community card. Returns `false` once all five
    /// slots are showing.
    pub fn reveal_card(&mut self) -> Result<bool, GameError> {
        let Some(slot) = self.cards.iter().position(Card::is_blank) else {
            return Ok(false);
        };
        self.cards[slot] = self.pop_deck()?;
        Ok(true)
    }

    /// Start a fresh, shuffled deck and clear the community cards.
    pub fn new_deck(&mut self) {
        self.new_deck_with(&mut rand::rng());
    }

    pub fn new_deck_with<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let mut deck = card::full_deck();
        card::shuffle(&mut deck, rng);
        self.deck = deck.to_vec();
        self.cards = BLANK_BOARD;
    }

    /// Number of community cards showing.
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.cards.iter().filter(|card| !card.is_blank()).count()
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }
}
