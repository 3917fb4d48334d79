use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    Chips, GameError,
    card::{BLANK_HAND, Card},
    constants::HAND_SIZE,
    rules::Action,
};

/// Stable identity of a seated player.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One seat's state.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub cards: [Card; HAND_SIZE],
    /// Written by the scoring collaborator at the end of a hand.
    pub score: u32,
    pub hand_types: Vec<String>,
    pub bought_in: bool,
    pub folded: bool,
    pub action: Action,
    pub bet: Chips,
    pub bank: Chips,
}

impl Player {
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, bank: Chips) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cards: BLANK_HAND,
            score: 0,
            hand_types: Vec::new(),
            bought_in: false,
            folded: false,
            action: Action::None,
            bet: 0,
            bank,
        }
    }

    /// The player as some seat sees them. Only the owner sees the hand and
    /// its score.
    #[must_use]
    pub fn view(&self, self_pov: bool) -> Self {
        let mut player = self.clone();
        if !self_pov {
            player.cards = BLANK_HAND;
            player.score = 0;
            player.hand_types.clear();
        }
        player
    }

    /// Set the player's bet, provided their bank covers it.
    pub fn place_bet(&mut self, bet: Chips) -> Result<(), GameError> {
        if bet > self.bank {
            return Err(GameError::Funds);
        }
        self.bet = bet;
        Ok(())
    }

    /// Clear everything that only lasts for one hand.
    pub fn reset_hand(&mut self) {
        self.cards = BLANK_HAND;
        self.score = 0;
        self.hand_types.clear();
        self.bought_in = false;
        self.folded = false;
        self.action = Action::None;
        self.bet = 0;
    }

    #[must_use]
    pub fn has_cards(&self) -> bool {
        self.cards.iter().any(|card| !card.is_blank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{Rank, Suit};

    fn dealt_player() -> Player {
        let mut player = Player::new("p1", "Alice", 100);
        player.cards = [
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Spade),
        ];
        player.score = 9;
        player.hand_types = vec!["flush".to_string()];
        player
    }

    #[test]
    fn test_new_player() {
        let player = Player::new("p1", "Alice", 100);
        assert_eq!(player.id.as_str(), "p1");
        assert_eq!(player.cards, BLANK_HAND);
        assert!(!player.bought_in && !player.folded);
        assert_eq!(player.action, Action::None);
        assert_eq!(player.bank, 100);
    }

    #[test]
    fn test_view_self_keeps_hand() {
        let player = dealt_player();
        assert_eq!(player.view(true), player);
    }

    #[test]
    fn test_view_other_hides_hand() {
        let player = dealt_player();
        let view = player.view(false);
        assert_eq!(view.cards, BLANK_HAND);
        assert_eq!(view.score, 0);
        assert!(view.hand_types.is_empty());
        assert_eq!(view.bank, player.bank);
        assert_eq!(view.name, player.name);
        // The source is untouched.
        assert!(player.has_cards());
    }

    #[test]
    fn test_place_bet_within_bank() {
        let mut player = Player::new("p1", "Alice", 100);
        assert_eq!(player.place_bet(40), Ok(()));
        assert_eq!(player.bet, 40);
        assert_eq!(player.place_bet(100), Ok(()));
        assert_eq!(player.bet, 100);
    }

    // Affordable bets must be accepted and unaffordable ones refused; the
    // comparison is easy to get backwards.
    #[test]
    fn test_place_bet_over_bank_regression() {
        let mut player = Player::new("p1", "Alice", 100);
        assert_eq!(player.place_bet(101), Err(GameError::Funds));
        assert_eq!(player.bet, 0);
        assert_eq!(player.place_bet(99), Ok(()));
    }

    #[test]
    fn test_reset_hand_keeps_identity_and_bank() {
        let mut player = dealt_player();
        player.bought_in = true;
        player.folded = true;
        player.action = Action::Fold;
        player.bet = 20;
        player.reset_hand();
        assert_eq!(player, Player::new("p1", "Alice", 100));
    }

    #[test]
    fn test_player_json_names() {
        let json = serde_json::to_value(Player::new("p1", "Alice", 100)).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["boughtIn"], false);
        assert_eq!(json["handTypes"], serde_json::json!([]));
        assert_eq!(json["cards"], serde_json::json!(["  ", "  "]));
        assert_eq!(json["action"], "");
    }
}
