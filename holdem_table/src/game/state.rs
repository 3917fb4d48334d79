//! The authoritative state of one table.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    Chips, GameError,
    board::Board,
    constants::{HAND_SIZE, MAX_PLAYERS},
    player::{Player, PlayerId},
    rules::{Action, Phase},
    scoring::{HandScore, HandScorer},
};

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Chips paid out to one winner by [`Game::settle`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub player_id: PlayerId,
    pub amount: Chips,
}

fn default_max_players() -> usize {
    MAX_PLAYERS
}

/// A table: the board, the seats in order, whose turn it is and the phase.
///
/// Every command either succeeds or returns an error with the game left
/// exactly as it was. Nothing here locks; callers that share a game across
/// tasks go through [`crate::table::TableActor`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    id: GameId,
    board: Board,
    players: Vec<Player>,
    #[serde(rename = "playerTurnI")]
    player_turn: usize,
    phase: Phase,
    /// The table's minimum bet before any raise; every hand opens at it.
    base_min_bet: Chips,
    #[serde(skip, default = "default_max_players")]
    max_players: usize,
}

impl Game {
    #[must_use]
    pub fn new(id: impl Into<GameId>, min_bet: Chips) -> Self {
        Self {
            id: id.into(),
            board: Board::new(min_bet),
            players: Vec::with_capacity(MAX_PLAYERS),
            player_turn: 0,
            phase: Phase::BuyIn,
            base_min_bet: min_bet,
            max_players: MAX_PLAYERS,
        }
    }

    /// Seat fewer than the default number of players.
    #[must_use]
    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players.min(MAX_PLAYERS);
        self
    }

    #[must_use]
    pub fn id(&self) -> &GameId {
        &self.id
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| &player.id == player_id)
    }

    #[must_use]
    pub fn player_turn(&self) -> usize {
        self.player_turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn base_min_bet(&self) -> Chips {
        self.base_min_bet
    }

    #[must_use]
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn player_idx(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|player| &player.id == player_id)
    }

    fn player_mut(&mut self, player_id: &PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .iter_mut()
            .find(|player| &player.id == player_id)
            .ok_or(GameError::NotFound)
    }

    /// The table as seen from seat `pov`.
    ///
    /// Seats are rotated so `pov` comes first, only `pov`'s hand is visible,
    /// the deck is hidden, and the turn index is relative to the rotated
    /// order. An out-of-range `pov` rotates from seat 0 and shows no hand.
    #[must_use]
    pub fn view(&self, pov: usize) -> Self {
        let num_players = self.players.len();
        let start = if pov < num_players { pov } else { 0 };
        let players = (0..num_players)
            .map(|i| {
                let seat = (start + i) % num_players;
                self.players[seat].view(seat == pov)
            })
            .collect();
        let player_turn = if num_players == 0 {
            0
        } else {
            (self.player_turn % num_players + num_players - start) % num_players
        };
        Self {
            id: self.id.clone(),
            board: self.board.view(),
            players,
            player_turn,
            phase: self.phase,
            base_min_bet: self.base_min_bet,
            max_players: self.max_players,
        }
    }

    /// The table as seen by a player. Unknown players get the view of
    /// someone with no seat.
    #[must_use]
    pub fn view_for(&self, player_id: &PlayerId) -> Self {
        self.view(self.player_idx(player_id).unwrap_or(usize::MAX))
    }

    /// Seat a player at the end of the seating order.
    pub fn join(&mut self, player: Player) -> Result<(), GameError> {
        if self.players.len() >= self.max_players {
            return Err(GameError::Full);
        }
        if self.player_idx(&player.id).is_some() {
            return Err(GameError::Present);
        }
        self.players.push(player);
        Ok(())
    }

    /// Remove a player, keeping the turn index on the same logical seat
    /// where possible.
    pub fn leave(&mut self, player_id: &PlayerId) -> Result<Player, GameError> {
        let player_idx = self.player_idx(player_id).ok_or(GameError::NotFound)?;
        if player_idx == self.players.len() - 1 {
            self.player_turn = 0;
        } else if player_idx < self.player_turn {
            self.player_turn -= 1;
        }
        Ok(self.players.remove(player_idx))
    }

    /// Buy in, or match the current minimum bet.
    pub fn call(&mut self, player_id: &PlayerId) -> Result<(), GameError> {
        let min_bet = self.board.min_bet;
        let player = self.player_mut(player_id)?;
        if player.folded {
            return Err(GameError::Folded);
        }
        if player.bank < min_bet {
            return Err(GameError::Funds);
        }
        player.bought_in = true;
        player.bet = min_bet;
        Ok(())
    }

    /// Take an in-hand action. `Raise` only records intent here; the amount
    /// goes through [`Game::raise`].
    pub fn act(&mut self, player_id: &PlayerId, action: Action) -> Result<(), GameError> {
        if !self.phase.is_valid_action(action) {
            return Err(GameError::Phase);
        }
        let player_idx = self.player_idx(player_id).ok_or(GameError::NotFound)?;
        let player = &self.players[player_idx];
        if !player.bought_in {
            return Err(GameError::BuyIn);
        }
        if player.folded {
            return Err(GameError::Folded);
        }

        match action {
            Action::Check | Action::Raise => {}
            Action::Fold => self.players[player_idx].folded = true,
            Action::Call => self.call(player_id)?,
            Action::None => return Err(GameError::Invalid),
        }

        self.players[player_idx].action = action;
        Ok(())
    }

    /// Raise the minimum bet to `amount`, which the raiser commits.
    pub fn raise(&mut self, player_id: &PlayerId, amount: Chips) -> Result<(), GameError> {
        if !self.phase.is_valid_action(Action::Raise) {
            return Err(GameError::Phase);
        }
        let min_bet = self.board.min_bet;
        let player = self.player_mut(player_id)?;
        if !player.bought_in {
            return Err(GameError::BuyIn);
        }
        if player.folded {
            return Err(GameError::Folded);
        }
        if amount <= min_bet {
            return Err(GameError::RaiseTooSmall { min_bet });
        }
        player.place_bet(amount)?;
        player.action = Action::Raise;
        self.board.min_bet = amount;
        Ok(())
    }

    /// Start a new hand with a freshly shuffled deck.
    pub fn start_hand(&mut self) {
        self.start_hand_with(&mut rand::rng());
    }

    /// Like [`Game::start_hand`], shuffling with the given generator.
    ///
    /// Anything left in the pot carries over. The minimum bet drops back to
    /// the table's base, undoing raises from the last hand.
    pub fn start_hand_with<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.board.new_deck_with(rng);
        self.board.min_bet = self.base_min_bet;
        self.board.round = 0;
        self.phase = Phase::BuyIn;
        self.player_turn = 0;
        for player in &mut self.players {
            player.reset_hand();
        }
    }

    /// Give every seated player their two hole cards.
    pub fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        if self.board.deck_len() < self.players.len() * HAND_SIZE {
            return Err(GameError::DeckEmpty);
        }
        for player in &mut self.players {
            for card in &mut player.cards {
                *card = self.board.pop_deck()?;
            }
        }
        Ok(())
    }

    pub fn reveal_card(&mut self) -> Result<bool, GameError> {
        self.board.reveal_card()
    }

    /// Move to the next phase. When to do so is up to the caller.
    pub fn advance_phase(&mut self) -> Phase {
        self.phase = self.phase.next();
        self.board.round += 1;
        self.phase
    }

    /// Pass the turn to the next seat that hasn't folded.
    pub fn advance_turn(&mut self) -> Result<usize, GameError> {
        let num_players = self.players.len();
        if num_players == 0 {
            return Err(GameError::NotFound);
        }
        let next = (1..=num_players)
            .map(|step| (self.player_turn + step) % num_players)
            .find(|&idx| !self.players[idx].folded);
        if let Some(idx) = next {
            self.player_turn = idx;
        }
        Ok(self.player_turn)
    }

    /// Sum of the outstanding bets, checking each one is covered by its bank.
    fn bets_total(&self) -> Result<Chips, GameError> {
        self.players.iter().try_fold(0, |total: Chips, player| {
            if player.bet > player.bank {
                return Err(GameError::Funds);
            }
            total.checked_add(player.bet).ok_or(GameError::Overflow)
        })
    }

    /// Move every outstanding bet from its player's bank into the pot.
    pub fn collect_bets(&mut self) -> Result<Chips, GameError> {
        let collected = self.bets_total()?;
        let pot = self
            .board
            .pot
            .checked_add(collected)
            .ok_or(GameError::Overflow)?;
        for player in &mut self.players {
            player.bank -= player.bet;
            player.bet = 0;
        }
        self.board.pot = pot;
        Ok(collected)
    }

    /// Score the contending hands and pay out the pot.
    ///
    /// Ties split evenly; leftover chips go one at a time to the winners in
    /// seating order. If nobody is contending the pot stays where it is.
    pub fn settle(&mut self, scorer: &dyn HandScorer) -> Result<Vec<Payout>, GameError> {
        if self.phase != Phase::Winner {
            return Err(GameError::Phase);
        }
        let pot = self
            .board
            .pot
            .checked_add(self.bets_total()?)
            .ok_or(GameError::Overflow)?;

        let scores: Vec<(usize, HandScore)> = (0..self.players.len())
            .filter(|&idx| self.players[idx].bought_in && !self.players[idx].folded)
            .map(|idx| (idx, scorer.score(&self.board.cards, &self.players[idx].cards)))
            .collect();
        let best = scores.iter().map(|(_, hand)| hand.score).max();

        let mut amounts = Vec::new();
        if let Some(best) = best {
            let winners: Vec<usize> = scores
                .iter()
                .filter(|(_, hand)| hand.score == best)
                .map(|&(idx, _)| idx)
                .collect();
            let share = pot / winners.len() as Chips;
            let remainder = (pot % winners.len() as Chips) as usize;
            for (i, idx) in winners.into_iter().enumerate() {
                let amount = if i < remainder { share + 1 } else { share };
                let player = &self.players[idx];
                (player.bank - player.bet)
                    .checked_add(amount)
                    .ok_or(GameError::Overflow)?;
                amounts.push((idx, amount));
            }
        }

        self.collect_bets()?;
        for (idx, HandScore { score, hand_types }) in scores {
            let player = &mut self.players[idx];
            player.score = score;
            player.hand_types = hand_types;
        }
        if amounts.is_empty() {
            return Ok(Vec::new());
        }
        let payouts = amounts
            .into_iter()
            .map(|(idx, amount)| {
                let player = &mut self.players[idx];
                player.bank += amount;
                Payout {
                    player_id: player.id.clone(),
                    amount,
                }
            })
            .collect();
        self.board.pot = 0;
        Ok(payouts)
    }
}
