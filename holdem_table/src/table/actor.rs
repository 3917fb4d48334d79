//! Table actor implementation with async message handling.

use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::{
    TableError,
    config::TableConfig,
    messages::{JoinResponse, LeaveResponse, TableMessage, TableStateResponse, ViewResponse},
};
use crate::game::{
    Action, Chips, Game, GameError, GameId, HandScorer, Payout, Phase, Player, PlayerId,
};

/// Cloneable handle for sending commands to one table
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    game_id: GameId,
}

impl TableHandle {
    pub fn new(sender: mpsc::Sender<TableMessage>, game_id: GameId) -> Self {
        Self { sender, game_id }
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// Whether the actor behind this handle has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Whether both handles talk to the same actor
    pub fn same_table(&self, other: &Self) -> bool {
        self.sender.same_channel(&other.sender)
    }

    /// Send a message to the table
    pub async fn send(&self, message: TableMessage) -> Result<(), TableError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableError::Closed(self.game_id.clone()))
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> TableMessage,
    ) -> Result<T, TableError> {
        let (tx, rx) = oneshot::channel();
        self.send(message(tx)).await?;
        rx.await.map_err(|_| TableError::Closed(self.game_id.clone()))
    }

    /// Seat a player, returning how many are now seated
    pub async fn join(&self, player: Player) -> Result<JoinResponse, TableError> {
        Ok(self
            .request(|response| TableMessage::Join { player, response })
            .await??)
    }

    pub async fn leave(&self, player_id: PlayerId) -> Result<LeaveResponse, TableError> {
        self.leave_with(player_id, false).await
    }

    /// Like [`TableHandle::leave`], but the actor shuts down if the table is
    /// left empty.
    pub async fn leave_and_close_if_empty(
        &self,
        player_id: PlayerId,
    ) -> Result<LeaveResponse, TableError> {
        self.leave_with(player_id, true).await
    }

    async fn leave_with(
        &self,
        player_id: PlayerId,
        close_if_empty: bool,
    ) -> Result<LeaveResponse, TableError> {
        Ok(self
            .request(|response| TableMessage::Leave {
                player_id,
                close_if_empty,
                response,
            })
            .await??)
    }

    pub async fn call(&self, player_id: PlayerId) -> Result<(), TableError> {
        Ok(self
            .request(|response| TableMessage::Call {
                player_id,
                response,
            })
            .await??)
    }

    pub async fn act(&self, player_id: PlayerId, action: Action) -> Result<(), TableError> {
        Ok(self
            .request(|response| TableMessage::Act {
                player_id,
                action,
                response,
            })
            .await??)
    }

    pub async fn raise(&self, player_id: PlayerId, amount: Chips) -> Result<(), TableError> {
        Ok(self
            .request(|response| TableMessage::Raise {
                player_id,
                amount,
                response,
            })
            .await??)
    }

    /// Start a new hand. A seed makes the shuffle reproducible.
    pub async fn start_hand(&self, seed: Option<u64>) -> Result<(), TableError> {
        Ok(self
            .request(|response| TableMessage::StartHand { seed, response })
            .await??)
    }

    pub async fn deal_hole_cards(&self) -> Result<(), TableError> {
        Ok(self
            .request(|response| TableMessage::DealHoleCards { response })
            .await??)
    }

    pub async fn reveal_card(&self) -> Result<bool, TableError> {
        Ok(self
            .request(|response| TableMessage::RevealCard { response })
            .await??)
    }

    pub async fn advance_phase(&self) -> Result<Phase, TableError> {
        Ok(self
            .request(|response| TableMessage::AdvancePhase { response })
            .await??)
    }

    pub async fn advance_turn(&self) -> Result<usize, TableError> {
        Ok(self
            .request(|response| TableMessage::AdvanceTurn { response })
            .await??)
    }

    pub async fn collect_bets(&self) -> Result<Chips, TableError> {
        Ok(self
            .request(|response| TableMessage::CollectBets { response })
            .await??)
    }

    pub async fn settle(&self) -> Result<Vec<Payout>, TableError> {
        Ok(self
            .request(|response| TableMessage::Settle { response })
            .await??)
    }

    /// The table as `player_id` sees it, or as an onlooker if `None`.
    ///
    /// Passing the revision from an earlier response gets back no view if
    /// nothing has changed since. Revisions belong to the table, not to a
    /// viewer: a caller that switches `player_id` must pass `since: None`
    /// for the first view from the new seat.
    pub async fn view(
        &self,
        player_id: Option<PlayerId>,
        since: Option<u64>,
    ) -> Result<ViewResponse, TableError> {
        self.request(|response| TableMessage::GetView {
            player_id,
            since,
            response,
        })
        .await
    }

    pub async fn state(&self) -> Result<TableStateResponse, TableError> {
        self.request(|response| TableMessage::GetState { response })
            .await
    }

    pub async fn close(&self) -> Result<(), TableError> {
        self.request(|response| TableMessage::Close { response })
            .await
    }
}

/// Actor owning a single table's game
pub struct TableActor {
    game: Game,

    inbox: mpsc::Receiver<TableMessage>,

    /// Decides who wins at settlement
    scorer: Arc<dyn HandScorer>,

    /// Bumped on every successful mutation
    revision: u64,

    is_closed: bool,
}

impl TableActor {
    /// Create a new table actor and the handle that talks to it.
    ///
    /// The actor does nothing until [`TableActor::run`] is spawned.
    pub fn new(
        game_id: GameId,
        config: &TableConfig,
        scorer: Arc<dyn HandScorer>,
    ) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity);
        let game = Game::new(game_id.clone(), config.min_bet).with_max_players(config.max_players);

        let actor = Self {
            game,
            inbox,
            scorer,
            revision: 0,
            is_closed: false,
        };

        (actor, TableHandle::new(sender, game_id))
    }

    /// Process messages one at a time until closed or every handle is gone.
    pub async fn run(mut self) {
        log::info!("Table {} starting", self.game.id());

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);

            if self.is_closed {
                break;
            }
        }

        log::info!(
            "Table {} closed at revision {}",
            self.game.id(),
            self.revision
        );
    }

    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Join { player, response } => {
                log::debug!("Table {}: {} joining", self.game.id(), player.id);
                let result = self.game.join(player).map(|()| JoinResponse {
                    player_count: self.game.players().len(),
                    revision: self.revision + 1,
                });
                self.commit(response, result);
            }

            TableMessage::Leave {
                player_id,
                close_if_empty,
                response,
            } => {
                log::debug!("Table {}: {} leaving", self.game.id(), player_id);
                let result = self.game.leave(&player_id).map(|player| {
                    let remaining = self.game.players().len();
                    let closed = close_if_empty && remaining == 0;
                    LeaveResponse {
                        player,
                        remaining,
                        closed,
                        revision: self.revision + 1,
                    }
                });
                if let Ok(LeaveResponse { closed: true, .. }) = result {
                    log::info!("Table {} is empty, closing", self.game.id());
                    self.is_closed = true;
                }
                self.commit(response, result);
            }

            TableMessage::Call {
                player_id,
                response,
            } => {
                log::debug!("Table {}: {} calls", self.game.id(), player_id);
                let result = self.game.call(&player_id);
                self.commit(response, result);
            }

            TableMessage::Act {
                player_id,
                action,
                response,
            } => {
                log::debug!("Table {}: {} acts {:?}", self.game.id(), player_id, action);
                let result = self.game.act(&player_id, action);
                self.commit(response, result);
            }

            TableMessage::Raise {
                player_id,
                amount,
                response,
            } => {
                log::debug!("Table {}: {} raises to {}", self.game.id(), player_id, amount);
                let result = self.game.raise(&player_id, amount);
                self.commit(response, result);
            }

            TableMessage::StartHand { seed, response } => {
                log::debug!("Table {}: starting hand", self.game.id());
                match seed {
                    Some(seed) => self.game.start_hand_with(&mut StdRng::seed_from_u64(seed)),
                    None => self.game.start_hand(),
                }
                self.commit(response, Ok(()));
            }

            TableMessage::DealHoleCards { response } => {
                let result = self.game.deal_hole_cards();
                self.commit(response, result);
            }

            TableMessage::RevealCard { response } => {
                let result = self.game.reveal_card();
                self.commit(response, result);
            }

            TableMessage::AdvancePhase { response } => {
                let phase = self.game.advance_phase();
                log::debug!("Table {}: phase is now {}", self.game.id(), phase);
                self.commit(response, Ok(phase));
            }

            TableMessage::AdvanceTurn { response } => {
                let result = self.game.advance_turn();
                self.commit(response, result);
            }

            TableMessage::CollectBets { response } => {
                let result = self.game.collect_bets();
                self.commit(response, result);
            }

            TableMessage::Settle { response } => {
                let result = self.game.settle(self.scorer.as_ref());
                if let Ok(payouts) = &result {
                    log::info!(
                        "Table {}: hand settled with {} winner(s)",
                        self.game.id(),
                        payouts.len()
                    );
                }
                self.commit(response, result);
            }

            TableMessage::GetView {
                player_id,
                since,
                response,
            } => {
                let view = if since == Some(self.revision) {
                    None
                } else {
                    Some(match &player_id {
                        Some(player_id) => self.game.view_for(player_id),
                        None => self.game.view(usize::MAX),
                    })
                };
                let revision = self.revision;
                self.reply(response, ViewResponse { revision, view });
            }

            TableMessage::GetState { response } => {
                let state = self.state();
                self.reply(response, state);
            }

            TableMessage::Close { response } => {
                self.is_closed = true;
                self.reply(response, ());
            }
        }
    }

    fn state(&self) -> TableStateResponse {
        TableStateResponse {
            id: self.game.id().clone(),
            player_count: self.game.players().len(),
            max_players: self.game.max_players(),
            phase: self.game.phase(),
            pot: self.game.board().pot,
            min_bet: self.game.board().min_bet,
            revision: self.revision,
        }
    }

    /// Reply to a command, counting it as a new revision if it succeeded.
    fn commit<T>(
        &mut self,
        response: oneshot::Sender<Result<T, GameError>>,
        result: Result<T, GameError>,
    ) {
        match &result {
            Ok(_) => self.revision += 1,
            Err(err) => log::debug!("Table {}: refused: {}", self.game.id(), err),
        }
        self.reply(response, result);
    }

    fn reply<T>(&self, response: oneshot::Sender<T>, value: T) {
        if response.send(value).is_err() {
            log::warn!(
                "Table {}: requester went away before the reply",
                self.game.id()
            );
        }
    }
}
