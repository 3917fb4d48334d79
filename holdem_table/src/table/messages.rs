//! Table actor message types.

use serde::Serialize;
use tokio::sync::oneshot;

use crate::game::{Action, Chips, Game, GameError, GameId, Payout, Phase, Player, PlayerId};

/// Reply channel for commands the game may refuse.
pub type Reply<T> = oneshot::Sender<Result<T, GameError>>;

/// Messages that can be sent to a TableActor
#[derive(Debug)]
pub enum TableMessage {
    /// Seat a player
    Join {
        player: Player,
        response: Reply<JoinResponse>,
    },

    /// Unseat a player
    Leave {
        player_id: PlayerId,
        /// Close the table if this empties it
        close_if_empty: bool,
        response: Reply<LeaveResponse>,
    },

    /// Buy in or match the minimum bet
    Call {
        player_id: PlayerId,
        response: Reply<()>,
    },

    /// Check, fold, call or declare a raise
    Act {
        player_id: PlayerId,
        action: Action,
        response: Reply<()>,
    },

    /// Raise to an explicit amount
    Raise {
        player_id: PlayerId,
        amount: Chips,
        response: Reply<()>,
    },

    /// Shuffle a fresh deck and reset every seat for a new hand
    StartHand {
        /// Shuffle deterministically
        seed: Option<u64>,
        response: Reply<()>,
    },

    DealHoleCards {
        response: Reply<()>,
    },

    RevealCard {
        response: Reply<bool>,
    },

    AdvancePhase {
        response: Reply<Phase>,
    },

    AdvanceTurn {
        response: Reply<usize>,
    },

    CollectBets {
        response: Reply<Chips>,
    },

    /// Score the hands and pay out the pot
    Settle {
        response: Reply<Vec<Payout>>,
    },

    /// Get the table as one player (or an onlooker) sees it
    GetView {
        player_id: Option<PlayerId>,
        /// Revision the caller already has. Revisions count changes to the
        /// table, not to any one seat's view of it.
        since: Option<u64>,
        response: oneshot::Sender<ViewResponse>,
    },

    /// Get a summary of the table
    GetState {
        response: oneshot::Sender<TableStateResponse>,
    },

    /// Stop the actor. Queued messages behind this one are dropped.
    Close { response: oneshot::Sender<()> },
}

/// Reply to [`TableMessage::Join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinResponse {
    /// Players seated, including the new one
    pub player_count: usize,

    /// Revision the join was committed at
    pub revision: u64,
}

/// Reply to [`TableMessage::Leave`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveResponse {
    /// The player as they were when they left
    pub player: Player,

    /// Players still seated
    pub remaining: usize,

    /// Whether the actor shut down because the table emptied
    pub closed: bool,

    /// Revision the leave was committed at
    pub revision: u64,
}

/// Reply to [`TableMessage::GetView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewResponse {
    /// Revision the view was taken at
    pub revision: u64,

    /// `None` if nothing changed since the caller's revision
    pub view: Option<Game>,
}

impl ViewResponse {
    pub fn is_modified(&self) -> bool {
        self.view.is_some()
    }
}

/// Table state response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStateResponse {
    pub id: GameId,

    /// Current player count
    pub player_count: usize,

    /// Maximum players
    pub max_players: usize,

    /// Current game phase
    pub phase: Phase,

    /// Current pot size
    pub pot: Chips,

    pub min_bet: Chips,

    /// Successful mutations so far
    pub revision: u64,
}
