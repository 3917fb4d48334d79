//! # Holdem Table
//!
//! The authoritative state of multi-player Texas Hold'em tables: seating,
//! buy-ins, checks, folds, calls and raises gated by the table phase, dealing
//! from a shuffled deck, collecting bets into the pot and paying it out.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, phases, players and the [`Game`] aggregate. Pure and
//!   synchronous.
//! - [`table`]: one actor task per table and a [`TableManager`] registry, so
//!   many callers can drive the same table safely.
//!
//! Hand evaluation is pluggable through [`HandScorer`].
//!
//! ## Example
//!
//! ```
//! use holdem_table::{Action, Game, Player, PlayerId};
//!
//! let mut game = Game::new("table-1", 10);
//! game.join(Player::new("p1", "Alice", 100)).unwrap();
//! game.join(Player::new("p2", "Bob", 100)).unwrap();
//! game.start_hand();
//! game.call(&PlayerId::new("p1")).unwrap();
//! game.call(&PlayerId::new("p2")).unwrap();
//! game.deal_hole_cards().unwrap();
//! game.advance_phase();
//! game.act(&PlayerId::new("p2"), Action::Check).unwrap();
//!
//! let view = game.view_for(&PlayerId::new("p2"));
//! assert_eq!(view.players()[0].id, PlayerId::new("p2"));
//! ```

/// Game rules, entities and the table state.
pub mod game;
pub use game::{
    Action, Board, Card, Chips, Game, GameError, GameId, HandScore, HandScorer, Payout, Phase,
    Player, PlayerId, Rank, Suit, TieScorer, constants,
};

/// Actor-per-table concurrency and the table registry.
pub mod table;
pub use table::{TableConfig, TableError, TableHandle, TableManager};
