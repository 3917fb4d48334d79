//! Tables shared between tasks.
//!
//! Each table runs in its own Tokio task with an mpsc inbox, so every
//! command and every view on one table happens in order on one task. The
//! [`TableManager`] spawns and tracks those tasks and is passed to whatever
//! needs to find a table by id.
//!
//! ## Example
//!
//! ```no_run
//! use holdem_table::table::{TableConfig, TableManager};
//! use holdem_table::game::{Player, TieScorer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), holdem_table::table::TableError> {
//!     let manager = TableManager::new(TableConfig::default(), Arc::new(TieScorer))?;
//!     let game_id = manager.create_game().await;
//!     manager.join_game(&game_id, Player::new("p1", "Alice", 1000)).await?;
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod config;
pub mod manager;
pub mod messages;

use thiserror::Error;

use crate::game::{GameError, GameId};

pub use actor::{TableActor, TableHandle};
pub use config::{ConfigError, TableConfig};
pub use manager::{TableManager, TableMetadata};
pub use messages::{JoinResponse, LeaveResponse, TableMessage, TableStateResponse, ViewResponse};

/// Errors from the table layer
#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("no such table: {0}")]
    NotFound(GameId),

    #[error("table {0} is closed")]
    Closed(GameId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
