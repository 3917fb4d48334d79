//! Table-wide limits and defaults.

use super::Chips;

/// Seats at a single table.
pub const MAX_PLAYERS: usize = 8;

/// Fewest seats a table may be configured with.
pub const MIN_PLAYERS: usize = 2;

/// Cards in a standard deck (the blank card is not part of it).
pub const DECK_SIZE: usize = 52;

/// Community card slots on the board.
pub const BOARD_SIZE: usize = 5;

/// Hole cards per player.
pub const HAND_SIZE: usize = 2;

pub const DEFAULT_MIN_BET: Chips = 10;
pub const DEFAULT_STARTING_BANK: Chips = 1000;
