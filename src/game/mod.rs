//! Core Gomoku rules: board representation, player types, and the game
//! state machine. Nothing in here logs or touches the terminal.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Position, BOARD_SIZE, WIN_LENGTH};
pub use player::Player;
pub use state::{GameState, MoveError, Placement};
