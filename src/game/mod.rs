//! Core game logic: dual-attribute board, gravity placement, win detection,
//! and session state.

mod board;
mod player;
mod state;

pub use board::{Board, MoveError, Outcome, Piece, Shape, WinCondition, CONNECT, DEFAULT_SIZE};
pub use player::Player;
pub use state::GameState;
