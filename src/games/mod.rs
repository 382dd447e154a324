//! Conforming implementations of the board contract, and the registry that
//! exposes them by name.

pub mod registry;
pub mod reversi;
pub mod tic_tac_toe;

pub use registry::{GameEntry, GameSession, SessionError};
pub use reversi::{ReversiBoard, ReversiMove};
pub use tic_tac_toe::{TicTacToeBoard, TicTacToeMove};
