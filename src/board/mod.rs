//! The board contract: the capability set every playable game exposes to the
//! search engine and the tournament runner.

use std::fmt::Debug;

use smallvec::SmallVec;
use thiserror::Error;

/// Position value, expressed from the perspective of [`Player::One`]. Positive
/// values favor `Player::One`, negative values favor `Player::Two`.
pub type Value = i32;

/// Sentinel value meaning [`Player::One`] has won outright. `-WIN` means
/// [`Player::Two`] has won. Heuristic scores lie strictly between the two.
pub const WIN: Value = 1_000_000;

/// Move lists for the bundled games are small. Inline storage covers the
/// common case; unusually wide positions spill to the heap.
pub type MoveList<M> = SmallVec<[M; 16]>;

/// One of the two sides of a game. `Player::One` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Player {
    One = 1,
    Two = -1,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// `+1` for `Player::One`, `-1` for `Player::Two`.
    #[inline]
    pub fn signum(self) -> i8 {
        self as i8
    }

    /// `Player::One` maximizes the position value, `Player::Two` minimizes it.
    #[inline]
    pub fn is_maximizing(self) -> bool {
        matches!(self, Player::One)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidMoveError {
    #[error("move is outside the board")]
    OutOfBounds,
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("move flips no opposing pieces")]
    NoPiecesFlipped,
    #[error("pass is only legal when no placement is available")]
    IllegalPass,
    #[error("the game is already over")]
    GameOver,
}

/// Error produced when a move cannot be constructed from its text form.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("cannot parse move `{0}`")]
pub struct ParseMoveError(pub String);

/// A two-player, zero-sum game in progress.
///
/// The board owns all game state and enforces the rules. Callers explore the
/// game tree by applying and undoing moves in place; `apply_move` followed by
/// `undo_move` must restore every observable property of the board (cell
/// contents, current player, valid move set, move history). Nested
/// apply/undo sequences must unwind in LIFO order.
pub trait Board {
    /// Opaque, totally-ordered move type. The core never inspects its fields.
    type Move: Clone + Ord + Debug;

    /// Applies a move for the current player and advances the turn. Fails
    /// with [`InvalidMoveError`] when the move is illegal in the current
    /// state, leaving the board untouched.
    fn apply_move(&mut self, candidate: &Self::Move) -> Result<(), InvalidMoveError>;

    /// Reverses the most recently applied move. Does nothing if no moves
    /// have been made.
    fn undo_move(&mut self);

    /// All legal moves for the current player. An empty list means the game
    /// is over.
    fn valid_moves(&self) -> MoveList<Self::Move>;

    fn current_player(&self) -> Player;

    /// The position value in `[-WIN, WIN]`. Exactly `WIN` or `-WIN` marks a
    /// decided game; everything in between is a heuristic estimate.
    fn value(&self) -> Value;

    /// All moves applied so far, oldest first.
    fn move_history(&self) -> &[Self::Move];
}
