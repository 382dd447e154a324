//! Common types re-exported for convenience.

pub use crate::board::{Board, InvalidMoveError, MoveList, ParseMoveError, Player, Value, WIN};
pub use crate::games::{ReversiBoard, ReversiMove, TicTacToeBoard, TicTacToeMove};
pub use crate::search::{alpha_beta_search, search_best_move, SearchContext, SearchResult};
pub use crate::tournament::{
    run_bracket, run_match, BracketNode, BracketOutcome, Entrant, MatchConfig, MatchReport,
    TournamentError,
};
