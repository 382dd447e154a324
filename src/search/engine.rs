//! Minimax search with alpha-beta pruning.
//!
//! The search is generic over the [`Board`] contract and explores the game
//! tree by mutating a single board in place: every candidate move is applied,
//! the child position searched recursively, and the move undone before the
//! next candidate is considered. The [alpha, beta] window carries the best
//! scores already guaranteed to each side; once the best value found at a
//! node reaches the opposing bound, the remaining siblings are pruned.
//!
//! Decisive values are not adjusted for distance: a win two plies away and a
//! win ten plies away score identically, so the search is indifferent among
//! winning lines.

use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Player, Value};

/// Result of searching one position: the backed-up value and the move that
/// achieves it. `best_move` is `None` exactly when the search bottomed out
/// with a static evaluation, which at the root (searched with full-width
/// bounds and positive depth) happens only for a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
    pub value: Value,
    pub best_move: Option<M>,
}

impl<M> SearchResult<M> {
    fn leaf(value: Value) -> Self {
        Self {
            value,
            best_move: None,
        }
    }
}

/// Statistics carried across searches. One context belongs to one agent.
#[derive(Debug, Default)]
pub struct SearchContext {
    searched_position_count: usize,
    cutoff_count: usize,
    last_value: Option<Value>,
    last_duration: Option<Duration>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn searched_position_count(&self) -> usize {
        self.searched_position_count
    }

    pub fn cutoff_count(&self) -> usize {
        self.cutoff_count
    }

    pub fn last_value(&self) -> Option<Value> {
        self.last_value
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    pub fn reset_stats(&mut self) {
        self.searched_position_count = 0;
        self.cutoff_count = 0;
        self.last_value = None;
        self.last_duration = None;
    }

    fn increment_position_count(&mut self) {
        self.searched_position_count += 1;
    }

    fn increment_cutoff_count(&mut self) {
        self.cutoff_count += 1;
    }

    fn record_result(&mut self, value: Value, duration: Duration) {
        self.last_value = Some(value);
        self.last_duration = Some(duration);
    }
}

/// Applies a move, executes a closure on the child position, then undoes the
/// move. Every search path goes through here so that no early return can
/// leave a move on the board.
fn with_move_applied<B, F, R>(candidate: &B::Move, board: &mut B, f: F) -> R
where
    B: Board + ?Sized,
    F: FnOnce(&mut B) -> R,
{
    board
        .apply_move(candidate)
        .expect("move from valid_moves should apply in search");

    let result = f(board);

    board.undo_move();
    result
}

/// Searches the position to the given depth with full-width bounds and
/// records timing on the context.
pub fn search_best_move<B>(
    context: &mut SearchContext,
    board: &mut B,
    depth: u8,
) -> SearchResult<B::Move>
where
    B: Board + ?Sized,
{
    let start = Instant::now();
    let result = alpha_beta_search(context, board, Value::MIN, Value::MAX, depth);
    context.record_result(result.value, start.elapsed());

    debug!(
        "depth {} search: value {}, {} positions, {} cutoffs",
        depth,
        result.value,
        context.searched_position_count(),
        context.cutoff_count()
    );

    result
}

/// Core recursive minimax with alpha-beta pruning.
///
/// `alpha` and `beta` are the best values already guaranteed to the
/// maximizing and minimizing player respectively; the initial call uses the
/// widest possible bounds. `depth` is the remaining ply budget. A depth of
/// zero, or a position with no legal moves, returns the static value with no
/// move attached.
///
/// The first move achieving the best value is kept; later ties do not
/// replace it. The board is restored to its entry state before every return,
/// including on the pruning path.
pub fn alpha_beta_search<B>(
    context: &mut SearchContext,
    board: &mut B,
    alpha: Value,
    beta: Value,
    depth: u8,
) -> SearchResult<B::Move>
where
    B: Board + ?Sized,
{
    context.increment_position_count();

    let candidates = board.valid_moves();
    if depth == 0 || candidates.is_empty() {
        return SearchResult::leaf(board.value());
    }

    match board.current_player() {
        Player::One => {
            let mut best = SearchResult {
                value: alpha,
                best_move: None,
            };
            for candidate in candidates {
                let child = with_move_applied(&candidate, board, |board| {
                    alpha_beta_search(context, board, best.value, beta, depth - 1)
                });
                if child.value > best.value {
                    best.value = child.value;
                    best.best_move = Some(candidate);
                }
                if best.value >= beta {
                    context.increment_cutoff_count();
                    return best;
                }
            }
            best
        }
        Player::Two => {
            let mut best = SearchResult {
                value: beta,
                best_move: None,
            };
            for candidate in candidates {
                let child = with_move_applied(&candidate, board, |board| {
                    alpha_beta_search(context, board, alpha, best.value, depth - 1)
                });
                if child.value < best.value {
                    best.value = child.value;
                    best.best_move = Some(candidate);
                }
                if best.value <= alpha {
                    context.increment_cutoff_count();
                    return best;
                }
            }
            best
        }
    }
}
