//! Contract tests for the alpha-beta search, driven by a take-away game
//! small enough to solve exhaustively and compare against an unpruned
//! reference minimax.

use super::*;
use crate::board::{Board, InvalidMoveError, MoveList, Player, Value, WIN};

/// Take-away game: players alternately remove 1 to 3 sticks from a pile,
/// and the player who takes the last stick wins. A pile that is a multiple
/// of 4 is lost for the player to move under perfect play.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TakeAwayBoard {
    pile: u8,
    history: Vec<TakeAwayMove>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TakeAwayMove {
    take: u8,
}

impl TakeAwayBoard {
    fn new(pile: u8) -> Self {
        Self {
            pile,
            history: Vec::new(),
        }
    }
}

impl Board for TakeAwayBoard {
    type Move = TakeAwayMove;

    fn apply_move(&mut self, candidate: &TakeAwayMove) -> Result<(), InvalidMoveError> {
        if candidate.take == 0 || candidate.take > 3 || candidate.take > self.pile {
            return Err(InvalidMoveError::OutOfBounds);
        }
        self.pile -= candidate.take;
        self.history.push(*candidate);
        Ok(())
    }

    fn undo_move(&mut self) {
        if let Some(last) = self.history.pop() {
            self.pile += last.take;
        }
    }

    fn valid_moves(&self) -> MoveList<TakeAwayMove> {
        (1..=self.pile.min(3))
            .map(|take| TakeAwayMove { take })
            .collect()
    }

    fn current_player(&self) -> Player {
        if self.history.len() % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    fn value(&self) -> Value {
        if self.pile == 0 {
            // The previous player took the last stick and won.
            return match self.current_player() {
                Player::One => -WIN,
                Player::Two => WIN,
            };
        }
        let mover_is_losing = self.pile % 4 == 0;
        match (self.current_player(), mover_is_losing) {
            (Player::One, true) | (Player::Two, false) => -100,
            (Player::One, false) | (Player::Two, true) => 100,
        }
    }

    fn move_history(&self) -> &[TakeAwayMove] {
        &self.history
    }
}

/// Unpruned reference minimax. Returns only the backed-up value.
fn minimax_value<B: Board>(board: &mut B, depth: u8) -> Value {
    let candidates = board.valid_moves();
    if depth == 0 || candidates.is_empty() {
        return board.value();
    }
    let maximizing = board.current_player().is_maximizing();
    let mut best = if maximizing { Value::MIN } else { Value::MAX };
    for candidate in candidates {
        board.apply_move(&candidate).unwrap();
        let child = minimax_value(board, depth - 1);
        board.undo_move();
        best = if maximizing {
            best.max(child)
        } else {
            best.min(child)
        };
    }
    best
}

/// All root moves whose child value equals the unpruned optimum.
fn equal_best_moves<B: Board>(board: &mut B, depth: u8) -> (Value, Vec<B::Move>) {
    let candidates = board.valid_moves();
    assert!(depth > 0 && !candidates.is_empty());
    let maximizing = board.current_player().is_maximizing();

    let mut scored = Vec::new();
    for candidate in candidates {
        board.apply_move(&candidate).unwrap();
        let child = minimax_value(board, depth - 1);
        board.undo_move();
        scored.push((candidate, child));
    }

    let best = scored
        .iter()
        .map(|(_, value)| *value)
        .fold(if maximizing { Value::MIN } else { Value::MAX }, |acc, v| {
            if maximizing {
                acc.max(v)
            } else {
                acc.min(v)
            }
        });

    let moves = scored
        .into_iter()
        .filter(|(_, value)| *value == best)
        .map(|(candidate, _)| candidate)
        .collect();
    (best, moves)
}

#[test]
fn test_depth_zero_returns_static_value_with_no_move() {
    let mut board = TakeAwayBoard::new(5);
    let mut context = SearchContext::new();

    let result = alpha_beta_search(&mut context, &mut board, Value::MIN, Value::MAX, 0);

    assert_eq!(result.best_move, None);
    assert_eq!(result.value, 100, "pile of 5 favors the player to move");
}

#[test]
fn test_terminal_position_returns_static_value_at_any_depth() {
    let mut board = TakeAwayBoard::new(0);
    let mut context = SearchContext::new();

    for depth in [0u8, 1, 5].iter() {
        let result = alpha_beta_search(&mut context, &mut board, Value::MIN, Value::MAX, *depth);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, -WIN, "empty pile means player 2 just won");
    }
}

#[test]
fn test_finds_winning_take_to_leave_multiple_of_four() {
    for &(pile, expected_take) in &[(5u8, 1u8), (6, 2), (7, 3)] {
        let mut board = TakeAwayBoard::new(pile);
        let mut context = SearchContext::new();

        let result = search_best_move(&mut context, &mut board, 10);

        assert_eq!(result.value, WIN, "pile of {} is won for player 1", pile);
        assert_eq!(
            result.best_move,
            Some(TakeAwayMove {
                take: expected_take
            }),
            "from pile of {} the winning reply leaves a multiple of 4",
            pile
        );
    }
}

#[test]
fn test_losing_position_still_returns_a_move() {
    let mut board = TakeAwayBoard::new(4);
    let mut context = SearchContext::new();

    let result = search_best_move(&mut context, &mut board, 10);

    assert_eq!(result.value, -WIN, "pile of 4 is lost for player 1");
    assert!(result.best_move.is_some());
}

#[test]
fn test_pruned_search_matches_unpruned_minimax() {
    for pile in 1..=12u8 {
        for depth in 1..=5u8 {
            let mut board = TakeAwayBoard::new(pile);
            let (reference_value, best_set) = equal_best_moves(&mut board, depth);

            let mut context = SearchContext::new();
            let result = search_best_move(&mut context, &mut board, depth);

            assert_eq!(
                result.value, reference_value,
                "value mismatch at pile {} depth {}",
                pile, depth
            );
            let chosen = result.best_move.expect("nonterminal search returns a move");
            assert!(
                best_set.contains(&chosen),
                "move {:?} at pile {} depth {} is not among the optimal set {:?}",
                chosen,
                pile,
                depth,
                best_set
            );
        }
    }
}

#[test]
fn test_board_restored_after_search_with_cutoffs() {
    let mut board = TakeAwayBoard::new(12);
    let snapshot = board.clone();
    let mut context = SearchContext::new();

    let _ = search_best_move(&mut context, &mut board, 6);

    assert!(
        context.cutoff_count() > 0,
        "a depth 6 search of pile 12 must prune"
    );
    assert_eq!(board, snapshot, "search must leave the board untouched");
    assert!(board.move_history().is_empty());
}

#[test]
fn test_first_move_wins_ties() {
    /// Every position evaluates to zero, so all moves tie.
    #[derive(Debug, Clone)]
    struct FlatBoard {
        history: Vec<u8>,
    }

    impl Board for FlatBoard {
        type Move = u8;

        fn apply_move(&mut self, candidate: &u8) -> Result<(), InvalidMoveError> {
            self.history.push(*candidate);
            Ok(())
        }

        fn undo_move(&mut self) {
            self.history.pop();
        }

        fn valid_moves(&self) -> MoveList<u8> {
            if self.history.len() >= 4 {
                MoveList::new()
            } else {
                [1u8, 2, 3].iter().copied().collect()
            }
        }

        fn current_player(&self) -> Player {
            if self.history.len() % 2 == 0 {
                Player::One
            } else {
                Player::Two
            }
        }

        fn value(&self) -> Value {
            0
        }

        fn move_history(&self) -> &[u8] {
            &self.history
        }
    }

    let mut board = FlatBoard {
        history: Vec::new(),
    };
    let mut context = SearchContext::new();

    let result = search_best_move(&mut context, &mut board, 3);

    assert_eq!(result.value, 0);
    assert_eq!(
        result.best_move,
        Some(1),
        "ties must keep the first move encountered"
    );
}

#[test]
fn test_context_records_and_resets_stats() {
    let mut board = TakeAwayBoard::new(9);
    let mut context = SearchContext::new();

    let result = search_best_move(&mut context, &mut board, 6);

    assert!(context.searched_position_count() > 0);
    assert_eq!(context.last_value(), Some(result.value));
    assert!(context.last_search_duration().is_some());

    context.reset_stats();
    assert_eq!(context.searched_position_count(), 0);
    assert_eq!(context.cutoff_count(), 0);
    assert_eq!(context.last_value(), None);
    assert_eq!(context.last_search_duration(), None);
}

#[test]
fn test_pruning_explores_fewer_positions_than_full_minimax() {
    /// Counts nodes the unpruned reference would visit.
    fn count_minimax_nodes<B: Board>(board: &mut B, depth: u8) -> usize {
        let candidates = board.valid_moves();
        if depth == 0 || candidates.is_empty() {
            return 1;
        }
        let mut nodes = 1;
        for candidate in candidates {
            board.apply_move(&candidate).unwrap();
            nodes += count_minimax_nodes(board, depth - 1);
            board.undo_move();
        }
        nodes
    }

    let mut board = TakeAwayBoard::new(12);
    let unpruned = count_minimax_nodes(&mut board, 6);

    let mut context = SearchContext::new();
    let _ = search_best_move(&mut context, &mut board, 6);

    assert!(
        context.searched_position_count() < unpruned,
        "pruning should visit fewer positions ({} vs {})",
        context.searched_position_count(),
        unpruned
    );
}
