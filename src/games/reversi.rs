//! Reversi (othello) on an 8x8 board.
//!
//! A player with no capturing placement must pass; two consecutive passes end
//! the game, which is then scored by disc count. Flipped discs are recorded
//! in a private undo log so that moves can be reversed exactly, including the
//! pass counter.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::board::{Board, InvalidMoveError, MoveList, ParseMoveError, Player, Value, WIN};

const DIM: usize = 8;

/// The 8 board directions, clockwise from north.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Positional weights: corners are precious, cells adjacent to corners and
/// edges are liabilities because they hand the corner to the opponent.
const WEIGHTS: [[Value; DIM]; DIM] = [
    [5, -1, 3, 3, 3, 3, -1, 5],
    [-1, -1, -1, -1, -1, -1, -1, -1],
    [3, -1, 1, 1, 1, 1, -1, 3],
    [3, -1, 1, 1, 1, 1, -1, 3],
    [3, -1, 1, 1, 1, 1, -1, 3],
    [3, -1, 1, 1, 1, 1, -1, 3],
    [-1, -1, -1, -1, -1, -1, -1, -1],
    [5, -1, 3, 3, 3, 3, -1, 5],
];

/// A placement at `row`, `col` (zero-based) or a pass. The text forms are
/// the one-based `"3,4"` and the literal `"pass"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReversiMove {
    Pass,
    Place { row: u8, col: u8 },
}

impl ReversiMove {
    pub fn place(row: u8, col: u8) -> Self {
        ReversiMove::Place { row, col }
    }
}

impl fmt::Display for ReversiMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReversiMove::Pass => write!(f, "pass"),
            ReversiMove::Place { row, col } => write!(f, "{},{}", row + 1, col + 1),
        }
    }
}

impl FromStr for ReversiMove {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "pass" {
            return Ok(ReversiMove::Pass);
        }
        let mut parts = s.split(',');
        let (row, col) = match (parts.next(), parts.next(), parts.next()) {
            (Some(row), Some(col), None) => (row.trim(), col.trim()),
            _ => return Err(ParseMoveError(s.to_string())),
        };
        let row: usize = row.parse().map_err(|_| ParseMoveError(s.to_string()))?;
        let col: usize = col.parse().map_err(|_| ParseMoveError(s.to_string()))?;
        if row < 1 || row > DIM || col < 1 || col > DIM {
            return Err(ParseMoveError(s.to_string()));
        }
        Ok(ReversiMove::place(row as u8 - 1, col as u8 - 1))
    }
}

/// Per-move reversal record: which directions flipped how many discs, and
/// the pass counter before the move.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UndoRecord {
    flips: SmallVec<[(usize, u8); 8]>,
    prior_pass_count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversiBoard {
    cells: [[Option<Player>; DIM]; DIM],
    current_player: Player,
    pass_count: u8,
    history: Vec<ReversiMove>,
    undo_log: Vec<UndoRecord>,
}

impl ReversiBoard {
    pub fn new() -> Self {
        let mut cells = [[None; DIM]; DIM];
        let center = DIM / 2;
        cells[center - 1][center - 1] = Some(Player::Two);
        cells[center][center] = Some(Player::Two);
        cells[center - 1][center] = Some(Player::One);
        cells[center][center - 1] = Some(Player::One);
        Self {
            cells,
            current_player: Player::One,
            pass_count: 0,
            history: Vec::new(),
            undo_log: Vec::new(),
        }
    }

    fn in_bounds(row: i8, col: i8) -> bool {
        row >= 0 && (row as usize) < DIM && col >= 0 && (col as usize) < DIM
    }

    /// Number of opposing discs that placing at `row`, `col` would flip in
    /// the given direction, or zero if the line is not bracketed.
    fn capture_count(&self, row: usize, col: usize, dir: (i8, i8)) -> u8 {
        let opponent = self.current_player.opponent();
        let mut r = row as i8 + dir.0;
        let mut c = col as i8 + dir.1;
        let mut count = 0;
        while Self::in_bounds(r, c) && self.cells[r as usize][c as usize] == Some(opponent) {
            r += dir.0;
            c += dir.1;
            count += 1;
        }
        if count > 0
            && Self::in_bounds(r, c)
            && self.cells[r as usize][c as usize] == Some(self.current_player)
        {
            count
        } else {
            0
        }
    }

    fn can_place_at(&self, row: usize, col: usize) -> bool {
        self.cells[row][col].is_none()
            && DIRECTIONS
                .iter()
                .any(|&dir| self.capture_count(row, col, dir) > 0)
    }

    fn has_any_placement(&self) -> bool {
        (0..DIM).any(|row| (0..DIM).any(|col| self.can_place_at(row, col)))
    }

    fn disc_differential(&self) -> Value {
        let mut diff = 0;
        for row in self.cells.iter() {
            for cell in row.iter() {
                diff += cell.map(|player| Value::from(player.signum())).unwrap_or(0);
            }
        }
        diff
    }
}

impl Default for ReversiBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for ReversiBoard {
    type Move = ReversiMove;

    fn apply_move(&mut self, candidate: &ReversiMove) -> Result<(), InvalidMoveError> {
        if self.pass_count >= 2 {
            return Err(InvalidMoveError::GameOver);
        }

        let record = match *candidate {
            ReversiMove::Pass => {
                if self.has_any_placement() {
                    return Err(InvalidMoveError::IllegalPass);
                }
                let record = UndoRecord {
                    flips: SmallVec::new(),
                    prior_pass_count: self.pass_count,
                };
                self.pass_count += 1;
                record
            }
            ReversiMove::Place { row, col } => {
                let (row, col) = (usize::from(row), usize::from(col));
                if row >= DIM || col >= DIM {
                    return Err(InvalidMoveError::OutOfBounds);
                }
                if self.cells[row][col].is_some() {
                    return Err(InvalidMoveError::CellOccupied);
                }

                let mut flips: SmallVec<[(usize, u8); 8]> = SmallVec::new();
                for (dir_index, &dir) in DIRECTIONS.iter().enumerate() {
                    let count = self.capture_count(row, col, dir);
                    if count > 0 {
                        flips.push((dir_index, count));
                    }
                }
                if flips.is_empty() {
                    return Err(InvalidMoveError::NoPiecesFlipped);
                }

                for &(dir_index, count) in flips.iter() {
                    let dir = DIRECTIONS[dir_index];
                    for step in 1..=count as i8 {
                        let r = (row as i8 + step * dir.0) as usize;
                        let c = (col as i8 + step * dir.1) as usize;
                        self.cells[r][c] = Some(self.current_player);
                    }
                }
                self.cells[row][col] = Some(self.current_player);

                let record = UndoRecord {
                    flips,
                    prior_pass_count: self.pass_count,
                };
                self.pass_count = 0;
                record
            }
        };

        self.undo_log.push(record);
        self.history.push(*candidate);
        self.current_player = self.current_player.opponent();
        Ok(())
    }

    fn undo_move(&mut self) {
        let (last, record) = match (self.history.pop(), self.undo_log.pop()) {
            (Some(last), Some(record)) => (last, record),
            _ => return,
        };
        self.current_player = self.current_player.opponent();
        self.pass_count = record.prior_pass_count;

        if let ReversiMove::Place { row, col } = last {
            let (row, col) = (usize::from(row), usize::from(col));
            self.cells[row][col] = None;
            let opponent = self.current_player.opponent();
            for &(dir_index, count) in record.flips.iter() {
                let dir = DIRECTIONS[dir_index];
                for step in 1..=count as i8 {
                    let r = (row as i8 + step * dir.0) as usize;
                    let c = (col as i8 + step * dir.1) as usize;
                    self.cells[r][c] = Some(opponent);
                }
            }
        }
    }

    fn valid_moves(&self) -> MoveList<ReversiMove> {
        if self.pass_count >= 2 {
            return MoveList::new();
        }
        let mut moves = MoveList::new();
        for row in 0..DIM {
            for col in 0..DIM {
                if self.can_place_at(row, col) {
                    moves.push(ReversiMove::place(row as u8, col as u8));
                }
            }
        }
        if moves.is_empty() {
            moves.push(ReversiMove::Pass);
        }
        moves
    }

    fn current_player(&self) -> Player {
        self.current_player
    }

    /// After a double pass the game is scored by disc majority. Until then
    /// the value is the weighted sum of occupied cells.
    fn value(&self) -> Value {
        if self.pass_count >= 2 {
            let diff = self.disc_differential();
            return if diff > 0 {
                WIN
            } else if diff < 0 {
                -WIN
            } else {
                0
            };
        }

        let mut value = 0;
        for row in 0..DIM {
            for col in 0..DIM {
                if let Some(player) = self.cells[row][col] {
                    value += Value::from(player.signum()) * WEIGHTS[row][col];
                }
            }
        }
        value
    }

    fn move_history(&self) -> &[ReversiMove] {
        &self.history
    }
}

impl fmt::Display for ReversiBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  1 2 3 4 5 6 7 8")?;
        for (i, row) in self.cells.iter().enumerate() {
            write!(f, "{} ", i + 1)?;
            for cell in row.iter() {
                let glyph = match cell {
                    Some(Player::One) => "X ",
                    Some(Player::Two) => "O ",
                    None => ". ",
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        let mover = match self.current_player {
            Player::One => 'X',
            Player::Two => 'O',
        };
        write!(f, "Current player is {}", mover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{search_best_move, SearchContext};

    #[test]
    fn test_starting_position() {
        let board = ReversiBoard::new();
        assert_eq!(board.cells[3][3], Some(Player::Two));
        assert_eq!(board.cells[4][4], Some(Player::Two));
        assert_eq!(board.cells[3][4], Some(Player::One));
        assert_eq!(board.cells[4][3], Some(Player::One));
        assert_eq!(board.current_player(), Player::One);
        assert_eq!(board.value(), 0);
    }

    #[test]
    fn test_four_opening_moves_in_scan_order() {
        let board = ReversiBoard::new();
        let moves = board.valid_moves();
        assert_eq!(
            moves.as_slice(),
            &[
                ReversiMove::place(2, 3),
                ReversiMove::place(3, 2),
                ReversiMove::place(4, 5),
                ReversiMove::place(5, 4),
            ]
        );
    }

    #[test]
    fn test_placement_flips_the_bracketed_disc() {
        let mut board = ReversiBoard::new();
        board.apply_move(&ReversiMove::place(2, 3)).unwrap();

        assert_eq!(board.cells[2][3], Some(Player::One));
        assert_eq!(board.cells[3][3], Some(Player::One), "bracketed disc flips");
        assert_eq!(board.current_player(), Player::Two);
        // Four discs for the mover, one left for the opponent, all weight 1.
        assert_eq!(board.value(), 3);
    }

    #[test]
    fn test_undo_restores_the_exact_position() {
        let mut board = ReversiBoard::new();
        let snapshot = board.clone();

        board.apply_move(&ReversiMove::place(2, 3)).unwrap();
        board.undo_move();

        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_rejects_captureless_and_occupied_placements() {
        let mut board = ReversiBoard::new();
        assert_eq!(
            board.apply_move(&ReversiMove::place(0, 0)),
            Err(InvalidMoveError::NoPiecesFlipped)
        );
        assert_eq!(
            board.apply_move(&ReversiMove::place(3, 3)),
            Err(InvalidMoveError::CellOccupied)
        );
        assert_eq!(
            board.apply_move(&ReversiMove::Pass),
            Err(InvalidMoveError::IllegalPass)
        );
    }

    #[test]
    fn test_forced_pass_and_double_pass_scoring() {
        // A lone disc for player 1 leaves neither side a capture.
        let mut board = ReversiBoard::new();
        board.cells = [[None; DIM]; DIM];
        board.cells[0][0] = Some(Player::One);
        board.current_player = Player::Two;

        assert_eq!(board.valid_moves().as_slice(), &[ReversiMove::Pass]);
        board.apply_move(&ReversiMove::Pass).unwrap();
        assert_eq!(board.pass_count, 1);

        assert_eq!(board.valid_moves().as_slice(), &[ReversiMove::Pass]);
        board.apply_move(&ReversiMove::Pass).unwrap();

        assert!(board.valid_moves().is_empty(), "double pass ends the game");
        assert_eq!(board.value(), WIN, "player 1 holds the only disc");
        assert_eq!(
            board.apply_move(&ReversiMove::place(5, 5)),
            Err(InvalidMoveError::GameOver)
        );
    }

    #[test]
    fn test_undoing_passes_restores_the_pass_count() {
        let mut board = ReversiBoard::new();
        board.cells = [[None; DIM]; DIM];
        board.cells[0][0] = Some(Player::One);
        board.current_player = Player::Two;
        let snapshot = board.clone();

        board.apply_move(&ReversiMove::Pass).unwrap();
        board.apply_move(&ReversiMove::Pass).unwrap();
        board.undo_move();
        assert_eq!(board.pass_count, 1);
        board.undo_move();

        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_move_text_round_trip() {
        let parsed: ReversiMove = "3,4".parse().unwrap();
        assert_eq!(parsed, ReversiMove::place(2, 3));
        assert_eq!(parsed.to_string(), "3,4");

        assert_eq!("pass".parse::<ReversiMove>(), Ok(ReversiMove::Pass));
        assert_eq!(ReversiMove::Pass.to_string(), "pass");

        assert!("9,1".parse::<ReversiMove>().is_err());
        assert!("3".parse::<ReversiMove>().is_err());
    }

    #[test]
    fn test_pass_sorts_before_placements() {
        assert!(ReversiMove::Pass < ReversiMove::place(0, 0));
        assert!(ReversiMove::place(1, 7) < ReversiMove::place(2, 0));
    }

    #[test]
    fn test_search_leaves_the_board_untouched() {
        let mut board = ReversiBoard::new();
        board.apply_move(&ReversiMove::place(2, 3)).unwrap();
        let snapshot = board.clone();
        let mut context = SearchContext::new();

        let result = search_best_move(&mut context, &mut board, 4);

        assert!(result.best_move.is_some());
        assert_eq!(board, snapshot);
    }
}
