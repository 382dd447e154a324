//! Tic-tac-toe on a 3x3 grid, the smallest conforming board.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, InvalidMoveError, MoveList, ParseMoveError, Player, Value, WIN};

const SIZE: usize = 3;

/// A placement at `row`, `col` (zero-based). The text form is one-based:
/// `"2,3"` places on the middle row, right column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TicTacToeMove {
    row: u8,
    col: u8,
}

impl TicTacToeMove {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row + 1, self.col + 1)
    }
}

impl FromStr for TicTacToeMove {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (row, col) = match (parts.next(), parts.next(), parts.next()) {
            (Some(row), Some(col), None) => (row.trim(), col.trim()),
            _ => return Err(ParseMoveError(s.to_string())),
        };
        let row: usize = row.parse().map_err(|_| ParseMoveError(s.to_string()))?;
        let col: usize = col.parse().map_err(|_| ParseMoveError(s.to_string()))?;
        if row < 1 || row > SIZE || col < 1 || col > SIZE {
            return Err(ParseMoveError(s.to_string()));
        }
        Ok(TicTacToeMove::new(row as u8 - 1, col as u8 - 1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeBoard {
    cells: [[Option<Player>; SIZE]; SIZE],
    current_player: Player,
    history: Vec<TicTacToeMove>,
}

impl TicTacToeBoard {
    pub fn new() -> Self {
        Self {
            cells: [[None; SIZE]; SIZE],
            current_player: Player::One,
            history: Vec::new(),
        }
    }

    fn cell_sign(cell: Option<Player>) -> Value {
        cell.map(|player| Value::from(player.signum())).unwrap_or(0)
    }

    fn is_decided(&self) -> bool {
        self.value().abs() == WIN
    }
}

impl Default for TicTacToeBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for TicTacToeBoard {
    type Move = TicTacToeMove;

    fn apply_move(&mut self, candidate: &TicTacToeMove) -> Result<(), InvalidMoveError> {
        let (row, col) = (usize::from(candidate.row), usize::from(candidate.col));
        if row >= SIZE || col >= SIZE {
            return Err(InvalidMoveError::OutOfBounds);
        }
        if self.is_decided() {
            return Err(InvalidMoveError::GameOver);
        }
        if self.cells[row][col].is_some() {
            return Err(InvalidMoveError::CellOccupied);
        }

        self.cells[row][col] = Some(self.current_player);
        self.current_player = self.current_player.opponent();
        self.history.push(*candidate);
        Ok(())
    }

    fn undo_move(&mut self) {
        if let Some(last) = self.history.pop() {
            self.cells[usize::from(last.row)][usize::from(last.col)] = None;
            self.current_player = self.current_player.opponent();
        }
    }

    fn valid_moves(&self) -> MoveList<TicTacToeMove> {
        if self.is_decided() {
            return MoveList::new();
        }
        let mut moves = MoveList::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col].is_none() {
                    moves.push(TicTacToeMove::new(row as u8, col as u8));
                }
            }
        }
        moves
    }

    fn current_player(&self) -> Player {
        self.current_player
    }

    /// A completed line is decisive. Otherwise the value is the sum of all
    /// line sums, which rewards the side with more open lines in progress.
    fn value(&self) -> Value {
        let size = SIZE as Value;
        let mut total = 0;

        for i in 0..SIZE {
            let mut row_sum = 0;
            let mut col_sum = 0;
            for j in 0..SIZE {
                row_sum += Self::cell_sign(self.cells[i][j]);
                col_sum += Self::cell_sign(self.cells[j][i]);
            }
            if row_sum == size || col_sum == size {
                return WIN;
            }
            if row_sum == -size || col_sum == -size {
                return -WIN;
            }
            total += row_sum + col_sum;
        }

        let mut diagonal = 0;
        let mut anti_diagonal = 0;
        for i in 0..SIZE {
            diagonal += Self::cell_sign(self.cells[i][i]);
            anti_diagonal += Self::cell_sign(self.cells[i][SIZE - 1 - i]);
        }
        if diagonal == size || anti_diagonal == size {
            return WIN;
        }
        if diagonal == -size || anti_diagonal == -size {
            return -WIN;
        }

        total + diagonal + anti_diagonal
    }

    fn move_history(&self) -> &[TicTacToeMove] {
        &self.history
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let glyph = match cell {
                    Some(Player::One) => 'X',
                    Some(Player::Two) => 'O',
                    None => ' ',
                };
                write!(f, "{}", glyph)?;
                if j < SIZE - 1 {
                    write!(f, " | ")?;
                }
            }
            if i < SIZE - 1 {
                write!(f, "\n---------\n")?;
            }
        }
        Ok(())
    }
}
