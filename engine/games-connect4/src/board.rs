//! Board state, result detection and move validation.

use std::fmt;

use thiserror::Error;

use crate::moves::{self, Move};
use crate::windows::{tally, WINDOWS};
use crate::{BOARD_SIZE, BOTTOM_ROW, COLS, ROWS};

/// One of the two sides.
///
/// In absolute form `One` is the first player. In relative form `One` is
/// whoever is about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Cell value used for this player's pieces.
    #[inline]
    pub const fn marker(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Outcome of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    Win(Player),
    Draw,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }

    /// Same outcome seen from the negated board.
    pub fn negated(self) -> Self {
        match self {
            GameResult::Win(p) => GameResult::Win(p.other()),
            other => other,
        }
    }

    /// Reward for `player`: +1 win, -1 loss, 0 draw or ongoing.
    pub fn reward_for(self, player: Player) -> f32 {
        match self {
            GameResult::Win(p) if p == player => 1.0,
            GameResult::Win(_) => -1.0,
            _ => 0.0,
        }
    }
}

/// Errors from building a board out of raw cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell {index} holds {value}, expected -1, 0 or 1")]
    InvalidCell { index: usize, value: i8 },

    #[error("piece at ({row}, {col}) is floating above an empty cell")]
    Floating { row: usize, col: usize },
}

/// Reasons a proposed move is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("move places no piece")]
    NoPlacement,

    #[error("move places {0} pieces, expected exactly one")]
    MultiplePlacements(usize),

    #[error("move uses marker {found}, expected {expected}")]
    WrongMarker { expected: i8, found: i8 },

    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("cell ({row}, {col}) has nothing underneath it")]
    Floating { row: usize, col: usize },
}

/// A 6x7 Connect 4 grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Row-major cells, row 0 at the top. Values are -1, 0 or 1.
    cells: [i8; BOARD_SIZE],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
        }
    }

    /// Build a board from flattened cells, checking values and gravity.
    pub fn from_cells(cells: [i8; BOARD_SIZE]) -> Result<Self, BoardError> {
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|&(_, &v)| !(-1..=1).contains(&v))
        {
            return Err(BoardError::InvalidCell { index, value });
        }

        let board = Self { cells };
        if let Some((row, col)) = board.first_floating_piece() {
            return Err(BoardError::Floating { row, col });
        }
        Ok(board)
    }

    /// Build a board from rows listed top to bottom.
    pub fn from_rows(rows: [[i8; COLS]; ROWS]) -> Result<Self, BoardError> {
        let mut cells = [0i8; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            cells[r * COLS..(r + 1) * COLS].copy_from_slice(row);
        }
        Self::from_cells(cells)
    }

    /// Convert row and column to a flattened index
    #[inline]
    pub const fn index(row: usize, col: usize) -> usize {
        row * COLS + col
    }

    #[inline]
    pub fn cells(&self) -> &[i8; BOARD_SIZE] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.cells[Self::index(row, col)]
    }

    /// The same position seen from the other side.
    pub fn negated(&self) -> Self {
        let mut cells = self.cells;
        for cell in &mut cells {
            *cell = -*cell;
        }
        Self { cells }
    }

    /// Number of pieces stacked in `col`.
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS).filter(|&row| self.get(row, col) != 0).count()
    }

    /// Number of pieces that still fit in `col`.
    pub fn remaining_capacity(&self, col: usize) -> usize {
        ROWS - self.column_height(col)
    }

    /// The move landing on top of the stack in `col`, if the column has room.
    pub fn drop_target(&self, col: usize) -> Option<Move> {
        if col >= COLS {
            return None;
        }
        let height = self.column_height(col);
        if height >= ROWS {
            return None;
        }
        Move::at(BOTTOM_ROW - height, col)
    }

    /// Legal moves in ascending column order.
    pub fn legal_moves(&self) -> Vec<Move> {
        moves::legal_moves(self)
    }

    /// Bit-mask of open columns (bit `c` set when column `c` has room).
    pub fn legal_mask(&self) -> u8 {
        (0..COLS).fold(0u8, |mask, col| {
            if self.get(0, col) == 0 {
                mask | (1u8 << col)
            } else {
                mask
            }
        })
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// Return a new board with `marker` placed at `mv`.
    ///
    /// The receiver is left untouched. `mv` is expected to come from
    /// [`Board::legal_moves`] or to have passed [`Board::validate`].
    pub fn apply(&self, mv: Move, marker: i8) -> Board {
        debug_assert_eq!(self.cells[mv.index()], 0, "apply on occupied cell {mv}");
        let mut next = *self;
        next.cells[mv.index()] = marker;
        next
    }

    /// Detect a win along any window, or a draw on a full board.
    pub fn result(&self) -> GameResult {
        for window in WINDOWS.iter() {
            match tally(&self.cells, window) {
                (4, _) => return GameResult::Win(Player::One),
                (_, 4) => return GameResult::Win(Player::Two),
                _ => {}
            }
        }

        if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        }
    }

    /// Whether every piece rests on the bottom row or on another piece.
    pub fn respects_gravity(&self) -> bool {
        self.first_floating_piece().is_none()
    }

    fn first_floating_piece(&self) -> Option<(usize, usize)> {
        for row in 0..BOTTOM_ROW {
            for col in 0..COLS {
                if self.get(row, col) != 0 && self.get(row + 1, col) == 0 {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Validate a placement given by coordinates.
    pub fn validate_at(&self, row: usize, col: usize) -> Result<Move, InvalidMove> {
        let mv = Move::at(row, col).ok_or(InvalidMove::OutOfBounds { row, col })?;
        self.validate(mv)?;
        Ok(mv)
    }

    /// Check that `mv` targets an empty cell that is supported from below.
    pub fn validate(&self, mv: Move) -> Result<(), InvalidMove> {
        let (row, col) = (mv.row(), mv.col());
        if self.get(row, col) != 0 {
            return Err(InvalidMove::Occupied { row, col });
        }
        if row != BOTTOM_ROW && self.get(row + 1, col) == 0 {
            return Err(InvalidMove::Floating { row, col });
        }
        Ok(())
    }

    /// Validate an externally submitted full-board delta.
    ///
    /// The delta must hold exactly one non-zero cell, equal to `marker`, at a
    /// placement accepted by [`Board::validate`].
    pub fn validate_delta(
        &self,
        delta: &[i8; BOARD_SIZE],
        marker: i8,
    ) -> Result<Move, InvalidMove> {
        let mut placed = delta.iter().enumerate().filter(|&(_, &v)| v != 0);

        let (index, &found) = placed.next().ok_or(InvalidMove::NoPlacement)?;
        let extra = placed.count();
        if extra > 0 {
            return Err(InvalidMove::MultiplePlacements(extra + 1));
        }
        if found != marker {
            return Err(InvalidMove::WrongMarker {
                expected: marker,
                found,
            });
        }

        self.validate_at(index / COLS, index % COLS)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\n{self})")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            write!(f, "|")?;
            for col in 0..COLS {
                let symbol = match self.get(row, col) {
                    1 => 'X',
                    -1 => 'O',
                    _ => '_',
                };
                write!(f, "{symbol}|")?;
            }
            writeln!(f)?;
        }
        write!(f, "|")?;
        for col in 0..COLS {
            write!(f, "{col}|")?;
        }
        writeln!(f)
    }
}
