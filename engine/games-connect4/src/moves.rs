//! Moves and legal move generation.

use std::fmt;

use crate::board::Board;
use crate::{BOARD_SIZE, COLS, ROWS};

/// A single piece placement at `(row, col)`.
///
/// Generated moves always target the lowest open cell of their column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    row: u8,
    col: u8,
}

impl Move {
    /// Build a move from coordinates, or `None` if they fall off the board.
    ///
    /// This only checks bounds; use [`Board::validate`] for legality.
    pub fn at(row: usize, col: usize) -> Option<Self> {
        (row < ROWS && col < COLS).then_some(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Flattened board index of the placement.
    #[inline]
    pub fn index(self) -> usize {
        self.row() * COLS + self.col()
    }

    /// Full-board delta form: every cell zero except the placement, which
    /// holds `marker`.
    pub fn delta(self, marker: i8) -> [i8; BOARD_SIZE] {
        let mut delta = [0i8; BOARD_SIZE];
        delta[self.index()] = marker;
        delta
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Legal moves from `board`, one per non-full column, in ascending column
/// order.
///
/// Only emptiness is inspected, so the board may be in absolute or relative
/// form. An empty result means the board is full. Whether the game is
/// already won is not considered here; callers check [`Board::result`].
pub fn legal_moves(board: &Board) -> Vec<Move> {
    (0..COLS).filter_map(|col| board.drop_target(col)).collect()
}

/// Every `(move, resulting board)` pair reachable from `board` by placing
/// `marker`, in the same order as [`legal_moves`].
pub fn next_states(board: &Board, marker: i8) -> Vec<(Move, Board)> {
    legal_moves(board)
        .into_iter()
        .map(|mv| (mv, board.apply(mv, marker)))
        .collect()
}
