//! Plane encoding of a board for policy/value models.
//!
//! Format (plane-major, each plane 42 floats in board index order):
//! 1. cells held by the side to move
//! 2. cells held by the opponent
//! 3. turn indicator, all ones when the side to move is the player the
//!    search is running for, all zeros otherwise

use crate::board::Board;
use crate::{BOARD_SIZE, COLS};

/// Number of stacked planes.
pub const PLANE_COUNT: usize = 3;

/// Model input built from a relative board.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    planes: [[f32; BOARD_SIZE]; PLANE_COUNT],
}

impl Observation {
    /// Encode `board` (relative form). `root_to_move` fills the turn plane.
    pub fn from_board(board: &Board, root_to_move: bool) -> Self {
        let mut planes = [[0.0f32; BOARD_SIZE]; PLANE_COUNT];

        for (i, &cell) in board.cells().iter().enumerate() {
            match cell {
                1 => planes[0][i] = 1.0,
                -1 => planes[1][i] = 1.0,
                _ => {}
            }
        }

        if root_to_move {
            planes[2] = [1.0; BOARD_SIZE];
        }

        Self { planes }
    }

    pub fn mover_plane(&self) -> &[f32; BOARD_SIZE] {
        &self.planes[0]
    }

    pub fn opponent_plane(&self) -> &[f32; BOARD_SIZE] {
        &self.planes[1]
    }

    pub fn turn_plane(&self) -> &[f32; BOARD_SIZE] {
        &self.planes[2]
    }

    /// Columns whose top cell is free in both occupancy planes.
    pub fn legal_mask(&self) -> u8 {
        (0..COLS).fold(0u8, |mask, col| {
            if self.planes[0][col] == 0.0 && self.planes[1][col] == 0.0 {
                mask | (1u8 << col)
            } else {
                mask
            }
        })
    }
}
