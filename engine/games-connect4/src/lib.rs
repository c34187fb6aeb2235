//! Connect 4 board representation for the fourplay engines
//!
//! Connect 4 is a two-player connection game where players drop discs into a
//! 7-column, 6-row vertically suspended grid. The objective is to be the
//! first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the top:
//! ```text
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Top
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 4: [28][29][30][31][32][33][34]
//! Row 5: [35][36][37][38][39][40][41]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Cell convention
//!
//! Cells hold `+1`, `-1` or `0`. The searches use the *relative* convention:
//! `+1` is the side to move and `-1` its opponent, so flipping perspective is
//! a negation of the whole grid ([`Board::negated`]). The orchestrator may use
//! the same grid in *absolute* form, where `+1` is player one and `-1` player
//! two. Either way the board is a small `Copy` value: every `apply` produces a
//! fresh board and the input is never touched.
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{Board, GameResult, Player};
//!
//! let board = Board::new();
//! let moves = board.legal_moves();
//! assert_eq!(moves.len(), 7);
//!
//! let next = board.apply(moves[3], Player::One.marker());
//! assert_eq!(next.result(), GameResult::Ongoing);
//! ```

mod board;
mod encoding;
mod moves;
mod windows;

pub use board::{Board, BoardError, GameResult, InvalidMove, Player};
pub use encoding::{Observation, PLANE_COUNT};
pub use moves::{legal_moves, next_states, Move};
pub use windows::{tally, Window, WINDOWS, WINDOW_COUNT};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Index of the row pieces land on first.
pub const BOTTOM_ROW: usize = ROWS - 1;

#[cfg(test)]
mod tests;
