//! Static window-count evaluator.
//!
//! Scores a relative board from the point of view of `+1`. Only uncontested
//! windows count: a window holding `n` pieces of one side and none of the
//! other adds `n²` for `+1` or subtracts `n²` for `-1`. A full window is
//! decisive and short-circuits to `±∞`.

use games_connect4::{tally, Board, WINDOWS};

/// Value of a decided position for `+1`.
pub const WIN: f32 = f32::INFINITY;

/// Value of a decided position for `-1`.
pub const LOSS: f32 = f32::NEG_INFINITY;

/// Static evaluation of `board` for the `+1` side.
pub fn evaluate(board: &Board) -> f32 {
    let cells = board.cells();
    let mut total = 0.0f32;

    for window in WINDOWS.iter() {
        match tally(cells, window) {
            (4, _) => return WIN,
            (_, 4) => return LOSS,
            (plus, 0) => total += f32::from(plus * plus),
            (0, minus) => total -= f32::from(minus * minus),
            _ => {}
        }
    }

    total
}

/// Whether a static value already decides the game.
#[inline]
pub fn is_decisive(value: f32) -> bool {
    value.is_infinite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::{Move, BOTTOM_ROW};

    fn place(board: Board, cells: &[(usize, usize)], marker: i8) -> Board {
        cells.iter().fold(board, |b, &(row, col)| {
            b.apply(Move::at(row, col).unwrap(), marker)
        })
    }

    #[test]
    fn test_empty_board_is_zero() {
        assert_eq!(evaluate(&Board::new()), 0.0);
    }

    #[test]
    fn test_single_piece_counts_its_windows() {
        // Bottom centre: 4 horizontal + 1 vertical + 1 per diagonal
        let board = place(Board::new(), &[(BOTTOM_ROW, 3)], 1);
        assert_eq!(evaluate(&board), 7.0);

        // Corner: 1 horizontal + 1 vertical + 1 diagonal
        let board = place(Board::new(), &[(BOTTOM_ROW, 0)], 1);
        assert_eq!(evaluate(&board), 3.0);
    }

    #[test]
    fn test_denser_windows_score_superlinearly() {
        // (5,0) and (5,1) share one window (worth 4), plus singles elsewhere
        let board = place(Board::new(), &[(5, 0), (5, 1)], 1);
        // (5,0): vertical 1 + up-right 1; (5,1): vertical 1 + up-right 1 +
        // horizontal windows starting at col 1 (1)
        assert_eq!(evaluate(&board), 4.0 + 2.0 + 3.0);
    }

    #[test]
    fn test_contested_windows_are_ignored() {
        let board = place(Board::new(), &[(5, 0)], 1);
        let board = place(board, &[(5, 1)], -1);
        // Horizontal window 0..3 is contested; the rest stay uncontested
        // +1: vertical + up-right = 2, -1: vertical + up-right + 1 horizontal = 3
        assert_eq!(evaluate(&board), 2.0 - 3.0);
    }

    #[test]
    fn test_negation_flips_sign() {
        let board = place(Board::new(), &[(5, 3), (4, 3)], 1);
        let board = place(board, &[(5, 2)], -1);
        assert_eq!(evaluate(&board.negated()), -evaluate(&board));
    }

    #[test]
    fn test_full_window_is_decisive() {
        let board = place(Board::new(), &[(5, 0), (5, 1), (5, 2), (5, 3)], 1);
        assert_eq!(evaluate(&board), WIN);
        assert!(is_decisive(evaluate(&board)));

        assert_eq!(evaluate(&board.negated()), LOSS);
    }
}
