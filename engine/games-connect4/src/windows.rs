//! Precomputed four-in-a-row windows.
//!
//! Every horizontal, vertical and diagonal line of four cells on the 6x7 grid,
//! stored as flattened cell indices. The table is built once on first use and
//! shared read-only afterwards.

use once_cell::sync::Lazy;

use crate::{BOARD_SIZE, COLS, ROWS};

/// 24 horizontal + 21 vertical + 12 per diagonal direction.
pub const WINDOW_COUNT: usize = 69;

/// Four flattened cell indices forming a straight line.
pub type Window = [usize; 4];

/// Row/column steps: horizontal, vertical, down-right, up-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// All four-in-a-row windows of the board.
pub static WINDOWS: Lazy<[Window; WINDOW_COUNT]> = Lazy::new(build_windows);

fn build_windows() -> [Window; WINDOW_COUNT] {
    let mut windows = [[0usize; 4]; WINDOW_COUNT];
    let mut n = 0;
    let rows = 0..ROWS as isize;
    let cols = 0..COLS as isize;

    for (dr, dc) in DIRECTIONS {
        for row in rows.clone() {
            for col in cols.clone() {
                // Lines are straight, so a window fits iff its last cell does
                if !rows.contains(&(row + 3 * dr)) || !cols.contains(&(col + 3 * dc)) {
                    continue;
                }
                for (step, slot) in windows[n].iter_mut().enumerate() {
                    let step = step as isize;
                    let r = (row + step * dr) as usize;
                    let c = (col + step * dc) as usize;
                    *slot = r * COLS + c;
                }
                n += 1;
            }
        }
    }

    debug_assert_eq!(n, WINDOW_COUNT);
    windows
}

/// Count the `+1` and `-1` pieces inside a window.
///
/// Returns `(plus, minus)`. A window is *uncontested* when at most one of
/// the two counts is non-zero.
#[inline]
pub fn tally(cells: &[i8; BOARD_SIZE], window: &Window) -> (u8, u8) {
    window
        .iter()
        .fold((0u8, 0u8), |(plus, minus), &i| match cells[i] {
            1 => (plus + 1, minus),
            -1 => (plus, minus + 1),
            _ => (plus, minus),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_window_count() {
        assert_eq!(WINDOWS.len(), 69);

        let unique: HashSet<Window> = WINDOWS.iter().copied().collect();
        assert_eq!(unique.len(), WINDOW_COUNT);
    }

    #[test]
    fn test_windows_are_straight_lines() {
        for window in WINDOWS.iter() {
            assert!(window.iter().all(|&i| i < BOARD_SIZE));

            let coords: Vec<(isize, isize)> = window
                .iter()
                .map(|&i| ((i / COLS) as isize, (i % COLS) as isize))
                .collect();
            let dr = coords[1].0 - coords[0].0;
            let dc = coords[1].1 - coords[0].1;
            for pair in coords.windows(2) {
                assert_eq!(pair[1].0 - pair[0].0, dr);
                assert_eq!(pair[1].1 - pair[0].1, dc);
            }
        }
    }

    #[test]
    fn test_direction_breakdown() {
        let horizontal = WINDOWS.iter().filter(|w| w[1] == w[0] + 1).count();
        let vertical = WINDOWS.iter().filter(|w| w[1] == w[0] + COLS).count();
        let down_right = WINDOWS.iter().filter(|w| w[1] == w[0] + COLS + 1).count();
        let up_right = WINDOWS
            .iter()
            .filter(|w| w[0] >= COLS - 1 && w[1] == w[0] - (COLS - 1))
            .count();

        assert_eq!(horizontal, 24);
        assert_eq!(vertical, 21);
        assert_eq!(down_right, 12);
        assert_eq!(up_right, 12);
    }

    #[test]
    fn test_tally() {
        let mut cells = [0i8; BOARD_SIZE];
        cells[35] = 1;
        cells[36] = 1;
        cells[37] = -1;

        let bottom_left = WINDOWS
            .iter()
            .find(|w| **w == [35, 36, 37, 38])
            .unwrap();
        assert_eq!(tally(&cells, bottom_left), (2, 1));
    }
}
