use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Play columns in order, alternating +1 / -1 starting with +1 (absolute form).
fn play(columns: &[usize]) -> Board {
    let mut board = Board::new();
    let mut marker = 1i8;
    for &col in columns {
        let mv = board.drop_target(col).expect("column should have room");
        board = board.apply(mv, marker);
        marker = -marker;
    }
    board
}

/// Win-free full board: columns alternate between two stacked patterns.
fn draw_board() -> Board {
    const EVEN: [i8; ROWS] = [1, 1, -1, -1, 1, 1];
    let mut cells = [0i8; BOARD_SIZE];
    for col in 0..COLS {
        for row in 0..ROWS {
            let cell = EVEN[row];
            cells[Board::index(row, col)] = if col % 2 == 0 { cell } else { -cell };
        }
    }
    Board::from_cells(cells).unwrap()
}

#[test]
fn test_initial_state() {
    let board = Board::new();
    assert_eq!(board.cells(), &[0; BOARD_SIZE]);
    assert_eq!(board.piece_count(), 0);
    assert_eq!(board.result(), GameResult::Ongoing);
    assert!(board.respects_gravity());
}

#[test]
fn test_legal_moves() {
    let board = Board::new();
    let cols: Vec<usize> = board.legal_moves().iter().map(|m| m.col()).collect();
    assert_eq!(cols, (0..COLS).collect::<Vec<_>>());
    assert_eq!(board.legal_mask(), 0x7F);

    // After one move
    let board = play(&[3]);
    let legal = board.legal_moves();
    assert_eq!(legal.len(), 7);
    assert_eq!(legal[3], Move::at(4, 3).unwrap());
}

#[test]
fn test_apply_does_not_touch_source() {
    let board = Board::new();
    let mv = board.drop_target(3).unwrap();
    let next = board.apply(mv, 1);

    assert_eq!(board.piece_count(), 0);
    assert_eq!(next.get(BOTTOM_ROW, 3), 1);
    assert_eq!(next.column_height(3), 1);
}

#[test]
fn test_stacking_pieces() {
    let mut board = Board::new();

    for i in 0..ROWS {
        let mv = board.drop_target(0).unwrap();
        assert_eq!(mv.row(), BOTTOM_ROW - i);
        board = board.apply(mv, if i % 2 == 0 { 1 } else { -1 });
        assert_eq!(board.column_height(0), i + 1);
        assert_eq!(board.remaining_capacity(0), ROWS - i - 1);
    }

    // Column 0 is now full
    assert!(board.drop_target(0).is_none());
    assert!(board.legal_moves().iter().all(|m| m.col() != 0));
    assert_eq!(board.legal_mask() & 1, 0);
}

#[test]
fn test_horizontal_win() {
    // +1 along the bottom row, -1 stacked on top of it
    let board = play(&[0, 0, 1, 1, 2, 2, 3]);
    assert_eq!(board.result(), GameResult::Win(Player::One));
}

#[test]
fn test_vertical_win() {
    let board = play(&[0, 1, 0, 1, 0, 1, 0]);
    assert_eq!(board.result(), GameResult::Win(Player::One));
}

#[test]
fn test_diagonal_win_ascending() {
    let board = Board::from_rows([
        [0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 1, 0, 0, 0],
        [0, 0, 1, -1, 0, 0, 0],
        [0, 1, -1, -1, 0, 0, 0],
        [1, -1, -1, 1, 0, 0, 0],
    ])
    .unwrap();

    assert_eq!(board.result(), GameResult::Win(Player::One));
}

#[test]
fn test_diagonal_win_descending() {
    let board = Board::from_rows([
        [0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, -1, 0, 0, 0],
        [0, 0, 0, 1, -1, 0, 0],
        [0, 0, 0, 1, 1, -1, 0],
        [0, 0, 0, -1, 1, 1, -1],
    ])
    .unwrap();

    assert_eq!(board.result(), GameResult::Win(Player::Two));
}

#[test]
fn test_three_in_a_row_is_not_a_win() {
    let board = play(&[0, 0, 1, 1, 2, 2]);
    assert_eq!(board.result(), GameResult::Ongoing);
}

#[test]
fn test_draw_game() {
    let board = draw_board();
    assert!(board.is_full());
    assert!(board.legal_moves().is_empty());
    assert_eq!(board.result(), GameResult::Draw);
}

#[test]
fn test_result_symmetric_under_negation() {
    let wins = [
        play(&[0, 0, 1, 1, 2, 2, 3]),
        play(&[6, 0, 5, 0, 4, 0, 6, 0]),
    ];
    for board in wins {
        let result = board.result();
        assert!(matches!(result, GameResult::Win(_)));
        assert_eq!(board.negated().result(), result.negated());
    }

    assert_eq!(draw_board().negated().result(), GameResult::Draw);
}

#[test]
fn test_from_cells_rejects_bad_values() {
    let mut cells = [0i8; BOARD_SIZE];
    cells[40] = 2;
    assert_eq!(
        Board::from_cells(cells),
        Err(BoardError::InvalidCell {
            index: 40,
            value: 2
        })
    );
}

#[test]
fn test_from_cells_rejects_floating_piece() {
    let mut cells = [0i8; BOARD_SIZE];
    cells[Board::index(3, 2)] = 1;
    assert_eq!(
        Board::from_cells(cells),
        Err(BoardError::Floating { row: 3, col: 2 })
    );
}

#[test]
fn test_validate_delta() {
    let board = play(&[3]);

    // On top of the existing piece
    let delta = Move::at(4, 3).unwrap().delta(1);
    assert_eq!(board.validate_delta(&delta, 1), Ok(Move::at(4, 3).unwrap()));

    assert_eq!(
        board.validate_delta(&[0; BOARD_SIZE], 1),
        Err(InvalidMove::NoPlacement)
    );

    let mut two = Move::at(5, 0).unwrap().delta(1);
    two[Board::index(5, 1)] = 1;
    assert_eq!(
        board.validate_delta(&two, 1),
        Err(InvalidMove::MultiplePlacements(2))
    );

    assert_eq!(
        board.validate_delta(&Move::at(5, 0).unwrap().delta(-1), 1),
        Err(InvalidMove::WrongMarker {
            expected: 1,
            found: -1
        })
    );

    assert_eq!(
        board.validate_delta(&Move::at(5, 3).unwrap().delta(1), 1),
        Err(InvalidMove::Occupied { row: 5, col: 3 })
    );

    assert_eq!(
        board.validate_delta(&Move::at(3, 3).unwrap().delta(1), 1),
        Err(InvalidMove::Floating { row: 3, col: 3 })
    );
}

#[test]
fn test_validate_at_out_of_bounds() {
    let board = Board::new();
    assert_eq!(
        board.validate_at(6, 0),
        Err(InvalidMove::OutOfBounds { row: 6, col: 0 })
    );
    assert_eq!(board.validate_at(5, 6), Ok(Move::at(5, 6).unwrap()));
}

#[test]
fn test_observation_encoding() {
    let board = Board::new();
    let obs = Observation::from_board(&board, true);

    assert_eq!(obs.mover_plane(), &[0.0; BOARD_SIZE]);
    assert_eq!(obs.opponent_plane(), &[0.0; BOARD_SIZE]);
    assert_eq!(obs.turn_plane(), &[1.0; BOARD_SIZE]);
    assert_eq!(obs.legal_mask(), 0x7F);

    let board = play(&[3, 4]);
    let obs = Observation::from_board(&board, false);
    assert_eq!(obs.mover_plane()[Board::index(5, 3)], 1.0);
    assert_eq!(obs.opponent_plane()[Board::index(5, 4)], 1.0);
    assert_eq!(obs.turn_plane(), &[0.0; BOARD_SIZE]);
}

#[test]
fn test_display() {
    let rendered = play(&[3, 3]).to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), ROWS + 1);
    assert_eq!(lines[4], "|_|_|_|O|_|_|_|");
    assert_eq!(lines[5], "|_|_|_|X|_|_|_|");
    assert_eq!(lines[6], "|0|1|2|3|4|5|6|");
}

#[test]
fn test_random_games_invariants() {
    for seed in 0..20 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        // Relative form: the side to move is always +1
        let mut board = Board::new();
        let mut move_count = 0;

        while board.result() == GameResult::Ongoing {
            let legal = board.legal_moves();
            assert!(
                !legal.is_empty() && legal.len() <= COLS,
                "Ongoing game must have between 1 and 7 moves (seed={})",
                seed
            );
            for pair in legal.windows(2) {
                assert!(pair[0].col() < pair[1].col());
            }
            for mv in &legal {
                assert_eq!(board.validate(*mv), Ok(()));
            }

            let mv = legal[rng.gen_range(0..legal.len())];
            let capacity = board.remaining_capacity(mv.col());
            let next = board.apply(mv, 1);

            assert!(next.respects_gravity(), "seed={}", seed);
            assert_eq!(next.remaining_capacity(mv.col()), capacity - 1);

            // A finished game is always won by the side that just moved
            if let GameResult::Win(p) = next.result() {
                assert_eq!(p, Player::One, "seed={}", seed);
            }

            board = next.negated();
            move_count += 1;
        }

        assert!(move_count <= BOARD_SIZE);
    }
}
