//! Uniform random playouts.

use games_connect4::{Board, Player};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Play uniformly random legal moves from `board` until the game ends.
///
/// `board` is relative (`+1` to move). Placements alternate `+1`, `-1`, ...
/// without re-negating, so the final result is already expressed for the
/// side to move at `board`: +1 win, -1 loss, 0 draw.
pub fn random_rollout(board: &Board, rng: &mut ChaCha20Rng) -> f32 {
    let mut board = *board;
    let mut marker = Player::One.marker();

    loop {
        let result = board.result();
        if result.is_over() {
            return result.reward_for(Player::One);
        }

        // Ongoing implies a non-full board
        let Some(&mv) = board.legal_moves().choose(rng) else {
            return 0.0;
        };
        board = board.apply(mv, marker);
        marker = -marker;
    }
}
