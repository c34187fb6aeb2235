//! A single game between two seated agents.
//!
//! The board here is absolute: the first mover always owns the `+1` pieces.
//! Agents receive it together with the side they play and handle the
//! perspective flip themselves.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use agents::{Agent, AgentError};
use anyhow::Result;
use games_connect4::{Board, GameResult, Move, Player};
use tracing::{debug, info, warn};

/// How a game finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// Four in a row
    Connect,
    /// Board filled with no winner
    Draw,
    /// A player resigned or ran out of retries
    Forfeit,
}

impl fmt::Display for GameEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameEnd::Connect => "connect",
            GameEnd::Draw => "draw",
            GameEnd::Forfeit => "forfeit",
        })
    }
}

/// Outcome of a finished game, in seat terms.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Seat that moved first
    pub first_seat: usize,
    /// Winning seat, `None` for a draw
    pub winner: Option<usize>,
    pub end: GameEnd,
    /// Accepted moves in play order
    pub moves: Vec<Move>,
    /// Final absolute board
    pub board: Board,
}

#[derive(Debug, Clone)]
pub struct GameSettings {
    /// Rejected moves tolerated per turn; one more forfeits the game
    pub max_invalid_moves: u32,
    /// Print the board to stdout before every move
    pub show_board: bool,
    /// Minimum time per turn; a faster move waits out the rest
    pub move_delay: Duration,
}

/// Play one game. `first_seat` moves first and plays `+1`.
///
/// Agent failures other than resignation (closed input, oracle errors) abort
/// the game with an error.
pub fn play_game(
    agents: &mut [Agent; 2],
    first_seat: usize,
    settings: &GameSettings,
) -> Result<GameRecord> {
    let seat_of = |player: Player| match player {
        Player::One => first_seat,
        Player::Two => 1 - first_seat,
    };

    let mut board = Board::new();
    let mut to_move = Player::One;
    let mut moves = Vec::new();

    loop {
        let (winner, end) = match board.result() {
            GameResult::Ongoing => (None, None),
            GameResult::Win(p) => (Some(seat_of(p)), Some(GameEnd::Connect)),
            GameResult::Draw => (None, Some(GameEnd::Draw)),
        };
        if let Some(end) = end {
            if settings.show_board {
                println!("{board}");
            }
            return Ok(GameRecord {
                first_seat,
                winner,
                end,
                moves,
                board,
            });
        }

        let seat = seat_of(to_move);
        if settings.show_board {
            println!("{board}");
            println!(
                "{}: X, {}: O\n",
                agents[first_seat].name(),
                agents[1 - first_seat].name()
            );
        }
        debug!(ply = moves.len(), seat, "Board before move:\n{}", board);

        let turn_start = Instant::now();
        let agent = &mut agents[seat];
        let mut rejected = 0;
        let mv = loop {
            let mv = match agent.get_move_as(&board, to_move) {
                Ok(mv) => mv,
                Err(AgentError::Forfeit) => {
                    info!(seat, agent = agent.name(), "Player resigned");
                    return Ok(forfeit(first_seat, seat, moves, board));
                }
                Err(e) => return Err(e.into()),
            };

            match board.validate(mv) {
                Ok(()) => break mv,
                Err(reason) => {
                    rejected += 1;
                    warn!(seat, agent = agent.name(), %mv, %reason, rejected, "Move rejected");
                    if rejected > settings.max_invalid_moves {
                        info!(seat, agent = agent.name(), "Out of retries, forfeiting");
                        return Ok(forfeit(first_seat, seat, moves, board));
                    }
                    agent.handle_invalid_move(&reason)?;
                }
            }
        };

        let remaining = settings.move_delay.saturating_sub(turn_start.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }

        board = board.apply(mv, to_move.marker());
        moves.push(mv);
        to_move = to_move.other();
    }
}

fn forfeit(first_seat: usize, loser: usize, moves: Vec<Move>, board: Board) -> GameRecord {
    GameRecord {
        first_seat,
        winner: Some(1 - loser),
        end: GameEnd::Forfeit,
        moves,
        board,
    }
}
