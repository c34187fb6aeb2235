//! The [`Agent`] enum dispatching to each player implementation.

use alphabeta::AlphaBetaConfig;
use games_connect4::{Board, InvalidMove, Move, Player};
use mcts::{GuidedConfig, MctsConfig, Oracle};
use tracing::warn;

use crate::error::AgentError;
use crate::human::HumanAgent;
use crate::kind::AgentKind;
use crate::search::{AlphaBetaAgent, GuidedAgent, MctsAgent};

/// A Connect Four player.
#[derive(Debug)]
pub enum Agent {
    Human(HumanAgent),
    AlphaBeta(AlphaBetaAgent),
    Mcts(MctsAgent),
    Guided(GuidedAgent),
}

impl Agent {
    /// Human on stdin/stdout.
    pub fn human(name: impl Into<String>) -> Self {
        Agent::Human(HumanAgent::stdio(name))
    }

    pub fn alpha_beta(config: AlphaBetaConfig) -> Self {
        Agent::AlphaBeta(AlphaBetaAgent::new(config))
    }

    pub fn mcts(config: MctsConfig, seed: u64) -> Self {
        Agent::Mcts(MctsAgent::new(config, seed))
    }

    pub fn guided(oracle: impl Oracle + 'static, config: GuidedConfig, seed: u64) -> Self {
        Agent::Guided(GuidedAgent::new(oracle, config, seed))
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Human(_) => AgentKind::Human,
            Agent::AlphaBeta(_) => AgentKind::AlphaBeta,
            Agent::Mcts(_) => AgentKind::Mcts,
            Agent::Guided(_) => AgentKind::Guided,
        }
    }

    /// Display name: the person's name, or the strategy name.
    pub fn name(&self) -> &str {
        match self {
            Agent::Human(h) => h.name(),
            other => other.kind().as_str(),
        }
    }

    /// Choose a move on a relative board (`+1` to move).
    ///
    /// The board is never modified. Finished games yield
    /// [`AgentError::NoLegalMoves`].
    pub fn get_move(&mut self, board: &Board) -> Result<Move, AgentError> {
        if board.result().is_over() {
            return Err(AgentError::NoLegalMoves);
        }

        match self {
            Agent::Human(h) => h.get_move(board),
            Agent::AlphaBeta(a) => a.get_move(board),
            Agent::Mcts(m) => m.get_move(board),
            Agent::Guided(g) => g.get_move(board),
        }
    }

    /// Choose a move on an absolute board, playing the pieces of `player`.
    pub fn get_move_as(&mut self, board: &Board, player: Player) -> Result<Move, AgentError> {
        match player {
            Player::One => self.get_move(board),
            Player::Two => self.get_move(&board.negated()),
        }
    }

    /// Called when the last move from [`get_move`](Agent::get_move) was rejected.
    pub fn handle_invalid_move(&mut self, reason: &InvalidMove) -> Result<(), AgentError> {
        match self {
            Agent::Human(h) => h.handle_invalid_move(reason),
            _ => {
                warn!(agent = %self.kind(), %reason, "Search proposed a rejected move");
                Ok(())
            }
        }
    }
}
