//! Agent error types.

use std::io;

use mcts::SearchError;
use thiserror::Error;

/// Errors an agent can raise while choosing a move.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Failed to read move: {0}")]
    Input(#[from] io::Error),

    /// The player gave up instead of moving.
    #[error("Player forfeited the game")]
    Forfeit,

    #[error("Unknown agent kind '{0}', expected one of human, alphabeta, mcts, guided")]
    UnknownKind(String),
}
