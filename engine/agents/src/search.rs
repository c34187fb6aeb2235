//! Agents backed by a game-tree search.
//!
//! All of them take relative boards (`+1` to move) and can only propose
//! legal moves.

use std::fmt;
use std::time::Instant;

use alphabeta::{AlphaBetaConfig, AlphaBetaSearch};
use games_connect4::{Board, Move};
use mcts::{run_guided, run_mcts, GuidedConfig, MctsConfig, Oracle};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{info, warn};

use crate::error::AgentError;

/// Depth-bounded alpha-beta player.
#[derive(Debug, Clone)]
pub struct AlphaBetaAgent {
    config: AlphaBetaConfig,
}

impl AlphaBetaAgent {
    /// Depth 0 only evaluates the root and names no move, so it is raised
    /// to 1.
    pub fn new(config: AlphaBetaConfig) -> Self {
        let depth = config.depth.max(1);
        if depth != config.depth {
            warn!(requested = config.depth, depth, "Alpha-beta agent needs depth >= 1");
        }
        Self {
            config: config.with_depth(depth),
        }
    }

    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    pub fn get_move(&mut self, board: &Board) -> Result<Move, AgentError> {
        let start = Instant::now();
        let outcome = AlphaBetaSearch::new(self.config.clone()).run(board);
        let mv = outcome.best_move.ok_or(AgentError::NoLegalMoves)?;

        info!(
            agent = "alphabeta",
            %mv,
            value = outcome.value,
            nodes = outcome.nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Move chosen"
        );
        Ok(mv)
    }
}

/// UCT player with random rollouts.
#[derive(Debug, Clone)]
pub struct MctsAgent {
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl MctsAgent {
    pub fn new(config: MctsConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn get_move(&mut self, board: &Board) -> Result<Move, AgentError> {
        let start = Instant::now();
        let result = run_mcts(board, self.config.clone(), &mut self.rng)?;

        info!(
            agent = "mcts",
            mv = %result.best_move,
            value = result.value,
            simulations = result.simulations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Move chosen"
        );
        Ok(result.best_move)
    }
}

/// Search steered by a policy/value oracle.
pub struct GuidedAgent {
    oracle: Box<dyn Oracle>,
    config: GuidedConfig,
    rng: ChaCha20Rng,
}

impl GuidedAgent {
    pub fn new(oracle: impl Oracle + 'static, config: GuidedConfig, seed: u64) -> Self {
        Self::from_boxed(Box::new(oracle), config, seed)
    }

    pub fn from_boxed(oracle: Box<dyn Oracle>, config: GuidedConfig, seed: u64) -> Self {
        Self {
            oracle,
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GuidedConfig {
        &self.config
    }

    pub fn get_move(&mut self, board: &Board) -> Result<Move, AgentError> {
        let start = Instant::now();
        let result = run_guided(board, self.oracle.as_ref(), self.config.clone(), &mut self.rng)?;

        info!(
            agent = "guided",
            mv = %result.best_move,
            value = result.value,
            simulations = result.simulations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Move chosen"
        );
        Ok(result.best_move)
    }
}

impl fmt::Debug for GuidedAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuidedAgent")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
