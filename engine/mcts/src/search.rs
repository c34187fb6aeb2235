//! UCT search with random rollouts.
//!
//! Each simulation:
//! 1. Selection: descend by UCT until an unexpanded or terminal node
//! 2. Expansion: add one child per open column
//! 3. Simulation: random playout from one fresh child
//! 4. Backpropagation: update statistics along the selected path

use std::time::Instant;

use games_connect4::{Board, Move, COLS};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::{MctsNode, NodeId};
use crate::oracle::OracleError;
use crate::rollout::random_rollout;
use crate::tree::MctsTree;

/// Priors handed to `expand` by searches that do not use them.
pub(crate) const FLAT_PRIOR: [f32; COLS] = [1.0; COLS];

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move to play
    pub best_move: Move,

    /// Visit count of each root column (0 for full columns)
    pub visits: [u32; COLS],

    /// Visit distribution over columns
    pub policy: [f32; COLS],

    /// Value estimate at root, for the side to move
    pub value: f32,

    /// Number of simulations performed
    pub simulations: u32,
}

/// UCT search state for one move decision.
pub struct MctsSearch {
    tree: MctsTree,
    config: MctsConfig,
}

impl MctsSearch {
    /// Create a new search from `board` (relative form, `+1` to move).
    pub fn new(board: &Board, config: MctsConfig) -> Result<Self, SearchError> {
        let root = MctsNode::new(*board, 1.0);
        if root.is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            tree: MctsTree::new(root),
            config,
        })
    }

    /// Run the search until the simulation budget or the time limit runs out.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        let mut simulations = 0;

        while simulations < self.config.num_simulations {
            if simulations > 0 {
                if let Some(limit) = self.config.time_limit {
                    if start.elapsed() >= limit {
                        break;
                    }
                }
            }
            self.simulate(rng);
            simulations += 1;
        }

        let col = self.tree.best_column().ok_or(SearchError::NoLegalMoves)?;
        let best_move = self.tree.root_move(col).ok_or(SearchError::NoLegalMoves)?;
        let root = self.tree.get(self.tree.root());

        let result = SearchResult {
            best_move,
            visits: self.tree.root_visits(),
            policy: self.tree.root_policy(1.0),
            value: root.mean_value(),
            simulations,
        };

        debug!(
            simulations,
            best_move = %result.best_move,
            value = result.value,
            tree = ?self.tree.stats(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "MCTS search complete"
        );

        Ok(result)
    }

    /// Run a single simulation (select -> expand -> rollout -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) {
        let mut path = self.select(rng);
        let leaf_id = *path.last().unwrap_or(&self.tree.root());
        let leaf = self.tree.get(leaf_id);

        // If terminal, backpropagate the terminal value
        let value = if leaf.is_terminal() {
            leaf.terminal_value()
        } else {
            let children = self.tree.expand(leaf_id, &FLAT_PRIOR);
            match children.choose(rng) {
                Some(&child_id) => {
                    path.push(child_id);
                    let child = self.tree.get(child_id);
                    if child.is_terminal() {
                        child.terminal_value()
                    } else {
                        random_rollout(&child.board, rng)
                    }
                }
                // Non-terminal nodes always have an open column
                None => 0.0,
            }
        };

        self.tree.backpropagate(&path, value);

        trace!(path_len = path.len(), value, "MCTS simulation complete");
    }

    /// Descend from the root by UCT; returns the path, leaf last.
    fn select(&self, rng: &mut ChaCha20Rng) -> Vec<NodeId> {
        let mut path = vec![self.tree.root()];
        let mut current = self.tree.root();

        while !self.tree.get(current).is_leaf() {
            match self.tree.select_uct(current, self.config.c_uct, rng) {
                Some(child_id) => {
                    path.push(child_id);
                    current = child_id;
                }
                None => break,
            }
        }

        path
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Convenience function to run a single UCT search.
pub fn run_mcts(
    board: &Board,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    MctsSearch::new(board, config)?.run(rng)
}
