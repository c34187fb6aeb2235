//! Oracle-guided search.
//!
//! Same tree as the rollout search, but leaves are scored by a policy/value
//! [`Oracle`] instead of a playout, and selection follows
//! `-Q + c_puct * P / (1 + N)` where `Q` is the child's mean value and `P`
//! the prior the oracle gave it. Unvisited children are tried first, lowest
//! column on ties.
//!
//! The root is evaluated and expanded once before the simulation loop, so
//! every simulation adds exactly one visit to one root child.

use std::time::Instant;

use games_connect4::{Board, Observation, COLS};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Gamma};
use tracing::{debug, trace, warn};

use crate::config::GuidedConfig;
use crate::node::{MctsNode, NodeId};
use crate::oracle::{Oracle, OracleError};
use crate::search::{SearchError, SearchResult};
use crate::tree::MctsTree;

/// Guided search state for one move decision.
pub struct GuidedSearch<'a, O: Oracle + ?Sized> {
    tree: MctsTree,
    oracle: &'a O,
    config: GuidedConfig,
}

impl<'a, O: Oracle + ?Sized> GuidedSearch<'a, O> {
    /// Create a new search from `board` (relative form, `+1` to move).
    pub fn new(
        board: &Board,
        oracle: &'a O,
        config: GuidedConfig,
    ) -> Result<Self, SearchError> {
        let root = MctsNode::new(*board, 1.0);
        if root.is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            tree: MctsTree::new(root),
            oracle,
            config,
        })
    }

    /// Run the configured number of simulations and pick a move.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let start = Instant::now();

        let root_id = self.tree.root();
        if !self.tree.get(root_id).is_expanded() {
            self.expand_node(root_id, 0)?;
        }

        if self.config.dirichlet_alpha > 0.0 {
            self.add_dirichlet_noise(rng);
        }

        for _ in 0..self.config.num_simulations {
            self.simulate()?;
        }

        let policy = self.tree.root_policy(self.config.temperature);
        let col = if self.config.temperature < 1e-6 {
            self.tree.best_column()
        } else {
            sample_column(&policy, rng)
        }
        .ok_or(SearchError::NoLegalMoves)?;
        let best_move = self.tree.root_move(col).ok_or(SearchError::NoLegalMoves)?;

        let root = self.tree.get(root_id);
        let result = SearchResult {
            best_move,
            visits: self.tree.root_visits(),
            policy,
            value: root.mean_value(),
            simulations: self.config.num_simulations,
        };

        debug!(
            simulations = result.simulations,
            best_move = %result.best_move,
            value = result.value,
            tree = ?self.tree.stats(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Guided search complete"
        );

        Ok(result)
    }

    /// Run a single simulation (select -> evaluate + expand -> backpropagate).
    fn simulate(&mut self) -> Result<(), SearchError> {
        let path = self.select();
        let depth = path.len() - 1;
        let leaf_id = path[depth];

        let leaf = self.tree.get(leaf_id);
        let value = if leaf.is_terminal() {
            leaf.terminal_value()
        } else {
            self.expand_node(leaf_id, depth)?
        };

        self.tree.backpropagate(&path, value);

        trace!(depth, value, "Guided simulation complete");
        Ok(())
    }

    /// Descend from the root by the prior-weighted score; returns the path,
    /// leaf last.
    fn select(&self) -> Vec<NodeId> {
        let mut path = vec![self.tree.root()];
        let mut current = self.tree.root();

        while !self.tree.get(current).is_leaf() {
            match self.tree.select_puct(current, self.config.c_puct) {
                Some(child_id) => {
                    path.push(child_id);
                    current = child_id;
                }
                None => break,
            }
        }

        path
    }

    /// Ask the oracle about a node, check the answer and expand with its
    /// priors. Returns the oracle's value for the side to move at the node.
    ///
    /// `depth` is the distance from the root; the turn plane is set on even
    /// depths, where the root's player is to move.
    fn expand_node(&mut self, node_id: NodeId, depth: usize) -> Result<f32, SearchError> {
        let board = self.tree.get(node_id).board;
        let observation = Observation::from_board(&board, depth % 2 == 0);

        let output = self.oracle.evaluate(&observation)?;
        if let Err(e) = output.validate(board.legal_mask()) {
            warn!(error = %e, depth, "Oracle broke its output contract");
            return Err(e.into());
        }

        self.tree.expand(node_id, &output.prior);
        Ok(output.value)
    }

    /// Mix Dirichlet noise into the root children's priors.
    fn add_dirichlet_noise(&mut self, rng: &mut ChaCha20Rng) {
        let children: Vec<NodeId> = self
            .tree
            .get(self.tree.root())
            .child_ids()
            .map(|(_, id)| id)
            .collect();

        if children.is_empty() {
            return;
        }

        let noise = match dirichlet_noise(children.len(), self.config.dirichlet_alpha, rng) {
            Ok(noise) => noise,
            Err(e) => {
                warn!(error = %e, alpha = self.config.dirichlet_alpha, "Skipping root noise");
                return;
            }
        };

        let eps = self.config.dirichlet_weight;
        for (child_id, n) in children.into_iter().zip(noise) {
            let child = self.tree.get_mut(child_id);
            child.prior = (1.0 - eps) * child.prior + eps * n;
        }
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Sample a column from a probability distribution.
fn sample_column(policy: &[f32; COLS], rng: &mut ChaCha20Rng) -> Option<usize> {
    let r: f32 = rng.gen();
    let mut cumsum = 0.0;

    for (i, &p) in policy.iter().enumerate() {
        cumsum += p;
        if r < cumsum {
            return Some(i);
        }
    }

    // Fallback to last non-zero column (handles floating point issues)
    policy.iter().rposition(|&p| p > 0.0)
}

/// Generate Dirichlet-distributed noise using Gamma variates.
fn dirichlet_noise(n: usize, alpha: f32, rng: &mut ChaCha20Rng) -> Result<Vec<f32>, OracleError> {
    let gamma = Gamma::new(alpha as f64, 1.0)
        .map_err(|e| OracleError::EvaluationFailed(format!("Invalid Dirichlet alpha: {}", e)))?;
    let mut samples: Vec<f32> = (0..n).map(|_| gamma.sample(rng) as f32).collect();

    // Normalize
    let sum: f32 = samples.iter().sum();
    if sum > 0.0 {
        for s in &mut samples {
            *s /= sum;
        }
    }

    Ok(samples)
}

/// Convenience function to run a single guided search.
pub fn run_guided<O: Oracle + ?Sized>(
    board: &Board,
    oracle: &O,
    config: GuidedConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    GuidedSearch::new(board, oracle, config)?.run(rng)
}
