//! Alpha-beta search over relative boards.
//!
//! The maximizer places `+1` and the minimizer places `-1`; values are always
//! static scores for `+1`, so no negation happens between plies. Children are
//! visited best-static-value first (descending for the maximizer, ascending
//! for the minimizer) with a stable sort, so equal scores keep column order.
//! A child whose static value is already `±∞` is scored directly instead of
//! being searched.

use std::cmp::Ordering;
use std::time::Instant;

use games_connect4::{next_states, Board, Move};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::AlphaBetaConfig;
use crate::eval::{evaluate, is_decisive};

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Value of the root for `+1`.
    pub value: f32,

    /// Chosen move, `None` when the root was a leaf.
    pub best_move: Option<Move>,

    /// Nodes visited during the search.
    pub nodes: u64,
}

/// A candidate child: the move, the resulting board and its static value.
type Candidate = (Move, Board, f32);

/// Children of `board` in search order.
fn ordered_children(board: &Board, maximizing: bool) -> Vec<Candidate> {
    let marker = if maximizing { 1 } else { -1 };
    let mut children: Vec<Candidate> = next_states(board, marker)
        .into_iter()
        .map(|(mv, child)| (mv, child, evaluate(&child)))
        .collect();

    // sort_by is stable, ties stay in column order
    if maximizing {
        children.sort_by(|a, b| b.2.total_cmp(&a.2));
    } else {
        children.sort_by(|a, b| a.2.total_cmp(&b.2));
    }
    children
}

/// Depth-bounded alpha-beta search with node accounting.
#[derive(Debug, Clone, Default)]
pub struct AlphaBetaSearch {
    config: AlphaBetaConfig,
    nodes: u64,
}

impl AlphaBetaSearch {
    pub fn new(config: AlphaBetaConfig) -> Self {
        Self { config, nodes: 0 }
    }

    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `board` for the side to move (`+1`) at the configured depth.
    pub fn run(&mut self, board: &Board) -> SearchOutcome {
        let start = Instant::now();
        let depth = self.config.depth;

        let outcome = if self.config.parallel {
            let outcome = search_parallel(board, depth);
            self.nodes += outcome.nodes;
            outcome
        } else {
            let before = self.nodes;
            let (value, best_move) =
                self.search(board, depth, f32::NEG_INFINITY, f32::INFINITY, true);
            SearchOutcome {
                value,
                best_move,
                nodes: self.nodes - before,
            }
        };

        debug!(
            depth,
            parallel = self.config.parallel,
            value = outcome.value,
            best_move = ?outcome.best_move,
            nodes = outcome.nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Alpha-beta search complete"
        );

        outcome
    }

    /// Alpha-beta search returning the node value and, for interior nodes,
    /// the move that produced it.
    ///
    /// Fail-hard: the maximizer returns `alpha`, the minimizer `beta`. The
    /// recorded move defaults to the first visited candidate and is replaced
    /// only on a strict improvement, so ties go to the earliest candidate.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
    ) -> (f32, Option<Move>) {
        self.nodes += 1;

        if depth == 0 {
            return (evaluate(board), None);
        }
        let children = ordered_children(board, maximizing);
        let Some(&(first, _, _)) = children.first() else {
            return (evaluate(board), None);
        };

        let mut best = first;
        for (mv, child, static_value) in children {
            let value = if is_decisive(static_value) {
                static_value
            } else {
                self.search(&child, depth - 1, alpha, beta, !maximizing).0
            };

            if maximizing {
                if value > alpha {
                    alpha = value;
                    best = mv;
                }
            } else if value < beta {
                beta = value;
                best = mv;
            }

            if beta < alpha {
                trace!(depth, %mv, alpha, beta, "Cutoff");
                break;
            }
        }

        (if maximizing { alpha } else { beta }, Some(best))
    }

    /// Plain minimax with the same leaf and decisive-child rules, no pruning.
    ///
    /// Returns the best value and the first candidate achieving it.
    pub fn minimax(&mut self, board: &Board, depth: u32, maximizing: bool) -> (f32, Option<Move>) {
        self.nodes += 1;

        if depth == 0 {
            return (evaluate(board), None);
        }
        let children = ordered_children(board, maximizing);
        if children.is_empty() {
            return (evaluate(board), None);
        }

        let mut best: Option<(f32, Move)> = None;
        for (mv, child, static_value) in children {
            let value = if is_decisive(static_value) {
                static_value
            } else {
                self.minimax(&child, depth - 1, !maximizing).0
            };

            let improves = match best {
                None => true,
                Some((best_value, _)) if maximizing => value > best_value,
                Some((best_value, _)) => value < best_value,
            };
            if improves {
                best = Some((value, mv));
            }
        }

        match best {
            Some((value, mv)) => (value, Some(mv)),
            None => (evaluate(board), None),
        }
    }
}

/// Search each root child on the rayon pool with a full window.
///
/// The side to move is the maximizer. Returns the same value and the same
/// first-in-order best move as the sequential search.
pub fn search_parallel(board: &Board, depth: u32) -> SearchOutcome {
    if depth == 0 {
        return SearchOutcome {
            value: evaluate(board),
            best_move: None,
            nodes: 1,
        };
    }

    let children = ordered_children(board, true);
    if children.is_empty() {
        return SearchOutcome {
            value: evaluate(board),
            best_move: None,
            nodes: 1,
        };
    }

    let results: Vec<(Move, f32, u64)> = children
        .par_iter()
        .map(|&(mv, child, static_value)| {
            if is_decisive(static_value) {
                return (mv, static_value, 0);
            }
            let mut worker = AlphaBetaSearch::default();
            let (value, _) =
                worker.search(&child, depth - 1, f32::NEG_INFINITY, f32::INFINITY, false);
            (mv, value, worker.nodes())
        })
        .collect();

    let nodes = 1 + results.iter().map(|&(_, _, n)| n).sum::<u64>();
    let (best_move, value) = results.iter().skip(1).fold(
        (results[0].0, results[0].1),
        |(best_mv, best_value), &(mv, value, _)| match value.total_cmp(&best_value) {
            Ordering::Greater => (mv, value),
            _ => (best_mv, best_value),
        },
    );

    SearchOutcome {
        value,
        best_move: Some(best_move),
        nodes,
    }
}
