//! Alpha-beta search for Connect Four.
//!
//! A depth-bounded minimax over relative boards (`+1` is the side to move)
//! with alpha-beta pruning, best-static-first move ordering and an immediate
//! cutoff on decided positions.
//!
//! # Usage
//!
//! ```rust
//! use alphabeta::{AlphaBetaConfig, AlphaBetaSearch};
//! use games_connect4::Board;
//!
//! let mut search = AlphaBetaSearch::new(AlphaBetaConfig::default().with_depth(1));
//! let outcome = search.run(&Board::new());
//!
//! // The centre column touches the most open windows
//! assert_eq!(outcome.best_move.map(|m| m.col()), Some(3));
//! ```
//!
//! # Known limitation
//!
//! Moves tying on value are resolved in favour of the first one visited.
//! Two forced wins of different length therefore look identical, and the
//! search may pick the slower one.

pub mod config;
pub mod eval;
pub mod search;

pub use config::AlphaBetaConfig;
pub use eval::{evaluate, is_decisive, LOSS, WIN};
pub use search::{search_parallel, AlphaBetaSearch, SearchOutcome};
