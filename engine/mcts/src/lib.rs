//! Monte Carlo Tree Search for Connect Four.
//!
//! Two searches share one arena tree:
//!
//! - [`MctsSearch`]: plain UCT. Leaves are scored by a uniform random playout
//!   from one freshly expanded child.
//! - [`GuidedSearch`]: AlphaZero-style. Leaves are scored by a policy/value
//!   [`Oracle`], whose priors steer selection.
//!
//! # Overview
//!
//! Each simulation consists of four phases:
//!
//! 1. **Selection**: Traverse the tree by UCT (or the prior-weighted score)
//!    to an unexpanded or terminal node
//! 2. **Expansion**: Add one child per open column
//! 3. **Evaluation**: Random playout, or a single oracle call
//! 4. **Backpropagation**: Update visit counts and value sums along the
//!    selected path, flipping sign at every ply
//!
//! Boards are relative (`+1` to move), so a child's board is its parent's
//! board after the move, negated.
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::Board;
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let config = MctsConfig::for_testing().with_simulations(100);
//! let result = run_mcts(&Board::new(), config, &mut rng).unwrap();
//!
//! assert_eq!(result.visits.iter().sum::<u32>(), 100);
//! println!("Best move: {}", result.best_move);
//! ```
//!
//! # Configuration
//!
//! - [`MctsConfig`]: simulation budget, UCT constant, optional time limit
//! - [`GuidedConfig`]: simulation budget, `c_puct`, root Dirichlet noise,
//!   move temperature
//!
//! # Oracles
//!
//! - [`UniformOracle`]: uniform prior over open columns, value 0
//! - [`RandomOracle`]: uniform prior, random value in [-1, 1]
//! - any `Fn(&Observation) -> Result<OracleOutput, OracleError>`

pub mod config;
pub mod guided;
pub mod node;
pub mod oracle;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{GuidedConfig, MctsConfig};
pub use guided::{run_guided, GuidedSearch};
pub use node::{Children, MctsNode, NodeId};
pub use oracle::{
    uniform_prior, Oracle, OracleError, OracleOutput, RandomOracle, UniformOracle,
    PRIOR_TOLERANCE,
};
pub use rollout::random_rollout;
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
