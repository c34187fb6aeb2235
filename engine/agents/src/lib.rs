//! Connect Four players.
//!
//! [`Agent`] wraps every way of choosing a move behind one interface:
//!
//! - [`HumanAgent`]: reads a column number from a text stream
//! - [`AlphaBetaAgent`]: depth-bounded alpha-beta over the static evaluator
//! - [`MctsAgent`]: UCT with random rollouts
//! - [`GuidedAgent`]: MCTS steered by a policy/value [`Oracle`](mcts::Oracle)
//!
//! Searches work on relative boards where `+1` is the side to move. Callers
//! holding an absolute board use [`Agent::get_move_as`], which flips the board
//! for the second player. Moves are coordinates, so they need no flipping back.
//!
//! ```rust
//! use agents::{Agent, AgentKind};
//! use alphabeta::AlphaBetaConfig;
//! use games_connect4::{Board, Player};
//!
//! let mut agent = Agent::alpha_beta(AlphaBetaConfig::default().with_depth(2));
//! assert_eq!(agent.kind(), AgentKind::AlphaBeta);
//!
//! let board = Board::new();
//! let mv = agent.get_move_as(&board, Player::One).unwrap();
//! assert!(board.validate(mv).is_ok());
//! ```

mod agent;
mod error;
mod human;
mod kind;
mod search;

pub use agent::Agent;
pub use error::AgentError;
pub use human::HumanAgent;
pub use kind::AgentKind;
pub use search::{AlphaBetaAgent, GuidedAgent, MctsAgent};
