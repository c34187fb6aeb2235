//! Agent kind tags, as written in config files and on the command line.

use std::fmt;
use std::str::FromStr;

use crate::error::AgentError;

/// Which strategy an [`Agent`](crate::Agent) plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Human,
    AlphaBeta,
    Mcts,
    Guided,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Human,
        AgentKind::AlphaBeta,
        AgentKind::Mcts,
        AgentKind::Guided,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Human => "human",
            AgentKind::AlphaBeta => "alphabeta",
            AgentKind::Mcts => "mcts",
            AgentKind::Guided => "guided",
        }
    }

    /// Whether moves come from a person rather than a search.
    pub fn is_interactive(self) -> bool {
        self == AgentKind::Human
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(AgentKind::Human),
            "alphabeta" | "alpha-beta" | "ab" => Ok(AgentKind::AlphaBeta),
            "mcts" | "uct" => Ok(AgentKind::Mcts),
            "guided" | "guided-mcts" | "puct" => Ok(AgentKind::Guided),
            _ => Err(AgentError::UnknownKind(s.to_string())),
        }
    }
}
