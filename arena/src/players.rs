//! Building agents from the arena configuration.

use agents::{Agent, AgentKind};
use anyhow::{anyhow, Result};
use mcts::{RandomOracle, UniformOracle};

use crate::config::Config;

/// Build the agent for `seat` (0 or 1).
///
/// Each seat gets its own seed so two search agents of the same kind do not
/// mirror each other.
pub fn build_agent(config: &Config, kind: AgentKind, seat: usize) -> Result<Agent> {
    let seed = config.seed.wrapping_add(seat as u64);

    let agent = match kind {
        AgentKind::Human => Agent::human(format!("Player {}", seat + 1)),
        AgentKind::AlphaBeta => Agent::alpha_beta(config.alphabeta_config()),
        AgentKind::Mcts => Agent::mcts(config.mcts_config(), seed),
        AgentKind::Guided => match config.oracle.as_str() {
            "uniform" => Agent::guided(UniformOracle::new(), config.guided_config(), seed),
            "random" => Agent::guided(RandomOracle::new(seed), config.guided_config(), seed),
            other => return Err(anyhow!("invalid oracle '{}'", other)),
        },
    };

    Ok(agent)
}

/// Agents for both seats, in seat order.
pub fn build_agents(config: &Config) -> Result<[Agent; 2]> {
    let [one, two] = config.player_kinds()?;
    Ok([build_agent(config, one, 0)?, build_agent(config, two, 1)?])
}
