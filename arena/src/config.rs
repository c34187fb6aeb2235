//! Configuration for the arena
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use std::time::Duration;

use agents::AgentKind;
use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

/// Stock oracles the guided agent can be driven by.
pub const ORACLES: [&str; 2] = ["uniform", "random"];

// Default value functions that read from central config
fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_player_one() -> String {
    CENTRAL_CONFIG.arena.player_one.clone()
}

fn default_player_two() -> String {
    CENTRAL_CONFIG.arena.player_two.clone()
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.arena.seed
}

fn default_max_invalid_moves() -> u32 {
    CENTRAL_CONFIG.arena.max_invalid_moves
}

fn default_move_delay_ms() -> u64 {
    CENTRAL_CONFIG.arena.move_delay_ms
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_depth() -> u32 {
    CENTRAL_CONFIG.alphabeta.depth
}

fn default_parallel() -> bool {
    CENTRAL_CONFIG.alphabeta.parallel
}

fn default_num_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.num_simulations
}

fn default_c_uct() -> f64 {
    CENTRAL_CONFIG.mcts.c_uct
}

fn default_time_limit_ms() -> u64 {
    CENTRAL_CONFIG.mcts.time_limit_ms
}

fn default_guided_simulations() -> u32 {
    CENTRAL_CONFIG.guided.num_simulations
}

fn default_c_puct() -> f64 {
    CENTRAL_CONFIG.guided.c_puct
}

fn default_dirichlet_alpha() -> f64 {
    CENTRAL_CONFIG.guided.dirichlet_alpha
}

fn default_dirichlet_weight() -> f64 {
    CENTRAL_CONFIG.guided.dirichlet_weight
}

fn default_temperature() -> f64 {
    CENTRAL_CONFIG.guided.temperature
}

fn default_oracle() -> String {
    CENTRAL_CONFIG.guided.oracle.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Connect Four arena - plays matches between two agents")]
#[command(
    long_about = "Plays a series of Connect Four games between two agents (human, alphabeta,
mcts or guided), alternating who moves first, and reports the tally.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Agent in the first seat (human, alphabeta, mcts, guided)
    #[arg(long, default_value_t = default_player_one())]
    pub player_one: String,

    /// Agent in the second seat
    #[arg(long, default_value_t = default_player_two())]
    pub player_two: String,

    /// Seed for the search agents' random number generators
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Rejected moves allowed per turn before the player forfeits
    #[arg(long, default_value_t = default_max_invalid_moves())]
    pub max_invalid_moves: u32,

    /// Minimum milliseconds between moves, to make fast games watchable
    #[arg(long, default_value_t = default_move_delay_ms())]
    pub move_delay_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Alpha-beta search depth in plies
    #[arg(long, default_value_t = default_depth())]
    pub depth: u32,

    /// Search alpha-beta root moves in parallel (true/false)
    #[arg(long, default_value_t = default_parallel(), action = clap::ArgAction::Set)]
    pub parallel: bool,

    /// UCT simulations per move
    #[arg(long, default_value_t = default_num_simulations())]
    pub num_simulations: u32,

    /// UCT exploration constant
    #[arg(long, default_value_t = default_c_uct())]
    pub c_uct: f64,

    /// UCT wall-clock budget per move in milliseconds (0 to disable)
    #[arg(long, default_value_t = default_time_limit_ms())]
    pub time_limit_ms: u64,

    /// Guided search simulations per move
    #[arg(long, default_value_t = default_guided_simulations())]
    pub guided_simulations: u32,

    /// Guided search prior weight
    #[arg(long, default_value_t = default_c_puct())]
    pub c_puct: f64,

    /// Dirichlet noise alpha on guided root priors (0 to disable)
    #[arg(long, default_value_t = default_dirichlet_alpha())]
    pub dirichlet_alpha: f64,

    /// Fraction of each guided root prior replaced by noise
    #[arg(long, default_value_t = default_dirichlet_weight())]
    pub dirichlet_weight: f64,

    /// Guided move temperature (0 plays the most visited column)
    #[arg(long, default_value_t = default_temperature())]
    pub temperature: f64,

    /// Oracle for the guided agent (uniform, random)
    #[arg(long, default_value_t = default_oracle())]
    pub oracle: String,

    /// Write the final tally as JSON to this path
    #[arg(long)]
    pub stats_path: Option<String>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        self.player_kinds()?;

        if self.depth == 0 {
            return Err(anyhow!("depth must be at least 1"));
        }

        if self.num_simulations == 0 {
            return Err(anyhow!("num_simulations must be greater than 0"));
        }

        if self.guided_simulations == 0 {
            return Err(anyhow!("guided_simulations must be greater than 0"));
        }

        if !self.c_uct.is_finite() || self.c_uct < 0.0 {
            return Err(anyhow!("c_uct must be a non-negative number"));
        }

        if !self.c_puct.is_finite() || self.c_puct < 0.0 {
            return Err(anyhow!("c_puct must be a non-negative number"));
        }

        if !self.dirichlet_alpha.is_finite() || self.dirichlet_alpha < 0.0 {
            return Err(anyhow!("dirichlet_alpha must be a non-negative number"));
        }

        if !(0.0..=1.0).contains(&self.dirichlet_weight) {
            return Err(anyhow!("dirichlet_weight must be between 0 and 1"));
        }

        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(anyhow!("temperature must be a non-negative number"));
        }

        if !ORACLES.contains(&self.oracle.as_str()) {
            return Err(anyhow!(
                "invalid oracle '{}', expected one of {}",
                self.oracle,
                ORACLES.join(", ")
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Agent kinds for the two seats, in seat order.
    pub fn player_kinds(&self) -> Result<[AgentKind; 2]> {
        Ok([self.player_one.parse()?, self.player_two.parse()?])
    }

    pub fn alphabeta_config(&self) -> alphabeta::AlphaBetaConfig {
        alphabeta::AlphaBetaConfig::default()
            .with_depth(self.depth)
            .with_parallel(self.parallel)
    }

    pub fn mcts_config(&self) -> mcts::MctsConfig {
        let config = mcts::MctsConfig::default()
            .with_simulations(self.num_simulations)
            .with_c_uct(self.c_uct as f32);
        match self.time_limit() {
            Some(limit) => config.with_time_limit(limit),
            None => config,
        }
    }

    pub fn guided_config(&self) -> mcts::GuidedConfig {
        mcts::GuidedConfig::default()
            .with_simulations(self.guided_simulations)
            .with_c_puct(self.c_puct as f32)
            .with_dirichlet(self.dirichlet_alpha as f32, self.dirichlet_weight as f32)
            .with_temperature(self.temperature as f32)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }

    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }
}
