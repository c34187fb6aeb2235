//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time, so a missing or partial
//! config.toml still yields a complete configuration.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    alphabeta: AlphaBetaDefaults,
    mcts: MctsDefaults,
    guided: GuidedDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct AlphaBetaDefaults {
    depth: u32,
    parallel: bool,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    num_simulations: u32,
    c_uct: f64,
    time_limit_ms: u64,
}

#[derive(Debug, Deserialize)]
struct GuidedDefaults {
    num_simulations: u32,
    c_puct: f64,
    dirichlet_alpha: f64,
    dirichlet_weight: f64,
    temperature: f64,
    oracle: String,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    player_one: String,
    player_two: String,
    seed: u64,
    max_invalid_moves: u32,
    move_delay_ms: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Alpha-beta
pub fn depth() -> u32 {
    DEFAULTS.alphabeta.depth
}
pub fn parallel() -> bool {
    DEFAULTS.alphabeta.parallel
}

// MCTS
pub fn num_simulations() -> u32 {
    DEFAULTS.mcts.num_simulations
}
pub fn c_uct() -> f64 {
    DEFAULTS.mcts.c_uct
}
pub fn time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}

// Guided
pub fn guided_num_simulations() -> u32 {
    DEFAULTS.guided.num_simulations
}
pub fn c_puct() -> f64 {
    DEFAULTS.guided.c_puct
}
pub fn dirichlet_alpha() -> f64 {
    DEFAULTS.guided.dirichlet_alpha
}
pub fn dirichlet_weight() -> f64 {
    DEFAULTS.guided.dirichlet_weight
}
pub fn temperature() -> f64 {
    DEFAULTS.guided.temperature
}
pub fn oracle() -> &'static str {
    &DEFAULTS.guided.oracle
}

// Arena
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn player_one() -> &'static str {
    &DEFAULTS.arena.player_one
}
pub fn player_two() -> &'static str {
    &DEFAULTS.arena.player_two
}
pub fn seed() -> u64 {
    DEFAULTS.arena.seed
}
pub fn max_invalid_moves() -> u32 {
    DEFAULTS.arena.max_invalid_moves
}
pub fn move_delay_ms() -> u64 {
    DEFAULTS.arena.move_delay_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        // Just accessing these will verify the TOML parses correctly
        assert_eq!(log_level(), "info");
        assert_eq!(depth(), 5);
        assert!(!parallel());
    }

    #[test]
    fn test_mcts_defaults() {
        assert_eq!(num_simulations(), 1000);
        assert!((c_uct() - std::f64::consts::SQRT_2).abs() < 1e-6);
        assert_eq!(time_limit_ms(), 0);
    }

    #[test]
    fn test_guided_defaults() {
        assert_eq!(guided_num_simulations(), 100);
        assert!((c_puct() - 1.0).abs() < f64::EPSILON);
        assert_eq!(dirichlet_alpha(), 0.0);
        assert!((dirichlet_weight() - 0.25).abs() < f64::EPSILON);
        assert_eq!(temperature(), 0.0);
        assert_eq!(oracle(), "uniform");
    }

    #[test]
    fn test_arena_defaults() {
        assert_eq!(games(), 10);
        assert_eq!(player_one(), "alphabeta");
        assert_eq!(player_two(), "mcts");
        assert_eq!(seed(), 42);
        assert_eq!(max_invalid_moves(), 3);
        assert_eq!(move_delay_ms(), 0);
    }
}
