//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_depth() -> u32 {
    defaults::depth()
}
fn d_parallel() -> bool {
    defaults::parallel()
}
fn d_num_sims() -> u32 {
    defaults::num_simulations()
}
fn d_c_uct() -> f64 {
    defaults::c_uct()
}
fn d_time_limit_ms() -> u64 {
    defaults::time_limit_ms()
}
fn d_guided_num_sims() -> u32 {
    defaults::guided_num_simulations()
}
fn d_c_puct() -> f64 {
    defaults::c_puct()
}
fn d_dirichlet_alpha() -> f64 {
    defaults::dirichlet_alpha()
}
fn d_dirichlet_weight() -> f64 {
    defaults::dirichlet_weight()
}
fn d_temperature() -> f64 {
    defaults::temperature()
}
fn d_oracle() -> String {
    defaults::oracle().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_player_one() -> String {
    defaults::player_one().into()
}
fn d_player_two() -> String {
    defaults::player_two().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_max_invalid_moves() -> u32 {
    defaults::max_invalid_moves()
}
fn d_move_delay_ms() -> u64 {
    defaults::move_delay_ms()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub alphabeta: AlphaBetaConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub guided: GuidedConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Settings shared by every binary
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Alpha-beta player settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AlphaBetaConfig {
    #[serde(default = "d_depth")]
    pub depth: u32,
    #[serde(default = "d_parallel")]
    pub parallel: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            depth: defaults::depth(),
            parallel: defaults::parallel(),
        }
    }
}

/// UCT player settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_sims")]
    pub num_simulations: u32,
    #[serde(default = "d_c_uct")]
    pub c_uct: f64,
    /// Per-move wall-clock budget in milliseconds (0 = simulation count only)
    #[serde(default = "d_time_limit_ms")]
    pub time_limit_ms: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::num_simulations(),
            c_uct: defaults::c_uct(),
            time_limit_ms: defaults::time_limit_ms(),
        }
    }
}

/// Oracle-guided player settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GuidedConfig {
    #[serde(default = "d_guided_num_sims")]
    pub num_simulations: u32,
    #[serde(default = "d_c_puct")]
    pub c_puct: f64,
    #[serde(default = "d_dirichlet_alpha")]
    pub dirichlet_alpha: f64,
    #[serde(default = "d_dirichlet_weight")]
    pub dirichlet_weight: f64,
    #[serde(default = "d_temperature")]
    pub temperature: f64,
    /// Which stock oracle drives the search ("uniform" or "random")
    #[serde(default = "d_oracle")]
    pub oracle: String,
}

impl Default for GuidedConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::guided_num_simulations(),
            c_puct: defaults::c_puct(),
            dirichlet_alpha: defaults::dirichlet_alpha(),
            dirichlet_weight: defaults::dirichlet_weight(),
            temperature: defaults::temperature(),
            oracle: defaults::oracle().into(),
        }
    }
}

/// Match runner settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_player_one")]
    pub player_one: String,
    #[serde(default = "d_player_two")]
    pub player_two: String,
    #[serde(default = "d_seed")]
    pub seed: u64,
    #[serde(default = "d_max_invalid_moves")]
    pub max_invalid_moves: u32,
    #[serde(default = "d_move_delay_ms")]
    pub move_delay_ms: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            player_one: defaults::player_one().into(),
            player_two: defaults::player_two().into(),
            seed: defaults::seed(),
            max_invalid_moves: defaults::max_invalid_moves(),
            move_delay_ms: defaults::move_delay_ms(),
        }
    }
}
