//! Locating, reading and overriding the configuration file.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::CentralConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "FOURPLAY_CONFIG";

/// Fallback locations, tried in order after `FOURPLAY_CONFIG`.
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

/// Why a config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parse one config file, without environment overrides.
pub fn read_config(path: &Path) -> Result<CentralConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the central configuration.
///
/// The first existing file among `$FOURPLAY_CONFIG`, `./config.toml` and
/// `../config.toml` is used; with none, the built-in defaults. Environment
/// overrides are applied last in every case.
pub fn load_config() -> CentralConfig {
    let explicit = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    if let Some(path) = &explicit {
        if !path.exists() {
            warn!(
                "{}={} not found, searching defaults",
                CONFIG_PATH_VAR,
                path.display()
            );
        }
    }

    let found = explicit
        .into_iter()
        .chain(CONFIG_SEARCH_PATHS.iter().map(PathBuf::from))
        .find(|path| path.exists());

    match found {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_from_path(&path)
        }
        None => {
            debug!("No config.toml found, using built-in defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Load `path`, falling back to the defaults if it cannot be read or parsed.
pub fn load_from_path(path: &Path) -> CentralConfig {
    let config = read_config(path).unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        CentralConfig::default()
    });
    apply_env_overrides(config)
}

/// Assigns `$key` to a config field when the variable is set.
/// The `parse` form skips values that do not parse.
macro_rules! env_override {
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply `FOURPLAY_<SECTION>_<KEY>` environment overrides.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    env_override!(config, common.log_level, "FOURPLAY_COMMON_LOG_LEVEL");

    env_override!(config, alphabeta.depth, "FOURPLAY_ALPHABETA_DEPTH", parse);
    env_override!(config, alphabeta.parallel, "FOURPLAY_ALPHABETA_PARALLEL", parse);

    env_override!(config, mcts.num_simulations, "FOURPLAY_MCTS_NUM_SIMULATIONS", parse);
    env_override!(config, mcts.c_uct, "FOURPLAY_MCTS_C_UCT", parse);
    env_override!(config, mcts.time_limit_ms, "FOURPLAY_MCTS_TIME_LIMIT_MS", parse);

    env_override!(config, guided.num_simulations, "FOURPLAY_GUIDED_NUM_SIMULATIONS", parse);
    env_override!(config, guided.c_puct, "FOURPLAY_GUIDED_C_PUCT", parse);
    env_override!(config, guided.dirichlet_alpha, "FOURPLAY_GUIDED_DIRICHLET_ALPHA", parse);
    env_override!(config, guided.dirichlet_weight, "FOURPLAY_GUIDED_DIRICHLET_WEIGHT", parse);
    env_override!(config, guided.temperature, "FOURPLAY_GUIDED_TEMPERATURE", parse);
    env_override!(config, guided.oracle, "FOURPLAY_GUIDED_ORACLE");

    env_override!(config, arena.games, "FOURPLAY_ARENA_GAMES", parse);
    env_override!(config, arena.player_one, "FOURPLAY_ARENA_PLAYER_ONE");
    env_override!(config, arena.player_two, "FOURPLAY_ARENA_PLAYER_TWO");
    env_override!(config, arena.seed, "FOURPLAY_ARENA_SEED", parse);
    env_override!(config, arena.max_invalid_moves, "FOURPLAY_ARENA_MAX_INVALID_MOVES", parse);
    env_override!(config, arena.move_delay_ms, "FOURPLAY_ARENA_MOVE_DELAY_MS", parse);

    config
}
