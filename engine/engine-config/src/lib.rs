//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared
//! by the binaries in the workspace.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`FOURPLAY_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! FOURPLAY_<SECTION>_<KEY>=value
//!
//! Examples:
//!     FOURPLAY_COMMON_LOG_LEVEL=debug
//!     FOURPLAY_ALPHABETA_DEPTH=7
//!     FOURPLAY_MCTS_TIME_LIMIT_MS=500
//!     FOURPLAY_ARENA_PLAYER_TWO=guided
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, read_config, ConfigError, CONFIG_PATH_VAR,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;
