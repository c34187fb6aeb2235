//! Arena - plays Connect Four matches between two agents
//!
//! A batch runner that:
//! 1. Seats two agents (human, alphabeta, mcts or guided) from config
//! 2. Plays the configured number of games, alternating the first mover
//! 3. Validates every proposed move, allowing a few retries before forfeit
//! 4. Logs each result and a final tally, optionally written as JSON

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod config;
mod game;
mod players;
mod stats;

use crate::config::Config;
use crate::game::{play_game, GameSettings};
use crate::players::build_agents;
use crate::stats::MatchStats;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let mut agents = build_agents(config)?;
    let kinds = config.player_kinds()?;
    let show_board = kinds.iter().any(|k| k.is_interactive());

    let settings = GameSettings {
        max_invalid_moves: config.max_invalid_moves,
        move_delay: config.move_delay(),
        show_board,
    };
    let mut stats = MatchStats::new(agents[0].name(), agents[1].name());

    for game_num in 0..config.games {
        let first_seat = (game_num % 2) as usize;
        let record = play_game(&mut agents, first_seat, &settings)?;

        let winner = record.winner.map(|seat| agents[seat].name()).unwrap_or("none");
        info!(
            game = game_num + 1,
            first = agents[first_seat].name(),
            winner,
            end = %record.end,
            moves = record.moves.len(),
            "Game finished"
        );
        if show_board {
            println!("Game {}: {} ({})\n", game_num + 1, winner, record.end);
        }

        stats.record(&record);
    }

    stats.log_summary();
    if let Some(path) = &config.stats_path {
        stats.write_stats(path)?;
        info!(path = %path, "Match stats written");
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    info!(
        player_one = %config.player_one,
        player_two = %config.player_two,
        games = config.games,
        seed = config.seed,
        "Starting arena"
    );

    match run(&config) {
        Ok(()) => {
            info!("Arena completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Arena failed: {}", e);
            Err(e)
        }
    }
}
