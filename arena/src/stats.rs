//! Match statistics tracking and persistence.
//!
//! Tallies results per seat (not per colour, since the first mover
//! alternates) and optionally writes a JSON snapshot.

use std::fs;
use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::{GameEnd, GameRecord};

/// Running tally over a match.
#[derive(Debug)]
pub struct MatchStats {
    /// Display label of each seat
    labels: [String; 2],
    games: u32,
    wins: [u32; 2],
    draws: u32,
    forfeits: u32,
    /// Games won by whoever moved first
    first_mover_wins: u32,
    total_moves: u64,
    start_time: Instant,
}

/// Serializable stats for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchStatsSnapshot {
    pub player_one: String,
    pub player_two: String,
    pub games: u32,
    pub player_one_wins: u32,
    pub player_two_wins: u32,
    pub draws: u32,
    pub forfeits: u32,
    pub first_mover_wins: u32,
    pub avg_game_length: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl MatchStats {
    pub fn new(player_one: impl Into<String>, player_two: impl Into<String>) -> Self {
        Self {
            labels: [player_one.into(), player_two.into()],
            games: 0,
            wins: [0, 0],
            draws: 0,
            forfeits: 0,
            first_mover_wins: 0,
            total_moves: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a finished game.
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_moves += game.moves.len() as u64;

        match game.winner {
            Some(seat) => {
                self.wins[seat] += 1;
                if seat == game.first_seat {
                    self.first_mover_wins += 1;
                }
            }
            None => self.draws += 1,
        }
        if game.end == GameEnd::Forfeit {
            self.forfeits += 1;
        }
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> MatchStatsSnapshot {
        let avg_game_length = if self.games > 0 {
            self.total_moves as f64 / self.games as f64
        } else {
            0.0
        };

        MatchStatsSnapshot {
            player_one: self.labels[0].clone(),
            player_two: self.labels[1].clone(),
            games: self.games,
            player_one_wins: self.wins[0],
            player_two_wins: self.wins[1],
            draws: self.draws,
            forfeits: self.forfeits,
            first_mover_wins: self.first_mover_wins,
            avg_game_length,
            runtime_seconds: self.start_time.elapsed().as_secs_f64(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            games = snapshot.games,
            player_one = %snapshot.player_one,
            player_one_wins = snapshot.player_one_wins,
            player_two = %snapshot.player_two,
            player_two_wins = snapshot.player_two_wins,
            draws = snapshot.draws,
            forfeits = snapshot.forfeits,
            first_mover_wins = snapshot.first_mover_wins,
            avg_game_length = format!("{:.1}", snapshot.avg_game_length),
            runtime_secs = format!("{:.1}", snapshot.runtime_seconds),
            "Match summary"
        );
    }

    /// Write stats to a JSON file (write-then-rename).
    pub fn write_stats(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())
            .context("Failed to serialize match stats")?;

        let temp_path = format!("{}.tmp", path);
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create {}", temp_path))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_path))?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e).with_context(|| format!("Failed to rename stats file to {}", path));
        }

        debug!("Wrote match stats to {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::Board;

    fn record(first_seat: usize, winner: Option<usize>, end: GameEnd, length: usize) -> GameRecord {
        let moves = Board::new().legal_moves().into_iter().cycle().take(length).collect();
        GameRecord {
            first_seat,
            winner,
            end,
            moves,
            board: Board::new(),
        }
    }

    #[test]
    fn test_new_stats_are_zero() {
        let stats = MatchStats::new("alphabeta", "mcts");
        let snap = stats.snapshot();

        assert_eq!(snap.games, 0);
        assert_eq!(snap.player_one_wins + snap.player_two_wins + snap.draws, 0);
        assert_eq!(snap.avg_game_length, 0.0);
    }

    #[test]
    fn test_record_tallies_by_seat() {
        let mut stats = MatchStats::new("alphabeta", "mcts");
        stats.record(&record(0, Some(0), GameEnd::Connect, 11));
        stats.record(&record(1, Some(0), GameEnd::Connect, 20));
        stats.record(&record(0, None, GameEnd::Draw, 42));
        stats.record(&record(1, Some(1), GameEnd::Forfeit, 3));

        let snap = stats.snapshot();
        assert_eq!(stats.games(), 4);
        assert_eq!(snap.player_one_wins, 2);
        assert_eq!(snap.player_two_wins, 1);
        assert_eq!(snap.draws, 1);
        assert_eq!(snap.forfeits, 1);
        assert_eq!(snap.first_mover_wins, 2);
        assert!((snap.avg_game_length - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_write_stats_json() {
        let path = std::env::temp_dir().join(format!("arena-stats-{}.json", std::process::id()));
        let path = path.to_str().unwrap().to_string();

        let mut stats = MatchStats::new("human", "guided");
        stats.record(&record(0, Some(1), GameEnd::Connect, 9));
        stats.write_stats(&path).unwrap();

        let written: MatchStatsSnapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.player_one, "human");
        assert_eq!(written.player_two, "guided");
        assert_eq!(written.player_two_wins, 1);
        assert_eq!(written.games, 1);
        assert!(!std::path::Path::new(&format!("{}.tmp", path)).exists());

        fs::remove_file(&path).unwrap();
    }
}
