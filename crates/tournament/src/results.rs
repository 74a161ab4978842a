//! Game records, match scores and result files

use anyhow::Context;
use engine_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::match_runner::MatchConfig;

/// Outcome of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    /// PGN result tag
    pub fn as_pgn(&self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }

    /// Score in `[0, 1]` for the player of `color`
    pub fn score_for(&self, color: Color) -> f64 {
        match (self, color) {
            (GameResult::Draw, _) => 0.5,
            (GameResult::WhiteWins, Color::White) | (GameResult::BlackWins, Color::Black) => 1.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_pgn())
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    Resignation,
    DrawAgreed,
    TimeForfeit,
    /// The adapter returned an error or no move at all
    EngineFailure,
    IllegalMove,
    MoveLimit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::FiftyMoveRule => "fifty-move rule",
            Termination::Resignation => "resignation",
            Termination::DrawAgreed => "draw agreed",
            Termination::TimeForfeit => "time forfeit",
            Termination::EngineFailure => "engine failure",
            Termination::IllegalMove => "illegal move",
            Termination::MoveLimit => "move limit",
        };
        f.write_str(text)
    }
}

/// Everything worth keeping about a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub start_fen: String,
    /// Moves played, in UCI notation
    pub moves: Vec<String>,
    pub result: GameResult,
    pub termination: Termination,
    /// Error text when an engine failed or played an illegal move
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Score of a match from engine1's perspective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    /// Count a game in which engine1 played `engine1_color`.
    pub fn record(&mut self, result: GameResult, engine1_color: Color) {
        match result {
            GameResult::Draw => self.draws += 1,
            other if other == GameResult::win_for(engine1_color) => self.wins += 1,
            _ => self.losses += 1,
        }
    }
}

/// Complete results of one match, as written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    pub engine1: String,
    pub engine2: String,
    /// Configuration used
    pub config: MatchConfig,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

impl TournamentResults {
    pub fn new(engine1: &str, engine2: &str, config: MatchConfig) -> Self {
        Self {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            config,
            result: MatchResult::new(),
            games: Vec::new(),
        }
    }

    /// Add a finished game; `engine1_color` is the colour engine1 had in it.
    pub fn add_game(&mut self, game: GameRecord, engine1_color: Color) {
        self.result.record(game.result, engine1_color);
        self.games.push(game);
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize results")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Match: {} vs {} ===\n\n",
            self.engine1, self.engine2
        ));
        let budget = match self.config.move_time() {
            Some(t) => format!("{} ms/move", t.as_millis()),
            None => self.config.time_control.to_string(),
        };
        report.push_str(&format!(
            "Config: {} games, {}, max {} plies\n\n",
            self.config.num_games, budget, self.config.max_moves
        ));

        report.push_str(&format!(
            "{:<4} {:<20} {:<20} {:<8} {:<22} {:>6}\n",
            "#", "White", "Black", "Result", "Termination", "Plies"
        ));
        report.push_str(&"-".repeat(84));
        report.push('\n');

        for (i, game) in self.games.iter().enumerate() {
            report.push_str(&format!(
                "{:<4} {:<20} {:<20} {:<8} {:<22} {:>6}\n",
                i + 1,
                game.white,
                game.black,
                game.result.as_pgn(),
                game.termination.to_string(),
                game.moves.len()
            ));
        }

        report.push_str(&format!(
            "\n{}: {} wins, {} losses, {} draws (score {:.1}%)\n",
            self.engine1,
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0
        ));

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
