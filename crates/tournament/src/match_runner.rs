//! Match runner for playing games between search adapters

use engine_core::{
    fen_with_en_passant, move_to_uci, position_from_fen, Chess, Color, EngineError, FenError,
    MoveDecision, NotificationRelay, Position, SearchAdapter, SideClock, TimeBudget, TimeControl,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::results::{GameRecord, GameResult, Termination, TournamentResults};

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Clock each side starts with, and the increment per move
    pub time_control: TimeControl,
    /// Flat time per move in ms; replaces the clocks when set
    pub move_time_ms: Option<u64>,
    /// Time allowed for each side's first move, not taken off the clock
    pub first_move_time_ms: u64,
    /// Maximum plies per game before declaring draw
    pub max_moves: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Starting position; the standard one when unset
    pub start_fen: Option<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            time_control: TimeControl::new(Duration::from_secs(60), Duration::from_secs(1)),
            move_time_ms: None,
            first_move_time_ms: 10_000,
            max_moves: 200,
            alternate_colors: true,
            start_fen: None,
        }
    }
}

impl MatchConfig {
    pub fn move_time(&self) -> Option<Duration> {
        self.move_time_ms.map(Duration::from_millis)
    }

    pub fn first_move_time(&self) -> Duration {
        Duration::from_millis(self.first_move_time_ms)
    }
}

/// How a game stopped, before it is turned into a record
struct Finish {
    result: GameResult,
    termination: Termination,
    error: Option<String>,
}

impl Finish {
    fn new(result: GameResult, termination: Termination) -> Self {
        Self {
            result,
            termination,
            error: None,
        }
    }

    /// `loser` forfeits because of `error`.
    fn forfeit(loser: Color, termination: Termination, error: String) -> Self {
        Self {
            result: GameResult::win_for(!loser),
            termination,
            error: Some(error),
        }
    }
}

/// Checks the rules that end a game regardless of what the engines want.
fn adjudicate(pos: &Chess) -> Option<Finish> {
    if pos.is_checkmate() {
        return Some(Finish::new(
            GameResult::win_for(!pos.turn()),
            Termination::Checkmate,
        ));
    }
    if pos.is_stalemate() {
        return Some(Finish::new(GameResult::Draw, Termination::Stalemate));
    }
    if pos.is_insufficient_material() {
        return Some(Finish::new(
            GameResult::Draw,
            Termination::InsufficientMaterial,
        ));
    }
    if pos.halfmoves() >= 100 {
        return Some(Finish::new(GameResult::Draw, Termination::FiftyMoveRule));
    }
    None
}

/// Game over: result first, then `quit`.
fn farewell(engine: &mut dyn SearchAdapter, summary: &Value) {
    let mut relay = NotificationRelay::new(engine);
    relay.send_game_result(summary.clone());
    relay.quit();
}

fn side_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
    start: Chess,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Result<Self, FenError> {
        let start = match &config.start_fen {
            Some(fen) => position_from_fen(fen)?,
            None => Chess::default(),
        };
        Ok(Self { config, start })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two engines
    ///
    /// The score in the returned results is from engine1's perspective
    pub fn run_match(
        &self,
        engine1: &mut dyn SearchAdapter,
        engine2: &mut dyn SearchAdapter,
    ) -> TournamentResults {
        let mut results =
            TournamentResults::new(engine1.name(), engine2.name(), self.config.clone());

        for game_num in 0..self.config.num_games {
            // Alternate colors if configured
            let engine1_color = if !self.config.alternate_colors || game_num % 2 == 0 {
                Color::White
            } else {
                Color::Black
            };

            let game = match engine1_color {
                Color::White => self.play_game(engine1, engine2),
                Color::Black => self.play_game(engine2, engine1),
            };
            let (result, termination) = (game.result, game.termination);
            results.add_game(game, engine1_color);

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                result = result.as_pgn(),
                %termination,
                engine1_color = ?engine1_color,
                score = %format!(
                    "{}-{}-{}",
                    results.result.wins, results.result.losses, results.result.draws
                ),
                "game finished"
            );
        }

        results
    }

    /// Play a single game from the configured start position
    pub fn play_game(
        &self,
        white: &mut dyn SearchAdapter,
        black: &mut dyn SearchAdapter,
    ) -> GameRecord {
        let time_control = self.config.time_control;
        white.time_control(&time_control);
        black.time_control(&time_control);
        let white_name = white.name().to_string();
        let black_name = black.name().to_string();
        NotificationRelay::new(&mut *white)
            .send_opponent_information(json!({ "name": black_name, "color": "black" }));
        NotificationRelay::new(&mut *black)
            .send_opponent_information(json!({ "name": white_name, "color": "white" }));

        let mut pos = self.start.clone();
        let mut clocks: [SideClock; 2] = [time_control.starting_clock(); 2];
        let mut has_moved = [false; 2];
        let mut moves = Vec::new();
        // Draw offer made by the side that moved last
        let mut pending_offer = false;

        let finish = loop {
            if let Some(finish) = adjudicate(&pos) {
                break finish;
            }
            if moves.len() >= self.config.max_moves as usize {
                break Finish::new(GameResult::Draw, Termination::MoveLimit);
            }

            let turn = pos.turn();
            let side = side_index(turn);
            let first = !has_moved[side];
            let budget = match self.config.move_time() {
                Some(t) => TimeBudget::fixed(t),
                None => TimeBudget::clock(clocks[0], clocks[1]),
            };

            let started = Instant::now();
            let searched = match turn {
                Color::White => self.ask(white, &pos, &budget, first, pending_offer),
                Color::Black => self.ask(black, &pos, &budget, first, pending_offer),
            };
            let elapsed = started.elapsed();
            has_moved[side] = true;

            if !first && self.config.move_time().is_none() {
                clocks[side].spend(elapsed);
                if clocks[side].is_flagged() {
                    break Finish::new(GameResult::win_for(!turn), Termination::TimeForfeit);
                }
                clocks[side].add_increment();
            }

            let decision = match searched {
                Ok(decision) => decision,
                Err(err) => {
                    warn!(side = ?turn, error = %err, "engine failed");
                    break Finish::forfeit(turn, Termination::EngineFailure, err.to_string());
                }
            };

            if decision.resigned {
                break Finish::new(GameResult::win_for(!turn), Termination::Resignation);
            }
            if decision.draw_offered && pending_offer {
                break Finish::new(GameResult::Draw, Termination::DrawAgreed);
            }

            let Some(mv) = decision.best_move else {
                break Finish::forfeit(
                    turn,
                    Termination::EngineFailure,
                    "neither a move nor a resignation".to_string(),
                );
            };
            if !pos.is_legal(&mv) {
                let uci = move_to_uci(&mv);
                warn!(side = ?turn, %uci, fen = %fen_with_en_passant(&pos), "illegal move");
                break Finish::forfeit(
                    turn,
                    Termination::IllegalMove,
                    format!("illegal move {uci} in {}", fen_with_en_passant(&pos)),
                );
            }

            debug!(ply = moves.len() + 1, side = ?turn, mv = %move_to_uci(&mv), ?elapsed, "move");
            moves.push(move_to_uci(&mv));
            pos.play_unchecked(&mv);
            pending_offer = decision.draw_offered;
        };

        let record = GameRecord {
            white: white_name,
            black: black_name,
            start_fen: fen_with_en_passant(&self.start),
            moves,
            result: finish.result,
            termination: finish.termination,
            error: finish.error,
        };

        let summary = json!({
            "result": record.result.as_pgn(),
            "termination": record.termination.to_string(),
        });
        farewell(white, &summary);
        farewell(black, &summary);

        record
    }

    fn ask(
        &self,
        engine: &mut dyn SearchAdapter,
        pos: &Chess,
        budget: &TimeBudget,
        first: bool,
        draw_offered: bool,
    ) -> Result<MoveDecision, EngineError> {
        if first {
            engine.first_search(pos, self.config.first_move_time(), draw_offered)
        } else {
            engine.search(pos, budget, false, draw_offered)
        }
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
