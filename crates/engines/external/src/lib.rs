//! External-Process Engine
//!
//! Plays by handing each position to a separate backend program through
//! files instead of a live pipe. One search is one round trip:
//! 1. turn the time budget into a millisecond `time_limit`
//! 2. write `input-<n>.txt` with the time limit, table size, position and `quit`
//! 3. run the backend with that file on stdin and `output-<n>.txt` on stdout
//! 4. take the last `COMPUTER PLAYED <move>` line and read the move as SAN,
//!    falling back to UCI, or resign if the move is `RESIGN`
//!
//! Nothing is retried: once the backend has consumed a request its state is
//! unknown, so every failure is returned to the harness as is.

mod config;
mod process;
mod protocol;
mod time_limit;

use std::path::{Path, PathBuf};

use engine_core::{
    fen_with_en_passant, move_to_uci, Chess, EngineError, MoveDecision, Position, SearchAdapter,
    TimeBudget,
};
use tracing::{debug, info};

pub use config::ExternalEngineConfig;
pub use process::{run_backend, FilePair, ScratchArea};
pub use protocol::{
    resolve_move, MoveToken, RequestDocument, ResponseDocument, DEFAULT_TABLE_SIZE, MOVE_OFFSET,
    PLAYED_PREFIX, RESIGN_TOKEN,
};
pub use time_limit::{TimeLimit, MIN_TIME_LIMIT_MS, TIME_MARGIN_MS};

/// Adapter that delegates every move to an external backend process.
#[derive(Debug)]
pub struct ExternalEngine {
    config: ExternalEngineConfig,
    command: PathBuf,
    scratch: ScratchArea,
    /// Searches started so far; names the next file pair.
    moves_requested: u64,
}

impl ExternalEngine {
    pub fn new(config: ExternalEngineConfig) -> Result<Self, EngineError> {
        let command = config.resolved_command()?;
        let scratch = ScratchArea::new(&config.scratch_dir);
        Ok(Self {
            config,
            command,
            scratch,
            moves_requested: 0,
        })
    }

    pub fn config(&self) -> &ExternalEngineConfig {
        &self.config
    }

    pub fn command(&self) -> &Path {
        &self.command
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.root()
    }

    pub fn moves_requested(&self) -> u64 {
        self.moves_requested
    }

    /// Claim the file pair for the next call.
    fn next_files(&mut self) -> Result<FilePair, EngineError> {
        let files = self.scratch.allocate(self.moves_requested)?;
        self.moves_requested += 1;
        Ok(files)
    }
}

impl SearchAdapter for ExternalEngine {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn search(
        &mut self,
        position: &Chess,
        budget: &TimeBudget,
        _ponder: bool,
        _draw_offered: bool,
    ) -> Result<MoveDecision, EngineError> {
        let time_limit = TimeLimit::for_budget(budget, position.turn());
        let files = self.next_files()?;
        debug!(
            engine = %self.config.name,
            time_limit = %time_limit,
            input = %files.input.display(),
            output = %files.output.display(),
            "requesting move"
        );

        let request = RequestDocument::new(
            time_limit,
            self.config.table_size,
            fen_with_en_passant(position),
        );
        files.write_request(&request)?;
        run_backend(&self.command, &self.config.args, &files)?;

        let response = files.read_response()?;
        let token = response.move_token()?.ok_or_else(|| {
            EngineError::Protocol(format!(
                "no `{PLAYED_PREFIX}` line in {} ({} lines)",
                files.output.display(),
                response.lines().len()
            ))
        })?;

        match token {
            MoveToken::Resign => {
                info!(engine = %self.config.name, "backend resigned");
                Ok(MoveDecision::resign())
            }
            MoveToken::Move(text) => {
                let mv = resolve_move(position, &text)?;
                info!(engine = %self.config.name, token = %text, uci = %move_to_uci(&mv), "backend played");
                Ok(MoveDecision::play(mv))
            }
        }
    }
}
