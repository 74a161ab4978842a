//! Request and response documents exchanged with the backend.
//!
//! The request is four fixed lines. The response is free-form; only lines
//! starting with `COMPUTER PLAYED` matter and the last one wins, since the
//! backend interleaves diagnostics with its status output.

use std::fmt;

use engine_core::{parse_san_move, parse_uci_move, Chess, EngineError, Move};

use crate::time_limit::TimeLimit;

/// Hash table size the backend is always configured with.
pub const DEFAULT_TABLE_SIZE: u64 = 69_696_983;

/// Marks a line announcing the backend's move.
pub const PLAYED_PREFIX: &str = "COMPUTER PLAYED";

/// Column where the move token starts on a played line.
pub const MOVE_OFFSET: usize = 16;

/// Token the backend plays instead of a move when it gives up.
pub const RESIGN_TOKEN: &str = "RESIGN";

/// One request, built fresh for each search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDocument {
    pub time_limit: TimeLimit,
    pub table_size: u64,
    pub fen: String,
}

impl RequestDocument {
    pub fn new(time_limit: TimeLimit, table_size: u64, fen: impl Into<String>) -> Self {
        Self {
            time_limit,
            table_size,
            fen: fen.into(),
        }
    }

    /// The protocol lines, in the order the backend expects them.
    pub fn lines(&self) -> [String; 4] {
        [
            format!("setoption time_limit {}", self.time_limit),
            format!("setoption table_size {}", self.table_size),
            format!("go {}", self.fen),
            "quit".to_string(),
        ]
    }
}

impl fmt::Display for RequestDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// What the backend decided, before it is checked against the position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveToken {
    Resign,
    Move(String),
}

impl MoveToken {
    fn from_text(text: &str) -> Self {
        if text == RESIGN_TOKEN {
            MoveToken::Resign
        } else {
            MoveToken::Move(text.to_string())
        }
    }
}

/// Parse a move token, trying SAN first and coordinate notation second.
pub fn resolve_move(position: &Chess, token: &str) -> Result<Move, EngineError> {
    parse_san_move(position, token)
        .or_else(|| parse_uci_move(position, token))
        .ok_or_else(|| {
            EngineError::Protocol(format!(
                "`{token}` is neither a legal SAN nor a legal UCI move"
            ))
        })
}

/// Everything the backend wrote for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDocument {
    lines: Vec<String>,
}

impl ResponseDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Token of the last played line, or `None` if the backend never played.
    ///
    /// A played line with nothing after the prefix is a protocol error.
    pub fn move_token(&self) -> Result<Option<MoveToken>, EngineError> {
        let Some(line) = self
            .lines
            .iter()
            .rev()
            .find(|line| line.starts_with(PLAYED_PREFIX))
        else {
            return Ok(None);
        };

        let token = line.get(MOVE_OFFSET..).unwrap_or("").trim();
        if token.is_empty() {
            return Err(EngineError::Protocol(format!(
                "played line without a move: `{line}`"
            )));
        }
        Ok(Some(MoveToken::from_text(token)))
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
