use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures an adapter may surface from `search`.
///
/// None of these are retried by the adapter itself. A resignation is not an
/// error and is reported through `MoveDecision::resigned` instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The adapter cannot run with the settings it was given.
    #[error("engine misconfigured: {0}")]
    Configuration(String),

    /// The scratch directory for request/response files could not be created.
    #[error("cannot prepare scratch directory {}: {source}", path.display())]
    ScratchDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backend could not be started, or its files could not be written or read.
    #[error("failed to {action} {}: {source}", path.display())]
    Invocation {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backend answered, but not with anything we can turn into a move.
    #[error("unreadable engine response: {0}")]
    Protocol(String),

    /// Asked to move in a position that has no legal moves.
    #[error("no legal moves available")]
    NoLegalMoves,
}

impl EngineError {
    /// True for errors caused by the adapter's own setup rather than by a single call.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::Configuration(_) | EngineError::ScratchDir { .. }
        )
    }
}
