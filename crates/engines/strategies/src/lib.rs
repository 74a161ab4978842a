//! Homemade Strategies
//!
//! Engines that pick a legal move without searching at all:
//! - `RandomMove`: uniformly random
//! - `Alphabetical`: first move by its SAN string
//! - `FirstMove`: first move by its UCI string
//!
//! Useful as baselines (any real engine should easily beat these) and for
//! exercising the harness without an external backend.

use engine_core::{
    move_to_san, move_to_uci, Chess, EngineError, Move, MoveDecision, Position, SearchAdapter,
    TimeBudget,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::trace;


fn legal_moves(position: &Chess) -> Result<Vec<Move>, EngineError> {
    let moves: Vec<Move> = position.legal_moves().into_iter().collect();
    if moves.is_empty() {
        return Err(EngineError::NoLegalMoves);
    }
    Ok(moves)
}

/// Plays a uniformly random legal move.
#[derive(Debug, Clone)]
pub struct RandomMove {
    rng: StdRng,
}

impl RandomMove {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible choices for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMove {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAdapter for RandomMove {
    fn name(&self) -> &str {
        "RandomMove"
    }

    fn search(
        &mut self,
        position: &Chess,
        _budget: &TimeBudget,
        _ponder: bool,
        _draw_offered: bool,
    ) -> Result<MoveDecision, EngineError> {
        let moves = legal_moves(position)?;
        let mv = moves
            .choose(&mut self.rng)
            .cloned()
            .ok_or(EngineError::NoLegalMoves)?;
        trace!(candidates = moves.len(), chosen = %move_to_uci(&mv), "random move");
        Ok(MoveDecision::play(mv))
    }
}

/// Plays the legal move whose SAN comes first alphabetically.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alphabetical;

impl SearchAdapter for Alphabetical {
    fn name(&self) -> &str {
        "Alphabetical"
    }

    fn search(
        &mut self,
        position: &Chess,
        _budget: &TimeBudget,
        _ponder: bool,
        _draw_offered: bool,
    ) -> Result<MoveDecision, EngineError> {
        let mv = legal_moves(position)?
            .into_iter()
            .min_by_key(|mv| move_to_san(position, mv))
            .ok_or(EngineError::NoLegalMoves)?;
        Ok(MoveDecision::play(mv))
    }
}

/// Plays the legal move whose UCI string comes first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMove;

impl SearchAdapter for FirstMove {
    fn name(&self) -> &str {
        "FirstMove"
    }

    fn search(
        &mut self,
        position: &Chess,
        _budget: &TimeBudget,
        _ponder: bool,
        _draw_offered: bool,
    ) -> Result<MoveDecision, EngineError> {
        let mv = legal_moves(position)?
            .into_iter()
            .min_by_key(move_to_uci)
            .ok_or(EngineError::NoLegalMoves)?;
        Ok(MoveDecision::play(mv))
    }
}
