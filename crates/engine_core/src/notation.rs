use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid FEN `{fen}`: {reason}")]
pub struct FenError {
    pub fen: String,
    reason: String,
}

pub fn position_from_fen(fen: &str) -> Result<Chess, FenError> {
    let invalid = |reason: String| FenError {
        fen: fen.to_string(),
        reason,
    };
    let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| invalid(format!("{e}")))
}

/// FEN that names the en-passant square after every double pawn push,
/// whether or not a capture is actually possible.
pub fn fen_with_en_passant(pos: &Chess) -> String {
    Fen::from_position(pos.clone(), EnPassantMode::Always).to_string()
}

pub fn move_to_uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

pub fn move_to_san(pos: &Chess, mv: &Move) -> String {
    San::from_move(pos, mv).to_string()
}

/// Parse coordinate notation (`e2e4`, `e7e8q`) against the legal moves of `pos`.
pub fn parse_uci_move(pos: &Chess, txt: &str) -> Option<Move> {
    let uci: UciMove = txt.trim().parse().ok()?;
    uci.to_move(pos).ok()
}

/// Parse standard algebraic notation (`Nf3`, `exd5`, `O-O`, `e8=Q+`).
pub fn parse_san_move(pos: &Chess, txt: &str) -> Option<Move> {
    let san: SanPlus = txt.trim().parse().ok()?;
    san.san.to_move(pos).ok()
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
