use super::*;
use shakmaty::Position;

#[test]
fn test_fen_keeps_en_passant_square_without_capture() {
    let mut pos = Chess::default();
    let e4 = parse_uci_move(&pos, "e2e4").expect("e2e4 is legal");
    pos.play_unchecked(&e4);

    // No black pawn can take on e3, the square is still written out.
    assert_eq!(
        fen_with_en_passant(&pos),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn test_position_from_fen_round_trip() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    let pos = position_from_fen(fen).expect("valid FEN");
    assert_eq!(fen_with_en_passant(&pos), fen);
}

#[test]
fn test_position_from_fen_rejects_garbage() {
    let err = position_from_fen("not a fen").unwrap_err();
    assert_eq!(err.fen, "not a fen");
}

#[test]
fn test_san_and_uci_parse_to_same_move() {
    let pos = Chess::default();
    let from_san = parse_san_move(&pos, "Nf3").expect("Nf3 is legal");
    let from_uci = parse_uci_move(&pos, "g1f3").expect("g1f3 is legal");
    assert_eq!(from_san, from_uci);
    assert_eq!(move_to_uci(&from_san), "g1f3");
    assert_eq!(move_to_san(&pos, &from_uci), "Nf3");
}

#[test]
fn test_compact_notation_is_not_valid_san_for_pieces() {
    let pos = Chess::default();
    assert!(parse_san_move(&pos, "g1f3").is_none());
}

#[test]
fn test_san_accepts_check_suffix() {
    let pos = position_from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("valid FEN");
    let mv = parse_san_move(&pos, "Rh8+").expect("Rh8 is legal");
    assert_eq!(move_to_uci(&mv), "h1h8");
}

#[test]
fn test_illegal_moves_are_rejected() {
    let pos = Chess::default();
    assert!(parse_uci_move(&pos, "e2e5").is_none());
    assert!(parse_san_move(&pos, "Qh5").is_none());
    assert!(parse_uci_move(&pos, "zz").is_none());
}
