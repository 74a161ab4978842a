//! End-to-end tests of the external engine against stand-in backends.
//!
//! Each backend is a `/bin/sh -c` one-liner that swallows the request and
//! prints a canned response, so these tests only run on Unix.
#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::time::Duration;

use engine_core::{
    move_to_uci, parse_uci_move, Chess, EngineError, Position, SearchAdapter, SideClock,
    TimeBudget,
};
use external_engine::{ExternalEngine, ExternalEngineConfig};
use tempfile::TempDir;

fn backend(dir: &Path, script: &str) -> ExternalEngine {
    let config = ExternalEngineConfig {
        name: "Stub".to_string(),
        command: "/bin/sh".into(),
        args: vec!["-c".to_string(), format!("cat >/dev/null; {script}")],
        scratch_dir: dir.join("temp"),
        ..Default::default()
    };
    ExternalEngine::new(config).expect("config is valid")
}

fn after_e4() -> Chess {
    let mut pos = Chess::default();
    let e4 = parse_uci_move(&pos, "e2e4").unwrap();
    pos.play_unchecked(&e4);
    pos
}

fn one_second() -> TimeBudget {
    TimeBudget::fixed(Duration::from_secs(1))
}

#[test]
fn plays_san_move() {
    let dir = TempDir::new().unwrap();
    let mut engine = backend(dir.path(), "echo 'COMPUTER PLAYED Nf3'");

    let decision = engine
        .search(&Chess::default(), &one_second(), false, false)
        .unwrap();

    assert_eq!(move_to_uci(&decision.best_move.unwrap()), "g1f3");
    assert!(!decision.resigned);
}

#[test]
fn compact_and_rich_notation_give_the_same_move() {
    let dir = TempDir::new().unwrap();
    let mut rich = backend(&dir.path().join("rich"), "echo 'COMPUTER PLAYED exd5'");
    let mut compact = backend(&dir.path().join("compact"), "echo 'COMPUTER PLAYED e4d5'");
    let pos = engine_core::position_from_fen(
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
    )
    .unwrap();

    let a = rich.search(&pos, &one_second(), false, false).unwrap();
    let b = compact.search(&pos, &one_second(), false, false).unwrap();

    assert!(a.best_move.is_some());
    assert_eq!(a.best_move, b.best_move);
}

#[test]
fn writes_four_line_request_for_side_to_move() {
    let dir = TempDir::new().unwrap();
    let mut engine = backend(dir.path(), "echo 'COMPUTER PLAYED e7e5'");
    let white = SideClock {
        remaining_ms: 100_000,
        increment_ms: 0,
    };
    let black = SideClock {
        remaining_ms: 300_000,
        increment_ms: 1_000,
    };

    engine
        .search(&after_e4(), &TimeBudget::clock(white, black), false, false)
        .unwrap();

    let request = fs::read_to_string(dir.path().join("temp/input-0.txt")).unwrap();
    assert_eq!(
        request,
        "setoption time_limit 3700\n\
         setoption table_size 69696983\n\
         go rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1\n\
         quit\n"
    );
}

#[test]
fn white_to_move_reads_white_clock() {
    let dir = TempDir::new().unwrap();
    let mut engine = backend(dir.path(), "echo 'COMPUTER PLAYED e4'");
    let white = SideClock {
        remaining_ms: 100_000,
        increment_ms: 0,
    };
    let black = SideClock {
        remaining_ms: 300_000,
        increment_ms: 1_000,
    };

    engine
        .search(&Chess::default(), &TimeBudget::clock(white, black), false, false)
        .unwrap();

    let request = fs::read_to_string(dir.path().join("temp/input-0.txt")).unwrap();
    assert_eq!(request.lines().next(), Some("setoption time_limit 700"));
}

#[test]
fn last_played_line_wins() {
    let dir = TempDir::new().unwrap();
    let mut engine = backend(
        dir.path(),
        "printf 'COMPUTER PLAYED e2e4\\nCOMPUTER PLAYED e7e5\\n'",
    );

    let decision = engine
        .search(&after_e4(), &one_second(), false, false)
        .unwrap();

    assert_eq!(move_to_uci(&decision.best_move.unwrap()), "e7e5");
}

#[test]
fn resignation_is_a_decision_not_an_error() {
    let dir = TempDir::new().unwrap();
    let mut engine = backend(
        dir.path(),
        "printf 'thinking hard\\nCOMPUTER PLAYED e7e5\\nCOMPUTER PLAYED RESIGN\\nscore -9999\\n'",
    );

    let decision = engine
        .search(&after_e4(), &one_second(), false, false)
        .unwrap();

    assert!(decision.resigned);
    assert!(decision.best_move.is_none());
}

#[test]
fn missing_played_line_is_protocol_error() {
    let dir = TempDir::new().unwrap();
    let mut engine = backend(dir.path(), "printf 'info depth 1\\ninfo depth 2\\n'");

    let err = engine
        .search(&Chess::default(), &one_second(), false, false)
        .unwrap_err();

    assert!(matches!(err, EngineError::Protocol(_)));
}

#[test]
fn illegal_token_is_protocol_error() {
    let dir = TempDir::new().unwrap();
    let mut engine = backend(dir.path(), "echo 'COMPUTER PLAYED Ke2'");

    let err = engine
        .search(&Chess::default(), &one_second(), false, false)
        .unwrap_err();

    assert!(matches!(err, EngineError::Protocol(_)));
}

#[test]
fn consecutive_calls_use_increasing_file_names() {
    let dir = TempDir::new().unwrap();
    let mut engine = backend(dir.path(), "echo 'COMPUTER PLAYED e4'");

    engine
        .search(&Chess::default(), &one_second(), false, false)
        .unwrap();
    engine
        .search(&Chess::default(), &one_second(), false, false)
        .unwrap();

    let temp = dir.path().join("temp");
    for name in ["input-0.txt", "output-0.txt", "input-1.txt", "output-1.txt"] {
        assert!(temp.join(name).is_file(), "{name} should be kept");
    }
    assert_eq!(engine.moves_requested(), 2);
}

#[test]
fn failed_call_still_consumes_a_file_pair() {
    let dir = TempDir::new().unwrap();
    let mut engine = backend(dir.path(), "true");

    assert!(engine
        .search(&Chess::default(), &one_second(), false, false)
        .is_err());
    assert_eq!(engine.moves_requested(), 1);
    assert!(dir.path().join("temp/output-0.txt").is_file());
}

#[test]
fn independent_instances_count_separately() {
    let dir = TempDir::new().unwrap();
    let mut first = backend(&dir.path().join("a"), "echo 'COMPUTER PLAYED e4'");
    let mut second = backend(&dir.path().join("b"), "echo 'COMPUTER PLAYED d4'");

    first
        .search(&Chess::default(), &one_second(), false, false)
        .unwrap();
    second
        .search(&Chess::default(), &one_second(), false, false)
        .unwrap();

    assert!(dir.path().join("a/temp/input-0.txt").is_file());
    assert!(dir.path().join("b/temp/input-0.txt").is_file());
}

#[test]
fn missing_backend_is_invocation_error() {
    let dir = TempDir::new().unwrap();
    let config = ExternalEngineConfig {
        command: dir.path().join("no-such-engine"),
        scratch_dir: dir.path().join("temp"),
        ..Default::default()
    };
    let mut engine = ExternalEngine::new(config).unwrap();

    let err = engine
        .search(&Chess::default(), &one_second(), false, false)
        .unwrap_err();

    assert!(matches!(err, EngineError::Invocation { .. }));
}

#[test]
fn unusable_scratch_dir_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("temp");
    fs::write(&blocker, "a file, not a directory").unwrap();
    let config = ExternalEngineConfig {
        command: "/bin/sh".into(),
        scratch_dir: blocker,
        ..Default::default()
    };
    let mut engine = ExternalEngine::new(config).unwrap();

    let err = engine
        .search(&Chess::default(), &one_second(), false, false)
        .unwrap_err();

    assert!(err.is_configuration());
}
