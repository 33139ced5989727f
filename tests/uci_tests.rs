//! UCI Protocol Tests
//!
//! These tests drive the text front-end line by line and check its output.

use micro_chess::core::board::Board;
use micro_chess::core::position::Position;
use micro_chess::uci::UCI;

fn send(uci: &mut UCI, line: &str) -> String {
    let mut out = Vec::new();
    uci.handle_line(line, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn bestmove(output: &str) -> Option<&str> {
    output
        .lines()
        .find_map(|l| l.strip_prefix("bestmove "))
        .map(str::trim)
}

// ============================================================================
// Handshake Tests
// ============================================================================

#[test]
fn test_uci_handshake() {
    let mut uci = UCI::new();
    let out = send(&mut uci, "uci");
    assert!(out.starts_with("id name micro_chess"));
    assert!(out.contains("option name Difficulty type spin default 2 min 1 max 4"));
    assert!(out.contains("option name ClearCache type button"));
    assert!(out.trim_end().ends_with("uciok"));
}

#[test]
fn test_isready() {
    let mut uci = UCI::new();
    assert_eq!(send(&mut uci, "isready"), "readyok\n");
}

#[test]
fn test_blank_line_ignored() {
    let mut uci = UCI::new();
    assert_eq!(send(&mut uci, "   "), "");
}

#[test]
fn test_quit_stops_loop() {
    let mut uci = UCI::new();
    let mut out = Vec::new();
    assert!(!uci.handle_line("quit", &mut out).unwrap());
    assert!(uci.handle_line("isready", &mut out).unwrap());
}

// ============================================================================
// Position Tests
// ============================================================================

#[test]
fn test_position_startpos() {
    let mut uci = UCI::new();
    send(&mut uci, "position fen k3/4/4/4/R2K w");
    send(&mut uci, "position startpos");
    assert_eq!(uci.board, Board::startpos());
}

#[test]
fn test_position_startpos_with_moves() {
    let mut uci = UCI::new();
    send(&mut uci, "position startpos moves b2b3 a4b3");
    assert_eq!(uci.board.to_fen(), "rqkr/1ppp/1p2/P1PP/RQKR w 2");
}

#[test]
fn test_position_fen() {
    let mut uci = UCI::new();
    send(&mut uci, "position fen k3/4/4/4/R2K w 1");
    assert_eq!(uci.board.to_fen(), "k3/4/4/4/R2K w 1");
}

#[test]
fn test_position_fen_with_moves() {
    let mut uci = UCI::new();
    send(&mut uci, "position fen k3/2P1/4/4/3K w moves c4c5r");
    assert_eq!(uci.board.to_fen(), "k1R1/4/4/4/3K b 1");
}

#[test]
fn test_position_bad_fen_keeps_board() {
    let mut uci = UCI::new();
    let out = send(&mut uci, "position fen rqkr/pppp/4/PPPP w");
    assert!(out.starts_with("info string Invalid position"));
    assert_eq!(uci.board, Board::startpos());
}

#[test]
fn test_position_illegal_move_keeps_board() {
    let mut uci = UCI::new();
    let out = send(&mut uci, "position startpos moves a2a4");
    assert!(out.contains("illegal move 'a2a4'"));
    assert_eq!(uci.board, Board::startpos());
}

// ============================================================================
// Go Tests
// ============================================================================

#[test]
fn test_go_depth() {
    let mut uci = UCI::new();
    send(&mut uci, "position startpos");
    let out = send(&mut uci, "go depth 2");
    assert!(out.contains("info depth 2 score cp"));
    let mv = bestmove(&out).unwrap();
    assert!(uci.board.parse_move(mv).is_some(), "bestmove {mv} is not legal");
}

#[test]
fn test_go_movetime() {
    let mut uci = UCI::new();
    let out = send(&mut uci, "go movetime 100");
    assert!(bestmove(&out).is_some());
}

#[test]
fn test_go_finds_king_capture() {
    let mut uci = UCI::new();
    send(&mut uci, "position fen k3/4/4/4/R2K w");
    let out = send(&mut uci, "go depth 2");
    assert_eq!(bestmove(&out), Some("a1a5"));
    assert!(out.contains("score mate 1"));
}

#[test]
fn test_go_without_moves() {
    let mut uci = UCI::new();
    send(&mut uci, "position fen k3/4/1Q2/4/3K b");
    let out = send(&mut uci, "go depth 3");
    assert_eq!(bestmove(&out), Some("0000"));
}

// ============================================================================
// Option Tests
// ============================================================================

#[test]
fn test_setoption_difficulty() {
    let mut uci = UCI::new();
    let out = send(&mut uci, "setoption name Difficulty value 4");
    assert_eq!(out, "");
    assert_eq!(uci.engine().difficulty(), 4);
}

#[test]
fn test_setoption_invalid_difficulty() {
    let mut uci = UCI::new();
    let out = send(&mut uci, "setoption name Difficulty value 9");
    assert!(out.contains("Invalid difficulty level: 9"));
    assert_eq!(uci.engine().difficulty(), 2);
}

#[test]
fn test_setoption_movetime() {
    let mut uci = UCI::new();
    send(&mut uci, "setoption name MoveTime value 750");
    assert_eq!(uci.engine().time_budget().as_millis(), 750);
}

#[test]
fn test_setoption_clear_cache() {
    let mut uci = UCI::new();
    send(&mut uci, "go depth 2");
    assert!(uci.engine().cache_stats().positions.size > 0);
    send(&mut uci, "setoption name ClearCache");
    assert_eq!(uci.engine().cache_stats().positions.size, 0);
}

#[test]
fn test_ucinewgame_resets() {
    let mut uci = UCI::new();
    send(&mut uci, "position startpos moves a2a3");
    send(&mut uci, "go depth 2");
    send(&mut uci, "ucinewgame");
    assert_eq!(uci.board, Board::startpos());
    assert_eq!(uci.engine().cache_stats().moves.size, 0);
}

// ============================================================================
// Debug Command Tests
// ============================================================================

#[test]
fn test_display() {
    let mut uci = UCI::new();
    let out = send(&mut uci, "d");
    assert!(out.contains("a b c d"));
    assert!(out.contains(Board::STARTPOS_FEN));
}

#[test]
fn test_eval() {
    let mut uci = UCI::new();
    send(&mut uci, "position fen r1kr/pppp/4/PPPP/RQKR w");
    let out = send(&mut uci, "eval");
    assert!(out.starts_with("Evaluation: 900 cp"));
}

#[test]
fn test_quality() {
    let mut uci = UCI::new();
    send(&mut uci, "position fen k3/4/4/4/R2K w");
    assert_eq!(send(&mut uci, "quality a1a5"), "quality excellent\n");
    assert_eq!(send(&mut uci, "quality a1b1"), "quality blunder\n");
    assert!(send(&mut uci, "quality d1d3").contains("Illegal move"));
    assert!(send(&mut uci, "quality").contains("usage"));
}

#[test]
fn test_stats() {
    let mut uci = UCI::new();
    send(&mut uci, "go depth 2");
    let out = send(&mut uci, "stats");
    assert!(out.starts_with("stats nodes_evaluated "));
    assert!(out.contains("difficulty 2 search_depth 3"));
    assert!(out.contains("cache positions size"));
    assert!(out.contains("cache moves size"));
}

#[test]
fn test_logging_init_is_idempotent() {
    micro_chess::uci::init_logging();
    micro_chess::uci::init_logging();
    if std::env::var_os("RUST_LOG").is_none() {
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
    }
}

#[test]
fn test_perft() {
    let mut uci = UCI::new();
    let out = send(&mut uci, "perft 2");
    assert!(out.starts_with("Nodes: 18 "));
}

#[test]
fn test_startpos_board_after_moves_is_playable() {
    let mut uci = UCI::new();
    send(&mut uci, "position startpos moves c2c3 b4b3");
    assert!(!uci.board.legal_moves().is_empty());
}
