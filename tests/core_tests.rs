//! Core Module Tests
//!
//! Tests for bitboard, board, moves, and zobrist modules.

use micro_chess::core::bitboard::Bitboard;
use micro_chess::core::board::{Board, Color, Piece, PieceType, Square};
use micro_chess::core::moves::Move;
use micro_chess::core::position::Position;
use micro_chess::core::zobrist::ZobristKeys;
use micro_chess::EngineError;
use std::collections::HashSet;

// ============================================================================
// Bitboard Tests
// ============================================================================

#[test]
fn test_bitboard_all_covers_board() {
    assert_eq!(Bitboard::ALL.count(), 20);
    assert_eq!((!Bitboard::EMPTY), Bitboard::ALL);
}

#[test]
fn test_bitboard_center_squares() {
    let center: Vec<u8> = Bitboard::CENTER.iter().collect();
    let expected: Vec<u8> = [Square::B2, Square::C2, Square::B3, Square::C3, Square::B4, Square::C4]
        .iter()
        .map(|sq| sq.0)
        .collect();
    assert_eq!(center, expected);
}

#[test]
fn test_bitboard_file_and_rank_masks() {
    assert_eq!(Bitboard::file_mask(0), Bitboard::FILE_A);
    assert_eq!(Bitboard::file_mask(3), Bitboard::FILE_D);
    assert_eq!(Bitboard::rank_mask(0), Bitboard::RANK_1);
    assert_eq!(Bitboard::rank_mask(4), Bitboard::RANK_5);
}

// ============================================================================
// Square Tests
// ============================================================================

#[test]
fn test_square_layout() {
    assert_eq!(Square::A1.0, 0);
    assert_eq!(Square::D1.0, 3);
    assert_eq!(Square::A2.0, 4);
    assert_eq!(Square::D5.0, 19);
    assert_eq!(Square::C3.file(), 2);
    assert_eq!(Square::C3.rank(), 2);
}

#[test]
fn test_square_algebraic() {
    assert_eq!(Square::from_algebraic("b3"), Some(Square::B3));
    assert_eq!(Square::from_algebraic("d5"), Some(Square::D5));
    assert_eq!(Square::from_algebraic("e1"), None);
    assert_eq!(Square::from_algebraic("a6"), None);
    assert_eq!(Square::C4.to_string(), "c4");
}

#[test]
fn test_square_offset_stays_on_board() {
    assert_eq!(Square::A1.offset(-1, 0), None);
    assert_eq!(Square::D5.offset(0, 1), None);
    assert_eq!(Square::B2.offset(1, 1), Some(Square::C3));
}

// ============================================================================
// Board Tests
// ============================================================================

#[test]
fn test_startpos_layout() {
    let board = Board::startpos();
    assert_eq!(board.piece_at(Square::A1), Some(Piece::new(PieceType::Rook, Color::White)));
    assert_eq!(board.piece_at(Square::B1), Some(Piece::new(PieceType::Queen, Color::White)));
    assert_eq!(board.piece_at(Square::C1), Some(Piece::new(PieceType::King, Color::White)));
    assert_eq!(board.piece_at(Square::C5), Some(Piece::new(PieceType::King, Color::Black)));
    assert_eq!(board.piece_at(Square::B4), Some(Piece::new(PieceType::Pawn, Color::Black)));
    assert_eq!(board.piece_at(Square::B3), None);
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.occupied().count(), 16);
}

#[test]
fn test_fen_startpos() {
    assert_eq!(Board::startpos().to_fen(), Board::STARTPOS_FEN);
    assert_eq!(Board::from_fen(Board::STARTPOS_FEN).unwrap(), Board::startpos());
}

#[test]
fn test_fen_roundtrip() {
    let fen = "1k2/p1p1/1P2/3R/K3 b 7";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.to_fen(), fen);
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.fullmove_number(), 7);
}

#[test]
fn test_fen_fullmove_optional() {
    let board = Board::from_fen("k3/4/4/4/R2K w").unwrap();
    assert_eq!(board.fullmove_number(), 1);
}

#[test]
fn test_fen_rejects_malformed() {
    let bad = [
        "",
        "rqkr/pppp/4/PPPP w",
        "rqkr/pppp/4/PPPP/RQKR x",
        "rqkr/pppp/5/PPPP/RQKR w",
        "rqkr/pppp/3/PPPP/RQKR w",
        "rqkr/pppp/4/PPPP/RQKZ w",
        "rqkr/pppp/4/PPPP/RQKR w one",
    ];
    for fen in bad {
        assert!(
            matches!(Board::from_fen(fen), Err(EngineError::InvalidPosition { .. })),
            "accepted '{fen}'"
        );
    }
}

#[test]
fn test_fen_rejects_unreachable_layouts() {
    // missing black king
    assert!(Board::from_fen("4/4/4/4/R2K w").is_err());
    // two white kings
    assert!(Board::from_fen("k3/4/4/4/K2K w").is_err());
    // pawn on the back rank
    assert!(Board::from_fen("kP2/4/4/4/3K w").is_err());
}

#[test]
fn test_equality_ignores_move_counter() {
    let a = Board::from_fen("k3/4/4/4/R2K w 1").unwrap();
    let b = Board::from_fen("k3/4/4/4/R2K w 9").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.position_key(), b.position_key());
}

#[test]
fn test_side_to_move_changes_key() {
    let white = Board::from_fen("k3/4/4/4/R2K w").unwrap();
    let black = Board::from_fen("k3/4/4/4/R2K b").unwrap();
    assert_ne!(white, black);
    assert_ne!(white.position_key(), black.position_key());
}

#[test]
fn test_king_square() {
    let board = Board::startpos();
    assert_eq!(board.king_square(Color::White), Some(Square::C1));
    assert_eq!(board.king_square(Color::Black), Some(Square::C5));
}

#[test]
fn test_check_detection() {
    let board = Board::from_fen("k3/1Q2/2K1/4/4 b").unwrap();
    assert!(board.is_in_check());
    assert!(!Board::startpos().is_in_check());
}

#[test]
fn test_opponent_king_exposed() {
    let board = Board::from_fen("k3/4/4/4/R2K w").unwrap();
    assert!(board.opponent_king_exposed());
    assert!(!Board::startpos().opponent_king_exposed());
}

// ============================================================================
// Make / Unmake Tests
// ============================================================================

#[test]
fn test_make_unmake_restores_board() {
    let mut board = Board::startpos();
    let original = board.clone();
    for mv in original.legal_moves() {
        board.make_move(mv);
        assert_eq!(board.side_to_move(), Color::Black);
        board.unmake_move(mv);
        assert_eq!(board, original);
        assert_eq!(board.position_key(), original.position_key());
        assert_eq!(board.fullmove_number(), original.fullmove_number());
    }
}

#[test]
fn test_incremental_hash_matches_full() {
    let mut board = Board::startpos();
    for s in ["b2b3", "a4b3", "a2b3", "c4c3"] {
        let mv = board.parse_move(s).unwrap();
        board.make_move(mv);
        assert_eq!(board.position_key(), board.calculate_hash());
    }
}

#[test]
fn test_capture_and_unmake() {
    let mut board = Board::startpos();
    let opening = board.parse_move("b2b3").unwrap();
    board.make_move(opening);
    let capture = board.parse_move("a4b3").unwrap();
    assert_eq!(capture.captured, Some(Piece::new(PieceType::Pawn, Color::White)));

    let before = board.clone();
    board.make_move(capture);
    assert_eq!(board.piece_at(Square::B3), Some(Piece::new(PieceType::Pawn, Color::Black)));
    assert_eq!(board.piece_at(Square::A4), None);
    board.unmake_move(capture);
    assert_eq!(board, before);
}

#[test]
fn test_promotion() {
    let mut board = Board::from_fen("k3/2P1/4/4/3K w").unwrap();
    let mv = board.parse_move("c4c5").unwrap();
    assert_eq!(mv.promotion, Some(PieceType::Queen));

    let under = board.parse_move("c4c5n").unwrap();
    assert_eq!(under.promotion, Some(PieceType::Knight));

    board.make_move(mv);
    assert_eq!(board.piece_at(Square::C5), Some(Piece::new(PieceType::Queen, Color::White)));
    board.unmake_move(mv);
    assert_eq!(board.piece_at(Square::C4), Some(Piece::new(PieceType::Pawn, Color::White)));
}

#[test]
fn test_fullmove_advances_after_black() {
    let mut board = Board::startpos();
    let white = board.parse_move("a2a3").unwrap();
    board.make_move(white);
    assert_eq!(board.fullmove_number(), 1);
    let black = board.parse_move("d4d3").unwrap();
    board.make_move(black);
    assert_eq!(board.fullmove_number(), 2);
}

// ============================================================================
// Move Tests
// ============================================================================

#[test]
fn test_move_to_uci() {
    let pawn = Piece::new(PieceType::Pawn, Color::White);
    let mv = Move::new(Square::A2, Square::A3, pawn);
    assert_eq!(mv.to_uci(), "a2a3");
    let promo = Move::new(Square::B4, Square::B5, pawn).with_promotion(PieceType::Rook);
    assert_eq!(promo.to_uci(), "b4b5r");
    assert!(promo.is_promotion());
    assert!(!promo.is_capture());
}

#[test]
fn test_move_parse_parts() {
    assert_eq!(Move::parse_parts("a2a3"), Some((Square::A2, Square::A3, None)));
    assert_eq!(
        Move::parse_parts("c4c5q"),
        Some((Square::C4, Square::C5, Some(PieceType::Queen)))
    );
    assert_eq!(Move::parse_parts("e2e4"), None);
    assert_eq!(Move::parse_parts("a2"), None);
}

#[test]
fn test_parse_move_rejects_illegal() {
    let board = Board::startpos();
    assert!(board.parse_move("a2a4").is_none());
    assert!(board.parse_move("a1a2").is_none());
    assert!(board.parse_move("a4a3").is_none());
}

#[test]
fn test_captures_king() {
    let board = Board::from_fen("k3/4/4/4/R2K w").unwrap();
    let mv = board.parse_move("a1a5").unwrap();
    assert!(mv.captures_king());
}

// ============================================================================
// Zobrist Tests
// ============================================================================

#[test]
fn test_zobrist_keys_distinct() {
    let keys = ZobristKeys::instance();
    let mut seen = HashSet::new();
    for piece_type in PieceType::ALL {
        for color in [Color::White, Color::Black] {
            for sq in Square::all() {
                assert!(seen.insert(keys.piece(Piece::new(piece_type, color), sq)));
            }
        }
    }
    assert!(seen.insert(keys.side_to_move()));
}

#[test]
fn test_zobrist_trait_default_matches_board() {
    let keys = ZobristKeys::instance();
    let board = Board::startpos();
    let folded = Square::all()
        .filter_map(|sq| board.piece_at(sq).map(|p| keys.piece(p, sq)))
        .fold(0u64, |acc, k| acc ^ k);
    assert_eq!(board.position_key(), folded);
}
