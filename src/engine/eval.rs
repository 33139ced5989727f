//! Static evaluation
//!
//! Material plus two positional terms: pawns earn a bonus for every rank they
//! have advanced, and non-king pieces earn a bonus on the six central squares.
//! Scores are in centipawns from White's point of view. Evaluation is a single
//! pass over the 20 squares; it never searches.

use crate::core::bitboard::Bitboard;
use crate::core::board::{Color, PieceType, Square};
use crate::core::position::Position;

/// Material value per piece type, indexed by `PieceType::index()`
pub const PIECE_VALUES: [i32; 6] = [
    100,   // Pawn
    320,   // Knight
    330,   // Bishop
    500,   // Rook
    900,   // Queen
    20000, // King
];

pub const PAWN_ADVANCE_BONUS: i32 = 10;
pub const CENTER_BONUS: i32 = 10;

#[inline]
pub fn piece_value(piece_type: PieceType) -> i32 {
    PIECE_VALUES[piece_type.index()]
}

/// Material and placement score of `color`'s pieces
pub fn side_score<P: Position>(pos: &P, color: Color) -> i32 {
    let mut score = 0;
    for sq in Square::all() {
        let Some(piece) = pos.piece_at(sq) else {
            continue;
        };
        if piece.color != color {
            continue;
        }
        score += piece_value(piece.piece_type);

        if piece.piece_type == PieceType::Pawn {
            let advanced = match color {
                Color::White => sq.rank() as i32 - Color::White.pawn_start_rank() as i32,
                Color::Black => Color::Black.pawn_start_rank() as i32 - sq.rank() as i32,
            };
            score += advanced.max(0) * PAWN_ADVANCE_BONUS;
        }

        if piece.piece_type != PieceType::King && Bitboard::CENTER.contains(sq.0) {
            score += CENTER_BONUS;
        }
    }
    score
}

/// Evaluate from White's perspective. Positive favors White no matter who is
/// to move.
///
/// A king the side to move can capture is scored as already lost.
pub fn evaluate<P: Position>(pos: &P) -> i32 {
    let mut score = side_score(pos, Color::White) - side_score(pos, Color::Black);

    if pos.opponent_king_exposed() {
        let king = piece_value(PieceType::King);
        score += match pos.side_to_move() {
            Color::White => king,
            Color::Black => -king,
        };
    }

    score
}

/// Evaluate from the side to move's perspective (negamax convention)
#[inline]
pub fn evaluate_relative<P: Position>(pos: &P) -> i32 {
    let score = evaluate(pos);
    match pos.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}
