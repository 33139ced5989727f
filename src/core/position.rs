//! The board interface the engine searches over
//!
//! Evaluation, caching and search only talk to a position through this trait,
//! so any board that can enumerate its legal moves in a stable order and take
//! them back can be plugged in. [`Board`](super::board::Board) is the
//! implementation for the 4×5 variant.

use super::board::{Color, Piece, PieceType, Square};
use super::moves::Move;
use super::zobrist::ZobristKeys;

pub trait Position: Clone {
    /// Legal moves for the side to move. The order must be the same every time
    /// the same position is asked; ties in the search are broken by it.
    fn legal_moves(&self) -> Vec<Move>;

    fn make_move(&mut self, mv: Move);

    /// Take back `mv`, which must be the last move made
    fn unmake_move(&mut self, mv: Move);

    fn piece_at(&self, sq: Square) -> Option<Piece>;

    fn side_to_move(&self) -> Color;

    /// Canonical key of (layout, side to move)
    fn position_key(&self) -> u64 {
        let keys = ZobristKeys::instance();
        let mut hash = Square::all()
            .filter_map(|sq| self.piece_at(sq).map(|p| keys.piece(p, sq)))
            .fold(0u64, |acc, k| acc ^ k);
        if self.side_to_move() == Color::Black {
            hash ^= keys.side_to_move();
        }
        hash
    }

    /// Boards that cannot tell check apart report every dead end as stalemate
    fn is_in_check(&self) -> bool {
        false
    }

    /// True when the side to move can capture the opposing king right now
    fn opponent_king_exposed(&self) -> bool {
        self.legal_moves().iter().any(|mv| mv.captures_king())
    }

    fn has_king(&self, color: Color) -> bool {
        Square::all().any(|sq| self.piece_at(sq) == Some(Piece::new(PieceType::King, color)))
    }
}
