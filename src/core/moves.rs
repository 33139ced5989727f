//! Move representation
//!
//! A move records the moving piece and whatever it captured so the board can
//! take it back without keeping a history stack.

use super::board::{Piece, PieceType, Square};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Piece standing on `from` before the move
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceType>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_capture(mut self, captured: Option<Piece>) -> Self {
        self.captured = captured;
        self
    }

    #[inline]
    pub const fn with_promotion(mut self, piece_type: PieceType) -> Self {
        self.promotion = Some(piece_type);
        self
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Capture of the opposing king
    #[inline]
    pub fn captures_king(self) -> bool {
        matches!(self.captured, Some(p) if p.piece_type == PieceType::King)
    }

    /// Coordinate notation, e.g. "a2a3" or "b4b5q"
    pub fn to_uci(self) -> String {
        let promo = self
            .promotion
            .map(|pt| pt.to_char().to_string())
            .unwrap_or_default();
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Split coordinate notation into its squares and optional promotion piece.
    /// The result still has to be matched against a position's legal moves.
    pub fn parse_parts(s: &str) -> Option<(Square, Square, Option<PieceType>)> {
        if s.len() < 4 || s.len() > 5 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceType::from_char(c)? {
                PieceType::Pawn | PieceType::King => return None,
                pt => Some(pt),
            },
        };
        Some((from, to, promotion))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
