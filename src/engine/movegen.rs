//! Move generation
//!
//! This module implements move generation for the 4×5 board using:
//! - Precomputed attack tables for knights, kings and pawns
//! - Ray walks for sliding pieces (bishops, rooks, queens); with at most four
//!   squares per ray a lookup table buys nothing
//! - Legality filtering by making each pseudo-legal move and testing the
//!   mover's king

use crate::core::bitboard::Bitboard;
use crate::core::board::{Board, Color, PieceType, Square, SQUARE_COUNT};
use crate::core::moves::Move;
use crate::core::position::Position;

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Precomputed attack tables
pub struct MoveGen {
    knight_attacks: [Bitboard; SQUARE_COUNT],
    king_attacks: [Bitboard; SQUARE_COUNT],
    // [color][square]
    pawn_attacks: [[Bitboard; SQUARE_COUNT]; 2],
}

// Global move generator instance
static MOVEGEN: std::sync::OnceLock<MoveGen> = std::sync::OnceLock::new();

impl MoveGen {
    /// Get the global MoveGen instance
    pub fn instance() -> &'static MoveGen {
        MOVEGEN.get_or_init(MoveGen::init)
    }

    fn init() -> Self {
        let mut mg = MoveGen {
            knight_attacks: [Bitboard::EMPTY; SQUARE_COUNT],
            king_attacks: [Bitboard::EMPTY; SQUARE_COUNT],
            pawn_attacks: [[Bitboard::EMPTY; SQUARE_COUNT]; 2],
        };

        for sq in Square::all() {
            mg.knight_attacks[sq.index()] = Self::step_targets(sq, &KNIGHT_STEPS);
            mg.king_attacks[sq.index()] = Self::step_targets(sq, &KING_STEPS);
            for color in [Color::White, Color::Black] {
                let dr = color.pawn_direction();
                mg.pawn_attacks[color.index()][sq.index()] =
                    Self::step_targets(sq, &[(-1, dr), (1, dr)]);
            }
        }

        mg
    }

    fn step_targets(sq: Square, steps: &[(i8, i8)]) -> Bitboard {
        steps
            .iter()
            .filter_map(|&(df, dr)| sq.offset(df, dr))
            .fold(Bitboard::EMPTY, |bb, to| bb | to.bitboard())
    }

    fn ray_targets(sq: Square, directions: &[(i8, i8)], occupied: Bitboard) -> Bitboard {
        let mut attacks = Bitboard::EMPTY;
        for &(df, dr) in directions {
            let mut cur = sq;
            while let Some(next) = cur.offset(df, dr) {
                attacks |= next.bitboard();
                if occupied.contains(next.0) {
                    break;
                }
                cur = next;
            }
        }
        attacks
    }

    #[inline]
    pub fn knight_attacks(sq: Square) -> Bitboard {
        Self::instance().knight_attacks[sq.index()]
    }

    #[inline]
    pub fn king_attacks(sq: Square) -> Bitboard {
        Self::instance().king_attacks[sq.index()]
    }

    /// Squares a pawn of `color` on `sq` attacks
    #[inline]
    pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
        Self::instance().pawn_attacks[color.index()][sq.index()]
    }

    #[inline]
    pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        Self::ray_targets(sq, &ROOK_DIRECTIONS, occupied)
    }

    #[inline]
    pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        Self::ray_targets(sq, &BISHOP_DIRECTIONS, occupied)
    }

    #[inline]
    pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        Self::rook_attacks(sq, occupied) | Self::bishop_attacks(sq, occupied)
    }

    /// Pseudo-legal moves: pieces in ascending square order, targets in
    /// ascending square order, promotions queen first
    pub fn generate_pseudo_legal_moves(board: &Board) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        let us = board.side_to_move();
        let own = board.color(us);
        let theirs = board.color(us.opposite());
        let occupied = board.occupied();

        for from_idx in own.iter() {
            let from = Square(from_idx);
            let Some(piece) = board.piece_at(from) else {
                continue;
            };

            let targets = match piece.piece_type {
                PieceType::Pawn => {
                    let mut targets = Self::pawn_attacks(from, us) & theirs;
                    if let Some(push) = from.offset(0, us.pawn_direction()) {
                        if !occupied.contains(push.0) {
                            targets |= push.bitboard();
                        }
                    }
                    targets
                }
                PieceType::Knight => Self::knight_attacks(from) & !own,
                PieceType::Bishop => Self::bishop_attacks(from, occupied) & !own,
                PieceType::Rook => Self::rook_attacks(from, occupied) & !own,
                PieceType::Queen => Self::queen_attacks(from, occupied) & !own,
                PieceType::King => Self::king_attacks(from) & !own,
            };

            for to_idx in targets.iter() {
                let to = Square(to_idx);
                let mv = Move::new(from, to, piece).with_capture(board.piece_at(to));
                if piece.piece_type == PieceType::Pawn && to.rank() == us.promotion_rank() {
                    for pt in PieceType::PROMOTIONS {
                        moves.push(mv.with_promotion(pt));
                    }
                } else {
                    moves.push(mv);
                }
            }
        }

        moves
    }

    /// Legal moves for the side to move. A side whose king has been captured
    /// has none.
    pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
        let us = board.side_to_move();
        if !board.has_king(us) {
            return Vec::new();
        }

        let mut scratch = board.clone();
        Self::generate_pseudo_legal_moves(board)
            .into_iter()
            .filter(|&mv| {
                if mv.captures_king() {
                    return true;
                }
                scratch.make_move(mv);
                let legal = !scratch.king_attacked(us);
                scratch.unmake_move(mv);
                legal
            })
            .collect()
    }
}

/// Count leaf nodes of the legal move tree to `depth`
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.unmake_move(mv);
    }
    nodes
}
