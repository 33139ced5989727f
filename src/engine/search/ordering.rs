//! Move ordering: the cached best move goes first, the rest keep generator
//! order.

use crate::core::moves::Move;

pub(super) fn order_moves(mut moves: Vec<Move>, cached: Option<Move>) -> Vec<Move> {
    if let Some(cached) = cached {
        if let Some(idx) = moves.iter().position(|mv| *mv == cached) {
            moves[..=idx].rotate_right(1);
        }
    }
    moves
}
