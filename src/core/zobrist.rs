//! Zobrist hashing for position identification
//!
//! Random bitstrings XOR'd together give each (layout, side to move) pair a
//! 64-bit key. The keys are drawn once per process; they only have to be
//! stable for the lifetime of the in-memory caches that use them.

use super::board::{Piece, Square, SQUARE_COUNT};

/// Zobrist random keys
pub struct ZobristKeys {
    /// Keys for each piece on each square [piece][square]
    pieces: [[u64; SQUARE_COUNT]; 12],
    /// Key for black to move
    side: u64,
}

impl ZobristKeys {
    /// Get the global Zobrist keys instance
    pub fn instance() -> &'static ZobristKeys {
        static KEYS: std::sync::OnceLock<ZobristKeys> = std::sync::OnceLock::new();
        KEYS.get_or_init(ZobristKeys::new)
    }

    fn new() -> Self {
        let mut pieces = [[0u64; SQUARE_COUNT]; 12];
        for piece_keys in pieces.iter_mut() {
            for sq_key in piece_keys.iter_mut() {
                *sq_key = rand::random::<u64>();
            }
        }

        ZobristKeys {
            pieces,
            side: rand::random::<u64>(),
        }
    }

    #[inline]
    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.table_index()][sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.side
    }
}
