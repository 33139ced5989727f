//! Core types and representations
//!
//! This module contains the building blocks the engine works on:
//! - Bitboard representation of the 4×5 board
//! - Board state and position interface
//! - Move encoding
//! - Zobrist hashing

pub mod bitboard;
pub mod board;
pub mod moves;
pub mod position;
pub mod zobrist;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, Color, Piece, PieceType, Square};
pub use moves::Move;
pub use position::Position;
pub use zobrist::ZobristKeys;
