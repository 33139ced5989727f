pub mod core;
pub mod engine;
pub mod error;
pub mod uci;

pub use crate::core::{Board, Color, Move, Piece, PieceType, Position, Square};
pub use engine::{Cache, Engine, EngineConfig, MoveQuality, SearchResult};
pub use error::{EngineError, EngineResult};
pub use uci::UCI;
