//! Engine components
//!
//! - Move generation for the 4×5 board
//! - Static evaluation
//! - Difficulty policy
//! - Two-tier LRU search cache
//! - Alpha-beta search
//! - Move quality classification
//! - The `Engine` facade over all of the above

pub mod api;
pub mod cache;
pub mod difficulty;
pub mod eval;
pub mod movegen;
pub mod quality;
pub mod search;

pub use api::{CalculationStats, Engine, EngineConfig};
pub use cache::{Cache, CacheReport, CacheStats};
pub use difficulty::DifficultyPolicy;
pub use eval::{evaluate, evaluate_relative};
pub use movegen::{perft, MoveGen};
pub use quality::{MoveQuality, MoveQualityClassifier};
pub use search::{SearchLimits, SearchResult, SearchStats, Searcher, INFINITY, MATE_SCORE};
