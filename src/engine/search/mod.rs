//! Search: negamax alpha-beta backed by the shared position and move caches.

mod alphabeta;
mod ordering;
mod searcher;
mod types;

pub use searcher::Searcher;
pub use types::{
    is_mate_score, score_from_cache, score_to_cache, SearchLimits, SearchResult, SearchStats,
    CHECK_INTERVAL, DRAW_SCORE, INFINITY, MATE_SCORE, MAX_DEPTH,
};
