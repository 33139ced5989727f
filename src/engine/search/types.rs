//! Search limits, results, stats, and constants.

use std::time::Duration;

use crate::core::moves::Move;

pub const INFINITY: i32 = 30000;
pub const MATE_SCORE: i32 = 29000;
pub const DRAW_SCORE: i32 = 0;
/// Deepest search any caller can ask for
pub const MAX_DEPTH: u32 = 64;
/// Node expansions between two clock reads
pub const CHECK_INTERVAL: u64 = 256;

/// Per-call overrides of the difficulty policy. `None` keeps the policy's value.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub depth: Option<u32>,
    pub movetime: Option<Duration>,
}

#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    /// Static evaluations, one per leaf
    pub nodes_evaluated: u64,
    /// Deepest ply visited
    pub max_depth_reached: u32,
    /// Interior nodes whose moves were generated
    pub expansions: u64,
    pub cache_hits: u64,
    pub cutoffs: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes_evaluated: u64,
    pub max_depth_reached: u32,
    pub elapsed: Duration,
    /// The time budget ran out before every root move was searched
    pub aborted: bool,
}

/// Scores this close to `MATE_SCORE` mean a forced king loss within the
/// search horizon.
#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE - MAX_DEPTH as i32
}

/// Rebase a mate score from distance-to-root onto distance-to-this-node
/// before it goes into the position cache. Other scores pass through.
#[inline]
pub fn score_to_cache(score: i32, ply: u32) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score + ply as i32
    } else {
        score - ply as i32
    }
}

/// Inverse of [`score_to_cache`] for an entry read back at `ply`
#[inline]
pub fn score_from_cache(score: i32, ply: u32) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score - ply as i32
    } else {
        score + ply as i32
    }
}
