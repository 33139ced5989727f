//! Searcher: time budget, root move loop, and search entry point.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::moves::Move;
use crate::core::position::Position;
use crate::engine::cache::{Cache, PositionKey};
use crate::engine::eval::evaluate_relative;

use super::types::{
    SearchResult, SearchStats, CHECK_INTERVAL, DRAW_SCORE, INFINITY, MATE_SCORE, MAX_DEPTH,
};

pub struct Searcher {
    pub(super) cache: Arc<Cache>,
    pub(super) stats: SearchStats,
    pub(super) start_time: Instant,
    pub(super) time_limit: Duration,
    pub(super) depth_limit: u32,
    pub(super) aborted: bool,
}

impl Searcher {
    pub fn new(cache: Arc<Cache>) -> Self {
        Searcher {
            cache,
            stats: SearchStats::default(),
            start_time: Instant::now(),
            time_limit: Duration::MAX,
            depth_limit: 0,
            aborted: false,
        }
    }

    pub fn cache(&self) -> &Arc<Cache> {
        &self.cache
    }

    /// Counters of the last search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub(super) fn out_of_time(&self) -> bool {
        self.start_time.elapsed() >= self.time_limit
    }

    /// Called once per node expansion; reads the clock every `CHECK_INTERVAL`
    pub(super) fn should_stop(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        self.stats.expansions += 1;
        if self.stats.expansions % CHECK_INTERVAL == 0 && self.out_of_time() {
            log::trace!(
                "search budget {:?} exhausted after {} expansions",
                self.time_limit,
                self.stats.expansions
            );
            self.aborted = true;
        }
        self.aborted
    }

    #[inline]
    pub(super) fn visit(&mut self, ply: u32) {
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(ply);
    }

    #[inline]
    pub(super) fn leaf(&mut self) {
        self.stats.nodes_evaluated += 1;
    }

    /// Search `pos` to `depth_limit` plies, giving up once `time_budget` has
    /// elapsed. The score is relative to the side to move.
    ///
    /// Root moves are searched in generator order and a later move only
    /// replaces the current best with a strictly higher score. When the
    /// budget runs out, the root move being searched is discarded and the
    /// best fully searched move is returned; if none finished, the first
    /// legal move is.
    pub fn search<P: Position>(
        &mut self,
        pos: &P,
        depth_limit: u32,
        time_budget: Duration,
    ) -> SearchResult {
        self.stats = SearchStats::default();
        self.start_time = Instant::now();
        self.time_limit = time_budget;
        self.depth_limit = depth_limit.clamp(1, MAX_DEPTH);
        self.aborted = false;

        log::debug!(
            "search start: depth {} budget {:?}",
            self.depth_limit,
            time_budget
        );

        let mut board = pos.clone();
        let (best_move, score) = self.search_root(&mut board);

        let result = SearchResult {
            best_move,
            score,
            nodes_evaluated: self.stats.nodes_evaluated,
            max_depth_reached: self.stats.max_depth_reached,
            elapsed: self.start_time.elapsed(),
            aborted: self.aborted,
        };

        log::debug!(
            "search done: best {:?} score {} nodes {} depth {} in {:?}{}",
            result.best_move,
            result.score,
            result.nodes_evaluated,
            result.max_depth_reached,
            result.elapsed,
            if result.aborted { " (aborted)" } else { "" }
        );

        result
    }

    fn search_root<P: Position>(&mut self, pos: &mut P) -> (Option<Move>, i32) {
        let side = pos.side_to_move();
        if !pos.has_king(side) {
            self.leaf();
            return (None, -MATE_SCORE);
        }

        let moves = pos.legal_moves();
        if moves.is_empty() {
            self.leaf();
            let score = if pos.is_in_check() {
                -MATE_SCORE
            } else {
                DRAW_SCORE
            };
            return (None, score);
        }

        let depth = self.depth_limit;
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for &mv in &moves {
            if self.out_of_time() {
                self.aborted = true;
                break;
            }

            pos.make_move(mv);
            let score = -self.alpha_beta(pos, depth - 1, -beta, -alpha, 1);
            pos.unmake_move(mv);

            if self.aborted {
                break;
            }

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        match best {
            Some((mv, score)) => {
                if !self.aborted {
                    let hash = pos.position_key();
                    self.cache
                        .positions()
                        .put(PositionKey::new(hash, depth), score, depth);
                    self.cache.moves().put(hash, mv, depth);
                }
                (Some(mv), score)
            }
            None => {
                self.leaf();
                (Some(moves[0]), evaluate_relative(pos))
            }
        }
    }
}
