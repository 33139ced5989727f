//! Negamax alpha-beta over interior nodes.

use crate::core::moves::Move;
use crate::core::position::Position;
use crate::engine::cache::{Bound, PositionKey};
use crate::engine::eval::evaluate_relative;

use super::ordering::order_moves;
use super::searcher::Searcher;
use super::types::{
    score_from_cache, score_to_cache, DRAW_SCORE, INFINITY, MATE_SCORE, MAX_DEPTH,
};

impl Searcher {
    pub(super) fn alpha_beta<P: Position>(
        &mut self,
        pos: &mut P,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        ply: u32,
    ) -> i32 {
        if self.aborted {
            return 0;
        }
        self.visit(ply);

        let mate_value = MATE_SCORE - ply as i32;
        if !pos.has_king(pos.side_to_move()) {
            self.leaf();
            return -mate_value;
        }

        let hash = pos.position_key();

        if depth > 0 {
            if let Some(entry) = self.cache.positions().probe(hash, depth, MAX_DEPTH) {
                // cached mates count plies from the stored node
                let score = score_from_cache(entry.score, ply);
                let usable = match entry.bound {
                    Bound::Exact => true,
                    Bound::Lower => score >= beta,
                    Bound::Upper => score <= alpha,
                };
                if usable {
                    self.stats.cache_hits += 1;
                    return score;
                }
            }
        }

        if depth == 0 {
            self.leaf();
            return evaluate_relative(pos);
        }

        let legals = pos.legal_moves();
        if legals.is_empty() {
            self.leaf();
            return if pos.is_in_check() {
                -mate_value
            } else {
                DRAW_SCORE
            };
        }

        if self.should_stop() {
            return 0;
        }

        let cached = self.cache.moves().get(hash, 0);
        let ordered = order_moves(legals, cached);

        let alpha_orig = alpha;
        let mut best_score = -INFINITY;
        let mut best_move: Option<Move> = None;

        for mv in ordered {
            pos.make_move(mv);
            let score = -self.alpha_beta(pos, depth - 1, -beta, -alpha, ply + 1);
            pos.unmake_move(mv);

            if self.aborted {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = if best_score >= beta {
            Bound::Lower
        } else if best_score <= alpha_orig {
            Bound::Upper
        } else {
            Bound::Exact
        };
        self.cache.positions().put_bounded(
            PositionKey::new(hash, depth),
            score_to_cache(best_score, ply),
            depth,
            bound,
        );
        if let Some(mv) = best_move {
            self.cache.moves().put(hash, mv, depth);
        }

        best_score
    }
}
