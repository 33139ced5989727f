//! Move quality labels
//!
//! A candidate is graded by how much it gives up against the best move found
//! at the same depth: the swing is `best - candidate` in centipawns, both seen
//! from the mover's side.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::core::board::Square;
use crate::core::moves::Move;
use crate::core::position::Position;
use crate::engine::cache::Cache;
use crate::engine::eval::evaluate_relative;
use crate::engine::search::Searcher;
use crate::error::{EngineError, EngineResult};

pub const DEFAULT_REFERENCE_DEPTH: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum MoveQuality {
    Excellent,
    Good,
    Average,
    Poor,
    Blunder,
}

impl MoveQuality {
    /// Bucket a centipawn swing
    pub fn from_swing(swing: i32) -> Self {
        match swing {
            i32::MIN..=10 => MoveQuality::Excellent,
            11..=50 => MoveQuality::Good,
            51..=150 => MoveQuality::Average,
            151..=300 => MoveQuality::Poor,
            _ => MoveQuality::Blunder,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoveQuality::Excellent => "excellent",
            MoveQuality::Good => "good",
            MoveQuality::Average => "average",
            MoveQuality::Poor => "poor",
            MoveQuality::Blunder => "blunder",
        }
    }
}

impl fmt::Display for MoveQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct MoveQualityClassifier {
    cache: Arc<Cache>,
    reference_depth: u32,
    time_budget: Duration,
}

impl MoveQualityClassifier {
    pub fn new(cache: Arc<Cache>, reference_depth: u32, time_budget: Duration) -> Self {
        MoveQualityClassifier {
            cache,
            reference_depth: reference_depth.max(1),
            time_budget,
        }
    }

    /// Grade the move from `from` to `to`. A pawn reaching the last rank is
    /// taken to promote to a queen.
    pub fn classify<P: Position>(&self, pos: &P, from: Square, to: Square) -> EngineResult<MoveQuality> {
        let candidate = find_candidate(pos, from, to)?;
        let swing = self.swing(pos, candidate);
        Ok(MoveQuality::from_swing(swing))
    }

    /// Centipawns lost by `candidate` against the best move, never negative.
    ///
    /// The two searches share the time budget half and half. If either one
    /// runs out of time, both sides of the comparison fall back to a one-ply
    /// static look.
    pub fn swing<P: Position>(&self, pos: &P, candidate: Move) -> i32 {
        let budget = self.time_budget / 2;
        let mut searcher = Searcher::new(Arc::clone(&self.cache));
        let reference = searcher.search(pos, self.reference_depth, budget);

        let mut child = pos.clone();
        child.make_move(candidate);
        let reply = (self.reference_depth > 1)
            .then(|| searcher.search(&child, self.reference_depth - 1, budget));

        let out_of_time = reference.aborted || reply.as_ref().is_some_and(|r| r.aborted);
        let (best, candidate_score) = if out_of_time {
            log::debug!("quality search for {candidate} ran out of time, using static scores");
            static_swing(pos, &child)
        } else {
            let candidate_score = match reply {
                Some(reply) => -reply.score,
                None => -evaluate_relative(&child),
            };
            (reference.score, candidate_score)
        };

        log::debug!("quality of {candidate}: best {best}, candidate {candidate_score}");
        (best - candidate_score).max(0)
    }
}

/// Best one-ply static score for the mover, and the static score after `child`
fn static_swing<P: Position>(pos: &P, child: &P) -> (i32, i32) {
    let mut scratch = pos.clone();
    let best = pos
        .legal_moves()
        .into_iter()
        .map(|mv| {
            scratch.make_move(mv);
            let score = -evaluate_relative(&scratch);
            scratch.unmake_move(mv);
            score
        })
        .max()
        .unwrap_or(i32::MIN);
    let candidate = -evaluate_relative(child);
    (best.max(candidate), candidate)
}

fn find_candidate<P: Position>(pos: &P, from: Square, to: Square) -> EngineResult<Move> {
    pos.legal_moves()
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to)
        .ok_or_else(|| EngineError::IllegalMove {
            mv: format!("{from}{to}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Board;

    #[test]
    fn test_bucket_edges() {
        assert_eq!(MoveQuality::from_swing(0), MoveQuality::Excellent);
        assert_eq!(MoveQuality::from_swing(10), MoveQuality::Excellent);
        assert_eq!(MoveQuality::from_swing(11), MoveQuality::Good);
        assert_eq!(MoveQuality::from_swing(50), MoveQuality::Good);
        assert_eq!(MoveQuality::from_swing(150), MoveQuality::Average);
        assert_eq!(MoveQuality::from_swing(300), MoveQuality::Poor);
        assert_eq!(MoveQuality::from_swing(301), MoveQuality::Blunder);
    }

    #[test]
    fn test_out_of_time_falls_back_to_static_swing() {
        let board = Board::from_fen("k3/4/4/4/R2K w").unwrap();
        let classifier = MoveQualityClassifier::new(Arc::new(Cache::default()), 3, Duration::ZERO);
        assert_eq!(
            classifier.classify(&board, Square::A1, Square::A5),
            Ok(MoveQuality::Excellent)
        );
        assert_eq!(
            classifier.classify(&board, Square::A1, Square::B1),
            Ok(MoveQuality::Blunder)
        );
    }

    #[test]
    fn test_searches_share_one_budget() {
        let budget = Duration::from_millis(200);
        let classifier = MoveQualityClassifier::new(Arc::new(Cache::default()), 8, budget);
        let start = std::time::Instant::now();
        classifier
            .classify(&Board::startpos(), Square::B2, Square::B3)
            .unwrap();
        assert!(start.elapsed() < budget + Duration::from_millis(500));
    }

    #[test]
    fn test_labels() {
        assert_eq!(MoveQuality::Blunder.to_string(), "blunder");
        assert!(MoveQuality::Excellent < MoveQuality::Blunder);
    }
}
