//! Engine facade
//!
//! Ties the difficulty policy, the shared cache, the searcher and the quality
//! classifier together behind the calls a game server makes. Scores leaving
//! the facade are from White's point of view.

use std::sync::Arc;
use std::time::Duration;

use crate::core::board::{Color, Square};
use crate::core::position::Position;
use crate::engine::cache::{Cache, CacheReport, DEFAULT_MOVE_CAPACITY, DEFAULT_POSITION_CAPACITY};
use crate::engine::difficulty::{DifficultyPolicy, DEFAULT_LEVEL, DEFAULT_TIME_BUDGET};
use crate::engine::eval::evaluate;
use crate::engine::quality::{MoveQuality, MoveQualityClassifier, DEFAULT_REFERENCE_DEPTH};
use crate::engine::search::{SearchLimits, SearchResult, Searcher};
use crate::error::EngineResult;

pub const DEFAULT_WINNING_THRESHOLD: i32 = 200;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Difficulty level, 1..=4
    pub difficulty: u8,
    /// Wall-clock ceiling for one search
    pub time_budget: Duration,
    pub position_cache_capacity: usize,
    pub move_cache_capacity: usize,
    /// Depth the quality classifier searches the position at
    pub quality_reference_depth: u32,
    /// Centipawn margin past which a side counts as winning
    pub winning_threshold: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_LEVEL,
            time_budget: DEFAULT_TIME_BUDGET,
            position_cache_capacity: DEFAULT_POSITION_CAPACITY,
            move_cache_capacity: DEFAULT_MOVE_CAPACITY,
            quality_reference_depth: DEFAULT_REFERENCE_DEPTH,
            winning_threshold: DEFAULT_WINNING_THRESHOLD,
        }
    }
}

/// Figures from the most recent `get_best_move`, plus the current level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalculationStats {
    pub nodes_evaluated: u64,
    pub max_depth_reached: u32,
    pub difficulty_level: u8,
    pub search_depth: u32,
}

pub struct Engine {
    policy: DifficultyPolicy,
    searcher: Searcher,
    quality_reference_depth: u32,
    winning_threshold: i32,
    last_nodes: u64,
    last_depth: u32,
}

impl Engine {
    /// Engine with a private cache sized from `config`
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let cache = Arc::new(Cache::new(
            config.position_cache_capacity,
            config.move_cache_capacity,
        ));
        Self::with_cache(config, cache)
    }

    /// Engine sharing `cache` with whoever else holds it. The capacities in
    /// `config` are ignored.
    pub fn with_cache(config: EngineConfig, cache: Arc<Cache>) -> EngineResult<Self> {
        let policy = DifficultyPolicy::new(config.difficulty, config.time_budget)?;
        Ok(Self::assemble(policy, &config, cache))
    }

    fn assemble(policy: DifficultyPolicy, config: &EngineConfig, cache: Arc<Cache>) -> Self {
        Engine {
            policy,
            searcher: Searcher::new(cache),
            quality_reference_depth: config.quality_reference_depth,
            winning_threshold: config.winning_threshold,
            last_nodes: 0,
            last_depth: 0,
        }
    }

    /// Best move at the current difficulty
    pub fn get_best_move<P: Position>(&mut self, pos: &P) -> SearchResult {
        self.search(pos, &SearchLimits::default())
    }

    /// Best move with the policy's depth or budget overridden by `limits`
    pub fn search<P: Position>(&mut self, pos: &P, limits: &SearchLimits) -> SearchResult {
        let depth = limits.depth.unwrap_or_else(|| self.policy.depth());
        let budget = limits.movetime.unwrap_or_else(|| self.policy.time_budget());

        let mut result = self.searcher.search(pos, depth, budget);
        if pos.side_to_move() == Color::Black {
            result.score = -result.score;
        }

        self.last_nodes = result.nodes_evaluated;
        self.last_depth = result.max_depth_reached;
        result
    }

    pub fn evaluate_position<P: Position>(&self, pos: &P) -> i32 {
        evaluate(pos)
    }

    pub fn get_move_quality<P: Position>(
        &self,
        pos: &P,
        from: Square,
        to: Square,
    ) -> EngineResult<MoveQuality> {
        MoveQualityClassifier::new(
            Arc::clone(self.searcher.cache()),
            self.quality_reference_depth,
            self.policy.time_budget(),
        )
        .classify(pos, from, to)
    }

    pub fn set_difficulty(&mut self, level: u8) -> EngineResult<()> {
        self.policy.set_level(level)?;
        log::debug!("difficulty set to {level} (depth {})", self.policy.depth());
        Ok(())
    }

    pub fn difficulty(&self) -> u8 {
        self.policy.level()
    }

    pub fn set_time_budget(&mut self, budget: Duration) {
        self.policy.set_time_budget(budget);
    }

    pub fn time_budget(&self) -> Duration {
        self.policy.time_budget()
    }

    pub fn get_calculation_stats(&self) -> CalculationStats {
        CalculationStats {
            nodes_evaluated: self.last_nodes,
            max_depth_reached: self.last_depth,
            difficulty_level: self.policy.level(),
            search_depth: self.policy.depth(),
        }
    }

    /// Whether the static evaluation favors the given side by more than the
    /// winning threshold
    pub fn is_position_winning<P: Position>(&self, pos: &P, for_white: bool) -> bool {
        let score = self.evaluate_position(pos);
        if for_white {
            score > self.winning_threshold
        } else {
            score < -self.winning_threshold
        }
    }

    pub fn cache(&self) -> &Arc<Cache> {
        self.searcher.cache()
    }

    pub fn cache_stats(&self) -> CacheReport {
        self.cache().stats()
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let cache = Arc::new(Cache::new(
            config.position_cache_capacity,
            config.move_cache_capacity,
        ));
        // DEFAULT_LEVEL lies in 1..=4
        Self::assemble(DifficultyPolicy::default(), &config, cache)
    }
}
