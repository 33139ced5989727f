//! Difficulty levels
//!
//! A level picks the search depth; the wall-clock budget is the same for every
//! level and acts as a hard ceiling on each search.

use std::time::Duration;

use crate::error::{EngineError, EngineResult};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 4;
pub const DEFAULT_LEVEL: u8 = 2;
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(3);

/// Search depth for levels 1..=4
const DEPTH_TABLE: [u32; 4] = [2, 3, 4, 5];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultyPolicy {
    level: u8,
    time_budget: Duration,
}

impl DifficultyPolicy {
    pub fn new(level: u8, time_budget: Duration) -> EngineResult<Self> {
        Self::depth_for(level)?;
        Ok(DifficultyPolicy { level, time_budget })
    }

    /// Depth for `level`, or `InvalidDifficulty` outside 1..=4
    pub fn depth_for(level: u8) -> EngineResult<u32> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(EngineError::InvalidDifficulty { level });
        }
        Ok(DEPTH_TABLE[(level - MIN_LEVEL) as usize])
    }

    /// Change the level; an invalid level leaves the current one in place
    pub fn set_level(&mut self, level: u8) -> EngineResult<()> {
        Self::depth_for(level)?;
        self.level = level;
        Ok(())
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn depth(&self) -> u32 {
        DEPTH_TABLE[(self.level - MIN_LEVEL) as usize]
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    pub fn set_time_budget(&mut self, budget: Duration) {
        self.time_budget = budget;
    }
}

impl Default for DifficultyPolicy {
    fn default() -> Self {
        DifficultyPolicy {
            level: DEFAULT_LEVEL,
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }
}
