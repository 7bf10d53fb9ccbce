//! Player statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The statistics tracked per player.
///
/// `Orbs` is session currency and is zeroed on join/leave; the rest are
/// lifetime numbers the host persists between restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Orbs,
    Kills,
    Deaths,
    HighestWave,
    GamesPlayed,
    Experience,
}

/// A player's statistic values. Absent keys read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatSheet {
    values: HashMap<Statistic, i32>,
}

impl StatSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Statistic) -> i32 {
        self.values.get(&stat).copied().unwrap_or(0)
    }

    pub fn set(&mut self, stat: Statistic, value: i32) {
        self.values.insert(stat, value);
    }

    pub fn add(&mut self, stat: Statistic, amount: i32) {
        let current = self.get(stat);
        self.values.insert(stat, current + amount);
    }

    /// Raises `stat` to `value` if it is higher than the stored one.
    /// Used for personal bests.
    pub fn raise_to(&mut self, stat: Statistic, value: i32) {
        if value > self.get(stat) {
            self.values.insert(stat, value);
        }
    }
}
