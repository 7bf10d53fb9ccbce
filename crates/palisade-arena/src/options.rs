//! The per-arena option table.
//!
//! A small set of integer counters that the game loop and controller
//! tune while a session runs. Everything starts at zero and is wiped
//! when the arena resets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Keys into an arena's option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArenaOption {
    /// How many zombies the spawner should produce for the current wave.
    ZombiesToSpawn,
    /// Bonus max-health level granted by eaten rotten flesh.
    RottenFleshLevel,
    /// Rotten flesh collected toward the next bonus level.
    RottenFleshAmount,
    /// Zombies killed across the whole session.
    TotalKilledZombies,
    /// Orbs spent across the whole session.
    TotalOrbsSpent,
    /// The current wave number.
    Wave,
}

/// An arena's option values. Absent keys read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Options {
    values: HashMap<ArenaOption, i32>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, option: ArenaOption) -> i32 {
        self.values.get(&option).copied().unwrap_or(0)
    }

    pub fn set(&mut self, option: ArenaOption, value: i32) {
        self.values.insert(option, value);
    }

    pub fn add(&mut self, option: ArenaOption, amount: i32) {
        let current = self.get(option);
        self.values.insert(option, current + amount);
    }

    /// Wipes every option back to zero.
    pub fn reset(&mut self) {
        self.values.clear();
    }
}
