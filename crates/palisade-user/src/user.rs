//! The per-player record.

use palisade_types::PlayerId;

use crate::{Kit, StatSheet, Statistic};

/// The server's record of one player.
///
/// Lives in the [`UserRegistry`](crate::UserRegistry) for as long as the
/// player is online, across any number of arena sessions.
#[derive(Debug, Clone)]
pub struct User {
    player: PlayerId,
    spectator: bool,
    kit: Kit,
    stats: StatSheet,
}

impl User {
    pub fn new(player: PlayerId, kit: Kit) -> Self {
        Self {
            player,
            spectator: false,
            kit,
            stats: StatSheet::new(),
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn is_spectator(&self) -> bool {
        self.spectator
    }

    pub fn set_spectator(&mut self, spectator: bool) {
        self.spectator = spectator;
    }

    pub fn kit(&self) -> &Kit {
        &self.kit
    }

    pub fn set_kit(&mut self, kit: Kit) {
        self.kit = kit;
    }

    pub fn stat(&self, stat: Statistic) -> i32 {
        self.stats.get(stat)
    }

    pub fn set_stat(&mut self, stat: Statistic, value: i32) {
        self.stats.set(stat, value);
    }

    pub fn add_stat(&mut self, stat: Statistic, amount: i32) {
        self.stats.add(stat, amount);
    }

    /// Raises a personal-best statistic; lower values are ignored.
    pub fn raise_stat(&mut self, stat: Statistic, value: i32) {
        self.stats.raise_to(stat, value);
    }
}
