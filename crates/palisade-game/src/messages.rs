//! Typed chat messages.
//!
//! The core never formats text: it hands these values to the host, which
//! owns localization, colors and layout.

use palisade_types::PlayerId;
use serde::{Deserialize, Serialize};

/// A templated chat message, rendered and localized by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Join refused: the arena is not fully set up yet.
    ArenaNotConfigured,
    /// Join refused: an external subscriber vetoed it.
    JoinCancelled,
    /// Join refused: missing the join permission.
    NoJoinPermission,
    /// Join refused: the player is already in an arena.
    AlreadyPlaying,
    /// Join refused: no free slots.
    ArenaFull,
    /// Told to a player admitted mid-game.
    YouAreSpectator,
    /// Broadcast when a fighter joins.
    PlayerJoined(PlayerId),
    /// Broadcast when a fighter leaves.
    PlayerLeft(PlayerId),
    /// Seconds until the next wave begins.
    NextWaveIn(u32),
    /// Sent alongside the between-wave heal.
    Refreshed,
    /// Broadcast when a wave begins.
    WaveStarted(u32),
    /// Generic failure notice for unexpected faults.
    SomethingWentWrong,
}

/// How the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conclusion {
    /// The wave limit was reached: the defenders won.
    Win,
    /// The villagers were wiped out while defenders still stood.
    VillagersFell,
    /// The defenders themselves were wiped out.
    PlayersFell,
}

/// The end-of-game summary sent to each participant.
///
/// The host renders this as its multi-line, centered summary screen;
/// the core only fills in the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub conclusion: Conclusion,
    /// The wave the game ended on.
    pub final_wave: u32,
    /// The recipient's personal best wave (already raised to include
    /// this game).
    pub personal_best: i32,
    /// Zombies killed by everyone over the whole session.
    pub zombies_killed: i32,
    /// Orbs spent by everyone over the whole session.
    pub orbs_spent: i32,
}
