//! Controller tunables.
//!
//! All numeric balance values come from outside the core. The host loads
//! these from its configuration files; everything has a sensible default
//! so a bare `Settings::default()` runs a normal game.

use palisade_types::ArenaId;
use serde::{Deserialize, Serialize};

/// Placeholder replaced with the arena id in permission nodes.
const ARENA_PLACEHOLDER: &str = "<arena>";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds of pre-game countdown once enough players joined.
    pub starting_countdown: u32,

    /// Seconds between the end of one wave and the start of the next.
    pub next_wave_cooldown: u32,

    /// Win the game when this wave is reached. `None` disables the limit
    /// (endless mode).
    pub wave_limit: Option<u32>,

    /// Bring dead players back at every wave boundary.
    pub respawn_after_wave: bool,

    /// Celebrate the end of a game with fireworks.
    pub fireworks_on_end: bool,

    /// Persist each player's inventory on join and restore it on leave.
    pub inventory_manager: bool,

    /// Cross-server mode: players are routed here by a proxy, so join
    /// permissions are not checked and inventories are never restored
    /// locally.
    pub bungee: bool,

    /// Join permission node template; `<arena>` is replaced with the
    /// arena id (or `*` for the wildcard check).
    pub join_permission: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_countdown: 30,
            next_wave_cooldown: 25,
            wave_limit: None,
            respawn_after_wave: true,
            fireworks_on_end: true,
            inventory_manager: false,
            bungee: false,
            join_permission: "palisade.join.<arena>".to_string(),
        }
    }
}

impl Settings {
    /// The permission node for joining a specific arena.
    pub fn join_node(&self, arena: &ArenaId) -> String {
        self.join_permission.replace(ARENA_PLACEHOLDER, arena.as_str())
    }

    /// The wildcard node that grants access to every arena.
    pub fn wildcard_join_node(&self) -> String {
        self.join_permission.replace(ARENA_PLACEHOLDER, "*")
    }

    /// True when the wave limit is enabled and `wave` meets it.
    pub fn wave_limit_reached(&self, wave: u32) -> bool {
        self.wave_limit.is_some_and(|limit| wave >= limit)
    }
}
