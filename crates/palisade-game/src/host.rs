//! The `Host` trait — the seam between the game core and the server
//! runtime that embeds it.
//!
//! The core never touches the world directly: it decides *what* should
//! happen (clear this inventory, teleport that player, despawn this
//! entity) and the host decides *how*. A real deployment backs this with
//! the server's entity/world APIs; tests back it with a recorder.

use palisade_types::{ArenaId, EntityId, PlayerId};
use palisade_user::Kit;

use crate::messages::{Notice, Summary};

/// A failure inside a host operation.
///
/// The core treats these as unexpected faults: they are logged and
/// surfaced as a generic notice, and the operation is abandoned without
/// rolling back what already executed.
#[derive(Debug, thiserror::Error)]
#[error("host operation failed: {0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Named teleport destinations configured per arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waypoint {
    /// The pre-game waiting lobby.
    Lobby,
    /// The in-arena spawn point.
    Start,
    /// Where players end up after leaving.
    End,
}

/// Reward hooks the host may attach effects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardEvent {
    WaveEnd,
    GameEnd,
    ZombieKill,
}

/// Everything the core needs from the embedding server runtime.
///
/// Implementations must be `Send + Sync`: the celebration task holds an
/// `Arc` of the host and fires fireworks from a background task.
/// Effectful methods return `Result` so a broken host call surfaces as a
/// diagnosable fault instead of a silent no-op.
pub trait Host: Send + Sync + 'static {
    // -- Messaging --------------------------------------------------------

    /// Sends a templated chat notice to one player.
    fn notify(&self, player: PlayerId, notice: Notice) -> Result<(), HostError>;

    /// Broadcasts a notice to everyone in the arena.
    fn broadcast(&self, arena: &ArenaId, notice: Notice) -> Result<(), HostError>;

    /// Sends the multi-line end-of-game summary to one player.
    fn send_summary(&self, player: PlayerId, summary: &Summary) -> Result<(), HostError>;

    // -- Queries ----------------------------------------------------------

    /// True if the player holds the given permission node.
    fn has_permission(&self, player: PlayerId, node: &str) -> bool;

    // -- Rewards ----------------------------------------------------------

    /// Runs the externally configured reward for `event`.
    fn perform_reward(&self, arena: &ArenaId, event: RewardEvent) -> Result<(), HostError>;

    // -- Inventory persistence -------------------------------------------

    /// Snapshots the player's inventory for restoration after the game.
    fn save_inventory(&self, player: PlayerId) -> Result<(), HostError>;

    /// Restores the snapshot taken by [`save_inventory`](Self::save_inventory).
    fn restore_inventory(&self, player: PlayerId) -> Result<(), HostError>;

    // -- Movement and visibility -----------------------------------------

    fn teleport(&self, player: PlayerId, arena: &ArenaId, waypoint: Waypoint)
    -> Result<(), HostError>;

    /// Applies spectator sight rules: the player sees only fellow
    /// spectators, fighters keep seeing the player per standard rules.
    fn isolate_spectator(&self, player: PlayerId, arena: &ArenaId) -> Result<(), HostError>;

    /// Recomputes pairwise visibility for everyone in the arena.
    fn refresh_visibility(&self, arena: &ArenaId) -> Result<(), HostError>;

    /// Makes the player mutually visible with all online players again.
    fn show_to_everyone(&self, player: PlayerId) -> Result<(), HostError>;

    // -- Vitals and condition --------------------------------------------

    /// Resets health and food to their full defaults.
    fn reset_vitals(&self, player: PlayerId) -> Result<(), HostError>;

    fn set_max_health(&self, player: PlayerId, max_health: f64) -> Result<(), HostError>;

    /// Restores the player to full health (food untouched).
    fn heal(&self, player: PlayerId) -> Result<(), HostError>;

    fn clear_effects(&self, player: PlayerId) -> Result<(), HostError>;

    /// Puts out any fire on the player.
    fn extinguish(&self, player: PlayerId) -> Result<(), HostError>;

    /// Grants night vision with no expiry.
    fn grant_night_vision(&self, player: PlayerId) -> Result<(), HostError>;

    fn set_flight(&self, player: PlayerId, enabled: bool) -> Result<(), HostError>;

    fn set_survival_mode(&self, player: PlayerId) -> Result<(), HostError>;

    // -- Experience -------------------------------------------------------

    fn give_experience(&self, player: PlayerId, amount: u32) -> Result<(), HostError>;

    fn reset_experience(&self, player: PlayerId) -> Result<(), HostError>;

    // -- Loadout ----------------------------------------------------------

    fn clear_inventory(&self, player: PlayerId) -> Result<(), HostError>;

    fn clear_armor(&self, player: PlayerId) -> Result<(), HostError>;

    /// Grants the fixed spectator toolkit: teleport compass, settings
    /// comparator and the leave item.
    fn give_spectator_gear(&self, player: PlayerId) -> Result<(), HostError>;

    /// Grants the kit-selection menu item.
    fn give_kit_menu(&self, player: PlayerId) -> Result<(), HostError>;

    fn give_leave_item(&self, player: PlayerId) -> Result<(), HostError>;

    /// Refills the player's inventory with their kit's starting items.
    fn restock_kit(&self, player: PlayerId, kit: &Kit) -> Result<(), HostError>;

    // -- Scoreboard -------------------------------------------------------

    fn clear_scoreboard(&self, player: PlayerId) -> Result<(), HostError>;

    // -- World and entities ----------------------------------------------

    fn despawn(&self, entity: EntityId) -> Result<(), HostError>;

    /// Puts the arena's doors and barriers back as they were before the
    /// zombies broke through.
    fn restore_doors(&self, arena: &ArenaId) -> Result<(), HostError>;

    fn spawn_firework(&self, player: PlayerId) -> Result<(), HostError>;

    /// Brings back players who died during the current wave.
    fn revive_fallen(&self, arena: &ArenaId) -> Result<(), HostError>;
}
