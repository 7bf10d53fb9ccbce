//! Error types for the session-control layer.

use palisade_arena::ArenaError;
use palisade_types::{ArenaId, PlayerId};

use crate::HostError;

/// What can go wrong inside a controller operation.
///
/// The first three are ordinary refusals with a specific player-facing
/// notice. `Arena` and `Host` are unexpected faults: the controller logs
/// them and tells the triggering player something went wrong, and the
/// operation is abandoned. Nothing here ever reaches the game loop.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The arena has not been fully set up by an admin yet.
    #[error("arena {0} is not configured")]
    NotConfigured(ArenaId),

    /// An event-bus subscriber vetoed the join.
    #[error("join was cancelled by an event subscriber")]
    JoinCancelled,

    /// The player holds neither the arena-specific nor the wildcard
    /// join permission.
    #[error("player {0} lacks the join permission")]
    NoPermission(PlayerId),

    /// A roster or state-machine operation failed.
    #[error(transparent)]
    Arena(#[from] ArenaError),

    /// An operation on the host runtime failed.
    #[error(transparent)]
    Host(#[from] HostError),
}
