//! Error types for the arena layer.

use palisade_types::{ArenaId, PlayerId};

use crate::ArenaState;

/// Errors that can occur during arena operations.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// No arena is registered under this id.
    #[error("arena {0} not found")]
    NotFound(ArenaId),

    /// The arena has no free player slots.
    #[error("arena {0} is full")]
    ArenaFull(ArenaId),

    /// The player is already in an arena.
    #[error("player {0} already in arena {1}")]
    AlreadyInArena(PlayerId, ArenaId),

    /// The player is not in this arena.
    #[error("player {0} not in arena {1}")]
    NotInArena(PlayerId, ArenaId),

    /// The requested state change is not a legal edge.
    #[error("illegal arena state change: {from} -> {to}")]
    InvalidTransition { from: ArenaState, to: ArenaState },
}
