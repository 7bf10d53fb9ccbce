//! The arena lifecycle state machine.

use serde::{Deserialize, Serialize};

/// The lifecycle state of an arena.
///
/// ```text
/// WaitingForPlayers → Starting → InGame → Ending ─┐
///         ↑               │                        │
///         │               └──────→ Ending          │
///         └────────────────────────────────────────┘
/// ```
///
/// - **WaitingForPlayers**: lobby is open, nothing is spawned yet.
/// - **Starting**: minimum player count reached; the pre-game countdown
///   is running.
/// - **InGame**: waves are being fought.
/// - **Ending**: the game concluded (win, loss or everyone left); the
///   post-game cooldown is running. When it expires the arena resets and
///   returns to `WaitingForPlayers`.
///
/// `Starting → Ending` exists because the countdown can be abandoned:
/// if every player leaves before it finishes there is nothing to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaState {
    WaitingForPlayers,
    Starting,
    InGame,
    Ending,
}

impl ArenaState {
    /// Returns `true` if a game round is underway or counting down.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Starting | Self::InGame)
    }

    /// Returns `true` if a player admitted now would be a spectator
    /// rather than a fighter, given the current countdown value.
    ///
    /// Late joins during the last three seconds of the countdown are
    /// spectators too: their kit and teleport would race the game start.
    pub fn joins_as_spectator(&self, timer: u32) -> bool {
        match self {
            Self::InGame | Self::Ending => true,
            Self::Starting => timer <= 3,
            Self::WaitingForPlayers => false,
        }
    }

    /// Returns `true` if transitioning to `target` is a legal edge.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::WaitingForPlayers, Self::Starting)
                | (Self::Starting, Self::InGame)
                | (Self::Starting, Self::Ending)
                | (Self::InGame, Self::Ending)
                | (Self::Ending, Self::WaitingForPlayers)
        )
    }
}

impl std::fmt::Display for ArenaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WaitingForPlayers => write!(f, "WaitingForPlayers"),
            Self::Starting => write!(f, "Starting"),
            Self::InGame => write!(f, "InGame"),
            Self::Ending => write!(f, "Ending"),
        }
    }
}
