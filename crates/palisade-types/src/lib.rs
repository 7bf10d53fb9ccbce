//! Shared identity and geometry types for Palisade.
//!
//! Every crate in the workspace speaks in terms of these ids. They are
//! newtype wrappers so a `PlayerId` can never be confused with an
//! `EntityId` even though both are integers underneath, and so arena ids
//! keep their human-readable names from the host configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player, assigned by the host runtime.
///
/// Serialized as the bare number (`#[serde(transparent)]`), so a
/// `PlayerId(42)` is just `42` on disk and in logs it prints as `P-42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for an arena: one play session's worth of state,
/// timers and entities.
///
/// Arenas are named in the host's configuration ("village_east",
/// "graveyard"), so the id is a string rather than a counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArenaId(pub String);

impl ArenaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ArenaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A handle to a spawned game entity (zombie, villager, golem, wolf).
///
/// The host runtime assigns these when it spawns something; the core only
/// stores and returns them so the host can despawn the right mob later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E-{}", self.0)
    }
}

/// What kind of allied entity a companion is.
///
/// Companions are summoned by kits or by the arena itself and fight on
/// the defenders' side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanionKind {
    IronGolem,
    Wolf,
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point in the game world.
///
/// Used for the transient zombie checkpoint map (stuck-mob detection
/// between waves). The core never does geometry with it beyond equality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}
