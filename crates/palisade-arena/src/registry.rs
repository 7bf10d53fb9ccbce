//! Arena registry: creates, tracks and indexes arenas by player.

use std::collections::HashMap;

use palisade_types::{ArenaId, PlayerId};

use crate::{Arena, ArenaError};

/// Owns every arena in the process and tracks which player is where.
///
/// A player can be in at most ONE arena at a time; the registry enforces
/// that invariant so the rest of the core never has to re-check it.
#[derive(Debug, Default)]
pub struct ArenaRegistry {
    arenas: HashMap<ArenaId, Arena>,
    /// Maps each player to the arena they are currently in.
    memberships: HashMap<PlayerId, ArenaId>,
}

impl ArenaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly configured arena. Replaces any previous arena
    /// under the same id.
    pub fn register(&mut self, arena: Arena) {
        tracing::info!(arena = %arena.id(), "arena registered");
        self.arenas.insert(arena.id().clone(), arena);
    }

    pub fn get(&self, id: &ArenaId) -> Option<&Arena> {
        self.arenas.get(id)
    }

    pub fn get_mut(&mut self, id: &ArenaId) -> Option<&mut Arena> {
        self.arenas.get_mut(id)
    }

    /// The arena a player is currently in, if any.
    pub fn arena_of(&self, player: PlayerId) -> Option<&ArenaId> {
        self.memberships.get(&player)
    }

    /// Adds a player to an arena's roster, enforcing uniqueness and the
    /// player-slot limit.
    pub fn admit(&mut self, player: PlayerId, id: &ArenaId) -> Result<(), ArenaError> {
        if let Some(current) = self.memberships.get(&player) {
            return Err(ArenaError::AlreadyInArena(player, current.clone()));
        }
        let arena = self
            .arenas
            .get_mut(id)
            .ok_or_else(|| ArenaError::NotFound(id.clone()))?;
        if arena.player_count() >= arena.max_players() {
            return Err(ArenaError::ArenaFull(id.clone()));
        }
        arena.insert_player(player);
        self.memberships.insert(player, id.clone());
        tracing::info!(
            arena = %id,
            %player,
            players = arena.player_count(),
            "player admitted"
        );
        Ok(())
    }

    /// Removes a player from an arena's roster.
    pub fn withdraw(&mut self, player: PlayerId, id: &ArenaId) -> Result<(), ArenaError> {
        let arena = self
            .arenas
            .get_mut(id)
            .ok_or_else(|| ArenaError::NotFound(id.clone()))?;
        if !arena.take_player(player) {
            return Err(ArenaError::NotInArena(player, id.clone()));
        }
        self.memberships.remove(&player);
        tracing::info!(
            arena = %id,
            %player,
            players = arena.player_count(),
            "player withdrawn"
        );
        Ok(())
    }

    /// Unregisters an arena, dropping its roster index entries.
    pub fn remove(&mut self, id: &ArenaId) -> Result<Arena, ArenaError> {
        let arena = self
            .arenas
            .remove(id)
            .ok_or_else(|| ArenaError::NotFound(id.clone()))?;
        self.memberships.retain(|_, a| a != id);
        tracing::info!(arena = %id, "arena unregistered");
        Ok(arena)
    }

    pub fn arena_ids(&self) -> Vec<ArenaId> {
        self.arenas.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.arenas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arenas.is_empty()
    }
}
