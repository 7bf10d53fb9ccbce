//! The process-wide user registry.

use std::collections::HashMap;

use palisade_types::PlayerId;

use crate::{Kit, User};

/// Owns every online player's [`User`] record.
///
/// Not thread-safe by itself — it is owned by the single game-loop task
/// and mutated only there, the same discipline as the arenas.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<PlayerId, User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the player's record, creating one with `default_kit` on
    /// first contact.
    pub fn get_or_create(&mut self, player: PlayerId, default_kit: &Kit) -> &mut User {
        self.users.entry(player).or_insert_with(|| {
            tracing::debug!(%player, "user record created");
            User::new(player, default_kit.clone())
        })
    }

    pub fn get(&self, player: PlayerId) -> Option<&User> {
        self.users.get(&player)
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut User> {
        self.users.get_mut(&player)
    }

    /// Drops the record on disconnect. Returns it so the host can
    /// serialize the statistics.
    pub fn remove(&mut self, player: PlayerId) -> Option<User> {
        let user = self.users.remove(&player);
        if user.is_some() {
            tracing::debug!(%player, "user record removed");
        }
        user
    }

    /// True if `player` has a record and is flagged spectator.
    pub fn is_spectator(&self, player: PlayerId) -> bool {
        self.users.get(&player).is_some_and(User::is_spectator)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
