//! One arena's state: roster, timers, options and owned entities.

use std::collections::{HashMap, HashSet};

use palisade_types::{ArenaId, CompanionKind, EntityId, PlayerId, Position};

use crate::{ArenaError, ArenaOption, ArenaState, Options};

/// An allied entity spawned into the arena, optionally bound to the
/// player who summoned it (kit companions). Unbound companions belong
/// to the arena itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Companion {
    pub entity: EntityId,
    pub kind: CompanionKind,
    pub owner: Option<PlayerId>,
}

/// One arena: a play session's state, roster and everything it spawned.
///
/// The arena exclusively owns its entity collections — spawn and despawn
/// are tied to its lifecycle, and every collection is emptied before the
/// arena returns to `WaitingForPlayers`.
#[derive(Debug)]
pub struct Arena {
    id: ArenaId,
    state: ArenaState,
    timer: u32,
    options: Options,
    /// Arena is fully configured (locations set, spawn points placed).
    /// Joins are refused until the host marks it ready.
    ready: bool,
    min_players: usize,
    max_players: usize,
    players: HashSet<PlayerId>,
    zombies: Vec<EntityId>,
    villagers: Vec<EntityId>,
    golems: Vec<Companion>,
    wolves: Vec<Companion>,
    /// Last known zombie positions, used between checks to detect mobs
    /// stuck in terrain. Cleared at every wave end.
    zombie_checkpoints: HashMap<EntityId, Position>,
}

impl Arena {
    pub fn new(id: ArenaId, min_players: usize, max_players: usize) -> Self {
        Self {
            id,
            state: ArenaState::WaitingForPlayers,
            timer: 0,
            options: Options::new(),
            ready: false,
            min_players,
            max_players,
            players: HashSet::new(),
            zombies: Vec::new(),
            villagers: Vec::new(),
            golems: Vec::new(),
            wolves: Vec::new(),
            zombie_checkpoints: HashMap::new(),
        }
    }

    pub fn id(&self) -> &ArenaId {
        &self.id
    }

    pub fn state(&self) -> ArenaState {
        self.state
    }

    /// Moves the arena along one of the legal lifecycle edges.
    pub fn transition_to(&mut self, target: ArenaState) -> Result<(), ArenaError> {
        if !self.state.can_transition_to(target) {
            return Err(ArenaError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }
        tracing::debug!(arena = %self.id, from = %self.state, to = %target, "state change");
        self.state = target;
        Ok(())
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn set_timer(&mut self, seconds: u32) {
        self.timer = seconds;
    }

    /// Decrements the timer by one second, stopping at zero.
    pub fn tick_timer(&mut self) {
        self.timer = self.timer.saturating_sub(1);
    }

    /// The current wave number. Backed by the option table so the wave
    /// counter and the spawn-scaling input can never disagree.
    pub fn wave(&self) -> u32 {
        self.options.get(ArenaOption::Wave).max(0) as u32
    }

    pub fn set_wave(&mut self, wave: u32) {
        self.options.set(ArenaOption::Wave, wave as i32);
    }

    pub fn option(&self, option: ArenaOption) -> i32 {
        self.options.get(option)
    }

    pub fn set_option(&mut self, option: ArenaOption, value: i32) {
        self.options.set(option, value);
    }

    pub fn add_option(&mut self, option: ArenaOption, amount: i32) {
        self.options.add(option, amount);
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn min_players(&self) -> usize {
        self.min_players
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    // -- Roster -----------------------------------------------------------

    pub fn players(&self) -> &HashSet<PlayerId> {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn contains_player(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    pub(crate) fn insert_player(&mut self, player: PlayerId) -> bool {
        self.players.insert(player)
    }

    pub(crate) fn take_player(&mut self, player: PlayerId) -> bool {
        self.players.remove(&player)
    }

    // -- Entities ---------------------------------------------------------

    pub fn zombies(&self) -> &[EntityId] {
        &self.zombies
    }

    pub fn add_zombie(&mut self, entity: EntityId) {
        self.zombies.push(entity);
    }

    pub fn remove_zombie(&mut self, entity: EntityId) {
        self.zombies.retain(|z| *z != entity);
    }

    pub fn villagers(&self) -> &[EntityId] {
        &self.villagers
    }

    pub fn add_villager(&mut self, entity: EntityId) {
        self.villagers.push(entity);
    }

    pub fn remove_villager(&mut self, entity: EntityId) {
        self.villagers.retain(|v| *v != entity);
    }

    pub fn golems(&self) -> &[Companion] {
        &self.golems
    }

    pub fn add_golem(&mut self, golem: Companion) {
        self.golems.push(golem);
    }

    pub fn wolves(&self) -> &[Companion] {
        &self.wolves
    }

    pub fn add_wolf(&mut self, wolf: Companion) {
        self.wolves.push(wolf);
    }

    /// Removes and returns every companion bound to `owner`.
    pub fn take_companions_of(&mut self, owner: PlayerId) -> Vec<Companion> {
        let mut taken = Vec::new();
        for pool in [&mut self.golems, &mut self.wolves] {
            let mut kept = Vec::with_capacity(pool.len());
            for companion in pool.drain(..) {
                if companion.owner == Some(owner) {
                    taken.push(companion);
                } else {
                    kept.push(companion);
                }
            }
            *pool = kept;
        }
        taken
    }

    /// Removes and returns every owned entity id, leaving all
    /// collections empty. The caller despawns them through the host.
    pub fn drain_entities(&mut self) -> Vec<EntityId> {
        let mut all: Vec<EntityId> = Vec::new();
        all.append(&mut self.zombies);
        all.append(&mut self.villagers);
        all.extend(self.golems.drain(..).map(|c| c.entity));
        all.extend(self.wolves.drain(..).map(|c| c.entity));
        all
    }

    pub fn checkpoint_zombie(&mut self, entity: EntityId, position: Position) {
        self.zombie_checkpoints.insert(entity, position);
    }

    pub fn zombie_checkpoint(&self, entity: EntityId) -> Option<Position> {
        self.zombie_checkpoints.get(&entity).copied()
    }

    pub fn clear_zombie_checkpoints(&mut self) {
        self.zombie_checkpoints.clear();
    }

    // -- Reset ------------------------------------------------------------

    /// Resets the arena for the next session: `Ending → WaitingForPlayers`,
    /// wave and options wiped, timer zeroed.
    ///
    /// Entity collections must already be empty (cleanup happens when the
    /// game stops); any stragglers are returned so the caller can despawn
    /// them rather than leak live mobs into the next session.
    pub fn reset(&mut self) -> Result<Vec<EntityId>, ArenaError> {
        self.transition_to(ArenaState::WaitingForPlayers)?;
        let leftovers = self.drain_entities();
        if !leftovers.is_empty() {
            tracing::warn!(
                arena = %self.id,
                count = leftovers.len(),
                "entities survived until reset"
            );
        }
        self.options.reset();
        self.zombie_checkpoints.clear();
        self.timer = 0;
        Ok(leftovers)
    }
}
