//! The game loop: one beat per second across every arena.
//!
//! Owns the controller and both registries, and is the single place
//! arena timers are decremented and lifecycle transitions fire. The
//! embedding server registers spawned entities on the arenas between
//! beats (villagers during the countdown, zombies after each wave
//! start) and routes player commands through [`GameLoop::join`] and
//! [`GameLoop::leave`].

use std::collections::HashMap;

use palisade_arena::{Arena, ArenaRegistry, ArenaState};
use palisade_game::{GameController, Host, JoinOutcome};
use palisade_tick::Pulse;
use palisade_types::{ArenaId, PlayerId};
use palisade_user::{Statistic, User, UserRegistry};

/// Where an in-game arena is within the wave cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WavePhase {
    /// Zombies are out; the wave ends when the last one dies.
    Fighting,
    /// Between waves; the next one starts when the timer runs out.
    Cooldown,
}

/// Drives every arena, one second at a time.
pub struct GameLoop<H: Host> {
    controller: GameController<H>,
    arenas: ArenaRegistry,
    users: UserRegistry,
    phases: HashMap<ArenaId, WavePhase>,
}

impl<H: Host> GameLoop<H> {
    pub fn new(controller: GameController<H>) -> Self {
        Self {
            controller,
            arenas: ArenaRegistry::new(),
            users: UserRegistry::new(),
            phases: HashMap::new(),
        }
    }

    pub fn register_arena(&mut self, arena: Arena) {
        self.arenas.register(arena);
    }

    pub fn arenas(&self) -> &ArenaRegistry {
        &self.arenas
    }

    pub fn arenas_mut(&mut self) -> &mut ArenaRegistry {
        &mut self.arenas
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UserRegistry {
        &mut self.users
    }

    pub fn controller(&self) -> &GameController<H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GameController<H> {
        &mut self.controller
    }

    /// Routes a join request to the controller.
    pub fn join(&mut self, player: PlayerId, arena_id: &ArenaId) -> JoinOutcome {
        self.controller
            .join_attempt(&mut self.arenas, &mut self.users, player, arena_id)
    }

    /// Routes a leave request to the controller. A no-op when the player
    /// is not in any arena.
    pub fn leave(&mut self, player: PlayerId) {
        if let Some(arena_id) = self.arenas.arena_of(player).cloned() {
            self.controller
                .leave_attempt(&mut self.arenas, &mut self.users, player, &arena_id);
        }
    }

    /// Handles a player dropping off the server entirely: leaves their
    /// arena, then removes and returns the user record so the host can
    /// serialize the statistics.
    pub fn disconnect(&mut self, player: PlayerId) -> Option<User> {
        self.leave(player);
        self.users.remove(player)
    }

    /// Advances every arena by one second.
    pub fn tick(&mut self) {
        for id in self.arenas.arena_ids() {
            self.tick_arena(&id);
        }
    }

    /// Runs forever, ticking on every pulse beat.
    pub async fn run(mut self, mut pulse: Pulse) {
        tracing::info!(arenas = self.arenas.len(), "game loop running");
        loop {
            pulse.wait().await;
            self.tick();
        }
    }

    fn tick_arena(&mut self, id: &ArenaId) {
        let Some(arena) = self.arenas.get(id) else {
            return;
        };
        match arena.state() {
            ArenaState::WaitingForPlayers => self.tick_waiting(id),
            ArenaState::Starting => self.tick_starting(id),
            ArenaState::InGame => self.tick_in_game(id),
            ArenaState::Ending => self.tick_ending(id),
        }
    }

    fn tick_waiting(&mut self, id: &ArenaId) {
        let countdown = self.controller.settings().starting_countdown;
        let arena = self.arenas.get_mut(id).expect("checked by caller");
        if arena.is_ready() && arena.player_count() >= arena.min_players() {
            if arena.transition_to(ArenaState::Starting).is_ok() {
                arena.set_timer(countdown);
                tracing::info!(arena = %id, countdown, "enough players, countdown started");
            }
        }
    }

    fn tick_starting(&mut self, id: &ArenaId) {
        let arena = self.arenas.get_mut(id).expect("checked by caller");
        if arena.timer() > 0 {
            arena.tick_timer();
            return;
        }
        // Countdown expired: the game begins at wave one.
        if arena.transition_to(ArenaState::InGame).is_ok() {
            arena.set_wave(1);
            self.phases.insert(id.clone(), WavePhase::Fighting);

            let roster: Vec<PlayerId> = arena.players().iter().copied().collect();
            let default_kit = self.controller.kits().default_kit().clone();
            for player in roster {
                self.users
                    .get_or_create(player, &default_kit)
                    .add_stat(Statistic::GamesPlayed, 1);
            }

            let arena = self.arenas.get_mut(id).expect("checked by caller");
            self.controller.start_wave(arena, &mut self.users);
        }
    }

    fn tick_in_game(&mut self, id: &ArenaId) {
        let (villagers_gone, fighters) = {
            let arena = self.arenas.get(id).expect("checked by caller");
            let fighters = arena
                .players()
                .iter()
                .filter(|p| !self.users.is_spectator(**p))
                .count();
            (arena.villagers().is_empty(), fighters)
        };

        // Loss conditions come first: the last villager fell, or nobody
        // is left to fight.
        if villagers_gone || fighters == 0 {
            let arena = self.arenas.get_mut(id).expect("checked by caller");
            self.controller.stop_game(false, arena, &mut self.users);
            self.phases.remove(id);
            return;
        }

        match self.phases.get(id).copied().unwrap_or(WavePhase::Fighting) {
            WavePhase::Fighting => {
                let cleared = self
                    .arenas
                    .get(id)
                    .expect("checked by caller")
                    .zombies()
                    .is_empty();
                if cleared {
                    let arena = self.arenas.get_mut(id).expect("checked by caller");
                    self.controller.end_wave(arena, &mut self.users);
                    // end_wave may have stopped the game at the limit.
                    if arena.state() == ArenaState::InGame {
                        self.phases.insert(id.clone(), WavePhase::Cooldown);
                    } else {
                        self.phases.remove(id);
                    }
                }
            }
            WavePhase::Cooldown => {
                let arena = self.arenas.get_mut(id).expect("checked by caller");
                if arena.timer() > 0 {
                    arena.tick_timer();
                    return;
                }
                self.phases.insert(id.clone(), WavePhase::Fighting);
                let arena = self.arenas.get_mut(id).expect("checked by caller");
                self.controller.start_wave(arena, &mut self.users);
            }
        }
    }

    fn tick_ending(&mut self, id: &ArenaId) {
        {
            let arena = self.arenas.get_mut(id).expect("checked by caller");
            if arena.timer() > 0 {
                arena.tick_timer();
                return;
            }
        }

        // Cooldown over: restore anyone still inside through the normal
        // leave path, then reset for the next session.
        let roster: Vec<PlayerId> = self
            .arenas
            .get(id)
            .expect("checked by caller")
            .players()
            .iter()
            .copied()
            .collect();
        for player in roster {
            self.controller
                .leave_attempt(&mut self.arenas, &mut self.users, player, id);
        }

        let leftovers = {
            let arena = self.arenas.get_mut(id).expect("checked by caller");
            match arena.reset() {
                Ok(leftovers) => leftovers,
                Err(error) => {
                    tracing::error!(arena = %id, error = %error, "arena reset failed");
                    return;
                }
            }
        };
        for entity in leftovers {
            let _ = self.controller.host().despawn(entity);
        }
        self.phases.remove(id);
        tracing::info!(arena = %id, "arena reset, waiting for players");
    }
}
