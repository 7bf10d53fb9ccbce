//! The session controller: join, leave, stop, and wave boundaries.

use std::collections::HashMap;
use std::sync::Arc;

use palisade_arena::{Arena, ArenaError, ArenaOption, ArenaRegistry, ArenaState};
use palisade_events::{EventBus, EventListener, GameEvent, Verdict};
use palisade_types::{ArenaId, PlayerId};
use palisade_user::{KitRegistry, Statistic, UserRegistry};
use tokio::task::JoinHandle;

use crate::celebration::spawn_celebration;
use crate::messages::{Conclusion, Notice, Summary};
use crate::{GameError, Host, RewardEvent, Settings, Waypoint};

/// Vanilla max health restored when a player leaves.
const DEFAULT_MAX_HEALTH: f64 = 20.0;

/// Post-game cooldown when no villagers survived.
const ENDING_COOLDOWN_LONG: u32 = 10;

/// Post-game cooldown when villagers made it through.
const ENDING_COOLDOWN_SHORT: u32 = 5;

/// Flat experience granted to each surviving fighter at a wave boundary.
const WAVE_SURVIVAL_EXPERIENCE: u32 = 5;

/// The result of a join attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The player is in, either fighting or watching.
    Joined { spectator: bool },
    /// The join was refused for an ordinary reason; the player was told
    /// which one.
    Refused(JoinRefusal),
    /// An unexpected fault aborted the join; the player got a generic
    /// notice and the details went to the log.
    Faulted,
}

/// Why a join was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRefusal {
    NotConfigured,
    Cancelled,
    NoPermission,
    AlreadyPlaying,
    ArenaFull,
}

/// Orchestrates all cross-cutting operations against arenas.
///
/// Owns the host handle, the event bus, the settings and the kit roster;
/// arenas and users are passed in by the game loop, which is the only
/// caller. Every mutation of arena state funnels through here — that
/// single-owner discipline is what keeps the invariants intact without
/// any locking.
pub struct GameController<H: Host> {
    host: Arc<H>,
    bus: EventBus,
    settings: Settings,
    kits: KitRegistry,
    /// Running celebration tasks, aborted if their player leaves.
    celebrations: HashMap<PlayerId, JoinHandle<()>>,
}

impl<H: Host> GameController<H> {
    pub fn new(host: H, settings: Settings) -> Self {
        Self {
            host: Arc::new(host),
            bus: EventBus::new(),
            settings,
            kits: KitRegistry::default(),
            celebrations: HashMap::new(),
        }
    }

    /// Replaces the stock kit roster.
    pub fn with_kits(mut self, kits: KitRegistry) -> Self {
        self.kits = kits;
        self
    }

    /// Registers an external lifecycle listener.
    pub fn subscribe(&mut self, listener: Box<dyn EventListener>) {
        self.bus.subscribe(listener);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn kits(&self) -> &KitRegistry {
        &self.kits
    }

    // -- Join -------------------------------------------------------------

    /// Attempts to admit `player` to the arena.
    ///
    /// Publishes the cancellable join-attempt event, checks arena
    /// readiness and permissions, then admits the player as a fighter or
    /// — mid-game — as a spectator. Refusals notify the player; faults
    /// are logged and reported generically.
    pub fn join_attempt(
        &mut self,
        arenas: &mut ArenaRegistry,
        users: &mut UserRegistry,
        player: PlayerId,
        arena_id: &ArenaId,
    ) -> JoinOutcome {
        tracing::debug!(%player, arena = %arena_id, "join attempt");
        match self.try_join(arenas, users, player, arena_id) {
            Ok(spectator) => {
                tracing::info!(%player, arena = %arena_id, spectator, "player joined");
                JoinOutcome::Joined { spectator }
            }
            Err(error) => self.refuse_join(player, error),
        }
    }

    fn try_join(
        &mut self,
        arenas: &mut ArenaRegistry,
        users: &mut UserRegistry,
        player: PlayerId,
        arena_id: &ArenaId,
    ) -> Result<bool, GameError> {
        let arena = arenas
            .get(arena_id)
            .ok_or_else(|| ArenaError::NotFound(arena_id.clone()))?;
        if !arena.is_ready() {
            return Err(GameError::NotConfigured(arena_id.clone()));
        }

        if self.bus.request_join(player, arena_id) == Verdict::Cancel {
            return Err(GameError::JoinCancelled);
        }

        // Proxied players were already vetted by the network they came
        // from; everyone else needs the wildcard or per-arena node.
        if !self.settings.bungee {
            let allowed = self.host.has_permission(player, &self.settings.wildcard_join_node())
                || self.host.has_permission(player, &self.settings.join_node(arena_id));
            if !allowed {
                return Err(GameError::NoPermission(player));
            }
        }

        arenas.admit(player, arena_id)?;

        // Snapshot the inventory before anything below touches it.
        if self.settings.inventory_manager {
            self.host.save_inventory(player)?;
        }

        let arena = arenas.get(arena_id).expect("admitted above");
        let spectator = arena.state().joins_as_spectator(arena.timer());
        let arena_state = arena.state();
        let roster: Vec<PlayerId> = arena.players().iter().copied().collect();

        if spectator {
            self.host.teleport(player, arena_id, Waypoint::Start)?;
            self.host.notify(player, Notice::YouAreSpectator)?;
            self.host.clear_inventory(player)?;
            self.host.give_spectator_gear(player)?;
            self.host.clear_effects(player)?;
            self.host.reset_vitals(player)?;
            self.host.set_survival_mode(player)?;
            self.host.set_flight(player, true)?;

            let user = users.get_or_create(player, self.kits.default_kit());
            user.set_spectator(true);
            user.set_stat(Statistic::Orbs, 0);

            self.host.grant_night_vision(player)?;
            self.host.isolate_spectator(player, arena_id)?;
        } else {
            let was_spectator = {
                let user = users.get_or_create(player, self.kits.default_kit());
                let was = user.is_spectator();
                user.set_kit(self.kits.default_kit().clone());
                was
            };

            self.host.teleport(player, arena_id, Waypoint::Lobby)?;
            self.host.reset_vitals(player)?;
            self.host.clear_armor(player)?;
            self.host.set_flight(player, false)?;
            self.host.clear_inventory(player)?;
            if !was_spectator {
                self.host.broadcast(arena_id, Notice::PlayerJoined(player))?;
            }
            self.host.give_kit_menu(player)?;
            if matches!(
                arena_state,
                ArenaState::WaitingForPlayers | ArenaState::Starting
            ) {
                self.host.give_leave_item(player)?;
            }
            for occupant in roster {
                self.host.reset_experience(occupant)?;
            }
            self.host.refresh_visibility(arena_id)?;
        }

        Ok(spectator)
    }

    fn refuse_join(&self, player: PlayerId, error: GameError) -> JoinOutcome {
        let (notice, refusal) = match error {
            GameError::NotConfigured(_) => {
                (Notice::ArenaNotConfigured, JoinRefusal::NotConfigured)
            }
            GameError::JoinCancelled => (Notice::JoinCancelled, JoinRefusal::Cancelled),
            GameError::NoPermission(_) => (Notice::NoJoinPermission, JoinRefusal::NoPermission),
            GameError::Arena(ArenaError::AlreadyInArena(..)) => {
                (Notice::AlreadyPlaying, JoinRefusal::AlreadyPlaying)
            }
            GameError::Arena(ArenaError::ArenaFull(_)) => {
                (Notice::ArenaFull, JoinRefusal::ArenaFull)
            }
            fault => {
                tracing::error!(%player, error = %fault, "join attempt faulted");
                let _ = self.host.notify(player, Notice::SomethingWentWrong);
                return JoinOutcome::Faulted;
            }
        };
        tracing::debug!(%player, ?refusal, "join refused");
        let _ = self.host.notify(player, notice);
        JoinOutcome::Refused(refusal)
    }

    // -- Leave ------------------------------------------------------------

    /// Removes `player` from the arena, restoring their pre-game state.
    ///
    /// Never refused: the leave-attempt event is audit-only. If the
    /// roster empties and a game was underway, the arena fast-tracks to
    /// `Ending` with a zero cooldown — no wave continues for nobody.
    pub fn leave_attempt(
        &mut self,
        arenas: &mut ArenaRegistry,
        users: &mut UserRegistry,
        player: PlayerId,
        arena_id: &ArenaId,
    ) {
        tracing::debug!(%player, arena = %arena_id, "leave attempt");
        if let Err(error) = self.try_leave(arenas, users, player, arena_id) {
            tracing::error!(%player, arena = %arena_id, error = %error, "leave attempt faulted");
            let _ = self.host.notify(player, Notice::SomethingWentWrong);
        }
    }

    fn try_leave(
        &mut self,
        arenas: &mut ArenaRegistry,
        users: &mut UserRegistry,
        player: PlayerId,
        arena_id: &ArenaId,
    ) -> Result<(), GameError> {
        self.bus.publish(&GameEvent::LeaveAttempt {
            player,
            arena: arena_id.clone(),
        });

        self.host.reset_experience(player)?;
        let (was_spectator, kit_has_companion) = {
            let user = users.get_or_create(player, self.kits.default_kit());
            user.set_stat(Statistic::Orbs, 0);
            (user.is_spectator(), user.kit().companion().is_some())
        };

        self.host.clear_inventory(player)?;
        self.host.clear_armor(player)?;
        arenas.withdraw(player, arena_id)?;
        let arena = arenas.get_mut(arena_id).expect("withdrawn above");

        if !was_spectator {
            self.host.broadcast(arena_id, Notice::PlayerLeft(player))?;
        }
        if let Some(user) = users.get_mut(player) {
            user.set_spectator(false);
        }
        self.host.clear_scoreboard(player)?;

        if kit_has_companion {
            for companion in arena.take_companions_of(player) {
                self.host.despawn(companion.entity)?;
            }
        }
        self.cancel_celebration(player);

        self.host.set_max_health(player, DEFAULT_MAX_HEALTH)?;
        self.host.reset_vitals(player)?;
        self.host.clear_effects(player)?;
        self.host.extinguish(player)?;
        self.host.set_flight(player, false)?;

        if arena.player_count() == 0 && arena.state() != ArenaState::WaitingForPlayers {
            if arena.state() != ArenaState::Ending {
                arena.transition_to(ArenaState::Ending)?;
            }
            arena.set_timer(0);
            tracing::info!(arena = %arena_id, "roster emptied, fast-tracking cleanup");
        }

        self.host.set_survival_mode(player)?;
        self.host.show_to_everyone(player)?;
        self.host.teleport(player, arena_id, Waypoint::End)?;

        if self.settings.inventory_manager && !self.settings.bungee {
            self.host.restore_inventory(player)?;
        }

        tracing::info!(%player, arena = %arena_id, "player left");
        Ok(())
    }

    // -- Stop -------------------------------------------------------------

    /// Ends the game in `arena`: summaries, rewards, cleanup, cooldown.
    ///
    /// `quick_stop` skips the celebration (used when the arena has to
    /// come down immediately, e.g. plugin shutdown).
    pub fn stop_game(&mut self, quick_stop: bool, arena: &mut Arena, users: &mut UserRegistry) {
        if let Err(error) = self.try_stop(quick_stop, arena, users) {
            tracing::error!(arena = %arena.id(), error = %error, "game stop faulted");
        }
    }

    fn try_stop(
        &mut self,
        quick_stop: bool,
        arena: &mut Arena,
        users: &mut UserRegistry,
    ) -> Result<(), GameError> {
        let arena_id = arena.id().clone();
        self.bus.publish(&GameEvent::GameStop {
            arena: arena_id.clone(),
        });

        // Captured before cleanup empties the collections; decides both
        // the summary classification and the cooldown length.
        let villagers_survived = !arena.villagers().is_empty();
        let final_wave = arena.wave();
        let conclusion = if self.settings.wave_limit_reached(final_wave) {
            Conclusion::Win
        } else if villagers_survived {
            Conclusion::VillagersFell
        } else {
            Conclusion::PlayersFell
        };
        let zombies_killed = arena.option(ArenaOption::TotalKilledZombies);
        let orbs_spent = arena.option(ArenaOption::TotalOrbsSpent);

        let roster: Vec<PlayerId> = arena.players().iter().copied().collect();
        for player in roster {
            let user = users.get_or_create(player, self.kits.default_kit());
            user.raise_stat(Statistic::HighestWave, final_wave as i32);
            let summary = Summary {
                conclusion,
                final_wave,
                personal_best: user.stat(Statistic::HighestWave),
                zombies_killed,
                orbs_spent,
            };
            self.host.send_summary(player, &summary)?;
            self.host.give_experience(player, final_wave)?;
            self.host.clear_scoreboard(player)?;
            if !quick_stop && self.settings.fireworks_on_end {
                self.schedule_celebration(player);
            }
        }

        arena.set_option(ArenaOption::RottenFleshAmount, 0);
        arena.set_option(ArenaOption::RottenFleshLevel, 0);
        self.host.restore_doors(&arena_id)?;
        for entity in arena.drain_entities() {
            self.host.despawn(entity)?;
        }
        self.host.refresh_visibility(&arena_id)?;

        arena.set_timer(if villagers_survived {
            ENDING_COOLDOWN_SHORT
        } else {
            ENDING_COOLDOWN_LONG
        });
        if arena.state() != ArenaState::Ending {
            arena.transition_to(ArenaState::Ending)?;
        }

        tracing::info!(arena = %arena_id, ?conclusion, wave = final_wave, "game stopped");
        Ok(())
    }

    // -- Wave boundaries --------------------------------------------------

    /// Closes the current wave: reward, cooldown, wave increment, heals
    /// and orbs. At the wave limit this is a win and delegates to
    /// [`stop_game`](Self::stop_game) without incrementing anything.
    pub fn end_wave(&mut self, arena: &mut Arena, users: &mut UserRegistry) {
        if let Err(error) = self.try_end_wave(arena, users) {
            tracing::error!(arena = %arena.id(), error = %error, "wave end faulted");
        }
    }

    fn try_end_wave(
        &mut self,
        arena: &mut Arena,
        users: &mut UserRegistry,
    ) -> Result<(), GameError> {
        // Checked against the wave just fought, before any increment.
        if self.settings.wave_limit_reached(arena.wave()) {
            return self.try_stop(false, arena, users);
        }

        let arena_id = arena.id().clone();
        self.host.perform_reward(&arena_id, RewardEvent::WaveEnd)?;
        arena.set_timer(self.settings.next_wave_cooldown);
        arena.clear_zombie_checkpoints();
        let new_wave = arena.wave() + 1;
        arena.set_wave(new_wave);
        self.bus.publish(&GameEvent::WaveEnd {
            arena: arena_id.clone(),
            wave: new_wave,
        });

        let roster: Vec<PlayerId> = arena.players().iter().copied().collect();
        for player in &roster {
            self.host.notify(*player, Notice::NextWaveIn(arena.timer()))?;
            self.host.notify(*player, Notice::Refreshed)?;
            self.host.heal(*player)?;
            users
                .get_or_create(*player, self.kits.default_kit())
                .add_stat(Statistic::Orbs, (new_wave * 10) as i32);
        }

        if self.settings.respawn_after_wave {
            self.host.revive_fallen(&arena_id)?;
        }

        // Survival bonus goes to fighters only, not the bleachers.
        for player in &roster {
            if !users.is_spectator(*player) {
                self.host.give_experience(*player, WAVE_SURVIVAL_EXPERIENCE)?;
            }
        }

        tracing::debug!(arena = %arena_id, wave = new_wave, "wave ended");
        Ok(())
    }

    /// Opens the next wave: recomputes the spawn budget, revives and
    /// restocks the fighters, announces the wave.
    pub fn start_wave(&mut self, arena: &mut Arena, users: &mut UserRegistry) {
        if let Err(error) = self.try_start_wave(arena, users) {
            tracing::error!(arena = %arena.id(), error = %error, "wave start faulted");
        }
    }

    fn try_start_wave(
        &mut self,
        arena: &mut Arena,
        users: &mut UserRegistry,
    ) -> Result<(), GameError> {
        let arena_id = arena.id().clone();
        // Published before the spawn budget below is recomputed.
        self.bus.publish(&GameEvent::WaveStart {
            arena: arena_id.clone(),
            wave: arena.wave(),
        });

        let budget = zombie_spawn_budget(arena.player_count(), arena.option(ArenaOption::Wave));
        arena.set_option(ArenaOption::ZombiesToSpawn, budget);

        if self.settings.respawn_after_wave {
            self.host.revive_fallen(&arena_id)?;
        }

        let roster: Vec<PlayerId> = arena.players().iter().copied().collect();
        for player in roster {
            let kit = users
                .get_or_create(player, self.kits.default_kit())
                .kit()
                .clone();
            self.host.restock_kit(player, &kit)?;
        }

        self.host
            .broadcast(&arena_id, Notice::WaveStarted(arena.wave()))?;

        tracing::debug!(arena = %arena_id, wave = arena.wave(), budget, "wave started");
        Ok(())
    }

    // -- Celebrations -----------------------------------------------------

    fn schedule_celebration(&mut self, player: PlayerId) {
        let handle = spawn_celebration(Arc::clone(&self.host), player);
        if let Some(previous) = self.celebrations.insert(player, handle) {
            previous.abort();
        }
    }

    /// Aborts the player's celebration task, if one is running.
    pub fn cancel_celebration(&mut self, player: PlayerId) {
        if let Some(handle) = self.celebrations.remove(&player) {
            handle.abort();
            tracing::trace!(%player, "celebration cancelled");
        }
    }

    /// True while a celebration task is registered and still running.
    pub fn is_celebrating(&self, player: PlayerId) -> bool {
        self.celebrations
            .get(&player)
            .is_some_and(|handle| !handle.is_finished())
    }
}

/// How many zombies to spawn for the coming wave.
///
/// `wave_option ^ 2` is a bitwise xor, not a square.
fn zombie_spawn_budget(player_count: usize, wave_option: i32) -> i32 {
    ((player_count as f64 * 0.5) * f64::from(wave_option ^ 2) / 2.0).ceil() as i32
}
