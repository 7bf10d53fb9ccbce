//! A complete scripted session, fast-forwarded: two defenders join the
//! "village" arena, fight to the wave limit and win. The host just logs
//! what it is asked to do, and a simple in-process script plays the
//! spawner and the combat.
//!
//! Run with `RUST_LOG=info cargo run -p headless-demo`.

use std::time::Duration;

use palisade::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Logging host
// ---------------------------------------------------------------------------

/// Narrates every request the core makes of it.
struct LoggingHost;

impl Host for LoggingHost {
    fn notify(&self, player: PlayerId, notice: Notice) -> Result<(), HostError> {
        tracing::info!(%player, ?notice, "notify");
        Ok(())
    }
    fn broadcast(&self, arena: &ArenaId, notice: Notice) -> Result<(), HostError> {
        tracing::info!(%arena, ?notice, "broadcast");
        Ok(())
    }
    fn send_summary(&self, player: PlayerId, summary: &Summary) -> Result<(), HostError> {
        tracing::info!(%player, ?summary, "summary");
        Ok(())
    }
    fn has_permission(&self, _player: PlayerId, _node: &str) -> bool {
        true
    }
    fn perform_reward(&self, arena: &ArenaId, event: RewardEvent) -> Result<(), HostError> {
        tracing::info!(%arena, ?event, "reward");
        Ok(())
    }
    fn save_inventory(&self, player: PlayerId) -> Result<(), HostError> {
        tracing::debug!(%player, "inventory saved");
        Ok(())
    }
    fn restore_inventory(&self, player: PlayerId) -> Result<(), HostError> {
        tracing::debug!(%player, "inventory restored");
        Ok(())
    }
    fn teleport(
        &self,
        player: PlayerId,
        arena: &ArenaId,
        waypoint: Waypoint,
    ) -> Result<(), HostError> {
        tracing::info!(%player, %arena, ?waypoint, "teleport");
        Ok(())
    }
    fn isolate_spectator(&self, _: PlayerId, _: &ArenaId) -> Result<(), HostError> {
        Ok(())
    }
    fn refresh_visibility(&self, _: &ArenaId) -> Result<(), HostError> {
        Ok(())
    }
    fn show_to_everyone(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn reset_vitals(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn set_max_health(&self, _: PlayerId, _: f64) -> Result<(), HostError> {
        Ok(())
    }
    fn heal(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn clear_effects(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn extinguish(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn grant_night_vision(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn set_flight(&self, _: PlayerId, _: bool) -> Result<(), HostError> {
        Ok(())
    }
    fn set_survival_mode(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn give_experience(&self, player: PlayerId, amount: u32) -> Result<(), HostError> {
        tracing::info!(%player, amount, "experience");
        Ok(())
    }
    fn reset_experience(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn clear_inventory(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn clear_armor(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn give_spectator_gear(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn give_kit_menu(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn give_leave_item(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn restock_kit(&self, player: PlayerId, kit: &Kit) -> Result<(), HostError> {
        tracing::info!(%player, kit = kit.id(), "restock");
        Ok(())
    }
    fn clear_scoreboard(&self, _: PlayerId) -> Result<(), HostError> {
        Ok(())
    }
    fn despawn(&self, entity: EntityId) -> Result<(), HostError> {
        tracing::debug!(%entity, "despawn");
        Ok(())
    }
    fn restore_doors(&self, arena: &ArenaId) -> Result<(), HostError> {
        tracing::info!(%arena, "doors restored");
        Ok(())
    }
    fn spawn_firework(&self, player: PlayerId) -> Result<(), HostError> {
        tracing::info!(%player, "firework!");
        Ok(())
    }
    fn revive_fallen(&self, arena: &ArenaId) -> Result<(), HostError> {
        tracing::debug!(%arena, "fallen revived");
        Ok(())
    }
}

/// Logs every lifecycle event that crosses the bus.
struct EventLogger;

impl EventListener for EventLogger {
    fn on_event(&self, event: &GameEvent) {
        tracing::info!(?event, "lifecycle event");
    }
}

// ---------------------------------------------------------------------------
// Scripted session
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings {
        starting_countdown: 5,
        next_wave_cooldown: 3,
        wave_limit: Some(3),
        ..Settings::default()
    };
    let mut controller = GameController::new(LoggingHost, settings);
    controller.subscribe(Box::new(EventLogger));

    let mut game = GameLoop::new(controller);
    let village = ArenaId::new("village");
    let mut arena = Arena::new(village.clone(), 2, 8);
    arena.set_ready(true);
    // The villagers the defenders are here to protect.
    for i in 0..4 {
        arena.add_villager(EntityId(9000 + i));
    }
    game.register_arena(arena);

    game.join(PlayerId(1), &village);
    game.join(PlayerId(2), &village);

    // Fast-forward: one "second" every 50 ms, with a scripted spawner
    // and combat standing in for the real world.
    let mut pulse = Pulse::new(PulseConfig {
        period: Duration::from_millis(50),
        initial_jitter: Duration::ZERO,
    });
    let mut next_zombie = 0u64;
    let mut played = false;

    loop {
        pulse.wait().await;
        game.tick();

        let arena = game.arenas_mut().get_mut(&village).unwrap();
        match arena.state() {
            ArenaState::InGame => {
                played = true;
                let budget = arena.option(ArenaOption::ZombiesToSpawn);
                if budget > 0 && arena.zombies().is_empty() {
                    // The spawner answers the wave-start announcement.
                    for _ in 0..budget {
                        arena.add_zombie(EntityId(next_zombie));
                        next_zombie += 1;
                    }
                    arena.set_option(ArenaOption::ZombiesToSpawn, 0);
                    tracing::info!(wave = arena.wave(), budget, "horde spawned");
                } else if let Some(&zombie) = arena.zombies().first() {
                    // The defenders cut the horde down, one per second.
                    arena.remove_zombie(zombie);
                    arena.add_option(ArenaOption::TotalKilledZombies, 1);
                }
            }
            ArenaState::WaitingForPlayers if played => break,
            _ => {}
        }
    }

    for player in [PlayerId(1), PlayerId(2)] {
        if let Some(user) = game.users().get(player) {
            tracing::info!(
                %player,
                best_wave = user.stat(Statistic::HighestWave),
                orbs = user.stat(Statistic::Orbs),
                "final stats"
            );
        }
    }
}
