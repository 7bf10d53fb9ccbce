//! The end-of-game firework celebration.
//!
//! The one piece of detached work in the whole core. Each celebrating
//! player gets their own task: four firework bursts at a fixed cadence,
//! then done. The controller keeps the handle and aborts it if the
//! player leaves mid-celebration, so no scheduled work ever outlives its
//! target.

use std::sync::Arc;
use std::time::Duration;

use palisade_types::PlayerId;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::Host;

/// How many bursts a celebration fires.
pub(crate) const CELEBRATION_BURSTS: u32 = 4;

/// Delay before the first burst and between consecutive bursts.
pub(crate) const CELEBRATION_INTERVAL: Duration = Duration::from_millis(1500);

/// Spawns the celebration task for one player.
pub(crate) fn spawn_celebration<H: Host>(host: Arc<H>, player: PlayerId) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut cadence = time::interval_at(
            Instant::now() + CELEBRATION_INTERVAL,
            CELEBRATION_INTERVAL,
        );
        for burst in 0..CELEBRATION_BURSTS {
            cadence.tick().await;
            if let Err(e) = host.spawn_firework(player) {
                tracing::debug!(%player, burst, error = %e, "firework burst failed");
            }
        }
        tracing::trace!(%player, "celebration finished");
    })
}
