//! Fixed-rate pulse scheduler for Palisade.
//!
//! Arena timers are plain second counters, so the game loop needs one
//! thing: a steady beat. [`Pulse`] provides it — a 1 Hz default cadence
//! with randomized start jitter (arenas created in the same instant must
//! not all tick in the same instant) and pause/resume support.
//!
//! A pulse that falls behind skips the missed beats and resumes from
//! now; arena countdowns lose a second of wall-clock accuracy instead of
//! firing a burst of catch-up ticks.
//!
//! # Integration
//!
//! ```ignore
//! let mut pulse = Pulse::default();
//! loop {
//!     tokio::select! {
//!         Some(cmd) = commands.recv() => { /* handle commands */ }
//!         beat = pulse.wait() => game_loop.tick(),
//!     }
//! }
//! ```

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

/// Configuration for a [`Pulse`].
#[derive(Debug, Clone)]
pub struct PulseConfig {
    /// Time between beats. Arena timers assume one second.
    pub period: Duration,
    /// Maximum random delay added before the first beat.
    pub initial_jitter: Duration,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            initial_jitter: Duration::from_millis(250),
        }
    }
}

impl PulseConfig {
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }
}

/// A fixed-rate beat for one game loop.
pub struct Pulse {
    config: PulseConfig,
    /// When the next beat fires. `None` until the first `wait`.
    next: Option<Instant>,
    count: u64,
    skipped: u64,
    paused: bool,
}

impl Pulse {
    pub fn new(config: PulseConfig) -> Self {
        debug!(period_ms = config.period.as_millis() as u64, "pulse created");
        Self {
            config,
            next: None,
            count: 0,
            skipped: 0,
            paused: false,
        }
    }

    /// Waits until the next beat is due and returns its number
    /// (starting at 1). While paused this pends forever — a
    /// `tokio::select!` around it keeps serving its other branches.
    pub async fn wait(&mut self) -> u64 {
        if self.paused {
            std::future::pending::<()>().await;
            unreachable!()
        }

        let next = match self.next {
            Some(next) => next,
            // First beat: apply start jitter to desynchronize loops
            // created at the same moment.
            None => {
                let jitter_us = self.config.initial_jitter.as_micros() as u64;
                let jitter = if jitter_us > 0 {
                    Duration::from_micros(rand::rng().random_range(0..jitter_us))
                } else {
                    Duration::ZERO
                };
                Instant::now() + self.config.period + jitter
            }
        };

        time::sleep_until(next).await;
        self.count += 1;

        // Late by more than a full period: skip the missed beats.
        let now = Instant::now();
        let late_by = now.saturating_duration_since(next);
        if late_by >= self.config.period {
            let missed = (late_by.as_nanos() / self.config.period.as_nanos()) as u64;
            self.skipped += missed;
            warn!(beat = self.count, missed, "pulse fell behind, skipping ahead");
            self.next = Some(now + self.config.period);
        } else {
            self.next = Some(next + self.config.period);
        }

        trace!(beat = self.count, "pulse");
        self.count
    }

    /// Stops the beat; `wait` pends until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(beat = self.count, "pulse paused");
        }
    }

    /// Restarts the beat one full period from now, so time spent paused
    /// never turns into a catch-up burst.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.next = Some(Instant::now() + self.config.period);
            debug!(beat = self.count, "pulse resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Beats delivered so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Beats dropped because the loop fell behind.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn period(&self) -> Duration {
        self.config.period
    }
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new(PulseConfig::default())
    }
}
