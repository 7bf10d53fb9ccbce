//! Lifecycle event bus for Palisade.
//!
//! The session controller announces what is happening — joins, leaves,
//! game stops, wave boundaries — and external subscribers (statistics,
//! achievements, third-party integrations) react. All notifications are
//! fire-and-forget except the join attempt: subscribers may veto a join
//! before the player is admitted, and only that one.

use palisade_types::{ArenaId, PlayerId};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A lifecycle notification published by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A player is about to be admitted to an arena. Published through
    /// [`EventBus::request_join`], the only cancellable notification.
    JoinAttempt { player: PlayerId, arena: ArenaId },

    /// A player is leaving an arena. Audit/telemetry only — the leave
    /// always proceeds.
    LeaveAttempt { player: PlayerId, arena: ArenaId },

    /// The game in an arena is stopping.
    GameStop { arena: ArenaId },

    /// A wave is starting. Carries the wave being fought.
    WaveStart { arena: ArenaId, wave: u32 },

    /// A wave ended. Carries the upcoming wave number.
    WaveEnd { arena: ArenaId, wave: u32 },
}

/// A subscriber's answer to the one cancellable notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    #[default]
    Allow,
    Cancel,
}

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

/// An external subscriber to lifecycle events.
///
/// Implementations must not mutate arena state — they observe it (and,
/// for join attempts, get one chance to veto).
pub trait EventListener: Send + Sync {
    /// Called for every published event. Default: ignore.
    fn on_event(&self, _event: &GameEvent) {}

    /// Called before a player is admitted. Returning [`Verdict::Cancel`]
    /// aborts the join. Default: allow.
    fn on_join_attempt(&self, _player: PlayerId, _arena: &ArenaId) -> Verdict {
        Verdict::Allow
    }
}

// ---------------------------------------------------------------------------
// Bus
// ---------------------------------------------------------------------------

/// Fans events out to the registered listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn EventListener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Publishes a fire-and-forget notification to every listener.
    pub fn publish(&self, event: &GameEvent) {
        tracing::trace!(?event, listeners = self.listeners.len(), "event published");
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }

    /// Announces a join attempt and collects the verdict: every listener
    /// sees the attempt, and a single [`Verdict::Cancel`] vetoes it.
    pub fn request_join(&self, player: PlayerId, arena: &ArenaId) -> Verdict {
        let event = GameEvent::JoinAttempt {
            player,
            arena: arena.clone(),
        };
        let mut verdict = Verdict::Allow;
        for listener in &self.listeners {
            listener.on_event(&event);
            if listener.on_join_attempt(player, arena) == Verdict::Cancel {
                verdict = Verdict::Cancel;
            }
        }
        if verdict == Verdict::Cancel {
            tracing::debug!(%player, %arena, "join vetoed by a listener");
        }
        verdict
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Records every event it sees; cancels joins when told to.
    struct Recorder {
        events: Mutex<Vec<GameEvent>>,
        cancel_joins: bool,
    }

    impl Recorder {
        fn new(cancel_joins: bool) -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                cancel_joins,
            }
        }
    }

    impl EventListener for Recorder {
        fn on_event(&self, event: &GameEvent) {
            self.events.lock().unwrap().push(event.clone());
        }

        fn on_join_attempt(&self, _player: PlayerId, _arena: &ArenaId) -> Verdict {
            if self.cancel_joins {
                Verdict::Cancel
            } else {
                Verdict::Allow
            }
        }
    }

    fn aid() -> ArenaId {
        ArenaId::new("village")
    }

    #[test]
    fn test_publish_reaches_every_listener() {
        static SEEN: AtomicUsize = AtomicUsize::new(0);
        struct Counter;
        impl EventListener for Counter {
            fn on_event(&self, _event: &GameEvent) {
                SEEN.fetch_add(1, Ordering::Relaxed);
            }
        }

        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Counter));
        bus.subscribe(Box::new(Counter));

        bus.publish(&GameEvent::GameStop { arena: aid() });

        assert_eq!(SEEN.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_request_join_allows_by_default() {
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Recorder::new(false)));

        assert_eq!(bus.request_join(PlayerId(1), &aid()), Verdict::Allow);
    }

    #[test]
    fn test_request_join_with_no_listeners_allows() {
        let bus = EventBus::new();
        assert_eq!(bus.request_join(PlayerId(1), &aid()), Verdict::Allow);
    }

    #[test]
    fn test_request_join_single_cancel_vetoes() {
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Recorder::new(false)));
        bus.subscribe(Box::new(Recorder::new(true)));
        bus.subscribe(Box::new(Recorder::new(false)));

        assert_eq!(bus.request_join(PlayerId(1), &aid()), Verdict::Cancel);
    }

    #[test]
    fn test_request_join_still_notifies_all_listeners() {
        use std::sync::Arc;

        struct Tap(Arc<Mutex<Vec<GameEvent>>>);
        impl EventListener for Tap {
            fn on_event(&self, event: &GameEvent) {
                self.0.lock().unwrap().push(event.clone());
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Recorder::new(true)));
        bus.subscribe(Box::new(Tap(Arc::clone(&seen))));

        assert_eq!(bus.request_join(PlayerId(7), &aid()), Verdict::Cancel);

        // The veto does not short-circuit delivery to later listeners.
        let seen = seen.lock().unwrap();
        assert!(matches!(
            seen.as_slice(),
            [GameEvent::JoinAttempt { player: PlayerId(7), .. }]
        ));
    }

    #[test]
    fn test_wave_events_carry_wave_number() {
        let event = GameEvent::WaveEnd {
            arena: aid(),
            wave: 5,
        };
        match event {
            GameEvent::WaveEnd { wave, .. } => assert_eq!(wave, 5),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
