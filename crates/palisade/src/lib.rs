//! # Palisade
//!
//! Server-side core for a cooperative wave-defense minigame: players
//! hold an arena against escalating zombie waves while the villagers
//! they protect cower indoors.
//!
//! The embedding game server implements one trait
//! ([`Host`](palisade_game::Host)) for world access and presentation,
//! registers its arenas, and drives everything from a single
//! [`GameLoop`] — joins, leaves, countdowns, wave boundaries and the
//! end-of-game bookkeeping all run on that one task.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use palisade::prelude::*;
//!
//! let controller = GameController::new(MyHost::new(), Settings::default());
//! let mut game = GameLoop::new(controller);
//! game.register_arena(my_arena);
//! game.run(Pulse::default()).await;
//! ```

mod error;
mod game_loop;

pub use error::PalisadeError;
pub use game_loop::GameLoop;

pub mod prelude {
    pub use palisade_arena::{Arena, ArenaOption, ArenaRegistry, ArenaState, Companion};
    pub use palisade_events::{EventBus, EventListener, GameEvent, Verdict};
    pub use palisade_game::{
        Conclusion, GameController, Host, HostError, JoinOutcome, JoinRefusal, Notice,
        RewardEvent, Settings, Summary, Waypoint,
    };
    pub use palisade_tick::{Pulse, PulseConfig};
    pub use palisade_types::{ArenaId, CompanionKind, EntityId, PlayerId, Position};
    pub use palisade_user::{Kit, KitRegistry, StatSheet, Statistic, User, UserRegistry};

    pub use crate::{GameLoop, PalisadeError};
}
