//! Arena lifecycle management for Palisade.
//!
//! An arena is one instance of the game: its lifecycle state, timers,
//! wave counter, player roster, tunable options and the entities it has
//! spawned. All mutation funnels through the session controller on a
//! single game-loop task, so nothing here needs interior locking.
//!
//! # Key types
//!
//! - [`Arena`] — one arena's state, roster and owned entities
//! - [`ArenaState`] — lifecycle state machine
//! - [`ArenaOption`] / [`Options`] — the per-arena integer option table
//! - [`ArenaRegistry`] — creates/looks up arenas, tracks player membership
//! - [`ArenaError`] — what can go wrong at this layer

mod arena;
mod error;
mod options;
mod registry;
mod state;

pub use arena::{Arena, Companion};
pub use error::ArenaError;
pub use options::{ArenaOption, Options};
pub use registry::ArenaRegistry;
pub use state::ArenaState;
