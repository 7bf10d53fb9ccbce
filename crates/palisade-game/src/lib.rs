//! Game session control for Palisade.
//!
//! The [`GameController`] orchestrates everything that happens to an
//! arena: player admission and departure, wave boundaries, and the
//! end-of-game bookkeeping. It validates against the arena state
//! machine, mutates arenas and user records, publishes lifecycle events,
//! and delegates all presentation (messages, inventories, effects,
//! teleports) to the [`Host`] trait — the one seam the embedding game
//! server implements.
//!
//! Every public controller operation is an outermost fault boundary:
//! host failures are logged and reported to the triggering player as a
//! generic notice, never propagated to the game loop. One failed join
//! must not stop the shared arena for everyone else.

mod celebration;
mod controller;
mod error;
mod host;
mod messages;
mod settings;

pub use controller::{GameController, JoinOutcome, JoinRefusal};
pub use error::GameError;
pub use host::{Host, HostError, RewardEvent, Waypoint};
pub use messages::{Conclusion, Notice, Summary};
pub use settings::Settings;
