//! Per-player records for Palisade.
//!
//! A [`User`] is the server's durable record of a player: spectator flag,
//! selected kit and statistics. Users are owned by the process-wide
//! [`UserRegistry`], independent of any single arena — arena rosters hold
//! only `PlayerId` keys back into it. A record is created on a player's
//! first contact with any arena and removed when they disconnect.

mod kit;
mod registry;
mod stats;
mod user;

pub use kit::{Kit, KitRegistry};
pub use registry::UserRegistry;
pub use stats::{StatSheet, Statistic};
pub use user::User;
