//! Unified error type for the Palisade workspace.

use palisade_arena::ArenaError;
use palisade_game::{GameError, HostError};

/// Top-level error that wraps all crate-specific errors.
///
/// When embedding the `palisade` meta-crate, this is the single error
/// type to deal with. `#[from]` gives the `?` operator automatic
/// conversions from every sub-crate error.
#[derive(Debug, thiserror::Error)]
pub enum PalisadeError {
    /// An arena registry or state-machine error.
    #[error(transparent)]
    Arena(#[from] ArenaError),

    /// A session-control error.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A host runtime error.
    #[error(transparent)]
    Host(#[from] HostError),
}
