//! Error types for the engine core.
//!
//! Three families exist:
//! - [`ConfigError`] – settings that are missing or malformed. Fatal for the
//!   entity kind being set up.
//! - [`SchedulerError`] – misuse of the tick scheduler by the host.
//! - [`GameError`] – everything the [`Game`](crate::game::Game) facade can
//!   surface, wrapping the two above.
//!
//! Degenerate numeric parameters (zero or negative durations and intervals)
//! are not errors; the state machines absorb them.

use crate::entities::EntityId;
use crate::systems::scheduler::ListenerId;

/// Settings could not be loaded or a required key is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(String),

    #[error("settings section [{0}] not found")]
    MissingSection(String),

    #[error("settings key {section}.{key} not found")]
    MissingKey { section: String, key: String },

    #[error("settings key {section}.{key} is not a number: {value:?}")]
    NotNumeric {
        section: String,
        key: String,
        value: String,
    },
}

/// The host used the scheduler in a way that indicates an integration bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("tick listener already registered as {0}")]
    AlreadyRegistered(ListenerId),

    #[error("tick listener {0} is not registered")]
    NotRegistered(ListenerId),
}

/// Errors surfaced by the game facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("static data for kind {kind:?} holds a different type")]
    StaticDataType { kind: &'static str },

    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    #[error("entity {0} is already on the field")]
    DuplicateEntity(EntityId),
}

pub type GameResult<T> = Result<T, GameError>;
