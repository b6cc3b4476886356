//! Error types for the dungeon core.
//!
//! Gameplay failures (walking into a wall, attacking thin air) are not errors:
//! they are reported as [`GameEvent`](crate::game::events::GameEvent)s and the turn
//! goes on. Only the conditions below propagate to the caller.

use thiserror::Error;

use crate::game::types::CommandKind;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    /// The placement sampler ran out of retries. The grid is too small or too
    /// crowded for the configured entity counts.
    #[error("no free cell for {entity} after {attempts} attempts")]
    GenerationExhausted { entity: &'static str, attempts: u32 },

    /// A grid query outside `[0, size)`.
    #[error("cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: i64, y: i64, size: usize },

    /// The command kind has not been unlocked yet.
    #[error("command `{0}` is locked")]
    CommandLocked(CommandKind),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Textual input (command, direction, purchase id) could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GameError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

pub type GameResult<T> = Result<T, GameError>;
