//! The dungeon simulation core.
//!
//! Everything here is synchronous and single-threaded: a [`GameSession`] is
//! owned by exactly one caller, which drives it one turn at a time.

pub mod types;
pub mod error;
pub mod grid;
pub mod entities;
pub mod dungeon;
pub mod systems;
pub mod progression;
pub mod events;
pub mod observer;
pub mod session;

pub use error::{GameError, GameResult};
pub use events::{GameEvent, Snapshot};
pub use observer::{EventBuffer, GameObserver, LogObserver, NoopObserver, Observed};
pub use session::{GameSession, RunOutcome, TurnReport};
