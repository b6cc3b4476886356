//! Hooks through which the presentation layer follows the game.
//!
//! Observers only ever get shared references, so they cannot touch core state.

use log::{debug, info, warn};

use crate::game::events::{GameEvent, Snapshot};

pub trait GameObserver {
    /// Called after every command application and after every enemy pass.
    fn on_state_changed(&mut self, _snapshot: &Snapshot) {}

    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

/// Writes every event to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl GameObserver for LogObserver {
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        debug!(
            "[Observer] turn={} level={} player={} hp={} coins={}",
            snapshot.turn, snapshot.level, snapshot.player.pos, snapshot.player.hp, snapshot.player.coins
        );
    }

    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BlockedMovement { .. } | GameEvent::NoTarget { .. } => warn!("[Observer] {}", event),
            _ => info!("[Observer] {}", event),
        }
    }
}

/// One notification, as seen by an observer.
#[derive(Debug, Clone, PartialEq)]
pub enum Observed {
    State(Snapshot),
    Event(GameEvent),
}

/// Keeps snapshots and events, in the order they happened, until drained.
#[derive(Debug, Default, Clone)]
pub struct EventBuffer {
    pub entries: Vec<Observed>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter().filter_map(|entry| match entry {
            Observed::State(snapshot) => Some(snapshot),
            Observed::Event(_) => None,
        })
    }

    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.entries.iter().filter_map(|entry| match entry {
            Observed::Event(event) => Some(event),
            Observed::State(_) => None,
        })
    }

    pub fn drain(&mut self) -> Vec<Observed> {
        std::mem::take(&mut self.entries)
    }
}

impl GameObserver for EventBuffer {
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        self.entries.push(Observed::State(snapshot.clone()));
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.entries.push(Observed::Event(event.clone()));
    }
}
