//! Level progression and game-over transitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionState {
    Active,
    /// Momentary: set while a defeat is resolved, cleared by [`Progression::reset`].
    Defeated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    level: u32,
    state: ProgressionState,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::at_level(1)
    }

    pub fn at_level(level: u32) -> Self {
        Self {
            level: level.max(1),
            state: ProgressionState::Active,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn state(&self) -> ProgressionState {
        self.state
    }

    /// Exit reached. Returns the new level.
    pub fn advance_level(&mut self) -> u32 {
        self.level += 1;
        self.level
    }

    /// Returns `true` only for the transition out of `Active`, so several lethal
    /// hits in one pass trigger a single defeat.
    pub fn mark_defeated(&mut self) -> bool {
        if self.state == ProgressionState::Defeated {
            return false;
        }
        self.state = ProgressionState::Defeated;
        true
    }

    /// Back to level 1 after a defeat.
    pub fn reset(&mut self) {
        self.level = 1;
        self.state = ProgressionState::Active;
    }
}
