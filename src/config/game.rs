/// Game configuration constants.
///
/// This module defines the main gameplay parameters such as grid dimensions,
/// population counts, combat values and item effects.
use serde::{Deserialize, Serialize};

use crate::game::error::{GameError, GameResult};

/// Width and height of the square dungeon grid.
pub const GRID_SIZE: usize = 10;

/// Number of random wall draws per level (duplicates allowed).
pub const WALL_ATTEMPTS: usize = 15;

/// Enemies placed per level.
pub const ENEMY_COUNT: usize = 3;

/// Items placed per level.
pub const ITEM_COUNT: usize = 5;

/// Probability that a generated item is a coin (otherwise a potion).
pub const COIN_PROBABILITY: f64 = 0.7;

pub const ENEMY_HP: u32 = 20;
pub const ENEMY_POWER: u32 = 10;

/// Player hit points are clamped to this value.
pub const PLAYER_MAX_HP: u32 = 100;

/// Damage dealt by one player attack.
pub const PLAYER_ATTACK_POWER: u32 = 10;

/// Currency credited when an enemy is killed.
pub const ENEMY_KILL_REWARD: u32 = 5;

pub const COIN_VALUE: u32 = 10;
pub const POTION_HEAL: u32 = 20;

/// Chance that an enemy tries a horizontal step rather than a vertical one.
pub const HORIZONTAL_STEP_PROBABILITY: f64 = 0.5;

/// Retry budget of the placement sampler before generation gives up.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Tunable gameplay parameters. `Default` matches the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: usize,
    pub wall_attempts: usize,
    pub enemy_count: usize,
    pub item_count: usize,
    pub coin_probability: f64,
    pub enemy_hp: u32,
    pub enemy_power: u32,
    pub player_max_hp: u32,
    pub player_attack_power: u32,
    pub enemy_kill_reward: u32,
    pub coin_value: u32,
    pub potion_heal: u32,
    pub horizontal_step_probability: f64,
    pub max_placement_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            wall_attempts: WALL_ATTEMPTS,
            enemy_count: ENEMY_COUNT,
            item_count: ITEM_COUNT,
            coin_probability: COIN_PROBABILITY,
            enemy_hp: ENEMY_HP,
            enemy_power: ENEMY_POWER,
            player_max_hp: PLAYER_MAX_HP,
            player_attack_power: PLAYER_ATTACK_POWER,
            enemy_kill_reward: ENEMY_KILL_REWARD,
            coin_value: COIN_VALUE,
            potion_heal: POTION_HEAL,
            horizontal_step_probability: HORIZONTAL_STEP_PROBABILITY,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Rejects configurations the generator cannot work with at all.
    /// Overcrowded grids are still accepted; they surface as `GenerationExhausted`.
    pub fn validate(&self) -> GameResult<()> {
        if self.grid_size == 0 {
            return Err(GameError::InvalidConfig("grid_size must be at least 1".to_string()));
        }
        for (name, p) in [
            ("coin_probability", self.coin_probability),
            ("horizontal_step_probability", self.horizontal_step_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::InvalidConfig(format!("{name} must be within [0, 1], got {p}")));
            }
        }
        Ok(())
    }
}
