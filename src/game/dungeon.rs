//! Dungeon generation.
//!
//! A level is an N x N grid sprinkled with random walls, then populated with
//! enemies, items and a single exit through the placement sampler.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game::entities::{EntityRegistry, place_entity};
use crate::game::error::GameResult;
use crate::game::grid::Grid;
use crate::game::types::{Enemy, EntityKind, ItemKind, Position};

/// Grid and entities of one level. Replaced wholesale on regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub level: u32,
    pub grid: Grid,
    pub entities: EntityRegistry,
}

impl Dungeon {
    /// Empty, wall-free level. Mostly useful to build fixed layouts.
    pub fn empty(level: u32, size: usize) -> Self {
        Self {
            level,
            grid: Grid::new(size),
            entities: EntityRegistry::new(),
        }
    }
}

/// Generate level `level`. The player is assumed to stand on the spawn cell.
pub fn generate_dungeon<R: Rng>(level: u32, config: &GameConfig, rng: &mut R) -> GameResult<Dungeon> {
    let size = config.grid_size;
    let mut dungeon = Dungeon::empty(level, size);

    for _ in 0..config.wall_attempts {
        let pos = Position::new(rng.random_range(0..size), rng.random_range(0..size));
        if pos != Position::SPAWN {
            dungeon.grid.set_wall(pos)?;
        }
    }

    let enemy = EntityKind::Enemy(Enemy {
        hp: config.enemy_hp,
        power: config.enemy_power,
    });
    for _ in 0..config.enemy_count {
        place(&mut dungeon, enemy, config, rng)?;
    }

    for _ in 0..config.item_count {
        let item = if rng.random_bool(config.coin_probability) {
            ItemKind::Coin
        } else {
            ItemKind::Potion
        };
        place(&mut dungeon, EntityKind::Item { item }, config, rng)?;
    }

    place(&mut dungeon, EntityKind::Exit, config, rng)?;

    debug!(
        "[Dungeon] Generated level {}: {} walls, {} entities",
        level,
        dungeon.grid.wall_count(),
        dungeon.entities.len()
    );
    Ok(dungeon)
}

fn place<R: Rng>(dungeon: &mut Dungeon, kind: EntityKind, config: &GameConfig, rng: &mut R) -> GameResult<()> {
    place_entity(
        &dungeon.grid,
        &mut dungeon.entities,
        Position::SPAWN,
        kind,
        config.max_placement_attempts,
        rng,
    )
    .map(|_| ())
}
