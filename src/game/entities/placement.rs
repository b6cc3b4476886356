//! Random entity placement.
//!
//! Rejection sampling: draw uniform cells until one is free, with a hard cap
//! on the number of draws.

use log::warn;
use rand::Rng;

use crate::game::error::{GameError, GameResult};
use crate::game::grid::Grid;
use crate::game::entities::EntityRegistry;
use crate::game::types::{EntityId, EntityKind, Position};

/// A cell is free when it is not the player's cell, not a wall and not taken by another entity.
pub fn is_free_cell(grid: &Grid, registry: &EntityRegistry, player: Position, pos: Position) -> bool {
    pos != player && matches!(grid.is_wall(pos), Ok(false)) && !registry.is_occupied(pos)
}

/// Place `kind` on a random free cell and register it.
/// Fails with `GenerationExhausted` after `max_attempts` draws.
pub fn place_entity<R: Rng>(
    grid: &Grid,
    registry: &mut EntityRegistry,
    player: Position,
    kind: EntityKind,
    max_attempts: u32,
    rng: &mut R,
) -> GameResult<EntityId> {
    let size = grid.size();
    if size > 0 {
        for _ in 0..max_attempts {
            let pos = Position::new(rng.random_range(0..size), rng.random_range(0..size));
            if is_free_cell(grid, registry, player, pos) {
                return Ok(registry.insert(pos, kind));
            }
        }
    }

    warn!("[Placement] No free tile to place {} after {} attempts", kind.label(), max_attempts);
    Err(GameError::GenerationExhausted {
        entity: kind.label(),
        attempts: max_attempts,
    })
}
