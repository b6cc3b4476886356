//! Player movement system.
//!
//! This module handles moving the player on the grid and detecting exit contact.
//! Regeneration itself is left to the session.

use crate::game::dungeon::Dungeon;
use crate::game::error::GameResult;
use crate::game::events::GameEvent;
use crate::game::grid::Grid;
use crate::game::types::{Direction, Player, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Position),
    /// The target cell is a wall.
    Blocked,
    /// The player stepped onto the exit; the level must be regenerated.
    LevelAdvanced,
}

/// Cell one step from `from` in `direction`, clamped to the grid edges.
/// Shared by movement, attack and pickup.
pub fn target_cell(grid: &Grid, from: Position, direction: Direction) -> Position {
    let mut target = from;
    let last = grid.size().saturating_sub(1);

    match direction {
        Direction::Up => {
            if target.y > 0 { target.y -= 1; }
        }
        Direction::Down => {
            if target.y < last { target.y += 1; }
        }
        Direction::Left => {
            if target.x > 0 { target.x -= 1; }
        }
        Direction::Right => {
            if target.x < last { target.x += 1; }
        }
    }

    target
}

/// Move the player one step in the given direction.
pub fn move_player(
    player: &mut Player,
    dungeon: &Dungeon,
    direction: Direction,
    events: &mut Vec<GameEvent>,
) -> GameResult<MoveOutcome> {
    let from = player.pos;
    let target = target_cell(&dungeon.grid, from, direction);

    if dungeon.grid.is_wall(target)? {
        events.push(GameEvent::BlockedMovement { from, target });
        return Ok(MoveOutcome::Blocked);
    }

    player.pos = target;
    if target != from {
        events.push(GameEvent::PlayerMoved { from, to: target });
    }

    // Items and enemies on the cell have no passive effect.
    if dungeon.entities.exit_at(target).is_some() {
        return Ok(MoveOutcome::LevelAdvanced);
    }
    Ok(MoveOutcome::Moved(target))
}
