use serde::{Deserialize, Serialize};

use crate::game::error::{GameError, GameResult};
use crate::game::types::{Cell, Position};

/// Square matrix of floor/wall cells, stored row by row (`cells[y][x]`).
///
/// Queries outside the grid are rejected with [`GameError::OutOfBounds`];
/// callers that move things around clamp their coordinates first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// All-floor grid of `size` x `size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![Cell::Floor; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn is_in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.size as u64 && (y as u64) < self.size as u64
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn cell(&self, pos: Position) -> GameResult<Cell> {
        self.check(pos)?;
        Ok(self.cells[pos.y][pos.x])
    }

    pub fn is_wall(&self, pos: Position) -> GameResult<bool> {
        Ok(self.cell(pos)? == Cell::Wall)
    }

    pub fn set_wall(&mut self, pos: Position) -> GameResult<()> {
        self.check(pos)?;
        self.cells[pos.y][pos.x] = Cell::Wall;
        Ok(())
    }

    /// Cell one `(dx, dy)` step away from `pos`, if it is inside the grid.
    pub fn offset(&self, pos: Position, dx: i64, dy: i64) -> Option<Position> {
        let x = pos.x as i64 + dx;
        let y = pos.y as i64 + dy;
        self.is_in_bounds(x, y).then(|| Position::new(x as usize, y as usize))
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == Cell::Wall).count()
    }

    fn check(&self, pos: Position) -> GameResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                x: pos.x as i64,
                y: pos.y as i64,
                size: self.size,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_floor() {
        let grid = Grid::new(10);
        assert_eq!(grid.rows().len(), 10);
        assert!(grid.rows().iter().all(|row| row.len() == 10));
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn set_wall_marks_cell() {
        let mut grid = Grid::new(5);
        grid.set_wall(Position::new(3, 1)).unwrap();
        assert_eq!(grid.is_wall(Position::new(3, 1)), Ok(true));
        assert_eq!(grid.is_wall(Position::new(1, 3)), Ok(false));
        assert_eq!(grid.wall_count(), 1);
    }

    #[test]
    fn out_of_bounds_queries_are_rejected() {
        let mut grid = Grid::new(5);
        assert_eq!(
            grid.is_wall(Position::new(5, 0)),
            Err(GameError::OutOfBounds { x: 5, y: 0, size: 5 })
        );
        assert!(grid.set_wall(Position::new(0, 7)).is_err());
        assert!(!grid.is_in_bounds(-1, 0));
        assert!(grid.is_in_bounds(4, 4));
    }

    #[test]
    fn offset_stays_inside_grid() {
        let grid = Grid::new(10);
        assert_eq!(grid.offset(Position::new(4, 4), -1, 0), Some(Position::new(3, 4)));
        assert_eq!(grid.offset(Position::new(0, 4), -1, 0), None);
        assert_eq!(grid.offset(Position::new(9, 9), 0, 1), None);
    }
}
