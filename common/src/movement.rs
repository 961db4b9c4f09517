use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::maze::{Maze, cell::Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Applies the unit offset, or `None` if that leaves a `size`-wide grid.
    pub fn step(self, x: usize, y: usize, size: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < size && ny < size).then_some((nx, ny))
    }
}

/// Position reached by moving from `(x, y)`, or `None` if the move is illegal.
///
/// Up and left cross a wall owned by the destination; down and right cross a
/// wall owned by the current cell.
pub fn try_move(maze: &Maze, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
    let (nx, ny) = direction.step(x, y, maze.size())?;

    let blocked = match direction {
        Direction::Up => maze.has_wall(nx, ny, Side::Bottom),
        Direction::Left => maze.has_wall(nx, ny, Side::Right),
        Direction::Down => maze.has_wall(x, y, Side::Bottom),
        Direction::Right => maze.has_wall(x, y, Side::Right),
    };

    (!blocked).then_some((nx, ny))
}

pub fn is_single_step(maze: &Maze, from: (usize, usize), to: (usize, usize)) -> bool {
    from.0 < maze.size()
        && from.1 < maze.size()
        && Direction::iter().any(|direction| try_move(maze, from.0, from.1, direction) == Some(to))
}

/// The goal is the bottom-right corner.
pub fn is_winning_position(size: usize, x: usize, y: usize) -> bool {
    size > 0 && x == y && x == size - 1
}
