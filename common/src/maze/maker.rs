pub mod algorithms;

use strum::IntoEnumIterator;

use super::cell::{self, Side, WALLED};
use crate::{movement::Direction, seed::MazeRng};
use algorithms::backtrack::Backtrack;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

pub struct MazeMaker {
    pub grid: Vec<Vec<u8>>,
    visited: Vec<Vec<bool>>,
    rng: MazeRng,
    size: usize,
}

impl MazeMaker {
    pub fn new(size: usize, rng: MazeRng) -> Self {
        let grid = vec![vec![WALLED; size]; size];
        let visited = vec![vec![false; size]; size];
        let mut maze = MazeMaker {
            grid,
            visited,
            rng,
            size,
        };
        maze.backtrack();
        maze
    }

    // Order matters: the seeded stream picks by index into this list.
    fn get_unvisited_neighbors(&self, cell: Cell) -> Vec<(Direction, Cell)> {
        Direction::iter()
            .filter_map(|direction| {
                let (x, y) = direction.step(cell.x, cell.y, self.size)?;
                let neighbor = Cell { x, y };
                (!self.is_visited(neighbor)).then_some((direction, neighbor))
            })
            .collect()
    }

    fn pick_neighbor(&mut self, cell: Cell) -> Option<(Direction, Cell)> {
        let neighbors = self.get_unvisited_neighbors(cell);
        if neighbors.is_empty() {
            return None;
        }

        let i = self.rng.pick_index(neighbors.len());
        Some(neighbors[i])
    }

    fn visit_cell(&mut self, cell: Cell) {
        self.visited[cell.y][cell.x] = true;
    }

    fn is_visited(&self, cell: Cell) -> bool {
        self.visited[cell.y][cell.x]
    }

    /// Clears the wall between two adjacent cells. The bit lives on whichever
    /// of the pair is above or to the left.
    fn remove_wall_between(&mut self, current: Cell, direction: Direction, neighbor: Cell) {
        let (owner, side) = match direction {
            Direction::Up => (neighbor, Side::Bottom),
            Direction::Right => (current, Side::Right),
            Direction::Down => (current, Side::Bottom),
            Direction::Left => (neighbor, Side::Right),
        };

        let value = &mut self.grid[owner.y][owner.x];
        *value = cell::toggle_wall(*value, side);
    }
}
