pub mod cell;
pub mod maker;

use std::fmt;

use thiserror::Error;

use crate::seed::{MazeRng, Seed};
use cell::{BOTTOM, RIGHT, Side};
use maker::MazeMaker;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze size must be at least 1")]
    ZeroSize,
    #[error("maze grid must be square, row {row} has {len} cells instead of {size}")]
    NotSquare { row: usize, len: usize, size: usize },
}

/// Wall grid indexed `grid[y][x]`. Every value is a pair of wall bits, see
/// [`cell`].
#[derive(Clone, PartialEq, Eq)]
pub struct Maze {
    size: usize,
    grid: Vec<Vec<u8>>,
}

impl Maze {
    pub fn new(size: usize, seed: &Seed) -> Result<Self, MazeError> {
        Self::with_rng(size, seed.rng())
    }

    pub fn with_rng(size: usize, rng: MazeRng) -> Result<Self, MazeError> {
        if size == 0 {
            return Err(MazeError::ZeroSize);
        }

        let maker = MazeMaker::new(size, rng);
        Ok(Self {
            size,
            grid: maker.grid,
        })
    }

    pub fn from_grid(grid: Vec<Vec<u8>>) -> Result<Self, MazeError> {
        let size = grid.len();
        if size == 0 {
            return Err(MazeError::ZeroSize);
        }

        if let Some((row, cells)) = grid.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(MazeError::NotSquare {
                row,
                len: cells.len(),
                size,
            });
        }

        Ok(Self { size, grid })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn grid(&self) -> &[Vec<u8>] {
        &self.grid
    }

    pub fn has_wall(&self, x: usize, y: usize, side: Side) -> bool {
        cell::has_wall(self.grid[y][x], side)
    }

    /// Number of internal walls that have been carved away. Border bits on
    /// the last row and column are not internal and never count.
    pub fn open_walls(&self) -> usize {
        let last = self.size - 1;
        let mut standing = 0;

        for (y, row) in self.grid.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if y < last && value & BOTTOM != 0 {
                    standing += 1;
                }
                if x < last && value & RIGHT != 0 {
                    standing += 1;
                }
            }
        }

        2 * self.size * last - standing
    }

    pub fn log(&self) -> String {
        let mut lines = Vec::with_capacity(2 * self.size + 1);
        lines.push(format!("+{}", "--+".repeat(self.size)));

        for row in &self.grid {
            let mut cells = String::from("|");
            let mut floor = String::from("+");

            for &value in row {
                cells.push_str(if value & RIGHT != 0 { "  |" } else { "   " });
                floor.push_str(if value & BOTTOM != 0 { "--+" } else { "  +" });
            }

            lines.push(cells);
            lines.push(floor);
        }

        lines.join("\n")
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}
