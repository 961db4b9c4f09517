use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    constants::MAX_PLAYERS,
    maze::Maze,
    movement,
    player::{Color, Player},
    seed::Seed,
};

/// The shared board document. `seed == None` means nobody has picked one yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub seed: Option<Seed>,
    pub size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: u64,
    pub name: Option<String>,
    pub color: Color,
    pub x: usize,
    pub y: usize,
}

impl PlayerRecord {
    pub fn to_player(&self) -> Player {
        Player {
            name: self.name.clone(),
            color: self.color,
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedProposal {
    /// Write the seed only if the board has none.
    InitIfUnset(Seed),
    /// Overwrite whatever is there, starting a new round.
    Reset(Seed),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Committed,
    Unchanged,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be at least 1")]
    ZeroSize,
    #[error("board is full ({0} players)")]
    Full(usize),
    #[error("player {0} has not joined")]
    UnknownPlayer(u64),
    #[error("player {id} cannot move from {from:?} to {to:?}")]
    IllegalMove {
        id: u64,
        from: (usize, usize),
        to: (usize, usize),
    },
}

pub struct Board {
    config: BoardConfig,
    // Present whenever the seed is fixed, so moves can be checked.
    maze: Option<Maze>,
    players: BTreeMap<u64, PlayerRecord>,
}

impl Board {
    pub fn new(size: usize, seed: Option<Seed>) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }

        let mut board = Self {
            config: BoardConfig { seed: None, size },
            maze: None,
            players: BTreeMap::new(),
        };
        if let Some(seed) = seed {
            board.set_seed(seed);
        }
        Ok(board)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    /// Read-then-write on the seed. Callers must serialize proposals; the
    /// server does so by applying messages one at a time.
    pub fn apply_seed(&mut self, proposal: SeedProposal) -> SeedOutcome {
        match proposal {
            SeedProposal::InitIfUnset(seed) => {
                if let Some(existing) = &self.config.seed {
                    debug!("seed already set to {existing}; keeping it");
                    return SeedOutcome::Unchanged;
                }
                self.set_seed(seed);
            }
            SeedProposal::Reset(seed) => self.set_seed(seed),
        }

        // A new maze means everybody starts over.
        for record in self.players.values_mut() {
            record.x = 0;
            record.y = 0;
        }
        SeedOutcome::Committed
    }

    fn set_seed(&mut self, seed: Seed) {
        self.maze = match &seed {
            Seed::Unseeded => {
                warn!("board is unseeded; every client will carve its own maze");
                None
            }
            Seed::Fixed(_) => Maze::new(self.config.size, &seed).ok(),
        };
        self.config.seed = Some(seed);
    }

    /// Adds a player at the start cell. Joining again keeps the position and
    /// refreshes name and color.
    pub fn join(&mut self, id: u64, name: Option<String>, color: Color) -> Result<(), BoardError> {
        if let Some(record) = self.players.get_mut(&id) {
            record.name = name;
            record.color = color;
            return Ok(());
        }

        if self.players.len() >= MAX_PLAYERS {
            return Err(BoardError::Full(MAX_PLAYERS));
        }

        self.players.insert(
            id,
            PlayerRecord {
                id,
                name,
                color,
                x: 0,
                y: 0,
            },
        );
        Ok(())
    }

    pub fn leave(&mut self, id: u64) -> Option<PlayerRecord> {
        self.players.remove(&id)
    }

    pub fn move_player(&mut self, id: u64, to: (usize, usize)) -> Result<(), BoardError> {
        let size = self.config.size;
        let record = self
            .players
            .get_mut(&id)
            .ok_or(BoardError::UnknownPlayer(id))?;
        let from = (record.x, record.y);

        let legal = match &self.maze {
            Some(maze) => movement::is_single_step(maze, from, to),
            None => to.0 < size && to.1 < size,
        };
        if !legal {
            return Err(BoardError::IllegalMove { id, from, to });
        }

        record.x = to.0;
        record.y = to.1;
        Ok(())
    }

    pub fn player(&self, id: u64) -> Option<&PlayerRecord> {
        self.players.get(&id)
    }

    pub fn players(&self) -> Vec<PlayerRecord> {
        self.players.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(3, None).expect("size is positive")
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(Board::new(0, None), Err(BoardError::ZeroSize)));
    }

    #[test]
    fn first_proposal_wins_when_both_saw_an_unset_seed() {
        let mut board = board();
        let first = Seed::from(1);
        let second = Seed::from(2);

        assert_eq!(
            board.apply_seed(SeedProposal::InitIfUnset(first.clone())),
            SeedOutcome::Committed
        );
        assert_eq!(
            board.apply_seed(SeedProposal::InitIfUnset(second)),
            SeedOutcome::Unchanged
        );
        assert_eq!(board.config().seed, Some(first));
    }

    #[test]
    fn reset_overwrites_and_sends_everyone_home() {
        let mut board = Board::new(3, Some(Seed::from(42))).unwrap();
        board.join(1, None, Color::BLACK).unwrap();
        board.move_player(1, (1, 0)).unwrap();

        let next = Seed::from(43);
        assert_eq!(
            board.apply_seed(SeedProposal::Reset(next.clone())),
            SeedOutcome::Committed
        );
        assert_eq!(board.config().seed, Some(next));
        let record = board.player(1).unwrap();
        assert_eq!((record.x, record.y), (0, 0));
    }

    #[test]
    fn moves_are_checked_against_the_maze() {
        let mut board = Board::new(3, Some(Seed::from(42))).unwrap();
        board.join(7, Some("ann".to_string()), Color::BLACK).unwrap();

        assert_eq!(
            board.move_player(7, (0, 1)),
            Err(BoardError::IllegalMove {
                id: 7,
                from: (0, 0),
                to: (0, 1)
            })
        );
        assert_eq!(board.move_player(7, (1, 0)), Ok(()));
        assert_eq!(board.move_player(8, (1, 0)), Err(BoardError::UnknownPlayer(8)));
    }

    #[test]
    fn unseeded_boards_only_check_bounds() {
        let mut board = Board::new(3, Some(Seed::Unseeded)).unwrap();
        assert!(board.maze().is_none());
        board.join(1, None, Color::BLACK).unwrap();

        assert_eq!(board.move_player(1, (2, 2)), Ok(()));
        assert!(board.move_player(1, (3, 2)).is_err());
    }

    #[test]
    fn joining_twice_keeps_position() {
        let mut board = Board::new(3, Some(Seed::from(42))).unwrap();
        board.join(1, None, Color::BLACK).unwrap();
        board.move_player(1, (1, 0)).unwrap();
        board.join(1, Some("bo".to_string()), Color::WHITE).unwrap();

        let record = board.player(1).unwrap();
        assert_eq!((record.x, record.y), (1, 0));
        assert_eq!(record.name.as_deref(), Some("bo"));
        assert_eq!(board.players().len(), 1);
    }

    #[test]
    fn board_fills_up() {
        let mut board = board();
        for id in 0..MAX_PLAYERS as u64 {
            board.join(id, None, Color::BLACK).unwrap();
        }
        assert_eq!(
            board.join(999, None, Color::BLACK),
            Err(BoardError::Full(MAX_PLAYERS))
        );
        assert!(board.leave(0).is_some());
        assert!(board.join(999, None, Color::BLACK).is_ok());
    }
}
