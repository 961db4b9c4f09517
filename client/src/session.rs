use std::collections::HashSet;

use log::{info, warn};

use common::{
    board::{BoardConfig, PlayerRecord, SeedProposal},
    maze::Maze,
    movement::{self, Direction},
    player::Player,
    seed::Seed,
    sync::{SyncEvent, SyncStore},
};

/// How long a notice stays on screen, in seconds.
pub const NOTICE_SECONDS: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    remaining: f32,
}

/// Client-side state of one game: the local player, mirrors of everyone
/// else, and the maze carved from the current board.
pub struct GameSession {
    local: Player,
    remotes: Vec<(u64, Player)>,
    board: Option<BoardConfig>,
    maze: Option<Maze>,
    trail: Vec<(usize, usize)>,
    draw_trail: bool,
    notice: Option<Notice>,
    // Remote players already announced as winners this round.
    announced: HashSet<u64>,
}

impl GameSession {
    pub fn new(local: Player, draw_trail: bool) -> Self {
        Self {
            local,
            remotes: Vec::new(),
            board: None,
            maze: None,
            trail: Vec::new(),
            draw_trail,
            notice: None,
            announced: HashSet::new(),
        }
    }

    pub fn start<S: SyncStore + ?Sized>(&mut self, store: &mut S) {
        if self.local.name.is_none() {
            self.local.name = Some(format!("player-{:04}", store.local_id() % 10_000));
        }
        info!("joining as {} ({})", self.local.label(), self.local.color);
        store.join(self.local.name.clone(), self.local.color);
    }

    pub fn handle_event<S: SyncStore + ?Sized>(&mut self, store: &mut S, event: SyncEvent) {
        match event {
            SyncEvent::BoardChanged(config) => self.on_board_changed(store, config),
            SyncEvent::PlayersChanged(records) => self.on_players_changed(store.local_id(), &records),
            SyncEvent::TransactionFailed(reason) => warn!("transaction failed: {}", reason),
        }
    }

    /// Tries to move the local player. Legal moves are published; reaching
    /// the goal starts a new round for everybody.
    pub fn handle_direction<S: SyncStore + ?Sized>(
        &mut self,
        store: &mut S,
        direction: Direction,
    ) -> bool {
        let Some(maze) = &self.maze else {
            return false;
        };
        if !self.local.attempt_move(maze, direction) {
            return false;
        }

        let (x, y) = self.local.position();
        if self.draw_trail {
            self.trail.push((x, y));
        }
        store.publish_position(x, y);

        if self.local.has_won(maze.size()) {
            info!("reached the goal");
            self.announce("You win!".to_string());
            store.propose_seed(SeedProposal::Reset(Seed::generate()));
        }
        true
    }

    pub fn leave<S: SyncStore + ?Sized>(&mut self, store: &mut S) {
        info!("leaving the game");
        store.leave();
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(notice) = &mut self.notice {
            notice.remaining -= dt;
            if notice.remaining <= 0.0 {
                self.notice = None;
            }
        }
    }

    pub fn local(&self) -> &Player {
        &self.local
    }

    pub fn remotes(&self) -> impl Iterator<Item = &Player> {
        self.remotes.iter().map(|(_, player)| player)
    }

    pub fn board(&self) -> Option<&BoardConfig> {
        self.board.as_ref()
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn draws_trail(&self) -> bool {
        self.draw_trail
    }

    pub fn trail(&self) -> &[(usize, usize)] {
        &self.trail
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|notice| notice.text.as_str())
    }

    fn on_board_changed<S: SyncStore + ?Sized>(&mut self, store: &mut S, config: BoardConfig) {
        if self.board.as_ref() == Some(&config) && self.maze.is_some() {
            return;
        }

        let Some(seed) = &config.seed else {
            info!("board has no seed yet; proposing one");
            self.maze = None;
            self.board = Some(config);
            store.propose_seed(SeedProposal::InitIfUnset(Seed::generate()));
            return;
        };

        match Maze::new(config.size, seed) {
            Ok(maze) => {
                info!("new {0}x{0} maze from seed {1}", config.size, seed);
                self.maze = Some(maze);
                self.local.reset();
                self.trail = vec![self.local.position()];
                self.announced.clear();
            }
            Err(e) => {
                warn!("ignoring board: {}", e);
                self.maze = None;
            }
        }
        self.board = Some(config);
    }

    fn on_players_changed(&mut self, local_id: u64, records: &[PlayerRecord]) {
        self.remotes = records
            .iter()
            .filter(|record| record.id != local_id)
            .map(|record| (record.id, record.to_player()))
            .collect();

        let Some(size) = self.maze.as_ref().map(Maze::size) else {
            return;
        };
        let winners: Vec<(u64, String)> = self
            .remotes
            .iter()
            .filter(|(id, player)| {
                movement::is_winning_position(size, player.x, player.y)
                    && !self.announced.contains(id)
            })
            .map(|(id, player)| (*id, format!("{} wins!", player.label())))
            .collect();
        for (id, text) in winners {
            self.announced.insert(id);
            self.announce(text);
        }
    }

    fn announce(&mut self, text: String) {
        info!("{}", text);
        self.notice = Some(Notice {
            text,
            remaining: NOTICE_SECONDS,
        });
    }
}
