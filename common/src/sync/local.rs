use std::collections::VecDeque;

use log::debug;

use super::{SyncEvent, SyncStore};
use crate::{
    board::{Board, SeedOutcome, SeedProposal},
    player::Color,
};

/// A store living in the same process: solo play and tests.
pub struct LocalStore {
    board: Board,
    local_id: u64,
    events: VecDeque<SyncEvent>,
}

impl LocalStore {
    pub fn new(board: Board, local_id: u64) -> Self {
        Self {
            board,
            local_id,
            events: VecDeque::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct access for simulating other participants.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn notify_board(&mut self) {
        self.events
            .push_back(SyncEvent::BoardChanged(self.board.config().clone()));
    }

    pub fn notify_players(&mut self) {
        self.events
            .push_back(SyncEvent::PlayersChanged(self.board.players()));
    }

    fn fail(&mut self, reason: String) {
        debug!("local transaction failed: {reason}");
        self.events.push_back(SyncEvent::TransactionFailed(reason));
    }
}

impl SyncStore for LocalStore {
    fn local_id(&self) -> u64 {
        self.local_id
    }

    fn join(&mut self, name: Option<String>, color: Color) {
        match self.board.join(self.local_id, name, color) {
            Ok(()) => {
                self.notify_board();
                self.notify_players();
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn propose_seed(&mut self, proposal: SeedProposal) {
        if self.board.apply_seed(proposal) == SeedOutcome::Committed {
            self.notify_board();
            self.notify_players();
        }
    }

    fn publish_position(&mut self, x: usize, y: usize) {
        match self.board.move_player(self.local_id, (x, y)) {
            Ok(()) => self.notify_players(),
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn leave(&mut self) {
        if self.board.leave(self.local_id).is_some() {
            self.notify_players();
        }
    }

    fn poll_event(&mut self) -> Option<SyncEvent> {
        self.events.pop_front()
    }
}
