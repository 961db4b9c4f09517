use std::collections::HashSet;

use common::board::{Board, PlayerRecord};

/// The authoritative board plus the transport-level view of who is online.
/// A connected client only appears on the board after it sends `Join`.
pub struct ServerState {
    pub board: Board,
    connected: HashSet<u64>,
}

impl ServerState {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            connected: HashSet::new(),
        }
    }

    pub fn register_connection(&mut self, client_id: u64) {
        self.connected.insert(client_id);
    }

    pub fn is_connected(&self, client_id: u64) -> bool {
        self.connected.contains(&client_id)
    }

    /// Forgets a client entirely. Returns its board record if it had joined.
    pub fn remove_client(&mut self, client_id: u64) -> Option<PlayerRecord> {
        self.connected.remove(&client_id);
        self.board.leave(client_id)
    }

    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }
}
