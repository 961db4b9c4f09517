pub mod local;

use crate::{
    board::{BoardConfig, PlayerRecord, SeedProposal},
    player::Color,
};

pub use local::LocalStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncEvent {
    BoardChanged(BoardConfig),
    /// The full player list, local player included.
    PlayersChanged(Vec<PlayerRecord>),
    TransactionFailed(String),
}

/// The shared store every participant reads and writes. All calls and all
/// events happen on the caller's thread.
pub trait SyncStore {
    fn local_id(&self) -> u64;
    /// Registers the local player. The store answers with the current board
    /// and player list.
    fn join(&mut self, name: Option<String>, color: Color);
    fn propose_seed(&mut self, proposal: SeedProposal);
    fn publish_position(&mut self, x: usize, y: usize);
    fn leave(&mut self);
    fn poll_event(&mut self) -> Option<SyncEvent>;
}
