use std::collections::{HashMap, VecDeque};

use common::protocol::{self, ClientMessage, ServerMessage};

use crate::net::{ServerNetworkEvent, ServerNetworkHandle};

#[derive(Default)]
pub struct MockServerNetwork {
    events_to_process: VecDeque<ServerNetworkEvent>,
    client_messages: HashMap<u64, VecDeque<Vec<u8>>>,
    sent_messages: HashMap<u64, Vec<ServerMessage>>,
    broadcast_messages: Vec<ServerMessage>,
    pub disconnected_clients: Vec<u64>,
    /// Who `client_ids()` reports, in the order they were added.
    client_ids: Vec<u64>,
}

impl MockServerNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_client(&mut self, client_id: u64) {
        if !self.client_ids.contains(&client_id) {
            self.client_ids.push(client_id);
        }
    }

    pub fn queue_event(&mut self, event: ServerNetworkEvent) {
        self.events_to_process.push_back(event);
    }

    pub fn queue_message(&mut self, client_id: u64, message: &ClientMessage) {
        self.queue_raw_message(client_id, protocol::encode(message));
    }

    pub fn queue_raw_message(&mut self, client_id: u64, message: Vec<u8>) {
        self.client_messages
            .entry(client_id)
            .or_default()
            .push_back(message);
    }

    pub fn sent_to(&self, client_id: u64) -> Vec<ServerMessage> {
        self.sent_messages
            .get(&client_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn broadcasts(&self) -> Vec<ServerMessage> {
        self.broadcast_messages.clone()
    }

    /// Forgets everything sent so far.
    pub fn clear(&mut self) {
        self.sent_messages.clear();
        self.broadcast_messages.clear();
    }
}

impl ServerNetworkHandle for MockServerNetwork {
    fn next_event(&mut self) -> Option<ServerNetworkEvent> {
        self.events_to_process.pop_front()
    }

    fn client_ids(&self) -> Vec<u64> {
        self.client_ids.clone()
    }

    fn receive(&mut self, client_id: u64) -> Option<Vec<u8>> {
        self.client_messages
            .get_mut(&client_id)
            .and_then(|queue| queue.pop_front())
    }

    fn send(&mut self, client_id: u64, message: &ServerMessage) {
        self.sent_messages
            .entry(client_id)
            .or_default()
            .push(message.clone());
    }

    fn broadcast(&mut self, message: &ServerMessage) {
        self.broadcast_messages.push(message.clone());
    }

    fn disconnect(&mut self, client_id: u64) {
        self.disconnected_clients.push(client_id);
        self.client_ids.retain(|&id| id != client_id);
    }
}
