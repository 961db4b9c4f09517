use std::{net::SocketAddr, time::Duration};

use renet::{RenetServer, ServerEvent};
use renet_netcode::{ServerAuthentication, ServerConfig};

use common::{
    constants::MAX_PLAYERS,
    net::AppChannel,
    protocol::{self, ServerMessage},
};

pub enum ServerNetworkEvent {
    ClientConnected { client_id: u64 },
    ClientDisconnected { client_id: u64, reason: String },
}

/// Everything the handlers need from the transport. All traffic rides the
/// single reliable channel, so no method takes a channel.
pub trait ServerNetworkHandle {
    fn next_event(&mut self) -> Option<ServerNetworkEvent>;
    fn client_ids(&self) -> Vec<u64>;
    /// Raw bytes, decoded by the handlers.
    fn receive(&mut self, client_id: u64) -> Option<Vec<u8>>;
    fn send(&mut self, client_id: u64, message: &ServerMessage);
    fn broadcast(&mut self, message: &ServerMessage);
    fn disconnect(&mut self, client_id: u64);
}

pub struct RenetServerNetworkHandle<'a> {
    pub server: &'a mut RenetServer,
}

impl ServerNetworkHandle for RenetServerNetworkHandle<'_> {
    fn next_event(&mut self) -> Option<ServerNetworkEvent> {
        self.server.get_event().map(|event| match event {
            ServerEvent::ClientConnected { client_id } => {
                ServerNetworkEvent::ClientConnected { client_id }
            }
            ServerEvent::ClientDisconnected { client_id, reason } => {
                ServerNetworkEvent::ClientDisconnected {
                    client_id,
                    reason: reason.to_string(),
                }
            }
        })
    }

    fn client_ids(&self) -> Vec<u64> {
        self.server.clients_id()
    }

    fn receive(&mut self, client_id: u64) -> Option<Vec<u8>> {
        self.server
            .receive_message(client_id, AppChannel::ReliableOrdered)
            .map(|bytes| bytes.to_vec())
    }

    fn send(&mut self, client_id: u64, message: &ServerMessage) {
        self.server
            .send_message(client_id, AppChannel::ReliableOrdered, protocol::encode(message));
    }

    fn broadcast(&mut self, message: &ServerMessage) {
        self.server
            .broadcast_message(AppChannel::ReliableOrdered, protocol::encode(message));
    }

    fn disconnect(&mut self, client_id: u64) {
        self.server.disconnect(client_id);
    }
}

// Clients connect without a token. Every move is validated against the
// maze on arrival.
pub fn build_server_config(
    current_time: Duration,
    protocol_id: u64,
    public_addr: SocketAddr,
) -> ServerConfig {
    ServerConfig {
        current_time,
        max_clients: MAX_PLAYERS,
        protocol_id,
        public_addresses: vec![public_addr],
        authentication: ServerAuthentication::Unsecure,
    }
}
