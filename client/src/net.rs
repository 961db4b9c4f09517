use std::{
    collections::VecDeque,
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket},
    time::Instant,
};

use log::{debug, info, warn};
use renet::RenetClient;
use renet_netcode::{ClientAuthentication, NetcodeClientTransport};
use thiserror::Error;

use common::{
    board::SeedProposal,
    net::{AppChannel, connection_config, current_time},
    player::Color,
    protocol::{self, ClientMessage, ServerMessage},
    sync::{LocalStore, SyncEvent, SyncStore},
};

#[derive(Debug, Error)]
pub enum NetError {
    #[error("failed to bind client socket: {0}")]
    Socket(#[from] io::Error),
    #[error("network transport failed: {0}")]
    Transport(String),
    #[error("disconnected: {0}")]
    Disconnected(String),
}

/// A sync store that has to be driven once per frame.
pub trait Backend: SyncStore {
    fn pump(&mut self) -> Result<(), NetError>;
    fn shutdown(&mut self) {}
}

impl Backend for LocalStore {
    fn pump(&mut self) -> Result<(), NetError> {
        Ok(())
    }
}

// Client side of the reliable channel. Messages written before the
// handshake finished wait in `pending`.
struct ServerLink {
    client: RenetClient,
    pending: Vec<ClientMessage>,
    events: VecDeque<SyncEvent>,
}

impl ServerLink {
    fn new(client: RenetClient) -> Self {
        Self {
            client,
            pending: Vec::new(),
            events: VecDeque::new(),
        }
    }

    fn send(&mut self, message: ClientMessage) {
        if self.client.is_connected() {
            self.client
                .send_message(AppChannel::ReliableOrdered, protocol::encode(&message));
        } else {
            self.pending.push(message);
        }
    }

    fn flush_pending(&mut self) {
        for message in self.pending.drain(..) {
            self.client
                .send_message(AppChannel::ReliableOrdered, protocol::encode(&message));
        }
    }

    fn receive(&mut self) {
        while let Some(bytes) = self.client.receive_message(AppChannel::ReliableOrdered) {
            match protocol::decode::<ServerMessage>(&bytes) {
                Ok(message) => {
                    debug!("received {}", message.variant_name());
                    self.events.push_back(message.into());
                }
                Err(e) => warn!("dropping undecodable server message: {}", e),
            }
        }
    }

    fn sync(&mut self) {
        if self.client.is_connected() {
            self.flush_pending();
            self.receive();
        }
    }
}

/// The server-backed store. Writes are sent as client messages and the
/// server's broadcasts come back as sync events.
pub struct RenetStore {
    link: ServerLink,
    transport: NetcodeClientTransport,
    client_id: u64,
    last_updated: Instant,
}

impl RenetStore {
    pub fn connect(server_addr: SocketAddr) -> Result<Self, NetError> {
        let client_id = rand::random::<u64>();
        let socket = UdpSocket::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0))?;
        socket.set_nonblocking(true)?;

        let authentication = ClientAuthentication::Unsecure {
            protocol_id: protocol::version(),
            client_id,
            server_addr,
            user_data: None,
        };
        let transport = NetcodeClientTransport::new(current_time(), authentication, socket)
            .map_err(|e| NetError::Transport(e.to_string()))?;
        let client = RenetClient::new(connection_config());

        info!("connecting to {} as client {}", server_addr, client_id);
        Ok(Self {
            link: ServerLink::new(client),
            transport,
            client_id,
            last_updated: Instant::now(),
        })
    }
}

impl SyncStore for RenetStore {
    fn local_id(&self) -> u64 {
        self.client_id
    }

    fn join(&mut self, name: Option<String>, color: Color) {
        self.link.send(ClientMessage::Join { name, color });
    }

    fn propose_seed(&mut self, proposal: SeedProposal) {
        self.link.send(ClientMessage::ProposeSeed(proposal));
    }

    fn publish_position(&mut self, x: usize, y: usize) {
        self.link.send(ClientMessage::Move { x, y });
    }

    fn leave(&mut self) {
        self.link.send(ClientMessage::Leave);
    }

    fn poll_event(&mut self) -> Option<SyncEvent> {
        self.link.events.pop_front()
    }
}

impl Backend for RenetStore {
    fn pump(&mut self) -> Result<(), NetError> {
        let now = Instant::now();
        let dt = now - self.last_updated;
        self.last_updated = now;

        self.transport
            .update(dt, &mut self.link.client)
            .map_err(|e| NetError::Transport(e.to_string()))?;
        self.link.client.update(dt);

        self.link.sync();
        if self.link.client.is_disconnected() {
            let reason = self
                .link
                .client
                .disconnect_reason()
                .map(|reason| format!("{:?}", reason))
                .unwrap_or_else(|| "no reason given".to_string());
            return Err(NetError::Disconnected(reason));
        }

        self.transport
            .send_packets(&mut self.link.client)
            .map_err(|e| NetError::Transport(e.to_string()))
    }

    fn shutdown(&mut self) {
        info!("disconnecting from server");
        self.transport.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::board::BoardConfig;
    use renet::RenetServer;

    const CLIENT_ID: u64 = 7;

    fn join_message() -> ClientMessage {
        ClientMessage::Join {
            name: Some("ann".to_string()),
            color: Color::BLACK,
        }
    }

    fn received_by_server(server: &mut RenetServer) -> Vec<ClientMessage> {
        let mut messages = Vec::new();
        while let Some(bytes) = server.receive_message(CLIENT_ID, AppChannel::ReliableOrdered) {
            messages.push(protocol::decode(&bytes).expect("client messages should decode"));
        }
        messages
    }

    #[test]
    fn writes_wait_for_the_handshake() {
        let mut server = RenetServer::new(connection_config());
        let _registered = server.new_local_client(CLIENT_ID);
        let mut link = ServerLink::new(RenetClient::new(connection_config()));

        link.send(join_message());
        link.send(ClientMessage::Move { x: 1, y: 0 });
        link.sync();
        assert_eq!(link.pending.len(), 2);

        link.client.set_connected();
        link.sync();
        assert!(link.pending.is_empty());

        server
            .process_local_client(CLIENT_ID, &mut link.client)
            .expect("local client should be registered");
        assert_eq!(
            received_by_server(&mut server),
            vec![join_message(), ClientMessage::Move { x: 1, y: 0 }]
        );
    }

    #[test]
    fn connected_writes_go_straight_out() {
        let mut server = RenetServer::new(connection_config());
        let mut link = ServerLink::new(server.new_local_client(CLIENT_ID));

        link.send(ClientMessage::Leave);
        assert!(link.pending.is_empty());

        server
            .process_local_client(CLIENT_ID, &mut link.client)
            .expect("local client should be registered");
        assert_eq!(received_by_server(&mut server), vec![ClientMessage::Leave]);
    }

    #[test]
    fn server_messages_become_events() {
        let mut server = RenetServer::new(connection_config());
        let mut link = ServerLink::new(server.new_local_client(CLIENT_ID));
        let config = BoardConfig {
            seed: None,
            size: 4,
        };

        server.send_message(
            CLIENT_ID,
            AppChannel::ReliableOrdered,
            protocol::encode(&ServerMessage::Board(config.clone())),
        );
        server.send_message(CLIENT_ID, AppChannel::ReliableOrdered, vec![0xFF, 0xFF]);
        server
            .process_local_client(CLIENT_ID, &mut link.client)
            .expect("local client should be registered");
        link.sync();

        assert_eq!(
            link.events.drain(..).collect::<Vec<_>>(),
            vec![SyncEvent::BoardChanged(config)]
        );
    }
}
