use log::{debug, info, warn};

use common::{
    board::{SeedOutcome, SeedProposal},
    player::{Color, sanitize_name},
    protocol::{self, ClientMessage, ServerMessage},
};

use crate::{
    net::{ServerNetworkEvent, ServerNetworkHandle},
    state::ServerState,
};

pub fn process_events(network: &mut dyn ServerNetworkHandle, state: &mut ServerState) {
    while let Some(event) = network.next_event() {
        match event {
            ServerNetworkEvent::ClientConnected { client_id } => {
                info!("client {} connected", client_id);
                state.register_connection(client_id);
            }
            ServerNetworkEvent::ClientDisconnected { client_id, reason } => {
                info!("client {} disconnected: {}", client_id, reason);
                if state.remove_client(client_id).is_some() {
                    broadcast_players(network, state);
                }
            }
        }
    }
}

/// Applies every queued client message in arrival order. Proposals are
/// applied one at a time, so two clients racing to seed an empty board
/// cannot both win.
pub fn handle_messages(network: &mut dyn ServerNetworkHandle, state: &mut ServerState) {
    for client_id in network.client_ids() {
        while let Some(data) = network.receive(client_id) {
            let Ok(message) = protocol::decode::<ClientMessage>(&data) else {
                warn!("client {} sent malformed data; disconnecting", client_id);
                network.disconnect(client_id);
                if state.remove_client(client_id).is_some() {
                    broadcast_players(network, state);
                }
                break;
            };

            handle_message(network, state, client_id, message);
        }
    }
}

fn handle_message(
    network: &mut dyn ServerNetworkHandle,
    state: &mut ServerState,
    client_id: u64,
    message: ClientMessage,
) {
    match message {
        ClientMessage::Join { name, color } => {
            let name = name.as_deref().and_then(sanitize_name);
            join(network, state, client_id, name, color);
        }
        ClientMessage::ProposeSeed(proposal) => {
            let kind = match &proposal {
                SeedProposal::InitIfUnset(_) => "initial",
                SeedProposal::Reset(_) => "reset",
            };
            match state.board.apply_seed(proposal) {
                SeedOutcome::Committed => {
                    let config = state.board.config().clone();
                    if let Some(seed) = &config.seed {
                        info!("client {} committed {} seed {}", client_id, kind, seed);
                    }
                    if let Some(maze) = state.board.maze() {
                        debug!("new maze:\n{}", maze);
                    }
                    broadcast(network, &ServerMessage::Board(config));
                    broadcast_players(network, state);
                }
                SeedOutcome::Unchanged => {
                    debug!("client {} lost the race for the {} seed", client_id, kind);
                }
            }
        }
        ClientMessage::Move { x, y } => match state.board.move_player(client_id, (x, y)) {
            Ok(()) => broadcast_players(network, state),
            Err(e) => {
                warn!("{}", e);
                reject(network, client_id, e.to_string());
            }
        },
        ClientMessage::Leave => {
            if state.board.leave(client_id).is_some() {
                info!("client {} left the board", client_id);
                broadcast_players(network, state);
            }
        }
    }
}

fn broadcast_players(network: &mut dyn ServerNetworkHandle, state: &ServerState) {
    broadcast(network, &ServerMessage::Players(state.board.players()));
}

fn reject(network: &mut dyn ServerNetworkHandle, client_id: u64, reason: String) {
    send(network, client_id, &ServerMessage::TransactionFailed { reason });
}

fn join(
    network: &mut dyn ServerNetworkHandle,
    state: &mut ServerState,
    client_id: u64,
    name: Option<String>,
    color: Color,
) {
    match state.board.join(client_id, name, color) {
        Ok(()) => {
            let label = state
                .board
                .player(client_id)
                .and_then(|record| record.name.clone())
                .unwrap_or_else(|| "anonymous".to_string());
            info!("client {} joined as {} ({})", client_id, label, color);
            send(
                network,
                client_id,
                &ServerMessage::Board(state.board.config().clone()),
            );
            broadcast_players(network, state);
        }
        Err(e) => {
            warn!("client {} could not join: {}", client_id, e);
            reject(network, client_id, e.to_string());
        }
    }
}

fn send(network: &mut dyn ServerNetworkHandle, client_id: u64, message: &ServerMessage) {
    debug!("sending {} to client {}", message.variant_name(), client_id);
    network.send(client_id, message);
}

fn broadcast(network: &mut dyn ServerNetworkHandle, message: &ServerMessage) {
    debug!("broadcasting {}", message.variant_name());
    network.broadcast(message);
}
