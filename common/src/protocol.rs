use bincode::{
    config::{self, Configuration, Limit, standard},
    error::DecodeError,
    serde::{decode_from_slice, encode_to_vec},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    board::{BoardConfig, PlayerRecord, SeedProposal},
    player::Color,
    sync::SyncEvent,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ClientMessage {
    Join { name: Option<String>, color: Color },
    ProposeSeed(SeedProposal),
    Move { x: usize, y: usize },
    Leave,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Board(BoardConfig),
    Players(Vec<PlayerRecord>),
    TransactionFailed { reason: String },
}

impl ServerMessage {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Board(_) => "Board",
            Self::Players(_) => "Players",
            Self::TransactionFailed { .. } => "TransactionFailed",
        }
    }
}

impl From<ServerMessage> for SyncEvent {
    fn from(message: ServerMessage) -> Self {
        match message {
            ServerMessage::Board(config) => SyncEvent::BoardChanged(config),
            ServerMessage::Players(players) => SyncEvent::PlayersChanged(players),
            ServerMessage::TransactionFailed { reason } => SyncEvent::TransactionFailed(reason),
        }
    }
}

/// Upper bound on a single encoded message. Length prefixes past it fail to decode.
pub const MAX_MESSAGE_BYTES: usize = 64 * 1024;

fn wire_config() -> Configuration<config::LittleEndian, config::Varint, Limit<MAX_MESSAGE_BYTES>> {
    standard().with_limit::<MAX_MESSAGE_BYTES>()
}

pub fn encode<T: Serialize>(message: &T) -> Vec<u8> {
    encode_to_vec(message, wire_config()).expect("protocol messages always serialize")
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    decode_from_slice::<T, _>(bytes, wire_config()).map(|(message, _)| message)
}

pub fn version() -> u64 {
    env!("CARGO_PKG_VERSION")
        .split('.')
        .next()
        .and_then(|major| major.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::{MAX_NAME_LENGTH, MAX_PLAYERS},
        seed::Seed,
    };

    #[test]
    fn seed_proposals_survive_the_wire() {
        let message = ClientMessage::ProposeSeed(SeedProposal::Reset(Seed::from(42)));
        let decoded: ClientMessage = decode(&encode(&message)).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(decode::<ClientMessage>(&[0xFF, 0xFF, 0xFF]).is_err());
        assert!(decode::<ServerMessage>(&[]).is_err());
    }

    #[test]
    fn oversized_length_prefix_is_rejected() {
        // Join, name: Some, then a varint u64 length of 2^40 bytes.
        let mut bytes = vec![0, 1, 0xFD];
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
        assert!(decode::<ClientMessage>(&bytes).is_err());
    }

    #[test]
    fn player_lists_fit_under_the_message_limit() {
        let records = (0..MAX_PLAYERS as u64)
            .map(|id| PlayerRecord {
                id,
                name: Some("x".repeat(MAX_NAME_LENGTH)),
                color: Color::BLACK,
                x: 0,
                y: 0,
            })
            .collect::<Vec<_>>();
        let bytes = encode(&ServerMessage::Players(records));
        assert!(bytes.len() < MAX_MESSAGE_BYTES);
    }

    #[test]
    fn server_messages_map_onto_sync_events() {
        let config = BoardConfig {
            seed: None,
            size: 5,
        };
        assert_eq!(
            SyncEvent::from(ServerMessage::Board(config.clone())),
            SyncEvent::BoardChanged(config)
        );
        assert_eq!(
            SyncEvent::from(ServerMessage::TransactionFailed {
                reason: "full".to_string()
            }),
            SyncEvent::TransactionFailed("full".to_string())
        );
    }
}
