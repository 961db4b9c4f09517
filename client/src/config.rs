use std::net::SocketAddr;

use common::{
    config::{self, ConfigError},
    constants::DEFAULT_SIZE,
    net,
    player::{self, Color},
    seed::Seed,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub server_address: SocketAddr,
    pub name: Option<String>,
    pub color: Option<Color>,
    pub draw_trail: bool,
    pub solo: bool,
    /// Board size and seed for solo play. A networked client takes both
    /// from the server.
    pub size: usize,
    pub seed: Option<Seed>,
}

impl ClientSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let color = match config::var("PLAYER_COLOR") {
            Some(value) => Some(Color::from_hex(&value).ok_or(ConfigError::Invalid {
                key: "PLAYER_COLOR",
                value,
                reason: "expected #RRGGBB".to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            server_address: net::server_address()?,
            name: config::var("PLAYER_NAME").and_then(|name| player::sanitize_name(&name)),
            color,
            draw_trail: config::flag_var("DRAW_TRAIL")?,
            solo: config::flag_var("SOLO")?,
            size: config::size_var("MAZE_SIZE", DEFAULT_SIZE)?,
            seed: config::var("MAZE_SEED").map(|text| Seed::from(text.as_str())),
        })
    }
}
