use std::net::SocketAddr;

use common::{
    config::{self, ConfigError},
    constants::DEFAULT_SIZE,
    net,
    seed::Seed,
};

/// Everything the server reads from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub address: SocketAddr,
    pub size: usize,
    /// `None` leaves the board unseeded until the first client proposes one.
    pub seed: Option<Seed>,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            address: net::server_address()?,
            size: config::size_var("MAZE_SIZE", DEFAULT_SIZE)?,
            seed: config::var("MAZE_SEED").map(|text| Seed::from(text.as_str())),
        })
    }
}
