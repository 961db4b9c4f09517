use thiserror::Error;

use common::{board::BoardError, config::ConfigError};

use crate::net::NetError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Net(#[from] NetError),
}
