use std::{
    io,
    net::{SocketAddr, UdpSocket},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use renet::{ChannelConfig, ConnectionConfig, SendType};
use socket2::{Domain, Socket, Type};

use crate::config::{self, ConfigError};

pub const DEFAULT_IP: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Address from `IP` and `PORT`, falling back to `127.0.0.1:5000`.
pub fn server_address() -> Result<SocketAddr, ConfigError> {
    let ip = config::var("IP").unwrap_or_else(|| DEFAULT_IP.to_string());
    let port: u16 = config::parse_var("PORT", DEFAULT_PORT)?;
    config::parse_value("IP", &format!("{}:{}", ip, port))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppChannel {
    ReliableOrdered,
}

impl From<AppChannel> for u8 {
    fn from(channel: AppChannel) -> Self {
        match channel {
            AppChannel::ReliableOrdered => 0,
        }
    }
}

// Board and player updates must all arrive and in order, so a single
// reliable channel carries everything.
pub fn connection_config() -> ConnectionConfig {
    let reliable_config = ChannelConfig {
        channel_id: AppChannel::ReliableOrdered.into(),
        max_memory_usage_bytes: 5 * 1024 * 1024,
        send_type: SendType::ReliableOrdered {
            resend_time: Duration::from_millis(100),
        },
    };

    ConnectionConfig {
        client_channels_config: vec![reliable_config.clone()],
        server_channels_config: vec![reliable_config],
        ..Default::default()
    }
}

pub fn bind_socket(addr: SocketAddr) -> io::Result<UdpSocket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, None)?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    Ok(socket.into())
}

pub fn current_time() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}
