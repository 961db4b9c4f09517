use std::{
    io,
    net::{SocketAddr, UdpSocket},
    thread,
    time::{Duration, Instant},
};

use log::{error, info};
use renet::RenetServer;
use renet_netcode::NetcodeServerTransport;

use common::{
    board::Board,
    net::{self as common_net, current_time},
    protocol,
};

use crate::{
    handlers::{handle_messages, process_events},
    net::{self, RenetServerNetworkHandle},
    state::ServerState,
};

const TICK: Duration = Duration::from_millis(16);

pub fn run_server(socket: UdpSocket, server_addr: SocketAddr, board: Board) -> io::Result<()> {
    let protocol_id = protocol::version();
    let server_config = net::build_server_config(current_time(), protocol_id, server_addr);
    let mut transport = NetcodeServerTransport::new(server_config, socket)?;
    let mut server = RenetServer::new(common_net::connection_config());

    print_server_banner(protocol_id, server_addr, &board);
    let mut state = ServerState::new(board);

    server_loop(&mut server, &mut transport, &mut state);
    Ok(())
}

fn print_server_banner(protocol_id: u64, server_addr: SocketAddr, board: &Board) {
    let config = board.config();
    info!("protocol version: {}", protocol_id);
    info!("server address:   {}", server_addr);
    info!("maze size:        {}", config.size);
    match &config.seed {
        Some(seed) => info!("seed:             {}", seed),
        None => info!("seed:             chosen by the first player"),
    }
}

fn server_loop(
    server: &mut RenetServer,
    transport: &mut NetcodeServerTransport,
    state: &mut ServerState,
) {
    let mut last_updated = Instant::now();

    loop {
        let now = Instant::now();
        let duration = now - last_updated;
        last_updated = now;

        if let Err(e) = transport.update(duration, server) {
            error!("transport update failed: {}", e);
        }
        server.update(duration);

        let mut network_handle = RenetServerNetworkHandle { server };
        process_events(&mut network_handle, state);
        handle_messages(&mut network_handle, state);

        transport.send_packets(server);
        thread::sleep(TICK);
    }
}
